//! Identifiers and their generation.
//!
//! Ids are opaque strings. They are produced by an [`IdGenerator`] that the
//! caller injects into the [`Engine`](crate::Engine), so the engine never
//! derives identities from the wall clock and tests stay deterministic.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a group invite code.
pub const INVITE_CODE_LEN: usize = 6;

const INVITE_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identity of a group.
    GroupId
);
string_id!(
    /// Identity of a group member. Balance maps are keyed by it.
    MemberId
);
string_id!(ExpenseId);
string_id!(SettlementId);

/// What an id is generated for. Generators may use it as a prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    Group,
    Member,
    Expense,
    Settlement,
}

impl IdKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Member => "member",
            Self::Expense => "expense",
            Self::Settlement => "settlement",
        }
    }
}

/// Source of fresh identities for groups, members and history records.
pub trait IdGenerator: Send + Sync {
    /// Returns a new unique id for the given kind.
    fn next_id(&self, kind: IdKind) -> String;

    /// Returns a short human-shareable code for joining a group.
    fn invite_code(&self) -> String;
}

/// Random ids backed by UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, _kind: IdKind) -> String {
        Uuid::new_v4().to_string()
    }

    fn invite_code(&self) -> String {
        let mut code = String::with_capacity(INVITE_CODE_LEN);
        while code.len() < INVITE_CODE_LEN {
            let uuid = Uuid::new_v4();
            let bytes = uuid.as_bytes();
            // Bytes 6 and 8 carry the version and variant bits.
            let random = bytes[..6].iter().chain(&bytes[9..]);
            let missing = INVITE_CODE_LEN - code.len();
            code.extend(random.filter_map(|b| invite_char(*b)).take(missing));
        }
        code
    }
}

/// Maps a random byte onto the invite alphabet, rejecting the top bytes that
/// would otherwise favour the first characters.
fn invite_char(byte: u8) -> Option<char> {
    let len = INVITE_ALPHABET.len();
    let byte = usize::from(byte);
    (byte < 256 - 256 % len).then(|| char::from(INVITE_ALPHABET[byte % len]))
}

/// Deterministic ids: `member-1`, `expense-2`, … and invite codes `INV001`, ….
///
/// A single counter is shared by all kinds.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
    invites: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, kind: IdKind) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", kind.as_str())
    }

    fn invite_code(&self) -> String {
        let n = self.invites.fetch_add(1, Ordering::Relaxed) + 1;
        format!("INV{n:03}")
    }
}
