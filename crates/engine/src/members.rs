//! Group members.
//!
//! A member is created when a group is created (the admin) or later through
//! [`Engine::add_member`](crate::Engine::add_member). Members are immutable
//! and never removed.

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, MemberId, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Trims a display name and collapses inner whitespace.
pub(crate) fn normalize_display_name(input: &str) -> ResultEngine<String> {
    let out = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if out.is_empty() {
        return Err(EngineError::InvalidName(
            "member name must not be empty".to_string(),
        ));
    }
    Ok(out)
}

/// Key used to detect duplicate member names.
///
/// Case, accents and punctuation are ignored: "José", "jose" and " JOSE! "
/// share the same key.
///
/// ```rust
/// use engine::name_key;
///
/// assert_eq!(name_key("José"), name_key(" JOSE "));
/// assert_ne!(name_key("Bob"), name_key("Bobby"));
/// ```
#[must_use]
pub fn name_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}
