//! Command structs for group history writes.
//!
//! They group the parameters of [`Engine::add_expense`] and
//! [`Engine::add_settlement`], keeping call sites readable. Timestamps are
//! always supplied by the caller.
//!
//! [`Engine::add_expense`]: crate::Engine::add_expense
//! [`Engine::add_settlement`]: crate::Engine::add_settlement

use chrono::{DateTime, Utc};

use crate::{GroupId, MemberId, MoneyCents, Split};

/// Description used when an expense is recorded without one.
pub const DEFAULT_EXPENSE_DESCRIPTION: &str = "Unspecified Expense";

/// Record an expense paid by one member and split among several.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub group_id: GroupId,
    pub paid_by: MemberId,
    pub amount: MoneyCents,
    pub split: Split,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        group_id: impl Into<GroupId>,
        paid_by: impl Into<MemberId>,
        amount: MoneyCents,
        split: Split,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            paid_by: paid_by.into(),
            amount,
            split,
            description: None,
            occurred_at,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trimmed description, or the default one when missing/blank.
    pub(crate) fn resolved_description(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_EXPENSE_DESCRIPTION)
            .to_string()
    }
}

/// Record a direct payment between two members.
#[derive(Clone, Debug)]
pub struct SettlementCmd {
    pub group_id: GroupId,
    pub payer: MemberId,
    pub receiver: MemberId,
    pub amount: MoneyCents,
    pub occurred_at: DateTime<Utc>,
}

impl SettlementCmd {
    #[must_use]
    pub fn new(
        group_id: impl Into<GroupId>,
        payer: impl Into<MemberId>,
        receiver: impl Into<MemberId>,
        amount: MoneyCents,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            payer: payer.into(),
            receiver: receiver.into(),
            amount,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_falls_back_to_default() {
        let cmd = ExpenseCmd::new(
            "g",
            "alice",
            MoneyCents::new(100),
            Split::Equally(vec![MemberId::from("alice")]),
            Utc::now(),
        );
        assert_eq!(cmd.resolved_description(), DEFAULT_EXPENSE_DESCRIPTION);
        assert_eq!(
            cmd.clone().description("   ").resolved_description(),
            DEFAULT_EXPENSE_DESCRIPTION
        );
        assert_eq!(cmd.description(" Pizza ").resolved_description(), "Pizza");
    }
}
