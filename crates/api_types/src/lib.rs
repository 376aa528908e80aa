use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Eur,
}

/// Response body for any create request returning only an id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        /// Display name of the member creating the group.
        pub admin_name: String,
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: String,
        pub name: String,
        pub invite_code: String,
        pub currency: Currency,
        pub members: Vec<MemberView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: String,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MembersResponse {
        pub members: Vec<MemberView>,
    }
}

pub mod expense {
    use super::*;

    /// How the expense is divided.
    ///
    /// Percentages are basis points (`2500` = 25%) and must add up to 100%.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "method", rename_all = "snake_case")]
    pub enum SplitInput {
        Equally { member_ids: Vec<String> },
        Custom { shares: Vec<ShareAmount> },
        Percentage { shares: Vec<SharePercent> },
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareAmount {
        pub member_id: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SharePercent {
        pub member_id: String,
        pub basis_points: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: Option<String>,
        /// Must be > 0.
        pub amount_minor: i64,
        pub paid_by: String,
        pub split: SplitInput,
        /// RFC3339 timestamp. Optional: if absent, server uses now().
        pub occurred_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitMethod {
        Equally,
        Custom,
        Percentage,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitDetailView {
        pub member_id: String,
        pub amount_minor: i64,
        pub basis_points: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub description: String,
        pub amount_minor: i64,
        pub paid_by: String,
        pub split_method: SplitMethod,
        pub split_details: Vec<SplitDetailView>,
        pub occurred_at: DateTime<Utc>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub payer: String,
        pub receiver: String,
        /// Must be > 0.
        pub amount_minor: i64,
        /// RFC3339 timestamp. Optional: if absent, server uses now().
        pub occurred_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub id: String,
        pub payer: String,
        pub receiver: String,
        pub amount_minor: i64,
        pub occurred_at: DateTime<Utc>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub member_id: String,
        /// Member name; absent for ids that are not group members.
        pub name: Option<String>,
        /// Positive: the group owes the member. Negative: the member owes.
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub currency: Currency,
        pub balances: Vec<BalanceView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtView {
        pub from: String,
        pub from_name: String,
        pub to: String,
        pub to_name: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtsResponse {
        pub currency: Currency,
        pub debts: Vec<DebtView>,
    }
}

pub mod activity {
    use super::*;
    use crate::{expense::ExpenseView, settlement::SettlementView};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum ActivityView {
        Expense(ExpenseView),
        Settlement(SettlementView),
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityResponse {
        /// Most recent first.
        pub activity: Vec<ActivityView>,
    }
}
