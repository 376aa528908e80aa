//! Combined activity feed of a group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Expense, MoneyCents, Settlement};

/// One entry of the feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    Expense(Expense),
    Settlement(Settlement),
}

impl Activity {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Expense(expense) => expense.occurred_at,
            Self::Settlement(settlement) => settlement.occurred_at,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Expense(expense) => expense.id.as_str(),
            Self::Settlement(settlement) => settlement.id.as_str(),
        }
    }

    pub fn amount(&self) -> MoneyCents {
        match self {
            Self::Expense(expense) => expense.amount,
            Self::Settlement(settlement) => settlement.amount,
        }
    }
}

/// Builds a new feed with expenses and settlements, most recent first.
///
/// Entries with the same timestamp keep their input order, expenses before
/// settlements. The inputs are left untouched.
pub fn activity_feed(expenses: &[Expense], settlements: &[Settlement]) -> Vec<Activity> {
    let mut feed: Vec<Activity> = expenses
        .iter()
        .cloned()
        .map(Activity::Expense)
        .chain(settlements.iter().cloned().map(Activity::Settlement))
        .collect();
    feed.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));
    feed
}
