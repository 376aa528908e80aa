//! Group expense-splitting ledger.
//!
//! Two pure functions do the accounting:
//!
//! - [`compute_balances`] folds the expenses and settlements of a group into
//!   a net balance per member.
//! - [`simplify`] turns those balances into a short list of "who pays whom"
//!   transfers.
//!
//! [`Engine`] is an in-memory book of groups around them: it admits members,
//! expenses and settlements after validating them, and recomputes balances,
//! the settle-up plan and the activity feed on every query.
//!
//! ```rust
//! use chrono::Utc;
//! use engine::{Engine, ExpenseCmd, MoneyCents, SequentialIds, Split};
//!
//! let engine = Engine::builder().ids(SequentialIds::new()).build();
//! let group = engine.new_group("Trip", "Alice", None).unwrap();
//! let alice = group.members[0].id.clone();
//! let bob = engine.add_member(&group.id, "Bob").unwrap().id;
//!
//! engine
//!     .add_expense(ExpenseCmd::new(
//!         group.id.clone(),
//!         alice.clone(),
//!         MoneyCents::new(5000),
//!         Split::Equally(vec![alice.clone(), bob.clone()]),
//!         Utc::now(),
//!     ))
//!     .unwrap();
//!
//! let debts = engine.simplified_debts(&group.id).unwrap();
//! assert_eq!(debts.len(), 1);
//! assert_eq!(debts[0].from, bob);
//! assert_eq!(debts[0].amount, MoneyCents::new(2500));
//! ```

pub use activity::{Activity, activity_feed};
pub use balances::{Balances, compute_balances};
pub use commands::{DEFAULT_EXPENSE_DESCRIPTION, ExpenseCmd, SettlementCmd};
pub use currency::Currency;
pub use error::EngineError;
pub use expenses::{
    Expense, PERCENT_TOLERANCE_BP, Percent, SPLIT_TOLERANCE, Split, SplitDetail, SplitMethod,
};
pub use group::Group;
pub use ids::{
    ExpenseId, GroupId, INVITE_CODE_LEN, IdGenerator, IdKind, MemberId, SequentialIds,
    SettlementId, UuidIds,
};
pub use members::{Member, name_key};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use settlements::Settlement;
pub use simplify::{
    SETTLED_TOLERANCE, SimplifiedDebt, apply_transfers, simplify, simplify_with_tolerance,
};

mod activity;
mod balances;
mod commands;
mod currency;
mod error;
mod expenses;
mod group;
mod ids;
mod members;
mod money;
mod ops;
mod settlements;
mod simplify;

pub type ResultEngine<T> = Result<T, EngineError>;
