//! Direct cash transfers between two members.
//!
//! A settlement is not tied to any expense: the payer hands money to the
//! receiver, which lowers the payer's debt and the receiver's credit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, GroupId, MemberId, MoneyCents, ResultEngine, SettlementId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub group_id: GroupId,
    pub payer: MemberId,
    pub receiver: MemberId,
    pub amount: MoneyCents,
    pub occurred_at: DateTime<Utc>,
}

/// Admission rules for a settlement: positive amount, two distinct members.
pub(crate) fn validate_transfer(
    payer: &MemberId,
    receiver: &MemberId,
    amount: MoneyCents,
) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "settlement amount must be > 0".to_string(),
        ));
    }
    if payer == receiver {
        return Err(EngineError::InvalidSettlement(
            "payer and receiver cannot be the same member".to_string(),
        ));
    }
    Ok(())
}
