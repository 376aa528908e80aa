//! Expenses and how they are split.
//!
//! An [`Expense`] records who advanced the money and how much each involved
//! member consumed ([`SplitDetail`]). The details of an admitted expense
//! always add up to its total (within [`SPLIT_TOLERANCE`]); the balance
//! computation relies on that and does not check it again.
//!
//! [`Split`] is the input side: it turns an "equal / custom / percentage"
//! request into concrete details, rejecting requests that do not add up.

use std::{collections::HashSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ExpenseId, GroupId, MemberId, MoneyCents, ResultEngine};

/// Maximum distance between the sum of custom amounts and the expense total.
pub const SPLIT_TOLERANCE: MoneyCents = MoneyCents::new(1);

/// Maximum distance between the sum of percentages and 100%, in basis points.
pub const PERCENT_TOLERANCE_BP: u32 = 10;

const FULL_BP: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    Equally,
    Custom,
    Percentage,
}

impl SplitMethod {
    /// Human label of the method.
    pub fn label(self) -> &'static str {
        match self {
            Self::Equally => "Equally",
            Self::Custom => "Custom Amounts",
            Self::Percentage => "Percentages",
        }
    }
}

/// A percentage stored in basis points (`2_500` = 25%).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(u32);

impl Percent {
    #[must_use]
    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Whole percent, e.g. `Percent::whole(25)` is 25%.
    #[must_use]
    pub const fn whole(percent: u32) -> Self {
        Self(percent * 100)
    }

    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            let frac = format!("{frac:02}");
            write!(f, "{whole}.{}%", frac.trim_end_matches('0'))
        }
    }
}

/// What one member owes for one expense.
///
/// `percentage` is informational only (set for percentage splits); balances
/// use `amount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDetail {
    pub member_id: MemberId,
    pub amount: MoneyCents,
    pub percentage: Option<Percent>,
}

impl SplitDetail {
    pub fn new(member_id: impl Into<MemberId>, amount: MoneyCents) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
            percentage: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: GroupId,
    pub description: String,
    pub amount: MoneyCents,
    pub paid_by: MemberId,
    pub split_method: SplitMethod,
    pub split_details: Vec<SplitDetail>,
    pub occurred_at: DateTime<Utc>,
}

/// A request to divide an expense among members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Split {
    /// Equal shares among the listed members.
    Equally(Vec<MemberId>),
    /// Explicit amount per member.
    Custom(Vec<(MemberId, MoneyCents)>),
    /// Share of the total per member.
    Percentage(Vec<(MemberId, Percent)>),
}

impl Split {
    pub fn method(&self) -> SplitMethod {
        match self {
            Self::Equally(_) => SplitMethod::Equally,
            Self::Custom(_) => SplitMethod::Custom,
            Self::Percentage(_) => SplitMethod::Percentage,
        }
    }

    /// Members involved in the split, in request order.
    pub fn members(&self) -> Vec<&MemberId> {
        match self {
            Self::Equally(ids) => ids.iter().collect(),
            Self::Custom(parts) => parts.iter().map(|(id, _)| id).collect(),
            Self::Percentage(parts) => parts.iter().map(|(id, _)| id).collect(),
        }
    }

    /// Computes the split details for `total`.
    ///
    /// - Equally: the cents that do not divide evenly go one each to the
    ///   first members, so the details sum to `total` exactly.
    /// - Custom: amounts are taken as given; their sum must be within
    ///   [`SPLIT_TOLERANCE`] of `total`.
    /// - Percentage: percentages must sum to 100% within
    ///   [`PERCENT_TOLERANCE_BP`]; each amount is rounded to the nearest cent
    ///   and the rounding remainder goes to the last member.
    pub fn details(&self, total: MoneyCents) -> ResultEngine<Vec<SplitDetail>> {
        if !total.is_positive() {
            return Err(EngineError::InvalidAmount(
                "expense amount must be > 0".to_string(),
            ));
        }
        let members = self.members();
        if members.is_empty() {
            return Err(EngineError::InvalidSplit(
                "at least one member must be involved".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(members.len());
        if let Some(dup) = members.iter().find(|id| !seen.insert(**id)) {
            return Err(EngineError::InvalidSplit(format!(
                "member {dup} appears more than once"
            )));
        }

        match self {
            Self::Equally(ids) => Ok(equal_shares(ids, total)),
            Self::Custom(parts) => custom_shares(parts, total),
            Self::Percentage(parts) => percentage_shares(parts, total),
        }
    }
}

fn equal_shares(ids: &[MemberId], total: MoneyCents) -> Vec<SplitDetail> {
    let count = ids.len() as i64;
    let base = total.cents() / count;
    let remainder = total.cents() % count;
    ids.iter()
        .enumerate()
        .map(|(idx, id)| {
            let extra = i64::from((idx as i64) < remainder);
            SplitDetail::new(id.clone(), MoneyCents::new(base + extra))
        })
        .collect()
}

fn custom_shares(
    parts: &[(MemberId, MoneyCents)],
    total: MoneyCents,
) -> ResultEngine<Vec<SplitDetail>> {
    if let Some((id, _)) = parts.iter().find(|(_, amount)| amount.is_negative()) {
        return Err(EngineError::InvalidSplit(format!(
            "amount for member {id} must be >= 0"
        )));
    }
    let sum = parts
        .iter()
        .try_fold(MoneyCents::ZERO, |acc, (_, amount)| acc.checked_add(*amount))
        .ok_or_else(|| EngineError::InvalidSplit("custom amounts are too large".to_string()))?;
    let off_by = sum.checked_sub(total).map(MoneyCents::abs);
    if off_by.is_none_or(|diff| diff > SPLIT_TOLERANCE) {
        return Err(EngineError::InvalidSplit(format!(
            "custom amounts must add up to {total}, got {sum}"
        )));
    }
    Ok(parts
        .iter()
        .map(|(id, amount)| SplitDetail::new(id.clone(), *amount))
        .collect())
}

fn percentage_shares(
    parts: &[(MemberId, Percent)],
    total: MoneyCents,
) -> ResultEngine<Vec<SplitDetail>> {
    let sum_bp: u64 = parts
        .iter()
        .map(|(_, pct)| u64::from(pct.basis_points()))
        .sum();
    if sum_bp.abs_diff(u64::from(FULL_BP)) > u64::from(PERCENT_TOLERANCE_BP) {
        return Err(EngineError::InvalidSplit(format!(
            "percentages must add up to 100%, got {}",
            Percent::from_basis_points(u32::try_from(sum_bp).unwrap_or(u32::MAX))
        )));
    }

    // Shares are worked out in i128: up to 100.1% of an i64 total fits.
    let full = i128::from(FULL_BP);
    let mut shares: Vec<i128> = parts
        .iter()
        .map(|(_, pct)| {
            let scaled = i128::from(total.cents()) * i128::from(pct.basis_points());
            (scaled + full / 2) / full
        })
        .collect();
    let assigned: i128 = shares.iter().sum();
    if let Some(last) = shares.last_mut() {
        *last += i128::from(total.cents()) - assigned;
    }

    parts
        .iter()
        .zip(shares)
        .map(|((id, pct), share)| {
            let amount = i64::try_from(share)
                .ok()
                .filter(|cents| *cents >= 0)
                .ok_or_else(|| {
                    EngineError::InvalidSplit(format!(
                        "percentage share for member {id} is out of range"
                    ))
                })?;
            Ok(SplitDetail {
                member_id: id.clone(),
                amount: MoneyCents::new(amount),
                percentage: Some(*pct),
            })
        })
        .collect()
}
