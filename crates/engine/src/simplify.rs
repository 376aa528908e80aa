//! Settle-up plan: the transfers that bring every balance back to zero.
//!
//! [`simplify`] pairs net debtors with net creditors greedily, largest first.
//! This usually yields few transfers but is a heuristic: it does not always
//! reach the smallest possible number of transfers (that would need an exact
//! subset-sum matching). For `d` debtors and `c` creditors it emits at most
//! `d + c - 1` transfers.

use serde::{Deserialize, Serialize};

use crate::{Balances, MemberId, MoneyCents};

/// Balances within this distance of zero are considered settled.
pub const SETTLED_TOLERANCE: MoneyCents = MoneyCents::new(1);

/// One recommended payment from a net debtor to a net creditor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedDebt {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: MoneyCents,
}

#[derive(Debug)]
struct Position {
    id: MemberId,
    amount: MoneyCents,
}

/// Computes the transfers that settle `balances`.
///
/// 1. Members owing more than [`SETTLED_TOLERANCE`] become debtors, members
///    owed more than it become creditors; everybody else is settled.
/// 2. Debtors are sorted most negative first, creditors largest first. Ties
///    keep member-id order.
/// 3. The current debtor pays the current creditor the smaller of the two
///    amounts; a side whose remaining amount is within the tolerance is
///    done and the next one on that side takes over.
///
/// An empty or already settled map yields no transfers.
///
/// Members whose balance is within the tolerance are left out. Several such
/// one-cent residues can add up to more than the tolerance on a member that
/// is left unmatched; use [`simplify_with_tolerance`] with
/// [`MoneyCents::ZERO`] for an exact plan.
pub fn simplify(balances: &Balances) -> Vec<SimplifiedDebt> {
    simplify_with_tolerance(balances, SETTLED_TOLERANCE)
}

/// [`simplify`] with a caller-chosen settled tolerance.
pub fn simplify_with_tolerance(balances: &Balances, tolerance: MoneyCents) -> Vec<SimplifiedDebt> {
    let tolerance = MoneyCents::new(tolerance.cents().saturating_abs());
    let mut debtors: Vec<Position> = Vec::new();
    let mut creditors: Vec<Position> = Vec::new();
    for (id, amount) in balances {
        let position = Position {
            id: id.clone(),
            amount: *amount,
        };
        if *amount < -tolerance {
            debtors.push(position);
        } else if *amount > tolerance {
            creditors.push(position);
        }
    }

    debtors.sort_by(|a, b| a.amount.cmp(&b.amount));
    creditors.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];
        let settle = MoneyCents::ZERO
            .saturating_sub(debtor.amount)
            .min(creditor.amount);

        if settle > tolerance {
            transfers.push(SimplifiedDebt {
                from: debtor.id.clone(),
                to: creditor.id.clone(),
                amount: settle,
            });
            debtor.amount += settle;
            creditor.amount -= settle;
        }

        // Inclusive bound: if `settle` was within the tolerance, at least one
        // side is too, so the loop always makes progress.
        if debtor.amount.abs() <= tolerance {
            i += 1;
        }
        if creditor.amount.abs() <= tolerance {
            j += 1;
        }
    }

    transfers
}

/// Returns `balances` as they would be after every transfer is paid.
///
/// Each transfer counts as a settlement: the payer is credited and the
/// receiver debited.
pub fn apply_transfers(balances: &Balances, transfers: &[SimplifiedDebt]) -> Balances {
    let mut after = balances.clone();
    for transfer in transfers {
        after.credit(&transfer.from, transfer.amount);
        after.debit(&transfer.to, transfer.amount);
    }
    after
}
