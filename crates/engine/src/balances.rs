//! Net balance per member, folded from the whole history.
//!
//! Balances are never stored: [`compute_balances`] rebuilds them from scratch
//! on every call, so there is nothing to keep in sync when history grows.
//!
//! Input contract: every expense's split details add up to its amount and
//! every amount is positive. These rules are enforced when records are
//! admitted to a group (see [`Split::details`](crate::Split::details) and
//! [`Engine::add_settlement`](crate::Engine::add_settlement)), not here. Records
//! that break them are summed as they are and skew the result without any
//! error being raised.
//!
//! Sums saturate at [`MoneyCents::MAX`] in either direction, so folding any
//! history (even an imported one that was never admitted) cannot panic. The
//! group book rejects records that would push a balance that far, so for
//! admitted histories the result is exact.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::{Expense, Member, MemberId, MoneyCents, Settlement};

/// Mapping from member to signed net amount.
///
/// Positive: the group owes the member. Negative: the member owes the group.
/// Lookups of unknown members read as zero, and any id can be credited or
/// debited without being declared first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(BTreeMap<MemberId, MoneyCents>);

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of a member, zero if the member has never been seen.
    #[must_use]
    pub fn get(&self, member_id: &MemberId) -> MoneyCents {
        self.0.get(member_id).copied().unwrap_or_default()
    }

    /// Ensures the member has an entry (zero if new).
    pub fn track(&mut self, member_id: &MemberId) {
        self.0.entry(member_id.clone()).or_default();
    }

    /// Adds `amount` to the member's balance, saturating.
    pub fn credit(&mut self, member_id: &MemberId, amount: MoneyCents) {
        let balance = self.0.entry(member_id.clone()).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Subtracts `amount` from the member's balance, saturating.
    pub fn debit(&mut self, member_id: &MemberId, amount: MoneyCents) {
        let balance = self.0.entry(member_id.clone()).or_default();
        *balance = balance.saturating_sub(amount);
    }

    /// Sum of every balance. Zero for any history of valid records.
    #[must_use]
    pub fn total(&self) -> MoneyCents {
        self.0
            .values()
            .fold(MoneyCents::ZERO, |acc, b| acc.saturating_add(*b))
    }

    /// `true` if every balance is within `tolerance` of zero.
    #[must_use]
    pub fn is_settled(&self, tolerance: MoneyCents) -> bool {
        self.0.values().all(|b| b.abs() <= tolerance)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, member_id: &MemberId) -> bool {
        self.0.contains_key(member_id)
    }

    /// Iterates in member-id order.
    pub fn iter(&self) -> btree_map::Iter<'_, MemberId, MoneyCents> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a MemberId, &'a MoneyCents);
    type IntoIter = btree_map::Iter<'a, MemberId, MoneyCents>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(MemberId, MoneyCents)> for Balances {
    fn from_iter<I: IntoIterator<Item = (MemberId, MoneyCents)>>(iter: I) -> Self {
        let mut balances = Balances::new();
        for (id, amount) in iter {
            balances.credit(&id, amount);
        }
        balances
    }
}

/// Folds expenses and settlements into a net balance per member.
///
/// - Every member in `members` appears in the result, at zero if untouched.
/// - Expense: the payer is credited the full amount; each split member is
///   debited their share.
/// - Settlement: the payer is credited, the receiver debited.
///
/// Ids that are not in `members` are still accounted for. The result does not
/// depend on the order of `expenses` or `settlements`.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Balances {
    let mut balances = Balances::new();
    for member in members {
        balances.track(&member.id);
    }

    for expense in expenses {
        balances.credit(&expense.paid_by, expense.amount);
        for split in &expense.split_details {
            balances.debit(&split.member_id, split.amount);
        }
    }

    for settlement in settlements {
        balances.credit(&settlement.payer, settlement.amount);
        balances.debit(&settlement.receiver, settlement.amount);
    }

    balances
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{ExpenseId, GroupId, SettlementId, SplitDetail, SplitMethod};

    fn members() -> Vec<Member> {
        vec![
            Member::new("alice", "Alice"),
            Member::new("bob", "Bob"),
            Member::new("carol", "Carol"),
        ]
    }

    fn expense(id: &str, paid_by: &str, amount: i64, shares: &[(&str, i64)]) -> Expense {
        Expense {
            id: ExpenseId::from(id),
            group_id: GroupId::from("trip"),
            description: id.to_string(),
            amount: MoneyCents::new(amount),
            paid_by: MemberId::from(paid_by),
            split_method: SplitMethod::Custom,
            split_details: shares
                .iter()
                .map(|(m, a)| SplitDetail::new(*m, MoneyCents::new(*a)))
                .collect(),
            occurred_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn settlement(payer: &str, receiver: &str, amount: i64) -> Settlement {
        Settlement {
            id: SettlementId::from(format!("{payer}-{receiver}")),
            group_id: GroupId::from("trip"),
            payer: MemberId::from(payer),
            receiver: MemberId::from(receiver),
            amount: MoneyCents::new(amount),
            occurred_at: Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap(),
        }
    }

    fn balance(balances: &Balances, id: &str) -> i64 {
        balances.get(&MemberId::from(id)).cents()
    }

    #[test]
    fn empty_history_maps_every_member_to_zero() {
        let balances = compute_balances(&members(), &[], &[]);
        assert_eq!(balances.len(), 3);
        assert!(balances.iter().all(|(_, b)| b.is_zero()));
    }

    #[test]
    fn payer_is_credited_and_split_members_debited() {
        let expenses = [expense(
            "dinner",
            "alice",
            9000,
            &[("alice", 3000), ("bob", 3000), ("carol", 3000)],
        )];
        let balances = compute_balances(&members(), &expenses, &[]);
        assert_eq!(balance(&balances, "alice"), 6000);
        assert_eq!(balance(&balances, "bob"), -3000);
        assert_eq!(balance(&balances, "carol"), -3000);
        assert!(balances.total().is_zero());
    }

    #[test]
    fn settlement_moves_balance_from_receiver_to_payer() {
        let expenses = [expense(
            "dinner",
            "alice",
            9000,
            &[("alice", 3000), ("bob", 3000), ("carol", 3000)],
        )];
        let settlements = [settlement("bob", "alice", 3000)];
        let balances = compute_balances(&members(), &expenses, &settlements);
        assert_eq!(balance(&balances, "alice"), 3000);
        assert_eq!(balance(&balances, "bob"), 0);
        assert_eq!(balance(&balances, "carol"), -3000);
    }

    #[test]
    fn unknown_members_are_still_accounted_for() {
        let expenses = [expense("taxi", "dave", 1000, &[("alice", 500), ("erin", 500)])];
        let balances = compute_balances(&members(), &expenses, &[]);
        assert_eq!(balances.len(), 5);
        assert_eq!(balance(&balances, "dave"), 1000);
        assert_eq!(balance(&balances, "erin"), -500);
        assert!(balances.total().is_zero());
    }

    #[test]
    fn mismatched_splits_are_summed_unchecked() {
        // Split does not add up to the amount: the skew shows up in the total.
        let expenses = [expense("bad", "alice", 1000, &[("bob", 400)])];
        let balances = compute_balances(&members(), &expenses, &[]);
        assert_eq!(balance(&balances, "alice"), 1000);
        assert_eq!(balance(&balances, "bob"), -400);
        assert_eq!(balances.total().cents(), 600);
    }

    #[test]
    fn order_of_history_does_not_matter() {
        let mut expenses = vec![
            expense("a", "alice", 9000, &[("alice", 3000), ("bob", 3000), ("carol", 3000)]),
            expense("b", "bob", 4000, &[("alice", 1000), ("carol", 3000)]),
            expense("c", "carol", 1234, &[("bob", 1234)]),
        ];
        let mut settlements = vec![
            settlement("bob", "alice", 1500),
            settlement("carol", "bob", 700),
        ];
        let expected = compute_balances(&members(), &expenses, &settlements);

        expenses.reverse();
        settlements.reverse();
        assert_eq!(compute_balances(&members(), &expenses, &settlements), expected);

        expenses.rotate_left(1);
        assert_eq!(compute_balances(&members(), &expenses, &settlements), expected);
    }

    #[test]
    fn oversized_history_saturates_instead_of_panicking() {
        let settlements = [
            settlement("bob", "alice", i64::MAX),
            settlement("bob", "alice", i64::MAX),
        ];
        let balances = compute_balances(&members(), &[], &settlements);
        assert_eq!(balances.get(&MemberId::from("bob")), MoneyCents::MAX);
        assert_eq!(balances.get(&MemberId::from("alice")), -MoneyCents::MAX);
        assert!(balances.total().is_zero());
        assert_eq!(crate::simplify(&balances).len(), 1);
    }

    #[test]
    fn get_defaults_to_zero() {
        let balances = Balances::new();
        assert_eq!(balances.get(&MemberId::from("ghost")), MoneyCents::ZERO);
        assert!(!balances.contains(&MemberId::from("ghost")));
    }
}
