//! The `Group` holds the members of a shared ledger and its append-only
//! history of expenses and settlements.
//!
//! Records are validated here before they are admitted; once in the history
//! they are never edited or removed. Balances, the settle-up plan and the
//! activity feed are derived on demand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Activity, Balances, Currency, EngineError, Expense, GroupId, Member, MemberId, MoneyCents,
    ResultEngine, Settlement, SimplifiedDebt, SplitDetail, activity_feed, compute_balances,
    members::name_key, simplify,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub invite_code: String,
    pub currency: Currency,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    pub settlements: Vec<Settlement>,
}

impl Group {
    pub fn new(
        id: GroupId,
        name: String,
        invite_code: String,
        currency: Currency,
        admin: Member,
    ) -> Self {
        Self {
            id,
            name,
            invite_code,
            currency,
            members: vec![admin],
            expenses: Vec::new(),
            settlements: Vec::new(),
        }
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == member_id)
    }

    pub(crate) fn require_member(&self, member_id: &MemberId) -> ResultEngine<&Member> {
        self.member(member_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("member {member_id}")))
    }

    /// Display name of a member, falling back to the raw id.
    pub fn member_name<'a>(&'a self, member_id: &'a MemberId) -> &'a str {
        self.member(member_id)
            .map_or(member_id.as_str(), |m| m.name.as_str())
    }

    /// Fails if another member has the same [`name_key`].
    pub(crate) fn check_member_name(&self, name: &str) -> ResultEngine<()> {
        let key = name_key(name);
        if self.members.iter().any(|m| name_key(&m.name) == key) {
            return Err(EngineError::ExistingKey(name.to_string()));
        }
        Ok(())
    }

    /// Checks that an expense can join the history.
    ///
    /// The payer and every split member must belong to the group, and no
    /// member's balance may leave the range of [`MoneyCents`].
    pub(crate) fn check_expense(
        &self,
        paid_by: &MemberId,
        amount: MoneyCents,
        split_details: &[SplitDetail],
    ) -> ResultEngine<()> {
        self.require_member(paid_by)?;
        for detail in split_details {
            self.require_member(&detail.member_id)?;
        }
        let changes = std::iter::once((paid_by, i128::from(amount.cents()))).chain(
            split_details
                .iter()
                .map(|d| (&d.member_id, -i128::from(d.amount.cents()))),
        );
        self.check_balances_fit(changes)
    }

    /// Checks that a settlement can join the history: both sides must be
    /// members and neither balance may leave the range of [`MoneyCents`].
    pub(crate) fn check_settlement(
        &self,
        payer: &MemberId,
        receiver: &MemberId,
        amount: MoneyCents,
    ) -> ResultEngine<()> {
        self.require_member(payer)?;
        self.require_member(receiver)?;
        let cents = i128::from(amount.cents());
        self.check_balances_fit([(payer, cents), (receiver, -cents)])
    }

    fn check_balances_fit<'a>(
        &self,
        changes: impl IntoIterator<Item = (&'a MemberId, i128)>,
    ) -> ResultEngine<()> {
        let mut net: BTreeMap<&MemberId, i128> = BTreeMap::new();
        for (member_id, delta) in changes {
            *net.entry(member_id).or_default() += delta;
        }

        let balances = self.balances();
        let limit = i128::from(MoneyCents::MAX.cents());
        for (member_id, delta) in net {
            let next = i128::from(balances.get(member_id).cents()) + delta;
            if next.abs() > limit {
                return Err(EngineError::InvalidAmount(format!(
                    "balance of member {member_id} would overflow"
                )));
            }
        }
        Ok(())
    }

    /// Net balance of every member, recomputed from the whole history.
    pub fn balances(&self) -> Balances {
        compute_balances(&self.members, &self.expenses, &self.settlements)
    }

    /// Transfers that would settle the current balances.
    pub fn simplified_debts(&self) -> Vec<SimplifiedDebt> {
        simplify(&self.balances())
    }

    /// Expenses and settlements, most recent first.
    pub fn activity(&self) -> Vec<Activity> {
        activity_feed(&self.expenses, &self.settlements)
    }
}
