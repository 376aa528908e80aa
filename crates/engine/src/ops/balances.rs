use crate::{Activity, Balances, GroupId, ResultEngine, SimplifiedDebt};

use super::Engine;

impl Engine {
    /// Net balance of every member of the group, recomputed from its history.
    pub fn balances(&self, group_id: &GroupId) -> ResultEngine<Balances> {
        self.with_group(group_id, |group| Ok(group.balances()))
    }

    /// Transfers that would bring every balance of the group to zero.
    pub fn simplified_debts(&self, group_id: &GroupId) -> ResultEngine<Vec<SimplifiedDebt>> {
        self.with_group(group_id, |group| Ok(group.simplified_debts()))
    }

    /// Expenses and settlements of the group, most recent first.
    pub fn activity(&self, group_id: &GroupId) -> ResultEngine<Vec<Activity>> {
        self.with_group(group_id, |group| Ok(group.activity()))
    }
}
