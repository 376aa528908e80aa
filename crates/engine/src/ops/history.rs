use crate::{
    Expense, ExpenseCmd, ExpenseId, IdKind, ResultEngine, Settlement, SettlementCmd,
    SettlementId, settlements::validate_transfer,
};

use super::Engine;

impl Engine {
    /// Records an expense.
    ///
    /// The split is computed from the command (see
    /// [`Split::details`](crate::Split::details)); the payer and every
    /// involved member must belong to the group.
    pub fn add_expense(&self, cmd: ExpenseCmd) -> ResultEngine<ExpenseId> {
        let split_details = cmd.split.details(cmd.amount)?;
        let description = cmd.resolved_description();
        self.with_group_mut(&cmd.group_id, |group| {
            group.check_expense(&cmd.paid_by, cmd.amount, &split_details)?;
            let id = ExpenseId::new(self.ids.next_id(IdKind::Expense));
            group.expenses.push(Expense {
                id: id.clone(),
                group_id: group.id.clone(),
                description,
                amount: cmd.amount,
                paid_by: cmd.paid_by,
                split_method: cmd.split.method(),
                split_details,
                occurred_at: cmd.occurred_at,
            });
            Ok(id)
        })
    }

    /// Records a direct payment from `payer` to `receiver`.
    pub fn add_settlement(&self, cmd: SettlementCmd) -> ResultEngine<SettlementId> {
        validate_transfer(&cmd.payer, &cmd.receiver, cmd.amount)?;
        self.with_group_mut(&cmd.group_id, |group| {
            group.check_settlement(&cmd.payer, &cmd.receiver, cmd.amount)?;
            let id = SettlementId::new(self.ids.next_id(IdKind::Settlement));
            group.settlements.push(Settlement {
                id: id.clone(),
                group_id: group.id.clone(),
                payer: cmd.payer,
                receiver: cmd.receiver,
                amount: cmd.amount,
                occurred_at: cmd.occurred_at,
            });
            Ok(id)
        })
    }
}
