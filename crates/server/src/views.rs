//! Conversions between engine types and API bodies.

use api_types::{
    activity::ActivityView,
    balance::{BalanceView, DebtView},
    expense::{SplitDetailView, SplitInput, SplitMethod as SplitMethodView},
    expense::ExpenseView,
    group::{GroupView, MemberView},
    settlement::SettlementView,
};
use engine::{
    Activity, Balances, Currency, Expense, Group, Member, MemberId, MoneyCents, Percent,
    Settlement, SimplifiedDebt, Split, SplitMethod,
};

pub(crate) fn currency_to_api(currency: Currency) -> api_types::Currency {
    match currency {
        Currency::Inr => api_types::Currency::Inr,
        Currency::Eur => api_types::Currency::Eur,
    }
}

pub(crate) fn currency_from_api(currency: api_types::Currency) -> Currency {
    match currency {
        api_types::Currency::Inr => Currency::Inr,
        api_types::Currency::Eur => Currency::Eur,
    }
}

pub(crate) fn member_view(member: &Member) -> MemberView {
    MemberView {
        id: member.id.to_string(),
        name: member.name.clone(),
    }
}

pub(crate) fn group_view(group: &Group) -> GroupView {
    GroupView {
        id: group.id.to_string(),
        name: group.name.clone(),
        invite_code: group.invite_code.clone(),
        currency: currency_to_api(group.currency),
        members: group.members.iter().map(member_view).collect(),
    }
}

pub(crate) fn split_from_api(input: SplitInput) -> Split {
    match input {
        SplitInput::Equally { member_ids } => {
            Split::Equally(member_ids.into_iter().map(MemberId::from).collect())
        }
        SplitInput::Custom { shares } => Split::Custom(
            shares
                .into_iter()
                .map(|s| (MemberId::from(s.member_id), MoneyCents::new(s.amount_minor)))
                .collect(),
        ),
        SplitInput::Percentage { shares } => Split::Percentage(
            shares
                .into_iter()
                .map(|s| {
                    (
                        MemberId::from(s.member_id),
                        Percent::from_basis_points(s.basis_points),
                    )
                })
                .collect(),
        ),
    }
}

fn split_method_view(method: SplitMethod) -> SplitMethodView {
    match method {
        SplitMethod::Equally => SplitMethodView::Equally,
        SplitMethod::Custom => SplitMethodView::Custom,
        SplitMethod::Percentage => SplitMethodView::Percentage,
    }
}

pub(crate) fn expense_view(expense: &Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id.to_string(),
        description: expense.description.clone(),
        amount_minor: expense.amount.cents(),
        paid_by: expense.paid_by.to_string(),
        split_method: split_method_view(expense.split_method),
        split_details: expense
            .split_details
            .iter()
            .map(|d| SplitDetailView {
                member_id: d.member_id.to_string(),
                amount_minor: d.amount.cents(),
                basis_points: d.percentage.map(Percent::basis_points),
            })
            .collect(),
        occurred_at: expense.occurred_at,
    }
}

pub(crate) fn settlement_view(settlement: &Settlement) -> SettlementView {
    SettlementView {
        id: settlement.id.to_string(),
        payer: settlement.payer.to_string(),
        receiver: settlement.receiver.to_string(),
        amount_minor: settlement.amount.cents(),
        occurred_at: settlement.occurred_at,
    }
}

pub(crate) fn activity_view(activity: &Activity) -> ActivityView {
    match activity {
        Activity::Expense(expense) => ActivityView::Expense(expense_view(expense)),
        Activity::Settlement(settlement) => ActivityView::Settlement(settlement_view(settlement)),
    }
}

pub(crate) fn balance_views(group: &Group, balances: &Balances) -> Vec<BalanceView> {
    balances
        .iter()
        .map(|(id, amount)| BalanceView {
            member_id: id.to_string(),
            name: group.member(id).map(|m| m.name.clone()),
            balance_minor: amount.cents(),
        })
        .collect()
}

pub(crate) fn debt_view(group: &Group, debt: &SimplifiedDebt) -> DebtView {
    DebtView {
        from: debt.from.to_string(),
        from_name: group.member_name(&debt.from).to_string(),
        to: debt.to.to_string(),
        to_name: group.member_name(&debt.to).to_string(),
        amount_minor: debt.amount.cents(),
    }
}
