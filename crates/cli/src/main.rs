use std::{error::Error, fs, io::Write, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use engine::{
    Activity, Balances, Currency, Expense, Member, MemberId, Settlement, SimplifiedDebt,
    activity_feed, compute_balances, simplify,
};

#[derive(Parser, Debug)]
#[command(name = "quota_cli")]
#[command(about = "Offline reports over an exported group history")]
struct Cli {
    /// History file in JSON (also read from `QUOTA_HISTORY`).
    #[arg(long, env = "QUOTA_HISTORY", default_value = "history.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net balance of every member.
    Balances(Output),
    /// Transfers that settle the group.
    Plan(Output),
    /// Expenses and settlements, most recent first.
    Activity(Output),
}

#[derive(Args, Debug)]
struct Output {
    /// Print CSV instead of text.
    #[arg(long)]
    csv: bool,
}

/// A group history as exported by the service.
#[derive(Debug, Deserialize)]
struct History {
    #[serde(default)]
    currency: Currency,
    members: Vec<Member>,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default)]
    settlements: Vec<Settlement>,
}

impl History {
    fn name<'a>(&'a self, id: &'a MemberId) -> &'a str {
        self.members
            .iter()
            .find(|m| &m.id == id)
            .map_or(id.as_str(), |m| m.name.as_str())
    }

    fn balances(&self) -> Balances {
        compute_balances(&self.members, &self.expenses, &self.settlements)
    }
}

#[derive(Serialize)]
struct BalanceRow<'a> {
    member_id: &'a str,
    name: &'a str,
    balance_minor: i64,
}

#[derive(Serialize)]
struct PlanRow<'a> {
    from: &'a str,
    to: &'a str,
    amount_minor: i64,
}

#[derive(Serialize)]
struct ActivityRow<'a> {
    occurred_at: String,
    kind: &'static str,
    id: &'a str,
    amount_minor: i64,
    description: &'a str,
}

fn write_csv<W: Write, T: Serialize>(
    out: W,
    rows: impl IntoIterator<Item = T>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_balances<W: Write>(
    history: &History,
    csv: bool,
    mut out: W,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let balances = history.balances();
    if csv {
        return write_csv(
            out,
            balances.iter().map(|(id, amount)| BalanceRow {
                member_id: id.as_str(),
                name: history.name(id),
                balance_minor: amount.cents(),
            }),
        );
    }

    for (id, amount) in &balances {
        writeln!(
            out,
            "{:<20} {:>12}",
            history.name(id),
            history.currency.format(*amount)
        )?;
    }
    Ok(())
}

fn print_plan<W: Write>(
    history: &History,
    csv: bool,
    mut out: W,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let plan: Vec<SimplifiedDebt> = simplify(&history.balances());
    if csv {
        return write_csv(
            out,
            plan.iter().map(|d| PlanRow {
                from: d.from.as_str(),
                to: d.to.as_str(),
                amount_minor: d.amount.cents(),
            }),
        );
    }

    if plan.is_empty() {
        writeln!(out, "All settled up.")?;
    }
    for debt in &plan {
        writeln!(
            out,
            "{} pays {} {}",
            history.name(&debt.from),
            history.name(&debt.to),
            history.currency.format(debt.amount)
        )?;
    }
    Ok(())
}

fn print_activity<W: Write>(
    history: &History,
    csv: bool,
    mut out: W,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let feed = activity_feed(&history.expenses, &history.settlements);
    let rows = feed.iter().map(|entry| match entry {
        Activity::Expense(expense) => ActivityRow {
            occurred_at: expense.occurred_at.to_rfc3339(),
            kind: "expense",
            id: expense.id.as_str(),
            amount_minor: expense.amount.cents(),
            description: &expense.description,
        },
        Activity::Settlement(settlement) => ActivityRow {
            occurred_at: settlement.occurred_at.to_rfc3339(),
            kind: "settlement",
            id: settlement.id.as_str(),
            amount_minor: settlement.amount.cents(),
            description: "",
        },
    });
    if csv {
        return write_csv(out, rows);
    }

    for entry in &feed {
        let date = entry.occurred_at().format("%Y-%m-%d %H:%M");
        let amount = history.currency.format(entry.amount());
        match entry {
            Activity::Expense(expense) => writeln!(
                out,
                "{date}  {amount:>12}  {} paid for {}",
                history.name(&expense.paid_by),
                expense.description
            )?,
            Activity::Settlement(settlement) => writeln!(
                out,
                "{date}  {amount:>12}  {} paid {}",
                history.name(&settlement.payer),
                history.name(&settlement.receiver)
            )?,
        }
    }
    Ok(())
}

fn run<W: Write>(
    history: &History,
    command: &Command,
    out: W,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        Command::Balances(output) => print_balances(history, output.csv, out),
        Command::Plan(output) => print_plan(history, output.csv, out),
        Command::Activity(output) => print_activity(history, output.csv, out),
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.file)
        .map_err(|err| format!("cannot read {}: {err}", cli.file.display()))?;
    let history: History = serde_json::from_str(&raw)?;

    run(&history, &cli.command, std::io::stdout().lock())
}
