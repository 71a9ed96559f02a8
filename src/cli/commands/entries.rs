use chrono::NaiveDate;

use crate::{
    cli::{
        args::{parse_id, parse_number, ParsedArgs},
        context::{CliContext, CommandResult},
        output,
    },
    core::{errors::CliError, services::EntryService},
    ledger::{BudgetEntry, FlowKind, Month, MonthlyCashFlow, NewEntry},
};

use super::{subcommand, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "entry",
        "Record and query ledger entries",
        "entry add <YYYY-MM-DD> <income|expense> <category> <amount> [--note TEXT]\n  entry list [--month YYYY-MM | --from YYYY-MM-DD --until YYYY-MM-DD] [--json]\n  entry remove <id>\n  entry summary <YYYY-MM> [--json]",
        cmd_entry,
    )]
}

fn cmd_entry(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match subcommand("entry", args, &["add", "list", "remove", "summary"])? {
        ("add", rest) => add_entry(context, rest),
        ("list", rest) => list_entries(context, rest),
        ("remove", rest) => remove_entry(context, rest),
        (_, rest) => summarize(context, rest),
    }
}

fn add_entry(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["note"], &[])?;
    let date = parsed.required(0, "date")?.to_string();
    let kind = parsed.required(1, "income|expense")?.parse::<FlowKind>()?;
    let category = parsed.required(2, "category")?.to_string();
    let amount = parse_number("amount", parsed.required(3, "amount")?)?;

    let entry = EntryService::create(
        &mut context.book,
        NewEntry {
            date: Some(date),
            kind: Some(kind),
            category: Some(category),
            amount: Some(amount),
            note: parsed.option("note").map(str::to_string),
        },
    )?;
    context.persist()?;
    output::success(format!(
        "Recorded {} `{}` of {} on {} with id {}",
        entry.kind,
        entry.category,
        context.money(entry.amount),
        entry.date,
        entry.id
    ));
    Ok(())
}

fn list_entries(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["month", "from", "until"], &["json"])?;
    let entries: Vec<&BudgetEntry> = match (parsed.option("from"), parsed.option("until")) {
        (Some(from), Some(until)) => {
            EntryService::in_range(&context.book, parse_date(from)?, parse_date(until)?)?
        }
        (None, None) => {
            let month = match parsed.option("month") {
                Some(raw) => Month::parse(raw)?,
                None => context.clock.current_month(),
            };
            EntryService::in_month(&context.book, month)
        }
        _ => {
            return Err(CliError::Input(
                "`--from` and `--until` must be given together".into(),
            ))
        }
    };

    if parsed.switch("json") {
        output::json(&entries)?;
        return Ok(());
    }
    if entries.is_empty() {
        output::info("No entries in range.");
        return Ok(());
    }
    output::section("Entries");
    for entry in entries {
        let note = if entry.note.is_empty() {
            String::new()
        } else {
            format!("  ({})", entry.note)
        };
        output::info(format!(
            "{}  {}  {:<7} {:<16} {:>14}{}",
            entry.id,
            entry.date,
            entry.kind.label(),
            entry.category,
            context.money(entry.amount),
            note
        ));
    }
    Ok(())
}

fn remove_entry(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &[])?;
    let id = parse_id(parsed.required(0, "id")?)?;
    let removed = EntryService::remove(&mut context.book, id)?;
    context.persist()?;
    output::success(format!("Removed entry `{}` ({})", removed.category, removed.id));
    Ok(())
}

fn summarize(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["json"])?;
    let month = Month::parse(parsed.required(0, "month")?)?;
    let summary = EntryService::month_summary(&context.book, month);
    if parsed.switch("json") {
        output::json(&summary)?;
        return Ok(());
    }
    print_flow(context, "Recorded", &summary);
    Ok(())
}

pub(crate) fn print_flow(context: &CliContext, title: &str, flow: &MonthlyCashFlow) {
    output::section(format!("{title} cash flow {}", flow.month));
    output::info(format!("  Income:  {:>14}", context.money(flow.income)));
    output::info(format!("  Expense: {:>14}", context.money(flow.expense)));
    output::info(format!("  Net:     {:>14}", context.money(flow.net)));
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("invalid date `{raw}`, expected YYYY-MM-DD")))
}
