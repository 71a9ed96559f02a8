use crate::{
    cli::{
        args::{parse_id, parse_number, ParsedArgs},
        context::{CliContext, CommandResult},
        output,
    },
    core::services::{AssetService, SnapshotService},
    ledger::NewAsset,
};

use super::{subcommand, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "asset",
            "Track asset holdings",
            "asset add <name> <total_cost> [--value AMOUNT] [--category NAME] [--note TEXT]\n  asset update <id> <name> <total_cost> [--value AMOUNT] [--category NAME] [--note TEXT]\n  asset value <id> <amount>\n  asset list [--json]\n  asset remove <id>",
            cmd_asset,
        ),
        CommandDefinition::new(
            "snapshot",
            "Record or list net-worth snapshots",
            "snapshot take\n  snapshot list [--json]",
            cmd_snapshot,
        ),
    ]
}

fn cmd_asset(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match subcommand("asset", args, &["add", "update", "value", "list", "remove"])? {
        ("add", rest) => add_asset(context, rest),
        ("update", rest) => update_asset(context, rest),
        ("value", rest) => revalue_asset(context, rest),
        ("list", rest) => list_assets(context, rest),
        (_, rest) => remove_asset(context, rest),
    }
}

fn add_asset(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["value", "category", "note"], &[])?;
    let name = parsed.required(0, "name")?.to_string();
    let total_cost = parse_number("total_cost", parsed.required(1, "total_cost")?)?;
    let asset = AssetService::create(
        &mut context.book,
        NewAsset {
            name: Some(name),
            category: parsed.option("category").map(str::to_string),
            total_cost: Some(total_cost),
            current_value: parsed.number("value")?,
            note: parsed.option("note").map(str::to_string),
            ..NewAsset::default()
        },
    )?;
    context.persist()?;
    output::success(format!(
        "Added asset `{}` valued at {} with id {}",
        asset.name,
        context.money(asset.current_value),
        asset.id
    ));
    Ok(())
}

fn update_asset(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["value", "category", "note"], &[])?;
    let id = parse_id(parsed.required(0, "id")?)?;
    let name = parsed.required(1, "name")?.to_string();
    let total_cost = parse_number("total_cost", parsed.required(2, "total_cost")?)?;
    let asset = AssetService::replace(
        &mut context.book,
        id,
        NewAsset {
            name: Some(name),
            category: parsed.option("category").map(str::to_string),
            total_cost: Some(total_cost),
            current_value: parsed.number("value")?,
            note: parsed.option("note").map(str::to_string),
            ..NewAsset::default()
        },
    )?;
    context.persist()?;
    output::success(format!(
        "Updated asset `{}` ({}), valued at {}",
        asset.name,
        asset.id,
        context.money(asset.current_value)
    ));
    Ok(())
}

fn revalue_asset(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &[])?;
    let id = parse_id(parsed.required(0, "id")?)?;
    let value = parse_number("amount", parsed.required(1, "amount")?)?;
    let asset = AssetService::set_value(&mut context.book, id, value)?;
    context.persist()?;
    output::success(format!(
        "Asset `{}` now valued at {}",
        asset.name,
        context.money(asset.current_value)
    ));
    Ok(())
}

fn list_assets(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["json"])?;
    let assets = AssetService::list(&context.book);
    if parsed.switch("json") {
        output::json(&assets)?;
        return Ok(());
    }
    if assets.is_empty() {
        output::info("No assets tracked.");
        return Ok(());
    }
    output::section("Assets");
    for asset in assets {
        output::info(format!(
            "{}  {:<20} cost {:>14}  value {:>14}  profit {:>14}",
            asset.id,
            asset.name,
            context.money(asset.total_cost),
            context.money(asset.current_value),
            context.money(asset.profit())
        ));
    }
    output::info(format!(
        "Total value {}  (profit {})",
        context.money(AssetService::total_value(&context.book)),
        context.money(AssetService::total_profit(&context.book))
    ));
    Ok(())
}

fn remove_asset(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &[])?;
    let id = parse_id(parsed.required(0, "id")?)?;
    let removed = AssetService::remove(&mut context.book, id)?;
    context.persist()?;
    output::success(format!("Removed asset `{}` ({})", removed.name, removed.id));
    Ok(())
}

fn cmd_snapshot(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match subcommand("snapshot", args, &["take", "list"])? {
        ("take", rest) => {
            ParsedArgs::parse(rest, &[], &[])?;
            let snapshot = SnapshotService::take(&mut context.book, context.clock.as_ref());
            context.persist()?;
            output::success(format!(
                "Snapshot {} recorded: {}",
                snapshot.id,
                context.money(snapshot.total_value)
            ));
            Ok(())
        }
        (_, rest) => {
            let parsed = ParsedArgs::parse(rest, &[], &["json"])?;
            let snapshots = SnapshotService::list(&context.book);
            if parsed.switch("json") {
                output::json(&snapshots)?;
                return Ok(());
            }
            if snapshots.is_empty() {
                output::info("No snapshots recorded.");
                return Ok(());
            }
            output::section("Snapshots");
            for snapshot in snapshots {
                output::info(format!(
                    "{}  {}  {:>14}",
                    snapshot.id,
                    snapshot.taken_at.format("%Y-%m-%d %H:%M"),
                    context.money(snapshot.total_value)
                ));
            }
            Ok(())
        }
    }
}
