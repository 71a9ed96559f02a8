use crate::{
    cli::{
        args::ParsedArgs,
        context::{CliContext, CommandResult},
        output,
    },
    core::errors::CliError,
    storage::PlanStorage,
    utils::build_info,
};

use super::{subcommand, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "backup",
            "Create, list or restore backups of the open book",
            "backup create [note]\n  backup list\n  backup restore <file>",
            cmd_backup,
        ),
        CommandDefinition::new("books", "List stored books", "books", cmd_books),
        CommandDefinition::new("config", "Show the active configuration", "config", cmd_config),
        CommandDefinition::new("version", "Show build information", "version", cmd_version),
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
    ]
}

fn cmd_backup(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match subcommand("backup", args, &["create", "list", "restore"])? {
        ("create", rest) => {
            let note = if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            };
            let info = context
                .storage
                .backup_book(&context.book_name, &context.book, note.as_deref())?;
            output::success(format!("Backup written: {}", info.file_name));
            Ok(())
        }
        ("list", rest) => {
            ParsedArgs::parse(rest, &[], &[])?;
            let backups = context.storage.list_backups(&context.book_name)?;
            if backups.is_empty() {
                output::info("No backups found.");
                return Ok(());
            }
            output::section(format!("Backups of `{}`", context.book_name));
            for backup in backups {
                output::info(format!(
                    "{}{}",
                    backup.file_name,
                    backup
                        .note
                        .map(|note| format!("  ({note})"))
                        .unwrap_or_default()
                ));
            }
            Ok(())
        }
        (_, rest) => {
            let parsed = ParsedArgs::parse(rest, &[], &[])?;
            let wanted = parsed.required(0, "file")?;
            let backup = context
                .storage
                .list_backups(&context.book_name)?
                .into_iter()
                .find(|backup| {
                    backup.file_name == wanted
                        || backup.path.file_stem().and_then(|stem| stem.to_str()) == Some(wanted)
                })
                .ok_or_else(|| CliError::Command(format!("backup `{wanted}` not found")))?;
            let book = context.storage.restore_backup(&backup)?;
            context.replace_book(book);
            output::success(format!(
                "Restored `{}` from {}",
                context.book_name, backup.file_name
            ));
            Ok(())
        }
    }
}

fn cmd_books(context: &mut CliContext, args: &[&str]) -> CommandResult {
    ParsedArgs::parse(args, &[], &[])?;
    let books = context.storage.list_books()?;
    if books.is_empty() {
        output::info("No books saved yet.");
        return Ok(());
    }
    for name in books {
        let marker = if name == context.book_name { "*" } else { " " };
        output::info(format!("{marker} {name}"));
    }
    Ok(())
}

fn cmd_config(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["json"])?;
    if parsed.switch("json") {
        output::json(&context.config)?;
        return Ok(());
    }
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  Data directory: {}", context.base_dir().display()));
    output::info(format!("  Locale: {}", config.locale));
    output::info(format!("  Currency: {}", config.currency));
    output::info(format!("  Default book: {}", config.default_book));
    output::info(format!(
        "  Projection: {} year(s) at {:.2}%/yr, capped at {} year(s)",
        config.default_projection_years,
        config.default_annual_return * 100.0,
        config.max_projection_years
    ));
    output::info(format!("  Backup retention: {}", config.backup_retention));
    Ok(())
}

fn cmd_version(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::info(format!("plan_core {}", meta.version));
    output::info(format!("  commit:  {}", meta.git_hash));
    output::info(format!("  built:   {}", meta.timestamp));
    output::info(format!("  target:  {} ({})", meta.target, meta.profile));
    output::info(format!("  rustc:   {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut CliContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let definition = context
            .registry()
            .get(&name.to_lowercase())
            .ok_or_else(|| CliError::Input(format!("no help for unknown command `{name}`")))?;
        output::section(definition.name);
        output::info(definition.description);
        output::info(format!("Usage:\n  {}", definition.usage));
        return Ok(());
    }
    output::section("Commands");
    for definition in context.registry().iter() {
        output::info(format!("  {:<10} {}", definition.name, definition.description));
    }
    output::info("Use `help <command>` for usage details.");
    output::info("Prefix any command with `--book NAME` to work on another book.");
    Ok(())
}
