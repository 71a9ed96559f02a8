//! Command-line front end: argv dispatch plus a line-oriented script mode.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
pub mod shell;

use std::{env, io};

use crate::core::errors::CliError;

pub use context::{CliContext, CommandResult};

/// Entry point used by the `plan_core_cli` binary.
///
/// Runs the command given in `args`, or reads commands from stdin when `args` is empty
/// or `PLAN_CORE_CLI_SCRIPT` is set. A leading `--book NAME` selects the book.
pub fn run_cli(args: Vec<String>) -> Result<(), CliError> {
    let (book, args) = split_book_flag(args)?;
    let script = args.is_empty() || env::var_os("PLAN_CORE_CLI_SCRIPT").is_some();

    if script {
        if !args.is_empty() {
            output::warning("PLAN_CORE_CLI_SCRIPT is set; ignoring command-line arguments.");
        }
        let mut context = CliContext::open(book)?;
        let stdin = io::stdin();
        return shell::run_script(&mut context, stdin.lock());
    }

    let mut context = CliContext::open(book)?;
    let command = args[0].to_lowercase();
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    context.dispatch(&command, &rest)
}

fn split_book_flag(mut args: Vec<String>) -> Result<(Option<String>, Vec<String>), CliError> {
    let Some(first) = args.first() else {
        return Ok((None, args));
    };
    if let Some(name) = first.strip_prefix("--book=") {
        let name = name.to_string();
        args.remove(0);
        return Ok((Some(name), args));
    }
    if first != "--book" {
        return Ok((None, args));
    }
    if args.len() < 2 {
        return Err(CliError::Input("`--book` requires a value".into()));
    }
    let mut rest = args.split_off(1);
    let name = rest.remove(0);
    Ok((Some(name), rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn book_flag_is_split_from_command() {
        let (book, rest) = split_book_flag(strings(&["--book", "travel", "rule", "list"])).unwrap();
        assert_eq!(book.as_deref(), Some("travel"));
        assert_eq!(rest, strings(&["rule", "list"]));

        let (book, rest) = split_book_flag(strings(&["--book=work", "version"])).unwrap();
        assert_eq!(book.as_deref(), Some("work"));
        assert_eq!(rest, strings(&["version"]));
    }

    #[test]
    fn commands_without_book_flag_pass_through() {
        let (book, rest) = split_book_flag(strings(&["project", "--years", "2"])).unwrap();
        assert!(book.is_none());
        assert_eq!(rest.len(), 3);
        assert!(split_book_flag(strings(&["--book"])).is_err());
    }
}
