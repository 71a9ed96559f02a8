use std::io::BufRead;

use shell_words::split;

use crate::core::errors::CliError;

use super::{context::CliContext, output};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Executes one command per line until EOF or `exit`.
///
/// Failing lines are reported and skipped; the run fails overall if any line failed.
pub fn run_script<R: BufRead>(context: &mut CliContext, reader: R) -> Result<(), CliError> {
    let mut failures = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                failures += 1;
                output::error(format!("line {}: {err}", index + 1));
            }
        }
    }
    if failures > 0 {
        return Err(CliError::Command(format!("{failures} script command(s) failed")));
    }
    Ok(())
}

pub(crate) fn handle_line(context: &mut CliContext, line: &str) -> Result<LoopControl, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let tokens = parse_command_line(trimmed)?;
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    if matches!(command.as_str(), "exit" | "quit") {
        return Ok(LoopControl::Exit);
    }
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&command, &args)?;
    Ok(LoopControl::Continue)
}

pub(crate) fn parse_command_line(line: &str) -> Result<Vec<String>, CliError> {
    split(line).map_err(|err| CliError::Input(format!("could not parse `{line}`: {err}")))
}
