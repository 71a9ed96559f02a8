//! Minimal `--flag value` parser shared by every command handler.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::core::errors::CliError;

#[derive(Debug, Default, Clone)]
pub struct ParsedArgs {
    positionals: Vec<String>,
    options: HashMap<String, String>,
    switches: HashSet<String>,
}

impl ParsedArgs {
    /// Splits `args` into positionals, value options and boolean switches.
    ///
    /// `--name value` and `--name=value` are both accepted for names listed in `options`.
    /// Tokens that do not start with `--` are positional, so negative numbers pass through.
    pub fn parse(args: &[&str], options: &[&str], switches: &[&str]) -> Result<Self, CliError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(token) = iter.next() {
            let Some(flag) = token.strip_prefix("--") else {
                parsed.positionals.push((*token).to_string());
                continue;
            };
            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (flag, None),
            };
            if switches.contains(&name) {
                if inline.is_some() {
                    return Err(CliError::Input(format!("`--{name}` does not take a value")));
                }
                parsed.switches.insert(name.to_string());
            } else if options.contains(&name) {
                let value = match inline {
                    Some(value) => value,
                    None => iter
                        .next()
                        .map(|value| (*value).to_string())
                        .ok_or_else(|| CliError::Input(format!("`--{name}` requires a value")))?,
                };
                parsed.options.insert(name.to_string(), value);
            } else {
                return Err(CliError::Input(format!("unknown option `--{name}`")));
            }
        }
        Ok(parsed)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    pub fn required(&self, index: usize, name: &str) -> Result<&str, CliError> {
        self.positional(index)
            .ok_or_else(|| CliError::Input(format!("missing <{name}>")))
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.contains(name)
    }

    pub fn number(&self, name: &str) -> Result<Option<f64>, CliError> {
        self.option(name)
            .map(|raw| parse_number(name, raw))
            .transpose()
    }

    pub fn integer(&self, name: &str) -> Result<Option<i64>, CliError> {
        self.option(name)
            .map(|raw| {
                raw.trim().parse::<i64>().map_err(|_| {
                    CliError::Input(format!("`{name}` must be a whole number, got `{raw}`"))
                })
            })
            .transpose()
    }
}

pub fn parse_number(name: &str, raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CliError::Input(format!("`{name}` must be a number, got `{raw}`")))
}

pub fn parse_id(raw: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CliError::Input(format!("`{raw}` is not a valid id")))
}
