use std::collections::HashMap;

pub mod assets;
pub mod entries;
pub mod planning;
pub mod rules;
pub mod system;

use crate::core::errors::CliError;

use super::context::{closest, CliContext, CommandResult};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(rules::definitions());
    commands.extend(entries::definitions());
    commands.extend(assets::definitions());
    commands.extend(planning::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut CliContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Splits `args` into a subcommand drawn from `known` and its remaining arguments.
pub(crate) fn subcommand<'a, 'b>(
    command: &str,
    args: &'b [&'a str],
    known: &[&'static str],
) -> Result<(&'static str, &'b [&'a str]), CliError> {
    let Some((first, rest)) = args.split_first() else {
        return Err(CliError::Input(format!(
            "`{command}` needs a subcommand: {}",
            known.join(", ")
        )));
    };
    let wanted = first.to_lowercase();
    match known.iter().find(|name| **name == wanted) {
        Some(name) => Ok((*name, rest)),
        None => {
            let hint = closest(known.iter().copied(), &wanted)
                .map(|best| format!(" Did you mean `{command} {best}`?"))
                .unwrap_or_default();
            Err(CliError::Input(format!(
                "unknown subcommand `{command} {first}`.{hint}"
            )))
        }
    }
}
