use std::path::{Path, PathBuf};

use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{
        errors::CliError,
        services::ProjectionDefaults,
        time::{Clock, SystemClock},
    },
    ledger::Book,
    storage::{JsonStorage, PlanStorage},
    utils::paths,
};

use super::{
    commands::{all_definitions, CommandRegistry},
    output,
};

pub type CommandResult = Result<(), CliError>;

/// Everything a command handler needs: settings, storage and the open book.
pub struct CliContext {
    pub config: Config,
    pub storage: JsonStorage,
    pub book_name: String,
    pub book: Book,
    pub clock: Box<dyn Clock>,
    base_dir: PathBuf,
    registry: CommandRegistry,
}

impl CliContext {
    /// Opens the book named `book` (or the configured default) under the data directory.
    pub fn open(book: Option<String>) -> Result<Self, CliError> {
        let base = paths::app_data_dir();
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let storage = JsonStorage::from_config(&base, &config)?;
        Self::with_parts(base, config, storage, book, Box::new(SystemClock))
    }

    pub fn with_parts(
        base_dir: PathBuf,
        config: Config,
        storage: JsonStorage,
        book: Option<String>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let book_name = book.unwrap_or_else(|| config.default_book.clone());
        let loaded = storage.load_or_create(&book_name)?;
        tracing::debug!(book = %book_name, rules = loaded.rules.len(), "opened book");
        Ok(Self {
            config,
            storage,
            book_name,
            book: loaded,
            clock,
            base_dir,
            registry: CommandRegistry::new(all_definitions()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn projection_defaults(&self) -> ProjectionDefaults {
        ProjectionDefaults::from(&self.config)
    }

    /// Writes the open book back to storage.
    pub fn persist(&mut self) -> CommandResult {
        self.book.touch();
        self.storage.save_book(&self.book_name, &self.book)?;
        Ok(())
    }

    /// Replaces the open book, e.g. after a restore.
    pub fn replace_book(&mut self, book: Book) {
        self.book = book;
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.config.currency)
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        let handler = match self.registry.get(command) {
            Some(definition) => definition.handler,
            None => {
                self.suggest_command(command);
                return Err(CliError::Command(format!("unknown command `{command}`")));
            }
        };
        handler(self, args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest(self.registry.names(), input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }
}

/// Nearest candidate within an edit distance of three.
pub(crate) fn closest<'a>(
    candidates: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let mut scored: Vec<_> = candidates
        .map(|candidate| (levenshtein(candidate, input), candidate))
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .first()
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, candidate)| *candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_suggests_within_distance() {
        let names = ["rule", "entry", "project", "autofill"];
        assert_eq!(closest(names.iter().copied(), "projct"), Some("project"));
        assert_eq!(closest(names.iter().copied(), "zzzzzzzzzz"), None);
    }
}
