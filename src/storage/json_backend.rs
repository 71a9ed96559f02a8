use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    core::errors::{PlanError, Result},
    ledger::{book::CURRENT_SCHEMA_VERSION, Book},
    utils::paths,
};

use super::PlanStorage;

const BOOK_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%6f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// A backup file belonging to a stored book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub book: String,
    pub file_name: String,
    pub path: PathBuf,
    pub created_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// Stores each book as a pretty-printed JSON file with rolling backups.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(books_dir: PathBuf, backups_dir: PathBuf, retention: Option<usize>) -> Result<Self> {
        fs::create_dir_all(&books_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    /// Builds storage rooted at `base`, honouring the config's data dir and retention.
    pub fn from_config(base: &Path, config: &Config) -> Result<Self> {
        Self::new(
            config.resolve_books_dir(base),
            paths::backups_dir_in(base),
            Some(config.backup_retention),
        )
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), BOOK_EXTENSION))
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    /// Picks an unused timestamped path, nudging the timestamp forward on collisions so
    /// names stay unique and ordered.
    fn next_backup_path(&self, name: &str, note: Option<&str>) -> PathBuf {
        let dir = self.backup_dir(name);
        let label = sanitize_backup_note(note);
        let mut stamp = Utc::now();
        loop {
            let mut stem = format!(
                "{}_{}",
                canonical_name(name),
                stamp.format(BACKUP_TIMESTAMP_FORMAT)
            );
            if let Some(label) = &label {
                stem.push('_');
                stem.push_str(label);
            }
            let candidate = dir.join(format!("{}.{}", stem, BOOK_EXTENSION));
            if !candidate.exists() {
                return candidate;
            }
            stamp += Duration::microseconds(1);
        }
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        fs::create_dir_all(self.backup_dir(name))?;
        let backup_path = self.next_backup_path(name, None);
        fs::copy(path, &backup_path)?;
        tracing::debug!(book = name, backup = %backup_path.display(), "backed up previous book file");
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        for stale in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale.path) {
                tracing::warn!(backup = %stale.path.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl PlanStorage for JsonStorage {
    fn save_book(&self, name: &str, book: &Book) -> Result<()> {
        let path = self.book_path(name);
        self.backup_existing_file(name, &path)?;
        save_book_to_path(book, &path)?;
        tracing::info!(book = name, path = %path.display(), "saved book");
        Ok(())
    }

    fn load_book(&self, name: &str) -> Result<Book> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(PlanError::not_found("book", name));
        }
        load_book_from_path(&path)
    }

    fn list_books(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_book(&self, name: &str) -> Result<()> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(PlanError::not_found("book", name));
        }
        fs::remove_file(&path)?;
        tracing::info!(book = name, "deleted book");
        Ok(())
    }

    fn backup_book(&self, name: &str, book: &Book, note: Option<&str>) -> Result<BackupInfo> {
        fs::create_dir_all(self.backup_dir(name))?;
        let path = self.next_backup_path(name, note);
        save_book_to_path(book, &path)?;
        self.prune_backups(name)?;
        backup_info(canonical_name(name), path)
            .ok_or_else(|| PlanError::Storage("backup file name is not valid UTF-8".into()))
    }

    fn list_backups(&self, name: &str) -> Result<Vec<BackupInfo>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let book = canonical_name(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(info) = backup_info(book.clone(), path) {
                entries.push(info);
            }
        }
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(entries)
    }

    fn restore_backup(&self, backup: &BackupInfo) -> Result<Book> {
        if !backup.path.exists() {
            return Err(PlanError::not_found("backup", &backup.file_name));
        }
        let book = load_book_from_path(&backup.path)?;
        self.save_book(&backup.book, &book)?;
        tracing::info!(book = %backup.book, backup = %backup.file_name, "restored backup");
        Ok(book)
    }
}

pub fn save_book_to_path(book: &Book, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<Book> {
    let data = fs::read_to_string(path)?;
    let book: Book = serde_json::from_str(&data)?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PlanError::Storage(format!(
            "`{}` was written by a newer schema version ({})",
            path.display(),
            book.schema_version
        )));
    }
    Ok(book)
}

fn backup_info(book: String, path: PathBuf) -> Option<BackupInfo> {
    let file_name = path.file_name()?.to_str()?.to_string();
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(&book)?.strip_prefix('_')?;
    let (stamp, note) = match rest.split_once('_') {
        Some((stamp, note)) => (stamp, Some(note.to_string())),
        None => (rest, None),
    };
    Some(BackupInfo {
        book,
        file_name,
        created_at: parse_backup_timestamp(stamp),
        note,
        path,
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '-',
        })
        .collect();
    if sanitized.trim_matches('-').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir(retention: usize) -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(
            temp.path().join("books"),
            temp.path().join("backups"),
            Some(retention),
        )
        .expect("json storage");
        (storage, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir(3);
        let book = Book::new("Household");
        storage.save_book("household", &book).expect("save book");
        let loaded = storage.load_book("household").expect("load book");
        assert_eq!(loaded.id, book.id);
        assert_eq!(loaded.name, "Household");
    }

    #[test]
    fn missing_book_is_not_found() {
        let (storage, _guard) = storage_with_temp_dir(3);
        let err = storage.load_book("nope").unwrap_err();
        assert!(err.is_not_found());
        let fresh = storage.load_or_create("nope").expect("fresh book");
        assert!(fresh.rules.is_empty());
    }

    #[test]
    fn backups_carry_notes_and_timestamps() {
        let (storage, _guard) = storage_with_temp_dir(3);
        let book = Book::new("Family");
        let info = storage
            .backup_book("family", &book, Some("Before Move!"))
            .expect("create backup");
        assert_eq!(info.note.as_deref(), Some("before-move"));
        assert!(info.created_at.is_some());
        let backups = storage.list_backups("family").expect("list backups");
        assert_eq!(backups, vec![info]);
    }

    #[test]
    fn canonical_names_are_filesystem_safe() {
        assert_eq!(canonical_name(" My Book "), "my-book");
        assert_eq!(canonical_name("__"), "book");
    }
}
