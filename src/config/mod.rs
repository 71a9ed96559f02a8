use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::errors::{PlanError, Result},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences and projection defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_book_value")]
    pub default_book: String,
    #[serde(default = "Config::default_projection_years_value")]
    pub default_projection_years: u32,
    #[serde(default = "Config::default_annual_return_value")]
    pub default_annual_return: f64,
    #[serde(default = "Config::max_projection_years_value")]
    pub max_projection_years: u32,
    #[serde(default = "Config::backup_retention_value")]
    pub backup_retention: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root for book files. Defaults to `<base>/books`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_book: Self::default_book_value(),
            default_projection_years: Self::default_projection_years_value(),
            default_annual_return: Self::default_annual_return_value(),
            max_projection_years: Self::max_projection_years_value(),
            backup_retention: Self::backup_retention_value(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_book_value() -> String {
        "household".into()
    }

    pub fn default_projection_years_value() -> u32 {
        30
    }

    pub fn default_annual_return_value() -> f64 {
        0.06
    }

    pub fn max_projection_years_value() -> u32 {
        100
    }

    pub fn backup_retention_value() -> usize {
        5
    }

    /// Directory holding book files, honouring `data_dir` when set.
    pub fn resolve_books_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| paths::books_dir_in(base))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_projection_years == 0 {
            return Err(PlanError::Config(
                "max_projection_years must be at least 1".into(),
            ));
        }
        if self.default_projection_years > self.max_projection_years {
            return Err(PlanError::Config(format!(
                "default_projection_years ({}) exceeds max_projection_years ({})",
                self.default_projection_years, self.max_projection_years
            )));
        }
        if !self.default_annual_return.is_finite() || self.default_annual_return <= -1.0 {
            return Err(PlanError::Config(
                "default_annual_return must be a finite number above -1".into(),
            ));
        }
        if self.default_book.trim().is_empty() {
            return Err(PlanError::Config("default_book must not be empty".into()));
        }
        Ok(())
    }
}

/// Loads and persists [`Config`] as JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_root = paths::config_dir_in(&base);
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Returns the stored config, or defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| PlanError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
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
