use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{asset::Asset, entry::BudgetEntry, rule::BudgetRule, snapshot::Snapshot};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Single-tenant aggregate holding every persisted entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub rules: Vec<BudgetRule>,
    #[serde(default)]
    pub entries: Vec<BudgetEntry>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rules: Vec::new(),
            entries: Vec::new(),
            assets: Vec::new(),
            snapshots: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_rule(&mut self, rule: BudgetRule) -> Uuid {
        let id = rule.id;
        self.rules.push(rule);
        self.touch();
        id
    }

    pub fn add_entry(&mut self, entry: BudgetEntry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        self.touch();
        id
    }

    pub fn add_asset(&mut self, asset: Asset) -> Uuid {
        let id = asset.id;
        self.assets.push(asset);
        self.touch();
        id
    }

    pub fn add_snapshot(&mut self, snapshot: Snapshot) -> Uuid {
        let id = snapshot.id;
        self.snapshots.push(snapshot);
        self.touch();
        id
    }

    pub fn rule(&self, id: Uuid) -> Option<&BudgetRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn rule_mut(&mut self, id: Uuid) -> Option<&mut BudgetRule> {
        self.rules.iter_mut().find(|rule| rule.id == id)
    }

    pub fn remove_rule(&mut self, id: Uuid) -> Option<BudgetRule> {
        let index = self.rules.iter().position(|rule| rule.id == id)?;
        self.touch();
        Some(self.rules.remove(index))
    }

    pub fn entry(&self, id: Uuid) -> Option<&BudgetEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: Uuid) -> Option<&mut BudgetEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_entry(&mut self, id: Uuid) -> Option<BudgetEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        self.touch();
        Some(self.entries.remove(index))
    }

    /// Entries dated within the half-open range `[from, to)`.
    pub fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&BudgetEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.date >= from && entry.date < to)
            .collect()
    }

    pub fn asset(&self, id: Uuid) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    pub fn asset_mut(&mut self, id: Uuid) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|asset| asset.id == id)
    }

    pub fn remove_asset(&mut self, id: Uuid) -> Option<Asset> {
        let index = self.assets.iter().position(|asset| asset.id == id)?;
        self.touch();
        Some(self.assets.remove(index))
    }

    pub fn remove_snapshot(&mut self, id: Uuid) -> Option<Snapshot> {
        let index = self.snapshots.iter().position(|snap| snap.id == id)?;
        self.touch();
        Some(self.snapshots.remove(index))
    }

    /// Sum of `current_value` across all assets; zero for an empty book.
    pub fn total_asset_value(&self) -> f64 {
        self.assets.iter().map(|asset| asset.current_value).sum()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
