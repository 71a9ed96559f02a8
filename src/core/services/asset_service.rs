//! Business logic helpers for tracked assets.

use tracing::info;
use uuid::Uuid;

use super::{normalize_note, require, require_finite};
use crate::{
    core::errors::{PlanError, Result},
    ledger::{Asset, Book, NewAsset},
};

/// Provides validated mutations for [`Asset`] holdings.
pub struct AssetService;

impl AssetService {
    pub fn create(book: &mut Book, input: NewAsset) -> Result<Asset> {
        let asset = Self::build(Uuid::new_v4(), input)?;
        info!(asset_id = %asset.id, name = %asset.name, "asset created");
        book.add_asset(asset.clone());
        Ok(asset)
    }

    pub fn replace(book: &mut Book, id: Uuid, input: NewAsset) -> Result<Asset> {
        let asset = Self::build(id, input)?;
        let slot = book
            .asset_mut(id)
            .ok_or_else(|| PlanError::not_found("Asset", id))?;
        *slot = asset.clone();
        book.touch();
        info!(asset_id = %id, name = %asset.name, "asset updated");
        Ok(asset)
    }

    /// Updates only the current market value of a holding.
    pub fn set_value(book: &mut Book, id: Uuid, current_value: f64) -> Result<Asset> {
        let current_value = require_finite("current_value", current_value)?;
        let asset = book
            .asset_mut(id)
            .ok_or_else(|| PlanError::not_found("Asset", id))?;
        asset.current_value = current_value;
        asset.touch();
        let updated = asset.clone();
        book.touch();
        Ok(updated)
    }

    pub fn remove(book: &mut Book, id: Uuid) -> Result<Asset> {
        let removed = book
            .remove_asset(id)
            .ok_or_else(|| PlanError::not_found("Asset", id))?;
        info!(asset_id = %id, "asset removed");
        Ok(removed)
    }

    pub fn list(book: &Book) -> Vec<&Asset> {
        book.assets.iter().collect()
    }

    pub fn total_value(book: &Book) -> f64 {
        book.total_asset_value()
    }

    pub fn total_cost(book: &Book) -> f64 {
        book.assets.iter().map(|asset| asset.total_cost).sum()
    }

    pub fn total_profit(book: &Book) -> f64 {
        book.assets.iter().map(Asset::profit).sum()
    }

    fn build(id: Uuid, input: NewAsset) -> Result<Asset> {
        let name = require(
            "name",
            input
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        )?;
        let total_cost = require_finite("total_cost", input.total_cost.unwrap_or(0.0))?;
        let current_value = require_finite(
            "current_value",
            input.current_value.unwrap_or(total_cost),
        )?;
        if let Some(rate) = input.rate {
            require_finite("rate", rate)?;
        }
        if let Some(contribution) = &input.contribution {
            require_finite("contribution.amount", contribution.amount)?;
        }

        let mut asset = Asset::new(name, total_cost, current_value);
        asset.id = id;
        asset.category = input
            .category
            .map(|raw| raw.trim().to_string())
            .unwrap_or_default();
        asset.rate = input.rate;
        asset.compounding = input.compounding;
        asset.contribution = input.contribution;
        asset.note = normalize_note(input.note);
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_input(name: &str, cost: f64, value: f64) -> NewAsset {
        NewAsset {
            name: Some(name.into()),
            total_cost: Some(cost),
            current_value: Some(value),
            ..NewAsset::default()
        }
    }

    #[test]
    fn totals_sum_over_all_assets() {
        let mut book = Book::new("Assets");
        AssetService::create(&mut book, asset_input("Brokerage", 8_000.0, 10_000.0)).unwrap();
        AssetService::create(&mut book, asset_input("Deposit", 5_000.0, 5_100.0)).unwrap();

        assert_eq!(AssetService::total_value(&book), 15_100.0);
        assert_eq!(AssetService::total_cost(&book), 13_000.0);
        assert_eq!(AssetService::total_profit(&book), 2_100.0);
    }

    #[test]
    fn set_value_updates_only_the_value() {
        let mut book = Book::new("Assets");
        let asset = AssetService::create(&mut book, asset_input("Gold", 1_000.0, 1_000.0)).unwrap();
        let updated = AssetService::set_value(&mut book, asset.id, 1_250.0).unwrap();
        assert_eq!(updated.current_value, 1_250.0);
        assert_eq!(updated.total_cost, 1_000.0);
        assert_eq!(updated.profit(), 250.0);
        assert!(AssetService::set_value(&mut book, asset.id, f64::INFINITY).is_err());
    }

    #[test]
    fn create_requires_a_name_and_defaults_value_to_cost() {
        let mut book = Book::new("Assets");
        assert!(AssetService::create(&mut book, NewAsset::default()).is_err());

        let asset = AssetService::create(
            &mut book,
            NewAsset {
                name: Some("Bond".into()),
                total_cost: Some(2_000.0),
                ..NewAsset::default()
            },
        )
        .unwrap();
        assert_eq!(asset.current_value, 2_000.0);
    }
}
