//! User settings repository: base currency and exchange rates.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

use fintrack_core::currency::{RateTable, DEFAULT_BASE_CURRENCY};

use crate::entities::{exchange_rates, user_settings};

/// Error types for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User settings repository.
///
/// Users without a settings row get implicit defaults; the row is only
/// materialized on first write.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The user's base currency, defaulting when no row exists.
    pub async fn base_currency(&self, user_id: Uuid) -> Result<String, SettingsError> {
        let settings = user_settings::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?;
        Ok(settings
            .map(|s| s.base_currency)
            .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string()))
    }

    /// Sets the user's base currency, creating the settings row if needed.
    pub async fn set_base_currency(
        &self,
        user_id: Uuid,
        base_currency: String,
    ) -> Result<user_settings::Model, SettingsError> {
        let now = Utc::now().into();
        let existing = user_settings::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?;
        let model = match existing {
            Some(settings) => {
                let mut active: user_settings::ActiveModel = settings.into();
                active.base_currency = Set(base_currency);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                user_settings::ActiveModel {
                    user_id: Set(user_id),
                    base_currency: Set(base_currency),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?
            }
        };
        Ok(model)
    }

    /// Lists the user's configured exchange rates.
    pub async fn list_rates(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<exchange_rates::Model>, SettingsError> {
        let rates = exchange_rates::Entity::find()
            .filter(exchange_rates::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(rates)
    }

    /// Upserts the rate for one foreign currency.
    pub async fn set_rate(
        &self,
        user_id: Uuid,
        currency_code: &str,
        rate: Decimal,
    ) -> Result<exchange_rates::Model, SettingsError> {
        let code = currency_code.to_uppercase();
        let now = Utc::now().into();
        let existing = exchange_rates::Entity::find()
            .filter(exchange_rates::Column::UserId.eq(user_id))
            .filter(exchange_rates::Column::CurrencyCode.eq(code.clone()))
            .one(&self.db)
            .await?;
        let model = match existing {
            Some(row) => {
                let mut active: exchange_rates::ActiveModel = row.into();
                active.rate = Set(rate);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                exchange_rates::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    currency_code: Set(code),
                    rate: Set(rate),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?
            }
        };
        Ok(model)
    }

    /// The user's full rate table for totals computation.
    ///
    /// Currencies with no configured row fall back to the table's default
    /// rate at lookup time.
    pub async fn rate_table(&self, user_id: Uuid) -> Result<RateTable, SettingsError> {
        let base = self.base_currency(user_id).await?;
        let mut table = RateTable::new(base);
        for row in self.list_rates(user_id).await? {
            table.set_rate(row.currency_code, row.rate);
        }
        Ok(table)
    }
}
