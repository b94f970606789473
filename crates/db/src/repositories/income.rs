//! Income source repository: recurring income template CRUD.
//!
//! Templates are live entities independent of any month. Forked ledgers
//! copy them by value; nothing here ever reaches into a ledger.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use fintrack_core::ledger::{IncomeItem, IncomeKind};

use crate::entities::income_sources;

/// Error types for income source operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template not found for this user.
    #[error("Template {0} not found")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an income source.
#[derive(Debug, Clone)]
pub struct CreateIncomeSourceInput {
    /// Display name.
    pub name: String,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// ISO currency code; defaults to the base currency.
    pub currency: Option<String>,
    /// Income classification.
    pub kind: IncomeKind,
    /// Whether the income is taxable.
    pub taxable: bool,
    /// Tax rate in percent.
    pub tax_rate: Option<Decimal>,
}

/// Partial update for an income source.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncomeSourceInput {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency code.
    pub currency: Option<String>,
    /// New classification.
    pub kind: Option<IncomeKind>,
    /// New taxable flag.
    pub taxable: Option<bool>,
    /// New tax rate.
    pub tax_rate: Option<Decimal>,
}

/// Income source repository.
#[derive(Debug, Clone)]
pub struct IncomeSourceRepository {
    db: DatabaseConnection,
}

impl IncomeSourceRepository {
    /// Creates a new income source repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an income source.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateIncomeSourceInput,
    ) -> Result<income_sources::Model, TemplateError> {
        let now = Utc::now().into();
        let model = income_sources::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            amount: Set(input.amount),
            currency: Set(input
                .currency
                .unwrap_or_else(|| fintrack_core::currency::DEFAULT_BASE_CURRENCY.to_string())),
            kind: Set(input.kind.into()),
            taxable: Set(input.taxable),
            tax_rate: Set(input.tax_rate),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(model)
    }

    /// Lists the user's income sources, newest first.
    pub async fn list(
        &self,
        user_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<income_sources::Model>, TemplateError> {
        let mut query = income_sources::Entity::find()
            .filter(income_sources::Column::UserId.eq(user_id))
            .order_by_desc(income_sources::Column::CreatedAt);
        if !include_inactive {
            query = query.filter(income_sources::Column::IsActive.eq(true));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Applies a partial update to one of the user's income sources.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateIncomeSourceInput,
    ) -> Result<income_sources::Model, TemplateError> {
        let existing = self.require(user_id, id).await?;
        let mut active: income_sources::ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(currency) = input.currency {
            active.currency = Set(currency);
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind.into());
        }
        if let Some(taxable) = input.taxable {
            active.taxable = Set(taxable);
        }
        if let Some(tax_rate) = input.tax_rate {
            active.tax_rate = Set(Some(tax_rate));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes an income source so future forks skip it.
    pub async fn deactivate(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = self.require(user_id, id).await?;
        let mut active: income_sources::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Hard-deletes an income source. Already-forked ledger items keep
    /// their copies; only their `source_id` dangles, by design.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = self.require(user_id, id).await?;
        income_sources::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// The user's active income sources mapped into ledger-item shape, for
    /// effective-data reads of pre-fork months.
    pub async fn active_as_items(&self, user_id: Uuid) -> Result<Vec<IncomeItem>, TemplateError> {
        let templates = self.list(user_id, false).await?;
        Ok(templates
            .into_iter()
            .map(|t| IncomeItem {
                id: t.id,
                source_id: Some(t.id),
                name: t.name,
                amount: t.amount,
                currency: t.currency,
                kind: t.kind.into(),
                taxable: t.taxable,
                tax_rate: t.tax_rate,
            })
            .collect())
    }

    async fn require(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<income_sources::Model, TemplateError> {
        income_sources::Entity::find_by_id(id)
            .filter(income_sources::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(TemplateError::NotFound(id))
    }
}
