//! Recurring expense repository: expense template CRUD.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use fintrack_core::ledger::ExpenseItem;

use crate::entities::recurring_expenses;
use crate::repositories::income::TemplateError;

/// Input for creating a recurring expense.
#[derive(Debug, Clone)]
pub struct CreateRecurringExpenseInput {
    /// Display name.
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// Spending category; defaults to `general`.
    pub category: Option<String>,
}

/// Partial update for a recurring expense.
#[derive(Debug, Clone, Default)]
pub struct UpdateRecurringExpenseInput {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category: Option<String>,
}

/// Recurring expense repository.
#[derive(Debug, Clone)]
pub struct RecurringExpenseRepository {
    db: DatabaseConnection,
}

impl RecurringExpenseRepository {
    /// Creates a new recurring expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a recurring expense template.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateRecurringExpenseInput,
    ) -> Result<recurring_expenses::Model, TemplateError> {
        let now = Utc::now().into();
        let model = recurring_expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            amount: Set(input.amount),
            category: Set(input.category.unwrap_or_else(|| "general".to_string())),
            is_recurring: Set(true),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(model)
    }

    /// Lists the user's recurring expenses, newest first.
    pub async fn list(
        &self,
        user_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<recurring_expenses::Model>, TemplateError> {
        let mut query = recurring_expenses::Entity::find()
            .filter(recurring_expenses::Column::UserId.eq(user_id))
            .order_by_desc(recurring_expenses::Column::CreatedAt);
        if !include_inactive {
            query = query.filter(recurring_expenses::Column::IsActive.eq(true));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Applies a partial update to one of the user's recurring expenses.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateRecurringExpenseInput,
    ) -> Result<recurring_expenses::Model, TemplateError> {
        let existing = self.require(user_id, id).await?;
        let mut active: recurring_expenses::ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a recurring expense so future forks skip it.
    pub async fn deactivate(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = self.require(user_id, id).await?;
        let mut active: recurring_expenses::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Hard-deletes a recurring expense. Forked copies are unaffected.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = self.require(user_id, id).await?;
        recurring_expenses::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// The user's active recurring expenses mapped into ledger-item shape.
    pub async fn active_as_items(&self, user_id: Uuid) -> Result<Vec<ExpenseItem>, TemplateError> {
        let templates = self.list(user_id, false).await?;
        Ok(templates
            .into_iter()
            .map(|t| ExpenseItem {
                id: t.id,
                source_id: Some(t.id),
                name: t.name,
                amount: t.amount,
                category: t.category,
                is_recurring: t.is_recurring,
            })
            .collect())
    }

    async fn require(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<recurring_expenses::Model, TemplateError> {
        recurring_expenses::Entity::find_by_id(id)
            .filter(recurring_expenses::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(TemplateError::NotFound(id))
    }
}
