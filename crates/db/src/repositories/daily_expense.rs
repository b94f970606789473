//! Daily expense repository: the incidental spending stream.
//!
//! Daily expenses live outside the monthly ledger and are never forked.
//! Ledger reads pull their month total live, so the two views can never
//! drift apart.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use fintrack_shared::Month;

use crate::entities::daily_expenses;
use crate::repositories::income::TemplateError;

/// Input for recording a daily expense.
#[derive(Debug, Clone)]
pub struct CreateDailyExpenseInput {
    /// Calendar day of the expense.
    pub date: NaiveDate,
    /// Amount spent.
    pub amount: Decimal,
    /// Spending category; defaults to `general`.
    pub category: Option<String>,
    /// Where the money went.
    pub vendor: Option<String>,
}

/// Sums a user's daily expenses over the month's effective date window.
///
/// The window is capped at `today` for the current month so a mid-month
/// read never includes future-dated rows.
pub(crate) async fn month_total(
    db: &DatabaseConnection,
    user_id: Uuid,
    month: Month,
    today: NaiveDate,
) -> Result<Decimal, DbErr> {
    let (start, end) = month.expense_window(today);
    let total: Option<Option<Decimal>> = daily_expenses::Entity::find()
        .select_only()
        .column_as(daily_expenses::Column::Amount.sum(), "total")
        .filter(daily_expenses::Column::UserId.eq(user_id))
        .filter(daily_expenses::Column::Date.gte(start))
        .filter(daily_expenses::Column::Date.lte(end))
        .into_tuple()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

/// Daily expense repository.
#[derive(Debug, Clone)]
pub struct DailyExpenseRepository {
    db: DatabaseConnection,
}

impl DailyExpenseRepository {
    /// Creates a new daily expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a daily expense.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateDailyExpenseInput,
    ) -> Result<daily_expenses::Model, TemplateError> {
        let model = daily_expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            date: Set(input.date),
            amount: Set(input.amount),
            category: Set(input.category.unwrap_or_else(|| "general".to_string())),
            vendor: Set(input.vendor),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(model)
    }

    /// Lists the user's daily expenses for a month, newest day first.
    pub async fn list_for_month(
        &self,
        user_id: Uuid,
        month: Month,
    ) -> Result<Vec<daily_expenses::Model>, TemplateError> {
        let models = daily_expenses::Entity::find()
            .filter(daily_expenses::Column::UserId.eq(user_id))
            .filter(daily_expenses::Column::Date.gte(month.first_day()))
            .filter(daily_expenses::Column::Date.lte(month.last_day()))
            .order_by_desc(daily_expenses::Column::Date)
            .order_by_desc(daily_expenses::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// Deletes one of the user's daily expenses.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = daily_expenses::Entity::find_by_id(id)
            .filter(daily_expenses::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(TemplateError::NotFound(id))?;
        daily_expenses::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Sum of the user's daily expenses within the month's effective window.
    pub async fn month_total(
        &self,
        user_id: Uuid,
        month: Month,
        today: NaiveDate,
    ) -> Result<Decimal, TemplateError> {
        Ok(month_total(&self.db, user_id, month, today).await?)
    }
}
