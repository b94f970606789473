//! Investment repository: investment template CRUD.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use fintrack_core::ledger::{InvestmentItem, InvestmentKind, InvestmentStatus};

use crate::entities::investments;
use crate::repositories::income::TemplateError;

/// Input for creating an investment.
#[derive(Debug, Clone)]
pub struct CreateInvestmentInput {
    /// Display name.
    pub name: String,
    /// Monthly contribution amount.
    pub amount: Decimal,
    /// Broker or platform.
    pub platform: Option<String>,
    /// Contribution style.
    pub kind: InvestmentKind,
}

/// Partial update for an investment.
#[derive(Debug, Clone, Default)]
pub struct UpdateInvestmentInput {
    /// New display name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New platform.
    pub platform: Option<String>,
    /// New contribution style.
    pub kind: Option<InvestmentKind>,
    /// New status.
    pub status: Option<InvestmentStatus>,
}

/// Investment repository.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    db: DatabaseConnection,
}

impl InvestmentRepository {
    /// Creates a new investment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an investment template.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateInvestmentInput,
    ) -> Result<investments::Model, TemplateError> {
        let now = Utc::now().into();
        let model = investments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            amount: Set(input.amount),
            platform: Set(input.platform),
            kind: Set(input.kind.into()),
            status: Set(crate::entities::sea_orm_active_enums::InvestmentStatus::Active),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(model)
    }

    /// Lists the user's investments, newest first.
    pub async fn list(
        &self,
        user_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<investments::Model>, TemplateError> {
        let mut query = investments::Entity::find()
            .filter(investments::Column::UserId.eq(user_id))
            .order_by_desc(investments::Column::CreatedAt);
        if !include_inactive {
            query = query.filter(investments::Column::IsActive.eq(true));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Applies a partial update to one of the user's investments.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateInvestmentInput,
    ) -> Result<investments::Model, TemplateError> {
        let existing = self.require(user_id, id).await?;
        let mut active: investments::ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(platform) = input.platform {
            active.platform = Set(Some(platform));
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind.into());
        }
        if let Some(status) = input.status {
            active.status = Set(status.into());
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes an investment so future forks skip it.
    pub async fn deactivate(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = self.require(user_id, id).await?;
        let mut active: investments::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Hard-deletes an investment. Forked copies are unaffected.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TemplateError> {
        let existing = self.require(user_id, id).await?;
        investments::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// The user's active investments mapped into ledger-item shape.
    pub async fn active_as_items(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvestmentItem>, TemplateError> {
        let templates = self.list(user_id, false).await?;
        Ok(templates
            .into_iter()
            .map(|t| InvestmentItem {
                id: t.id,
                source_id: Some(t.id),
                name: t.name,
                amount: t.amount,
                platform: t.platform,
                kind: t.kind.into(),
                status: t.status.into(),
            })
            .collect())
    }

    async fn require(&self, user_id: Uuid, id: Uuid) -> Result<investments::Model, TemplateError> {
        investments::Entity::find_by_id(id)
            .filter(investments::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(TemplateError::NotFound(id))
    }
}
