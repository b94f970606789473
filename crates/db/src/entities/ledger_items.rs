//! `SeaORM` Entity for the `ledger_items` table.
//!
//! One row per ledger item, discriminated by `section`. Variant-specific
//! columns are nullable and populated for the owning section only.
//! `source_id` is a weak back-reference to the originating template: a bare
//! identity value, never a foreign key, no cascade in either direction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{IncomeKind, InvestmentKind, InvestmentStatus, LedgerSection};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ledger_id: Uuid,
    pub section: LedgerSection,
    pub source_id: Option<Uuid>,
    pub name: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub income_kind: Option<IncomeKind>,
    pub taxable: Option<bool>,
    pub tax_rate: Option<Decimal>,
    pub category: Option<String>,
    pub is_recurring: Option<bool>,
    pub platform: Option<String>,
    pub investment_kind: Option<InvestmentKind>,
    pub investment_status: Option<InvestmentStatus>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::monthly_ledgers::Entity",
        from = "Column::LedgerId",
        to = "super::monthly_ledgers::Column::Id"
    )]
    MonthlyLedgers,
}

impl Related<super::monthly_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
