//! `SeaORM` Entity for the `monthly_ledgers` table.
//!
//! One row per `(user_id, month)`, guarded by a UNIQUE constraint that
//! serializes the fork decision under concurrent first reads.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LedgerStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_ledgers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub month: String,
    pub status: LedgerStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ledger_items::Entity")]
    LedgerItems,
}

impl Related<super::ledger_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
