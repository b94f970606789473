//! Monthly ledger repository: lazy fork from recurring templates plus
//! scoped item mutation.
//!
//! A ledger is created at most once per `(user, month)`. The create path is
//! an optimistic insert: when two first reads race, the loser hits the
//! `uq_monthly_ledgers_user_month` constraint, rolls back, and re-reads the
//! winner, so callers never observe the conflict. After the fork the ledger
//! diverges from its templates; nothing here ever writes back to a template.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use fintrack_core::currency::DEFAULT_BASE_CURRENCY;
use fintrack_core::ledger::{
    ExpenseItem, IncomeItem, InvestmentItem, LedgerItemPatch, LedgerSnapshot, LedgerStatus,
    NewLedgerItem, Section,
};
use fintrack_shared::Month;

use crate::entities::{
    income_sources, investments, ledger_items, monthly_ledgers, recurring_expenses,
    sea_orm_active_enums::{self, LedgerSection},
};
use crate::repositories::daily_expense;

/// Error types for monthly ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// No ledger has been forked for the month yet.
    #[error("No ledger exists for month {0}")]
    LedgerNotFound(Month),

    /// The ledger exists but the addressed item does not.
    #[error("No {section} item {item_id} in the ledger for {month}")]
    ItemNotFound {
        /// Month of the ledger that was searched.
        month: Month,
        /// Section the item was looked up in.
        section: Section,
        /// Identity that did not match.
        item_id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of a ledger read: the snapshot plus the live daily-expense total
/// for the same month. The total is recomputed on every read and never
/// stored in the ledger.
#[derive(Debug, Clone)]
pub struct LedgerRead {
    /// The ledger with its items.
    pub ledger: LedgerSnapshot,
    /// Live sum over the daily incidental stream for the month.
    pub daily_expenses_total: Decimal,
}

/// Monthly ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the ledger for `(user_id, month)`, forking it from the
    /// user's active templates on first read.
    ///
    /// Idempotent: repeated calls return the same ledger identity. Under
    /// concurrent first reads exactly one ledger is created and every
    /// caller gets it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable.
    pub async fn get_or_create(
        &self,
        user_id: Uuid,
        month: Month,
        today: NaiveDate,
    ) -> Result<LedgerRead, LedgerError> {
        let ledger = match self.find_snapshot(user_id, month).await? {
            Some(snapshot) => snapshot,
            None => self.fork(user_id, month).await?,
        };

        let daily_expenses_total =
            daily_expense::month_total(&self.db, user_id, month, today).await?;

        Ok(LedgerRead {
            ledger,
            daily_expenses_total,
        })
    }

    /// Loads the ledger for `(user_id, month)` without forking.
    ///
    /// Used by reporting surfaces that fall back to live templates when no
    /// fork has happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_snapshot(
        &self,
        user_id: Uuid,
        month: Month,
    ) -> Result<Option<LedgerSnapshot>, LedgerError> {
        match self.find_row(user_id, month).await? {
            Some(ledger) => Ok(Some(self.load_items(ledger).await?)),
            None => Ok(None),
        }
    }

    /// Appends an ad-hoc item (`source_id = NULL`) to a section.
    ///
    /// The ledger must already exist; this never forks implicitly.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::LedgerNotFound` if no ledger exists for the
    /// month.
    pub async fn add_item(
        &self,
        user_id: Uuid,
        month: Month,
        section: Section,
        input: &NewLedgerItem,
    ) -> Result<LedgerSnapshot, LedgerError> {
        let ledger = self.require_ledger(user_id, month).await?;
        warn_if_finalized(&ledger);

        let now = Utc::now().into();
        ad_hoc_item(ledger.id, section, input, now)
            .insert(&self.db)
            .await?;

        Ok(self.load_items(ledger).await?)
    }

    /// Applies a field-level patch to one item in one section.
    ///
    /// Only fields present in the patch are written; `source_id` is never
    /// touched. The update is a single atomic statement keyed by
    /// `(ledger, section, item)`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::LedgerNotFound` if no ledger exists for the
    /// month, `LedgerError::ItemNotFound` if the item is absent from the
    /// section.
    pub async fn update_item(
        &self,
        user_id: Uuid,
        month: Month,
        section: Section,
        item_id: Uuid,
        patch: &LedgerItemPatch,
    ) -> Result<LedgerSnapshot, LedgerError> {
        let ledger = self.require_ledger(user_id, month).await?;
        warn_if_finalized(&ledger);

        let result = ledger_items::Entity::update_many()
            .set(patch_model(patch))
            .filter(ledger_items::Column::Id.eq(item_id))
            .filter(ledger_items::Column::LedgerId.eq(ledger.id))
            .filter(ledger_items::Column::Section.eq(LedgerSection::from(section)))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            debug!(%item_id, %section, %month, "update target item not found in section");
            return Err(LedgerError::ItemNotFound {
                month,
                section,
                item_id,
            });
        }

        Ok(self.load_items(ledger).await?)
    }

    /// Removes one item from one section.
    ///
    /// Deleting by id is naturally idempotent, so a missing item is a
    /// silent no-op and the unchanged ledger is returned; only a missing
    /// ledger is an error. The source template is never touched, even when
    /// `source_id` is set.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::LedgerNotFound` if no ledger exists for the
    /// month.
    pub async fn remove_item(
        &self,
        user_id: Uuid,
        month: Month,
        section: Section,
        item_id: Uuid,
    ) -> Result<LedgerSnapshot, LedgerError> {
        let ledger = self.require_ledger(user_id, month).await?;
        warn_if_finalized(&ledger);

        let result = ledger_items::Entity::delete_many()
            .filter(ledger_items::Column::Id.eq(item_id))
            .filter(ledger_items::Column::LedgerId.eq(ledger.id))
            .filter(ledger_items::Column::Section.eq(LedgerSection::from(section)))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            debug!(%item_id, %section, %month, "remove target item already absent, no-op");
        }

        Ok(self.load_items(ledger).await?)
    }

    /// Updates the ledger status (`draft` / `finalized`).
    ///
    /// Finalization is currently informational: it is recorded and shown,
    /// but item mutators still accept edits (with a warning).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::LedgerNotFound` if no ledger exists for the
    /// month.
    pub async fn set_status(
        &self,
        user_id: Uuid,
        month: Month,
        status: LedgerStatus,
    ) -> Result<LedgerSnapshot, LedgerError> {
        let ledger = self.require_ledger(user_id, month).await?;

        let mut active: monthly_ledgers::ActiveModel = ledger.into();
        active.status = Set(status.into());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;

        Ok(self.load_items(updated).await?)
    }

    // ========================================================================
    // Fork path
    // ========================================================================

    /// Forks a new ledger from the user's active templates, falling back to
    /// re-reading the winner when a concurrent fork got there first.
    async fn fork(&self, user_id: Uuid, month: Month) -> Result<LedgerSnapshot, LedgerError> {
        match self.try_fork(user_id, month).await {
            Ok(snapshot) => {
                info!(
                    %user_id,
                    %month,
                    incomes = snapshot.incomes.len(),
                    expenses = snapshot.expenses.len(),
                    investments = snapshot.investments.len(),
                    "forked monthly ledger from templates"
                );
                Ok(snapshot)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(%user_id, %month, "lost fork race, re-reading winning ledger");
                self.find_snapshot(user_id, month).await?.ok_or_else(|| {
                    // The constraint fired, so the winner must exist.
                    LedgerError::Database(DbErr::Custom(format!(
                        "fork conflict for {month} but no winning ledger found"
                    )))
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Optimistic insert of the ledger row plus item copies of all active
    /// templates, in one transaction.
    async fn try_fork(&self, user_id: Uuid, month: Month) -> Result<LedgerSnapshot, DbErr> {
        let incomes = income_sources::Entity::find()
            .filter(income_sources::Column::UserId.eq(user_id))
            .filter(income_sources::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        let expenses = recurring_expenses::Entity::find()
            .filter(recurring_expenses::Column::UserId.eq(user_id))
            .filter(recurring_expenses::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        let investments = investments::Entity::find()
            .filter(investments::Column::UserId.eq(user_id))
            .filter(investments::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        let ledger_id = Uuid::new_v4();
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut items: Vec<ledger_items::ActiveModel> =
            Vec::with_capacity(incomes.len() + expenses.len() + investments.len());
        items.extend(incomes.iter().map(|t| income_copy(ledger_id, t, now)));
        items.extend(expenses.iter().map(|t| expense_copy(ledger_id, t, now)));
        items.extend(investments.iter().map(|t| investment_copy(ledger_id, t, now)));

        let txn = self.db.begin().await?;

        monthly_ledgers::ActiveModel {
            id: Set(ledger_id),
            user_id: Set(user_id),
            month: Set(month.to_string()),
            status: Set(sea_orm_active_enums::LedgerStatus::Draft),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if !items.is_empty() {
            ledger_items::Entity::insert_many(items).exec(&txn).await?;
        }

        txn.commit().await?;

        let ledger = monthly_ledgers::Model {
            id: ledger_id,
            user_id,
            month: month.to_string(),
            status: sea_orm_active_enums::LedgerStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        self.load_items(ledger).await
    }

    // ========================================================================
    // Lookup helpers
    // ========================================================================

    async fn find_row(
        &self,
        user_id: Uuid,
        month: Month,
    ) -> Result<Option<monthly_ledgers::Model>, DbErr> {
        monthly_ledgers::Entity::find()
            .filter(monthly_ledgers::Column::UserId.eq(user_id))
            .filter(monthly_ledgers::Column::Month.eq(month.to_string()))
            .one(&self.db)
            .await
    }

    async fn require_ledger(
        &self,
        user_id: Uuid,
        month: Month,
    ) -> Result<monthly_ledgers::Model, LedgerError> {
        self.find_row(user_id, month).await?.ok_or_else(|| {
            debug!(%user_id, %month, "mutation addressed a month with no forked ledger");
            LedgerError::LedgerNotFound(month)
        })
    }

    async fn load_items(
        &self,
        ledger: monthly_ledgers::Model,
    ) -> Result<LedgerSnapshot, DbErr> {
        let rows = ledger_items::Entity::find()
            .filter(ledger_items::Column::LedgerId.eq(ledger.id))
            .order_by_asc(ledger_items::Column::CreatedAt)
            .order_by_asc(ledger_items::Column::Id)
            .all(&self.db)
            .await?;

        let month: Month = ledger
            .month
            .trim()
            .parse()
            .map_err(|e| DbErr::Custom(format!("corrupt month token in ledger row: {e}")))?;

        let mut snapshot = LedgerSnapshot {
            id: ledger.id,
            user_id: ledger.user_id,
            month,
            status: ledger.status.into(),
            incomes: Vec::new(),
            expenses: Vec::new(),
            investments: Vec::new(),
        };

        for row in rows {
            match row.section {
                LedgerSection::Incomes => snapshot.incomes.push(income_item(row)),
                LedgerSection::Expenses => snapshot.expenses.push(expense_item(row)),
                LedgerSection::Investments => snapshot.investments.push(investment_item(row)),
            }
        }

        Ok(snapshot)
    }
}

fn warn_if_finalized(ledger: &monthly_ledgers::Model) {
    if ledger.status == sea_orm_active_enums::LedgerStatus::Finalized {
        warn!(
            ledger_id = %ledger.id,
            month = %ledger.month,
            "mutating a finalized ledger; finalization is informational only"
        );
    }
}

// ============================================================================
// Template -> item copies (fork time)
// ============================================================================

fn income_copy(
    ledger_id: Uuid,
    template: &income_sources::Model,
    now: DateTimeWithTimeZone,
) -> ledger_items::ActiveModel {
    ledger_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        ledger_id: Set(ledger_id),
        section: Set(LedgerSection::Incomes),
        source_id: Set(Some(template.id)),
        name: Set(template.name.clone()),
        amount: Set(template.amount),
        currency: Set(Some(template.currency.clone())),
        income_kind: Set(Some(template.kind)),
        taxable: Set(Some(template.taxable)),
        tax_rate: Set(template.tax_rate),
        category: Set(None),
        is_recurring: Set(None),
        platform: Set(None),
        investment_kind: Set(None),
        investment_status: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn expense_copy(
    ledger_id: Uuid,
    template: &recurring_expenses::Model,
    now: DateTimeWithTimeZone,
) -> ledger_items::ActiveModel {
    ledger_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        ledger_id: Set(ledger_id),
        section: Set(LedgerSection::Expenses),
        source_id: Set(Some(template.id)),
        name: Set(template.name.clone()),
        amount: Set(template.amount),
        currency: Set(None),
        income_kind: Set(None),
        taxable: Set(None),
        tax_rate: Set(None),
        category: Set(Some(template.category.clone())),
        is_recurring: Set(Some(template.is_recurring)),
        platform: Set(None),
        investment_kind: Set(None),
        investment_status: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn investment_copy(
    ledger_id: Uuid,
    template: &investments::Model,
    now: DateTimeWithTimeZone,
) -> ledger_items::ActiveModel {
    ledger_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        ledger_id: Set(ledger_id),
        section: Set(LedgerSection::Investments),
        source_id: Set(Some(template.id)),
        name: Set(template.name.clone()),
        amount: Set(template.amount),
        currency: Set(None),
        income_kind: Set(None),
        taxable: Set(None),
        tax_rate: Set(None),
        category: Set(None),
        is_recurring: Set(None),
        platform: Set(template.platform.clone()),
        investment_kind: Set(Some(template.kind)),
        investment_status: Set(Some(template.status)),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ============================================================================
// Ad-hoc items and patches (mutator path)
// ============================================================================

fn ad_hoc_item(
    ledger_id: Uuid,
    section: Section,
    input: &NewLedgerItem,
    now: DateTimeWithTimeZone,
) -> ledger_items::ActiveModel {
    let mut item = ledger_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        ledger_id: Set(ledger_id),
        section: Set(LedgerSection::from(section)),
        // Ad-hoc items never carry provenance.
        source_id: Set(None),
        name: Set(input.name.clone()),
        amount: Set(input.amount),
        currency: Set(None),
        income_kind: Set(None),
        taxable: Set(None),
        tax_rate: Set(None),
        category: Set(None),
        is_recurring: Set(None),
        platform: Set(None),
        investment_kind: Set(None),
        investment_status: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match section {
        Section::Incomes => {
            item.currency = Set(Some(
                input
                    .currency
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string()),
            ));
            item.income_kind = Set(Some(
                input
                    .kind
                    .unwrap_or(fintrack_core::ledger::IncomeKind::Other)
                    .into(),
            ));
            item.taxable = Set(Some(input.taxable.unwrap_or(false)));
            item.tax_rate = Set(input.tax_rate);
        }
        Section::Expenses => {
            item.category = Set(Some(
                input
                    .category
                    .clone()
                    .unwrap_or_else(|| "general".to_string()),
            ));
            item.is_recurring = Set(Some(input.is_recurring.unwrap_or(false)));
        }
        Section::Investments => {
            item.platform = Set(input.platform.clone());
            item.investment_kind = Set(Some(
                input
                    .investment_kind
                    .unwrap_or(fintrack_core::ledger::InvestmentKind::Voluntary)
                    .into(),
            ));
            item.investment_status = Set(Some(
                input
                    .investment_status
                    .unwrap_or(fintrack_core::ledger::InvestmentStatus::Active)
                    .into(),
            ));
        }
    }

    item
}

/// Builds the partial active model for an item patch. Absent fields stay
/// `NotSet` so the generated UPDATE leaves them untouched; `source_id` has
/// no corresponding patch field at all.
fn patch_model(patch: &LedgerItemPatch) -> ledger_items::ActiveModel {
    let mut model = ledger_items::ActiveModel {
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };

    if let Some(name) = &patch.name {
        model.name = Set(name.clone());
    }
    if let Some(amount) = patch.amount {
        model.amount = Set(amount);
    }
    if let Some(currency) = &patch.currency {
        model.currency = Set(Some(currency.clone()));
    }
    if let Some(kind) = patch.kind {
        model.income_kind = Set(Some(kind.into()));
    }
    if let Some(taxable) = patch.taxable {
        model.taxable = Set(Some(taxable));
    }
    if let Some(tax_rate) = patch.tax_rate {
        model.tax_rate = Set(Some(tax_rate));
    }
    if let Some(category) = &patch.category {
        model.category = Set(Some(category.clone()));
    }
    if let Some(is_recurring) = patch.is_recurring {
        model.is_recurring = Set(Some(is_recurring));
    }
    if let Some(platform) = &patch.platform {
        model.platform = Set(Some(platform.clone()));
    }
    if let Some(kind) = patch.investment_kind {
        model.investment_kind = Set(Some(kind.into()));
    }
    if let Some(status) = patch.investment_status {
        model.investment_status = Set(Some(status.into()));
    }

    model
}

// ============================================================================
// Item rows -> domain items (read path)
// ============================================================================

fn income_item(row: ledger_items::Model) -> IncomeItem {
    IncomeItem {
        id: row.id,
        source_id: row.source_id,
        name: row.name,
        amount: row.amount,
        currency: row
            .currency
            .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string()),
        kind: row
            .income_kind
            .map_or(fintrack_core::ledger::IncomeKind::Other, Into::into),
        taxable: row.taxable.unwrap_or(false),
        tax_rate: row.tax_rate,
    }
}

fn expense_item(row: ledger_items::Model) -> ExpenseItem {
    ExpenseItem {
        id: row.id,
        source_id: row.source_id,
        name: row.name,
        amount: row.amount,
        category: row.category.unwrap_or_else(|| "general".to_string()),
        is_recurring: row.is_recurring.unwrap_or(false),
    }
}

fn investment_item(row: ledger_items::Model) -> InvestmentItem {
    InvestmentItem {
        id: row.id,
        source_id: row.source_id,
        name: row.name,
        amount: row.amount,
        platform: row.platform,
        kind: row
            .investment_kind
            .map_or(fintrack_core::ledger::InvestmentKind::Voluntary, Into::into),
        status: row
            .investment_status
            .map_or(fintrack_core::ledger::InvestmentStatus::Active, Into::into),
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
