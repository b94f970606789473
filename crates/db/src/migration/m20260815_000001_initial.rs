//! Initial schema: recurring templates, daily expenses, user settings,
//! and the monthly ledger tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS ledger_items CASCADE;
            DROP TABLE IF EXISTS monthly_ledgers CASCADE;
            DROP TABLE IF EXISTS daily_expenses CASCADE;
            DROP TABLE IF EXISTS exchange_rates CASCADE;
            DROP TABLE IF EXISTS user_settings CASCADE;
            DROP TABLE IF EXISTS investments CASCADE;
            DROP TABLE IF EXISTS recurring_expenses CASCADE;
            DROP TABLE IF EXISTS income_sources CASCADE;
            DROP TYPE IF EXISTS investment_status;
            DROP TYPE IF EXISTS investment_kind;
            DROP TYPE IF EXISTS income_kind;
            DROP TYPE IF EXISTS ledger_status;
            DROP TYPE IF EXISTS ledger_section;
            ",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Enum types
CREATE TYPE income_kind AS ENUM ('salary', 'freelance', 'recurring-equity-vesting', 'other');
CREATE TYPE investment_kind AS ENUM ('systematic', 'voluntary');
CREATE TYPE investment_status AS ENUM ('active', 'stopped');
CREATE TYPE ledger_section AS ENUM ('incomes', 'expenses', 'investments');
CREATE TYPE ledger_status AS ENUM ('draft', 'finalized');

-- Recurring income templates
CREATE TABLE income_sources (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    amount NUMERIC(16, 2) NOT NULL,
    currency VARCHAR(8) NOT NULL DEFAULT 'INR',
    kind income_kind NOT NULL DEFAULT 'other',
    taxable BOOLEAN NOT NULL DEFAULT true,
    tax_rate NUMERIC(5, 2),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_income_sources_user ON income_sources(user_id) WHERE is_active;

-- Recurring expense templates
CREATE TABLE recurring_expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    amount NUMERIC(16, 2) NOT NULL,
    category VARCHAR(64) NOT NULL DEFAULT 'general',
    is_recurring BOOLEAN NOT NULL DEFAULT true,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_recurring_expenses_user ON recurring_expenses(user_id) WHERE is_active;

-- Investment templates
CREATE TABLE investments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    amount NUMERIC(16, 2) NOT NULL,
    platform VARCHAR(128),
    kind investment_kind NOT NULL DEFAULT 'systematic',
    status investment_status NOT NULL DEFAULT 'active',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_investments_user ON investments(user_id) WHERE is_active;

-- Per-user settings and exchange rates
CREATE TABLE user_settings (
    user_id UUID PRIMARY KEY,
    base_currency VARCHAR(8) NOT NULL DEFAULT 'INR',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE exchange_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    currency_code VARCHAR(8) NOT NULL,
    rate NUMERIC(16, 6) NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rate_positive CHECK (rate > 0),
    CONSTRAINT uq_exchange_rates_user_currency UNIQUE (user_id, currency_code)
);

-- Daily incidental expenses (never forked into a ledger)
CREATE TABLE daily_expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    date DATE NOT NULL,
    amount NUMERIC(16, 2) NOT NULL,
    category VARCHAR(64) NOT NULL DEFAULT 'general',
    vendor VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_daily_expenses_user_date ON daily_expenses(user_id, date);

-- Monthly ledgers: the uniqueness constraint is the authority that
-- serializes concurrent fork attempts for the same (user, month).
CREATE TABLE monthly_ledgers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    month CHAR(7) NOT NULL,
    status ledger_status NOT NULL DEFAULT 'draft',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_month_format CHECK (month ~ '^\d{4}-(0[1-9]|1[0-2])$'),
    CONSTRAINT uq_monthly_ledgers_user_month UNIQUE (user_id, month)
);

-- Item copies owned by a ledger. source_id is provenance only: no FK, no
-- cascade to or from the originating template.
CREATE TABLE ledger_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    ledger_id UUID NOT NULL REFERENCES monthly_ledgers(id) ON DELETE CASCADE,
    section ledger_section NOT NULL,
    source_id UUID,
    name VARCHAR(255) NOT NULL,
    amount NUMERIC(16, 2) NOT NULL,
    currency VARCHAR(8),
    income_kind income_kind,
    taxable BOOLEAN,
    tax_rate NUMERIC(5, 2),
    category VARCHAR(64),
    is_recurring BOOLEAN,
    platform VARCHAR(128),
    investment_kind investment_kind,
    investment_status investment_status,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ledger_items_ledger_section ON ledger_items(ledger_id, section);
";
