//! Database seeder for Fintrack development and testing.
//!
//! Seeds a demo user with recurring templates, settings, an exchange rate,
//! and a handful of daily expenses for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Days, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use fintrack_core::ledger::{IncomeKind, InvestmentKind};
use fintrack_db::entities::{
    daily_expenses, exchange_rates, income_sources, investments, recurring_expenses, user_settings,
};
use fintrack_db::repositories::{
    CreateDailyExpenseInput, CreateIncomeSourceInput, CreateInvestmentInput,
    CreateRecurringExpenseInput, DailyExpenseRepository, IncomeSourceRepository,
    InvestmentRepository, RecurringExpenseRepository,
};

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fintrack_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding settings and exchange rates...");
    seed_settings(&db).await;

    println!("Seeding income sources...");
    seed_income_sources(&db).await;

    println!("Seeding recurring expenses...");
    seed_recurring_expenses(&db).await;

    println!("Seeding investments...");
    seed_investments(&db).await;

    println!("Seeding daily expenses...");
    seed_daily_expenses(&db).await;

    println!("Seeding complete!");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds the demo user's base currency and a USD rate.
async fn seed_settings(db: &DatabaseConnection) {
    if user_settings::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Settings already exist, skipping...");
        return;
    }

    user_settings::ActiveModel {
        user_id: Set(demo_user_id()),
        base_currency: Set("INR".to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed user settings");

    exchange_rates::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(demo_user_id()),
        currency_code: Set("USD".to_string()),
        rate: Set(dec!(89)),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed exchange rate");
}

/// Seeds a salary and a foreign-currency equity vesting income.
async fn seed_income_sources(db: &DatabaseConnection) {
    let existing = income_sources::Entity::find()
        .filter(income_sources::Column::UserId.eq(demo_user_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Income sources already exist, skipping...");
        return;
    }

    let repo = IncomeSourceRepository::new(db.clone());
    repo.create(
        demo_user_id(),
        CreateIncomeSourceInput {
            name: "Salary".to_string(),
            amount: dec!(100000),
            currency: Some("INR".to_string()),
            kind: IncomeKind::Salary,
            taxable: true,
            tax_rate: Some(dec!(30)),
        },
    )
    .await
    .expect("Failed to seed salary");

    repo.create(
        demo_user_id(),
        CreateIncomeSourceInput {
            name: "RSU vesting".to_string(),
            amount: dec!(500),
            currency: Some("USD".to_string()),
            kind: IncomeKind::RecurringEquityVesting,
            taxable: true,
            tax_rate: Some(dec!(30)),
        },
    )
    .await
    .expect("Failed to seed RSU vesting");
}

/// Seeds recurring monthly expenses.
async fn seed_recurring_expenses(db: &DatabaseConnection) {
    let existing = recurring_expenses::Entity::find()
        .filter(recurring_expenses::Column::UserId.eq(demo_user_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Recurring expenses already exist, skipping...");
        return;
    }

    let repo = RecurringExpenseRepository::new(db.clone());
    for (name, amount, category) in [
        ("Rent", dec!(30000), "housing"),
        ("Internet", dec!(1200), "utilities"),
        ("Gym", dec!(2000), "health"),
    ] {
        repo.create(
            demo_user_id(),
            CreateRecurringExpenseInput {
                name: name.to_string(),
                amount,
                category: Some(category.to_string()),
            },
        )
        .await
        .expect("Failed to seed recurring expense");
    }
}

/// Seeds one SIP and one voluntary investment.
async fn seed_investments(db: &DatabaseConnection) {
    let existing = investments::Entity::find()
        .filter(investments::Column::UserId.eq(demo_user_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Investments already exist, skipping...");
        return;
    }

    let repo = InvestmentRepository::new(db.clone());
    repo.create(
        demo_user_id(),
        CreateInvestmentInput {
            name: "Index fund SIP".to_string(),
            amount: dec!(10000),
            platform: Some("Zerodha".to_string()),
            kind: InvestmentKind::Systematic,
        },
    )
    .await
    .expect("Failed to seed SIP");

    repo.create(
        demo_user_id(),
        CreateInvestmentInput {
            name: "Gold ETF".to_string(),
            amount: dec!(5000),
            platform: Some("Zerodha".to_string()),
            kind: InvestmentKind::Voluntary,
        },
    )
    .await
    .expect("Failed to seed voluntary investment");
}

/// Seeds a few recent daily expenses.
async fn seed_daily_expenses(db: &DatabaseConnection) {
    let existing = daily_expenses::Entity::find()
        .filter(daily_expenses::Column::UserId.eq(demo_user_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Daily expenses already exist, skipping...");
        return;
    }

    let repo = DailyExpenseRepository::new(db.clone());
    let today = Utc::now().date_naive();
    for (days_ago, amount, category, vendor) in [
        (0u64, dec!(450), "food", "Cafe"),
        (1, dec!(1200), "transport", "Cab"),
        (3, dec!(2300), "groceries", "Supermarket"),
    ] {
        repo.create(
            demo_user_id(),
            CreateDailyExpenseInput {
                date: today.checked_sub_days(Days::new(days_ago)).unwrap_or(today),
                amount,
                category: Some(category.to_string()),
                vendor: Some(vendor.to_string()),
            },
        )
        .await
        .expect("Failed to seed daily expense");
    }
}
