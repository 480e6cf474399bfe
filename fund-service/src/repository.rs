//! Repository for fund data

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use common::db::{init_db_pool, run_migrations};
use common::error::{Error, Result};
use common::model::fund::{InvestmentFund, NewFund};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, info};

use crate::config::FundServiceConfig;

/// Fund repository trait defining the interface for fund data storage
///
/// Every operation is a single atomic read or write against the store.
#[async_trait]
pub trait FundRepository: Send + Sync {
    /// Store a new fund and return it with its assigned id
    async fn insert(&self, fund: NewFund) -> Result<InvestmentFund>;

    /// Get a fund by ID
    async fn get(&self, fund_id: i64) -> Result<Option<InvestmentFund>>;

    /// Get all funds ordered by ID
    async fn list(&self) -> Result<Vec<InvestmentFund>>;

    /// Overwrite the performance figure of a fund, returning the updated record
    async fn update_performance(&self, fund_id: i64, performance: f64) -> Result<Option<InvestmentFund>>;

    /// Remove a fund, returning whether it existed
    async fn delete(&self, fund_id: i64) -> Result<bool>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()>;
}

/// In-memory repository for fund data
pub struct InMemoryFundRepository {
    /// Funds by ID
    funds: DashMap<i64, InvestmentFund>,
    /// Fund IDs by name, used to claim names atomically
    names: DashMap<String, i64>,
    /// Next ID to hand out; IDs are never reused
    next_id: AtomicI64,
}

impl InMemoryFundRepository {
    /// Create a new in-memory fund repository
    pub fn new() -> Self {
        Self {
            funds: DashMap::new(),
            names: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryFundRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FundRepository for InMemoryFundRepository {
    async fn insert(&self, fund: NewFund) -> Result<InvestmentFund> {
        // Holding the vacant name entry blocks a concurrent insert of the same name.
        match self.names.entry(fund.name.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateFund(fund.name)),
            Entry::Vacant(slot) => {
                let fund_id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let fund = InvestmentFund::from_new(fund_id, fund);
                self.funds.insert(fund_id, fund.clone());
                slot.insert(fund_id);
                Ok(fund)
            }
        }
    }

    async fn get(&self, fund_id: i64) -> Result<Option<InvestmentFund>> {
        Ok(self.funds.get(&fund_id).map(|f| f.clone()))
    }

    async fn list(&self) -> Result<Vec<InvestmentFund>> {
        let mut funds: Vec<InvestmentFund> = self.funds
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        funds.sort_by_key(|f| f.fund_id);

        Ok(funds)
    }

    async fn update_performance(&self, fund_id: i64, performance: f64) -> Result<Option<InvestmentFund>> {
        Ok(self.funds.get_mut(&fund_id).map(|mut fund| {
            fund.update_performance(performance);
            fund.clone()
        }))
    }

    async fn delete(&self, fund_id: i64) -> Result<bool> {
        match self.funds.remove(&fund_id) {
            Some((_, fund)) => {
                self.names.remove(&fund.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

const FUND_COLUMNS: &str = "fund_id, name, manager_name, description, nav, date_of_creation, performance";

/// PostgreSQL repository for fund data
pub struct PostgresFundRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresFundRepository {
    /// Create a repository over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the service configuration and make sure the schema exists
    pub async fn with_config(config: &FundServiceConfig) -> Result<Self> {
        info!("Connecting to PostgreSQL database with pool size: {}", config.db_pool_size);

        let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;
        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn fund_from_row(row: &PgRow) -> Result<InvestmentFund> {
    Ok(InvestmentFund {
        fund_id: row.try_get("fund_id")?,
        name: row.try_get("name")?,
        manager_name: row.try_get("manager_name")?,
        description: row.try_get("description")?,
        nav: row.try_get("nav")?,
        date_of_creation: row.try_get("date_of_creation")?,
        performance: row.try_get("performance")?,
    })
}

#[async_trait]
impl FundRepository for PostgresFundRepository {
    async fn insert(&self, fund: NewFund) -> Result<InvestmentFund> {
        debug!("Inserting fund into database: {}", fund.name);

        let row = sqlx::query(&format!(
            "INSERT INTO funds (name, manager_name, description, nav, date_of_creation, performance)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            FUND_COLUMNS
        ))
        .bind(&fund.name)
        .bind(&fund.manager_name)
        .bind(&fund.description)
        .bind(fund.nav)
        .bind(fund.date_of_creation)
        .bind(fund.performance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::DuplicateFund(fund.name.clone())
            }
            other => Error::Database(other),
        })?;

        fund_from_row(&row)
    }

    async fn get(&self, fund_id: i64) -> Result<Option<InvestmentFund>> {
        debug!("Getting fund from database: {}", fund_id);

        let row = sqlx::query(&format!("SELECT {} FROM funds WHERE fund_id = $1", FUND_COLUMNS))
            .bind(fund_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(fund_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<InvestmentFund>> {
        debug!("Listing funds from database");

        let rows = sqlx::query(&format!("SELECT {} FROM funds ORDER BY fund_id", FUND_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(fund_from_row).collect()
    }

    async fn update_performance(&self, fund_id: i64, performance: f64) -> Result<Option<InvestmentFund>> {
        debug!("Updating performance of fund {} to {}", fund_id, performance);

        let row = sqlx::query(&format!(
            "UPDATE funds SET performance = $2 WHERE fund_id = $1 RETURNING {}",
            FUND_COLUMNS
        ))
        .bind(fund_id)
        .bind(performance)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(fund_from_row).transpose()
    }

    async fn delete(&self, fund_id: i64) -> Result<bool> {
        debug!("Deleting fund from database: {}", fund_id);

        let result = sqlx::query("DELETE FROM funds WHERE fund_id = $1")
            .bind(fund_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
