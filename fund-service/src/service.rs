//! Fund service implementation

use std::sync::Arc;

use chrono::Local;
use common::error::{Error, ErrorExt, Result};
use common::model::fund::InvestmentFund;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{FundServiceConfig, StorageBackend};
use crate::repository::{FundRepository, InMemoryFundRepository, PostgresFundRepository};
use crate::validation::{parse_new_fund, parse_performance_update};

/// Fund service: validates payloads and performs one storage call per operation
pub struct FundService {
    /// Repository for fund data
    repo: Arc<dyn FundRepository>,
    /// Backend behind `repo`, reported by health checks
    storage: StorageBackend,
}

impl FundService {
    /// Create a new fund service backed by an in-memory repository
    pub fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryFundRepository::new()),
            storage: StorageBackend::InMemory,
        }
    }

    /// Create a fund service over an existing repository
    pub fn with_repository(repo: Arc<dyn FundRepository>, storage: StorageBackend) -> Self {
        Self { repo, storage }
    }

    /// Create a new fund service with a configuration
    pub async fn with_config(config: &FundServiceConfig) -> Result<Self> {
        let repo: Arc<dyn FundRepository> = match config.storage {
            StorageBackend::InMemory => Arc::new(InMemoryFundRepository::new()),
            StorageBackend::Postgres => Arc::new(
                PostgresFundRepository::with_config(config)
                    .await
                    .with_context(|| "Failed to initialise PostgreSQL fund repository")?,
            ),
        };

        info!("Fund service using {} storage", config.storage);
        Ok(Self::with_repository(repo, config.storage))
    }

    /// The storage backend in use
    pub fn storage(&self) -> StorageBackend {
        self.storage
    }

    /// List all funds
    pub async fn list_funds(&self) -> Result<Vec<InvestmentFund>> {
        self.repo.list().await
    }

    /// Get a fund by ID
    pub async fn get_fund(&self, fund_id: i64) -> Result<InvestmentFund> {
        self.repo
            .get(fund_id)
            .await
            .with_context(|| format!("Failed to retrieve fund {}", fund_id))?
            .ok_or(Error::FundNotFound(fund_id))
    }

    /// Validate a create payload and store the new fund
    pub async fn create_fund(&self, payload: &Value) -> Result<InvestmentFund> {
        let new_fund = parse_new_fund(payload, Local::now().date_naive())?;

        info!("Creating fund {}", new_fund.name);
        let fund = self.repo.insert(new_fund).await?;
        debug!("Created {}", fund);

        Ok(fund)
    }

    /// Overwrite the performance of an existing fund
    ///
    /// Existence is checked before the payload, so an unknown ID is reported
    /// as not found even when the body is also invalid.
    pub async fn update_performance(&self, fund_id: i64, payload: &Value) -> Result<InvestmentFund> {
        self.get_fund(fund_id).await?;
        let performance = parse_performance_update(payload)?;

        info!("Updating performance of fund {} to {}", fund_id, performance);
        self.repo
            .update_performance(fund_id, performance)
            .await
            .with_context(|| format!("Failed to update fund {}", fund_id))?
            .ok_or(Error::FundNotFound(fund_id))
    }

    /// Permanently remove a fund
    pub async fn delete_fund(&self, fund_id: i64) -> Result<()> {
        info!("Deleting fund {}", fund_id);

        if self.repo.delete(fund_id).await? {
            Ok(())
        } else {
            Err(Error::FundNotFound(fund_id))
        }
    }

    /// Check that the storage backend is reachable
    pub async fn ping(&self) -> Result<()> {
        self.repo.ping().await
    }
}

impl Default for FundService {
    fn default() -> Self {
        Self::new()
    }
}
