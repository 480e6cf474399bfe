//! Investment fund model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Date format used for `date_of_creation` on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Investment fund record
///
/// Serializes as a flat object whose keys follow the field declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct InvestmentFund {
    /// Storage-assigned identifier
    pub fund_id: i64,
    /// Fund name, unique across funds
    pub name: String,
    /// Name of the fund manager
    pub manager_name: String,
    /// Free-form description of the fund
    pub description: String,
    /// Net asset value
    pub nav: f64,
    /// Creation date (YYYY-MM-DD)
    pub date_of_creation: NaiveDate,
    /// Performance as a percentage
    pub performance: f64,
}

impl InvestmentFund {
    /// Attach a storage-assigned id to a validated fund
    pub fn from_new(fund_id: i64, new_fund: NewFund) -> Self {
        Self {
            fund_id,
            name: new_fund.name,
            manager_name: new_fund.manager_name,
            description: new_fund.description,
            nav: new_fund.nav,
            date_of_creation: new_fund.date_of_creation,
            performance: new_fund.performance,
        }
    }

    /// Replace the performance figure
    pub fn update_performance(&mut self, performance: f64) {
        self.performance = performance;
    }
}

impl std::fmt::Display for InvestmentFund {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fund({}, {}, {}, NAV: {}, Performance: {}%)",
            self.fund_id, self.name, self.manager_name, self.nav, self.performance
        )
    }
}

/// A validated fund that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewFund {
    pub name: String,
    pub manager_name: String,
    pub description: String,
    pub nav: f64,
    pub date_of_creation: NaiveDate,
    pub performance: f64,
}
