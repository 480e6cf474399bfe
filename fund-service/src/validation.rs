//! Validation of incoming fund payloads
//!
//! Payloads arrive as loosely typed JSON. Numeric fields accept JSON numbers
//! as well as strings holding a number, so `"nav": "500000"` and
//! `"nav": 500000` are equivalent.

use chrono::NaiveDate;
use common::error::{Error, Result};
use common::model::fund::{NewFund, DATE_FORMAT};
use serde_json::{Map, Value};

/// Fields a create payload must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "manager_name", "description", "nav", "performance"];

const NUMBER_REASON: &str = "NAV and performance must be numbers";

/// Validate a create payload
///
/// `today` is used as the creation date when the payload does not carry one.
/// All missing fields are reported together before any type is checked.
pub fn parse_new_fund(payload: &Value, today: NaiveDate) -> Result<NewFund> {
    let object = as_object(payload)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| is_missing(object.get(**field)))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingFields(missing));
    }

    let date_of_creation = match object.get("date_of_creation") {
        None | Some(Value::Null) => today,
        Some(value) => parse_date("date_of_creation", value)?,
    };

    Ok(NewFund {
        name: parse_text("name", &object["name"])?,
        manager_name: parse_text("manager_name", &object["manager_name"])?,
        description: parse_text("description", &object["description"])?,
        nav: parse_number("nav", &object["nav"])?,
        date_of_creation,
        performance: parse_number("performance", &object["performance"])?,
    })
}

/// Validate an update payload and extract the new performance figure
///
/// Every other key in the payload is ignored.
pub fn parse_performance_update(payload: &Value) -> Result<f64> {
    let object = as_object(payload)?;

    match object.get("performance") {
        Some(value) if !is_missing(Some(value)) => parse_number("performance", value),
        _ => Err(Error::MissingFields(vec!["performance".to_string()])),
    }
}

/// Parse a number from a JSON number or a numeric string
pub fn parse_number(field: &str, value: &Value) -> Result<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| Error::invalid_field(field, NUMBER_REASON))
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| Error::ValidationError("Request body must be a JSON object".to_string()))
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_text(field: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| Error::invalid_field(field, "must be a string"))
}

fn parse_date(field: &str, value: &Value) -> Result<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
        .ok_or_else(|| Error::invalid_field(field, "must be a date in YYYY-MM-DD format"))
}
