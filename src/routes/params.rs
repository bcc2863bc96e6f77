//! Query and path values arrive as raw strings and are parsed here so every
//! failure carries the same explicit message.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;

pub fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::InvalidParameter(format!("Required parameter {} is missing", name)))
}

pub fn parse_int(raw: &str) -> Result<i32> {
    raw.trim().parse().map_err(|_| {
        Error::InvalidParameter(format!(
            "Provided value ({}) could not be parsed as a valid integer",
            raw
        ))
    })
}

pub fn parse_double(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "Provided value ({}) could not be parsed as a valid double",
                raw
            ))
        })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidParameter(format!(
            "Provided value ({}) could not be parsed as a valid date, please use the yyyy-(m)m-(d)d format, for example 2000-1-9 or 2000-01-09",
            raw
        ))
    })
}

pub fn parse_status(raw: &str) -> Result<ApplicationStatus> {
    raw.parse::<ApplicationStatus>()
        .map_err(|e| Error::InvalidParameter(e.to_string()))
}

pub fn int_param(name: &str, value: Option<String>) -> Result<i32> {
    parse_int(&required(name, value)?)
}
