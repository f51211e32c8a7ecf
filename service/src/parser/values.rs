//! Parsing of scalar column values: multiplicities and timestamps

use chrono::{NaiveDate, NaiveDateTime};
use cim_linkml_core::error::{CimLinkMLError, Result, ValueKind};
use cim_linkml_core::uml::{Cardinality, CardinalityValue};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse one end of a multiplicity.
///
/// Absent or empty means `0`, `*` and `n` mean unbounded, anything else must
/// be a non-negative integer.
///
/// # Errors
///
/// Returns [`CimLinkMLError::InvalidValue`] for a token that is none of the above.
pub fn parse_cardinality_value(value: Option<&str>) -> Result<CardinalityValue> {
    match value.map(str::trim) {
        None | Some("") => Ok(CardinalityValue::Bounded(0)),
        Some("*" | "n") => Ok(CardinalityValue::Unbounded),
        Some(token) => token
            .parse::<u32>()
            .map(CardinalityValue::Bounded)
            .map_err(|_| CimLinkMLError::invalid_value(ValueKind::Cardinality, token)),
    }
}

/// Parse a relation-end multiplicity such as `0..1`, `1..*` or `1`.
///
/// A single token `k` means `k..k`; a single `*` means `0..*`.
///
/// # Errors
///
/// Returns [`CimLinkMLError::InvalidValue`] for malformed bounds or an
/// unbounded lower bound.
pub fn parse_cardinality(value: Option<&str>) -> Result<Cardinality> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Cardinality::default());
    };

    let cardinality = match value.split_once("..") {
        Some((lower, upper)) => Cardinality {
            lower_bound: parse_cardinality_value(Some(lower))?,
            upper_bound: parse_cardinality_value(Some(upper))?,
        },
        None => match parse_cardinality_value(Some(value))? {
            CardinalityValue::Unbounded => Cardinality {
                lower_bound: CardinalityValue::Bounded(0),
                upper_bound: CardinalityValue::Unbounded,
            },
            bounded => Cardinality {
                lower_bound: bounded,
                upper_bound: bounded,
            },
        },
    };

    if cardinality.lower_bound == CardinalityValue::Unbounded {
        return Err(CimLinkMLError::invalid_value(ValueKind::Cardinality, value));
    }
    Ok(cardinality)
}

/// Parse an export timestamp.
///
/// An absent value is unknown; the current local time stands in for it.
///
/// # Errors
///
/// Returns a parse error for a value in none of the accepted formats.
pub fn parse_datetime(value: Option<&str>) -> Result<NaiveDateTime> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(chrono::Local::now().naive_local());
    };

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CimLinkMLError::parse(format!("invalid timestamp '{value}'")))
}
