//! Query translation for the product listing endpoint.
//!
//! Turns the recognized query-string parameters into a store filter, sort
//! order, and field projection. Unrecognized parameters are ignored;
//! recognized parameters with unusable values are rejected before the
//! store is consulted.

use std::collections::HashMap;

use serde_json::{json, Value};

use super::errors::{ApiError, ApiResult};
use crate::store::{Clause, Filter, Projection, SortOrder};

/// Translated listing query
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Filter,
    pub sort: Option<SortOrder>,
    pub projection: Option<Projection>,
}

impl ListQuery {
    /// Translate raw query parameters.
    ///
    /// | parameter  | effect                                            |
    /// |------------|---------------------------------------------------|
    /// | `category` | exact match on `category`                         |
    /// | `minPrice` | `price >= value`; non-numeric value is rejected   |
    /// | `sort`     | `price` orders ascending by price, else natural   |
    /// | `fields`   | comma-separated projection, id always retained    |
    pub fn parse(params: &HashMap<String, String>) -> ApiResult<Self> {
        let mut query = ListQuery::default();
        let mut filter = Filter::new();

        if let Some(category) = params.get("category") {
            filter = filter.and(Clause::eq("category", Value::String(category.clone())));
        }

        if let Some(raw) = params.get("minPrice") {
            let min_price = parse_min_price(raw)?;
            filter = filter.and(Clause::gte("price", json!(min_price)));
        }
        query.filter = filter;

        // Only price ordering is recognized; anything else keeps natural order
        if params.get("sort").map(String::as_str) == Some("price") {
            query.sort = Some(SortOrder::asc("price"));
        }

        if let Some(raw) = params.get("fields") {
            query.projection = Some(parse_fields(raw)?);
        }

        Ok(query)
    }
}

/// Parse `minPrice` as a finite non-NaN number. A value that does not
/// parse must never become a comparison operand.
fn parse_min_price(raw: &str) -> ApiResult<f64> {
    let parsed: f64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidQueryParam(format!("minPrice must be a number, got {raw:?}")))?;

    if !parsed.is_finite() {
        return Err(ApiError::InvalidQueryParam(
            "minPrice must be a finite number".to_string(),
        ));
    }

    Ok(parsed)
}

/// Parse the `fields` projection list (comma-separated, trimmed)
fn parse_fields(raw: &str) -> ApiResult<Projection> {
    let fields: Vec<String> = raw
        .split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if fields.is_empty() {
        return Err(ApiError::InvalidQueryParam(
            "fields must name at least one field".to_string(),
        ));
    }

    Ok(Projection::new(fields))
}
