//! Record validation for create and update bodies.
//!
//! Each endpoint deserializes into its own typed input struct, then
//! validation runs field-by-field before any store call. Strings are
//! trimmed before storage; numbers must be finite and non-negative.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::errors::{ApiError, ApiResult};

// ==================
// Products
// ==================

/// Create-product body: all three fields required
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub category: Option<Value>,
}

impl CreateProduct {
    /// Validate and build the document to insert (without id/createdAt)
    pub fn into_document(self) -> ApiResult<Value> {
        let name = required_trimmed_string("name", self.name)?;
        let price = required_price(self.price)?;
        let category = required_trimmed_string("category", self.category)?;

        Ok(json!({
            "name": name,
            "price": price,
            "category": category,
        }))
    }
}

/// Update-product body: partial, at least one field supplied
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub category: Option<Value>,
}

impl UpdateProduct {
    /// Validate and build the fields-to-set document.
    ///
    /// Each supplied field is checked by the create rules; unsupplied
    /// fields are left untouched by the store.
    pub fn into_fields_to_set(self) -> ApiResult<Value> {
        let mut fields = Map::new();

        if let Some(raw) = self.name {
            fields.insert("name".into(), json!(trimmed_string("name", raw)?));
        }
        if let Some(raw) = self.price {
            fields.insert("price".into(), price_value(raw)?);
        }
        if let Some(raw) = self.category {
            fields.insert("category".into(), json!(trimmed_string("category", raw)?));
        }

        if fields.is_empty() {
            return Err(ApiError::InvalidBody(
                "at least one of name, price, category must be supplied".to_string(),
            ));
        }

        Ok(Value::Object(fields))
    }
}

// ==================
// Items (user-profile shape)
// ==================

/// Create-item body: username, email, age all required
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub username: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
}

impl CreateItem {
    pub fn into_document(self) -> ApiResult<Value> {
        let username = required_trimmed_string("username", self.username)?;
        let email = required_trimmed_string("email", self.email)?;
        let age = required_age(self.age)?;

        Ok(json!({
            "username": username,
            "email": email,
            "age": age,
        }))
    }
}

/// Replace-item body (PUT): full shape, every field required
pub type ReplaceItem = CreateItem;

/// Patch-item body (PATCH): partial, at least one field supplied
#[derive(Debug, Deserialize)]
pub struct PatchItem {
    pub username: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
}

impl PatchItem {
    pub fn into_fields_to_set(self) -> ApiResult<Value> {
        let mut fields = Map::new();

        if let Some(raw) = self.username {
            fields.insert("username".into(), json!(trimmed_string("username", raw)?));
        }
        if let Some(raw) = self.email {
            fields.insert("email".into(), json!(trimmed_string("email", raw)?));
        }
        if let Some(raw) = self.age {
            fields.insert("age".into(), age_value(raw)?);
        }

        if fields.is_empty() {
            return Err(ApiError::InvalidBody(
                "at least one of username, email, age must be supplied".to_string(),
            ));
        }

        Ok(Value::Object(fields))
    }
}

// ==================
// Field rules
// ==================

fn required_trimmed_string(field: &str, value: Option<Value>) -> ApiResult<String> {
    let value = value.ok_or_else(|| ApiError::InvalidBody(format!("{field} is required")))?;
    trimmed_string(field, value)
}

fn trimmed_string(field: &str, value: Value) -> ApiResult<String> {
    let Value::String(s) = value else {
        return Err(ApiError::InvalidBody(format!("{field} must be a string")));
    };

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidBody(format!("{field} must not be empty")));
    }

    Ok(trimmed.to_string())
}

fn required_price(value: Option<Value>) -> ApiResult<Value> {
    let value = value.ok_or_else(|| ApiError::InvalidBody("price is required".to_string()))?;
    price_value(value)
}

fn price_value(value: Value) -> ApiResult<Value> {
    non_negative_number("price", value)
}

fn required_age(value: Option<Value>) -> ApiResult<Value> {
    let value = value.ok_or_else(|| ApiError::InvalidBody("age is required".to_string()))?;
    age_value(value)
}

fn age_value(value: Value) -> ApiResult<Value> {
    non_negative_number("age", value)
}

/// Validate a number field, returning the caller's original JSON value so
/// integer representations survive storage unchanged.
fn non_negative_number(field: &str, value: Value) -> ApiResult<Value> {
    let number = value
        .as_f64()
        .ok_or_else(|| ApiError::InvalidBody(format!("{field} must be a number")))?;

    if !number.is_finite() || number < 0.0 {
        return Err(ApiError::InvalidBody(format!(
            "{field} must be a non-negative number"
        )));
    }

    Ok(value)
}
