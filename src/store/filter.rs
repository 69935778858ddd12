//! Filter, sort, and projection evaluation over JSON documents.
//!
//! A [`Filter`] is a conjunction of clauses; the operator set covers
//! exactly what the HTTP surface produces: exact match and
//! greater-or-equal range checks.

use serde_json::Value;

/// Comparison operator for a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseOp {
    /// Equals
    Eq,
    /// Greater than or equal (numeric or lexicographic)
    Gte,
}

/// A single field comparison
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: ClauseOp,
    pub value: Value,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: ClauseOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, ClauseOp::Eq, value)
    }

    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, ClauseOp::Gte, value)
    }

    /// Check whether a document satisfies this clause.
    ///
    /// A document missing the field never matches.
    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = match doc.get(&self.field) {
            Some(v) => v,
            None => return false,
        };

        match self.op {
            ClauseOp::Eq => field_value == &self.value,
            ClauseOp::Gte => compare_values(field_value, &self.value)
                .map(|ord| ord != std::cmp::Ordering::Less)
                .unwrap_or(false),
        }
    }
}

/// A set of clauses combined with AND logic. Empty = match everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|c| c.matches(doc))
    }
}

/// Sort order for a find
#[derive(Debug, Clone)]
pub struct SortOrder {
    pub field: String,
    pub ascending: bool,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    /// Sort documents in place by this order. Documents without the field
    /// (or with an uncomparable type pairing) keep their relative order.
    pub fn apply(&self, docs: &mut [Value]) {
        docs.sort_by(|a, b| {
            let cmp = match (a.get(&self.field), b.get(&self.field)) {
                (Some(av), Some(bv)) => {
                    compare_values(av, bv).unwrap_or(std::cmp::Ordering::Equal)
                }
                _ => std::cmp::Ordering::Equal,
            };
            if self.ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });
    }
}

/// Field projection for a find. The `id` field is always retained,
/// per store convention.
#[derive(Debug, Clone)]
pub struct Projection {
    pub fields: Vec<String>,
}

impl Projection {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Reduce a document to the projected fields plus `id`
    pub fn apply(&self, doc: Value) -> Value {
        match doc {
            Value::Object(obj) => {
                let reduced: serde_json::Map<String, Value> = obj
                    .into_iter()
                    .filter(|(k, _)| k == "id" || self.fields.iter().any(|f| f == k))
                    .collect();
                Value::Object(reduced)
            }
            other => other,
        }
    }
}

/// Order two JSON scalars. `None` for mixed or non-orderable types.
fn compare_values(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64()?;
            let b = b.as_f64()?;
            a.partial_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
