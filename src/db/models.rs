use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted row of the `readings` table.
///
/// A "sensor" is not its own entity — it exists only as the `name` shared
/// by the readings it produced.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// A reading before insertion, i.e. without a store-assigned id.
///
/// `timestamp: None` means "let the store stamp it with now()".
#[derive(Debug, Clone)]
pub struct NewReading {
    pub name: String,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Field-wise partial update. Only fields that are `Some` are written;
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ReadingPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ReadingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.timestamp.is_none()
    }
}
