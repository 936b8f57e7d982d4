use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{NewReading, Reading, ReadingPatch};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub id: i64,
    pub name: String,
    pub value: f64,
    /// RFC 3339 date-time.
    pub timestamp: DateTime<Utc>,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            id: r.id,
            name: r.name,
            value: r.value,
            timestamp: r.timestamp,
        }
    }
}

/// Request body for `POST /sensors`.
///
/// `id` is never accepted from the client; an omitted `timestamp` is
/// assigned by the store at insertion time.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReadingRequest {
    pub name: String,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<CreateReadingRequest> for NewReading {
    fn from(req: CreateReadingRequest) -> Self {
        Self {
            name: req.name,
            value: req.value,
            timestamp: req.timestamp,
        }
    }
}

/// Request body for `PUT /sensors/{id}` — a complete reading.
///
/// Every field is overwritten, never merged: leaving out `timestamp`
/// replaces the stored one with the current time. A stray `id` field in
/// the body is ignored; the path parameter is authoritative.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceReadingRequest {
    pub name: String,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Request body for `PATCH /sensors/{id}`.
///
/// Each field is independently optional; only fields present in the JSON
/// body are applied. `{}` is a valid no-op patch.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchReadingRequest {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<PatchReadingRequest> for ReadingPatch {
    fn from(req: PatchReadingRequest) -> Self {
        Self {
            name: req.name,
            value: req.value,
            timestamp: req.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_missing_timestamp() {
        let req: CreateReadingRequest =
            serde_json::from_str(r#"{"name": "Sensor-1", "value": 23.5}"#).unwrap();
        assert_eq!(req.name, "Sensor-1");
        assert_eq!(req.value, 23.5);
        assert!(req.timestamp.is_none());
    }

    #[test]
    fn create_request_rejects_non_numeric_value() {
        let err = serde_json::from_str::<CreateReadingRequest>(
            r#"{"name": "Sensor-1", "value": "hot"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn create_request_rejects_missing_name() {
        let err = serde_json::from_str::<CreateReadingRequest>(r#"{"value": 1.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn patch_request_distinguishes_absent_fields() {
        let req: PatchReadingRequest = serde_json::from_str(r#"{"value": 250.0}"#).unwrap();
        assert!(req.name.is_none());
        assert_eq!(req.value, Some(250.0));
        assert!(req.timestamp.is_none());

        let empty: PatchReadingRequest = serde_json::from_str("{}").unwrap();
        let patch: ReadingPatch = empty.into();
        assert!(patch.is_empty());
    }

    #[test]
    fn replace_request_ignores_stray_id() {
        let req: ReplaceReadingRequest = serde_json::from_str(
            r#"{"id": 42, "name": "Sensor-1", "value": 150.0, "timestamp": "2025-03-07T16:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.name, "Sensor-1");
        assert_eq!(req.value, 150.0);
        assert!(req.timestamp.is_some());
    }
}
