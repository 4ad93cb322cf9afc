//! Record entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single measurement tracked by a user.
///
/// The owner column is never serialized; records are always returned in the
/// context of the session that owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Record {
    /// Random UUID assigned at creation.
    pub id: String,
    /// Series name, stored upper-cased.
    pub name: String,
    /// Measurement time in milliseconds since the Unix epoch.
    pub time: i64,
    /// Measured value.
    pub value: f64,
}

/// Data required to create a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecord {
    /// Series name as submitted.
    pub name: String,
    /// Measurement time in milliseconds since the Unix epoch.
    pub time: i64,
    /// Measured value.
    pub value: f64,
}

impl CreateRecord {
    /// Build the row to insert: fresh id, upper-cased name.
    pub fn into_record(self) -> Record {
        Record {
            id: Uuid::new_v4().to_string(),
            name: self.name.to_uppercase(),
            time: self.time,
            value: self.value,
        }
    }
}
