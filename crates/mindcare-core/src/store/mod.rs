//! In-memory entity stores.
//!
//! Each store owns one collection and exposes its mutations. Stores never
//! reach into each other; cross-store coordination lives in [`crate::app`].

mod appointments;
mod ledger;
mod patients;
mod records;

pub use appointments::*;
pub use ledger::*;
pub use patients::*;
pub use records::*;

use thiserror::Error;

use crate::models::ValidationError;

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Millisecond-timestamp id, bumped past `last` so ids stay strictly increasing.
pub(crate) fn next_timestamp_id(last: &mut i64) -> String {
    let now = chrono::Utc::now().timestamp_millis();
    *last = now.max(*last + 1);
    last.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_ids_increase() {
        let mut last = 0;
        let a: i64 = next_timestamp_id(&mut last).parse().unwrap();
        let b: i64 = next_timestamp_id(&mut last).parse().unwrap();
        assert!(b > a);

        let mut ahead = i64::MAX - 10;
        let c: i64 = next_timestamp_id(&mut ahead).parse().unwrap();
        assert_eq!(c, i64::MAX - 9);
    }
}
