//! Human-readable sequential identifiers.
//!
//! Registration numbers and employee ids are minted here, explicitly, by the
//! creation services before persistence. Counters are keyed per calendar
//! year and are global across tenants: the generated identifiers are
//! globally unique.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::database::store::{CounterRepo, Store, StoreError};

pub struct SequenceService {
    counters: Arc<dyn CounterRepo>,
}

impl SequenceService {
    pub fn new(store: &Store) -> Self {
        Self {
            counters: store.counters.clone(),
        }
    }

    /// Next student registration number, e.g. `SCH-2026-0001`
    pub async fn registration_no(&self) -> Result<String, StoreError> {
        let year = Utc::now().year();
        let key = format!("student-registration-{}", year);
        let seq = self.counters.next(&key).await?;
        Ok(format!("SCH-{}-{:04}", year, seq))
    }

    /// Next employee id, e.g. `EMP-2026-0001`
    pub async fn employee_id(&self) -> Result<String, StoreError> {
        let year = Utc::now().year();
        let key = format!("employee-id-{}", year);
        let seq = self.counters.next(&key).await?;
        Ok(format!("EMP-{}-{:04}", year, seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn registration_numbers_are_sequential() {
        let service = SequenceService::new(&Store::memory());
        let first = service.registration_no().await.unwrap();
        let second = service.registration_no().await.unwrap();
        assert!(first.starts_with("SCH-"));
        assert!(first.ends_with("-0001"));
        assert!(second.ends_with("-0002"));
    }

    #[tokio::test]
    async fn student_and_employee_counters_are_independent() {
        let store = Store::memory();
        let service = SequenceService::new(&store);
        service.registration_no().await.unwrap();
        let emp = service.employee_id().await.unwrap();
        assert!(emp.starts_with("EMP-"));
        assert!(emp.ends_with("-0001"));
    }

    #[tokio::test]
    async fn concurrent_issuance_yields_distinct_numbers() {
        let store = Store::memory();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                SequenceService::new(&store).registration_no().await
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            let number = handle.await.unwrap().unwrap();
            assert!(seen.insert(number), "duplicate sequence number issued");
        }
        assert_eq!(seen.len(), 16);
    }
}
