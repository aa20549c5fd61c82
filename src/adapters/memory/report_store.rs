//! In-memory report store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ReportId, UserId};
use crate::domain::report::ValidationReport;
use crate::ports::ReportStore;

#[derive(Default)]
pub struct InMemoryReportStore {
    /// Reports by id, plus insertion order for newest-first listings.
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    reports: HashMap<ReportId, ValidationReport>,
    order: Vec<ReportId>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, report: &ValidationReport) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().expect("report store lock poisoned");
        if inner.reports.contains_key(&report.id) {
            return Err(DomainError::persistence(format!(
                "report {} already exists",
                report.id
            )));
        }
        inner.reports.insert(report.id, report.clone());
        inner.order.push(report.id);
        Ok(())
    }

    async fn get(&self, id: ReportId) -> Result<Option<ValidationReport>, DomainError> {
        let inner = self.inner.lock().expect("report store lock poisoned");
        Ok(inner.reports.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ValidationReport>, DomainError> {
        let inner = self.inner.lock().expect("report store lock poisoned");
        Ok(inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.reports.get(id))
            .filter(|r| &r.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
