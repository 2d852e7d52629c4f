//! Admin report-console state.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use crate::net::types::{Id, Report, ReportStatus};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportsState {
    pub reports: Vec<Report>,
    /// `None` shows every report.
    pub filter: Option<ReportStatus>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ReportsState {
    pub fn replace(&mut self, reports: Vec<Report>) {
        self.reports = reports;
        self.loading = false;
        self.error = None;
    }

    /// Reports matching the current filter.
    pub fn visible(&self) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| self.filter.is_none_or(|status| r.status == status))
            .cloned()
            .collect()
    }

    /// Apply a status change. Returns the previous status for rollback.
    pub fn set_status(&mut self, report_id: Id, status: ReportStatus) -> Option<ReportStatus> {
        let report = self.reports.iter_mut().find(|r| r.report_id == report_id)?;
        Some(std::mem::replace(&mut report.status, status))
    }

    pub fn pending_count(&self) -> usize {
        self.reports.iter().filter(|r| r.status == ReportStatus::Pending).count()
    }
}
