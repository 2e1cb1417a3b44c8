//! Development error reporting.
//!
//! Drivers call into a [`DiagnosticSink`] whenever a caller violates an API
//! precondition. The sink decides what to do with the report: the drivers
//! themselves never treat a report as fatal.

use crate::std_types::{ErrorId, InstanceId, ModuleId, ServiceId};
use heapless::Vec;

/// One development error report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DetReport {
    pub module_id: ModuleId,
    pub instance_id: InstanceId,
    pub service_id: ServiceId,
    pub error_id: ErrorId,
}

/// Receiver of development error reports.
pub trait DiagnosticSink {
    /// Record that `service_id` of the given module instance rejected a call
    /// with `error_id`.
    fn report_error(
        &mut self,
        module_id: ModuleId,
        instance_id: InstanceId,
        service_id: ServiceId,
        error_id: ErrorId,
    );
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &mut D {
    fn report_error(
        &mut self,
        module_id: ModuleId,
        instance_id: InstanceId,
        service_id: ServiceId,
        error_id: ErrorId,
    ) {
        (**self).report_error(module_id, instance_id, service_id, error_id);
    }
}

/// Sink that forwards every report to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report_error(
        &mut self,
        module_id: ModuleId,
        instance_id: InstanceId,
        service_id: ServiceId,
        error_id: ErrorId,
    ) {
        log::error!(
            "det: module {} instance {} service {:#04x} error {:#04x}",
            module_id,
            instance_id,
            service_id,
            error_id
        );
    }
}

/// Sink that keeps the `N` most recent reports in memory.
///
/// Older reports are discarded once the buffer is full; [`DetLog::total`]
/// still counts them.
#[derive(Debug)]
pub struct DetLog<const N: usize> {
    reports: Vec<DetReport, N>,
    total: usize,
}

impl<const N: usize> DetLog<N> {
    pub const fn new() -> Self {
        Self {
            reports: Vec::new(),
            total: 0,
        }
    }

    /// Retained reports, oldest first.
    pub fn reports(&self) -> &[DetReport] {
        &self.reports
    }

    /// Most recent report, if any.
    pub fn last(&self) -> Option<&DetReport> {
        self.reports.last()
    }

    /// Number of reports received since creation or the last [`clear`](Self::clear).
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of retained reports carrying `error_id`.
    pub fn count_of(&self, error_id: ErrorId) -> usize {
        self.reports
            .iter()
            .filter(|r| r.error_id == error_id)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn clear(&mut self) {
        self.reports.clear();
        self.total = 0;
    }
}

impl<const N: usize> Default for DetLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DiagnosticSink for DetLog<N> {
    fn report_error(
        &mut self,
        module_id: ModuleId,
        instance_id: InstanceId,
        service_id: ServiceId,
        error_id: ErrorId,
    ) {
        let report = DetReport {
            module_id,
            instance_id,
            service_id,
            error_id,
        };

        if N == 0 {
            self.total += 1;
            return;
        }
        if self.reports.is_full() {
            self.reports.remove(0);
        }
        // Cannot fail: a slot was freed above.
        let _ = self.reports.push(report);
        self.total += 1;
    }
}
