use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::Span;

/// Scoped diagnostics for one handler operation.
///
/// Creating the scope opens a tracing span and logs the start; dropping it
/// logs the elapsed time and closes the span. An operation that returned (with
/// a value or an error) calls [`MonitoredScope::complete`] first; a scope
/// dropped without it was cancelled mid-await or unwound, and is logged as
/// aborted. The span is not entered here since the guard lives across
/// `.await` points; instrument the async body with [`MonitoredScope::span`].
pub struct MonitoredScope {
    name: String,
    start_time: Instant,
    span: Span,
    completed: AtomicBool,
}

impl MonitoredScope {
    pub fn new(name: &str) -> Self {
        let span = tracing::info_span!("monitored_scope", scope = %name);
        tracing::debug!(parent: &span, "▶️ Code execution scope started: {}", name);

        Self {
            name: name.to_string(),
            start_time: Instant::now(),
            span,
            completed: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn complete(&self) {
        self.completed.store(true, Ordering::Relaxed);
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn log_info(&self, message: &str) {
        tracing::info!(parent: &self.span, "{}: {}", self.name, message);
    }

    pub fn log_debug(&self, message: &str) {
        tracing::debug!(parent: &self.span, "{}: {}", self.name, message);
    }
}

impl Drop for MonitoredScope {
    fn drop(&mut self) {
        if std::thread::panicking() || !self.is_completed() {
            tracing::warn!(
                parent: &self.span,
                "⏹️ Code execution scope aborted: {} after {:?}",
                self.name,
                self.start_time.elapsed()
            );
        } else {
            tracing::debug!(
                parent: &self.span,
                "⏹️ Code execution scope ended: {} ({:?})",
                self.name,
                self.start_time.elapsed()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_reports_name_and_elapsed() {
        let scope = MonitoredScope::new("Site Header");
        assert_eq!(scope.name(), "Site Header");
        std::thread::sleep(Duration::from_millis(5));
        assert!(scope.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_scope_released_on_error_path() {
        fn failing() -> Result<(), String> {
            let _scope = MonitoredScope::new("failing");
            Err("boom".to_string())
        }

        assert!(failing().is_err());
        // Nested scopes must unwind cleanly after an early return
        let outer = MonitoredScope::new("outer");
        {
            let _inner = MonitoredScope::new("inner");
        }
        assert_eq!(outer.name(), "outer");
    }

    #[test]
    fn test_complete_marks_scope() {
        let scope = MonitoredScope::new("Site Header");
        assert!(!scope.is_completed());
        scope.complete();
        assert!(scope.is_completed());
    }

    // Reports whether the wrapped scope was completed at the moment it is dropped
    struct DropReport {
        scope: MonitoredScope,
        report: Option<tokio::sync::oneshot::Sender<bool>>,
    }

    impl Drop for DropReport {
        fn drop(&mut self) {
            if let Some(tx) = self.report.take() {
                let _ = tx.send(self.scope.is_completed());
            }
        }
    }

    async fn operation(report: tokio::sync::oneshot::Sender<bool>, wait: Duration) {
        let guard = DropReport {
            scope: MonitoredScope::new("Site Header"),
            report: Some(report),
        };
        tokio::time::sleep(wait).await;
        guard.scope.complete();
    }

    #[tokio::test]
    async fn test_cancelled_operation_drops_incomplete_scope() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), operation(tx, Duration::from_secs(60)))
                .await;

        assert!(outcome.is_err());
        assert_eq!(rx.await, Ok(false));
    }

    #[tokio::test]
    async fn test_finished_operation_drops_completed_scope() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        operation(tx, Duration::from_millis(1)).await;

        assert_eq!(rx.await, Ok(true));
    }
}
