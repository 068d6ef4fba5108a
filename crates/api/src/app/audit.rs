use std::sync::Arc;

use signet_auth::{AuditEvent, AuditSink};

/// Record `event` off the request path.
///
/// Sinks are synchronous and may block, so they run on the blocking pool.
/// A failing sink is logged and otherwise ignored.
pub fn dispatch(sink: &Arc<dyn AuditSink>, event: AuditEvent) {
    let sink = Arc::clone(sink);
    tokio::task::spawn_blocking(move || {
        if let Err(e) = sink.record(&event) {
            tracing::warn!(event = event.name, "audit record failed: {e}");
        }
    });
}
