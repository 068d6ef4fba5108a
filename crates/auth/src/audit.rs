//! Audit trail for session lifecycle events.
//!
//! Sinks are collaborators: a failing sink is reported by the caller and
//! never changes an authentication outcome.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use thiserror::Error;

use signet_core::SubjectId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("audit sink failed: {0}")]
pub struct AuditError(pub String);

/// A recorded session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub name: &'static str,
    pub subject: Option<SubjectId>,
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    pub const LOGIN: &'static str = "login";
    pub const LOGOUT: &'static str = "logout";

    pub fn new(name: &'static str, subject: Option<SubjectId>, at: DateTime<Utc>) -> Self {
        Self { name, subject, at }
    }

    pub fn login(subject: SubjectId) -> Self {
        Self::new(Self::LOGIN, Some(subject), Utc::now())
    }

    pub fn logout(subject: Option<SubjectId>) -> Self {
        Self::new(Self::LOGOUT, subject, Utc::now())
    }
}

/// Destination for audit events.
pub trait AuditSink: Send + Sync + 'static {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError>;
}

/// Writes events to the `audit` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        match event.subject {
            Some(subject) => tracing::info!(
                target: "audit",
                event = event.name,
                subject_id = %subject,
                at = %event.at.to_rfc3339(),
                "session event"
            ),
            None => tracing::info!(
                target: "audit",
                event = event.name,
                at = %event.at.to_rfc3339(),
                "session event"
            ),
        }
        Ok(())
    }
}

/// In-memory sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    inner: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<AuditEvent> {
        match self.inner.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        self.inner
            .lock()
            .map_err(|_| AuditError("in-memory audit log poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}
