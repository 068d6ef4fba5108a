use signet_core::SubjectId;

/// Session context for a request (the verified subject).
///
/// Inserted by [`require_session`](crate::middleware::require_session); only
/// present on routes behind it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    subject_id: SubjectId,
}

impl SessionContext {
    pub fn new(subject_id: SubjectId) -> Self {
        Self { subject_id }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }
}
