use thiserror::Error;

/// Shown whenever the service fails without a usable `{detail}` body.
pub const GENERIC_SERVICE_FAILURE: &str = "An unexpected error occurred.";

/// Uniform failure shape for every remote call. Controllers store these in
/// terminal error states and never branch on transport detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Service { message: String },
    /// Distinguishable not-found outcome (e.g. fetching or deleting an
    /// already-removed submission).
    #[error("{message}")]
    NotFound { message: String },
    /// A 2xx analysis body that violates the both-halves-present invariant.
    #[error("analysis data incomplete")]
    MalformedAnalysis,
}

impl ServiceError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<shared::protocol::MalformedAnalysis> for ServiceError {
    fn from(_: shared::protocol::MalformedAnalysis) -> Self {
        Self::MalformedAnalysis
    }
}
