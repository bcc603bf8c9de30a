//! Dispatch error types
//!
//! Two tiers of failure cross this crate:
//!
//! 1. [`DispatchError`]: structural/argument errors (malformed envelope,
//!    missing sub-message, unset or mismatched discriminant) and store
//!    failures. These propagate to the caller as errors and are never
//!    converted into a success:false payload.
//! 2. Business outcomes: "named entity not found" and validation failures
//!    raised while a handler assembles a create/edit payload. These are
//!    caught at the handler boundary (see [`catch_business`]) and wrapped
//!    into a structured response with `success: false`.

use thiserror::Error;

use crate::envelope::ModuleKind;

/// Structural and infrastructure errors raised during dispatch
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Envelope carries no request payload
    #[error("request kind not set on envelope")]
    MissingRequest,

    /// Request kind has no registered handler
    #[error("unsupported request kind: {0}")]
    UnsupportedKind(ModuleKind),

    /// Required sub-message or discriminant is absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Discriminant value does not match the selected handler
    #[error("expected {expected} but got {actual}")]
    UnexpectedDiscriminant {
        expected: &'static str,
        actual: String,
    },

    /// Recognized message carrying an operation this module does not handle
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Entity store failure (infrastructure, not a business outcome)
    #[error(transparent)]
    Store(#[from] rmp_common::Error),
}

/// Split a store result at the handler boundary: `NotFound` and
/// `InvalidInput` become business outcomes (`Err(message)` in the inner
/// result); everything else stays a tier-1 error.
pub(crate) fn catch_business<T>(
    result: rmp_common::Result<T>,
) -> Result<std::result::Result<T, String>, DispatchError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(rmp_common::Error::NotFound(message)) => Ok(Err(message)),
        Err(rmp_common::Error::InvalidInput(message)) => Ok(Err(message)),
        Err(other) => Err(DispatchError::Store(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_becomes_business_outcome() {
        let caught =
            catch_business::<()>(Err(rmp_common::Error::NotFound("major named 'X'".into())))
                .expect("tier-2 errors do not propagate");
        assert_eq!(caught.unwrap_err(), "major named 'X'");
    }

    #[test]
    fn database_errors_stay_tier_one() {
        let result = catch_business::<()>(Err(rmp_common::Error::Internal("boom".into())));
        assert!(matches!(result, Err(DispatchError::Store(_))));
    }
}
