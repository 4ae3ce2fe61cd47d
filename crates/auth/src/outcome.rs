//! Mapping denials to what a transport layer should answer.
//!
//! The core never builds responses. This only tells callers which status keeps
//! private content from leaking its existence.

use serde::Serialize;

use crate::{Denial, Operation};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDenied {
    /// No session at all (401).
    Unauthenticated,
    /// Authenticated but not allowed (403).
    Forbidden,
    /// Answer as if the resource did not exist (404).
    NotFound,
}

impl AccessDenied {
    /// Classify a denial.
    ///
    /// A non-member touching private content gets `NotFound`, so the answer looks the
    /// same as for a resource that does not exist. Creation targets a scope rather
    /// than a content item and is never concealed.
    pub fn classify(operation: Operation, denial: &Denial, resource_public: bool) -> Self {
        match denial {
            Denial::Unauthenticated => AccessDenied::Unauthenticated,
            Denial::NotMember if operation != Operation::Create && !resource_public => {
                AccessDenied::NotFound
            }
            Denial::NotMember
            | Denial::InsufficientRole { .. }
            | Denial::NotAuthor
            | Denial::SystemAdminOnly => AccessDenied::Forbidden,
        }
    }

    pub fn status_code(self) -> u16 {
        match self {
            AccessDenied::Unauthenticated => 401,
            AccessDenied::Forbidden => 403,
            AccessDenied::NotFound => 404,
        }
    }
}
