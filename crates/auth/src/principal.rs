use chrono::{DateTime, Utc};
use serde::Serialize;

use plannr_core::UserId;

use crate::claims::{IdentityClaims, TokenValidationError, validate_claims};

/// The authenticated actor for one request.
///
/// Built once per request and immutable afterwards. The system-admin flag comes from
/// the stored account record, never from the token and never from a profile update;
/// the only writes to it are [`crate::admin::grant_system_admin`] and
/// [`crate::admin::revoke_system_admin`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Principal {
    id: UserId,
    is_system_admin: bool,
}

impl Principal {
    /// Principal for an already-authenticated user whose stored admin flag is known.
    pub fn new(id: UserId, is_system_admin: bool) -> Self {
        Self { id, is_system_admin }
    }

    /// Regular (non-admin) principal.
    pub fn user(id: UserId) -> Self {
        Self::new(id, false)
    }

    /// Validate verified identity claims and bind them to the account's admin flag.
    pub fn from_claims(
        claims: &IdentityClaims,
        is_system_admin: bool,
        now: DateTime<Utc>,
    ) -> Result<Self, TokenValidationError> {
        validate_claims(claims, now)?;
        Ok(Self::new(claims.sub, is_system_admin))
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn is_system_admin(&self) -> bool {
        self.is_system_admin
    }
}

impl core::fmt::Display for Principal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.id, f)
    }
}
