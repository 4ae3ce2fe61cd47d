//! The only write path for the platform-wide system-admin flag.
//!
//! Grants and revokes are themselves gated on the actor already being a system
//! admin. The result is a change record for the caller to persist; nothing here
//! mutates a [`Principal`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use plannr_core::UserId;

use crate::{AuthzError, Principal};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemAdminChange {
    pub target: UserId,
    /// New value of the flag.
    pub granted: bool,
    pub changed_by: UserId,
    pub occurred_at: DateTime<Utc>,
}

pub fn grant_system_admin(
    actor: Option<&Principal>,
    target: UserId,
    now: DateTime<Utc>,
) -> Result<SystemAdminChange, AuthzError> {
    let actor = ensure_system_admin(actor)?;
    info!(actor = %actor.id(), target = %target, "system admin granted");
    Ok(SystemAdminChange {
        target,
        granted: true,
        changed_by: actor.id(),
        occurred_at: now,
    })
}

/// An admin cannot revoke their own flag; another admin has to do it.
pub fn revoke_system_admin(
    actor: Option<&Principal>,
    target: UserId,
    now: DateTime<Utc>,
) -> Result<SystemAdminChange, AuthzError> {
    let actor = ensure_system_admin(actor)?;
    if actor.id() == target {
        return Err(AuthzError::Forbidden(
            "system admins cannot revoke their own privilege".to_string(),
        ));
    }
    info!(actor = %actor.id(), target = %target, "system admin revoked");
    Ok(SystemAdminChange {
        target,
        granted: false,
        changed_by: actor.id(),
        occurred_at: now,
    })
}

fn ensure_system_admin(actor: Option<&Principal>) -> Result<&Principal, AuthzError> {
    let actor = actor.ok_or(AuthzError::Unauthenticated)?;
    if !actor.is_system_admin() {
        return Err(AuthzError::Forbidden(
            "only system admins can change system-admin status".to_string(),
        ));
    }
    Ok(actor)
}
