//! Rules for administering scopes themselves (workspaces and groups): reading,
//! updating, deleting, managing and leaving memberships.
//!
//! Unlike content creation, these honour the system-admin override, except for
//! leaving, which only makes sense for an actual member.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::authorize::require;
use crate::membership::{MembershipResolver, ScopeRef};
use crate::{AuthzError, Decision, Denial, Grant, PermissionResolver, Principal, Role};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeAction {
    ViewScope,
    UpdateScope,
    ManageMembers,
    DeleteScope,
    LeaveScope,
}

impl ScopeAction {
    pub fn minimum_role(self) -> Role {
        match self {
            ScopeAction::ViewScope | ScopeAction::LeaveScope => Role::Viewer,
            ScopeAction::UpdateScope | ScopeAction::ManageMembers => Role::Admin,
            ScopeAction::DeleteScope => Role::Owner,
        }
    }

    pub fn system_admin_bypass(self) -> bool {
        !matches!(self, ScopeAction::LeaveScope)
    }
}

impl<R: MembershipResolver> PermissionResolver<R> {
    /// Unknown scopes are `ScopeNotFound` for everyone, system admins included.
    pub fn check_administer(
        &self,
        principal: Option<&Principal>,
        scope: impl Into<ScopeRef>,
        action: ScopeAction,
    ) -> Result<Decision, AuthzError> {
        let scope = scope.into();
        let decision = match principal {
            None => Decision::Deny(Denial::Unauthenticated),
            Some(p) => {
                let role = self.memberships().role_of(p, scope)?;
                if p.is_system_admin() && action.system_admin_bypass() {
                    Decision::Allow(Grant::SystemAdmin)
                } else {
                    require(role, action.minimum_role())
                }
            }
        };
        debug!(
            ?action,
            %scope,
            principal = ?principal.map(Principal::id),
            allowed = decision.is_allowed(),
            reason = %decision.reason(),
            "scope administration decision"
        );
        Ok(decision)
    }

    pub fn can_administer(
        &self,
        principal: Option<&Principal>,
        scope: impl Into<ScopeRef>,
        action: ScopeAction,
    ) -> Result<bool, AuthzError> {
        Ok(self.check_administer(principal, scope, action)?.is_allowed())
    }

    /// Guard a membership write against privilege escalation.
    ///
    /// The actor needs [`ScopeAction::ManageMembers`]. Unless they are a system
    /// admin, they can neither hand out a role above their own nor touch a member who
    /// currently outranks them.
    pub fn check_assign_role(
        &self,
        actor: Option<&Principal>,
        scope: impl Into<ScopeRef>,
        target_current: Option<Role>,
        granted: Role,
    ) -> Result<Decision, AuthzError> {
        let scope = scope.into();
        let gate = self.check_administer(actor, scope, ScopeAction::ManageMembers)?;
        match (actor, gate) {
            (Some(actor), Decision::Allow(Grant::ScopeRole { role })) => {
                let ceiling = target_current.map_or(granted, |current| current.max(granted));
                let decision = require(Some(role), ceiling);
                if !decision.is_allowed() {
                    debug!(
                        actor = %actor,
                        %scope,
                        %granted,
                        "membership write blocked: would exceed actor's own role"
                    );
                }
                Ok(decision)
            }
            (_, gate) => Ok(gate),
        }
    }

    /// Removing someone else is a membership write at the target's current role.
    pub fn check_remove_member(
        &self,
        actor: Option<&Principal>,
        scope: impl Into<ScopeRef>,
        target_role: Role,
    ) -> Result<Decision, AuthzError> {
        self.check_assign_role(actor, scope, Some(target_role), Role::Viewer)
    }
}
