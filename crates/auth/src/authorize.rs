use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use plannr_core::{ContentId, WorkspaceId};

use crate::membership::{MembershipError, MembershipResolver, ScopeRef};
use crate::ownership::is_owner;
use crate::roles::satisfies;
use crate::visibility::is_publicly_viewable;
use crate::{ContentResource, Principal, Role};

/// Operations guarded on content.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    View,
    Create,
    Edit,
    Delete,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Operation::View => "view",
            Operation::Create => "create",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        })
    }
}

/// Why an operation was allowed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grant {
    /// The content is public.
    PublicVisibility,
    /// Platform-wide override.
    SystemAdmin,
    /// The principal's role in the scope was high enough on its own.
    ScopeRole { role: Role },
    /// The principal authored the content and still holds `role` in its workspace.
    Authorship { role: Role },
    /// The principal wrote the record; no scope role is involved.
    Author,
}

/// Why an operation was denied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// No principal on a request that needs one.
    Unauthenticated,
    /// The principal holds no role in the scope.
    NotMember,
    /// The principal's role ranks below what the operation needs.
    InsufficientRole { role: Role, required: Role },
    /// Only the record's author (or a system admin) may do this.
    NotAuthor,
    /// Reserved for system admins.
    SystemAdminOnly,
}

/// Outcome of one authorization check. A deny is a normal result, not an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow(Grant),
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    pub fn grant(&self) -> Option<Grant> {
        match self {
            Decision::Allow(grant) => Some(*grant),
            Decision::Deny(_) => None,
        }
    }

    pub fn denial(&self) -> Option<Denial> {
        match self {
            Decision::Allow(_) => None,
            Decision::Deny(denial) => Some(*denial),
        }
    }

    /// Human-readable explanation, suitable for audit logs.
    pub fn reason(&self) -> String {
        match self {
            Decision::Allow(Grant::PublicVisibility) => "content is public".to_string(),
            Decision::Allow(Grant::SystemAdmin) => "principal is a system admin".to_string(),
            Decision::Allow(Grant::ScopeRole { role }) => format!("principal holds role '{role}'"),
            Decision::Allow(Grant::Authorship { role }) => {
                format!("principal authored the content and holds role '{role}'")
            }
            Decision::Allow(Grant::Author) => "principal authored the record".to_string(),
            Decision::Deny(Denial::Unauthenticated) => "no authenticated principal".to_string(),
            Decision::Deny(Denial::NotMember) => {
                "principal is not a member of the scope".to_string()
            }
            Decision::Deny(Denial::InsufficientRole { role, required }) => {
                format!("role '{role}' is below the required '{required}'")
            }
            Decision::Deny(Denial::NotAuthor) => "principal is not the author".to_string(),
            Decision::Deny(Denial::SystemAdminOnly) => "requires a system admin".to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The requested scope does not exist (a client error, e.g. 404).
    #[error("{0} not found")]
    ScopeNotFound(ScopeRef),

    /// Content (or another workspace-owned record) points at a workspace that does not
    /// exist (a data-integrity fault).
    #[error("malformed reference: referenced workspace {workspace_id} does not exist")]
    MalformedReference {
        content_id: Option<ContentId>,
        workspace_id: WorkspaceId,
    },

    /// An administrative write was attempted without a principal.
    #[error("authentication required")]
    Unauthenticated,

    /// An administrative write was attempted by a principal lacking the privilege.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl From<MembershipError> for AuthzError {
    fn from(value: MembershipError) -> Self {
        match value {
            MembershipError::ScopeNotFound(scope) => AuthzError::ScopeNotFound(scope),
        }
    }
}

/// Minimum-role rule as a decision.
pub(crate) fn require(role: Option<Role>, minimum: Role) -> Decision {
    match role {
        Some(r) if satisfies(Some(r), minimum) => Decision::Allow(Grant::ScopeRole { role: r }),
        Some(r) => Decision::Deny(Denial::InsufficientRole {
            role: r,
            required: minimum,
        }),
        None => Decision::Deny(Denial::NotMember),
    }
}

/// Decides view/create/edit/delete for a principal against content or a scope.
///
/// - No IO
/// - No panics
/// - No mutation: the membership snapshot is only read
///
/// Rules are evaluated in a fixed order and the first match wins.
#[derive(Debug, Clone)]
pub struct PermissionResolver<R> {
    memberships: R,
}

impl<R: MembershipResolver> PermissionResolver<R> {
    pub fn new(memberships: R) -> Self {
        Self { memberships }
    }

    pub fn memberships(&self) -> &R {
        &self.memberships
    }

    /// Raw role lookup, e.g. for rendering UI affordances.
    pub fn role_of(
        &self,
        principal: &Principal,
        scope: impl Into<ScopeRef>,
    ) -> Result<Option<Role>, AuthzError> {
        Ok(self.memberships.role_of(principal, scope.into())?)
    }

    pub fn check_view<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<Decision, AuthzError> {
        let decision = if is_publicly_viewable(content) {
            Decision::Allow(Grant::PublicVisibility)
        } else if let Some(p) = principal {
            require(self.content_role(p, content)?, Role::Viewer)
        } else {
            Decision::Deny(Denial::Unauthenticated)
        };
        Ok(record(Operation::View, principal, decision))
    }

    /// Content creation inside `target`.
    ///
    /// The system-admin override does not apply here: admins create content through
    /// their own membership like everyone else.
    pub fn check_create(
        &self,
        principal: Option<&Principal>,
        target: impl Into<ScopeRef>,
    ) -> Result<Decision, AuthzError> {
        let target = target.into();
        let decision = match principal {
            None => Decision::Deny(Denial::Unauthenticated),
            Some(p) => require(self.memberships.role_of(p, target)?, Role::Editor),
        };
        Ok(record(Operation::Create, principal, decision))
    }

    pub fn check_edit<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<Decision, AuthzError> {
        let decision = match principal {
            None => Decision::Deny(Denial::Unauthenticated),
            Some(p) if p.is_system_admin() => Decision::Allow(Grant::SystemAdmin),
            Some(p) => {
                let role = self.content_role(p, content)?;
                match require(role, Role::Admin) {
                    allowed @ Decision::Allow(_) => allowed,
                    // Authors keep edit rights only while they still have editor
                    // standing in the owning workspace.
                    _ if is_owner(Some(p), content) => match role {
                        Some(r) if r.at_least(Role::Editor) => {
                            Decision::Allow(Grant::Authorship { role: r })
                        }
                        _ => require(role, Role::Editor),
                    },
                    denied => denied,
                }
            }
        };
        Ok(record(Operation::Edit, principal, decision))
    }

    /// Deletion needs workspace-admin standing or the system-admin override.
    /// Authorship never suffices.
    pub fn check_delete<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<Decision, AuthzError> {
        let decision = match principal {
            None => Decision::Deny(Denial::Unauthenticated),
            Some(p) if p.is_system_admin() => Decision::Allow(Grant::SystemAdmin),
            Some(p) => require(self.content_role(p, content)?, Role::Admin),
        };
        Ok(record(Operation::Delete, principal, decision))
    }

    /// Dispatch on `operation`. `Create` checks the content's own workspace as the
    /// target scope (e.g. validating a draft before it is persisted).
    pub fn check<C: ContentResource + ?Sized>(
        &self,
        operation: Operation,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<Decision, AuthzError> {
        match operation {
            Operation::View => self.check_view(principal, content),
            Operation::Create => self.check_create(principal, content.workspace_id()),
            Operation::Edit => self.check_edit(principal, content),
            Operation::Delete => self.check_delete(principal, content),
        }
    }

    pub fn can_view<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<bool, AuthzError> {
        Ok(self.check_view(principal, content)?.is_allowed())
    }

    pub fn can_create(
        &self,
        principal: Option<&Principal>,
        target: impl Into<ScopeRef>,
    ) -> Result<bool, AuthzError> {
        Ok(self.check_create(principal, target)?.is_allowed())
    }

    pub fn can_edit<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<bool, AuthzError> {
        Ok(self.check_edit(principal, content)?.is_allowed())
    }

    pub fn can_delete<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Result<bool, AuthzError> {
        Ok(self.check_delete(principal, content)?.is_allowed())
    }

    /// Role in the content's workspace. A missing workspace is corruption, not a deny.
    fn content_role<C: ContentResource + ?Sized>(
        &self,
        principal: &Principal,
        content: &C,
    ) -> Result<Option<Role>, AuthzError> {
        self.owning_workspace_role(principal, content.workspace_id(), content.content_id())
    }

    /// Role in the workspace a stored record belongs to.
    pub(crate) fn owning_workspace_role(
        &self,
        principal: &Principal,
        workspace_id: WorkspaceId,
        content_id: Option<ContentId>,
    ) -> Result<Option<Role>, AuthzError> {
        let workspace = ScopeRef::Workspace(workspace_id);
        self.memberships
            .role_of(principal, workspace)
            .map_err(|err| match err {
                MembershipError::ScopeNotFound(scope) if scope == workspace => {
                    warn!(
                        content_id = ?content_id,
                        workspace_id = %workspace_id,
                        "record references a workspace that does not exist"
                    );
                    AuthzError::MalformedReference {
                        content_id,
                        workspace_id,
                    }
                }
                other => other.into(),
            })
    }
}

pub(crate) fn record(
    operation: impl core::fmt::Display,
    principal: Option<&Principal>,
    decision: Decision,
) -> Decision {
    debug!(
        %operation,
        principal = ?principal.map(Principal::id),
        allowed = decision.is_allowed(),
        reason = %decision.reason(),
        "authorization decision"
    );
    decision
}
