//! Scopes, memberships and the resolver that answers "which role does this principal
//! hold here?".
//!
//! Workspaces and groups are two independent scoping mechanisms that share one role
//! ranking. Both sit behind [`Scope`], so every rule is written once.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use plannr_core::{DomainError, DomainResult, GroupId, UserId, WorkspaceId};

use crate::{Principal, Role};

/// Reference to a membership scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ScopeRef {
    Workspace(WorkspaceId),
    Group(GroupId),
}

impl ScopeRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ScopeRef::Workspace(_) => "workspace",
            ScopeRef::Group(_) => "group",
        }
    }
}

impl From<WorkspaceId> for ScopeRef {
    fn from(value: WorkspaceId) -> Self {
        ScopeRef::Workspace(value)
    }
}

impl From<GroupId> for ScopeRef {
    fn from(value: GroupId) -> Self {
        ScopeRef::Group(value)
    }
}

impl core::fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScopeRef::Workspace(id) => write!(f, "workspace {id}"),
            ScopeRef::Group(id) => write!(f, "group {id}"),
        }
    }
}

/// A single principal-to-role binding within one scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub scope: ScopeRef,
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The scope itself does not exist. Distinct from "not a member".
    #[error("{0} not found")]
    ScopeNotFound(ScopeRef),
}

/// Capability shared by workspaces and groups.
pub trait Scope {
    fn scope_ref(&self) -> ScopeRef;

    /// The principal's role here, or `None` if they are not a member.
    fn role_of(&self, principal: &Principal) -> Option<Role>;
}

/// Looks up scopes from a consistent snapshot of membership records.
pub trait MembershipResolver {
    fn resolve_scope(&self, scope: ScopeRef) -> Result<&dyn Scope, MembershipError>;

    /// `Ok(None)` means "not a member"; `Err` means the scope does not exist.
    fn role_of(
        &self,
        principal: &Principal,
        scope: ScopeRef,
    ) -> Result<Option<Role>, MembershipError> {
        Ok(self.resolve_scope(scope)?.role_of(principal))
    }
}

impl<T: MembershipResolver + ?Sized> MembershipResolver for &T {
    fn resolve_scope(&self, scope: ScopeRef) -> Result<&dyn Scope, MembershipError> {
        (**self).resolve_scope(scope)
    }
}

/// Members of one scope. At most one role per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMembers {
    scope: ScopeRef,
    members: BTreeMap<UserId, Role>,
}

impl ScopeMembers {
    pub fn new(scope: ScopeRef) -> Self {
        Self {
            scope,
            members: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Membership> + '_ {
        let scope = self.scope;
        self.members.iter().map(move |(user_id, role)| Membership {
            scope,
            user_id: *user_id,
            role: *role,
        })
    }
}

impl Scope for ScopeMembers {
    fn scope_ref(&self) -> ScopeRef {
        self.scope
    }

    fn role_of(&self, principal: &Principal) -> Option<Role> {
        self.members.get(&principal.id()).copied()
    }
}

/// In-memory snapshot of every known scope and its memberships.
///
/// Callers load the records relevant to a request, hand the snapshot to
/// [`crate::PermissionResolver`] and never mutate it while a check is running.
#[derive(Debug, Clone, Default)]
pub struct MembershipSnapshot {
    scopes: HashMap<ScopeRef, ScopeMembers>,
}

impl MembershipSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scope with no members. Existing scopes are left untouched.
    pub fn insert_scope(&mut self, scope: impl Into<ScopeRef>) -> &mut Self {
        let scope = scope.into();
        self.scopes
            .entry(scope)
            .or_insert_with(|| ScopeMembers::new(scope));
        self
    }

    pub fn contains_scope(&self, scope: ScopeRef) -> bool {
        self.scopes.contains_key(&scope)
    }

    /// Drop a scope together with all of its memberships.
    pub fn remove_scope(&mut self, scope: ScopeRef) -> DomainResult<ScopeMembers> {
        self.scopes
            .remove(&scope)
            .ok_or_else(|| DomainError::not_found(scope.to_string()))
    }

    pub fn add_membership(
        &mut self,
        scope: impl Into<ScopeRef>,
        user_id: UserId,
        role: Role,
    ) -> DomainResult<Membership> {
        let scope = scope.into();
        let members = self.scope_mut(scope)?;
        if members.members.contains_key(&user_id) {
            return Err(DomainError::conflict(format!(
                "user {user_id} is already a member of {scope}"
            )));
        }
        members.members.insert(user_id, role);
        Ok(Membership {
            scope,
            user_id,
            role,
        })
    }

    pub fn update_membership(
        &mut self,
        scope: impl Into<ScopeRef>,
        user_id: UserId,
        role: Role,
    ) -> DomainResult<Membership> {
        let scope = scope.into();
        let members = self.scope_mut(scope)?;
        let slot = members
            .members
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found(format!("membership of {user_id} in {scope}")))?;
        *slot = role;
        Ok(Membership {
            scope,
            user_id,
            role,
        })
    }

    pub fn remove_membership(
        &mut self,
        scope: impl Into<ScopeRef>,
        user_id: UserId,
    ) -> DomainResult<Membership> {
        let scope = scope.into();
        let members = self.scope_mut(scope)?;
        let role = members
            .members
            .remove(&user_id)
            .ok_or_else(|| DomainError::not_found(format!("membership of {user_id} in {scope}")))?;
        Ok(Membership {
            scope,
            user_id,
            role,
        })
    }

    pub fn members(&self, scope: ScopeRef) -> Result<&ScopeMembers, MembershipError> {
        self.scopes
            .get(&scope)
            .ok_or(MembershipError::ScopeNotFound(scope))
    }

    fn scope_mut(&mut self, scope: ScopeRef) -> DomainResult<&mut ScopeMembers> {
        self.scopes
            .get_mut(&scope)
            .ok_or_else(|| DomainError::not_found(scope.to_string()))
    }
}

impl MembershipResolver for MembershipSnapshot {
    fn resolve_scope(&self, scope: ScopeRef) -> Result<&dyn Scope, MembershipError> {
        let members: &dyn Scope = self.members(scope)?;
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(scope: ScopeRef, user: UserId, role: Role) -> MembershipSnapshot {
        let mut snapshot = MembershipSnapshot::new();
        snapshot.insert_scope(scope);
        snapshot.add_membership(scope, user, role).unwrap();
        snapshot
    }

    #[test]
    fn role_of_returns_the_single_membership() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let user = UserId::new();
        let snapshot = snapshot_with(ws, user, Role::Editor);

        assert_eq!(
            snapshot.role_of(&Principal::user(user), ws),
            Ok(Some(Role::Editor))
        );
    }

    #[test]
    fn non_member_is_none_not_viewer() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let snapshot = snapshot_with(ws, UserId::new(), Role::Owner);

        assert_eq!(snapshot.role_of(&Principal::user(UserId::new()), ws), Ok(None));
    }

    #[test]
    fn unknown_scope_is_distinct_from_no_membership() {
        let snapshot = MembershipSnapshot::new();
        let group = ScopeRef::from(GroupId::new());

        assert_eq!(
            snapshot.role_of(&Principal::user(UserId::new()), group),
            Err(MembershipError::ScopeNotFound(group))
        );
    }

    #[test]
    fn workspace_and_group_roles_are_independent() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let group = ScopeRef::from(GroupId::new());
        let user = UserId::new();
        let mut snapshot = snapshot_with(ws, user, Role::Admin);
        snapshot.insert_scope(group);

        let p = Principal::user(user);
        assert_eq!(snapshot.role_of(&p, ws), Ok(Some(Role::Admin)));
        assert_eq!(snapshot.role_of(&p, group), Ok(None));
    }

    #[test]
    fn duplicate_membership_conflicts() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let user = UserId::new();
        let mut snapshot = snapshot_with(ws, user, Role::Viewer);

        let err = snapshot.add_membership(ws, user, Role::Admin).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(
            snapshot.role_of(&Principal::user(user), ws),
            Ok(Some(Role::Viewer))
        );
    }

    #[test]
    fn update_and_remove_require_existing_membership() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let user = UserId::new();
        let mut snapshot = snapshot_with(ws, user, Role::Editor);

        let updated = snapshot.update_membership(ws, user, Role::Viewer).unwrap();
        assert_eq!(updated.role, Role::Viewer);

        let removed = snapshot.remove_membership(ws, user).unwrap();
        assert_eq!(removed.role, Role::Viewer);
        assert_eq!(snapshot.role_of(&Principal::user(user), ws), Ok(None));

        assert!(matches!(
            snapshot.remove_membership(ws, user),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            snapshot.update_membership(ws, user, Role::Owner),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn writes_against_unknown_scope_are_not_found() {
        let mut snapshot = MembershipSnapshot::new();
        let err = snapshot
            .add_membership(WorkspaceId::new(), UserId::new(), Role::Viewer)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn removing_a_scope_cascades_to_memberships() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let user = UserId::new();
        let mut snapshot = snapshot_with(ws, user, Role::Owner);

        let dropped = snapshot.remove_scope(ws).unwrap();
        assert_eq!(dropped.len(), 1);
        assert_eq!(
            snapshot.role_of(&Principal::user(user), ws),
            Err(MembershipError::ScopeNotFound(ws))
        );
    }

    #[test]
    fn insert_scope_keeps_existing_members() {
        let ws = ScopeRef::from(WorkspaceId::new());
        let user = UserId::new();
        let mut snapshot = snapshot_with(ws, user, Role::Admin);
        snapshot.insert_scope(ws);

        let members: Vec<_> = snapshot.members(ws).unwrap().iter().collect();
        assert_eq!(
            members,
            vec![Membership {
                scope: ws,
                user_id: user,
                role: Role::Admin
            }]
        );
    }

    #[test]
    fn scope_ref_serializes_tagged() {
        let id = WorkspaceId::from_uuid(uuid::Uuid::nil());
        let json = serde_json::to_value(ScopeRef::Workspace(id)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "workspace", "id": uuid::Uuid::nil() })
        );
    }
}
