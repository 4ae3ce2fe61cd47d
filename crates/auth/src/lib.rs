//! `plannr-auth`: the authorization core (pure, zero-trust).
//!
//! Decides, for a principal and a content item or scope, whether view, create, edit
//! or delete is permitted. This crate is intentionally decoupled from HTTP and
//! storage: callers resolve the principal and load a membership snapshot first.

pub mod admin;
pub mod authorize;
pub mod claims;
pub mod membership;
pub mod outcome;
pub mod ownership;
pub mod principal;
pub mod profile;
pub mod related;
pub mod resource;
pub mod roles;
pub mod scope_admin;
pub mod visibility;

pub use admin::{SystemAdminChange, grant_system_admin, revoke_system_admin};
pub use authorize::{AuthzError, Decision, Denial, Grant, Operation, PermissionResolver};
pub use claims::{IdentityClaims, TokenValidationError, validate_claims};
pub use membership::{
    Membership, MembershipError, MembershipResolver, MembershipSnapshot, Scope, ScopeMembers,
    ScopeRef,
};
pub use outcome::AccessDenied;
pub use ownership::is_owner;
pub use principal::Principal;
pub use profile::{ProfileUpdate, Pronouns};
pub use related::{RelatedAction, WorkspaceAccess};
pub use resource::{AuthoredResource, ContentFacts, ContentResource, WorkspaceResource};
pub use roles::{Role, satisfies};
pub use scope_admin::ScopeAction;
pub use visibility::is_publicly_viewable;
