//! Rules for records that hang off content or a workspace: comments, likes, tags,
//! troops and program copies.
//!
//! Authored records (comments, likes, tag links) follow the author-or-system-admin
//! rule and never look at memberships. Workspace-owned records (troops) follow the
//! owning workspace's roles, with the system-admin override.

use serde::{Deserialize, Serialize};

use plannr_core::{UserId, WorkspaceId};

use crate::authorize::{record, require};
use crate::membership::MembershipResolver;
use crate::resource::{AuthoredResource, WorkspaceResource};
use crate::{
    AuthzError, ContentResource, Decision, Denial, Grant, PermissionResolver, Principal, Role,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedAction {
    EditComment,
    DeleteComment,
    RemoveLike,
    ManageTags,
    TagContent,
    ReadWorkspaceRecord,
    WriteWorkspaceRecord,
    CopyProgram,
}

impl core::fmt::Display for RelatedAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            RelatedAction::EditComment => "edit_comment",
            RelatedAction::DeleteComment => "delete_comment",
            RelatedAction::RemoveLike => "remove_like",
            RelatedAction::ManageTags => "manage_tags",
            RelatedAction::TagContent => "tag_content",
            RelatedAction::ReadWorkspaceRecord => "read_workspace_record",
            RelatedAction::WriteWorkspaceRecord => "write_workspace_record",
            RelatedAction::CopyProgram => "copy_program",
        })
    }
}

/// Access level on a workspace-owned record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceAccess {
    Read,
    Write,
}

impl WorkspaceAccess {
    pub fn minimum_role(self) -> Role {
        match self {
            WorkspaceAccess::Read => Role::Viewer,
            WorkspaceAccess::Write => Role::Admin,
        }
    }

    fn action(self) -> RelatedAction {
        match self {
            WorkspaceAccess::Read => RelatedAction::ReadWorkspaceRecord,
            WorkspaceAccess::Write => RelatedAction::WriteWorkspaceRecord,
        }
    }
}

fn author_or_system_admin(principal: Option<&Principal>, author: UserId) -> Decision {
    match principal {
        None => Decision::Deny(Denial::Unauthenticated),
        Some(p) if p.is_system_admin() => Decision::Allow(Grant::SystemAdmin),
        Some(p) if p.id() == author => Decision::Allow(Grant::Author),
        Some(_) => Decision::Deny(Denial::NotAuthor),
    }
}

impl<R: MembershipResolver> PermissionResolver<R> {
    pub fn check_edit_comment<A: AuthoredResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        comment: &A,
    ) -> Decision {
        let decision = author_or_system_admin(principal, comment.author_id());
        record(RelatedAction::EditComment, principal, decision)
    }

    pub fn check_delete_comment<A: AuthoredResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        comment: &A,
    ) -> Decision {
        let decision = author_or_system_admin(principal, comment.author_id());
        record(RelatedAction::DeleteComment, principal, decision)
    }

    /// Likes are removed by the user who gave them.
    pub fn check_remove_like<A: AuthoredResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        like: &A,
    ) -> Decision {
        let decision = author_or_system_admin(principal, like.author_id());
        record(RelatedAction::RemoveLike, principal, decision)
    }

    /// Creating, renaming and deleting catalogue tags. Reading tags needs no check.
    pub fn check_manage_tags(&self, principal: Option<&Principal>) -> Decision {
        let decision = match principal {
            None => Decision::Deny(Denial::Unauthenticated),
            Some(p) if p.is_system_admin() => Decision::Allow(Grant::SystemAdmin),
            Some(_) => Decision::Deny(Denial::SystemAdminOnly),
        };
        record(RelatedAction::ManageTags, principal, decision)
    }

    /// Attaching or detaching a tag. Only the content's author decides how it is
    /// tagged; workspace roles do not count.
    pub fn check_tag_content<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        content: &C,
    ) -> Decision {
        let decision = author_or_system_admin(principal, content.author_id());
        record(RelatedAction::TagContent, principal, decision)
    }

    /// Viewer to read, admin to write, in the record's workspace.
    pub fn check_workspace_resource<W: WorkspaceResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        resource: &W,
        access: WorkspaceAccess,
    ) -> Result<Decision, AuthzError> {
        let decision = match principal {
            None => Decision::Deny(Denial::Unauthenticated),
            Some(p) if p.is_system_admin() => Decision::Allow(Grant::SystemAdmin),
            Some(p) => {
                let role = self.owning_workspace_role(p, resource.workspace_id(), None)?;
                require(role, access.minimum_role())
            }
        };
        Ok(record(access.action(), principal, decision))
    }

    /// Copying a program into `target` is a create there, and the source must be
    /// visible to the principal.
    pub fn check_copy_program<C: ContentResource + ?Sized>(
        &self,
        principal: Option<&Principal>,
        source: &C,
        target: WorkspaceId,
    ) -> Result<Decision, AuthzError> {
        let view = self.check_view(principal, source)?;
        let decision = if view.is_allowed() {
            self.check_create(principal, target)?
        } else {
            view
        };
        Ok(record(RelatedAction::CopyProgram, principal, decision))
    }
}
