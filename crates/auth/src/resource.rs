//! The slice of a content item that authorization decisions look at.

use serde::{Deserialize, Serialize};

use plannr_core::{ContentId, UserId, WorkspaceId};

/// Base fields shared by every protected content item.
///
/// Implement this on content types that need authorization. Only these accessors are
/// ever consulted, so the rules stay the same for programs, events and tasks.
pub trait ContentResource {
    /// Identifier, used only for diagnostics.
    fn content_id(&self) -> Option<ContentId> {
        None
    }

    /// The principal who created the item. Immutable after creation.
    fn author_id(&self) -> UserId;

    /// The workspace that owns the item. Immutable after creation.
    fn workspace_id(&self) -> WorkspaceId;

    fn is_public(&self) -> bool;
}

/// Plain resource metadata, for callers that have not loaded the whole item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFacts {
    pub content_id: Option<ContentId>,
    pub author_id: UserId,
    pub workspace_id: WorkspaceId,
    pub public: bool,
}

impl ContentResource for ContentFacts {
    fn content_id(&self) -> Option<ContentId> {
        self.content_id
    }

    fn author_id(&self) -> UserId {
        self.author_id
    }

    fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    fn is_public(&self) -> bool {
        self.public
    }
}

impl<T: ContentResource + ?Sized> ContentResource for &T {
    fn content_id(&self) -> Option<ContentId> {
        (**self).content_id()
    }

    fn author_id(&self) -> UserId {
        (**self).author_id()
    }

    fn workspace_id(&self) -> WorkspaceId {
        (**self).workspace_id()
    }

    fn is_public(&self) -> bool {
        (**self).is_public()
    }
}

/// A record with exactly one author and no scope of its own, e.g. a comment or a like.
///
/// Only the author or a system admin may change or remove it.
pub trait AuthoredResource {
    fn author_id(&self) -> UserId;
}

impl<T: AuthoredResource + ?Sized> AuthoredResource for &T {
    fn author_id(&self) -> UserId {
        (**self).author_id()
    }
}

/// A non-content record owned by a workspace, e.g. a troop.
pub trait WorkspaceResource {
    fn workspace_id(&self) -> WorkspaceId;
}

impl<T: WorkspaceResource + ?Sized> WorkspaceResource for &T {
    fn workspace_id(&self) -> WorkspaceId {
        (**self).workspace_id()
    }
}
