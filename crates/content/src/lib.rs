//! `plannr-content`: the resources the authorization core protects.
//!
//! Programs, events and tasks share one base record (author, workspace, visibility)
//! and carry their type-specific fields alongside it. Workspaces and groups are the
//! two kinds of membership scope. Comments, likes, tags and troops hang off content
//! or a workspace.

pub mod constraints;
pub mod content;
pub mod engagement;
pub mod group;
pub mod tag;
pub mod troop;
pub mod workspace;

pub use content::{
    Content, ContentAttributes, ContentKind, ContentPatch, ContentType, EventDetails, NewContent,
    ProgramDetails, TaskDetails,
};
pub use engagement::{Comment, Like};
pub use group::Group;
pub use tag::{ContentTag, Tag};
pub use troop::{Troop, TroopParticipation};
pub use workspace::Workspace;
