//! `plannr-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the authorization core and
//! the content model (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CommentId, ContentId, GroupId, TagId, TroopId, UserId, WorkspaceId};
