//! Comments and likes on content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plannr_auth::AuthoredResource;
use plannr_core::{CommentId, ContentId, DomainResult, Entity, UserId};

use crate::constraints;

/// A comment. Only its author (or a system admin) may edit or delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    content_id: ContentId,
    user_id: UserId,
    body: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        content_id: ContentId,
        user_id: UserId,
        body: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            content_id,
            user_id,
            body: constraints::required("body", body, constraints::COMMENT_BODY_MAX)?,
            created_at: now,
        })
    }

    pub fn edit(&mut self, body: &str) -> DomainResult<()> {
        self.body = constraints::required("body", body, constraints::COMMENT_BODY_MAX)?;
        Ok(())
    }

    pub fn content_id(&self) -> ContentId {
        self.content_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Comment {
    type Id = CommentId;
    const KIND: &'static str = "comment";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AuthoredResource for Comment {
    fn author_id(&self) -> UserId {
        self.user_id
    }
}

/// One user's like on one content item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub user_id: UserId,
    pub content_id: ContentId,
}

impl AuthoredResource for Like {
    fn author_id(&self) -> UserId {
        self.user_id
    }
}
