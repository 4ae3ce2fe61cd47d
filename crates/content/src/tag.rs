use serde::{Deserialize, Serialize};

use plannr_core::{ContentId, DomainResult, Entity, TagId};

use crate::constraints;

/// A catalogue tag. The catalogue is curated by system admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: String,
}

impl Tag {
    pub fn new(id: TagId, name: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: constraints::required("tag name", name, constraints::TAG_NAME_MAX)?,
        })
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = constraints::required("tag name", name, constraints::TAG_NAME_MAX)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Tag {
    type Id = TagId;
    const KIND: &'static str = "tag";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A tag attached to a content item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentTag {
    pub content_id: ContentId,
    pub tag_id: TagId,
}
