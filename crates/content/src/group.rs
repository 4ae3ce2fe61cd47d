use serde::{Deserialize, Serialize};

use plannr_auth::ScopeRef;
use plannr_core::{DomainResult, Entity, GroupId};

use crate::constraints;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    image: Option<String>,
}

impl Group {
    pub fn new(id: GroupId, name: &str, image: Option<String>) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: constraints::name(Self::KIND, name)?,
            image: constraints::optional("image", image, constraints::IMAGE_MAX)?,
        })
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = constraints::name(Self::KIND, name)?;
        Ok(())
    }

    pub fn set_image(&mut self, image: Option<String>) -> DomainResult<()> {
        self.image = constraints::optional("image", image, constraints::IMAGE_MAX)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn scope(&self) -> ScopeRef {
        ScopeRef::Group(self.id)
    }
}

impl Entity for Group {
    type Id = GroupId;
    const KIND: &'static str = "group";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
