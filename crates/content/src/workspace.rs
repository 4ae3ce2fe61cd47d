use serde::{Deserialize, Serialize};

use plannr_auth::ScopeRef;
use plannr_core::{DomainResult, Entity, GroupId, WorkspaceId};

use crate::constraints;

/// A workspace: the scope every content item is created in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    /// Optional parent group. Group roles do not flow into the workspace.
    group_id: Option<GroupId>,
}

impl Workspace {
    pub fn new(id: WorkspaceId, name: &str, group_id: Option<GroupId>) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: constraints::name(Self::KIND, name)?,
            group_id,
        })
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = constraints::name(Self::KIND, name)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    pub fn scope(&self) -> ScopeRef {
        ScopeRef::Workspace(self.id)
    }
}

impl Entity for Workspace {
    type Id = WorkspaceId;
    const KIND: &'static str = "workspace";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
