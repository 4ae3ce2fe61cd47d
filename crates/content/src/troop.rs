use serde::{Deserialize, Serialize};

use plannr_auth::WorkspaceResource;
use plannr_core::{ContentId, DomainResult, Entity, TroopId, WorkspaceId};

use crate::constraints;

/// A troop belongs to one workspace and takes part in that workspace's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troop {
    id: TroopId,
    name: String,
    workspace_id: WorkspaceId,
}

impl Troop {
    pub fn new(id: TroopId, name: &str, workspace_id: WorkspaceId) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: constraints::name(Self::KIND, name)?,
            workspace_id,
        })
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = constraints::name(Self::KIND, name)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Troop {
    type Id = TroopId;
    const KIND: &'static str = "troop";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl WorkspaceResource for Troop {
    fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }
}

/// A troop signed up for an event. Writes need admin in the troop's workspace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TroopParticipation {
    pub troop_id: TroopId,
    pub event_id: ContentId,
}
