//! Content items: one shared base record plus a type-specific payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use plannr_auth::ContentResource;
use plannr_core::{ContentId, DomainError, DomainResult, Entity, UserId, WorkspaceId};

use crate::constraints;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Program,
    Event,
    Task,
}

impl core::fmt::Display for ContentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ContentType::Program => "program",
            ContentType::Event => "event",
            ContentType::Task => "task",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDetails {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub program_id: Option<ContentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    pub event_id: ContentId,
    /// Minutes.
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub participant_min: Option<u32>,
    #[serde(default)]
    pub participant_max: Option<u32>,
}

/// Type-specific payload, discriminated by `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "lowercase")]
pub enum ContentKind {
    Program(ProgramDetails),
    Event(EventDetails),
    Task(TaskDetails),
}

impl ContentKind {
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentKind::Program(_) => ContentType::Program,
            ContentKind::Event(_) => ContentType::Event,
            ContentKind::Task(_) => ContentType::Task,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        match self {
            ContentKind::Program(p) => {
                constraints::optional("image", p.image.clone(), constraints::IMAGE_MAX)?;
            }
            ContentKind::Event(e) => {
                if e.end.is_some_and(|end| end < e.start) {
                    return Err(DomainError::validation("event cannot end before it starts"));
                }
            }
            ContentKind::Task(t) => {
                if let (Some(min), Some(max)) = (t.participant_min, t.participant_max) {
                    if min > max {
                        return Err(DomainError::validation(
                            "participant_min cannot exceed participant_max",
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Descriptive fields shared by all content types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAttributes {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub equipment: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub prep_time: Option<String>,
}

impl ContentAttributes {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn validated(self) -> DomainResult<Self> {
        use constraints::optional;

        Ok(Self {
            name: constraints::name(Content::KIND, &self.name)?,
            description: optional("description", self.description, constraints::DESCRIPTION_MAX)?,
            instructions: optional(
                "instructions",
                self.instructions,
                constraints::INSTRUCTIONS_MAX,
            )?,
            duration: optional("duration", self.duration, constraints::DURATION_MAX)?,
            age: optional("age", self.age, constraints::AGE_MAX)?,
            location: optional("location", self.location, constraints::LOCATION_MAX)?,
            prep_time: optional("prep_time", self.prep_time, constraints::PREP_TIME_MAX)?,
            ..self
        })
    }
}

/// Input for creating a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContent {
    #[serde(default)]
    pub public: bool,
    #[serde(flatten)]
    pub attributes: ContentAttributes,
    #[serde(flatten)]
    pub kind: ContentKind,
}

/// Partial update. Author, workspace, id and content type are not patchable.
///
/// Optional fields distinguish "absent" (keep) from an explicit `null` (clear):
/// `None` keeps the current value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentPatch {
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub age: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub count: Option<Option<u32>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<u32>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<Option<String>>,
    /// Replacement payload; must keep the same content type.
    #[serde(default)]
    pub details: Option<ContentKind>,
}

/// A present key always yields `Some`, so `null` becomes `Some(None)`. Absent keys
/// fall back to `#[serde(default)]`.
fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn patched<T>(update: Option<Option<T>>, current: Option<T>) -> Option<T> {
    match update {
        Some(value) => value,
        None => current,
    }
}

/// A program, event or task.
///
/// # Invariants
/// - `author_id` and `workspace_id` are set at creation and never change.
/// - The content type never changes.
/// - Field limits from [`crate::constraints`] always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    id: ContentId,
    author_id: UserId,
    workspace_id: WorkspaceId,
    public: bool,
    #[serde(flatten)]
    attributes: ContentAttributes,
    #[serde(flatten)]
    kind: ContentKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Content {
    pub fn create(
        id: ContentId,
        author_id: UserId,
        workspace_id: WorkspaceId,
        new: NewContent,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        new.kind.validate()?;
        Ok(Self {
            id,
            author_id,
            workspace_id,
            public: new.public,
            attributes: new.attributes.validated()?,
            kind: new.kind,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch atomically: on error nothing changes.
    pub fn apply(&mut self, patch: ContentPatch, now: DateTime<Utc>) -> DomainResult<()> {
        let kind = match patch.details {
            Some(kind) if kind.content_type() != self.content_type() => {
                return Err(DomainError::invariant(format!(
                    "cannot change a {} into a {}",
                    self.content_type(),
                    kind.content_type()
                )));
            }
            Some(kind) => {
                kind.validate()?;
                kind
            }
            None => self.kind.clone(),
        };

        let current = self.attributes.clone();
        let attributes = ContentAttributes {
            name: patch.name.unwrap_or(current.name),
            description: patched(patch.description, current.description),
            equipment: patched(patch.equipment, current.equipment),
            instructions: patched(patch.instructions, current.instructions),
            duration: patched(patch.duration, current.duration),
            age: patched(patch.age, current.age),
            location: patched(patch.location, current.location),
            count: patched(patch.count, current.count),
            price: patched(patch.price, current.price),
            prep_time: patched(patch.prep_time, current.prep_time),
        }
        .validated()?;

        self.attributes = attributes;
        self.kind = kind;
        if let Some(public) = patch.public {
            self.public = public;
        }
        self.updated_at = now;
        debug!(content_id = %self.id, content_type = %self.content_type(), "content updated");
        Ok(())
    }

    /// Copy a program into `workspace_id` as a new private item authored by
    /// `author_id`. Events and tasks hang off other items and are not copyable.
    pub fn copy_program(
        &self,
        id: ContentId,
        author_id: UserId,
        workspace_id: WorkspaceId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if self.content_type() != ContentType::Program {
            return Err(DomainError::invariant(format!(
                "only programs can be copied, not a {}",
                self.content_type()
            )));
        }
        Ok(Self {
            id,
            author_id,
            workspace_id,
            public: false,
            attributes: self.attributes.clone(),
            kind: self.kind.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn attributes(&self) -> &ContentAttributes {
        &self.attributes
    }

    pub fn kind(&self) -> &ContentKind {
        &self.kind
    }

    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Content {
    type Id = ContentId;
    const KIND: &'static str = "content";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ContentResource for Content {
    fn content_id(&self) -> Option<ContentId> {
        Some(self.id)
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
