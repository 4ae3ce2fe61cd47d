//! Entity trait: identity that survives edits.

/// Anything stored and referenced by a stable identifier (users, workspaces, groups,
/// content items).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Short lowercase name of the entity kind, used in validation messages.
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
