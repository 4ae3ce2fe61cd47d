use crate::{ContentResource, Principal};

/// Authorship check. Anonymous callers author nothing.
pub fn is_owner<C: ContentResource + ?Sized>(principal: Option<&Principal>, content: &C) -> bool {
    principal.is_some_and(|p| p.id() == content.author_id())
}
