use crate::ContentResource;

pub fn is_publicly_viewable<C: ContentResource + ?Sized>(content: &C) -> bool {
    content.is_public()
}
