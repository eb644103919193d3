//! Course content items: videos and documents.
//!
//! Content items carry an explicit `order` used purely for display
//! sequencing. The order is a dense integer with no contiguity invariant;
//! ties are broken by creation time so the display order stays stable.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::validation::{CatalogValidationError, validate_text};
use crate::domain::Lifecycle;

/// A video attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseVideo {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the owning course.
    pub course_id: Uuid,
    /// Display title.
    pub title: String,
    /// Name of the uploaded file, extension included.
    pub file_name: String,
    /// Size of the uploaded file in bytes.
    pub file_size: i64,
    /// Position in the course's display sequence.
    pub order: i32,
    /// Creation timestamp; tie-breaker for equal `order` values.
    pub created_at: DateTime<Utc>,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

impl CourseVideo {
    /// Validate and build a new video record.
    pub fn new(
        course_id: Uuid,
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: i64,
        order: i32,
    ) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            course_id,
            title: validate_text(title, "title")?,
            file_name: file_name.into(),
            file_size,
            order,
            created_at: Utc::now(),
            lifecycle: Lifecycle::Active,
        })
    }
}

/// A document attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDocument {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the owning course.
    pub course_id: Uuid,
    /// Display title.
    pub title: String,
    /// Name of the uploaded file, extension included.
    pub file_name: String,
    /// Size of the uploaded file in bytes.
    pub file_size: i64,
    /// Position in the course's display sequence.
    pub order: i32,
    /// Creation timestamp; tie-breaker for equal `order` values.
    pub created_at: DateTime<Utc>,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

impl CourseDocument {
    /// Validate and build a new document record.
    pub fn new(
        course_id: Uuid,
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: i64,
        order: i32,
    ) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            course_id,
            title: validate_text(title, "title")?,
            file_name: file_name.into(),
            file_size,
            order,
            created_at: Utc::now(),
            lifecycle: Lifecycle::Active,
        })
    }
}

/// Anything with a position in a course's display sequence.
pub trait ContentItem {
    /// Explicit display position.
    fn order(&self) -> i32;
    /// Creation timestamp used to break ties.
    fn created_at(&self) -> DateTime<Utc>;
}

impl ContentItem for CourseVideo {
    fn order(&self) -> i32 {
        self.order
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl ContentItem for CourseDocument {
    fn order(&self) -> i32 {
        self.order
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Sort content items into display order: `order` ascending, then creation
/// time ascending.
pub fn sort_for_display<T: ContentItem>(items: &mut [T]) {
    items.sort_by_key(|item| (item.order(), item.created_at()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn video(order: i32, created_offset_secs: i64) -> CourseVideo {
        let mut video = CourseVideo::new(Uuid::new_v4(), "clip", "clip.mp4", 1_024, order)
            .expect("valid video");
        video.created_at += Duration::seconds(created_offset_secs);
        video
    }

    #[test]
    fn sorts_by_order_then_creation_time() {
        let a = video(2, 0);
        let b = video(1, 30);
        let c = video(1, 10);
        let mut items = vec![a.clone(), b.clone(), c.clone()];

        sort_for_display(&mut items);

        let ids: Vec<Uuid> = items.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[test]
    fn sort_is_stable_for_identical_keys() {
        let a = video(0, 0);
        let mut b = video(0, 0);
        b.created_at = a.created_at;
        let mut items = vec![a.clone(), b.clone()];

        sort_for_display(&mut items);

        assert_eq!(items[0].id, a.id);
        assert_eq!(items[1].id, b.id);
    }

    #[test]
    fn content_titles_are_validated() {
        let err = CourseVideo::new(Uuid::new_v4(), " ", "clip.mp4", 1, 0)
            .expect_err("blank title rejected");
        assert_eq!(err.field(), "title");
    }
}
