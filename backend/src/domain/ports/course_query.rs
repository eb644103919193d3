//! Driving port for course reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::catalog::Course;

use super::course_repository::CourseContent;

/// Driving port for course reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// All active courses.
    async fn list(&self) -> Result<Vec<Course>, Error>;

    /// The course's content in display order.
    async fn content(&self, course_id: Uuid) -> Result<CourseContent, Error>;
}

/// Fixture implementation returning an empty catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseQuery;

#[async_trait]
impl CourseQuery for FixtureCourseQuery {
    async fn list(&self) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }

    async fn content(&self, _course_id: Uuid) -> Result<CourseContent, Error> {
        Ok(CourseContent::default())
    }
}
