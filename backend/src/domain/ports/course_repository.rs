//! Port for course and course-content persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{Course, CourseDocument, CourseVideo, QuizWithQuestions};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// The backing unique constraint on active titles fired.
        DuplicateTitle { title: String } =>
            "course title already exists: {title}",
    }
}

/// A course's full content, as assembled by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseContent {
    /// Videos attached to the course, unordered.
    pub videos: Vec<CourseVideo>,
    /// Documents attached to the course, unordered.
    pub documents: Vec<CourseDocument>,
    /// Quizzes with their full containment chains.
    pub quizzes: Vec<QuizWithQuestions>,
}

/// Port for course storage and retrieval.
///
/// Quiz insertion covers the whole containment chain in one transaction: a
/// partially persisted quiz must never be observable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Fetch a course by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch the active course with exactly this title, if any.
    async fn find_active_by_title(
        &self,
        title: &str,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// All active courses, unordered.
    async fn list_active(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Flip the published flag; returns `false` when no such course exists.
    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<bool, CourseRepositoryError>;

    /// Persist a new video record.
    async fn insert_video(&self, video: &CourseVideo) -> Result<(), CourseRepositoryError>;

    /// Persist a new document record.
    async fn insert_document(
        &self,
        document: &CourseDocument,
    ) -> Result<(), CourseRepositoryError>;

    /// Persist a quiz with its questions and answers atomically.
    async fn insert_quiz(&self, quiz: &QuizWithQuestions) -> Result<(), CourseRepositoryError>;

    /// Assemble the active content of a course.
    async fn content(&self, course_id: Uuid) -> Result<CourseContent, CourseRepositoryError>;
}

/// Fixture implementation for wiring without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn insert(&self, _course: &Course) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn find_active_by_title(
        &self,
        _title: &str,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn list_active(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn set_published(
        &self,
        _id: Uuid,
        _published: bool,
    ) -> Result<bool, CourseRepositoryError> {
        Ok(true)
    }

    async fn insert_video(&self, _video: &CourseVideo) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn insert_document(
        &self,
        _document: &CourseDocument,
    ) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn insert_quiz(&self, _quiz: &QuizWithQuestions) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn content(&self, _course_id: Uuid) -> Result<CourseContent, CourseRepositoryError> {
        Ok(CourseContent::default())
    }
}
