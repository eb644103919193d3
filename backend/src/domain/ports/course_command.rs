//! Driving port for course mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::catalog::{Course, CourseDocument, CourseVideo, QuizDraft, QuizWithQuestions};

/// Input for creating a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCourseRequest {
    /// Course title; unique among active courses.
    pub title: String,
    /// Detailed course description.
    pub description: String,
    /// Non-negative price in minor currency units.
    pub price_minor_units: i64,
    /// Identifier of the owning category.
    pub category_id: Uuid,
}

/// Input for attaching a video or document to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachContentRequest {
    /// Identifier of the owning course.
    pub course_id: Uuid,
    /// Display title of the content item.
    pub title: String,
    /// Declared name of the uploaded file, extension included.
    pub file_name: String,
    /// Declared size of the uploaded file in bytes.
    pub file_size: i64,
    /// Explicit display position; defaults to 0 when absent.
    pub order: Option<i32>,
}

/// Input for creating a quiz under a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuizRequest {
    /// Identifier of the owning course.
    pub course_id: Uuid,
    /// The quiz with its questions and answers.
    pub draft: QuizDraft,
}

/// Driving port for course mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Validate and persist a new course.
    async fn create(&self, request: CreateCourseRequest) -> Result<Course, Error>;

    /// Publish or unpublish a course. Existing enrollments are untouched.
    async fn set_published(&self, id: Uuid, published: bool) -> Result<(), Error>;

    /// Validate the declared upload and attach a video to a course.
    async fn add_video(&self, request: AttachContentRequest) -> Result<CourseVideo, Error>;

    /// Validate the declared upload and attach a document to a course.
    async fn add_document(&self, request: AttachContentRequest)
    -> Result<CourseDocument, Error>;

    /// Persist a quiz with its questions and answers atomically.
    async fn add_quiz(&self, request: CreateQuizRequest) -> Result<QuizWithQuestions, Error>;
}

/// Fixture implementation materialising requests without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCommand;

#[async_trait]
impl CourseCommand for FixtureCourseCommand {
    async fn create(&self, request: CreateCourseRequest) -> Result<Course, Error> {
        let price = crate::domain::catalog::Price::from_minor_units(request.price_minor_units)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Course::new(request.title, request.description, price, request.category_id)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn set_published(&self, _id: Uuid, _published: bool) -> Result<(), Error> {
        Ok(())
    }

    async fn add_video(&self, request: AttachContentRequest) -> Result<CourseVideo, Error> {
        CourseVideo::new(
            request.course_id,
            request.title,
            request.file_name,
            request.file_size,
            request.order.unwrap_or(0),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn add_document(
        &self,
        request: AttachContentRequest,
    ) -> Result<CourseDocument, Error> {
        CourseDocument::new(
            request.course_id,
            request.title,
            request.file_name,
            request.file_size,
            request.order.unwrap_or(0),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn add_quiz(&self, request: CreateQuizRequest) -> Result<QuizWithQuestions, Error> {
        request
            .draft
            .build(request.course_id)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}
