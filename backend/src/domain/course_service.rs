//! Course catalog service.
//!
//! Implements the course driving ports: course creation against an active
//! category, publish toggling, upload-validated content attachment, quiz
//! creation, and display-ordered content reads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::catalog::{
    CatalogValidationError, Course, CourseDocument, CourseVideo, Price, QuizWithQuestions,
    sort_for_display,
};
use crate::domain::ports::{
    AttachContentRequest, CategoryRepository, CategoryRepositoryError, CourseCommand,
    CourseContent, CourseQuery, CourseRepository, CourseRepositoryError, CreateCourseRequest,
    CreateQuizRequest,
};
use crate::domain::upload::{UploadKind, validate_upload};
use crate::domain::{Error, Lifecycle};

/// Course service implementing the driving ports.
#[derive(Clone)]
pub struct CourseService<C, G> {
    courses: Arc<C>,
    categories: Arc<G>,
}

impl<C, G> CourseService<C, G> {
    /// Create a new service with the given repositories.
    pub fn new(courses: Arc<C>, categories: Arc<G>) -> Self {
        Self { courses, categories }
    }
}

fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::DuplicateTitle { title } => duplicate_title_error(&title),
    }
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::DuplicateName { name } => {
            Error::internal(format!("unexpected name conflict while reading: {name}"))
        }
    }
}

fn duplicate_title_error(title: &str) -> Error {
    Error::duplicate_title("this course title already exists").with_details(json!({
        "field": "title",
        "value": title,
    }))
}

fn validation_error(err: &CatalogValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

fn upload_error(err: &crate::domain::upload::UploadValidationError, file_name: &str) -> Error {
    Error::invalid_upload(err.to_string()).with_details(json!({
        "field": "fileName",
        "value": file_name,
    }))
}

impl<C, G> CourseService<C, G>
where
    C: CourseRepository,
    G: CategoryRepository,
{
    async fn require_active_course(&self, id: Uuid) -> Result<Course, Error> {
        let course = self
            .courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;
        if course.lifecycle == Lifecycle::Archived {
            return Err(Error::not_found("course is archived"));
        }
        Ok(course)
    }

    async fn validated_attachment(
        &self,
        kind: UploadKind,
        request: &AttachContentRequest,
    ) -> Result<(), Error> {
        self.require_active_course(request.course_id).await?;
        validate_upload(kind, &request.file_name, request.file_size)
            .map_err(|err| upload_error(&err, &request.file_name))
    }
}

#[async_trait]
impl<C, G> CourseCommand for CourseService<C, G>
where
    C: CourseRepository,
    G: CategoryRepository,
{
    async fn create(&self, request: CreateCourseRequest) -> Result<Course, Error> {
        let price = Price::from_minor_units(request.price_minor_units)
            .map_err(|err| validation_error(&err))?;
        let course = Course::new(
            request.title,
            request.description,
            price,
            request.category_id,
        )
        .map_err(|err| validation_error(&err))?;

        let category = self
            .categories
            .find_by_id(request.category_id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found("category not found"))?;
        if !category.lifecycle().is_active() {
            return Err(Error::not_found("category is archived"));
        }

        // Friendly pre-check; the unique constraint decides under races.
        if self
            .courses
            .find_active_by_title(&course.title)
            .await
            .map_err(map_course_error)?
            .is_some()
        {
            return Err(duplicate_title_error(&course.title));
        }

        self.courses.insert(&course).await.map_err(map_course_error)?;
        Ok(course)
    }

    async fn set_published(&self, id: Uuid, published: bool) -> Result<(), Error> {
        let updated = self
            .courses
            .set_published(id, published)
            .await
            .map_err(map_course_error)?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found("course not found"))
        }
    }

    async fn add_video(&self, request: AttachContentRequest) -> Result<CourseVideo, Error> {
        self.validated_attachment(UploadKind::Video, &request).await?;
        let video = CourseVideo::new(
            request.course_id,
            request.title,
            request.file_name,
            request.file_size,
            request.order.unwrap_or(0),
        )
        .map_err(|err| validation_error(&err))?;
        self.courses
            .insert_video(&video)
            .await
            .map_err(map_course_error)?;
        Ok(video)
    }

    async fn add_document(
        &self,
        request: AttachContentRequest,
    ) -> Result<CourseDocument, Error> {
        self.validated_attachment(UploadKind::Document, &request)
            .await?;
        let document = CourseDocument::new(
            request.course_id,
            request.title,
            request.file_name,
            request.file_size,
            request.order.unwrap_or(0),
        )
        .map_err(|err| validation_error(&err))?;
        self.courses
            .insert_document(&document)
            .await
            .map_err(map_course_error)?;
        Ok(document)
    }

    async fn add_quiz(&self, request: CreateQuizRequest) -> Result<QuizWithQuestions, Error> {
        self.require_active_course(request.course_id).await?;
        let quiz = request
            .draft
            .build(request.course_id)
            .map_err(|err| validation_error(&err))?;
        self.courses
            .insert_quiz(&quiz)
            .await
            .map_err(map_course_error)?;
        Ok(quiz)
    }
}

#[async_trait]
impl<C, G> CourseQuery for CourseService<C, G>
where
    C: CourseRepository,
    G: CategoryRepository,
{
    async fn list(&self) -> Result<Vec<Course>, Error> {
        self.courses.list_active().await.map_err(map_course_error)
    }

    async fn content(&self, course_id: Uuid) -> Result<CourseContent, Error> {
        self.require_active_course(course_id).await?;
        let mut content = self
            .courses
            .content(course_id)
            .await
            .map_err(map_course_error)?;
        sort_for_display(&mut content.videos);
        sort_for_display(&mut content.documents);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalog::{AnswerDraft, Category, QuestionDraft, QuizDraft};
    use crate::domain::ports::{MockCategoryRepository, MockCourseRepository};

    const MIB: i64 = 1024 * 1024;

    fn service(
        courses: MockCourseRepository,
        categories: MockCategoryRepository,
    ) -> CourseService<MockCourseRepository, MockCategoryRepository> {
        CourseService::new(Arc::new(courses), Arc::new(categories))
    }

    fn create_request(category_id: Uuid) -> CreateCourseRequest {
        CreateCourseRequest {
            title: "Intro".into(),
            description: "An introductory course.".into(),
            price_minor_units: 4_900,
            category_id,
        }
    }

    fn some_course() -> Course {
        Course::new(
            "Intro",
            "An introductory course.",
            Price::from_minor_units(0).expect("non-negative"),
            Uuid::new_v4(),
        )
        .expect("valid course")
    }

    fn attach_request(course_id: Uuid, file_name: &str, file_size: i64) -> AttachContentRequest {
        AttachContentRequest {
            course_id,
            title: "Lesson 1".into(),
            file_name: file_name.into(),
            file_size,
            order: None,
        }
    }

    #[tokio::test]
    async fn creates_a_course_in_an_active_category() {
        let category = Category::new_root("Programming").expect("valid");
        let category_id = category.id();
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(category)));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_active_by_title()
            .times(1)
            .return_once(|_| Ok(None));
        courses.expect_insert().times(1).return_once(|_| Ok(()));

        let created = service(courses, categories)
            .create(create_request(category_id))
            .await
            .expect("create succeeds");

        assert!(created.is_published);
        assert_eq!(created.category_id, category_id);
    }

    #[tokio::test]
    async fn rejects_negative_prices_before_any_lookup() {
        let categories = MockCategoryRepository::new();
        let courses = MockCourseRepository::new();
        let mut request = create_request(Uuid::new_v4());
        request.price_minor_units = -100;

        let err = service(courses, categories)
            .create(request)
            .await
            .expect_err("negative price rejected");

        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn rejects_missing_category() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        let mut courses = MockCourseRepository::new();
        courses.expect_insert().times(0);

        let err = service(courses, categories)
            .create(create_request(Uuid::new_v4()))
            .await
            .expect_err("missing category rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn maps_lost_title_race_to_duplicate_title() {
        let category = Category::new_root("Programming").expect("valid");
        let category_id = category.id();
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(category)));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_active_by_title()
            .times(1)
            .return_once(|_| Ok(None));
        courses
            .expect_insert()
            .times(1)
            .return_once(|_| Err(CourseRepositoryError::duplicate_title("Intro")));

        let err = service(courses, categories)
            .create(create_request(category_id))
            .await
            .expect_err("race loser rejected");

        assert_eq!(err.code, ErrorCode::DuplicateTitle);
    }

    #[tokio::test]
    async fn accepts_a_video_within_the_ceiling() {
        let course = some_course();
        let course_id = course.id;
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(course)));
        courses.expect_insert_video().times(1).return_once(|_| Ok(()));

        let video = service(courses, MockCategoryRepository::new())
            .add_video(attach_request(course_id, "lecture.mp4", 10 * MIB))
            .await
            .expect("upload accepted");

        assert_eq!(video.course_id, course_id);
        assert_eq!(video.order, 0);
    }

    #[tokio::test]
    async fn rejects_a_video_with_the_wrong_extension() {
        let course = some_course();
        let course_id = course.id;
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(course)));
        courses.expect_insert_video().times(0);

        let err = service(courses, MockCategoryRepository::new())
            .add_video(attach_request(course_id, "lecture.mov", MIB))
            .await
            .expect_err("extension rejected");

        assert_eq!(err.code, ErrorCode::InvalidUpload);
    }

    #[tokio::test]
    async fn rejects_an_oversized_video() {
        let course = some_course();
        let course_id = course.id;
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(course)));
        courses.expect_insert_video().times(0);

        let err = service(courses, MockCategoryRepository::new())
            .add_video(attach_request(course_id, "lecture.mp4", 60 * MIB))
            .await
            .expect_err("size rejected");

        assert_eq!(err.code, ErrorCode::InvalidUpload);
    }

    #[tokio::test]
    async fn rejects_an_oversized_document() {
        let course = some_course();
        let course_id = course.id;
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(course)));
        courses.expect_insert_document().times(0);

        let err = service(courses, MockCategoryRepository::new())
            .add_document(attach_request(course_id, "notes.pdf", 11 * MIB))
            .await
            .expect_err("size rejected");

        assert_eq!(err.code, ErrorCode::InvalidUpload);
    }

    #[tokio::test]
    async fn persists_quizzes_with_their_chain() {
        let course = some_course();
        let course_id = course.id;
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(course)));
        courses
            .expect_insert_quiz()
            .withf(move |quiz: &QuizWithQuestions| {
                quiz.quiz.course_id == course_id && quiz.questions.len() == 1
            })
            .times(1)
            .return_once(|_| Ok(()));

        let quiz = service(courses, MockCategoryRepository::new())
            .add_quiz(CreateQuizRequest {
                course_id,
                draft: QuizDraft {
                    title: "Basics".into(),
                    questions: vec![QuestionDraft {
                        text: "What is 2 + 2?".into(),
                        answers: vec![AnswerDraft {
                            text: "4".into(),
                            is_correct: true,
                        }],
                    }],
                },
            })
            .await
            .expect("quiz accepted");

        assert_eq!(quiz.quiz.title, "Basics");
    }

    #[tokio::test]
    async fn content_is_returned_in_display_order() {
        let course = some_course();
        let course_id = course.id;
        let early = CourseVideo::new(course_id, "b", "b.mp4", 1, 1).expect("valid");
        let late = CourseVideo::new(course_id, "a", "a.mp4", 1, 2).expect("valid");
        let content = CourseContent {
            videos: vec![late.clone(), early.clone()],
            documents: Vec::new(),
            quizzes: Vec::new(),
        };

        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(course)));
        courses
            .expect_content()
            .times(1)
            .return_once(move |_| Ok(content));

        let result = service(courses, MockCategoryRepository::new())
            .content(course_id)
            .await
            .expect("content listing");

        let ids: Vec<Uuid> = result.videos.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn unpublish_of_unknown_course_is_not_found() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_set_published()
            .times(1)
            .return_once(|_, _| Ok(false));

        let err = service(courses, MockCategoryRepository::new())
            .set_published(Uuid::new_v4(), false)
            .await
            .expect_err("unknown course rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
