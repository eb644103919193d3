//! PostgreSQL-backed `CourseRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::Lifecycle;
use crate::domain::catalog::{
    Course, CourseDocument, CourseQuiz, CourseVideo, Price, QuestionWithAnswers, QuizAnswer,
    QuizQuestion, QuizWithQuestions,
};
use crate::domain::ports::{CourseContent, CourseRepository, CourseRepositoryError};

use super::error_mapping::{DbFailure, classify};
use super::lifecycle_from_label;
use super::models::{
    CourseDocumentRow, CourseQuizRow, CourseRow, CourseVideoRow, NewCourseDocumentRow,
    NewCourseQuizRow, NewCourseRow, NewCourseVideoRow, NewQuizAnswerRow, NewQuizQuestionRow,
    QuizAnswerRow, QuizQuestionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{course_documents, course_quizzes, course_videos, courses, quiz_answers, quiz_questions};

/// Diesel-backed implementation of the `CourseRepository` port.
///
/// The partial unique index on active titles backs the duplicate-title
/// invariant; quiz insertion writes the whole containment chain inside one
/// transaction.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CourseRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: &diesel::result::Error, title: &str) -> CourseRepositoryError {
    match classify(error) {
        DbFailure::UniqueViolation => CourseRepositoryError::duplicate_title(title),
        DbFailure::Connection(message) => CourseRepositoryError::connection(message),
        DbFailure::Other(message) => CourseRepositoryError::query(message),
    }
}

fn map_read_error(error: &diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(error, "")
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let price = Price::from_minor_units(row.price_minor_units)
        .map_err(|err| CourseRepositoryError::query(format!("corrupt price column: {err}")))?;
    Ok(Course {
        id: row.id,
        title: row.title,
        description: row.description,
        price,
        category_id: row.category_id,
        is_published: row.is_published,
        lifecycle: lifecycle_from_label(&row.lifecycle, "course", row.id),
    })
}

fn row_to_video(row: CourseVideoRow) -> CourseVideo {
    CourseVideo {
        id: row.id,
        course_id: row.course_id,
        title: row.title,
        file_name: row.file_name,
        file_size: row.file_size,
        order: row.display_order,
        created_at: row.created_at,
        lifecycle: lifecycle_from_label(&row.lifecycle, "course video", row.id),
    }
}

fn row_to_document(row: CourseDocumentRow) -> CourseDocument {
    CourseDocument {
        id: row.id,
        course_id: row.course_id,
        title: row.title,
        file_name: row.file_name,
        file_size: row.file_size,
        order: row.display_order,
        created_at: row.created_at,
        lifecycle: lifecycle_from_label(&row.lifecycle, "course document", row.id),
    }
}

fn assemble_quizzes(
    quiz_rows: Vec<CourseQuizRow>,
    question_rows: Vec<QuizQuestionRow>,
    answer_rows: Vec<QuizAnswerRow>,
) -> Vec<QuizWithQuestions> {
    quiz_rows
        .into_iter()
        .map(|quiz_row| {
            let quiz = CourseQuiz {
                id: quiz_row.id,
                course_id: quiz_row.course_id,
                title: quiz_row.title,
                lifecycle: lifecycle_from_label(&quiz_row.lifecycle, "quiz", quiz_row.id),
            };
            let questions = question_rows
                .iter()
                .filter(|q| q.quiz_id == quiz.id)
                .map(|question_row| {
                    let question = QuizQuestion {
                        id: question_row.id,
                        quiz_id: question_row.quiz_id,
                        text: question_row.text.clone(),
                        lifecycle: lifecycle_from_label(
                            &question_row.lifecycle,
                            "quiz question",
                            question_row.id,
                        ),
                    };
                    let answers = answer_rows
                        .iter()
                        .filter(|a| a.question_id == question.id)
                        .map(|answer_row| QuizAnswer {
                            id: answer_row.id,
                            question_id: answer_row.question_id,
                            text: answer_row.text.clone(),
                            is_correct: answer_row.is_correct,
                            lifecycle: lifecycle_from_label(
                                &answer_row.lifecycle,
                                "quiz answer",
                                answer_row.id,
                            ),
                        })
                        .collect();
                    QuestionWithAnswers { question, answers }
                })
                .collect();
            QuizWithQuestions { quiz, questions }
        })
        .collect()
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCourseRow {
            id: course.id,
            title: course.title.as_str(),
            description: course.description.as_str(),
            price_minor_units: course.price.minor_units(),
            category_id: course.category_id,
            is_published: course.is_published,
            lifecycle: course.lifecycle.as_str(),
        };

        diesel::insert_into(courses::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err, &course.title))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(id))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(&err))?;

        row.map(row_to_course).transpose()
    }

    async fn find_active_by_title(
        &self,
        title: &str,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::title.eq(title))
            .filter(courses::lifecycle.eq(Lifecycle::Active.as_str()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(&err))?;

        row.map(row_to_course).transpose()
    }

    async fn list_active(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::lifecycle.eq(Lifecycle::Active.as_str()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        rows.into_iter().map(row_to_course).collect()
    }

    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            courses::table
                .filter(courses::id.eq(id))
                .filter(courses::lifecycle.eq(Lifecycle::Active.as_str())),
        )
        .set(courses::is_published.eq(published))
        .execute(&mut conn)
        .await
        .map_err(|err| map_read_error(&err))?;

        Ok(updated > 0)
    }

    async fn insert_video(&self, video: &CourseVideo) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCourseVideoRow {
            id: video.id,
            course_id: video.course_id,
            title: video.title.as_str(),
            file_name: video.file_name.as_str(),
            file_size: video.file_size,
            display_order: video.order,
            lifecycle: video.lifecycle.as_str(),
        };

        diesel::insert_into(course_videos::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_read_error(&err))
    }

    async fn insert_document(
        &self,
        document: &CourseDocument,
    ) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCourseDocumentRow {
            id: document.id,
            course_id: document.course_id,
            title: document.title.as_str(),
            file_name: document.file_name.as_str(),
            file_size: document.file_size,
            display_order: document.order,
            lifecycle: document.lifecycle.as_str(),
        };

        diesel::insert_into(course_documents::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_read_error(&err))
    }

    async fn insert_quiz(&self, quiz: &QuizWithQuestions) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(course_quizzes::table)
                    .values(NewCourseQuizRow {
                        id: quiz.quiz.id,
                        course_id: quiz.quiz.course_id,
                        title: quiz.quiz.title.as_str(),
                        lifecycle: quiz.quiz.lifecycle.as_str(),
                    })
                    .execute(conn)
                    .await?;

                for entry in &quiz.questions {
                    diesel::insert_into(quiz_questions::table)
                        .values(NewQuizQuestionRow {
                            id: entry.question.id,
                            quiz_id: entry.question.quiz_id,
                            text: entry.question.text.as_str(),
                            lifecycle: entry.question.lifecycle.as_str(),
                        })
                        .execute(conn)
                        .await?;

                    for answer in &entry.answers {
                        diesel::insert_into(quiz_answers::table)
                            .values(NewQuizAnswerRow {
                                id: answer.id,
                                question_id: answer.question_id,
                                text: answer.text.as_str(),
                                is_correct: answer.is_correct,
                                lifecycle: answer.lifecycle.as_str(),
                            })
                            .execute(conn)
                            .await?;
                    }
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_read_error(&err))
    }

    async fn content(&self, course_id: Uuid) -> Result<CourseContent, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let active = Lifecycle::Active.as_str();

        let video_rows: Vec<CourseVideoRow> = course_videos::table
            .filter(course_videos::course_id.eq(course_id))
            .filter(course_videos::lifecycle.eq(active))
            .select(CourseVideoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        let document_rows: Vec<CourseDocumentRow> = course_documents::table
            .filter(course_documents::course_id.eq(course_id))
            .filter(course_documents::lifecycle.eq(active))
            .select(CourseDocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        let quiz_rows: Vec<CourseQuizRow> = course_quizzes::table
            .filter(course_quizzes::course_id.eq(course_id))
            .filter(course_quizzes::lifecycle.eq(active))
            .select(CourseQuizRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        let quiz_ids: Vec<Uuid> = quiz_rows.iter().map(|q| q.id).collect();
        let question_rows: Vec<QuizQuestionRow> = quiz_questions::table
            .filter(quiz_questions::quiz_id.eq_any(&quiz_ids))
            .filter(quiz_questions::lifecycle.eq(active))
            .select(QuizQuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        let question_ids: Vec<Uuid> = question_rows.iter().map(|q| q.id).collect();
        let answer_rows: Vec<QuizAnswerRow> = quiz_answers::table
            .filter(quiz_answers::question_id.eq_any(&question_ids))
            .filter(quiz_answers::lifecycle.eq(active))
            .select(QuizAnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        Ok(CourseContent {
            videos: video_rows.into_iter().map(row_to_video).collect(),
            documents: document_rows.into_iter().map(row_to_document).collect(),
            quizzes: assemble_quizzes(quiz_rows, question_rows, answer_rows),
        })
    }
}
