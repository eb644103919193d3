//! Row structs bridging Diesel and the domain entities.
//!
//! Read rows derive `Queryable`/`Selectable`; insert rows are separate
//! borrowed structs so columns with database defaults (`created_at`,
//! `enrolled_at`) stay out of the insert statements.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    categories, course_documents, course_quizzes, course_videos, courses, enrollments,
    quiz_answers, quiz_questions, students, users,
};

/// Read model for `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_digest: String,
    pub is_staff: bool,
    pub lifecycle: String,
}

/// Insert model for `users`.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_digest: &'a str,
    pub is_staff: bool,
    pub lifecycle: &'a str,
}

/// Read model for `students`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lifecycle: String,
}

/// Insert model for `students`.
#[derive(Debug, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lifecycle: &'a str,
}

/// Read model for `categories`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub lifecycle: String,
}

/// Insert model for `categories`.
#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub parent_id: Option<Uuid>,
    pub lifecycle: &'a str,
}

/// Read model for `courses`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_minor_units: i64,
    pub category_id: Uuid,
    pub is_published: bool,
    pub lifecycle: String,
}

/// Insert model for `courses`.
#[derive(Debug, Insertable)]
#[diesel(table_name = courses)]
pub struct NewCourseRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub price_minor_units: i64,
    pub category_id: Uuid,
    pub is_published: bool,
    pub lifecycle: &'a str,
}

/// Read model for `course_videos`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = course_videos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseVideoRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub file_name: String,
    pub file_size: i64,
    pub display_order: i32,
    pub lifecycle: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model for `course_videos`.
#[derive(Debug, Insertable)]
#[diesel(table_name = course_videos)]
pub struct NewCourseVideoRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: &'a str,
    pub file_name: &'a str,
    pub file_size: i64,
    pub display_order: i32,
    pub lifecycle: &'a str,
}

/// Read model for `course_documents`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = course_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseDocumentRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub file_name: String,
    pub file_size: i64,
    pub display_order: i32,
    pub lifecycle: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model for `course_documents`.
#[derive(Debug, Insertable)]
#[diesel(table_name = course_documents)]
pub struct NewCourseDocumentRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: &'a str,
    pub file_name: &'a str,
    pub file_size: i64,
    pub display_order: i32,
    pub lifecycle: &'a str,
}

/// Read model for `course_quizzes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = course_quizzes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseQuizRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub lifecycle: String,
}

/// Insert model for `course_quizzes`.
#[derive(Debug, Insertable)]
#[diesel(table_name = course_quizzes)]
pub struct NewCourseQuizRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: &'a str,
    pub lifecycle: &'a str,
}

/// Read model for `quiz_questions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quiz_questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuizQuestionRow {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: String,
    pub lifecycle: String,
}

/// Insert model for `quiz_questions`.
#[derive(Debug, Insertable)]
#[diesel(table_name = quiz_questions)]
pub struct NewQuizQuestionRow<'a> {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: &'a str,
    pub lifecycle: &'a str,
}

/// Read model for `quiz_answers`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quiz_answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuizAnswerRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub is_correct: bool,
    pub lifecycle: String,
}

/// Insert model for `quiz_answers`.
#[derive(Debug, Insertable)]
#[diesel(table_name = quiz_answers)]
pub struct NewQuizAnswerRow<'a> {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: &'a str,
    pub is_correct: bool,
    pub lifecycle: &'a str,
}

/// Read model for `enrollments`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EnrollmentRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub lifecycle: String,
}

/// Insert model for `enrollments`.
///
/// `enrolled_at` is intentionally absent: the column default stamps the
/// commit time.
#[derive(Debug, Insertable)]
#[diesel(table_name = enrollments)]
pub struct NewEnrollmentRow<'a> {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub lifecycle: &'a str,
}
