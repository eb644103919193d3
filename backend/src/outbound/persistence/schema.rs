//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//!
//! Constraints the domain relies on:
//! - `categories.name` carries a unique constraint.
//! - `courses.title` carries a unique index scoped to `lifecycle = 'active'`.
//! - `users.email` carries a unique index scoped to `lifecycle = 'active'`.
//! - `enrollments (student_id, course_id)` carries a unique index scoped to
//!   `lifecycle = 'active'`.
//! - `enrollments.enrolled_at` defaults to `now()` so the timestamp is
//!   assigned at commit time.

diesel::table! {
    /// User identity records.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalised email address; unique among active rows.
        email -> Varchar,
        /// Given name, title-cased.
        first_name -> Varchar,
        /// Family name, title-cased.
        last_name -> Varchar,
        /// Salted password digest, `salt$digest` in hex.
        password_digest -> Varchar,
        /// Whether the user may perform staff-only operations.
        is_staff -> Bool,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Students, one-to-one with users.
    students (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the linked user.
        user_id -> Uuid,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Two-level category hierarchy.
    ///
    /// A null `parent_id` marks a root category; a non-null one references
    /// the owning root. Depth beyond two levels is rejected by the domain
    /// before rows reach this table.
    categories (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name; unique across both tiers.
        name -> Varchar,
        /// Owning root category, when this row is a subcategory.
        parent_id -> Nullable<Uuid>,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Courses owned by categories.
    courses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Course title; unique among active rows.
        title -> Varchar,
        /// Detailed course description.
        description -> Text,
        /// Non-negative price in minor currency units.
        price_minor_units -> Int8,
        /// Foreign key to the owning category.
        category_id -> Uuid,
        /// Whether students may enroll.
        is_published -> Bool,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Videos attached to courses.
    course_videos (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the owning course.
        course_id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Declared file name, extension included.
        file_name -> Varchar,
        /// Declared file size in bytes.
        file_size -> Int8,
        /// Position in the display sequence.
        display_order -> Int4,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp; display tie-breaker.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Documents attached to courses.
    course_documents (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the owning course.
        course_id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Declared file name, extension included.
        file_name -> Varchar,
        /// Declared file size in bytes.
        file_size -> Int8,
        /// Position in the display sequence.
        display_order -> Int4,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp; display tie-breaker.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Quizzes attached to courses.
    course_quizzes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the owning course.
        course_id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Questions belonging to quizzes.
    quiz_questions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the owning quiz.
        quiz_id -> Uuid,
        /// Question body.
        text -> Text,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answer options belonging to questions.
    quiz_answers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the owning question.
        question_id -> Uuid,
        /// Answer option text.
        text -> Varchar,
        /// Whether this option is the correct one.
        is_correct -> Bool,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Enrollments linking students and courses.
    enrollments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the enrolled student.
        student_id -> Uuid,
        /// Foreign key to the enrolled course.
        course_id -> Uuid,
        /// Commit-time enrollment timestamp, defaulted by the database.
        enrolled_at -> Timestamptz,
        /// Lifecycle label: `active` or `archived`.
        lifecycle -> Varchar,
    }
}

diesel::joinable!(students -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(students, users);
