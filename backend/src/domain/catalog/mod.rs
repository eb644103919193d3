//! Catalog entities: categories, courses, content items, and quizzes.
//!
//! Types here are validated on construction and carry no behaviour beyond
//! their invariants; the services in [`crate::domain`] orchestrate them.

pub mod category;
pub mod content;
pub mod course;
pub mod quiz;
pub mod validation;

pub use category::{Category, RootCategory, Subcategory};
pub use content::{ContentItem, CourseDocument, CourseVideo, sort_for_display};
pub use course::{Course, Price};
pub use quiz::{
    AnswerDraft, CourseQuiz, QuestionDraft, QuestionWithAnswers, QuizAnswer, QuizDraft,
    QuizQuestion, QuizWithQuestions,
};
pub use validation::{CatalogValidationError, MAX_TEXT_FIELD_LEN, validate_body, validate_text};
