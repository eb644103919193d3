//! Quiz containment chain: quiz, questions, answers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{CatalogValidationError, validate_body, validate_text};
use crate::domain::Lifecycle;

/// A quiz belonging to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQuiz {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the owning course.
    pub course_id: Uuid,
    /// Display title.
    pub title: String,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

/// A question belonging to a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the owning quiz.
    pub quiz_id: Uuid,
    /// Question body.
    pub text: String,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

/// An answer option belonging to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier of the owning question.
    pub question_id: Uuid,
    /// Answer option text.
    pub text: String,
    /// Whether this option is the correct one.
    pub is_correct: bool,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
}

/// A question together with its answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithAnswers {
    /// The question itself.
    pub question: QuizQuestion,
    /// Its answer options, in insertion order.
    pub answers: Vec<QuizAnswer>,
}

/// A quiz together with its full containment chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizWithQuestions {
    /// The quiz itself.
    pub quiz: CourseQuiz,
    /// Its questions, in insertion order.
    pub questions: Vec<QuestionWithAnswers>,
}

/// Unvalidated answer input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDraft {
    /// Answer option text.
    pub text: String,
    /// Whether this option is the correct one.
    #[serde(default)]
    pub is_correct: bool,
}

/// Unvalidated question input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    /// Question body.
    pub text: String,
    /// Answer options for the question.
    #[serde(default)]
    pub answers: Vec<AnswerDraft>,
}

/// Unvalidated quiz input covering the whole containment chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
    /// Quiz title.
    pub title: String,
    /// Questions for the quiz.
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

impl QuizDraft {
    /// Validate the draft and materialise the full containment chain for
    /// `course_id`.
    pub fn build(self, course_id: Uuid) -> Result<QuizWithQuestions, CatalogValidationError> {
        let quiz = CourseQuiz {
            id: Uuid::new_v4(),
            course_id,
            title: validate_text(self.title, "title")?,
            lifecycle: Lifecycle::Active,
        };

        let mut questions = Vec::with_capacity(self.questions.len());
        for question_draft in self.questions {
            let question = QuizQuestion {
                id: Uuid::new_v4(),
                quiz_id: quiz.id,
                text: validate_body(question_draft.text, "question")?,
                lifecycle: Lifecycle::Active,
            };
            let mut answers = Vec::with_capacity(question_draft.answers.len());
            for answer_draft in question_draft.answers {
                answers.push(QuizAnswer {
                    id: Uuid::new_v4(),
                    question_id: question.id,
                    text: validate_text(answer_draft.text, "answer")?,
                    is_correct: answer_draft.is_correct,
                    lifecycle: Lifecycle::Active,
                });
            }
            questions.push(QuestionWithAnswers { question, answers });
        }

        Ok(QuizWithQuestions { quiz, questions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuizDraft {
        QuizDraft {
            title: "Basics".into(),
            questions: vec![QuestionDraft {
                text: "What is 2 + 2?".into(),
                answers: vec![
                    AnswerDraft {
                        text: "4".into(),
                        is_correct: true,
                    },
                    AnswerDraft {
                        text: "5".into(),
                        is_correct: false,
                    },
                ],
            }],
        }
    }

    #[test]
    fn build_links_the_containment_chain() {
        let course_id = Uuid::new_v4();
        let quiz = draft().build(course_id).expect("valid draft");

        assert_eq!(quiz.quiz.course_id, course_id);
        let question = quiz.questions.first().expect("one question");
        assert_eq!(question.question.quiz_id, quiz.quiz.id);
        for answer in &question.answers {
            assert_eq!(answer.question_id, question.question.id);
        }
    }

    #[test]
    fn build_preserves_correctness_flags() {
        let quiz = draft().build(Uuid::new_v4()).expect("valid draft");
        let answers = &quiz.questions.first().expect("one question").answers;
        let correct: Vec<bool> = answers.iter().map(|a| a.is_correct).collect();
        assert_eq!(correct, vec![true, false]);
    }

    #[test]
    fn build_rejects_blank_answer_text() {
        let mut bad = draft();
        if let Some(question) = bad.questions.first_mut() {
            if let Some(answer) = question.answers.first_mut() {
                answer.text = "  ".into();
            }
        }
        let err = bad.build(Uuid::new_v4()).expect_err("blank answer rejected");
        assert_eq!(err.field(), "answer");
    }
}
