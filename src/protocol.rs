//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Answers are never sent with a question; they only come back in results.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Difficulty, ExerciseKind, ExerciseResult, Icon, Question, QuestionMeta, Submission};
use crate::exam::{Exam, Verdict};
use crate::exercises::check_answer;
use crate::registry::ExerciseInfo;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListExercises {
        #[serde(default)]
        category: Option<Category>,
    },
    NewQuestion {
        exercise: String,
        #[serde(default)]
        difficulty: Option<Difficulty>,
    },
    SubmitAnswer {
        #[serde(rename = "questionId")]
        question_id: String,
        answer: Submission,
    },
    Hint {
        #[serde(rename = "questionId")]
        question_id: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Exercises {
        exercises: Vec<ExerciseOut>,
    },
    Question {
        question: QuestionOut,
    },
    AnswerResult {
        result: ExerciseResult,
    },
    Hint {
        hints: Vec<String>,
    },
    Error {
        message: String,
    },
}

/// Catalog entry as seen by clients.
#[derive(Debug, Serialize)]
pub struct ExerciseOut {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub category: Category,
}

pub fn to_exercise_out(e: &ExerciseInfo) -> ExerciseOut {
    ExerciseOut {
        id: e.id(),
        title: e.title,
        description: e.description,
        icon: e.icon,
        category: e.category,
    }
}

/// Question as delivered to the student (no answer, no hints).
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub id: String,
    pub exercise: ExerciseKind,
    pub display: String,
    /// Field names to fill in for multi-part answers; empty for a single answer.
    pub fields: Vec<String>,
    /// Substitution point for evaluation questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    pub has_hints: bool,
}

pub fn to_question_out(q: &Question) -> QuestionOut {
    QuestionOut {
        id: q.id.clone(),
        exercise: q.kind,
        display: q.display.clone(),
        fields: q
            .parts
            .as_ref()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default(),
        x: match q.meta {
            QuestionMeta::Evaluation { x } => Some(x),
            QuestionMeta::None => None,
        },
        has_hints: !q.hints.is_empty(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ExerciseListQuery {
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub exercise: String,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: Submission,
}

#[derive(Debug, Deserialize)]
pub struct HintQuery {
    #[serde(rename = "questionId")]
    pub question_id: String,
}
#[derive(Debug, Serialize)]
pub struct HintOut {
    pub hints: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExamAnswerIn {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ExamStatusOut {
    pub id: String,
    pub total: usize,
    /// Zero-based index of the question awaiting an answer.
    pub current: usize,
    pub finished: bool,
    pub remaining_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ExamResultOut>,
}

pub fn to_exam_status(exam: &Exam, now: Instant) -> ExamStatusOut {
    ExamStatusOut {
        id: exam.id.clone(),
        total: exam.questions.len(),
        current: exam.current_index(),
        finished: exam.is_finished(),
        remaining_secs: if exam.is_finished() { 0 } else { exam.remaining(now).as_secs() },
        question: exam.current_question().map(|q| to_question_out(&q.question)),
        result: exam.is_finished().then(|| to_exam_result(exam)),
    }
}

#[derive(Debug, Serialize)]
pub struct ExamResultOut {
    pub score: usize,
    pub total: usize,
    pub verdict: Verdict,
    pub label: &'static str,
    pub questions: Vec<ExamReviewOut>,
}

#[derive(Debug, Serialize)]
pub struct ExamReviewOut {
    pub display: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

pub fn to_exam_result(exam: &Exam) -> ExamResultOut {
    let questions = exam
        .questions
        .iter()
        .map(|eq| {
            // Re-grading is deterministic; it only supplies the readable answer.
            let graded = check_answer(
                &eq.question,
                &Submission::Text(eq.user_answer.clone().unwrap_or_default()),
            );
            ExamReviewOut {
                display: eq.question.display.clone(),
                user_answer: eq.user_answer.clone(),
                correct_answer: graded.correct_answer,
                is_correct: eq.is_correct.unwrap_or(false),
            }
        })
        .collect();

    let verdict = exam.verdict();
    ExamResultOut {
        score: exam.score(),
        total: exam.questions.len(),
        verdict,
        label: verdict.label(),
        questions,
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
