//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Listing and looking up exercises
//!   - Serving new questions and grading submitted answers
//!   - Serving hints
//!   - Driving timed exams (start, answer, status, finish)

use std::time::Instant;

use tracing::{info, instrument};

use crate::domain::{Category, Difficulty, ExerciseResult, Question, Submission};
use crate::error::AppError;
use crate::exam::{AnswerOutcome, Exam};
use crate::exercises::check_answer;
use crate::protocol::{to_exam_result, to_exam_status, to_exercise_out, ExamResultOut, ExamStatusOut, ExerciseOut};
use crate::registry::{self, ExerciseInfo};
use crate::state::AppState;
use crate::util::trunc_for_log;

pub fn list_exercises(category: Option<Category>) -> Vec<ExerciseOut> {
  match category {
    Some(c) => registry::by_category(c).into_iter().map(to_exercise_out).collect(),
    None => registry::all().iter().map(to_exercise_out).collect(),
  }
}

pub fn find_exercise(id: &str) -> Result<&'static ExerciseInfo, AppError> {
  registry::find(id).ok_or_else(|| AppError::NotFound(format!("exercise '{}'", id)))
}

#[instrument(level = "info", skip(state), fields(%exercise_id))]
pub async fn new_question(
  state: &AppState,
  exercise_id: &str,
  difficulty: Option<Difficulty>,
) -> Result<Question, AppError> {
  let info = find_exercise(exercise_id)?;
  let difficulty = difficulty.unwrap_or_default();
  let q = state.new_question(info.kind, difficulty).await;
  info!(target: "exercise", exercise = %info.kind, %difficulty, id = %q.id, "Question served");
  Ok(q)
}

#[instrument(level = "info", skip(state, submission), fields(%question_id))]
pub async fn submit_answer(
  state: &AppState,
  question_id: &str,
  submission: &Submission,
) -> Result<ExerciseResult, AppError> {
  let q = state
    .get_question(question_id)
    .await
    .ok_or_else(|| AppError::NotFound(format!("question '{}'", question_id)))?;
  let result = check_answer(&q, submission);
  info!(
    target: "exercise",
    id = %q.id,
    exercise = %q.kind,
    answer = %trunc_for_log(&submission.summary(), 120),
    correct = result.is_correct,
    "Answer graded"
  );
  Ok(result)
}

#[instrument(level = "info", skip(state), fields(%question_id))]
pub async fn get_hints(state: &AppState, question_id: &str) -> Result<Vec<String>, AppError> {
  state
    .get_question(question_id)
    .await
    .map(|q| q.hints)
    .ok_or_else(|| AppError::NotFound(format!("question '{}'", question_id)))
}

#[instrument(level = "info", skip(state))]
pub async fn start_exam(state: &AppState) -> Result<ExamStatusOut, AppError> {
  let now = Instant::now();
  let exam = Exam::start(&state.settings.exam, now, &mut rand::thread_rng()).map_err(AppError::BadRequest)?;
  let status = to_exam_status(&exam, now);
  state.insert_exam(exam).await;
  Ok(status)
}

/// Current exam state. An exam whose time ran out is graded on first sight.
#[instrument(level = "info", skip(state), fields(%exam_id))]
pub async fn exam_status(state: &AppState, exam_id: &str) -> Result<ExamStatusOut, AppError> {
  let now = Instant::now();
  state
    .update_exam(exam_id, |exam| {
      if !exam.is_finished() && exam.is_expired(now) {
        exam.finish();
      }
      to_exam_status(exam, now)
    })
    .await
    .ok_or_else(|| AppError::NotFound(format!("exam '{}'", exam_id)))
}

#[instrument(level = "info", skip(state, answer), fields(%exam_id, answer_len = answer.len()))]
pub async fn exam_answer(state: &AppState, exam_id: &str, answer: String) -> Result<ExamStatusOut, AppError> {
  let now = Instant::now();
  state
    .update_exam(exam_id, |exam| {
      let outcome = exam.record_answer(answer, now).map_err(AppError::Conflict)?;
      if outcome == AnswerOutcome::Expired {
        info!(target: "exam", id = %exam.id, "Answer arrived after the time limit");
      }
      Ok(to_exam_status(exam, now))
    })
    .await
    .ok_or_else(|| AppError::NotFound(format!("exam '{}'", exam_id)))?
}

#[instrument(level = "info", skip(state), fields(%exam_id))]
pub async fn finish_exam(state: &AppState, exam_id: &str) -> Result<ExamResultOut, AppError> {
  state
    .update_exam(exam_id, |exam| {
      exam.finish();
      to_exam_result(exam)
    })
    .await
    .ok_or_else(|| AppError::NotFound(format!("exam '{}'", exam_id)))
}
