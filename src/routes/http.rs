//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and log include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", fields(category = ?q.category))]
pub async fn http_list_exercises(Query(q): Query<ExerciseListQuery>) -> impl IntoResponse {
  Json(list_exercises(q.category))
}

#[instrument(level = "info", fields(%id))]
pub async fn http_get_exercise(Path(id): Path<String>) -> Result<Json<ExerciseOut>, AppError> {
  let info = find_exercise(&id)?;
  Ok(Json(to_exercise_out(info)))
}

#[instrument(level = "info", skip(state), fields(exercise = %q.exercise, difficulty = ?q.difficulty))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionQuery>,
) -> Result<Json<QuestionOut>, AppError> {
  let question = new_question(&state, &q.exercise, q.difficulty).await?;
  info!(target: "exercise", id = %question.id, "HTTP question served");
  Ok(Json(to_question_out(&question)))
}

#[instrument(level = "info", skip(state, body), fields(question_id = %body.question_id))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<impl IntoResponse, AppError> {
  let result = submit_answer(&state, &body.question_id, &body.answer).await?;
  info!(target: "exercise", id = %body.question_id, correct = result.is_correct, "HTTP submit_answer evaluated");
  Ok(Json(result))
}

#[instrument(level = "info", skip(state), fields(question_id = %q.question_id))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Query(q): Query<HintQuery>,
) -> Result<Json<HintOut>, AppError> {
  let hints = get_hints(&state, &q.question_id).await?;
  Ok(Json(HintOut { hints }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_start_exam(State(state): State<Arc<AppState>>) -> Result<Json<ExamStatusOut>, AppError> {
  let status = start_exam(&state).await?;
  info!(target: "exam", id = %status.id, total = status.total, "HTTP exam started");
  Ok(Json(status))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_exam(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ExamStatusOut>, AppError> {
  Ok(Json(exam_status(&state, &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%id, answer_len = body.answer.len()))]
pub async fn http_post_exam_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<ExamAnswerIn>,
) -> Result<Json<ExamStatusOut>, AppError> {
  Ok(Json(exam_answer(&state, &id, body.answer).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_finish_exam(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ExamResultOut>, AppError> {
  let result = finish_exam(&state, &id).await?;
  info!(target: "exam", %id, score = result.score, total = result.total, "HTTP exam finished");
  Ok(Json(result))
}
