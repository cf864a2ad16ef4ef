//! Timed exam sessions: a fixed batch of single-answer questions, graded at the end.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ExamSettings;
use crate::domain::{ExerciseKind, Question, Submission};
use crate::exercises::{check_answer, generate};
use crate::registry;

/// A question plus what the student did with it.
#[derive(Clone, Debug)]
pub struct ExamQuestion {
  pub question: Question,
  pub user_answer: Option<String>,
  pub is_correct: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  Excellent,
  VeryGood,
  Pass,
  NeedsReview,
}

impl Verdict {
  pub fn label(self) -> &'static str {
    match self {
      Verdict::Excellent => "Excellent!",
      Verdict::VeryGood => "Very good!",
      Verdict::Pass => "Pass",
      Verdict::NeedsReview => "Needs review",
    }
  }
}

/// What happened to a submitted exam answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
  /// Stored; the exam moved on to the next question.
  Recorded,
  /// Stored; it was the last question and the exam is now graded.
  Finished,
  /// Time ran out before the answer arrived; not stored, exam graded.
  Expired,
}

#[derive(Clone, Debug)]
pub struct Exam {
  pub id: String,
  pub questions: Vec<ExamQuestion>,
  current: usize,
  started_at: Instant,
  time_limit: Duration,
  finished: bool,
}

impl Exam {
  /// Draw `question_count` questions from every single-answer kind not excluded.
  pub fn start<R: Rng + ?Sized>(settings: &ExamSettings, now: Instant, rng: &mut R) -> Result<Exam, String> {
    if settings.question_count == 0 {
      return Err("An exam needs at least one question".into());
    }
    let pool: Vec<ExerciseKind> = registry::all()
      .iter()
      .map(|e| e.kind)
      .filter(|k| !k.is_multi_part() && !settings.exclude.contains(k))
      .collect();
    if pool.is_empty() {
      return Err("No exercise kinds left for exams after exclusions".into());
    }

    let mut questions = Vec::with_capacity(settings.question_count);
    for _ in 0..settings.question_count {
      let kind = *pool.choose(rng).ok_or_else(|| "Empty exam pool".to_string())?;
      questions.push(ExamQuestion {
        question: generate(kind, settings.difficulty, rng),
        user_answer: None,
        is_correct: None,
      });
    }

    let exam = Exam {
      id: Uuid::new_v4().to_string(),
      questions,
      current: 0,
      started_at: now,
      time_limit: Duration::from_secs(settings.time_limit_secs),
      finished: false,
    };
    info!(target: "exam", id = %exam.id, questions = exam.questions.len(), difficulty = %settings.difficulty, limit_secs = settings.time_limit_secs, "Exam started");
    Ok(exam)
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  /// Index of the question awaiting an answer.
  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn current_question(&self) -> Option<&ExamQuestion> {
    if self.finished { None } else { self.questions.get(self.current) }
  }

  pub fn remaining(&self, now: Instant) -> Duration {
    self
      .time_limit
      .saturating_sub(now.saturating_duration_since(self.started_at))
  }

  pub fn is_expired(&self, now: Instant) -> bool {
    self.remaining(now).is_zero()
  }

  /// True once `retention` has passed since the time limit ran out.
  pub fn is_stale(&self, now: Instant, retention: Duration) -> bool {
    now.saturating_duration_since(self.started_at) > self.time_limit + retention
  }

  /// Store the answer for the current question and move on.
  pub fn record_answer(&mut self, answer: String, now: Instant) -> Result<AnswerOutcome, String> {
    if self.finished {
      return Err(format!("Exam {} is already finished", self.id));
    }
    if self.is_expired(now) {
      self.finish();
      return Ok(AnswerOutcome::Expired);
    }

    let Some(slot) = self.questions.get_mut(self.current) else {
      self.finish();
      return Ok(AnswerOutcome::Finished);
    };
    slot.user_answer = Some(answer);
    debug!(target: "exam", id = %self.id, index = self.current, "Exam answer recorded");

    self.current += 1;
    if self.current >= self.questions.len() {
      self.finish();
      Ok(AnswerOutcome::Finished)
    } else {
      Ok(AnswerOutcome::Recorded)
    }
  }

  /// Grade every question. Unanswered ones are graded as empty answers. Idempotent.
  pub fn finish(&mut self) {
    if self.finished {
      return;
    }
    for eq in &mut self.questions {
      let submission = Submission::Text(eq.user_answer.clone().unwrap_or_default());
      eq.is_correct = Some(check_answer(&eq.question, &submission).is_correct);
    }
    self.finished = true;
    info!(target: "exam", id = %self.id, score = self.score(), total = self.questions.len(), "Exam finished");
  }

  pub fn score(&self) -> usize {
    self.questions.iter().filter(|q| q.is_correct == Some(true)).count()
  }

  pub fn verdict(&self) -> Verdict {
    let (score, total) = (self.score(), self.questions.len().max(1));
    if score * 10 >= total * 9 {
      Verdict::Excellent
    } else if score * 10 >= total * 7 {
      Verdict::VeryGood
    } else if score * 10 >= total * 5 {
      Verdict::Pass
    } else {
      Verdict::NeedsReview
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Difficulty;
  use rand::{rngs::StdRng, SeedableRng};

  fn settings(count: usize) -> ExamSettings {
    ExamSettings { question_count: count, ..ExamSettings::default() }
  }

  #[test]
  fn exams_skip_multi_part_questions() {
    let mut rng = StdRng::seed_from_u64(1);
    let exam = Exam::start(&settings(60), Instant::now(), &mut rng).expect("exam");
    assert_eq!(exam.questions.len(), 60);
    assert!(exam.questions.iter().all(|q| !q.question.kind.is_multi_part()));
  }

  #[test]
  fn exclusions_are_honored() {
    let mut rng = StdRng::seed_from_u64(2);
    let cfg = ExamSettings {
      exclude: vec![ExerciseKind::MonomialOps, ExerciseKind::IdentityExpand, ExerciseKind::IdentityFactor],
      difficulty: Difficulty::Hard,
      ..settings(8)
    };
    let exam = Exam::start(&cfg, Instant::now(), &mut rng).expect("exam");
    assert!(exam.questions.iter().all(|q| q.question.kind == ExerciseKind::PolynomialEval));

    let mut cfg = cfg;
    cfg.exclude.push(ExerciseKind::PolynomialEval);
    assert!(Exam::start(&cfg, Instant::now(), &mut rng).is_err());
    assert!(Exam::start(&settings(0), Instant::now(), &mut rng).is_err());
  }

  #[test]
  fn answering_everything_grades_the_exam() {
    let mut rng = StdRng::seed_from_u64(3);
    let now = Instant::now();
    let mut exam = Exam::start(&settings(4), now, &mut rng).expect("exam");

    let first = exam.questions[0].question.answer.clone();
    assert_eq!(exam.record_answer(first, now), Ok(AnswerOutcome::Recorded));
    assert_eq!(exam.current_index(), 1);
    assert_eq!(exam.record_answer("?".into(), now), Ok(AnswerOutcome::Recorded));
    let third = exam.questions[2].question.answer.clone();
    assert_eq!(exam.record_answer(third, now), Ok(AnswerOutcome::Recorded));
    assert_eq!(exam.record_answer("?".into(), now), Ok(AnswerOutcome::Finished));

    assert!(exam.is_finished());
    assert!(exam.current_question().is_none());
    assert_eq!(exam.score(), 2);
    assert_eq!(exam.verdict(), Verdict::Pass);
    assert!(exam.record_answer("late".into(), now).is_err());
  }

  #[test]
  fn answers_after_the_deadline_close_the_exam() {
    let mut rng = StdRng::seed_from_u64(4);
    let start = Instant::now();
    let cfg = ExamSettings { time_limit_secs: 60, ..settings(3) };
    let mut exam = Exam::start(&cfg, start, &mut rng).expect("exam");

    assert_eq!(exam.remaining(start + Duration::from_secs(20)), Duration::from_secs(40));
    let late = start + Duration::from_secs(61);
    assert!(exam.is_expired(late));
    let answer = exam.questions[0].question.answer.clone();
    assert_eq!(exam.record_answer(answer, late), Ok(AnswerOutcome::Expired));
    assert!(exam.is_finished());
    assert_eq!(exam.score(), 0);
    assert!(exam.questions.iter().all(|q| q.user_answer.is_none() && q.is_correct == Some(false)));
    assert_eq!(exam.verdict(), Verdict::NeedsReview);

    let retention = Duration::from_secs(30);
    assert!(!exam.is_stale(start + Duration::from_secs(80), retention));
    assert!(exam.is_stale(start + Duration::from_secs(91), retention));
  }

  #[test]
  fn perfect_exam_is_excellent() {
    let mut rng = StdRng::seed_from_u64(5);
    let now = Instant::now();
    let mut exam = Exam::start(&settings(10), now, &mut rng).expect("exam");
    while let Some(q) = exam.current_question() {
      let answer = q.question.answer.clone();
      exam.record_answer(answer, now).expect("record");
    }
    assert_eq!(exam.score(), 10);
    assert_eq!(exam.verdict(), Verdict::Excellent);
    assert_eq!(Verdict::Excellent.label(), "Excellent!");
  }
}
