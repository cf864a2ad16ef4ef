//! Application state: generated questions, running exams and settings.
//!
//! Questions are kept by id so that an answer is always graded against the
//! exact instance the student saw. The store is bounded; the oldest question
//! is evicted first. Exams are dropped once their results have been
//! available for `EXAM_RETENTION` past the time limit.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::{load_settings_from_env, Settings};
use crate::domain::{Category, Difficulty, ExerciseKind, Question};
use crate::exam::Exam;
use crate::exercises::generate;
use crate::registry;

const EXAM_RETENTION: Duration = Duration::from_secs(60 * 60);

/// Insertion-ordered, capacity-bounded map of questions by id.
#[derive(Debug)]
pub struct QuestionStore {
    by_id: HashMap<String, Question>,
    order: VecDeque<String>,
    capacity: usize,
}

impl QuestionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            by_id: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn insert(&mut self, q: Question) {
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(old) => {
                    self.by_id.remove(&old);
                }
                None => break,
            }
        }
        self.order.push_back(q.id.clone());
        self.by_id.insert(q.id.clone(), q);
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<RwLock<QuestionStore>>,
    pub exams: Arc<RwLock<HashMap<String, Exam>>>,
    pub settings: Settings,
}

impl AppState {
    /// Build state from env: load settings (or defaults) and log the catalog.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::with_settings(load_settings_from_env().unwrap_or_default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        for category in Category::ALL {
            let ids: Vec<&str> = registry::by_category(category).iter().map(|e| e.id()).collect();
            info!(target: "exercise", ?category, exercises = ?ids, "Startup exercise catalog");
        }
        info!(
            target: "algebra_trainer",
            exam_questions = settings.exam.question_count,
            exam_limit_secs = settings.exam.time_limit_secs,
            max_questions = settings.store.max_questions,
            "Settings in effect"
        );

        Self {
            questions: Arc::new(RwLock::new(QuestionStore::new(settings.store.max_questions))),
            exams: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    /// Generate a question and remember it for grading.
    #[instrument(level = "debug", skip(self))]
    pub async fn new_question(&self, kind: ExerciseKind, difficulty: Difficulty) -> Question {
        let q = generate(kind, difficulty, &mut rand::thread_rng());
        self.questions.write().await.insert(q.clone());
        q
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_question(&self, id: &str) -> Option<Question> {
        self.questions.read().await.get(id).cloned()
    }

    /// Store a new exam, dropping stale ones first.
    #[instrument(level = "debug", skip(self, exam), fields(id = %exam.id))]
    pub async fn insert_exam(&self, exam: Exam) {
        let now = Instant::now();
        let mut exams = self.exams.write().await;
        let before = exams.len();
        exams.retain(|_, e| !e.is_stale(now, EXAM_RETENTION));
        if exams.len() < before {
            debug!(target: "exam", dropped = before - exams.len(), "Dropped stale exams");
        }
        exams.insert(exam.id.clone(), exam);
    }

    /// Run `f` on the exam with `id`, if it exists.
    pub async fn update_exam<T>(&self, id: &str, f: impl FnOnce(&mut Exam) -> T) -> Option<T> {
        let mut exams = self.exams.write().await;
        exams.get_mut(id).map(f)
    }
}
