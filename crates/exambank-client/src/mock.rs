//! In-memory question bank for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use exambank_core::model::{ParsedQuestion, Student};

use crate::api::{
    BulkSubmitResponse, DashboardStats, NewExam, QuestionBank, QuestionPayload, StoredQuestion,
};
use crate::error::ApiError;

/// A question bank that stores everything in memory.
///
/// Can be told to fail every call, to exercise error paths.
pub struct MockQuestionBank {
    stored: Mutex<Vec<StoredQuestion>>,
    exams: Mutex<Vec<NewExam>>,
    students: Vec<Student>,
    fail_with: Option<u16>,
    call_count: AtomicU32,
}

impl MockQuestionBank {
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(Vec::new()),
            exams: Mutex::new(Vec::new()),
            students: Vec::new(),
            fail_with: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Seed the roster returned by `list_students`.
    pub fn with_students(mut self, students: Vec<Student>) -> Self {
        self.students = students;
        self
    }

    /// Make every call fail with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::new()
        }
    }

    /// Number of API calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Everything stored so far.
    pub fn stored(&self) -> Vec<StoredQuestion> {
        self.stored.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Exams created so far.
    pub fn exams(&self) -> Vec<NewExam> {
        self.exams.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn enter(&self) -> Result<(), ApiError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match self.fail_with {
            Some(status) => Err(ApiError::Api {
                status,
                message: "mock failure".into(),
            }),
            None => Ok(()),
        }
    }

    fn store(&self, question: QuestionPayload) -> Result<String, ApiError> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| ApiError::Network("mock store poisoned".into()))?;
        let id = format!("q{}", stored.len() + 1);
        stored.push(StoredQuestion {
            id: id.clone(),
            question,
        });
        Ok(id)
    }
}

impl Default for MockQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionBank for MockQuestionBank {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit_questions(
        &self,
        questions: &[ParsedQuestion],
    ) -> anyhow::Result<BulkSubmitResponse> {
        self.enter()?;
        let payload: Vec<QuestionPayload> = questions.iter().map(QuestionPayload::from).collect();
        for q in &payload {
            self.store(q.clone())?;
        }
        Ok(BulkSubmitResponse {
            message: format!("{} questions added", payload.len()),
            questions: payload,
        })
    }

    async fn add_question(&self, question: &QuestionPayload) -> anyhow::Result<serde_json::Value> {
        self.enter()?;
        let id = self.store(question.clone())?;
        Ok(serde_json::json!({ "id": id }))
    }

    async fn list_questions(&self) -> anyhow::Result<Vec<StoredQuestion>> {
        self.enter()?;
        Ok(self.stored())
    }

    async fn create_exam(&self, exam: &NewExam) -> anyhow::Result<serde_json::Value> {
        self.enter()?;
        let mut exams = self
            .exams
            .lock()
            .map_err(|_| ApiError::Network("mock store poisoned".into()))?;
        exams.push(exam.clone());
        Ok(serde_json::json!({ "id": format!("exam{}", exams.len()) }))
    }

    async fn list_students(&self, _level: &str) -> anyhow::Result<Vec<Student>> {
        self.enter()?;
        Ok(self.students.clone())
    }

    async fn statistics(&self, _level: &str) -> anyhow::Result<DashboardStats> {
        self.enter()?;
        let scores = self.students.iter().map(|s| s.score);
        Ok(DashboardStats {
            total_students: self.students.len() as u64,
            highest_score: scores.clone().fold(0.0, f64::max),
            lowest_score: if self.students.is_empty() {
                0.0
            } else {
                scores.fold(f64::INFINITY, f64::min)
            },
        })
    }
}
