//! The platform API surface and its wire types.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use exambank_core::model::{ParsedQuestion, Student};

/// Operations the dashboard performs against the platform.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Submit a reviewed batch in one call.
    async fn submit_questions(
        &self,
        questions: &[ParsedQuestion],
    ) -> anyhow::Result<BulkSubmitResponse>;

    /// Add a single question.
    async fn add_question(&self, question: &QuestionPayload) -> anyhow::Result<serde_json::Value>;

    /// Fetch the question bank.
    async fn list_questions(&self) -> anyhow::Result<Vec<StoredQuestion>>;

    /// Create an exam from question ids.
    async fn create_exam(&self, exam: &NewExam) -> anyhow::Result<serde_json::Value>;

    /// Students enrolled at a class level.
    async fn list_students(&self, level: &str) -> anyhow::Result<Vec<Student>>;

    /// Dashboard figures for a class level.
    async fn statistics(&self, level: &str) -> anyhow::Result<DashboardStats>;
}

/// A question as the platform stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
    #[serde(default)]
    pub topic: String,
    pub subject: String,
    #[serde(deserialize_with = "string_or_list")]
    pub level: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&ParsedQuestion> for QuestionPayload {
    fn from(q: &ParsedQuestion) -> Self {
        Self {
            question: q.question_text.clone(),
            options: q.options.clone(),
            answer: q.answer_index,
            topic: q.topic.clone(),
            subject: q.subject.clone(),
            level: q.level.clone(),
            image: q.image.clone(),
        }
    }
}

/// Body of the bulk submission.
#[derive(Debug, Serialize)]
pub struct BulkSubmitRequest<'a> {
    pub questions: &'a [QuestionPayload],
}

/// Reply to the bulk submission.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkSubmitResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub questions: Vec<QuestionPayload>,
}

/// A question returned from the bank, with its id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredQuestion {
    #[serde(rename = "_id", alias = "id", deserialize_with = "id_string")]
    pub id: String,
    #[serde(flatten)]
    pub question: QuestionPayload,
}

/// Request to create an exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExam {
    pub title: String,
    pub subject: String,
    pub level: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Ids of the questions making up the exam.
    pub questions: Vec<String>,
}

/// Dashboard cards for a class.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub highest_score: f64,
    #[serde(default)]
    pub lowest_score: f64,
}

/// List endpoints answer either with a bare array or wrapped in an object.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Questions { questions: Vec<T> },
    Students { students: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(v) => v,
            Listing::Questions { questions } => questions,
            Listing::Students { students } => students,
        }
    }
}

/// Level is a list in the bank schema but a plain string on older records.
fn string_or_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(d)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

/// Ids may come back as strings or numbers.
fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(d)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
