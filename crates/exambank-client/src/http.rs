//! HTTP implementation of the platform API.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, instrument};

use exambank_core::model::{ParsedQuestion, Student};

use crate::api::{
    BulkSubmitRequest, BulkSubmitResponse, DashboardStats, Listing, NewExam, QuestionBank,
    QuestionPayload, StoredQuestion,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Platform API over HTTP/JSON.
pub struct HttpQuestionBank {
    base_url: Url,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// Error bodies usually carry a `message`.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpQuestionBank {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .with_context(|| format!("invalid API base URL: {}", config.base_url))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "invalid API base URL: {}",
            config.base_url
        );

        Ok(Self {
            base_url,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so class levels like "Form 1" are safe to pass as-is.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ApiError::Network(format!("platform API not reachable at {}", self.base_url))
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Check the status and decode the body.
    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ApiError::Api { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("failed to parse response: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::read(response).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::read(response).await
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, questions), fields(count = questions.len()))]
    async fn submit_questions(
        &self,
        questions: &[ParsedQuestion],
    ) -> anyhow::Result<BulkSubmitResponse> {
        let payload: Vec<QuestionPayload> = questions.iter().map(QuestionPayload::from).collect();
        let body = BulkSubmitRequest {
            questions: &payload,
        };
        let response: BulkSubmitResponse = self.post(&["questions", "bulk"], &body).await?;
        info!(
            stored = response.questions.len(),
            "bulk submission accepted: {}", response.message
        );
        Ok(response)
    }

    #[instrument(skip(self, question))]
    async fn add_question(&self, question: &QuestionPayload) -> anyhow::Result<serde_json::Value> {
        Ok(self.post(&["questions"], question).await?)
    }

    #[instrument(skip(self))]
    async fn list_questions(&self) -> anyhow::Result<Vec<StoredQuestion>> {
        let listing: Listing<StoredQuestion> = self.get(&["questions"]).await?;
        Ok(listing.into_vec())
    }

    #[instrument(skip(self, exam), fields(title = %exam.title))]
    async fn create_exam(&self, exam: &NewExam) -> anyhow::Result<serde_json::Value> {
        Ok(self.post(&["exams"], exam).await?)
    }

    #[instrument(skip(self))]
    async fn list_students(&self, level: &str) -> anyhow::Result<Vec<Student>> {
        let listing: Listing<Student> = self.get(&["admin", "students", level]).await?;
        Ok(listing.into_vec())
    }

    #[instrument(skip(self))]
    async fn statistics(&self, level: &str) -> anyhow::Result<DashboardStats> {
        Ok(self.get(&["admin", "statistics", level]).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exambank_core::model::BatchContext;
    use exambank_core::parse_text;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bank(server: &MockServer) -> HttpQuestionBank {
        HttpQuestionBank::new(&ApiConfig {
            base_url: format!("{}/api/v1/", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn batch() -> Vec<ParsedQuestion> {
        let ctx = BatchContext::new("Mathematics", "Form 1").unwrap();
        parse_text("1. What is 2+2?\nA. 3\nB. 4*\nC. 5\nD. 6\nT. Arithmetic", &ctx)
            .unwrap()
            .questions
    }

    #[tokio::test]
    async fn bulk_submission() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/questions/bulk"))
            .and(body_partial_json(serde_json::json!({
                "questions": [{"question": "What is 2+2?", "answer": 1, "level": ["Form 1"]}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "1 questions added",
                "questions": [{
                    "question": "What is 2+2?",
                    "options": ["3", "4", "5", "6"],
                    "answer": 1,
                    "topic": "Arithmetic",
                    "subject": "Mathematics",
                    "level": ["Form 1"]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = bank(&server).submit_questions(&batch()).await.unwrap();
        assert_eq!(response.message, "1 questions added");
        assert_eq!(response.questions.len(), 1);
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/questions/bulk"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"message": "topic is required"})),
            )
            .mount(&server)
            .await;

        let err = bank(&server).submit_questions(&batch()).await.unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(api_err.is_client_error());
        assert_eq!(err.to_string(), "API error (HTTP 422): topic is required");
    }

    #[tokio::test]
    async fn students_for_level_with_space() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/admin/students/Form%201"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"fullName": "John Doe", "matricule": "2024001", "score": 85},
                {"fullName": "Jane Smith", "matricule": "2024002", "score": 92}
            ])))
            .mount(&server)
            .await;

        let students = bank(&server).list_students("Form 1").await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].full_name, "Jane Smith");
        assert_eq!(students[0].score, 85.0);
    }

    #[tokio::test]
    async fn dashboard_statistics() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/admin/statistics/Form%202"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalStudents": 42, "highestScore": 97.5, "lowestScore": 31
            })))
            .mount(&server)
            .await;

        let stats = bank(&server).statistics("Form 2").await.unwrap();
        assert_eq!(stats.total_students, 42);
        assert_eq!(stats.lowest_score, 31.0);
    }

    #[tokio::test]
    async fn question_listing_wrapped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "questions": [{
                    "_id": "65f1c0",
                    "question": "What is photosynthesis?",
                    "options": ["a", "b", "c", "d"],
                    "answer": 0,
                    "topic": "Plant Processes",
                    "subject": "Biology",
                    "level": ["Form 1"]
                }]
            })))
            .mount(&server)
            .await;

        let questions = bank(&server).list_questions().await.unwrap();
        assert_eq!(questions[0].id, "65f1c0");
        assert_eq!(questions[0].question.topic, "Plant Processes");
    }

    #[tokio::test]
    async fn create_exam_posts_question_ids() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/exams"))
            .and(body_partial_json(serde_json::json!({
                "title": "Mid-term", "duration": 45, "questions": ["a1", "b2"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "exam-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let exam = NewExam {
            title: "Mid-term".into(),
            subject: "Physics".into(),
            level: "Form 2".into(),
            duration: 45,
            questions: vec!["a1".into(), "b2".into()],
        };
        let created = bank(&server).create_exam(&exam).await.unwrap();
        assert_eq!(created["id"], "exam-1");
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let bank = HttpQuestionBank::new(&ApiConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 2,
        })
        .unwrap();
        let err = bank.list_questions().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Network(_)) | Some(ApiError::Timeout(_))
        ));
    }

    #[test]
    fn path_segments_are_encoded() {
        let bank = HttpQuestionBank::new(&ApiConfig {
            base_url: "http://localhost:3030/api/v1/".into(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            bank.url(&["admin", "students", "Form 1"]).as_str(),
            "http://localhost:3030/api/v1/admin/students/Form%201"
        );
        assert_eq!(
            bank.url(&["admin", "statistics", "A/B?#x%"]).as_str(),
            "http://localhost:3030/api/v1/admin/statistics/A%2FB%3F%23x%25"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpQuestionBank::new(&ApiConfig {
            base_url: "not a url".into(),
            timeout_secs: 5,
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("invalid API base URL"));
    }

    #[tokio::test]
    async fn add_single_question() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/questions"))
            .and(body_partial_json(serde_json::json!({
                "question": "What is 2+2?", "answer": 1, "topic": "Arithmetic"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"_id": "q-9"})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = QuestionPayload::from(&batch()[0]);
        let created = bank(&server).add_question(&payload).await.unwrap();
        assert_eq!(created["_id"], "q-9");
    }
}
