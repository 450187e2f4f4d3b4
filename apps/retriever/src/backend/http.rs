//! HTTP client for the resume backend, the single point of entry for every
//! remote call the console makes.
//!
//! No retries: a failed call surfaces its error exactly once and the caller
//! decides whether that means "reject", "ignore" or "show an error".
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{
    ErrorBody, ExpandResponse, ListResponse, ResultRecord, ResumeData, ResumeUpload,
    RetrieveQuery, RetrieveResponse, TermRequest, UploadResponse, ValidateResponse,
};
use super::{BackendError, ResumeBackend};

#[derive(Debug, Clone)]
struct Endpoints {
    validate: Url,
    expand: Url,
    retrieve: Url,
    list: Url,
    upload: Url,
    proxy: Url,
}

/// Wraps the backend's REST endpoints, all resolved against one base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .with_context(|| format!("Backend URL '{base_url}' is not a valid URL"))?;
        let endpoint = |path: &str| {
            base.join(path)
                .with_context(|| format!("Cannot resolve '{path}' against '{base}'"))
        };

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build HTTP client")?,
            endpoints: Endpoints {
                validate: endpoint("validate_word/")?,
                expand: endpoint("expand_keywords/")?,
                retrieve: endpoint("retrieve/")?,
                list: endpoint("list/")?,
                upload: endpoint("upload/")?,
                proxy: endpoint("proxy_resume/")?,
            },
        })
    }

    async fn post_term<T: DeserializeOwned>(&self, url: &Url, term: &str) -> Result<T, BackendError> {
        let response = self
            .client
            .post(url.clone())
            .header("accept", "application/json")
            .json(&TermRequest { query: term })
            .send()
            .await?;
        decode(response).await
    }
}

/// Reads the body once; non-2xx becomes a status error carrying the server's
/// `error` field when the body has one.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.bytes().await?;

    if !status.is_success() {
        warn!(
            "Backend {} returned {}: {}",
            url.path(),
            status,
            String::from_utf8_lossy(&body)
        );
        let server_message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        return Err(BackendError::from_status(status.as_u16(), server_message));
    }

    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl ResumeBackend for HttpBackend {
    async fn validate_term(&self, term: &str) -> Result<bool, BackendError> {
        let response: ValidateResponse = self.post_term(&self.endpoints.validate, term).await?;
        let valid = matches!(response.valid, Some(Value::Bool(true)));
        debug!("Backend validation of '{term}': {valid}");
        Ok(valid)
    }

    async fn expand_term(&self, term: &str) -> Result<Vec<String>, BackendError> {
        let response: ExpandResponse = self.post_term(&self.endpoints.expand, term).await?;
        let keywords = response.keywords.unwrap_or_default();
        debug!("Backend expanded '{term}' into {} keywords", keywords.len());
        Ok(keywords)
    }

    async fn retrieve(&self, query: &RetrieveQuery) -> Result<Vec<ResultRecord>, BackendError> {
        let response = self
            .client
            .get(self.endpoints.retrieve.clone())
            .header("accept", "application/json")
            .query(&query.params())
            .send()
            .await?;
        let response: RetrieveResponse = decode(response).await?;
        let results = response.results.unwrap_or_default();
        debug!("Backend retrieve '{}' returned {} records", query.query, results.len());
        Ok(results)
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeData>, BackendError> {
        let response = self
            .client
            .get(self.endpoints.list.clone())
            .header("accept", "application/json")
            .send()
            .await?;
        let value: Value = decode(response).await?;
        serde_json::from_value::<ListResponse>(value)
            .map(ListResponse::into_records)
            .map_err(|_| BackendError::UnexpectedShape)
    }

    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadResponse, BackendError> {
        let file = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        let form = Form::new()
            .part("resume_file", file)
            .text("department", upload.department.as_str().to_string())
            .text("experience_years", upload.experience_years.to_string());

        debug!(
            "Uploading '{}' ({} bytes) to backend",
            upload.file_name,
            upload.bytes.len()
        );
        let response = self
            .client
            .post(self.endpoints.upload.clone())
            .header("accept", "application/json")
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    fn proxy_url(&self, file_url: &str) -> String {
        let mut url = self.endpoints.proxy.clone();
        url.query_pairs_mut().append_pair("file_url", file_url);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        extract::{Multipart, Query},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    use super::*;
    use crate::retrieval::filters::{Department, FilterCriteria};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5)).unwrap()
    }

    fn happy_router() -> Router {
        Router::new()
            .route(
                "/api/validate_word/",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "valid": body["query"] == "rust" }))
                }),
            )
            .route(
                "/api/expand_keywords/",
                post(|Json(body): Json<Value>| async move {
                    let keywords = if body["query"] == "rust" {
                        json!(["cargo", "tokio"])
                    } else {
                        json!([])
                    };
                    Json(json!({ "keywords": keywords }))
                }),
            )
            .route(
                "/api/retrieve/",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    Json(json!({
                        "results": [{
                            "id": "p-1",
                            "score": 88.5,
                            "data": {
                                "candidate_name": params.get("query"),
                                "experience_years": params.get("experience"),
                                "department": params.get("department"),
                            },
                            "matched_keywords": ["python"]
                        }],
                        "highlight_words": ["python"]
                    }))
                }),
            )
            .route(
                "/api/list/",
                get(|| async { Json(json!([{ "candidate_name": "Ada", "experience_years": 4 }])) }),
            )
            .route(
                "/api/upload/",
                post(|mut multipart: Multipart| async move {
                    let mut file_name = None;
                    let mut department = None;
                    let mut experience = None;
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        match name.as_str() {
                            "resume_file" => file_name = field.file_name().map(str::to_string),
                            "department" => department = Some(field.text().await.unwrap()),
                            "experience_years" => experience = Some(field.text().await.unwrap()),
                            _ => {}
                        }
                    }
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "message": "Upload and processing complete!",
                            "data": {
                                "candidate_name": file_name,
                                "department": department,
                                "experience_years": experience,
                            },
                            "qdrant_id": "q-42"
                        })),
                    )
                }),
            )
    }

    #[tokio::test]
    async fn test_validate_term_reads_boolean() {
        let base = spawn(happy_router()).await;
        let backend = backend(&base);
        assert!(backend.validate_term("rust").await.unwrap());
        assert!(!backend.validate_term("qwzx").await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_term_only_accepts_literal_true() {
        let router = Router::new().route(
            "/api/validate_word/",
            post(|| async { Json(json!({ "valid": "yes" })) }),
        );
        let base = spawn(router).await;
        assert!(!backend(&base).validate_term("rust").await.unwrap());
    }

    #[tokio::test]
    async fn test_expand_term_returns_keywords() {
        let base = spawn(happy_router()).await;
        let keywords = backend(&base).expand_term("rust").await.unwrap();
        assert_eq!(keywords, vec!["cargo", "tokio"]);
    }

    #[tokio::test]
    async fn test_retrieve_sends_query_and_filters_as_params() {
        let base = spawn(happy_router()).await;
        let query = RetrieveQuery {
            query: "python sql".to_string(),
            filters: FilterCriteria {
                experience: Some(5),
                department: Some(Department::DevOps),
            },
        };
        let results = backend(&base).retrieve(&query).await.unwrap();
        assert_eq!(results.len(), 1);
        let record = &results[0];
        assert_eq!(record.score, Some(88.5));
        assert_eq!(record.data.candidate_name.as_deref(), Some("python sql"));
        assert_eq!(record.data.experience_years, Some(json!("5")));
        assert_eq!(record.data.department.as_deref(), Some("DevOps"));
        assert_eq!(record.matched_keywords, vec!["python"]);
    }

    #[tokio::test]
    async fn test_retrieve_error_uses_server_error_field() {
        let router = Router::new().route(
            "/api/retrieve/",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Qdrant primary search failed: timeout" })),
                )
            }),
        );
        let base = spawn(router).await;
        let err = backend(&base)
            .retrieve(&RetrieveQuery {
                query: "java".into(),
                filters: FilterCriteria::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "Qdrant primary search failed: timeout");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_status_line() {
        let base = spawn(Router::new()).await;
        let err = backend(&base).expand_term("rust").await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = backend(&format!("http://{addr}/api"))
            .validate_term("rust")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }

    #[tokio::test]
    async fn test_list_resumes_accepts_bare_array() {
        let base = spawn(happy_router()).await;
        let records = backend(&base).list_resumes().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].candidate_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_list_resumes_rejects_unknown_shape() {
        let router = Router::new().route(
            "/api/list/",
            get(|| async { Json(json!({ "items": [] })) }),
        );
        let base = spawn(router).await;
        let err = backend(&base).list_resumes().await.unwrap_err();
        assert!(matches!(err, BackendError::UnexpectedShape));
        assert_eq!(err.to_string(), "Unexpected API response format.");
    }

    #[tokio::test]
    async fn test_upload_posts_multipart_form() {
        let base = spawn(happy_router()).await;
        let upload = ResumeUpload {
            file_name: "ada.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: bytes::Bytes::from_static(b"%PDF-1.4"),
            department: Department::MachineLearning,
            experience_years: 6,
        };
        let response = backend(&base).upload_resume(&upload).await.unwrap();
        assert_eq!(response.qdrant_id.as_deref(), Some("q-42"));
        assert_eq!(response.data.candidate_name.as_deref(), Some("ada.pdf"));
        assert_eq!(response.data.department.as_deref(), Some("Machine Learning"));
        assert_eq!(response.data.experience_years, Some(json!("6")));
    }

    #[test]
    fn test_proxy_url_encodes_file_url() {
        let backend = backend("http://backend.local/api");
        let url = backend.proxy_url("https://bucket.s3.amazonaws.com/resumes/a b.pdf?x=1&y=2");
        assert!(url.starts_with("http://backend.local/api/proxy_resume/?file_url="));
        assert!(url.contains("https%3A%2F%2Fbucket.s3.amazonaws.com%2Fresumes%2Fa+b.pdf%3Fx%3D1%26y%3D2"));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(HttpBackend::new("not a url", Duration::from_secs(1)).is_err());
    }
}
