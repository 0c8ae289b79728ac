//! `ResumeStore` over the resume REST API.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    check_version_label, Readiness, ResumeStore, StoreError, StoreOp, DOWNLOAD_LIMIT_MESSAGE,
};
use crate::models::resume::{ResumeDocument, ResumeSummary, ResumeVersion};

#[derive(Debug, Deserialize)]
struct SummaryPage {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    data: Vec<ResumeSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchRequest<'a> {
    version_label: &'a str,
    job_description: &'a str,
}

/// Error bodies are either plain text or `{ "message": ... }`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn api_error(op: StoreOp, status: StatusCode, body: String) -> StoreError {
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    warn!("Resume API {op} returned {status}: {message}");
    StoreError::Api {
        op,
        status: status.as_u16(),
        message,
    }
}

/// Maps the download check response.
///
/// 2xx with a body announcing readiness is `Ready`; a body that negates it
/// (`not ready`, `not_ready`) or says anything else is `NotReady` carrying that
/// text. 403 means the download quota is used up; other statuses are errors.
pub(crate) fn download_readiness(
    version_label: &str,
    status: StatusCode,
    body: String,
) -> Result<Readiness, StoreError> {
    if status == StatusCode::FORBIDDEN {
        return Ok(Readiness::NotReady(DOWNLOAD_LIMIT_MESSAGE.to_string()));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound(version_label.to_string()));
    }
    if !status.is_success() {
        return Err(api_error(StoreOp::Download, status, body));
    }
    let text = body.to_lowercase();
    let negated = ["not ready", "not_ready", "not-ready", "notready"]
        .iter()
        .any(|n| text.contains(n));
    if text.contains("ready") && !negated {
        Ok(Readiness::Ready)
    } else if body.trim().is_empty() {
        Ok(Readiness::NotReady(
            "The resume is not ready for download yet.".to_string(),
        ))
    } else {
        Ok(Readiness::NotReady(body))
    }
}

#[derive(Clone)]
pub struct HttpResumeStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpResumeStore {
    pub fn new(
        base_url: impl AsRef<str>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| StoreError::Unavailable(format!("invalid resume API URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Unavailable(format!(
                "resume API URL '{base_url}' cannot carry a path"
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Appends `segments` to the base path; each one is percent-encoded, so a
    /// segment can never add or climb path levels.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Unavailable("resume API URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Endpoint whose path contains a version label.
    fn labelled(&self, segments: &[&str], version_label: &str) -> Result<Url, StoreError> {
        check_version_label(version_label)?;
        self.endpoint(segments)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch(&self, op: StoreOp, request: RequestBuilder) -> Result<Response, StoreError> {
        self.authorize(request).send().await.map_err(|e| {
            warn!("Resume API {op} request failed: {e}");
            StoreError::Http(e)
        })
    }

    async fn send(&self, op: StoreOp, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.dispatch(op, request).await?;
        let status = response.status();
        if status.is_success() {
            debug!("Resume API {op} succeeded ({status})");
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(op, status, body))
    }

    async fn json<T: DeserializeOwned>(
        &self,
        op: StoreOp,
        request: RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = self.send(op, request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Maps an API 404 on a keyed lookup to `NotFound`.
fn not_found_as(label: &str, err: StoreError) -> StoreError {
    match err {
        StoreError::Api { status: 404, .. } => StoreError::NotFound(label.to_string()),
        other => other,
    }
}

#[async_trait]
impl ResumeStore for HttpResumeStore {
    async fn create_resume(&self, document: &ResumeDocument) -> Result<ResumeVersion, StoreError> {
        let url = self.endpoint(&["user", "resume", "create"])?;
        self.json(StoreOp::Create, self.client.post(url).json(document))
            .await
    }

    async fn update_resume(
        &self,
        version_label: &str,
        document: &ResumeDocument,
    ) -> Result<ResumeVersion, StoreError> {
        let url = self.labelled(&["user", "resume", "update", version_label], version_label)?;
        self.json(StoreOp::Update, self.client.put(url).json(document))
            .await
            .map_err(|e| not_found_as(version_label, e))
    }

    async fn get_resume_by_version(
        &self,
        version_label: &str,
    ) -> Result<ResumeVersion, StoreError> {
        let url = self.labelled(&["user", "resume", version_label], version_label)?;
        self.json(StoreOp::Load, self.client.get(url))
            .await
            .map_err(|e| not_found_as(version_label, e))
    }

    async fn get_latest_resume(&self) -> Result<ResumeVersion, StoreError> {
        let url = self.endpoint(&["user", "resume", "get"])?;
        self.json(StoreOp::Load, self.client.get(url))
            .await
            .map_err(|e| not_found_as("latest", e))
    }

    async fn get_all_resume_summaries(&self) -> Result<Vec<ResumeSummary>, StoreError> {
        let url = self.endpoint(&["user", "resume", "get-all"])?;
        match self
            .json::<SummaryPage>(StoreOp::List, self.client.get(url))
            .await
        {
            Ok(page) => {
                debug!(
                    "Listed {} resume versions (reported count {:?})",
                    page.data.len(),
                    page.count
                );
                Ok(page.data)
            }
            Err(StoreError::Api { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn delete_resume_by_version(&self, version_label: &str) -> Result<String, StoreError> {
        let url = self.labelled(
            &["user", "resume", "version-label", version_label, "delete"],
            version_label,
        )?;
        let response = self
            .send(StoreOp::Delete, self.client.delete(url))
            .await
            .map_err(|e| not_found_as(version_label, e))?;
        let body = response.text().await?;
        Ok(if body.trim().is_empty() {
            format!("Resume {version_label} deleted")
        } else {
            body
        })
    }

    async fn request_download_readiness(
        &self,
        version_label: &str,
    ) -> Result<Readiness, StoreError> {
        let url = self.labelled(&["user", "resume", version_label, "download"], version_label)?;
        let response = self.dispatch(StoreOp::Download, self.client.get(url)).await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        download_readiness(version_label, status, body)
    }

    async fn match_resume_against_job_description(
        &self,
        version_label: &str,
        job_description: &str,
    ) -> Result<Value, StoreError> {
        check_version_label(version_label)?;
        let url = self.endpoint(&["user", "resume", "match-jd"])?;
        let request = self.client.post(url).json(&MatchRequest {
            version_label,
            job_description,
        });
        self.json(StoreOp::Match, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpResumeStore {
        HttpResumeStore::new(base, Some("svc".into()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        for base in ["http://localhost:9000/api", "http://localhost:9000/api/"] {
            let url = store(base).endpoint(&["user", "resume", "get"]).unwrap();
            assert_eq!(url.as_str(), "http://localhost:9000/api/user/resume/get");
        }
    }

    #[test]
    fn test_label_segment_is_encoded_and_stays_under_resume_path() {
        let url = store("http://backend.local/api")
            .endpoint(&["user", "resume", "../../admin/users"])
            .unwrap();
        assert!(url.path().starts_with("/api/user/resume/"), "{}", url.path());
        assert!(!url.path().contains("/admin/"));
        assert_eq!(url.path_segments().unwrap().count(), 4);

        let url = store("http://backend.local/api")
            .endpoint(&["user", "resume", "v 1?x#y"])
            .unwrap();
        assert_eq!(url.path(), "/api/user/resume/v%201%3Fx%23y");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_traversal_label_is_rejected_before_any_request() {
        let err = store("http://backend.local/api")
            .labelled(&["user", "resume", "../../admin/users"], "../../admin/users")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidLabel(_)));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpResumeStore::new("not a url", None, Duration::from_secs(5)),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn test_readiness_ready_body() {
        assert_eq!(
            download_readiness("v1", StatusCode::OK, "Resume is ready for download".into()).unwrap(),
            Readiness::Ready
        );
        assert_eq!(
            download_readiness("v1", StatusCode::OK, r#"{"status":"READY"}"#.into()).unwrap(),
            Readiness::Ready
        );
    }

    #[test]
    fn test_readiness_negated_or_other_body_is_not_ready() {
        assert_eq!(
            download_readiness("v1", StatusCode::OK, "Resume not ready".into()).unwrap(),
            Readiness::NotReady("Resume not ready".into())
        );
        assert_eq!(
            download_readiness("v1", StatusCode::OK, r#"{"status":"NOT_READY"}"#.into()).unwrap(),
            Readiness::NotReady(r#"{"status":"NOT_READY"}"#.into())
        );
        assert!(matches!(
            download_readiness("v1", StatusCode::OK, String::new()).unwrap(),
            Readiness::NotReady(_)
        ));
    }

    #[test]
    fn test_readiness_forbidden_is_quota() {
        assert_eq!(
            download_readiness("v1", StatusCode::FORBIDDEN, "quota".into()).unwrap(),
            Readiness::NotReady(DOWNLOAD_LIMIT_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_readiness_other_statuses_are_errors() {
        assert!(matches!(
            download_readiness("v9", StatusCode::NOT_FOUND, String::new()),
            Err(StoreError::NotFound(label)) if label == "v9"
        ));
        assert!(matches!(
            download_readiness("v1", StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"db down"}"#.into()),
            Err(StoreError::Api { op: StoreOp::Download, status: 500, message }) if message == "db down"
        ));
        assert!(matches!(
            download_readiness("v1", StatusCode::UNAUTHORIZED, String::new()),
            Err(StoreError::Api { status: 401, .. })
        ));
    }

    #[test]
    fn test_summary_page_parses() {
        let page: SummaryPage = serde_json::from_str(
            r#"{"status":"success","count":2,"data":[
                {"versionLabel":"v1","title":"A"},
                {"versionLabel":"v2","title":"B","templateName":"LexingtonTemplate"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(page.count, Some(2));
        assert_eq!(page.data[1].version_label, "v2");
    }

    #[test]
    fn test_match_request_is_camel_case() {
        let body = serde_json::to_value(MatchRequest {
            version_label: "v3",
            job_description: "Rust engineer",
        })
        .unwrap();
        assert_eq!(body["versionLabel"], "v3");
        assert_eq!(body["jobDescription"], "Rust engineer");
    }

    #[test]
    fn test_404_becomes_not_found() {
        let err = not_found_as(
            "v7",
            StoreError::Api {
                op: StoreOp::Load,
                status: 404,
                message: String::new(),
            },
        );
        assert!(matches!(err, StoreError::NotFound(label) if label == "v7"));
    }
}
