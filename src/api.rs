// src/api.rs
use gloo_net::http::{Request, Response};
use serde_json::Value;
use thiserror::Error;
use urlencoding::encode;
use web_sys::RequestCache;

use crate::model::{decode_snapshot, Activity};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Body was not the JSON we expected.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Parsed signup response. The body is read whatever the status was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReply {
    pub ok: bool,
    pub message: Option<String>,
    pub detail: Option<String>,
}

impl SignupReply {
    pub fn from_body(ok: bool, body: &str) -> Result<Self, ApiError> {
        let v: Value =
            serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        let text = |key: &str| v.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(Self {
            ok,
            message: text("message"),
            // An empty detail counts as absent.
            detail: text("detail").filter(|d| !d.is_empty()),
        })
    }
}

/// The server endpoints the board talks to.
#[allow(async_fn_in_trait)]
pub trait ActivityApi {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<SignupReply, ApiError>;
    /// `Err(ApiError::Status { .. })` carries the body of a rejected removal.
    async fn unregister(&self, activity: &str, email: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn activities(&self) -> String {
        format!("{}/activities", self.base)
    }

    pub fn signup(&self, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/signup?email={}",
            self.base,
            encode(activity),
            encode(email)
        )
    }

    pub fn unregister(&self, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/unregister?email={}",
            self.base,
            encode(activity),
            encode(email)
        )
    }
}

/// `ActivityApi` over `fetch`, with caching disabled on every call.
pub struct HttpActivityApi {
    endpoints: Endpoints,
}

impl HttpActivityApi {
    pub fn new(base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base),
        }
    }
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn read_body(resp: &Response) -> Result<String, ApiError> {
    resp.text().await.map_err(transport)
}

impl ActivityApi for HttpActivityApi {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let resp = Request::get(&self.endpoints.activities())
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(&resp).await?;
        if !resp.ok() {
            return Err(ApiError::Status {
                status: resp.status(),
                body,
            });
        }
        decode_snapshot(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<SignupReply, ApiError> {
        let resp = Request::post(&self.endpoints.signup(activity, email))
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(&resp).await?;
        SignupReply::from_body(resp.ok(), &body)
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<(), ApiError> {
        let resp = Request::delete(&self.endpoints.unregister(activity, email))
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(transport)?;
        if resp.ok() {
            return Ok(());
        }
        Err(ApiError::Status {
            status: resp.status(),
            body: read_body(&resp).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_percent_encode_name_and_email() {
        let ep = Endpoints::new("");
        assert_eq!(ep.activities(), "/activities");
        assert_eq!(
            ep.signup("Chess Club", "jane+test@example.com"),
            "/activities/Chess%20Club/signup?email=jane%2Btest%40example.com"
        );
        assert_eq!(
            ep.unregister("Art/Design & Co", "x@y.org"),
            "/activities/Art%2FDesign%20%26%20Co/unregister?email=x%40y.org"
        );
    }

    #[test]
    fn base_trailing_slash_is_ignored() {
        let ep = Endpoints::new("https://school.example/api/");
        assert_eq!(ep.activities(), "https://school.example/api/activities");
    }

    #[test]
    fn signup_reply_reads_message_and_detail() {
        let ok = SignupReply::from_body(true, r#"{"message":"Signed up Jane"}"#).unwrap();
        assert_eq!(ok.message.as_deref(), Some("Signed up Jane"));
        assert_eq!(ok.detail, None);

        let rejected = SignupReply::from_body(false, r#"{"detail":"Already signed up"}"#).unwrap();
        assert!(!rejected.ok);
        assert_eq!(rejected.detail.as_deref(), Some("Already signed up"));
    }

    #[test]
    fn signup_reply_ignores_non_string_detail() {
        let r = SignupReply::from_body(false, r#"{"detail":[{"loc":["query","email"]}]}"#).unwrap();
        assert_eq!(r.detail, None);
    }

    #[test]
    fn signup_reply_treats_empty_detail_as_missing() {
        let r = SignupReply::from_body(false, r#"{"detail":""}"#).unwrap();
        assert!(!r.ok);
        assert_eq!(r.detail, None);
    }

    #[test]
    fn signup_reply_rejects_non_json() {
        let err = SignupReply::from_body(false, "Internal Server Error").unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }
}
