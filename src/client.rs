use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::endpoints::Request;

static AGENT: &str = concat!("evoctl/", env!("CARGO_PKG_VERSION"));

/// The two failure kinds a command can surface: the remote answered with a
/// non-2xx status, or the request never completed at all.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    apikey: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.base_url)
            .with_context(|| format!("parsing base URL `{}`", config.base_url))?;
        let http = Client::builder()
            .user_agent(HeaderValue::from_static(AGENT))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            base_url: config.base_url.clone(),
            apikey: config.api_key.clone(),
            http,
        })
    }

    /// Dispatches one request and returns the decoded response body. An empty
    /// 2xx body decodes to an empty object; a non-JSON 2xx body is carried
    /// through as a string value.
    pub fn execute(&self, request: &Request) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "dispatching request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.apikey {
            builder = builder.header("apikey", key);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::Method;
    use serde_json::json;

    fn client_for(base_url: &str, api_key: Option<&str>) -> ApiClient {
        ApiClient::new(&Config {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn sends_apikey_header_and_parses_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/instance/connectionState/bot")
                .header("apikey", "test-key");
            then.status(200)
                .json_body(json!({"instance": {"state": "open"}}));
        });

        let client = client_for(&server.base_url(), Some("test-key"));
        let request = Request::get("/instance/connectionState/bot");
        let response = client.execute(&request).unwrap();

        mock.assert();
        assert_eq!(response["instance"]["state"], "open");
    }

    #[test]
    fn forwards_body_and_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/group/updateGroupSubject/bot")
                .query_param("groupJid", "123@g.us")
                .json_body(json!({"subject": "new name"}));
            then.status(200).json_body(json!({"ok": true}));
        });

        let client = client_for(&server.base_url(), None);
        let request = Request::post("/group/updateGroupSubject/bot", json!({"subject": "new name"}))
            .with_query("groupJid", "123@g.us");
        let response = client.execute(&request).unwrap();

        mock.assert();
        assert_eq!(response["ok"], true);
    }

    #[test]
    fn non_2xx_is_an_http_error_with_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/settings/find/missing");
            then.status(404).body("instance not found");
        });

        let client = client_for(&server.base_url(), None);
        let err = client
            .execute(&Request::get("/settings/find/missing"))
            .unwrap_err();

        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "instance not found");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_decodes_to_empty_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/instance/logout/bot");
            then.status(200);
        });

        let client = client_for(&server.base_url(), None);
        let response = client
            .execute(&Request::new(Method::DELETE, "/instance/logout/bot"))
            .unwrap();

        assert_eq!(response, json!({}));
    }

    #[test]
    fn non_json_body_is_carried_through_as_string() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("pong");
        });

        let client = client_for(&server.base_url(), None);
        let response = client.execute(&Request::get("/")).unwrap();

        assert_eq!(response, Value::String("pong".into()));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is expected to refuse connections.
        let client = client_for("http://127.0.0.1:9", None);
        let err = client.execute(&Request::get("/")).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
