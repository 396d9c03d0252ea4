//! REST client for the widget backend.
//!
//! Implements [`WidgetApi`] over `reqwest`. Every path lives under
//! `{backend_url}/rest/v1`. Failures are mapped onto [`ApiError`]: send
//! failures become `Transport`, non-2xx answers become `Status` carrying the
//! body, and unparsable payloads become `Decode`. Nothing is retried.

use chatdock_core::api::WidgetApi;
use chatdock_types::bot::{Bot, BotId, CreateBotRequest};
use chatdock_types::company::{Company, CompanyUpsert};
use chatdock_types::config::ClientConfig;
use chatdock_types::error::ApiError;
use chatdock_types::polling::BotStatusResponse;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Build a client for `config.backend_url` with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url(),
        })
    }

    /// Base URL of the REST API, e.g. `http://localhost:8000/rest/v1`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `{base}/bot/{id}` followed by `suffix` segments. The id is pushed as a
    /// single percent-encoded segment, so `/`, `?` and `#` cannot reroute it.
    fn bot_url(&self, id: &BotId, suffix: &[&str]) -> Result<Url, ApiError> {
        if id.is_blank() {
            return Err(ApiError::InvalidInput("bot id must not be empty".to_string()));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidInput(format!("invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidInput(format!("backend URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .push("bot")
            .push(id.as_str().trim())
            .extend(suffix);
        Ok(url)
    }

    fn company_form(company: &CompanyUpsert) -> Result<Form, ApiError> {
        let mut form = Form::new().text("name", company.name.clone());
        if let Some(color) = &company.primary_color {
            form = form.text("primary_color", color.clone());
        }
        if let Some(color) = &company.secondary_color {
            form = form.text("secondary_color", color.clone());
        }
        if let Some(logo) = &company.logo {
            let part = Part::bytes(logo.bytes.clone())
                .file_name(logo.file_name.clone())
                .mime_str(&logo.mime)
                .map_err(|e| ApiError::InvalidInput(format!("invalid logo type: {e}")))?;
            form = form.part("logo", part);
        }
        Ok(form)
    }
}

/// Send a request and reject non-success answers.
async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn read_body(response: Response) -> Result<Vec<u8>, ApiError> {
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = read_body(response).await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn is_blank_body(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

impl WidgetApi for RestClient {
    async fn get_company(&self) -> Result<Option<Company>, ApiError> {
        let response = self
            .client
            .get(self.url("/company"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("no company configured yet");
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let body = read_body(response).await?;
        if is_blank_body(&body) {
            return Ok(None);
        }
        serde_json::from_slice::<Option<Company>>(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn upsert_company(&self, company: &CompanyUpsert) -> Result<Company, ApiError> {
        if company.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("company name is required".to_string()));
        }
        let form = Self::company_form(company)?;
        tracing::debug!(name = %company.name, has_logo = company.logo.is_some(), "saving company");

        let response = send(self.client.post(self.url("/company")).multipart(form)).await?;
        decode(response).await
    }

    async fn create_bot(&self, request: &CreateBotRequest) -> Result<Bot, ApiError> {
        tracing::debug!(
            company_id = %request.company_id,
            knowledge_items = request.knowledge_items.len(),
            "creating bot"
        );
        let response = send(self.client.post(self.url("/bot")).json(request)).await?;
        decode(response).await
    }

    async fn list_bots(&self) -> Result<Vec<Bot>, ApiError> {
        let response = send(self.client.get(self.url("/bots"))).await?;
        decode(response).await
    }

    async fn get_bot(&self, id: &BotId) -> Result<Bot, ApiError> {
        let url = self.bot_url(id, &[])?;
        let response = send(self.client.get(url)).await?;
        decode(response).await
    }

    async fn bot_status(&self, id: &BotId) -> Result<BotStatusResponse, ApiError> {
        let url = self.bot_url(id, &["status"])?;
        let response = send(self.client.get(url)).await?;
        decode(response).await
    }

    async fn health(&self) -> Result<serde_json::Value, ApiError> {
        let response = send(self.client.get(self.url("/health/live"))).await?;
        let body = read_body(response).await?;
        if is_blank_body(&body) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::{Multipart, Path, State};
    use axum::http::{StatusCode as HttpStatus, Uri};
    use axum::response::{IntoResponse, Response as AxumResponse};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use chatdock_core::poller::StatusPoller;
    use chatdock_types::bot::Tone;
    use chatdock_types::company::LogoUpload;
    use chatdock_types::knowledge::{KnowledgeKind, NewKnowledgeItem};
    use serde_json::{Value, json};

    #[derive(Debug, Clone)]
    struct UploadedField {
        file_name: Option<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    }

    #[derive(Default)]
    struct Backend {
        company: Option<Value>,
        company_body: Option<&'static str>,
        uploads: Vec<HashMap<String, UploadedField>>,
        created: Vec<Value>,
        statuses: Vec<&'static str>,
        status_calls: usize,
        status_paths: Vec<String>,
        fail_status: bool,
    }

    type Shared = Arc<Mutex<Backend>>;

    fn bot_json(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Acme Bot",
            "tone": "friendly",
            "company": {"id": "1", "name": "Acme"},
            "knowledge_items": [{"id": "k-1", "type": "url", "content": "https://acme.test"}],
            "primary_color": "#3B82F6",
            "secondary_color": "#10B981",
            "logo_url": null
        })
    }

    async fn get_company(State(state): State<Shared>) -> AxumResponse {
        let backend = state.lock().unwrap();
        if let Some(body) = backend.company_body {
            return (HttpStatus::OK, body).into_response();
        }
        match &backend.company {
            Some(company) => Json(company.clone()).into_response(),
            None => (HttpStatus::NOT_FOUND, Json(json!({"error": "Company not found"})))
                .into_response(),
        }
    }

    async fn post_company(State(state): State<Shared>, mut multipart: Multipart) -> AxumResponse {
        let mut fields = HashMap::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.unwrap().to_vec();
            fields.insert(
                name,
                UploadedField {
                    file_name,
                    content_type,
                    data,
                },
            );
        }

        let text = |key: &str, default: &str| {
            fields
                .get(key)
                .map(|f| String::from_utf8_lossy(&f.data).into_owned())
                .unwrap_or_else(|| default.to_string())
        };
        let name = text("name", "");
        if name.is_empty() {
            return (HttpStatus::BAD_REQUEST, Json(json!({"detail": "Name is required"})))
                .into_response();
        }

        let company = json!({
            "id": "1",
            "name": name,
            "primary_color": text("primary_color", "#3B82F6"),
            "secondary_color": text("secondary_color", "#10B981"),
            "logo_url": fields
                .get("logo")
                .and_then(|f| f.file_name.clone())
                .map(|f| format!("/media/company_logos/{f}")),
        });

        let mut backend = state.lock().unwrap();
        backend.uploads.push(fields);
        backend.company = Some(company.clone());
        (HttpStatus::CREATED, Json(company)).into_response()
    }

    async fn create_bot(State(state): State<Shared>, Json(body): Json<Value>) -> AxumResponse {
        let mut bot = bot_json("b-1");
        if let Some(name) = body.get("name").and_then(Value::as_str) {
            bot["name"] = json!(name);
        }
        if let Some(tone) = body.get("tone") {
            bot["tone"] = tone.clone();
        }
        state.lock().unwrap().created.push(body);
        (HttpStatus::CREATED, Json(bot)).into_response()
    }

    async fn list_bots() -> Json<Value> {
        Json(json!([bot_json("b-1"), bot_json("b-2")]))
    }

    async fn get_bot(Path(id): Path<String>) -> AxumResponse {
        if id == "missing" {
            return (HttpStatus::NOT_FOUND, "bot not found").into_response();
        }
        Json(bot_json(&id)).into_response()
    }

    async fn bot_status(
        State(state): State<Shared>,
        Path(id): Path<String>,
        uri: Uri,
    ) -> AxumResponse {
        let mut backend = state.lock().unwrap();
        backend.status_paths.push(uri.path().to_string());
        if backend.fail_status {
            return (HttpStatus::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        backend.status_calls += 1;
        let index = (backend.status_calls - 1).min(backend.statuses.len().saturating_sub(1));
        let status = backend.statuses.get(index).copied().unwrap_or("processing");
        let error = (status == "error").then_some("embedding failed");

        Json(json!({
            "bot": bot_json(&id),
            "pollings": [{
                "id": backend.status_calls,
                "status": status,
                "completed": status != "processing",
                "error": error,
                "success": null,
                "created_at": "2026-10-01T10:00:00Z",
                "updated_at": "2026-10-01T10:00:05Z"
            }]
        }))
        .into_response()
    }

    async fn health() -> Json<Value> {
        Json(json!({"status": "ok"}))
    }

    async fn spawn_backend(backend: Backend) -> (SocketAddr, Shared) {
        let state: Shared = Arc::new(Mutex::new(backend));
        let app = Router::new()
            .route("/rest/v1/company", get(get_company).post(post_company))
            .route("/rest/v1/bot", post(create_bot))
            .route("/rest/v1/bots", get(list_bots))
            .route("/rest/v1/bot/{id}", get(get_bot))
            .route("/rest/v1/bot/{id}/status", get(bot_status))
            .route("/rest/v1/health/live", get(health))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, state)
    }

    fn client_for(addr: SocketAddr) -> RestClient {
        let config = ClientConfig {
            backend_url: format!("http://{addr}/"),
            request_timeout_secs: 5,
            ..ClientConfig::default()
        };
        RestClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn base_url_appends_rest_prefix() {
        let client = client_for("127.0.0.1:8000".parse().unwrap());
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/rest/v1");
    }

    #[tokio::test]
    async fn get_company_not_found_is_empty_state() {
        let (addr, _) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);
        assert_eq!(client.get_company().await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_company_empty_or_null_body_is_empty_state() {
        for body in ["", "null", "  \n"] {
            let (addr, _) = spawn_backend(Backend {
                company_body: Some(body),
                ..Backend::default()
            })
            .await;
            let client = client_for(addr);
            assert_eq!(client.get_company().await.unwrap(), None, "body {body:?}");
        }
    }

    #[tokio::test]
    async fn get_company_malformed_body_is_decode_error() {
        let (addr, _) = spawn_backend(Backend {
            company_body: Some("{\"id\": "),
            ..Backend::default()
        })
        .await;
        let client = client_for(addr);
        let err = client.get_company().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn upsert_company_sends_multipart_with_logo() {
        let (addr, state) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let upsert = CompanyUpsert {
            name: "Acme".to_string(),
            primary_color: Some("#112233".to_string()),
            secondary_color: None,
            logo: Some(LogoUpload::new("acme.png", vec![1, 2, 3])),
        };
        let company = client.upsert_company(&upsert).await.unwrap();

        assert_eq!(company.id, "1");
        assert_eq!(company.name, "Acme");
        assert_eq!(company.primary_color, "#112233");
        // Omitted fields fall back to server defaults.
        assert_eq!(company.secondary_color, "#10B981");
        assert_eq!(company.logo.as_deref(), Some("/media/company_logos/acme.png"));

        let backend = state.lock().unwrap();
        let fields = &backend.uploads[0];
        assert!(!fields.contains_key("secondary_color"));
        let logo = &fields["logo"];
        assert_eq!(logo.file_name.as_deref(), Some("acme.png"));
        assert_eq!(logo.content_type.as_deref(), Some("image/png"));
        assert_eq!(logo.data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn upsert_company_rejects_blank_name_locally() {
        let (addr, state) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let err = client
            .upsert_company(&CompanyUpsert {
                name: "   ".to_string(),
                ..CompanyUpsert::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(state.lock().unwrap().uploads.is_empty());
    }

    #[tokio::test]
    async fn create_bot_posts_json() {
        let (addr, state) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let request = CreateBotRequest {
            company_id: "1".to_string(),
            name: Some("Helper".to_string()),
            tone: Some(Tone::Casual),
            knowledge_items: vec![NewKnowledgeItem {
                kind: KnowledgeKind::Url,
                content: "https://acme.test/faq".to_string(),
            }],
        };
        let bot = client.create_bot(&request).await.unwrap();

        assert_eq!(bot.id.as_str(), "b-1");
        assert_eq!(bot.name, "Helper");
        assert_eq!(bot.tone, Tone::Casual);

        let backend = state.lock().unwrap();
        let sent = &backend.created[0];
        assert_eq!(sent["company_id"], "1");
        assert_eq!(sent["knowledge_items"][0]["type"], "url");
        assert_eq!(sent["knowledge_items"][0]["content"], "https://acme.test/faq");
    }

    #[tokio::test]
    async fn list_and_get_bots() {
        let (addr, _) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let bots = client.list_bots().await.unwrap();
        assert_eq!(bots.len(), 2);
        assert_eq!(bots[1].id.as_str(), "b-2");
        assert_eq!(bots[0].company.name, "Acme");

        let bot = client.get_bot(&BotId::from("b-9")).await.unwrap();
        assert_eq!(bot.id.as_str(), "b-9");
    }

    #[tokio::test]
    async fn get_bot_not_found_carries_status_and_body() {
        let (addr, _) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let err = client.get_bot(&BotId::from("missing")).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                body: "bot not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn blank_bot_id_is_rejected_without_request() {
        let (addr, state) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let err = client.bot_status(&BotId::from(" ")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(state.lock().unwrap().status_calls, 0);
    }

    #[test]
    fn bot_url_keeps_id_in_one_segment() {
        let client = client_for("127.0.0.1:8000".parse().unwrap());

        let url = client.bot_url(&BotId::from("a/b?x=1#top"), &["status"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/rest/v1/bot/a%2Fb%3Fx=1%23top/status"
        );
        assert_eq!(url.query(), None);

        let url = client.bot_url(&BotId::from(" b-1 "), &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/rest/v1/bot/b-1");
    }

    #[tokio::test]
    async fn bot_status_encodes_slash_in_id() {
        let (addr, state) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);

        let status = client.bot_status(&BotId::from("a/b")).await.unwrap();
        assert_eq!(status.bot.id.as_str(), "a/b");
        assert_eq!(
            state.lock().unwrap().status_paths,
            vec!["/rest/v1/bot/a%2Fb/status".to_string()]
        );
    }

    #[tokio::test]
    async fn bot_status_decodes_nested_shape() {
        let (addr, _) = spawn_backend(Backend {
            statuses: vec!["error"],
            ..Backend::default()
        })
        .await;
        let client = client_for(addr);

        let status = client.bot_status(&BotId::from("b-1")).await.unwrap();
        assert_eq!(status.bot.id.as_str(), "b-1");
        assert!(status.has_terminal());
        assert!(status.is_error());
        assert_eq!(status.error(), Some("embedding failed"));
    }

    #[tokio::test]
    async fn health_returns_payload() {
        let (addr, _) = spawn_backend(Backend::default()).await;
        let client = client_for(addr);
        assert_eq!(client.health().await.unwrap(), json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(addr);
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn poller_over_http_stops_at_ready() {
        let (addr, state) = spawn_backend(Backend {
            statuses: vec!["processing", "processing", "ready"],
            ..Backend::default()
        })
        .await;
        let client = Arc::new(client_for(addr));

        let mut poller = StatusPoller::new(client, Duration::from_millis(10));
        poller.watch(Some(BotId::from("b-1")));
        let snapshot = tokio::time::timeout(Duration::from_secs(5), poller.settled())
            .await
            .unwrap();

        assert!(snapshot.is_ready());
        assert!(!snapshot.is_polling);
        assert_eq!(state.lock().unwrap().status_calls, 3);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(state.lock().unwrap().status_calls, 3);
    }

    #[tokio::test]
    async fn poller_over_http_stops_on_server_error() {
        let (addr, _) = spawn_backend(Backend {
            fail_status: true,
            ..Backend::default()
        })
        .await;
        let client = Arc::new(client_for(addr));

        let mut poller = StatusPoller::new(client, Duration::from_millis(10));
        poller.watch(Some(BotId::from("b-1")));
        let snapshot = tokio::time::timeout(Duration::from_secs(5), poller.settled())
            .await
            .unwrap();

        assert!(!snapshot.is_polling);
        assert!(snapshot.status.is_none());
        assert!(snapshot.fetch_error.as_deref().unwrap().contains("500"));
    }
}
