//! In-memory `WidgetApi` mock shared by the unit tests of this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::Semaphore;

use chatdock_types::bot::{Bot, BotId, CreateBotRequest, Tone, TrainingStatus};
use chatdock_types::company::{Company, CompanyRef, CompanyUpsert};
use chatdock_types::error::ApiError;
use chatdock_types::knowledge::KnowledgeItem;
use chatdock_types::polling::{BotStatusResponse, PollingRecord};

use crate::api::WidgetApi;

pub fn bot(id: &str) -> Bot {
    Bot {
        id: BotId::new(id),
        name: format!("{id} bot"),
        tone: Tone::Professional,
        status: TrainingStatus::Training,
        company: CompanyRef {
            id: "c-1".to_string(),
            name: "Acme".to_string(),
        },
        knowledge_items: Vec::new(),
        primary_color: "#4F46E5".to_string(),
        secondary_color: "#10B981".to_string(),
        logo: None,
    }
}

pub fn company(id: &str, name: &str) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        primary_color: "#3B82F6".to_string(),
        secondary_color: "#10B981".to_string(),
        logo: None,
    }
}

/// Status response for `id` with one record per given status string.
pub fn status(id: &str, statuses: &[&str]) -> BotStatusResponse {
    let now = Utc::now();
    BotStatusResponse {
        bot: bot(id),
        pollings: statuses
            .iter()
            .enumerate()
            .map(|(i, s)| PollingRecord {
                id: i as i64 + 1,
                status: s.to_string(),
                completed: false,
                error: s
                    .eq_ignore_ascii_case("error")
                    .then(|| "training failed".to_string()),
                success: None,
                created_at: now,
                updated_at: now,
            })
            .collect(),
    }
}

#[derive(Default)]
struct Inner {
    /// Scripted status answers per bot id. The last answer repeats forever.
    statuses: HashMap<String, VecDeque<Result<BotStatusResponse, ApiError>>>,
    status_calls: HashMap<String, usize>,
    company: Option<Company>,
    company_error: Option<ApiError>,
    upserts: Vec<CompanyUpsert>,
    upsert_error: Option<ApiError>,
    created: Vec<CreateBotRequest>,
    create_error: Option<ApiError>,
    bots: Vec<Bot>,
    health: Option<Result<serde_json::Value, ApiError>>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
    /// When set, every status fetch waits for a permit before answering.
    gate: Option<Arc<Semaphore>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status fetches block until a permit is added to the returned semaphore.
    pub fn gated(self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (
            Self {
                inner: self.inner,
                gate: Some(gate.clone()),
            },
            gate,
        )
    }

    pub fn script_status(&self, id: &str, answers: Vec<Result<BotStatusResponse, ApiError>>) {
        let mut inner = self.inner.lock().unwrap();
        inner.statuses.insert(id.to_string(), answers.into());
    }

    pub fn status_calls(&self, id: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.status_calls.get(id).copied().unwrap_or(0)
    }

    pub fn total_status_calls(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.status_calls.values().sum()
    }

    pub fn set_company(&self, company: Option<Company>) {
        self.inner.lock().unwrap().company = company;
    }

    pub fn fail_get_company(&self, err: ApiError) {
        self.inner.lock().unwrap().company_error = Some(err);
    }

    pub fn fail_upsert(&self, err: Option<ApiError>) {
        self.inner.lock().unwrap().upsert_error = err;
    }

    pub fn fail_create(&self, err: Option<ApiError>) {
        self.inner.lock().unwrap().create_error = err;
    }

    pub fn upserts(&self) -> Vec<CompanyUpsert> {
        self.inner.lock().unwrap().upserts.clone()
    }

    pub fn created(&self) -> Vec<CreateBotRequest> {
        self.inner.lock().unwrap().created.clone()
    }

    pub fn set_bots(&self, bots: Vec<Bot>) {
        self.inner.lock().unwrap().bots = bots;
    }

    pub fn set_health(&self, health: Result<serde_json::Value, ApiError>) {
        self.inner.lock().unwrap().health = Some(health);
    }

    fn next_status(&self, id: &BotId) -> Result<BotStatusResponse, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        *inner.status_calls.entry(id.0.clone()).or_default() += 1;
        let queue = inner.statuses.entry(id.0.clone()).or_default();
        match queue.len() {
            0 => Ok(status(id.as_str(), &["processing"])),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap_or_else(|| Ok(status(id.as_str(), &[]))),
        }
    }
}

impl WidgetApi for MockApi {
    async fn get_company(&self) -> Result<Option<Company>, ApiError> {
        let inner = self.inner.lock().unwrap();
        match &inner.company_error {
            Some(err) => Err(err.clone()),
            None => Ok(inner.company.clone()),
        }
    }

    async fn upsert_company(&self, company: &CompanyUpsert) -> Result<Company, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.upserts.push(company.clone());
        if let Some(err) = &inner.upsert_error {
            return Err(err.clone());
        }
        let saved = Company {
            id: "c-1".to_string(),
            name: company.name.clone(),
            primary_color: company
                .primary_color
                .clone()
                .unwrap_or_else(|| "#3B82F6".to_string()),
            secondary_color: company
                .secondary_color
                .clone()
                .unwrap_or_else(|| "#10B981".to_string()),
            logo: company
                .logo
                .as_ref()
                .map(|l| format!("/media/company_logos/{}", l.file_name)),
        };
        inner.company = Some(saved.clone());
        Ok(saved)
    }

    async fn create_bot(&self, request: &CreateBotRequest) -> Result<Bot, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.created.push(request.clone());
        if let Some(err) = &inner.create_error {
            return Err(err.clone());
        }
        let mut created = bot("b-new");
        created.name = request
            .name
            .clone()
            .unwrap_or_else(|| "Acme Bot".to_string());
        created.tone = request.tone.unwrap_or_default();
        created.knowledge_items = request
            .knowledge_items
            .iter()
            .enumerate()
            .map(|(i, item)| KnowledgeItem {
                id: format!("k-{i}"),
                kind: item.kind,
                content: item.content.clone(),
            })
            .collect();
        inner.bots.push(created.clone());
        Ok(created)
    }

    async fn list_bots(&self) -> Result<Vec<Bot>, ApiError> {
        Ok(self.inner.lock().unwrap().bots.clone())
    }

    async fn get_bot(&self, id: &BotId) -> Result<Bot, ApiError> {
        let inner = self.inner.lock().unwrap();
        inner
            .bots
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: "not found".to_string(),
            })
    }

    async fn bot_status(&self, id: &BotId) -> Result<BotStatusResponse, ApiError> {
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.next_status(id)
    }

    async fn health(&self) -> Result<serde_json::Value, ApiError> {
        let inner = self.inner.lock().unwrap();
        inner
            .health
            .clone()
            .unwrap_or_else(|| Ok(serde_json::json!({"status": "ok"})))
    }
}
