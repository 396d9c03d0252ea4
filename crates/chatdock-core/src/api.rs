//! WidgetApi trait definition.
//!
//! The port through which the poller, the wizard and the console reach the
//! widget backend. The REST implementation lives in chatdock-infra
//! (`RestClient`); tests use in-memory mocks.

use std::future::Future;

use chatdock_types::bot::{Bot, BotId, CreateBotRequest};
use chatdock_types::company::{Company, CompanyUpsert};
use chatdock_types::error::ApiError;
use chatdock_types::polling::BotStatusResponse;

/// Operations offered by the widget backend under `/rest/v1`.
///
/// Uses native async fn in traits (RPITIT), like the rest of the workspace.
pub trait WidgetApi: Send + Sync {
    /// `GET /company`. `Ok(None)` when no company has been configured yet.
    fn get_company(&self) -> impl Future<Output = Result<Option<Company>, ApiError>> + Send;

    /// `POST /company` (multipart). Creates or updates the session's company.
    fn upsert_company(
        &self,
        company: &CompanyUpsert,
    ) -> impl Future<Output = Result<Company, ApiError>> + Send;

    /// `POST /bot`.
    fn create_bot(
        &self,
        request: &CreateBotRequest,
    ) -> impl Future<Output = Result<Bot, ApiError>> + Send;

    /// `GET /bots`.
    fn list_bots(&self) -> impl Future<Output = Result<Vec<Bot>, ApiError>> + Send;

    /// `GET /bot/{id}`.
    fn get_bot(&self, id: &BotId) -> impl Future<Output = Result<Bot, ApiError>> + Send;

    /// `GET /bot/{id}/status`.
    fn bot_status(
        &self,
        id: &BotId,
    ) -> impl Future<Output = Result<BotStatusResponse, ApiError>> + Send;

    /// `GET /health/live`, returning the raw JSON payload.
    fn health(&self) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;
}
