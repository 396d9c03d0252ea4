//! Embed tag that loads the widget on a customer's site.

use chatdock_types::bot::BotId;

/// Path of the widget loader script on the backend.
pub const LOADER_PATH: &str = "/static/chatbot.js";

/// Script tag for `bot_id`, served from `backend_url`.
///
/// The loader reads the `data-bot-id` attribute, so the shape of this string
/// must not change.
pub fn embed_snippet(backend_url: &str, bot_id: &BotId) -> String {
    format!(
        r#"<script src="{}{LOADER_PATH}" data-bot-id="{bot_id}"></script>"#,
        backend_url.trim_end_matches('/')
    )
}
