//! Which bot the home view shows.

use chatdock_types::bot::{Bot, BotId};

/// Pick the bot to display from `bots`.
///
/// A requested id selects that bot, or nothing if it is unknown. Without a
/// request the first bot is selected.
pub fn select_bot<'a>(bots: &'a [Bot], requested: Option<&BotId>) -> Option<&'a Bot> {
    match requested.filter(|id| !id.is_blank()) {
        Some(id) => bots.iter().find(|bot| &bot.id == id),
        None => bots.first(),
    }
}

/// Home view path with `id` selected, e.g. `/?id=0b6d...`.
pub fn bot_home_path(id: &BotId) -> String {
    format!("/?id={id}")
}
