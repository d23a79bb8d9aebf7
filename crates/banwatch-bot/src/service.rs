//! Command business logic, independent of the Discord gateway.

#[path = "service_tests.rs"]
mod service_tests;

use std::sync::Arc;

use banwatch_lookup::AccountLookup;
use banwatch_types::Language;
use tracing::{error, info};

use crate::commands::is_valid_player_id;
use crate::language_store::LanguageStore;
use crate::messages::{self, Caller, Reply};

/// Executes bot commands against an account lookup and a language store.
pub struct CommandService<L, S> {
    lookup: Arc<L>,
    languages: S,
    prefix: String,
}

impl<L: AccountLookup, S: LanguageStore> CommandService<L, S> {
    pub fn new(lookup: L, languages: S, prefix: impl Into<String>) -> Self {
        Self {
            lookup: Arc::new(lookup),
            languages,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `check`: validate the player id, run the region lookup and render the
    /// outcome in the caller's language.
    pub async fn check(&self, caller: &Caller, raw_player_id: &str) -> Reply {
        let lang = self.languages.get(caller.id).await;
        let mention = caller.mention();
        let player_id = raw_player_id.trim();

        info!(user = caller.id, lang = %lang, player_id, "check command");

        if !is_valid_player_id(player_id) {
            return Reply::text(messages::invalid_player_id(lang, &mention, &self.prefix));
        }

        // Run the lookup on its own task so a fault inside it becomes a reply
        // instead of tearing down the event handler.
        let lookup = Arc::clone(&self.lookup);
        let id = player_id.to_string();
        let outcome = tokio::spawn(async move { lookup.lookup(&id).await }).await;

        match outcome {
            Ok(Ok(record)) => messages::account_report(lang, caller, player_id, &record),
            Ok(Err(err)) => {
                info!(user = caller.id, player_id, tag = err.tag(), "lookup failed");
                Reply::text(messages::lookup_error(lang, &mention, &err))
            }
            Err(join_err) => {
                error!(user = caller.id, player_id, error = %join_err, "lookup task faulted");
                Reply::text(messages::lookup_fault(lang, &mention, &join_err.to_string()))
            }
        }
    }

    /// `lang`: switch the caller's reply language.
    pub async fn set_language(&self, caller: &Caller, code: Option<&str>) -> Reply {
        let parsed = code.map(str::parse::<Language>);
        match parsed {
            Some(Ok(lang)) => {
                self.languages.set(caller.id, lang).await;
                info!(user = caller.id, lang = %lang, "language updated");
                Reply::text(messages::language_set(lang, &caller.mention()))
            }
            _ => Reply::text(messages::invalid_language()),
        }
    }

    /// `guilds`: list the guilds the bot is in.
    pub async fn guilds(&self, caller: &Caller, guild_names: &[String]) -> Reply {
        let lang = self.languages.get(caller.id).await;
        Reply::text(messages::guild_list(lang, guild_names))
    }
}
