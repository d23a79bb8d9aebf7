//! Serenity event handler implementation

use std::sync::Arc;

use banwatch_lookup::RegionResolver;
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::Timestamp;
use serenity::prelude::*;
use tracing::{error, info};

use crate::commands::{is_valid_player_id, Command};
use crate::errors;
use crate::health::HealthState;
use crate::language_store::InMemoryLanguageStore;
use crate::messages::{Caller, Reply, ReportEmbed};
use crate::service::CommandService;

pub type BotCommands = CommandService<RegionResolver, InMemoryLanguageStore>;

/// TypeMap key for the shared command service.
pub struct CommandServiceKey;

impl TypeMapKey for CommandServiceKey {
    type Value = Arc<BotCommands>;
}

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let name = ready.user.tag();
        info!(guilds = ready.guilds.len(), "Discord bot connected as {}", name);

        let data = ctx.data.read().await;
        if let Some(health) = data.get::<HealthState>() {
            health.set_bot_name(name).await;
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Skip bot messages
        if msg.author.bot {
            return;
        }

        let service = {
            let data = ctx.data.read().await;
            match data.get::<CommandServiceKey>() {
                Some(s) => s.clone(),
                None => {
                    error!("CommandService not found in context data");
                    return;
                }
            }
        };

        let Some(command) = Command::parse(service.prefix(), &msg.content) else {
            return;
        };

        let caller = Caller {
            id: msg.author.id.get(),
            avatar_url: msg.author.face(),
        };

        let reply = match command {
            Command::Check(player_id) => {
                let typing = is_valid_player_id(&player_id)
                    .then(|| msg.channel_id.start_typing(&ctx.http));
                let reply = service.check(&caller, &player_id).await;
                if let Some(typing) = typing {
                    typing.stop();
                }
                reply
            }
            Command::Lang(code) => service.set_language(&caller, code.as_deref()).await,
            Command::Guilds => {
                let names = guild_names(&ctx);
                info!(user = caller.id, guilds = names.len(), "guilds command");
                service.guilds(&caller, &names).await
            }
        };

        send_reply(&ctx, &msg, reply).await;
    }
}

/// Names of every guild in the cache, falling back to the id for guilds
/// whose details haven't arrived yet.
fn guild_names(ctx: &Context) -> Vec<String> {
    ctx.cache
        .guilds()
        .into_iter()
        .map(|id| id.name(&ctx.cache).unwrap_or_else(|| id.get().to_string()))
        .collect()
}

async fn send_reply(ctx: &Context, msg: &Message, reply: Reply) {
    let mut builder = CreateMessage::new().content(reply.content);
    if let Some(embed) = reply.embed {
        builder = builder.embed(build_embed(embed, msg.timestamp));
    }

    if let Err(e) = msg.channel_id.send_message(ctx, builder).await {
        errors::log_send_error(
            &format!("Failed to send reply in channel {}", msg.channel_id),
            &e,
        );
    }
}

fn build_embed(embed: ReportEmbed, timestamp: Timestamp) -> CreateEmbed {
    CreateEmbed::new()
        .title(embed.title)
        .description(embed.description)
        .colour(embed.colour)
        .image(embed.image_url)
        .thumbnail(embed.thumbnail_url)
        .footer(CreateEmbedFooter::new(embed.footer))
        .timestamp(timestamp)
}
