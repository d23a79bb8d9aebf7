//! Localized reply rendering.
//!
//! Everything here is pure: it turns lookup outcomes into text and embed
//! descriptions. Conversion into serenity builders happens in `handlers`.

#[path = "messages_tests.rs"]
mod messages_tests;

use banwatch_types::{region_display_name, AccountRecord, Language, LookupError, SuspensionPeriod};

pub const BANNED_COLOUR: u32 = 0xFF0000;
pub const CLEAN_COLOUR: u32 = 0x00FF00;
pub const BANNED_IMAGE_URL: &str = "https://i.ibb.co/wFxTy8TZ/banned.gif";
pub const CLEAN_IMAGE_URL: &str = "https://i.ibb.co/Kx1RYVKZ/notbanned.gif";
pub const FOOTER: &str = "📌  Garena Free Fire";

/// Who issued the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: u64,
    pub avatar_url: String,
}

impl Caller {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A chat reply: plain content plus an optional rich embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub embed: Option<ReportEmbed>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            embed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEmbed {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub image_url: String,
    pub thumbnail_url: String,
    pub footer: String,
}

pub fn invalid_player_id(lang: Language, mention: &str, prefix: &str) -> String {
    match lang {
        Language::En => format!(
            "{mention} ❌ **Invalid UID!**\n➡️ Please use: `{prefix}check 123456789`"
        ),
        Language::Fr => format!(
            "{mention} ❌ **UID invalide !**\n➡️ Veuillez fournir un UID valide sous la forme : `{prefix}check 123456789`"
        ),
    }
}

pub fn lookup_error(lang: Language, mention: &str, err: &LookupError) -> String {
    let body = match (err, lang) {
        (LookupError::AccountNotFound, Language::En) => "**Account not found in any Free Fire region.**\nPlease verify the Player ID is correct.".to_string(),
        (LookupError::AccountNotFound, Language::Fr) => "**Compte introuvable dans toutes les régions Free Fire.**\nVeuillez vérifier que l'ID du joueur est correct.".to_string(),
        (LookupError::ServiceDown, Language::En) => "**The ban check service is currently unavailable.**\nPlease try again later when the service is restored.".to_string(),
        (LookupError::ServiceDown, Language::Fr) => "**Le service de vérification des bannissements est actuellement indisponible.**\nVeuillez réessayer plus tard lorsque le service sera rétabli.".to_string(),
        (LookupError::ServerError, Language::En) => "**The ban check service is experiencing technical issues.**\nPlease try again later.".to_string(),
        (LookupError::ServerError, Language::Fr) => "**Le service de vérification des bannissements rencontre des problèmes techniques.**\nVeuillez réessayer plus tard.".to_string(),
        (LookupError::Forbidden, Language::En) => "**Access to the ban check service was denied.**\nThis may be due to invalid credentials or rate limiting.".to_string(),
        (LookupError::Forbidden, Language::Fr) => "**L'accès au service de vérification des bannissements a été refusé.**\nCela peut être dû à des identifiants invalides ou à une limitation de débit.".to_string(),
        (LookupError::DataError, Language::En) => "**The ban check service returned unexpected data.**\nPlease try again later.".to_string(),
        (LookupError::DataError, Language::Fr) => "**Le service de vérification des bannissements a renvoyé des données inattendues.**\nVeuillez réessayer plus tard.".to_string(),
        (LookupError::Exception(details), Language::En) => format!(
            "**An error occurred while checking the ban status.**\nDetails: {}",
            or_default(details, "Unknown error")
        ),
        (LookupError::Exception(details), Language::Fr) => format!(
            "**Une erreur s'est produite lors de la vérification du statut de bannissement.**\nDétails: {}",
            or_default(details, "Erreur inconnue")
        ),
        (LookupError::Api(message), Language::En) => {
            format!("**API Error:** {}", or_default(message, "Unknown API error"))
        }
        (LookupError::Api(message), Language::Fr) => {
            format!("**Erreur API:** {}", or_default(message, "Erreur API inconnue"))
        }
    };
    format!("{mention} ❌ {body}")
}

/// Reply for a fault raised while running the lookup itself.
pub fn lookup_fault(lang: Language, mention: &str, description: &str) -> String {
    let label = lang.pick("Error", "Erreur");
    format!("{mention} ⚠️ {label}:\n```{description}```")
}

pub fn suspension_text(lang: Language, period: SuspensionPeriod) -> String {
    match (period, lang) {
        (SuspensionPeriod::Months(n), Language::En) => format!("more than {n} months"),
        (SuspensionPeriod::Months(n), Language::Fr) => format!("plus de {n} mois"),
        (SuspensionPeriod::Unavailable, lang) => lang.pick("unavailable", "indisponible").to_string(),
    }
}

pub fn account_report(
    lang: Language,
    caller: &Caller,
    player_id: &str,
    record: &AccountRecord,
) -> Reply {
    let mut lines = Vec::new();

    let (title, colour, image) = if record.banned {
        lines.push(field(
            lang.pick("Reason", "Raison"),
            lang.pick(
                "This account was confirmed for using cheats.",
                "Ce compte a été confirmé comme utilisant des hacks.",
            ),
        ));
        lines.push(field(
            lang.pick("Suspension duration", "Durée de la suspension"),
            &suspension_text(lang, record.period),
        ));
        (
            lang.pick("**▌ Banned Account 🛑 **", "**▌ Compte banni 🛑 **"),
            BANNED_COLOUR,
            BANNED_IMAGE_URL,
        )
    } else {
        lines.push(field(
            lang.pick("Status", "Statut"),
            lang.pick(
                "No sufficient evidence of cheat usage on this account.",
                "Aucune preuve suffisante pour confirmer l’utilisation de hacks sur ce compte.",
            ),
        ));
        (
            lang.pick("**▌ Clean Account ✅ **", "**▌ Compte non banni ✅ **"),
            CLEAN_COLOUR,
            CLEAN_IMAGE_URL,
        )
    };

    let nickname = if record.nickname.is_empty() {
        "NA"
    } else {
        record.nickname.as_str()
    };
    lines.push(code_field(lang.pick("Nickname", "Pseudo"), nickname));
    lines.push(code_field(lang.pick("Player ID", "ID du joueur"), player_id));
    lines.push(code_field(
        lang.pick("Region", "Région"),
        region_display_name(&record.region),
    ));
    if let Some(created_at) = &record.created_at {
        lines.push(code_field(lang.pick("Created At", "Créé le"), created_at));
    }
    if let Some(last_login) = &record.last_login {
        lines.push(code_field(
            lang.pick("Last Login", "Dernière connexion"),
            last_login,
        ));
    }

    Reply {
        content: caller.mention(),
        embed: Some(ReportEmbed {
            title: title.to_string(),
            description: lines.join("\n"),
            colour,
            image_url: image.to_string(),
            thumbnail_url: caller.avatar_url.clone(),
            footer: FOOTER.to_string(),
        }),
    }
}

pub fn language_set(lang: Language, mention: &str) -> String {
    let confirmation = lang.pick(
        "✅ Language set to English.",
        "✅ Langue définie sur le français.",
    );
    format!("{mention} {confirmation}")
}

pub fn invalid_language() -> String {
    let choices: Vec<String> = Language::ALL
        .iter()
        .map(|l| format!("`{}`", l.code()))
        .collect();
    format!("❌ Invalid language. Available: {}", choices.join(", "))
}

pub fn guild_list(lang: Language, names: &[String]) -> String {
    let header = lang.pick(
        "The bot is in the following guilds:",
        "Le bot est dans les guilds suivantes :",
    );
    let lines: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect();
    format!("{header}\n{}", lines.join("\n"))
}

fn field(label: &str, value: &str) -> String {
    format!("**• {label} :** {value}")
}

fn code_field(label: &str, value: &str) -> String {
    format!("**• {label} :** `{value}`")
}

fn or_default<'a>(s: &'a str, default: &'a str) -> &'a str {
    if s.is_empty() {
        default
    } else {
        s
    }
}
