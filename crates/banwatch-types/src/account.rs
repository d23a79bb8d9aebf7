//! Account record returned by a successful lookup

/// Sentinel shown for timestamps the lookup service did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// How long a ban is reported to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionPeriod {
    Months(u32),
    Unavailable,
}

/// Normalized view of a player account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub banned: bool,
    pub nickname: String,
    pub period: SuspensionPeriod,
    /// Region code as reported by the service (may be a code we don't know).
    pub region: String,
    /// `%Y-%m-%d %H:%M:%S`, `None` when missing or unparseable
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

impl AccountRecord {
    pub fn created_at_or_na(&self) -> &str {
        self.created_at.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn last_login_or_na(&self) -> &str {
        self.last_login.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}
