//! Prefix command parsing

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `check <player id>`; the raw, trimmed remainder of the message
    Check(String),
    /// `lang <code>`
    Lang(Option<String>),
    /// `guilds`
    Guilds,
}

impl Command {
    /// Parse a message body. Returns `None` for anything that isn't one of
    /// our commands, including unknown names behind the prefix.
    pub fn parse(prefix: &str, content: &str) -> Option<Self> {
        let rest = content.trim_start().strip_prefix(prefix)?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "check" => Some(Command::Check(args.to_string())),
            "lang" => Some(Command::Lang(
                args.split_whitespace().next().map(str::to_string),
            )),
            "guilds" => Some(Command::Guilds),
            _ => None,
        }
    }
}

/// Player ids are non-empty runs of ASCII digits.
pub fn is_valid_player_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
