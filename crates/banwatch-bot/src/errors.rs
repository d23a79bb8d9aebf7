//! Discord send-failure classification.
//!
//! A failed reply is never retried; this only decides how loudly to log it.

use serenity::http::HttpError;
use tracing::{error, warn};

/// How a failed Discord API call should be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendFailure {
    /// HTTP 429
    RateLimited,
    /// 4xx: the request itself is wrong (missing permissions, unknown channel)
    Permanent { status: u16, message: String },
    /// 5xx, network errors, gateway hiccups
    Transient { message: String },
}

/// Classify a serenity error.
pub fn classify(err: &serenity::Error) -> SendFailure {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => {
            classify_status(resp.status_code.as_u16(), &resp.error.message)
        }
        other => SendFailure::Transient {
            message: other.to_string(),
        },
    }
}

pub(crate) fn classify_status(status: u16, message: &str) -> SendFailure {
    match status {
        429 => SendFailure::RateLimited,
        400..=499 => SendFailure::Permanent {
            status,
            message: message.to_string(),
        },
        _ => SendFailure::Transient {
            message: format!("HTTP {}: {}", status, message),
        },
    }
}

/// Log a serenity error at the level its classification deserves.
pub fn log_send_error(context: &str, err: &serenity::Error) {
    log_failure(context, classify(err));
}

pub(crate) fn log_failure(context: &str, failure: SendFailure) {
    match failure {
        SendFailure::Permanent { status, message } => {
            error!("{} [HTTP {}]: {}", context, status, message);
        }
        SendFailure::RateLimited => {
            warn!("{}: rate limited by Discord", context);
        }
        SendFailure::Transient { message } => {
            warn!("{} (transient): {}", context, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Records the level of every event it sees.
    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn logged_levels(failure: SendFailure) -> Vec<Level> {
        let recorder = LevelRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, || log_failure("send reply", failure));
        let levels = recorder.0.lock().unwrap().clone();
        levels
    }

    #[test]
    fn test_rate_limit() {
        assert_eq!(classify_status(429, "You are being rate limited."), SendFailure::RateLimited);
    }

    #[test]
    fn test_missing_permissions_is_permanent() {
        assert_eq!(
            classify_status(403, "Missing Permissions"),
            SendFailure::Permanent {
                status: 403,
                message: "Missing Permissions".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_channel_is_permanent() {
        assert!(matches!(
            classify_status(404, "Unknown Channel"),
            SendFailure::Permanent { status: 404, .. }
        ));
    }

    #[test]
    fn test_server_errors_are_transient() {
        assert_eq!(
            classify_status(503, "overloaded"),
            SendFailure::Transient {
                message: "HTTP 503: overloaded".to_string()
            }
        );
    }

    #[test]
    fn test_non_http_error_is_transient() {
        let err = serenity::Error::Other("gateway closed");
        assert!(matches!(classify(&err), SendFailure::Transient { .. }));
    }

    #[test]
    fn test_transient_failures_log_at_warn() {
        let levels = logged_levels(SendFailure::Transient {
            message: "HTTP 502: bad gateway".to_string(),
        });
        assert_eq!(levels, vec![Level::WARN]);
    }

    #[test]
    fn test_permanent_failures_log_at_error() {
        let levels = logged_levels(SendFailure::Permanent {
            status: 403,
            message: "Missing Permissions".to_string(),
        });
        assert_eq!(levels, vec![Level::ERROR]);
    }
}
