use thiserror::Error;

/// Unified error type covering transport, upstream, decoding, and mail
/// failures.
///
/// Returned by every [`MoodleClient`](crate::MoodleClient) operation. The
/// restriction evaluator itself never produces an error; only decoding its
/// payload can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its JSON exception envelope.
    #[error("moodle error ({error_code}): {message}")]
    Upstream {
        message: String,
        exception: String,
        error_code: String,
        debug_info: String,
    },

    #[error("server returned unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("could not decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("ignored non-text response: {0}")]
    NonTextResponse(String),

    /// A lookup that must identify one account matched several.
    #[error("multiple moodle accounts match this {0}")]
    AmbiguousMatch(&'static str),

    #[error("email address not found in moodle")]
    UnknownEmail,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("smtp settings are incomplete: {0} required")]
    SmtpSettings(&'static str),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("could not build mail message: {0}")]
    Mail(#[from] lettre::error::Error),

    #[error("invalid mail address: {0}")]
    MailAddress(#[from] lettre::address::AddressError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message() {
        let err = Error::Upstream {
            message: "Invalid token".into(),
            exception: "moodle_exception".into(),
            error_code: "invalidtoken".into(),
            debug_info: String::new(),
        };
        assert_eq!(err.to_string(), "moodle error (invalidtoken): Invalid token");
    }

    #[test]
    fn ambiguous_match_message() {
        let err = Error::AmbiguousMatch("email address");
        assert_eq!(
            err.to_string(),
            "multiple moodle accounts match this email address"
        );
    }

    #[test]
    fn smtp_settings_message() {
        let err = Error::SmtpSettings("host and port");
        assert_eq!(err.to_string(), "smtp settings are incomplete: host and port required");
    }
}
