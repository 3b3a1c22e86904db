use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::form_urlencoded;

use crate::error::Error;
use crate::fetch::{FetchConfig, Fetcher};
use crate::mail::SmtpSettings;

/// Prefix of the JSON exception envelope Moodle substitutes for a normal
/// response body when a call fails.
const EXCEPTION_PREFIX: &str = "{\"exception\":";

#[derive(Debug, Deserialize)]
struct ExceptionEnvelope {
    #[serde(default)]
    message: String,
    #[serde(default)]
    exception: String,
    #[serde(default)]
    errorcode: String,
    #[serde(default)]
    debuginfo: String,
}

/// Client for a Moodle server's JSON web-service API.
///
/// Every operation builds a query against the fixed REST endpoint, performs a
/// GET, checks for the exception envelope, and decodes the function-specific
/// response shape.
///
/// # Example
///
/// ```no_run
/// use moodle_client::MoodleClient;
///
/// # async fn run() -> Result<(), moodle_client::Error> {
/// let api = MoodleClient::new(
///     "https://moodle.example.com/moodle/",
///     "a0092ba9a9f5b45cdd2f01d049595bfe91",
/// )?;
///
/// for course in api.get_courses("History").await? {
///     println!("{}", course.code);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MoodleClient {
    base: String,
    token: String,
    fetcher: Fetcher,
    smtp: Option<SmtpSettings>,
}

impl MoodleClient {
    /// Create a client for the server at `base` (trailing slash included),
    /// authenticating with the given web-service token.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP transport cannot be constructed.
    pub fn new(base: impl Into<String>, token: impl Into<String>) -> Result<Self, Error> {
        Self::with_config(base, token, &FetchConfig::default())
    }

    /// Create a client with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP transport cannot be constructed.
    pub fn with_config(
        base: impl Into<String>,
        token: impl Into<String>,
        config: &FetchConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            base: base.into(),
            token: token.into(),
            fetcher: Fetcher::new(config)?,
            smtp: None,
        })
    }

    /// Attach SMTP settings, enabling the password-reset email flow.
    #[must_use]
    pub fn smtp(mut self, settings: SmtpSettings) -> Self {
        self.smtp = Some(settings);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub(crate) fn smtp_settings(&self) -> Option<&SmtpSettings> {
        self.smtp.as_ref()
    }

    pub(crate) fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// Assemble the REST endpoint URL for a web-service function.
    pub(crate) fn rest_url(&self, function: &str, params: &[(String, String)]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("wstoken", &self.token);
        query.append_pair("wsfunction", function);
        query.append_pair("moodlewsrestformat", "json");
        for (key, value) in params {
            query.append_pair(key, value);
        }
        format!("{}webservice/rest/server.php?{}", self.base, query.finish())
    }

    /// Perform a web-service call and return the raw body after checking for
    /// the exception envelope.
    pub(crate) async fn call(
        &self,
        function: &str,
        params: &[(String, String)],
    ) -> Result<String, Error> {
        let url = self.rest_url(function, params);
        debug!(%function, "moodle web service call");
        let body = self.fetcher.get(&url).await?;
        Self::check_exception(&body)?;
        Ok(body)
    }

    /// Perform a web-service call and decode the response shape.
    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        function: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let body = self.call(function, params).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Perform a write-style call whose only valid response body is `null`.
    pub(crate) async fn call_expect_null(
        &self,
        function: &str,
        params: &[(String, String)],
    ) -> Result<(), Error> {
        let body = self.call(function, params).await?;
        if body != "null" {
            return Err(Error::UnexpectedResponse(body));
        }
        Ok(())
    }

    /// Perform a write-style call whose only valid response body is empty.
    pub(crate) async fn call_expect_empty(
        &self,
        function: &str,
        params: &[(String, String)],
    ) -> Result<(), Error> {
        let body = self.call(function, params).await?;
        if !body.is_empty() {
            return Err(Error::UnexpectedResponse(body));
        }
        Ok(())
    }

    pub(crate) fn check_exception(body: &str) -> Result<(), Error> {
        if !body.starts_with(EXCEPTION_PREFIX) {
            return Ok(());
        }
        let envelope: ExceptionEnvelope = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(_) => {
                return Err(Error::UnexpectedResponse(body.to_owned()));
            }
        };
        let message = if envelope.message.is_empty() {
            envelope.exception.clone()
        } else {
            envelope.message.clone()
        };
        Err(Error::Upstream {
            message,
            exception: envelope.exception,
            error_code: envelope.errorcode,
            debug_info: envelope.debuginfo,
        })
    }
}
