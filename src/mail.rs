use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::error::Error;
use crate::types::Person;

/// SMTP relay settings for the password-reset email.
///
/// The relay is contacted over implicit TLS (SMTPS, typically port 465).
#[derive(Debug, Clone, Default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_name: String,
    pub from_email: String,
}

impl SmtpSettings {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.host.is_empty() || self.port == 0 {
            return Err(Error::SmtpSettings("host and port"));
        }
        if self.user.is_empty() || self.password.is_empty() {
            return Err(Error::SmtpSettings("user and password"));
        }
        if self.from_name.is_empty() || self.from_email.is_empty() {
            return Err(Error::SmtpSettings("from name and email"));
        }
        Ok(())
    }
}

/// Template for the email sent after a password reset.
///
/// The credentials block is fixed; subject, intro paragraph, optional support
/// line, and signature vary per deployment.
#[derive(Debug, Clone)]
pub struct WelcomeEmail {
    pub subject: String,
    pub intro: String,
    pub support_line: Option<String>,
    pub signature: String,
}

impl Default for WelcomeEmail {
    fn default() -> Self {
        Self {
            subject: "Welcome to Moodle".to_owned(),
            intro: "Welcome to Moodle. You can sign-in using the details below:".to_owned(),
            support_line: None,
            signature: "Moodle Administrator".to_owned(),
        }
    }
}

impl WelcomeEmail {
    pub(crate) fn body(
        &self,
        first_name: &str,
        site_url: &str,
        username: &str,
        password: &str,
    ) -> String {
        let mut body = String::new();
        body.push_str(&format!("Hi {first_name},\r\n\r\n"));
        body.push_str(&format!("{}\r\n\r\n", self.intro));
        body.push_str(&format!("    URL: {site_url}\r\n"));
        body.push_str(&format!("    Username: {username}\r\n"));
        body.push_str(&format!("    Password: {password}\r\n\r\n"));
        if let Some(line) = &self.support_line {
            body.push_str(&format!("{line}\r\n\r\n"));
        }
        body.push_str(&format!("{}\r\n", self.signature));
        body
    }
}

/// Send the welcome email carrying freshly reset credentials. The account's
/// email address doubles as the sign-in username shown in the body.
pub(crate) async fn send_welcome(
    settings: &SmtpSettings,
    template: &WelcomeEmail,
    person: &Person,
    site_url: &str,
    password: &str,
) -> Result<(), Error> {
    settings.validate()?;

    let from: Mailbox = format!("{} <{}>", settings.from_name, settings.from_email).parse()?;
    let to: Mailbox = format!(
        "{} {} <{}>",
        person.first_name, person.last_name, person.email
    )
    .parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(&template.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(template.body(&person.first_name, site_url, &person.email, password))?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        .port(settings.port)
        .credentials(Credentials::new(
            settings.user.clone(),
            settings.password.clone(),
        ))
        .build();

    debug!(to = %person.email, "sending password reset email");
    mailer.send(message).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_owned(),
            port: 465,
            user: "mailer".to_owned(),
            password: "secret".to_owned(),
            from_name: "College".to_owned(),
            from_email: "college@example.com".to_owned(),
        }
    }

    #[test]
    fn validate_complete_settings() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn validate_missing_host() {
        let s = SmtpSettings {
            host: String::new(),
            ..settings()
        };
        assert!(matches!(s.validate(), Err(Error::SmtpSettings(_))));
    }

    #[test]
    fn validate_missing_credentials() {
        let s = SmtpSettings {
            user: String::new(),
            ..settings()
        };
        assert!(matches!(s.validate(), Err(Error::SmtpSettings(_))));
    }

    #[test]
    fn body_contains_credentials_block() {
        let template = WelcomeEmail::default();
        let body = template.body("Jan", "https://moodle.example.com/", "jan@example.com", "pw-1");
        assert!(body.starts_with("Hi Jan,\r\n"));
        assert!(body.contains("    URL: https://moodle.example.com/\r\n"));
        assert!(body.contains("    Username: jan@example.com\r\n"));
        assert!(body.contains("    Password: pw-1\r\n"));
    }

    #[test]
    fn body_includes_support_line_when_set() {
        let template = WelcomeEmail {
            support_line: Some("If you have any difficulties, contact support.".to_owned()),
            ..WelcomeEmail::default()
        };
        let body = template.body("Jan", "url", "u", "p");
        assert!(body.contains("If you have any difficulties, contact support."));
    }
}
