//! Delivery of the composed report over SMTP.
//!
//! A fresh connection is opened for every send: STARTTLS upgrade, login with
//! the configured credentials, one message, then the session is closed.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
};

use crate::{Res, config::MailSettings, error::Error, types::Report};

/// Sends a finished report to the configured recipient.
#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn send(&self, report: &Report) -> Res<()>;
}

pub struct SmtpMailer {
    settings: MailSettings,
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings) -> Self {
        SmtpMailer {
            settings: settings.clone(),
        }
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, report: &Report) -> Res<()> {
        let message = build_message(&self.settings, report)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .map_err(|e| Error::Mail(e.to_string()))?
            .port(self.settings.port)
            .credentials(Credentials::new(
                self.settings.user.clone(),
                self.settings.password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;
        Ok(())
    }
}

/// Builds the message: plain text alone, or plain text with an HTML alternative.
pub fn build_message(settings: &MailSettings, report: &Report) -> Res<Message> {
    let from: Mailbox = settings
        .user
        .parse()
        .map_err(|_| Error::Address(settings.user.clone()))?;
    let to: Mailbox = settings
        .to
        .parse()
        .map_err(|_| Error::Address(settings.to.clone()))?;

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(report.subject.clone());

    let message = match &report.html_body {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(
            report.text_body.clone(),
            html.clone(),
        )),
        None => builder.singlepart(SinglePart::plain(report.text_body.clone())),
    };

    message.map_err(|e| Error::Mail(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MailSettings {
        MailSettings {
            user: "digest@example.com".to_string(),
            password: "secret".to_string(),
            to: "reader@example.com".to_string(),
            host: "smtp.example.com".to_string(),
            port: 587,
        }
    }

    fn report(html: Option<&str>) -> Report {
        Report {
            subject: "Sorties de la Semaine - WK12".to_string(),
            text_body: "Artist - Album [Album]\n".to_string(),
            html_body: html.map(str::to_string),
        }
    }

    #[test]
    fn html_report_is_multipart_alternative() {
        let message = build_message(&settings(), &report(Some("<p>hi</p>"))).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("To: reader@example.com"));
    }

    #[test]
    fn text_only_report_has_no_html_part() {
        let message = build_message(&settings(), &report(None)).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("text/plain"));
        assert!(!raw.contains("text/html"));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let mut settings = settings();
        settings.to = "not an address".to_string();

        let err = build_message(&settings, &report(None)).unwrap_err();
        assert!(matches!(err, Error::Address(_)));
    }
}
