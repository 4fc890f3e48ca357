use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rsvp_core::config::{NotifyConfig, WeddingConfig};

use super::{BoxFuture, Confirmation, Notifier};
use crate::error::{NotifyError, NotifyResult};

fn parse_mailbox(value: &str) -> NotifyResult<Mailbox> {
    value
        .parse::<Mailbox>()
        .map_err(|source| NotifyError::InvalidAddress {
            address: value.to_string(),
            source,
        })
}

fn parse_address(value: &str) -> NotifyResult<Address> {
    value
        .parse::<Address>()
        .map_err(|source| NotifyError::InvalidAddress {
            address: value.to_string(),
            source,
        })
}

/// Sends confirmations over SMTP with STARTTLS.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    reply_to: Mailbox,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .field("reply_to", &self.reply_to)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// ## Summary
    /// Builds the transport from the `notify` section.
    ///
    /// Replies go to `notify.reply_to`, or to the wedding contact address
    /// when unset.
    ///
    /// ## Errors
    /// Returns an error if the host or sender is missing, or an address does not parse.
    pub fn from_config(config: &NotifyConfig, wedding: &WeddingConfig) -> NotifyResult<Self> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or(NotifyError::NotConfigured("notify.smtp_host"))?;
        let from = parse_mailbox(
            config
                .from
                .as_deref()
                .ok_or(NotifyError::NotConfigured("notify.from"))?,
        )?;
        let reply_to = parse_mailbox(
            config
                .reply_to
                .as_deref()
                .unwrap_or(&wedding.contact_email),
        )?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(host, port = config.smtp_port, "SMTP notifier configured");

        Ok(Self {
            transport: builder.build(),
            from,
            reply_to,
        })
    }

    /// ## Summary
    /// Builds the MIME message: plain text with an HTML alternative.
    ///
    /// ## Errors
    /// Returns an error if the recipient address does not parse.
    pub fn build_message(&self, confirmation: &Confirmation) -> NotifyResult<Message> {
        let to = Mailbox::new(
            Some(confirmation.to_name.clone()),
            parse_address(&confirmation.to_address)?,
        );

        Ok(Message::builder()
            .from(self.from.clone())
            .reply_to(self.reply_to.clone())
            .to(to)
            .subject(confirmation.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                confirmation.text.clone(),
                confirmation.html.clone(),
            ))?)
    }
}

impl Notifier for SmtpNotifier {
    fn send<'a>(&'a self, confirmation: &'a Confirmation) -> BoxFuture<'a, NotifyResult<()>> {
        Box::pin(async move {
            let message = self.build_message(confirmation)?;
            let response = self.transport.send(message).await?;
            tracing::debug!(code = %response.code(), "Confirmation accepted by SMTP relay");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use rsvp_core::config::EventConfig;

    use super::*;

    fn notify_config() -> NotifyConfig {
        NotifyConfig {
            enabled: true,
            smtp_host: Some("smtp.example.com".to_string()),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            from: Some("Anna & Ben <rsvp@anna-ben.example>".to_string()),
            reply_to: None,
        }
    }

    fn wedding() -> WeddingConfig {
        let event = EventConfig {
            title: "Event".to_string(),
            venue: String::new(),
            address: String::new(),
            time: String::new(),
        };
        WeddingConfig {
            bride: "Anna".to_string(),
            groom: "Ben".to_string(),
            contact_email: "hello@anna-ben.example".to_string(),
            contact_phone: None,
            ceremony: event.clone(),
            reception: event,
        }
    }

    fn confirmation(to_address: &str) -> Confirmation {
        Confirmation {
            to_name: "Jane Doe".to_string(),
            to_address: to_address.to_string(),
            subject: "RSVP Confirmation".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: "Hi".to_string(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_message_headers() {
        let notifier = SmtpNotifier::from_config(&notify_config(), &wedding()).expect("configured");

        let message = notifier
            .build_message(&confirmation("jane@x.com"))
            .expect("buildable");
        let headers = message.headers().to_string();

        assert!(headers.contains("<jane@x.com>"));
        assert!(headers.contains("Reply-To: hello@anna-ben.example"));
        assert!(headers.contains("Subject: RSVP Confirmation"));
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_recipient_is_an_error() {
        let notifier = SmtpNotifier::from_config(&notify_config(), &wedding()).expect("configured");

        let error = notifier
            .build_message(&confirmation("not-an-email"))
            .expect_err("invalid recipient");

        assert!(matches!(error, NotifyError::InvalidAddress { .. }));
    }

    #[test]
    fn test_missing_host_is_not_configured() {
        let config = NotifyConfig {
            smtp_host: None,
            ..notify_config()
        };

        let error = SmtpNotifier::from_config(&config, &wedding()).expect_err("missing host");

        assert!(matches!(error, NotifyError::NotConfigured("notify.smtp_host")));
    }
}
