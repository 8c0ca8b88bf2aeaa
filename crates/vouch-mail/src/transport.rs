//! # Mail Transports
//!
//! [`Mailer`] is a closed enum over the two ways a message leaves the
//! process: a real SMTP relay, or an in-memory recording outbox. The seam
//! is a concrete type rather than a trait object so application state stays
//! `Clone + Send + Sync` without boxing.
//!
//! The recording variant exists for tests and for development environments
//! without relay credentials — sends are logged and captured, never
//! transmitted.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::DeliveryError;
use crate::message::MailMessage;

/// SMTP relay configuration.
///
/// `Debug` redacts the password so configuration can be logged at startup.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay hostname (STARTTLS on the submission port).
    pub relay: String,
    /// Relay username.
    pub username: String,
    /// Relay password.
    pub password: String,
    /// Sender address for all confirmation emails.
    pub from: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("relay", &self.relay)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// Outbound mail transport.
#[derive(Clone, Debug)]
pub enum Mailer {
    /// Deliver through an SMTP relay.
    Smtp(SmtpMailer),
    /// Capture messages in memory (tests, keyless development).
    Recording(RecordingMailer),
}

impl Mailer {
    /// Build an SMTP-backed mailer.
    pub fn smtp(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        Ok(Self::Smtp(SmtpMailer::new(config)?))
    }

    /// Build a recording mailer with an empty outbox.
    pub fn recording() -> Self {
        Self::Recording(RecordingMailer::new())
    }

    /// Send a message, or record it.
    ///
    /// The only blocking/suspending operation in the whole request flow;
    /// callers need nothing from it but the outcome.
    pub async fn send(&self, message: MailMessage) -> Result<(), DeliveryError> {
        match self {
            Self::Smtp(mailer) => mailer.send(message).await,
            Self::Recording(mailer) => {
                mailer.record(message);
                Ok(())
            }
        }
    }

    /// The recording outbox, when this mailer records.
    pub fn recorded(&self) -> Option<&RecordingMailer> {
        match self {
            Self::Recording(mailer) => Some(mailer),
            Self::Smtp(_) => None,
        }
    }
}

/// SMTP relay client.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").field("from", &self.from).finish()
    }
}

impl SmtpMailer {
    /// Connect parameters only — no I/O happens until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.relay)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from: Mailbox = config.from.parse()?;
        Ok(Self { transport, from })
    }

    async fn send(&self, message: MailMessage) -> Result<(), DeliveryError> {
        let to: Mailbox = message.to.parse()?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)?;

        self.transport.send(email).await?;
        tracing::info!("confirmation email relayed");
        Ok(())
    }
}

/// In-memory outbox that captures instead of sending.
///
/// The lock is `parking_lot` and never held across an `.await`.
#[derive(Clone, Debug, Default)]
pub struct RecordingMailer {
    outbox: Arc<RwLock<Vec<MailMessage>>>,
}

impl RecordingMailer {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, message: MailMessage) {
        tracing::info!(to = %message.to, "recording mail instead of sending");
        self.outbox.write().push(message);
    }

    /// Snapshot of everything recorded so far.
    pub fn messages(&self) -> Vec<MailMessage> {
        self.outbox.read().clone()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.outbox.read().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.outbox.read().is_empty()
    }
}
