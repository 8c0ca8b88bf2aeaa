//! # vouch-mail — Email Delivery Collaborator
//!
//! The out-of-band transport for claim credentials. The credential core
//! treats this crate as an opaque collaborator: it hands over a recipient
//! and a token, and only ever looks at the success/failure outcome.
//!
//! - **Message composition** (`message.rs`): builds the confirmation email
//!   with the clickable claim link.
//! - **Transport** (`transport.rs`): [`Mailer`] — an SMTP relay client, or
//!   a recording in-memory outbox for tests and keyless development.
//!
//! No retry logic lives here or in the callers; a failed delivery surfaces
//! as [`DeliveryError`] and the client's corrective action is to request
//! access again.

pub mod error;
pub mod message;
pub mod transport;

pub use error::DeliveryError;
pub use message::{claim_link, compose_claim_email, MailMessage};
pub use transport::{Mailer, RecordingMailer, SmtpConfig, SmtpMailer};
