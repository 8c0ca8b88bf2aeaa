//! # Message Composition
//!
//! Builds the confirmation email: recipient address in the fixed corporate
//! domain, the standing subject line, and an HTML body whose only payload
//! is the clickable claim link.
//!
//! The identifier appears here once, to compose the recipient address, and
//! is gone the moment the message is handed to the transport — it is never
//! embedded in the credential or stored anywhere.

use url::Url;

use crate::error::DeliveryError;

/// Subject line of every confirmation email.
pub const CLAIM_SUBJECT: &str = "Please confirm your email address.";

/// An assembled outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address (`<name>@<domain>`).
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body containing the claim link.
    pub html_body: String,
}

/// Compose the clickable claim URL: `<base_url>/v1/claim-access/<token>`.
///
/// Built through URL path segments rather than string concatenation so a
/// base URL with or without a trailing slash composes the same link.
pub fn claim_link(base_url: &Url, token: &str) -> Result<Url, DeliveryError> {
    let mut link = base_url.clone();
    link.path_segments_mut()
        .map_err(|()| DeliveryError::Link(format!("base URL cannot carry a path: {base_url}")))?
        .pop_if_empty()
        .extend(["v1", "claim-access", token]);
    Ok(link)
}

/// Compose the full confirmation email for a claim token.
pub fn compose_claim_email(
    email_name: &str,
    mail_domain: &str,
    base_url: &Url,
    token: &str,
) -> Result<MailMessage, DeliveryError> {
    let link = claim_link(base_url, token)?;
    let html_body = format!(
        "If you just requested access to the {mail_domain} web services,\n\
         please click the link below to prove that you own a {mail_domain}\n\
         email address.\n\
         <p>\n\
         <a href=\"{link}\">click here</a>\n"
    );
    Ok(MailMessage {
        to: format!("{email_name}@{mail_domain}"),
        subject: CLAIM_SUBJECT.to_string(),
        html_body,
    })
}
