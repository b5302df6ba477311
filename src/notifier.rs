use chrono::Local;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build email: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivery seam for the formatted report. The pipeline only ever hands over
/// a text body and a recipient address.
pub trait Notifier {
    fn send(&self, body: &str, recipient: &str) -> Result<(), NotifyError>;
}

/// SMTP notifier: STARTTLS relay with a single credential pair, one plain
/// text message per run.
pub struct EmailNotifier {
    transport: SmtpTransport,
    sender: String,
}

impl EmailNotifier {
    pub fn new(smtp_host: &str, sender: String, app_password: String) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(sender.clone(), app_password);
        let transport = SmtpTransport::starttls_relay(smtp_host)?
            .credentials(credentials)
            .build();
        Ok(Self { transport, sender })
    }
}

impl Notifier for EmailNotifier {
    #[instrument(skip(self, body), fields(recipient = %recipient))]
    fn send(&self, body: &str, recipient: &str) -> Result<(), NotifyError> {
        let date = Local::now().date_naive();
        let email = Message::builder()
            .from(self.sender.parse()?)
            .to(recipient.parse()?)
            .subject(format!(
                "Dress-Weatherly: Weather & Outfit Report for {}",
                date
            ))
            .header(ContentType::TEXT_PLAIN)
            .body(wrap_body(body))?;

        debug!("Attempting SMTP delivery");
        self.transport.send(&email)?;
        info!("Report email sent");
        Ok(())
    }
}

fn wrap_body(content: &str) -> String {
    format!(
        "Hello from Dress-Weatherly!\n\n\
         Here's your daily weather and outfit recommendation:\n\n\
         {}\n\n\
         Stay comfortable!",
        content
    )
}
