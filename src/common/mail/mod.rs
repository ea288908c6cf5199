mod dispatcher;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub use dispatcher::{compose, listen_for_mail, run_dispatcher};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("Failed to build mail message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("Failed to build SMTP transport: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("Mail dispatcher is not running")]
    QueueClosed,
}

/// A message waiting for the dispatcher. `data` is the render context of
/// `template_name`.
#[derive(Debug, Clone)]
pub struct MailData {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub template_name: String,
    pub data: minijinja::Value,
}

pub type MailReceiver = UnboundedReceiver<MailData>;

/// Producer side of the mail channel. Cloned into every request handler.
#[derive(Clone)]
pub struct MailQueue {
    sender: UnboundedSender<MailData>,
}

impl MailQueue {
    pub fn channel() -> (Self, MailReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, mail: MailData) -> Result<(), MailError> {
        self.sender.send(mail).map_err(|e| {
            tracing::event!(target: "backend", tracing::Level::ERROR, "Failed to queue mail to {}", e.0.to);
            MailError::QueueClosed
        })
    }
}
