use crate::{error_500, UseCaseError};
use common::{
    crypto::{EncryptionError, Encryptor, UrlSigner},
    mail::{MailData, MailError, MailQueue},
    settings::types::Settings,
};

/// Everything the account flows need besides the repository.
#[derive(Clone)]
pub struct AuthContext {
    pub signer: UrlSigner,
    pub encryptor: Encryptor,
    pub mail_queue: MailQueue,
    pub frontend_url: String,
    pub mail_sender: String,
    pub link_expiration_minutes: i64,
}

impl AuthContext {
    /// Fails when `secret.secret_key` is not a valid AES-256 key.
    pub fn from_settings(settings: &Settings, mail_queue: MailQueue) -> Result<Self, EncryptionError> {
        let secret_key = settings.secret.secret_key.as_bytes();
        Ok(Self {
            signer: UrlSigner::new(secret_key),
            encryptor: Encryptor::new(secret_key)?,
            mail_queue,
            frontend_url: settings
                .application
                .frontend_url
                .trim_end_matches('/')
                .to_string(),
            mail_sender: settings.email.sender.clone(),
            link_expiration_minutes: settings.secret.link_expiration_minutes,
        })
    }

    pub fn frontend_link(&self, path: &str) -> String {
        format!("{}{}", self.frontend_url, path)
    }

    /// Encrypts an email address before it is parked in the session.
    pub fn seal_email(&self, email: &str) -> Result<String, UseCaseError> {
        self.encryptor.encrypt(email).map_err(error_500)
    }

    pub fn open_email(&self, sealed: &str) -> Result<String, UseCaseError> {
        self.encryptor.decrypt(sealed).map_err(|e| {
            tracing::event!(target: "backend", tracing::Level::WARN, "Could not decrypt session email: {}", e);
            UseCaseError::BadRequest("Your session has expired, please use the link again.".to_string())
        })
    }

    pub(crate) fn queue_mail(
        &self,
        to: &str,
        subject: &str,
        template_name: &str,
        data: minijinja::Value,
    ) -> Result<(), MailError> {
        self.mail_queue.send(MailData {
            to: to.to_string(),
            from: self.mail_sender.clone(),
            subject: subject.to_string(),
            template_name: template_name.to_string(),
            data,
        })
    }
}
