use std::{sync::Arc, time::Duration};

use lettre::{
    message::{header::ContentType, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use minijinja::Environment;
use once_cell::sync::Lazy;
use tokio::task::JoinHandle;

use super::{MailData, MailError, MailReceiver};
use crate::settings::types::Settings;

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

static TEMPLATES: &[(&str, &str)] = &[
    (
        "activate-account",
        include_str!("templates/activate-account.html"),
    ),
    ("password-reset", include_str!("templates/password-reset.html")),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| {
        Ok(TEMPLATES
            .iter()
            .find(|(template_name, _)| *template_name == name)
            .map(|(_, source)| source.to_string()))
    });
    env
});

/// Renders the mail template and builds an HTML message out of it.
pub fn compose(mail: &MailData) -> Result<Message, MailError> {
    let body = ENV.get_template(&mail.template_name)?.render(&mail.data)?;
    let message = Message::builder()
        .from(mail.from.parse()?)
        .to(mail.to.parse()?)
        .subject(&mail.subject)
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(body),
        )?;
    Ok(message)
}

/// Consumes the queue until every `MailQueue` is dropped. Returns the
/// number of messages handed to the transport successfully.
pub async fn run_dispatcher<T>(mut receiver: MailReceiver, transport: T) -> usize
where
    T: Transport + Send + Sync + 'static,
    T::Error: std::fmt::Debug + Send + 'static,
{
    let transport = Arc::new(transport);
    let mut sent = 0;
    while let Some(mail) = receiver.recv().await {
        let message = match compose(&mail) {
            Ok(message) => message,
            Err(e) => {
                tracing::event!(target: "backend", tracing::Level::ERROR, "Could not compose mail to {}: {}", mail.to, e);
                continue;
            }
        };
        let transport = transport.clone();
        match tokio::task::spawn_blocking(move || transport.send(&message).map(|_| ())).await {
            Ok(Ok(())) => {
                tracing::event!(target: "backend", tracing::Level::INFO, "Email successfully sent to {}", mail.to);
                sent += 1;
            }
            Ok(Err(e)) => {
                tracing::event!(target: "backend", tracing::Level::ERROR, "Could not send email: {:#?}", e)
            }
            Err(e) => {
                tracing::event!(target: "backend", tracing::Level::ERROR, "Mail sending task failed: {}", e)
            }
        }
    }
    tracing::event!(target: "backend", tracing::Level::INFO, "Mail queue closed, dispatcher stopping");
    sent
}

/// Starts the dispatcher on an SMTP relay built from `settings.email`.
pub fn listen_for_mail(
    receiver: MailReceiver,
    settings: &Settings,
) -> Result<JoinHandle<usize>, MailError> {
    let transport = SmtpTransport::starttls_relay(&settings.email.host)?
        .port(settings.email.port)
        .credentials(Credentials::new(
            settings.email.host_user.clone(),
            settings.email.host_user_password.clone(),
        ))
        .timeout(Some(SMTP_TIMEOUT))
        .build();
    Ok(tokio::spawn(run_dispatcher(receiver, transport)))
}
