use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::{dev::Server, web::Data, HttpServer};
use common::{
    db::init_db,
    mail::{listen_for_mail, MailQueue},
    settings::types::Settings,
};
use db_adapters::{PostgresUserRepository, UserRepository};
use server::{build_app, redis_session_store, session_key};
use use_cases::users::AuthContext;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, std::io::Error> {
        let db = init_db(&settings).await.map_err(std::io::Error::other)?;
        let repository: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(
            db,
            Duration::from_secs(settings.database.query_timeout_seconds),
        ));

        let (mail_queue, mail_receiver) = MailQueue::channel();
        listen_for_mail(mail_receiver, &settings).map_err(std::io::Error::other)?;
        let context = AuthContext::from_settings(&settings, mail_queue).map_err(std::io::Error::other)?;

        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, repository, context, settings).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

async fn run(
    listener: TcpListener,
    repository: Arc<dyn UserRepository>,
    context: AuthContext,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let key = session_key(&settings).map_err(std::io::Error::other)?;
    let store = redis_session_store(&settings)
        .await
        .map_err(std::io::Error::other)?;
    let repository = Data::from(repository);
    let context = Data::new(context);

    let server = HttpServer::new(move || {
        build_app(
            &settings,
            repository.clone(),
            context.clone(),
            store.clone(),
            key.clone(),
        )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
