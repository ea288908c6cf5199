use clap::{Arg, ArgAction, ArgMatches, Command};
use common::settings::{load_settings, types::Settings};

pub fn new() -> Command {
    Command::new("portal")
        .about("Session based sign-up and sign-in portal")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .help("File with environment variables to load first")
                .default_value(".env"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("production")
                .long("production")
                .help("Run with production cookies and JSON logs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("database-url")
                .long("database-url")
                .help("PostgreSQL connection string"),
        )
        .arg(
            Arg::new("secret")
                .long("secret")
                .help("32 byte key for signing links and encrypting session values"),
        )
        .arg(
            Arg::new("frontend")
                .long("frontend")
                .help("Public URL used in emailed links"),
        )
        .arg(Arg::new("smtp-host").long("smtp-host").help("SMTP relay host"))
        .arg(
            Arg::new("smtp-port")
                .long("smtp-port")
                .help("SMTP relay port")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(Arg::new("smtp-user").long("smtp-user").help("SMTP user"))
        .arg(Arg::new("smtp-pass").long("smtp-pass").help("SMTP password"))
}

/// Flags win over values read from the environment.
pub fn apply_overrides(settings: &mut Settings, matches: &ArgMatches) {
    if let Some(port) = matches.get_one::<u16>("port") {
        settings.application.port = *port;
    }
    if matches.get_flag("production") {
        settings.debug = false;
        settings.application.protocol = "https".to_string();
    }
    let strings = [
        ("database-url", &mut settings.database.url),
        ("secret", &mut settings.secret.secret_key),
        ("frontend", &mut settings.application.frontend_url),
        ("smtp-host", &mut settings.email.host),
        ("smtp-user", &mut settings.email.host_user),
        ("smtp-pass", &mut settings.email.host_user_password),
    ];
    for (id, field) in strings {
        if let Some(value) = matches.get_one::<String>(id) {
            *field = value.clone();
        }
    }
    if let Some(port) = matches.get_one::<u16>("smtp-port") {
        settings.email.port = *port;
    }
}

pub fn settings_from_matches(matches: &ArgMatches) -> Result<Settings, String> {
    let env_file = matches
        .get_one::<String>("env-file")
        .map(String::as_str)
        .unwrap_or(".env");
    let mut settings = load_settings(env_file)?;
    apply_overrides(&mut settings, matches);
    settings.validate()?;
    Ok(settings)
}

pub fn get_settings_from_args() -> Result<Settings, String> {
    settings_from_matches(&new().get_matches())
}
