//! # evreg
//!
//! Command-line front end of the event signup engine.
//!
//! ## Usage
//!
//! ```bash
//! # What does the signup area of this event show right now?
//! evreg resolve events/meetup.yaml
//!
//! # Same, with explicit counts and instant
//! evreg resolve events/meetup.yaml --booked 20 --waitlisted 2 --now 2025-06-01T12:00:00+02:00
//!
//! # Register a party of two
//! evreg register events/meetup.yaml --name "Ada" --email ada@example.org --party-size 2 --privacy-consent
//!
//! # Decision and registrations table
//! evreg status events/meetup.yaml
//! ```

use std::process::ExitCode;

use clap::Parser;
use evreg::{
    cli::{
        Cli,
        commands::{self, CommandContext},
        display::render_error
    },
    config::load_settings,
    domain::error::SignupError,
    i18n::{self, Language}
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let mut lang = Language::English;
    match run(cli, &mut lang).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", render_error(&e, lang));
            ExitCode::FAILURE
        }
    }
}

/// Load settings, pick the output language and run the command
async fn run(cli: Cli, lang: &mut Language) -> Result<(), SignupError> {
    let settings = load_settings()?;
    *lang = match cli.lang.as_deref() {
        Some(code) => commands::parse_language(code, settings.language())?,
        None => settings.language()
    };
    i18n::init(*lang);

    let ctx = CommandContext::new(settings, *lang)?;
    commands::execute(cli.command, &ctx).await
}
