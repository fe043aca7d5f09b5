//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output language (e.g., 'en', 'es'), overrides the settings file
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Log filter, e.g. 'info' or 'evreg=debug'
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the signup state of an event
    Resolve {
        /// Path to the event YAML file
        #[arg(value_name = "EVENT_FILE")]
        event_file: PathBuf,
        /// Booked seats, read from the registration store when omitted
        #[arg(long)]
        booked:     Option<u32>,
        /// Waitlisted seats, read from the registration store when omitted
        #[arg(long)]
        waitlisted: Option<u32>,
        /// Instant to resolve at (RFC 3339), defaults to the current time
        #[arg(long)]
        now:        Option<String>
    },
    /// Print availability and waitlist labels
    Labels {
        /// Event capacity, 0 for unlimited
        #[arg(long)]
        capacity:   u32,
        #[arg(long, default_value_t = 0)]
        booked:     u32,
        #[arg(long, default_value_t = 0)]
        waitlisted: u32
    },
    /// Register for an event
    Register {
        /// Path to the event YAML file
        #[arg(value_name = "EVENT_FILE")]
        event_file:        PathBuf,
        #[arg(long)]
        name:              String,
        #[arg(long)]
        email:             String,
        #[arg(long)]
        phone:             Option<String>,
        #[arg(long)]
        company:           Option<String>,
        #[arg(long)]
        tax_id:            Option<String>,
        #[arg(long)]
        role:              Option<String>,
        /// Number of seats for this registration
        #[arg(long, default_value_t = 1)]
        party_size:        u32,
        /// Accept the privacy policy
        #[arg(long)]
        privacy_consent:   bool,
        /// Opt in to marketing emails
        #[arg(long)]
        marketing_consent: bool,
        /// Instant to submit at (RFC 3339), defaults to the current time
        #[arg(long)]
        now:               Option<String>
    },
    /// Show the signup state and registrations of an event
    Status {
        /// Path to the event YAML file
        #[arg(value_name = "EVENT_FILE")]
        event_file: PathBuf,
        /// Instant to resolve at (RFC 3339), defaults to the current time
        #[arg(long)]
        now:        Option<String>
    },
    /// Language management commands
    Lang {
        #[command(subcommand)]
        command: LangCommands
    }
}

#[derive(Subcommand, Debug)]
pub enum LangCommands {
    /// Set the current language
    Set {
        /// Language code (e.g., 'en', 'es')
        language: String
    },
    /// Show current language
    Current,
    /// List available languages
    List
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_register_arguments() {
        let cli = Cli::try_parse_from([
            "evreg",
            "--lang",
            "es",
            "register",
            "events/meetup.yaml",
            "--name",
            "Ada",
            "--email",
            "ada@example.org",
            "--party-size",
            "2",
            "--privacy-consent"
        ])
        .unwrap();

        assert_eq!(cli.lang.as_deref(), Some("es"));
        match cli.command {
            Commands::Register { party_size, privacy_consent, marketing_consent, tax_id, .. } => {
                assert_eq!(party_size, 2);
                assert!(privacy_consent);
                assert!(!marketing_consent);
                assert_eq!(tax_id, None);
            }
            other => panic!("unexpected command {:?}", other)
        }
    }
}
