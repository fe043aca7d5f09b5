//! Command handlers of the evreg binary

use std::{path::Path, sync::Arc};

use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    adapter::{
        event_source::{FileEventSource, load_event_file, load_roster},
        file_store::FileCapacityService
    },
    cli::{
        args::{Commands, LangCommands},
        display::{render_registrations, render_view}
    },
    config::{self, Settings},
    domain::{
        capacity::CapacitySnapshot,
        colleague::{Colleague, normalize_colleagues},
        error::SignupError,
        metadata::parse_instant,
        registration::{RegistrationRequest, RegistrationStatus}
    },
    i18n::Language,
    port::capacity::CapacityService,
    resolver::{labels::CapacityLabels, notice::render_notice},
    service::signup::{SignupService, SignupView},
    t_params
};

/// Everything a command needs besides its arguments
pub struct CommandContext {
    pub settings:    Settings,
    pub site_offset: FixedOffset,
    pub lang:        Language
}

impl CommandContext {
    pub fn new(settings: Settings, lang: Language) -> Result<Self, SignupError> {
        let site_offset = settings.site_offset()?;
        Ok(Self { settings, site_offset, lang })
    }

    fn capacity_store(&self) -> Result<FileCapacityService, SignupError> {
        Ok(FileCapacityService::new(self.settings.data_dir()?))
    }

    /// Configured roster, empty when no roster file is set
    async fn roster(&self) -> Result<Vec<Colleague>, SignupError> {
        match &self.settings.roster_file {
            Some(path) => load_roster(path).await,
            None => Ok(Vec::new())
        }
    }

    /// Signup service over one event file and the registration store
    async fn signup_service(&self, event_file: &Path) -> Result<SignupService, SignupError> {
        let service = SignupService::new(
            Arc::new(FileEventSource::for_event_file(event_file)),
            Arc::new(self.capacity_store()?),
            self.site_offset,
            self.settings.module_enabled_default
        );
        Ok(service.with_roster(self.roster().await?))
    }

    /// `--now` when given, the system clock otherwise
    fn now(&self, raw: Option<&str>) -> Result<DateTime<Utc>, SignupError> {
        let Some(raw) = raw else {
            return Ok(Utc::now());
        };

        match parse_instant("now", Some(raw), self.site_offset) {
            Ok(Some(instant)) => Ok(instant.with_timezone(&Utc)),
            _ => Err(SignupError::Configuration(t_params!("error_invalid_now", &[raw], self.lang)))
        }
    }
}

/// Run one command, printing its output to stdout
pub async fn execute(command: Commands, ctx: &CommandContext) -> Result<(), SignupError> {
    match command {
        Commands::Resolve { event_file, booked, waitlisted, now } => {
            resolve(ctx, &event_file, booked, waitlisted, now.as_deref()).await
        }
        Commands::Labels { capacity, booked, waitlisted } => {
            let labels = CapacityLabels::new(capacity, booked, waitlisted);
            println!("{}", t_params!("cli_availability", &[&labels.availability.render(ctx.lang)], ctx.lang));
            println!("{}", t_params!("cli_waitlist", &[&labels.waitlist.render(ctx.lang)], ctx.lang));
            Ok(())
        }
        Commands::Register {
            event_file,
            name,
            email,
            phone,
            company,
            tax_id,
            role,
            party_size,
            privacy_consent,
            marketing_consent,
            now
        } => {
            let request = RegistrationRequest {
                name,
                email,
                phone,
                company,
                tax_id,
                role,
                party_size,
                privacy_consent,
                marketing_consent
            };
            register(ctx, &event_file, request, now.as_deref()).await
        }
        Commands::Status { event_file, now } => status(ctx, &event_file, now.as_deref()).await,
        Commands::Lang { command } => lang(ctx, command)
    }
}

async fn resolve(
    ctx: &CommandContext,
    event_file: &Path,
    booked: Option<u32>,
    waitlisted: Option<u32>,
    now: Option<&str>
) -> Result<(), SignupError> {
    let now = ctx.now(now)?;
    let metadata = load_event_file(event_file).await?;

    let view = if booked.is_none() && waitlisted.is_none() {
        ctx.signup_service(event_file).await?.render(&metadata.id, now).await?
    } else {
        let config = metadata.to_config(ctx.site_offset, ctx.settings.module_enabled_default)?;
        let snapshot = CapacitySnapshot::new(booked.unwrap_or(0), waitlisted.unwrap_or(0));
        let colleagues = normalize_colleagues(&metadata.colleagues, &ctx.roster().await?);
        SignupView::resolve(config, snapshot, now).with_title(metadata.title).with_colleagues(colleagues)
    };

    println!("{}", render_view(&view, ctx.lang));
    Ok(())
}

async fn register(
    ctx: &CommandContext,
    event_file: &Path,
    request: RegistrationRequest,
    now: Option<&str>
) -> Result<(), SignupError> {
    let now = ctx.now(now)?;
    let metadata = load_event_file(event_file).await?;
    let event_id = metadata.id.clone();
    let config = metadata.to_config(ctx.site_offset, ctx.settings.module_enabled_default)?;

    let service = ctx.signup_service(event_file).await?;
    let outcome = match service.submit(&event_id, request, now).await {
        Ok(outcome) => outcome,
        Err(SignupError::RegistrationClosed(decision)) => {
            let notice = render_notice(&decision, &config, ctx.lang);
            return Err(SignupError::Generic(t_params!("cli_registration_rejected", &[&notice], ctx.lang)));
        }
        Err(e) => return Err(e)
    };

    let id = outcome.registration.id.as_str();
    match outcome.registration.status {
        RegistrationStatus::Confirmed => println!("{}", t_params!("cli_registration_confirmed", &[id], ctx.lang)),
        RegistrationStatus::Waitlist => println!("{}", t_params!("cli_registration_waitlisted", &[id], ctx.lang))
    }
    println!("{}", render_view(&outcome.view, ctx.lang));
    Ok(())
}

async fn status(ctx: &CommandContext, event_file: &Path, now: Option<&str>) -> Result<(), SignupError> {
    let now = ctx.now(now)?;
    let metadata = load_event_file(event_file).await?;
    let event_id = metadata.id.clone();

    let view = ctx.signup_service(event_file).await?.render(&event_id, now).await?;
    let registrations = ctx.capacity_store()?.list_registrations(&event_id).await?;

    println!("{}", render_view(&view, ctx.lang));
    println!("{}", render_registrations(&registrations, ctx.lang));
    Ok(())
}

fn lang(ctx: &CommandContext, command: LangCommands) -> Result<(), SignupError> {
    match command {
        LangCommands::Set { language } => {
            let selected = parse_language(&language, ctx.lang)?;
            config::set_language(selected)?;
            println!("{}", t_params!("cli_language_set", &[selected.code()], selected));
        }
        LangCommands::Current => {
            println!("{}", t_params!("cli_current_language", &[ctx.settings.language().code()], ctx.lang));
        }
        LangCommands::List => {
            println!("{}", t_params!("cli_available_languages", &[&available_languages()], ctx.lang));
        }
    }
    Ok(())
}

fn available_languages() -> String {
    Language::ALL.iter().map(Language::code).collect::<Vec<_>>().join(", ")
}

/// Language for a code given on the command line
pub fn parse_language(code: &str, lang: Language) -> Result<Language, SignupError> {
    Language::from_code(code).ok_or_else(|| {
        let available = available_languages();
        SignupError::Configuration(t_params!("error_unsupported_language", &[code, available.as_str()], lang))
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn context() -> CommandContext {
        CommandContext::new(Settings { utc_offset: "+02:00".to_string(), ..Default::default() }, Language::English)
            .unwrap()
    }

    #[test]
    fn test_now_accepts_rfc3339_and_site_local_times() {
        let ctx = context();
        let expected = DateTime::parse_from_rfc3339("2025-06-10T07:30:00Z").unwrap().with_timezone(&Utc);

        assert_eq!(ctx.now(Some("2025-06-10T09:30:00+02:00")).unwrap(), expected);
        assert_eq!(ctx.now(Some("2025-06-10 09:30")).unwrap(), expected);
        assert!(matches!(ctx.now(Some("tomorrow")), Err(SignupError::Configuration(message))
            if message == "Invalid --now value 'tomorrow', expected RFC 3339"));
    }

    #[tokio::test]
    async fn test_event_file_and_roster_reach_the_view() {
        let temp_dir = TempDir::new().unwrap();
        let roster_file = temp_dir.path().join("roster.yaml");
        std::fs::write(&roster_file, "- name: Grace Hopper\n  role: Host\n").unwrap();
        let event_file = temp_dir.path().join("2025-06-meetup.yaml");
        std::fs::write(
            &event_file,
            "id: rust-meetup\ntitle: Rust meetup\ncapacity: 2\ncolleagues:\n  - index: 0\n  - name: Ada Lovelace\n"
        )
        .unwrap();

        let settings = Settings {
            data_dir: Some(temp_dir.path().join("data")),
            roster_file: Some(roster_file),
            ..Default::default()
        };
        let ctx = CommandContext::new(settings, Language::English).unwrap();
        let now = ctx.now(Some("2025-06-01T12:00:00Z")).unwrap();

        let service = ctx.signup_service(&event_file).await.unwrap();
        let view = service.render("rust-meetup", now).await.unwrap();
        assert_eq!(view.title.as_deref(), Some("Rust meetup"));
        let names: Vec<_> = view.colleagues.iter().map(|colleague| colleague.name.as_str()).collect();
        assert_eq!(names, ["Grace Hopper", "Ada Lovelace"]);

        let request = RegistrationRequest::new("Ada", "ada@example.org");
        let outcome = service.submit("rust-meetup", request, now).await.unwrap();
        assert_eq!(outcome.registration.status, RegistrationStatus::Confirmed);
        assert_eq!(ctx.capacity_store().unwrap().list_registrations("rust-meetup").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_roster_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings { roster_file: Some(temp_dir.path().join("roster.yaml")), ..Default::default() };
        let ctx = CommandContext::new(settings, Language::English).unwrap();

        assert!(matches!(ctx.roster().await, Err(SignupError::NotFound(_))));
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("ES", Language::English).unwrap(), Language::Spanish);
        assert!(matches!(
            parse_language("fr", Language::English),
            Err(SignupError::Configuration(message)) if message == "Unsupported language 'fr'. Available: en, es"
        ));
    }
}
