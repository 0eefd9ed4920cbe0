use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use inquiry_form::compose::{RecordingOpener, StdoutOpener, booking_request};
use inquiry_form::{
    ConfigError, ContactLink, Dispatcher, DraftStore, FormConfig, FormController, FormEvent, JsonFileStore,
    MemoryStore, StoreError,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inquiry-form", about = "Validate, compose and replay website inquiry forms")]
struct Cli {
    /// Form definition in YAML. Defaults to the built-in form named by --form.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Built-in form: contact or booking.
    #[arg(long, global = true, default_value = "contact")]
    form: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a YAML map of field values and print every error.
    Validate { values: PathBuf },
    /// Print the mailto link a valid submission would open.
    Compose { values: PathBuf },
    /// Feed a YAML list of form events through the dispatcher, printing effects as JSON.
    Replay {
        events: PathBuf,
        /// Persist drafts in this JSON file instead of memory.
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Print a direct contact link.
    Link {
        #[command(subcommand)]
        target: LinkTarget,
    },
}

#[derive(Subcommand, Debug)]
enum LinkTarget {
    /// wa.me chat link with a prefilled message.
    Whatsapp {
        phone: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// tel: link.
    Phone { number: String },
    /// Booking request mail for a hotel, addressed with the form's compose template.
    Booking { hotel: String, location: String },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode effect: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = match &cli.config {
        Some(path) => FormConfig::from_path(path)?,
        None => FormConfig::builtin(&cli.form)?,
    };
    info!(form = %config.id, "loaded form");

    match cli.command {
        Command::Validate { values } => check_values(config, &values, false),
        Command::Compose { values } => check_values(config, &values, true),
        Command::Replay { events, store } => {
            let events: Vec<FormEvent> = read_yaml(&events)?;
            match store {
                Some(path) => replay(config, JsonFileStore::open(path)?, &events),
                None => replay(config, MemoryStore::new(), &events),
            }
        }
        Command::Link { target } => {
            writeln!(io::stdout().lock(), "{}", link_for(&config, target).uri())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn link_for(config: &FormConfig, target: LinkTarget) -> ContactLink {
    match target {
        LinkTarget::Whatsapp { phone, text } => ContactLink::WhatsApp { phone, text },
        LinkTarget::Phone { number } => ContactLink::Phone(number),
        LinkTarget::Booking { hotel, location } => {
            ContactLink::Mail(booking_request(&config.compose, &hotel, &location))
        }
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_values(config: FormConfig, path: &Path, compose: bool) -> Result<ExitCode, CliError> {
    let values: IndexMap<String, String> = read_yaml(path)?;
    let mut form = FormController::new(config, MemoryStore::new(), RecordingOpener::new());
    for (field, value) in values {
        form.on_field_change(&field, value);
    }

    let result = form.validate_form();
    let mut out = io::stdout().lock();
    if !result.valid {
        for error in result.errors() {
            writeln!(out, "{error}")?;
        }
        return Ok(ExitCode::FAILURE);
    }

    if compose {
        let message = form.config().compose.render(form.values());
        writeln!(out, "{}", message.mailto_uri())?;
    } else {
        writeln!(out, "ok")?;
    }
    Ok(ExitCode::SUCCESS)
}

fn replay<S: DraftStore>(
    config: FormConfig,
    store: S,
    events: &[FormEvent],
) -> Result<ExitCode, CliError> {
    let mut form = FormController::new(config, store, StdoutOpener::new(io::stdout()));
    let dispatcher = Dispatcher::standard();

    for event in events {
        for effect in dispatcher.dispatch(&mut form, event) {
            let line = serde_json::to_string(&effect)?;
            let mut out = io::stdout().lock();
            writeln!(out, "{line}")?;
        }
    }
    info!(state = ?form.state(), "replay finished");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("cli args")
    }

    fn link_target(cli: Cli) -> LinkTarget {
        match cli.command {
            Command::Link { target } => target,
            other => panic!("expected link command, got {other:?}"),
        }
    }

    #[test]
    fn link_phone_prints_tel_uri() {
        let config = FormConfig::contact();
        let target = link_target(parse(&["inquiry-form", "link", "phone", "+919876543210"]));
        assert_eq!(link_for(&config, target).uri(), "tel:+919876543210");
    }

    #[test]
    fn link_whatsapp_encodes_text() {
        let config = FormConfig::contact();
        let target = link_target(parse(&[
            "inquiry-form",
            "link",
            "whatsapp",
            "919876543210",
            "--text",
            "Hi there",
        ]));
        assert_eq!(
            link_for(&config, target).uri(),
            "https://wa.me/919876543210?text=Hi%20there"
        );
    }

    #[test]
    fn link_booking_uses_form_recipient() {
        let config = FormConfig::contact();
        let target = link_target(parse(&["inquiry-form", "link", "booking", "Sea View", "Goa"]));
        let uri = link_for(&config, target).uri();
        assert!(uri.starts_with(&format!("mailto:{}?", config.compose.to)), "{uri}");
        assert!(uri.contains("Sea%20View"), "{uri}");
    }
}
