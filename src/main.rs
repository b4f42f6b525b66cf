use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use openword_client::session::{language_code, Membership, SessionController, SessionEvent};
use openword_client::transport::{websocket_url, SocketTransport, TransportEvent};
use openword_client::view::{self, TranscriptLog};
use openword_client::{Config, ControlClient, FilePreferences, Language, TenantClient, TenantInfo};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "openword", about = "OpenWord - real-time translation broadcast client")]
struct Cli {
    /// Configuration file name, without extension
    #[arg(long, default_value = "config/openword")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Join a live translation broadcast as a participant
    Listen {
        /// Organisation key identifying the tenant
        #[arg(long)]
        organisation: Option<String>,

        /// Service identifier; defaults to the tenant's default service
        #[arg(long)]
        service_id: Option<String>,

        /// Select this locale (e.g. es-ES) as soon as the service is ready
        #[arg(long)]
        language: Option<String>,

        /// Show the source-language transcript under each translation
        #[arg(long)]
        include_source: bool,
    },

    /// Print a tenant's languages and welcome configuration
    Info {
        /// Organisation key identifying the tenant
        #[arg(long)]
        organisation: String,
    },

    /// Start a translation service (operator, requires an auth token)
    Start {
        /// Service to start; defaults to the profile's default service
        #[arg(long)]
        service_id: Option<String>,

        /// Bearer token; falls back to auth.token in the configuration
        #[arg(long)]
        token: Option<String>,
    },

    /// Stop a running translation service (operator, requires an auth token)
    Stop {
        /// Service to stop; defaults to the profile's default service
        #[arg(long)]
        service_id: Option<String>,

        /// Bearer token; falls back to auth.token in the configuration
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Listen {
            organisation,
            service_id,
            language,
            include_source,
        } => listen(cfg, organisation, service_id, language, include_source).await,
        Command::Info { organisation } => print_info(cfg, &organisation).await,
        Command::Start { service_id, token } => start_service(cfg, service_id, token).await,
        Command::Stop { service_id, token } => stop_service(cfg, service_id, token).await,
    }
}

/// The participant viewer: fetch tenant config, connect, wait for the
/// service to be ready, join a language, render the stream.
async fn listen(
    cfg: Config,
    organisation: Option<String>,
    service_id: Option<String>,
    preselect: Option<String>,
    include_source: bool,
) -> Result<()> {
    let tenant_client = TenantClient::new(&cfg.server.url);
    let tenant = match tenant_client.fetch_info(organisation.as_deref()).await {
        Ok(tenant) => tenant,
        Err(e) => {
            // Fetch failures degrade to the static guidance screen; the
            // participant has to fix the URL parameters.
            warn!("Error getting organisation info: {}", e);
            TenantInfo::configuration_required()
        }
    };

    view::print_welcome(&tenant);

    if tenant.default_service_id.is_empty() && service_id.is_none() {
        view::print_waiting(&tenant);
        return Ok(());
    }

    let prefs_path = cfg
        .preferences
        .path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(FilePreferences::default_path);
    let prefs = Arc::new(FilePreferences::open(prefs_path)?);

    let url = websocket_url(&cfg.server.url, &cfg.transport.namespace);
    let (transport, mut events) = SocketTransport::connect(
        url,
        Duration::from_secs(cfg.transport.reconnect_delay_secs),
    );
    let transport = Arc::new(transport);

    let mut controller = SessionController::new(service_id, transport, prefs);
    controller
        .handle(SessionEvent::ConfigLoaded {
            default_service_id: tenant.default_service_id.clone(),
        })
        .await?;

    let mut log = TranscriptLog::new(include_source);
    let mut preselect = preselect;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let was_ready = controller.state().can_join();

                controller.on_transport_event(event.clone()).await?;

                match event {
                    TransportEvent::Transcript(text) => log.on_transcript(&text),
                    TransportEvent::Translation(text) => {
                        let entry = log.on_translation(&text);
                        view::print_entry(&entry, joined_code(&controller).unwrap_or_default().as_str());
                    }
                    TransportEvent::Status { active, livestream } => {
                        if let Some(state) = livestream {
                            info!("Livestream is {}", state);
                        }
                        if !active && was_ready {
                            view::print_waiting(&tenant);
                        }
                    }
                    _ => {}
                }

                // Offer the language selection the moment joining becomes
                // possible; never before.
                if controller.state().can_join() && !controller.state().is_joined() {
                    if let Some(locale) = preselect.take() {
                        let label = label_for(&tenant, &locale);
                        controller.select_language(&locale, &label).await?;
                        println!("Joined {} translation. Type 'stop' to leave, 'quit' to exit.", label);
                    } else if !was_ready {
                        view::print_language_menu(&tenant.languages);
                    }
                } else if controller.state().can_join() && !was_ready {
                    info!("Service is ready again");
                }
            }

            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let input = line.trim();
                match input {
                    "" => {}
                    "quit" | "q" | "exit" => break,
                    "stop" | "s" => {
                        controller.stop().await?;
                        log.clear();
                        println!("Stopped.");
                        if controller.state().can_join() {
                            view::print_language_menu(&tenant.languages);
                        }
                    }
                    "source" => {
                        let on = log.toggle_source();
                        println!("Source text {}", if on { "on" } else { "off" });
                    }
                    _ if !controller.state().is_joined() => {
                        if !controller.state().can_join() {
                            view::print_waiting(&tenant);
                        } else if let Some(language) = parse_selection(&tenant, input) {
                            let (locale, label) = (language.value.clone(), language.label.clone());
                            controller.select_language(&locale, &label).await?;
                            println!("Joined {} translation. Type 'stop' to leave, 'quit' to exit.", label);
                        } else {
                            println!("Unknown language: {}", input);
                        }
                    }
                    _ => println!("Currently translating. Type 'stop' to leave or 'quit' to exit."),
                }
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Guaranteed cleanup: leave all rooms, close the transport
    controller.teardown().await?;
    Ok(())
}

/// Language code of the current membership, for display direction
fn joined_code(controller: &SessionController) -> Option<String> {
    match &controller.state().membership {
        Membership::Joined { language, .. } => Some(language.clone()),
        Membership::NotJoined => None,
    }
}

/// Match user input against the tenant languages: a menu number, a locale,
/// or a bare language code
fn parse_selection<'a>(tenant: &'a TenantInfo, input: &str) -> Option<&'a Language> {
    if let Ok(index) = input.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| tenant.languages.get(i));
    }
    tenant
        .languages
        .iter()
        .find(|l| l.value.eq_ignore_ascii_case(input) || l.code() == language_code(input))
}

fn label_for(tenant: &TenantInfo, locale: &str) -> String {
    tenant
        .languages
        .iter()
        .find(|l| l.value.eq_ignore_ascii_case(locale) || l.code() == language_code(locale))
        .map(|l| l.label.clone())
        .unwrap_or_else(|| locale.to_string())
}

async fn print_info(cfg: Config, organisation: &str) -> Result<()> {
    let client = TenantClient::new(&cfg.server.url);
    let tenant = client.fetch_info(Some(organisation)).await?;

    println!("Organisation: {}", tenant.name);
    println!("Default service: {}", tenant.default_service_id);
    match &tenant.logo {
        Some(logo) => println!("Logo: {} bytes", logo.len()),
        None => println!("Logo: none"),
    }
    println!("Languages:");
    for language in &tenant.languages {
        println!("  {} ({})", language.label, language.value);
    }
    view::print_welcome(&tenant);

    Ok(())
}

async fn start_service(cfg: Config, service_id: Option<String>, token: Option<String>) -> Result<()> {
    let token = token
        .or(cfg.auth.token)
        .context("An auth token is required (--token or auth.token in the configuration)")?;
    let client = ControlClient::new(&cfg.server.url, &token);

    // The profile supplies the default service and the language list
    let profile = client.fetch_profile().await?;
    let service_id = service_id.unwrap_or_else(|| profile.default_service_id.clone());

    client
        .start_service(&service_id, &profile.translation_languages)
        .await?;

    println!("Service {} started.", service_id);
    println!(
        "Participants can join with: openword listen --organisation {} --service-id {}",
        profile.organisation_key, service_id
    );
    Ok(())
}

async fn stop_service(cfg: Config, service_id: Option<String>, token: Option<String>) -> Result<()> {
    let token = token
        .or(cfg.auth.token)
        .context("An auth token is required (--token or auth.token in the configuration)")?;
    let client = ControlClient::new(&cfg.server.url, &token);

    let service_id = match service_id {
        Some(id) => id,
        None => client.fetch_profile().await?.default_service_id,
    };

    client.stop_service(&service_id).await?;

    println!("Service {} stopped.", service_id);
    Ok(())
}
