use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use signup_flow::config::{config, SignupConfig};
use signup_flow::page::{mark_active, NavLink};
use signup_flow::subscription::{
    Collaborators, ConsoleMessageSink, InMemoryForm, RawSubmission, RemoteError,
    SimulatedEndpoint, SubmitButton, SubscriptionWorkflow, TracingAnalytics, TracingDiagnostics,
};
use signup_flow::telemetry::{init_telemetry, shutdown_telemetry};

#[derive(Parser)]
#[command(name = "signup-flow")]
#[command(about = "Newsletter signup workflow with progressive page enhancements")]
#[command(long_about = "Runs the newsletter signup workflow against a simulated endpoint \
                       and exposes the page enhancement helpers for quick checks.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one subscription attempt against the simulated endpoint
    Submit {
        /// Subscriber name
        #[arg(long, default_value = "")]
        name: String,
        /// Subscriber email
        #[arg(long, default_value = "")]
        email: String,
        /// Tick the consent checkbox
        #[arg(long)]
        consent: bool,
        /// Make the simulated endpoint reject the call
        #[arg(long, help = "Simulate a transport failure from the endpoint")]
        fail: bool,
        /// Override the simulated network delay
        #[arg(long, help = "Simulated endpoint delay in milliseconds")]
        delay_ms: Option<u64>,
    },
    /// Show which navigation links are active for a path
    Nav {
        /// Current location pathname, e.g. /about.html
        #[arg(long)]
        path: String,
        /// Link hrefs in navigation order
        hrefs: Vec<String>,
    },
    /// Print the effective configuration
    Config {
        /// Write the configuration to this file instead of printing it
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet when the global config loads, so report a bad
    // .env file once the subscriber exists
    let env_file = SignupConfig::load_env_file();
    let config = config()?;
    init_telemetry(&config.observability)?;
    if let Err(e) = env_file {
        warn!(error = %e, "Ignoring unreadable .env file");
    }

    let result = match cli.command {
        Commands::Submit {
            name,
            email,
            consent,
            fail,
            delay_ms,
        } => tokio::runtime::Runtime::new()?.block_on(async {
            submit_command(config, RawSubmission::new(&name, &email, consent), fail, delay_ms).await
        }),
        Commands::Nav { path, hrefs } => nav_command(config, &path, &hrefs),
        Commands::Config { save } => config_command(config, save),
    };

    shutdown_telemetry();
    result
}

async fn submit_command(
    config: &SignupConfig,
    raw: RawSubmission,
    fail: bool,
    delay_ms: Option<u64>,
) -> Result<()> {
    let delay = delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.form.submit_delay());
    let endpoint = if fail {
        SimulatedEndpoint::failing(
            delay,
            RemoteError::Transport("simulated network failure".to_string()),
        )
    } else {
        SimulatedEndpoint::new(delay)
    };

    let workflow = SubscriptionWorkflow::new(
        Collaborators {
            form: Arc::new(InMemoryForm::new(raw)),
            endpoint: Arc::new(endpoint),
            affordance: Arc::new(SubmitButton::new("Subscribe")),
            messages: Arc::new(ConsoleMessageSink),
            diagnostics: Arc::new(TracingDiagnostics),
            analytics: Some(Arc::new(TracingAnalytics)),
        },
        config,
    );

    let outcome = workflow.submit_form().await;
    workflow.metrics().log_stats();

    match outcome.error() {
        None => Ok(()),
        Some(error) => anyhow::bail!("subscription failed ({})", error.code()),
    }
}

fn nav_command(config: &SignupConfig, path: &str, hrefs: &[String]) -> Result<()> {
    let mut links: Vec<NavLink> = hrefs.iter().map(|h| NavLink::new(h)).collect();
    let marked = mark_active(&mut links, path, &config.page.default_page);

    for link in &links {
        let marker = if link.active { "●" } else { "○" };
        let aria = link
            .aria_current
            .map(|value| format!(" aria-current=\"{value}\""))
            .unwrap_or_default();
        println!("{marker} {}{aria}", link.href);
    }
    if marked == 0 {
        println!("No navigation link matches {path}");
    }
    Ok(())
}

fn config_command(config: &SignupConfig, save: Option<PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            config.save_to_file(&path)?;
            println!("✅ Configuration written to {}", path.display());
        }
        None => print!("{}", toml::to_string_pretty(config)?),
    }
    Ok(())
}
