use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for signup-flow
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupConfig {
    /// Subscription form behaviour and copy
    pub form: FormConfig,
    /// Page enhancement settings
    pub page: PageConfig,
    /// Analytics settings
    pub analytics: AnalyticsConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormConfig {
    /// Label shown on the submit button while a call is pending
    pub busy_label: String,
    pub missing_fields_message: String,
    pub invalid_email_message: String,
    /// Generic message for endpoint failures; never includes error detail
    pub failure_message: String,
    /// Success copy, `{name}` is replaced with the subscriber's name
    pub success_template: String,
    /// Delay of the simulated endpoint
    pub submit_delay_ms: u64,
    /// How long a flash message stays visible
    pub message_display_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            busy_label: "Subscribing...".to_string(),
            missing_fields_message: "Please fill in all required fields.".to_string(),
            invalid_email_message: "Please enter a valid email address.".to_string(),
            failure_message: "Oops! Something went wrong. Please try again later.".to_string(),
            success_template: "Thanks for subscribing, {name}! Check your inbox to confirm."
                .to_string(),
            submit_delay_ms: 1000,
            message_display_ms: 5000,
        }
    }
}

impl FormConfig {
    pub fn success_message(&self, name: &str) -> String {
        self.success_template.replace("{name}", name)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn message_display(&self) -> Duration {
        Duration::from_millis(self.message_display_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PageConfig {
    /// Height of the fixed bottom navigation, subtracted from scroll targets
    pub nav_height_px: f64,
    /// Page assumed when the path has no final segment
    pub default_page: String,
    /// Delay before the page-load announcement
    pub announce_delay_ms: u64,
    /// Default wait for debounced scroll/resize handlers
    pub debounce_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav_height_px: 80.0,
            default_page: "index.html".to_string(),
            announce_delay_ms: 100,
            debounce_ms: 250,
        }
    }
}

impl PageConfig {
    pub fn announce_delay(&self) -> Duration {
        Duration::from_millis(self.announce_delay_ms)
    }

    pub fn debounce_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Emit signup events after successful attempts
    pub enabled: bool,
    /// `method` parameter attached to signup events
    pub method: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            method: "landing_page_form".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: true,
        }
    }
}

impl SignupConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (signup-flow.toml, .signup-flow-rc)
    /// 3. Environment variables (prefixed with SIGNUP_FLOW_, nested keys split by `__`)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&SignupConfig::default())?);

        if Path::new("signup-flow.toml").exists() {
            builder = builder.add_source(File::with_name("signup-flow"));
        }

        if Path::new(".signup-flow-rc").exists() {
            builder = builder.add_source(
                File::with_name(".signup-flow-rc").format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("SIGNUP_FLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit file on top of the defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&SignupConfig::default())?)
            .add_source(File::from(path.as_ref()).format(config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<SignupConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        if let Err(e) = SignupConfig::load_env_file() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
        SignupConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static SignupConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
