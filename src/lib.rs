// signup-flow library - newsletter signup workflow and page enhancements
// This exposes the core components for hosts, the CLI and integration tests

pub mod config;
pub mod observability;
pub mod page;
pub mod subscription;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, SignupConfig};
pub use observability::{OperationTimer, SubmissionMetrics, SubmissionStats};
pub use subscription::{
    Collaborators, MessageKind, Outcome, RawSubmission, SubmissionError, SubscriptionWorkflow,
};
pub use telemetry::{generate_correlation_id, init_telemetry, shutdown_telemetry};
