// Subscription Module - newsletter signup workflow
//
// Validation, the guarded submit affordance, the remote call and the flash
// messages for one attempt, with every collaborator injected for testing.

pub mod collaborators;
pub mod endpoint;
pub mod errors;
pub mod guard;
pub mod messages;
pub mod state_machine;
pub mod traits;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
pub mod mocks;


pub use collaborators::{
    ConsoleMessageSink, InMemoryForm, MessageBoard, SubmitButton, TracingAnalytics,
    TracingDiagnostics,
};
pub use endpoint::SimulatedEndpoint;
pub use errors::{RemoteError, SubmissionError};
pub use guard::SubmitGuard;
pub use messages::FlashMessenger;
pub use state_machine::{AttemptEvent, AttemptLifecycle};
pub use traits::{
    AnalyticsSink, DiagnosticsSink, FormDataSource, MessageSink, SubmitAffordance,
    SubscriptionEndpoint,
};
pub use types::{AttemptStatus, FlashMessage, MessageKind, Outcome, RawSubmission, SignupEvent};
pub use validation::is_valid_email;
pub use workflow::{Collaborators, SubscriptionWorkflow};
