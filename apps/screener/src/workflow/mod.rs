pub mod collaborators;
pub mod orchestrator;
pub mod poller;

pub use collaborators::{DocumentSource, IdempotencyStore, Notifier, ResultSink};
pub use orchestrator::{Collaborators, WorkflowOrchestrator};
pub use poller::run_poller;
