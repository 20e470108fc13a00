pub mod orchestrator;
pub mod paginator;

pub use orchestrator::FallbackOrchestrator;
pub use paginator::Paginator;
