//! Generation orchestration.
//!
//! [`SummaryOrchestrator`] turns chart text plus a sidebar selection into a
//! structured summary: input checks, model resolution, the token-threshold
//! switch, the provider call, post-processing and usage recording.
//! [`GenerationHandle`] runs one orchestration in the background and
//! publishes elapsed-time ticks while it is outstanding.

pub mod config;
pub mod error;
pub mod handle;
pub mod orchestrator;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use handle::{GenerationHandle, GenerationStatus};
pub use orchestrator::{GenerationOutcome, GenerationRequest, SummaryOrchestrator};
pub use store::{EffectivePrompt, GenerationStore, PgGenerationStore};
