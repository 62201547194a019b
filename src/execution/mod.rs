//! Card execution: contexts, targets and the execution queue.
//!
//! ## Key Types
//!
//! - `ExecutionContext`: state of one execution attempt of one card
//! - `ExecEnv`: the game state, narration sink and RNG lent to a run
//! - `ExecutionQueue`: ordered played cards, driven one at a time
//! - `Target`: a player, threat or card instance

pub mod context;
pub mod queue;
pub mod target;

pub use context::{ContextStatus, ExecEnv, ExecutionContext, PipelineOutcome};
pub use queue::{ExecutionQueue, PauseKind, QueueError, QueueState, QueueStep, ResumeCallback};
pub use target::{Target, TargetList};
