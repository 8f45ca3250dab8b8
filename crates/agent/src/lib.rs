//! Assistant orchestration with a human-in-the-loop approval gate
//!
//! The [`Assistant`] forwards conversation history to a completion backend,
//! inspects the tool call the model asks for (if any), and either executes it
//! immediately or holds it for human approval based on the [`ApprovalGate`]
//! policy.

pub mod assistant;
pub mod gate;

pub use assistant::{Assistant, AssistantReply};
pub use gate::ApprovalGate;
