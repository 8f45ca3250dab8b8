//! Approval gate policy

use hitl_common::{GateMode, RiskLevel};

/// Decides which tool calls need a human before execution
#[derive(Debug, Clone, Copy)]
pub struct ApprovalGate {
    mode: GateMode,
}

impl ApprovalGate {
    pub fn new(mode: GateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    /// Whether a tool of the given risk level requires approval
    pub fn requires_approval(&self, risk_level: RiskLevel) -> bool {
        match (self.mode, risk_level) {
            (GateMode::Blocking, _) => true,
            (GateMode::Auto, _) => false,
            (GateMode::RiskBased, RiskLevel::High | RiskLevel::Critical) => true,
            (GateMode::RiskBased, _) => false,
        }
    }
}

impl Default for ApprovalGate {
    fn default() -> Self {
        Self::new(GateMode::default())
    }
}
