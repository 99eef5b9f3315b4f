use serde::{Deserialize, Serialize};

/// Counters reported alongside a plan: listed, filtered, selected, transferred.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total: u64,
    pub ads: u64,
    pub clean: u64,
    /// Selection size as supplied, ads included; 0 when the default applied.
    pub selected: u64,
    pub to_transfer: u64,
}

impl PlanStats {
    pub fn ratio(&self) -> f32 {
        if self.clean == 0 {
            return 0.0;
        }
        self.to_transfer as f32 / self.clean as f32
    }
}
