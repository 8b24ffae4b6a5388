//! Service offerings and their delivery counters.

use serde::{Deserialize, Serialize};

/// A service line the operator sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Total instances delivered.
    pub count: u32,
    /// Instances currently in progress; never more than `count`.
    pub active: u32,
}

impl Service {
    /// Delivered instances that are no longer in progress.
    pub fn completed(&self) -> u32 {
        self.count.saturating_sub(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_is_count_minus_active() {
        let s = Service { name: "Prompt Engineering".into(), count: 12, active: 5 };
        assert_eq!(s.completed(), 7);

        let broken = Service { name: "Broken".into(), count: 1, active: 3 };
        assert_eq!(broken.completed(), 0);
    }
}
