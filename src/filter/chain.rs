/// Ordered filter chains
///
/// A chain is the unit of work the pipeline executor runs: stages are
/// applied in order, the output of each feeding the next. Chains
/// serialize to JSON with their stages, so a preset can be stored or
/// compared as data.
use serde::{Deserialize, Serialize};

use super::stage::FilterStage;

/// An ordered sequence of filter stages.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Create a chain from an explicit stage list.
    pub fn new(stages: Vec<FilterStage>) -> Self {
        Self { stages }
    }

    /// The fixed "antique" look: full sepia, then one stop brighter.
    pub fn antique() -> Self {
        Self::new(vec![FilterStage::sepia(1.0), FilterStage::exposure(1.0)])
    }

    /// The stages in application order.
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Convert to JSON for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from stored JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::stage::{EXPOSURE_ADJUST, SEPIA_TONE};

    #[test]
    fn test_antique_chain_shape() {
        let chain = FilterChain::antique();

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.stages()[0].name, SEPIA_TONE);
        assert_eq!(chain.stages()[0].param_or("intensity", 0.0), 1.0);
        assert_eq!(chain.stages()[1].name, EXPOSURE_ADJUST);
        assert_eq!(chain.stages()[1].param_or("ev", 0.0), 1.0);
    }

    #[test]
    fn test_serialization_round_trip() {
        let chain = FilterChain::new(vec![
            FilterStage::sepia(0.8),
            FilterStage::exposure(-0.5),
        ]);

        let json = chain.to_json().unwrap();
        let restored = FilterChain::from_json(&json).unwrap();

        assert_eq!(chain, restored);
    }

    #[test]
    fn test_stage_order_is_preserved() {
        let chain = FilterChain::new(vec![
            FilterStage::exposure(1.0),
            FilterStage::sepia(1.0),
        ]);

        assert_eq!(chain.stages()[0].name, EXPOSURE_ADJUST);
        assert_eq!(chain.stages()[1].name, SEPIA_TONE);
    }
}
