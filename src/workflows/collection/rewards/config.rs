use serde::{Deserialize, Serialize};

use super::domain::WasteCategory;

/// Points awarded per collection: a fixed base scaled by a per-category
/// multiplier, independent of weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub base_points: u32,
    pub dry_multiplier: f64,
    pub wet_multiplier: f64,
    pub e_waste_multiplier: f64,
    pub hazardous_multiplier: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base_points: 10,
            dry_multiplier: 1.0,
            wet_multiplier: 1.2,
            e_waste_multiplier: 2.0,
            hazardous_multiplier: 3.0,
        }
    }
}

impl RewardConfig {
    pub fn multiplier(&self, category: WasteCategory) -> f64 {
        match category {
            WasteCategory::Dry => self.dry_multiplier,
            WasteCategory::Wet => self.wet_multiplier,
            WasteCategory::EWaste => self.e_waste_multiplier,
            WasteCategory::Hazardous => self.hazardous_multiplier,
        }
    }

    /// Points for a raw waste-type tag. A blank tag earns nothing.
    pub fn points_for(&self, waste_type: &str) -> u32 {
        if waste_type.trim().is_empty() {
            return 0;
        }
        let category = WasteCategory::from_waste_type(waste_type);
        (self.base_points as f64 * self.multiplier(category)).round() as u32
    }
}
