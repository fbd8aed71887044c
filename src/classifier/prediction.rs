use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{CategoryId, WasteCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGuess {
    pub category: CategoryId,
    pub confidence: f64,
}

/// Outcome of one simulated classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub id: Uuid,
    pub category: CategoryId,
    /// Best guess first. The first entry always carries the category's fixed confidence.
    pub top_guesses: Vec<RankedGuess>,
    pub classified_at: DateTime<Utc>,
}

impl Prediction {
    pub fn details(&self) -> &'static WasteCategory {
        self.category.details()
    }

    pub fn confidence(&self) -> f64 {
        self.details().confidence
    }
}
