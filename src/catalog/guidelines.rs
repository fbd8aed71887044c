use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CategoryId;

/// How to prepare an item of a category before it goes in the bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecyclingGuideline {
    pub material_type: &'static str,
    pub preparation: &'static [&'static str],
    pub bin_color: &'static str,
    pub notes: &'static str,
}

impl RecyclingGuideline {
    pub fn for_category(id: CategoryId) -> &'static RecyclingGuideline {
        &GUIDELINES[id as usize]
    }
}

static GUIDELINES: [RecyclingGuideline; 6] = [
    RecyclingGuideline {
        material_type: "PET #1 Plastic",
        preparation: &[
            "Rinse thoroughly to remove residue",
            "Remove caps and labels if possible",
            "Crush to save space",
        ],
        bin_color: "Blue",
        notes: "Most curbside programs accept #1 and #2 plastics",
    },
    RecyclingGuideline {
        material_type: "Corrugated Cardboard",
        preparation: &["Flatten boxes", "Remove tape and labels", "Keep dry"],
        bin_color: "Blue",
        notes: "Pizza boxes with grease are not recyclable",
    },
    RecyclingGuideline {
        material_type: "Clear/Colored Glass",
        preparation: &["Rinse clean", "Remove metal caps", "Do not break glass"],
        bin_color: "Green",
        notes: "Broken glass may not be accepted - check local rules",
    },
    RecyclingGuideline {
        material_type: "Aluminum/Steel",
        preparation: &["Rinse can", "Crush if possible", "Remove paper labels"],
        bin_color: "Blue",
        notes: "Metal has high recycling value",
    },
    RecyclingGuideline {
        material_type: "Mixed Paper",
        preparation: &[
            "Keep dry",
            "Remove plastic windows from envelopes",
            "Flatten boxes",
        ],
        bin_color: "Blue",
        notes: "Wet or greasy paper cannot be recycled",
    },
    RecyclingGuideline {
        material_type: "Organic Waste",
        preparation: &[
            "Place in compost bin if available",
            "Otherwise dispose in regular trash",
        ],
        bin_color: "Green (compost) or Gray (trash)",
        notes: "Check if your area has composting programs",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRules {
    pub accepts_glass: bool,
    pub accepts_plastic_types: Vec<u8>,
    pub composting_available: bool,
    pub special_notes: String,
}

static LOCATION_RULES: LazyLock<IndexMap<&'static str, LocationRules>> = LazyLock::new(|| {
    let mut rules = IndexMap::new();
    rules.insert(
        "Portland, OR",
        LocationRules {
            accepts_glass: true,
            accepts_plastic_types: vec![1, 2, 5],
            composting_available: true,
            special_notes: "Portland has comprehensive recycling programs".to_string(),
        },
    );
    rules.insert(
        "New York, NY",
        LocationRules {
            accepts_glass: true,
            accepts_plastic_types: vec![1, 2],
            composting_available: false,
            special_notes: "No plastic bags in blue bins".to_string(),
        },
    );
    rules.insert(
        "San Francisco, CA",
        LocationRules {
            accepts_glass: true,
            accepts_plastic_types: vec![1, 2, 4, 5],
            composting_available: true,
            special_notes: "Mandatory composting program".to_string(),
        },
    );
    rules
});

impl LocationRules {
    /// Finds the rule set for a location label. "Portland, OR 97201" matches the
    /// "Portland, OR" entry.
    pub fn lookup(location: &str) -> Option<(&'static str, &'static LocationRules)> {
        let location = location.trim();
        LOCATION_RULES
            .iter()
            .find(|(key, _)| location.starts_with(**key))
            .map(|(key, rules)| (*key, rules))
    }

    pub fn known_locations() -> impl Iterator<Item = &'static str> {
        LOCATION_RULES.keys().copied()
    }
}
