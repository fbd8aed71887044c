use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifier of one of the six waste categories the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Plastic = 0,
    Cardboard = 1,
    Glass = 2,
    Metal = 3,
    Paper = 4,
    Organic = 5,
}

impl CategoryId {
    pub const ALL: [CategoryId; 6] = [
        CategoryId::Plastic,
        CategoryId::Cardboard,
        CategoryId::Glass,
        CategoryId::Metal,
        CategoryId::Paper,
        CategoryId::Organic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CategoryId::Plastic => "plastic",
            CategoryId::Cardboard => "cardboard",
            CategoryId::Glass => "glass",
            CategoryId::Metal => "metal",
            CategoryId::Paper => "paper",
            CategoryId::Organic => "organic",
        }
    }

    pub fn details(self) -> &'static WasteCategory {
        &CATEGORIES[self as usize]
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CategoryId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| AppError::UnknownCategory(s.to_string()))
    }
}

/// UI accent a category is drawn with when it is recyclable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteCategory {
    pub id: CategoryId,
    pub name: &'static str,
    pub material: &'static str,
    pub recyclable: bool,
    pub instructions: &'static str,
    pub confidence: f64,
    pub color: AccentColor,
    pub icon: &'static str,
}

// Indexed by `CategoryId as usize`.
static CATEGORIES: [WasteCategory; 6] = [
    WasteCategory {
        id: CategoryId::Plastic,
        name: "Plastic Bottle",
        material: "PET #1 Plastic",
        recyclable: true,
        instructions: "Rinse thoroughly, remove cap, place in blue recycling bin",
        confidence: 0.94,
        color: AccentColor::Blue,
        icon: "♻️",
    },
    WasteCategory {
        id: CategoryId::Cardboard,
        name: "Cardboard Box",
        material: "Corrugated Cardboard",
        recyclable: true,
        instructions: "Flatten box, remove tape/labels, place in blue recycling bin",
        confidence: 0.91,
        color: AccentColor::Blue,
        icon: "📦",
    },
    WasteCategory {
        id: CategoryId::Glass,
        name: "Glass Bottle",
        material: "Clear Glass",
        recyclable: true,
        instructions: "Rinse clean, remove cap, place in glass recycling bin",
        confidence: 0.88,
        color: AccentColor::Green,
        icon: "🍾",
    },
    WasteCategory {
        id: CategoryId::Metal,
        name: "Aluminum Can",
        material: "Aluminum",
        recyclable: true,
        instructions: "Rinse can, crush if possible, place in blue recycling bin",
        confidence: 0.96,
        color: AccentColor::Blue,
        icon: "🥫",
    },
    WasteCategory {
        id: CategoryId::Paper,
        name: "Paper/Magazine",
        material: "Mixed Paper",
        recyclable: true,
        instructions: "Keep dry and clean, place in paper recycling bin",
        confidence: 0.89,
        color: AccentColor::Blue,
        icon: "📄",
    },
    WasteCategory {
        id: CategoryId::Organic,
        name: "Food Waste",
        material: "Organic Material",
        recyclable: false,
        instructions: "Place in green compost bin or regular trash",
        confidence: 0.87,
        color: AccentColor::Green,
        icon: "🍎",
    },
];
