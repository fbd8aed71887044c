pub mod category;
pub mod guidelines;

pub use category::{AccentColor, CategoryId, WasteCategory};
pub use guidelines::{LocationRules, RecyclingGuideline};
