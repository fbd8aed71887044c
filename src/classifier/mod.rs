pub mod prediction;
pub mod simulator;

pub use prediction::{Prediction, RankedGuess};
pub use simulator::{ClassificationRequest, ClassificationSimulator, Selection};
