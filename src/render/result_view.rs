use crate::catalog::{AccentColor, CategoryId, LocationRules, RecyclingGuideline, WasteCategory};
use crate::classifier::Prediction;
use crate::session::SessionState;

pub const EMPTY_MESSAGE: &str = "Upload an image to start classification";
pub const LOADING_MESSAGE: &str = "Analyzing image...";
pub const GUIDELINE_SOURCE_NOTE: &str =
    "Based on Portland Metro recycling rules. Guidelines may vary by location.";

/// Background tones used by the result blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Blue,
    Orange,
}

/// Bin accent color. Gray means nothing has been classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Gray,
    Blue,
    Green,
    Red,
}

impl Accent {
    pub fn for_category(category: Option<&WasteCategory>) -> Self {
        match category {
            None => Accent::Gray,
            Some(category) if !category.recyclable => Accent::Red,
            Some(category) => match category.color {
                AccentColor::Blue => Accent::Blue,
                AccentColor::Green => Accent::Green,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Recyclable,
    NotRecyclable,
}

impl Verdict {
    pub fn banner(self) -> &'static str {
        match self {
            Verdict::Recyclable => "Recyclable ✓",
            Verdict::NotRecyclable => "Not Recyclable ✗",
        }
    }

    pub fn impact_message(self) -> &'static str {
        match self {
            Verdict::Recyclable => {
                "By recycling this item correctly, you help reduce landfill waste and conserve natural resources!"
            }
            Verdict::NotRecyclable => {
                "Proper disposal prevents contamination of recyclable materials."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub category: CategoryId,
    pub title: &'static str,
    pub icon: &'static str,
    pub material: &'static str,
    pub confidence: String,
    pub verdict: Verdict,
    pub card_tone: Tone,
    pub status_tone: Tone,
    pub accent: Accent,
    pub instructions: &'static str,
    pub location_heading: String,
    pub location_note: &'static str,
    pub local_rules: Option<(&'static str, &'static LocationRules)>,
    pub guideline: &'static RecyclingGuideline,
    /// Runner-up guesses as (display name, confidence text).
    pub top_guesses: Vec<(&'static str, String)>,
}

impl ResultCard {
    pub fn new(prediction: &Prediction, location: &str) -> Self {
        let category = prediction.details();
        let verdict = if category.recyclable {
            Verdict::Recyclable
        } else {
            Verdict::NotRecyclable
        };
        let (card_tone, status_tone) = match verdict {
            Verdict::Recyclable => (Tone::Green, Tone::Blue),
            Verdict::NotRecyclable => (Tone::Red, Tone::Orange),
        };

        Self {
            category: category.id,
            title: category.name,
            icon: category.icon,
            material: category.material,
            confidence: format_confidence(category.confidence),
            verdict,
            card_tone,
            status_tone,
            accent: Accent::for_category(Some(category)),
            instructions: category.instructions,
            location_heading: format!("Local Guidelines for {location}"),
            location_note: GUIDELINE_SOURCE_NOTE,
            local_rules: LocationRules::lookup(location),
            guideline: RecyclingGuideline::for_category(category.id),
            top_guesses: prediction
                .top_guesses
                .iter()
                .map(|guess| (guess.category.details().name, format_confidence(guess.confidence)))
                .collect(),
        }
    }

    pub fn impact_message(&self) -> &'static str {
        self.verdict.impact_message()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Empty { message: &'static str },
    Loading { message: &'static str },
    Classified(Box<ResultCard>),
}

/// Maps the session to what the results panel shows. Loading wins over any
/// prediction.
pub fn render(state: &SessionState) -> ResultView {
    if state.is_loading() {
        return ResultView::Loading {
            message: LOADING_MESSAGE,
        };
    }
    match state.prediction() {
        Some(prediction) => {
            ResultView::Classified(Box::new(ResultCard::new(prediction, state.location())))
        }
        None => ResultView::Empty {
            message: EMPTY_MESSAGE,
        },
    }
}

/// Percentage with exactly one decimal: 0.94 becomes "94.0".
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::classifier::{ClassificationSimulator, Selection};
    use crate::session::{SelectedImage, SessionEvent};

    fn classified(category: CategoryId, location: &str) -> SessionState {
        let mut state = SessionState::new(location);
        let ticket = Uuid::new_v4();
        state.apply(SessionEvent::Selected {
            image: SelectedImage::Demo {
                category,
                asset_path: PathBuf::from("demo.jpg"),
            },
            ticket,
        });
        state.apply(SessionEvent::ClassificationFinished {
            ticket,
            prediction: ClassificationSimulator::new(Duration::ZERO, Some(5))
                .predict(Selection::Demo(category)),
        });
        state
    }

    fn card(state: &SessionState) -> ResultCard {
        match render(state) {
            ResultView::Classified(card) => *card,
            other => panic!("expected a result card, got {other:?}"),
        }
    }

    #[test]
    fn confidence_has_one_decimal() {
        assert_eq!(format_confidence(0.94), "94.0");
        assert_eq!(format_confidence(0.875), "87.5");
        assert_eq!(format_confidence(1.0), "100.0");
        assert_eq!(format_confidence(0.0), "0.0");
    }

    #[test]
    fn every_category_renders_its_stored_confidence() {
        for id in CategoryId::ALL {
            let card = card(&classified(id, "Portland, OR 97201"));
            assert_eq!(card.confidence, format_confidence(id.details().confidence));
        }
        assert_eq!(card(&classified(CategoryId::Plastic, "x")).confidence, "94.0");
    }

    #[test]
    fn recyclable_categories_use_their_stored_accent() {
        let glass = card(&classified(CategoryId::Glass, "x"));
        assert_eq!(glass.verdict.banner(), "Recyclable ✓");
        assert_eq!(glass.accent, Accent::Green);
        assert_eq!(glass.card_tone, Tone::Green);
        assert_eq!(glass.status_tone, Tone::Blue);

        let metal = card(&classified(CategoryId::Metal, "x"));
        assert_eq!(metal.accent, Accent::Blue);
    }

    #[test]
    fn organic_is_flagged_regardless_of_its_color() {
        let organic = card(&classified(CategoryId::Organic, "x"));
        assert_eq!(CategoryId::Organic.details().color, AccentColor::Green);
        assert_eq!(organic.verdict, Verdict::NotRecyclable);
        assert_eq!(organic.verdict.banner(), "Not Recyclable ✗");
        assert_eq!(organic.accent, Accent::Red);
        assert_eq!(organic.card_tone, Tone::Red);
        assert_eq!(organic.status_tone, Tone::Orange);
        assert_eq!(
            organic.impact_message(),
            "Proper disposal prevents contamination of recyclable materials."
        );
    }

    #[test]
    fn location_note_only_interpolates_the_label() {
        let card = card(&classified(CategoryId::Paper, "Reykjavik"));
        assert_eq!(card.location_heading, "Local Guidelines for Reykjavik");
        assert_eq!(card.location_note, GUIDELINE_SOURCE_NOTE);
        assert!(card.local_rules.is_none());

        let card = card_for_portland();
        assert_eq!(card.local_rules.unwrap().0, "Portland, OR");
    }

    fn card_for_portland() -> ResultCard {
        card(&classified(CategoryId::Paper, "Portland, OR 97201"))
    }

    #[test]
    fn empty_and_loading_views() {
        let mut state = SessionState::new("x");
        assert_eq!(
            render(&state),
            ResultView::Empty {
                message: EMPTY_MESSAGE
            }
        );

        state.apply(SessionEvent::Selected {
            image: SelectedImage::Demo {
                category: CategoryId::Glass,
                asset_path: PathBuf::from("demo.jpg"),
            },
            ticket: Uuid::new_v4(),
        });
        assert_eq!(
            render(&state),
            ResultView::Loading {
                message: LOADING_MESSAGE
            }
        );
    }

    #[test]
    fn bin_accent_is_gray_without_a_result() {
        assert_eq!(Accent::for_category(None), Accent::Gray);
    }
}
