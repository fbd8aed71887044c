use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::CategoryId;
use crate::classifier::Prediction;
use crate::upload::UploadedImage;

#[derive(Debug, Clone)]
pub enum SelectedImage {
    Uploaded(Arc<UploadedImage>),
    /// A demo trigger. The asset path is a placeholder and may not exist.
    Demo {
        category: CategoryId,
        asset_path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Result,
}

/// Everything a transition can do to the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// An image was chosen and classification `ticket` started for it.
    Selected {
        image: SelectedImage,
        ticket: Uuid,
    },
    UploadFailed {
        message: String,
    },
    ClassificationFinished {
        ticket: Uuid,
        prediction: Prediction,
    },
    Cleared,
}

/// The one owner of what the UI shows. Fields only change through `apply`.
#[derive(Debug, Clone)]
pub struct SessionState {
    selected_image: Option<SelectedImage>,
    prediction: Option<Prediction>,
    loading: bool,
    location: String,
    error: Option<String>,
    pending: Option<Uuid>,
}

impl SessionState {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            selected_image: None,
            prediction: None,
            loading: false,
            location: location.into(),
            error: None,
            pending: None,
        }
    }

    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.selected_image.as_ref()
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_ticket(&self) -> Option<Uuid> {
        self.pending
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.prediction.is_some() {
            Phase::Result
        } else {
            Phase::Empty
        }
    }

    /// Applies `event` and reports whether anything changed. A finished
    /// classification whose ticket is no longer pending is dropped.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Selected { image, ticket } => {
                debug!("Classification {} started", ticket);
                self.selected_image = Some(image);
                self.prediction = None;
                self.loading = true;
                self.error = None;
                self.pending = Some(ticket);
                true
            }
            SessionEvent::UploadFailed { message } => {
                self.error = Some(message);
                true
            }
            SessionEvent::ClassificationFinished { ticket, prediction } => {
                if self.pending != Some(ticket) {
                    warn!("Dropping stale classification {}", ticket);
                    return false;
                }
                debug!("Classification {} finished: {}", ticket, prediction.category);
                self.prediction = Some(prediction);
                self.loading = false;
                self.pending = None;
                true
            }
            SessionEvent::Cleared => {
                self.selected_image = None;
                self.prediction = None;
                self.loading = false;
                self.error = None;
                self.pending = None;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::classifier::{ClassificationSimulator, Selection};

    fn demo(category: CategoryId) -> SelectedImage {
        SelectedImage::Demo {
            category,
            asset_path: PathBuf::from(format!("demo-{category}.jpg")),
        }
    }

    fn prediction(category: CategoryId) -> Prediction {
        ClassificationSimulator::new(Duration::ZERO, Some(1)).predict(Selection::Demo(category))
    }

    #[test]
    fn starts_empty() {
        let state = SessionState::new("Portland, OR 97201");
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.selected_image().is_none());
        assert_eq!(state.location(), "Portland, OR 97201");
    }

    #[test]
    fn selecting_clears_the_previous_prediction() {
        let mut state = SessionState::new("here");
        let first = Uuid::new_v4();
        state.apply(SessionEvent::Selected {
            image: demo(CategoryId::Plastic),
            ticket: first,
        });
        state.apply(SessionEvent::ClassificationFinished {
            ticket: first,
            prediction: prediction(CategoryId::Plastic),
        });
        assert_eq!(state.phase(), Phase::Result);

        state.apply(SessionEvent::Selected {
            image: demo(CategoryId::Glass),
            ticket: Uuid::new_v4(),
        });
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.prediction().is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = SessionState::new("here");
        let stale = Uuid::new_v4();
        let current = Uuid::new_v4();
        state.apply(SessionEvent::Selected {
            image: demo(CategoryId::Plastic),
            ticket: stale,
        });
        state.apply(SessionEvent::Selected {
            image: demo(CategoryId::Glass),
            ticket: current,
        });

        let applied = state.apply(SessionEvent::ClassificationFinished {
            ticket: stale,
            prediction: prediction(CategoryId::Plastic),
        });
        assert!(!applied);
        assert_eq!(state.phase(), Phase::Loading);

        assert!(state.apply(SessionEvent::ClassificationFinished {
            ticket: current,
            prediction: prediction(CategoryId::Glass),
        }));
        assert_eq!(state.prediction().unwrap().category, CategoryId::Glass);
        assert!(state.pending_ticket().is_none());
    }

    #[test]
    fn clear_returns_to_empty_from_any_phase() {
        let mut state = SessionState::new("here");
        let ticket = Uuid::new_v4();
        state.apply(SessionEvent::Selected {
            image: demo(CategoryId::Cardboard),
            ticket,
        });
        state.apply(SessionEvent::Cleared);
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.selected_image().is_none());

        // The classification that was running when we cleared must not come back.
        state.apply(SessionEvent::ClassificationFinished {
            ticket,
            prediction: prediction(CategoryId::Cardboard),
        });
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.prediction().is_none());
    }

    #[test]
    fn upload_failure_only_sets_the_error() {
        let mut state = SessionState::new("here");
        let ticket = Uuid::new_v4();
        state.apply(SessionEvent::Selected {
            image: demo(CategoryId::Metal),
            ticket,
        });
        state.apply(SessionEvent::ClassificationFinished {
            ticket,
            prediction: prediction(CategoryId::Metal),
        });

        state.apply(SessionEvent::UploadFailed {
            message: "Failed to read x.jpg".to_string(),
        });
        assert_eq!(state.error(), Some("Failed to read x.jpg"));
        assert_eq!(state.phase(), Phase::Result);
        assert_eq!(state.prediction().unwrap().category, CategoryId::Metal);
    }
}
