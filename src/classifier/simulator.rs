use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tower::Service;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::CategoryId;

use super::{Prediction, RankedGuess};

/// How the simulated classifier picks its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A real upload. The content is ignored and the answer is uniformly random.
    Random,
    /// A demo trigger that always answers with its own category.
    Demo(CategoryId),
}

#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub id: Uuid,
    pub selection: Selection,
}

impl ClassificationRequest {
    pub fn new(selection: Selection) -> Self {
        Self {
            id: Uuid::new_v4(),
            selection,
        }
    }
}

/// Pretends to run a model: waits a fixed delay, then answers from the static
/// category table. Clones share one random source.
#[derive(Debug, Clone)]
pub struct ClassificationSimulator {
    delay: Duration,
    rng: Arc<Mutex<StdRng>>,
}

impl ClassificationSimulator {
    pub fn new(delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            delay,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Picks the answer right away, without the artificial delay.
    pub fn predict(&self, selection: Selection) -> Prediction {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let category = match selection {
            Selection::Random => CategoryId::ALL[rng.random_range(0..CategoryId::ALL.len())],
            Selection::Demo(category) => category,
        };

        Prediction {
            id: Uuid::new_v4(),
            category,
            top_guesses: rank(category, &mut *rng),
            classified_at: Utc::now(),
        }
    }
}

// The winner keeps its fixed confidence; two other categories share part of
// what is left, each taking 30-70% of the remainder at that point.
fn rank(category: CategoryId, rng: &mut impl Rng) -> Vec<RankedGuess> {
    let confidence = category.details().confidence;
    let mut others: Vec<CategoryId> = CategoryId::ALL
        .into_iter()
        .filter(|other| *other != category)
        .collect();
    others.shuffle(rng);

    let mut guesses = vec![RankedGuess {
        category,
        confidence,
    }];
    let mut remaining = 1.0 - confidence;
    for other in others.into_iter().take(2) {
        let share = remaining * rng.random_range(0.3..0.7);
        guesses.push(RankedGuess {
            category: other,
            confidence: share,
        });
        remaining -= share;
    }
    guesses
}

impl Service<ClassificationRequest> for ClassificationSimulator {
    type Response = Prediction;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ClassificationRequest) -> Self::Future {
        let simulator = self.clone();
        Box::pin(async move {
            debug!(
                "Classification {} pending for {:?}",
                request.id, simulator.delay
            );
            tokio::time::sleep(simulator.delay).await;
            let prediction = simulator.predict(request.selection);
            debug!(
                "Classification {} picked {}",
                request.id, prediction.category
            );
            Ok(prediction)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tower::ServiceExt;

    use super::*;

    #[test]
    fn demo_selection_is_deterministic() {
        let simulator = ClassificationSimulator::new(Duration::ZERO, None);
        for id in CategoryId::ALL {
            let prediction = simulator.predict(Selection::Demo(id));
            assert_eq!(prediction.category, id);
            assert_eq!(prediction.confidence(), id.details().confidence);
        }
    }

    #[test]
    fn random_selection_is_roughly_uniform() {
        let simulator = ClassificationSimulator::new(Duration::ZERO, Some(42));
        let rounds = 6000;
        let mut counts: HashMap<CategoryId, usize> = HashMap::new();
        for _ in 0..rounds {
            *counts
                .entry(simulator.predict(Selection::Random).category)
                .or_default() += 1;
        }

        assert_eq!(counts.len(), CategoryId::ALL.len());
        for (id, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "{id} was picked {count} times out of {rounds}"
            );
        }
    }

    #[test]
    fn ranking_has_three_distinct_guesses_led_by_the_answer() {
        let simulator = ClassificationSimulator::new(Duration::ZERO, Some(7));
        for _ in 0..100 {
            let prediction = simulator.predict(Selection::Random);
            let guesses = &prediction.top_guesses;
            assert_eq!(guesses.len(), 3);
            assert_eq!(guesses[0].category, prediction.category);
            assert_ne!(guesses[1].category, guesses[0].category);
            assert_ne!(guesses[2].category, guesses[1].category);
            assert_ne!(guesses[2].category, guesses[0].category);
            assert!(guesses[0].confidence > guesses[1].confidence);
            let total: f64 = guesses.iter().map(|guess| guess.confidence).sum();
            assert!(total <= 1.0);
        }
    }

    #[test]
    fn same_seed_gives_same_answers() {
        let a = ClassificationSimulator::new(Duration::ZERO, Some(99));
        let b = ClassificationSimulator::new(Duration::ZERO, Some(99));
        for _ in 0..20 {
            assert_eq!(
                a.predict(Selection::Random).category,
                b.predict(Selection::Random).category
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn service_answers_after_the_delay() {
        let simulator = ClassificationSimulator::new(Duration::from_millis(1500), None);
        let started = tokio::time::Instant::now();
        let prediction = simulator
            .oneshot(ClassificationRequest::new(Selection::Demo(CategoryId::Glass)))
            .await
            .unwrap();
        assert_eq!(prediction.category, CategoryId::Glass);
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
