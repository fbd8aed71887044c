use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::CategoryId;
use crate::classifier::{ClassificationRequest, ClassificationSimulator, Prediction, Selection};
use crate::config::SessionSettings;
use crate::error::AppError;
use crate::upload::{UploadSource, UploadedImage};

use super::{SelectedImage, SessionEvent, SessionState};

const COMMAND_BUFFER: usize = 32;

enum SessionCommand {
    Upload { source: Box<dyn UploadSource> },
    Demo { category: CategoryId },
    Clear,
}

enum InternalEvent {
    UploadLoaded {
        ticket: Uuid,
        result: Result<UploadedImage, AppError>,
    },
    ClassificationFinished { ticket: Uuid, prediction: Prediction },
}

/// Cheap, cloneable way into a running session. Commands never block; the
/// latest state is always available through `snapshot`.
#[derive(Clone)]
pub struct SessionManagerHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    state_rx: watch::Receiver<SessionState>,
}

impl SessionManagerHandle {
    pub fn upload(&self, source: impl UploadSource + 'static) -> Result<(), AppError> {
        self.send(SessionCommand::Upload {
            source: Box::new(source),
        })
    }

    pub fn select_demo(&self, category: CategoryId) -> Result<(), AppError> {
        self.send(SessionCommand::Demo { category })
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.send(SessionCommand::Clear)
    }

    pub fn snapshot(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    fn send(&self, command: SessionCommand) -> Result<(), AppError> {
        self.command_tx.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => AppError::SessionBusy,
            mpsc::error::TrySendError::Closed(_) => AppError::SessionClosed,
        })
    }
}

/// Owns the session task. Dropping it stops the session.
pub struct SessionManager {
    task: JoinHandle<()>,
}

impl SessionManager {
    pub fn new(
        settings: &SessionSettings,
        simulator: ClassificationSimulator,
    ) -> (Self, SessionManagerHandle) {
        let (command_tx, command_rx) = mpsc::channel::<SessionCommand>(COMMAND_BUFFER);
        let (internal_tx, internal_rx) = mpsc::channel::<InternalEvent>(COMMAND_BUFFER);
        let (state_tx, state_rx) = watch::channel(SessionState::new(settings.location.clone()));

        let actor = SessionActor {
            state: SessionState::new(settings.location.clone()),
            state_tx,
            simulator,
            settings: settings.clone(),
            internal_tx,
            pending: None,
            reading: None,
        };
        let task = tokio::spawn(actor.run(command_rx, internal_rx));

        (
            Self { task },
            SessionManagerHandle {
                command_tx,
                state_rx,
            },
        )
    }

    pub async fn shutdown(mut self) {
        self.task.abort();
        if let Err(e) = (&mut self.task).await {
            if !e.is_cancelled() {
                warn!("Session task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct SessionActor {
    state: SessionState,
    state_tx: watch::Sender<SessionState>,
    simulator: ClassificationSimulator,
    settings: SessionSettings,
    internal_tx: mpsc::Sender<InternalEvent>,
    pending: Option<CancellationToken>,
    // Only the latest upload read may turn into a selection.
    reading: Option<(Uuid, CancellationToken)>,
}

impl SessionActor {
    async fn run(
        mut self,
        mut command_rx: mpsc::Receiver<SessionCommand>,
        mut internal_rx: mpsc::Receiver<InternalEvent>,
    ) {
        info!("Session started for {}", self.state.location());
        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        info!("All session handles dropped, stopping session");
                        break;
                    }
                },
                Some(event) = internal_rx.recv() => self.handle_internal(event),
            }
        }
        self.cancel_reading();
        self.cancel_pending();
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Upload { source } => {
                self.cancel_reading();
                let ticket = Uuid::new_v4();
                let token = CancellationToken::new();
                self.reading = Some((ticket, token.clone()));

                debug!("Reading upload {} ({})", source.name(), ticket);
                let internal_tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            debug!("Upload read {} superseded", ticket);
                        }
                        result = source.load() => {
                            if internal_tx
                                .send(InternalEvent::UploadLoaded { ticket, result })
                                .await
                                .is_err()
                            {
                                debug!("Session closed before the upload was read");
                            }
                        }
                    }
                });
            }
            SessionCommand::Demo { category } => {
                self.cancel_reading();
                let image = SelectedImage::Demo {
                    category,
                    asset_path: self.settings.demo_asset_path(category),
                };
                self.start_classification(image, Selection::Demo(category));
            }
            SessionCommand::Clear => {
                self.cancel_reading();
                self.cancel_pending();
                self.apply(SessionEvent::Cleared);
            }
        }
    }

    fn handle_internal(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::UploadLoaded { ticket, result } => {
                if self.reading.as_ref().map(|(current, _)| *current) != Some(ticket) {
                    warn!("Dropping stale upload read {}", ticket);
                    return;
                }
                self.reading = None;
                self.upload_loaded(result);
            }
            InternalEvent::ClassificationFinished { ticket, prediction } => {
                self.apply(SessionEvent::ClassificationFinished { ticket, prediction });
            }
        }
    }

    fn upload_loaded(&mut self, result: Result<UploadedImage, AppError>) {
        match result {
            Ok(image) => {
                info!(
                    "Uploaded {} ({} bytes, {})",
                    image.file_name(),
                    image.bytes().len(),
                    image.mime()
                );
                self.start_classification(
                    SelectedImage::Uploaded(Arc::new(image)),
                    Selection::Random,
                );
            }
            Err(e) => {
                warn!("Upload failed: {}", e);
                self.apply(SessionEvent::UploadFailed {
                    message: e.to_string(),
                });
            }
        }
    }

    // A new selection supersedes whatever is still running.
    fn start_classification(&mut self, image: SelectedImage, selection: Selection) {
        self.cancel_pending();

        let request = ClassificationRequest::new(selection);
        let ticket = request.id;
        self.apply(SessionEvent::Selected { image, ticket });

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let simulator = self.simulator.clone();
        let internal_tx = self.internal_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Classification {} superseded", ticket);
                }
                result = simulator.oneshot(request) => {
                    let prediction = match result {
                        Ok(prediction) => prediction,
                        Err(never) => match never {},
                    };
                    if internal_tx
                        .send(InternalEvent::ClassificationFinished { ticket, prediction })
                        .await
                        .is_err()
                    {
                        debug!("Session closed before classification {} finished", ticket);
                    }
                }
            }
        });
    }

    fn cancel_reading(&mut self) {
        if let Some((_, token)) = self.reading.take() {
            token.cancel();
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        if self.state.apply(event) {
            self.state_tx.send_replace(self.state.clone());
        }
    }
}
