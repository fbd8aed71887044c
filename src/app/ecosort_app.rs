use std::collections::VecDeque;

use tracing::{debug, error, info};

use crate::app::views::{FooterView, HeaderView, ResultsView, UploadAction, UploadView, View};
use crate::classifier::ClassificationSimulator;
use crate::config::Settings;
use crate::error::AppError;
use crate::render::render;
use crate::session::{SessionManager, SessionManagerHandle};
use crate::upload::{DroppedBytes, FileSource};

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff"];
const MAX_LOGGED_ERRORS: usize = 20;

/// Most recent command failures, oldest dropped first.
#[derive(Debug, Default)]
struct ErrorLog {
    entries: VecDeque<AppError>,
}

impl ErrorLog {
    fn push(&mut self, error: AppError) {
        if self.entries.len() == MAX_LOGGED_ERRORS {
            self.entries.pop_front();
        }
        self.entries.push_back(error);
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn newest_first(&self) -> impl Iterator<Item = &AppError> {
        self.entries.iter().rev()
    }
}

pub struct EcoSortApp {
    settings: Settings,
    // Keeps the session task alive for as long as the window is open.
    _manager: SessionManager,
    handle: SessionManagerHandle,
    errors: ErrorLog,
}

impl EcoSortApp {
    pub fn new(settings: Settings, ctx: &egui::Context) -> Self {
        let simulator = ClassificationSimulator::new(
            settings.session.classification_delay(),
            settings.session.rng_seed,
        );
        let (manager, handle) = SessionManager::new(&settings.session, simulator);

        // Classification results arrive without any user input.
        let mut state_rx = handle.subscribe();
        let repaint_ctx = ctx.clone();
        tokio::spawn(async move {
            while state_rx.changed().await.is_ok() {
                repaint_ctx.request_repaint();
            }
        });

        Self {
            settings,
            _manager: manager,
            handle,
            errors: ErrorLog::default(),
        }
    }

    pub fn start_gui(settings: Settings) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(settings.gui.width, settings.gui.height))
                .with_title(settings.gui.title.clone()),
            ..Default::default()
        };

        info!("Starting {}", settings.gui.title);
        let title = settings.gui.title.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(EcoSortApp::new(settings, &cc.egui_ctx)))
            }),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    fn dispatch(&mut self, action: UploadAction) {
        debug!("UI action {:?}", action);
        let result = match action {
            UploadAction::PickFile => match rfd::FileDialog::new()
                .add_filter("Images", &IMAGE_EXTENSIONS)
                .pick_file()
            {
                Some(path) => self.handle.upload(FileSource::new(path)),
                None => Ok(()),
            },
            UploadAction::Demo(category) => self.handle.select_demo(category),
            UploadAction::Clear => self.handle.clear(),
        };
        self.record(result);
    }

    // Only the first dropped file is used.
    fn take_dropped_file(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        let result = if let Some(path) = file.path {
            self.handle.upload(FileSource::new(path))
        } else if let Some(bytes) = file.bytes {
            self.handle.upload(DroppedBytes::new(file.name, bytes))
        } else {
            Ok(())
        };
        self.record(result);
    }

    fn record(&mut self, result: Result<(), AppError>) {
        if let Err(e) = result {
            error!("Session command failed: {}", e);
            self.errors.push(e);
        }
    }
}

impl eframe::App for EcoSortApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.take_dropped_file(ctx);

        let state = self.handle.snapshot();
        let view = render(&state);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            HeaderView::new(&self.settings.gui.title, state.location()).draw(ui);
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(8.0);
            FooterView.draw(ui);
            if !self.errors.is_empty() {
                ui.separator();
                egui::ScrollArea::vertical().max_height(80.0).show(ui, |ui| {
                    for error in self.errors.newest_first() {
                        ui.label(format!("[ERROR] {}", error));
                    }
                });
            }
            ui.add_space(8.0);
        });

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |columns| {
                    let mut upload_view =
                        UploadView::new(&state, &self.settings.session.demo_categories);
                    upload_view.draw(&mut columns[0]);
                    actions = upload_view.into_actions();

                    ResultsView::new(&view).draw(&mut columns[1]);
                });
            });
        });

        for action in actions {
            self.dispatch(action);
        }
    }
}
