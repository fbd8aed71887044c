use egui::{Color32, RichText, Sense, Stroke};

use crate::app::views::View;
use crate::catalog::CategoryId;
use crate::session::{SelectedImage, SessionState};

const PREVIEW_HEIGHT: f32 = 256.0;

/// Something the user asked for while the upload panel was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    PickFile,
    Demo(CategoryId),
    Clear,
}

pub struct UploadView<'a> {
    state: &'a SessionState,
    demo_categories: &'a [CategoryId],
    actions: Vec<UploadAction>,
}

impl<'a> UploadView<'a> {
    pub fn new(state: &'a SessionState, demo_categories: &'a [CategoryId]) -> Self {
        Self {
            state,
            demo_categories,
            actions: Vec::new(),
        }
    }

    pub fn into_actions(self) -> Vec<UploadAction> {
        self.actions
    }

    fn draw_drop_zone(&mut self, ui: &mut egui::Ui) {
        let response = egui::Frame::group(ui.style())
            .stroke(Stroke::new(2.0, Color32::LIGHT_GRAY))
            .show(ui, |ui| {
                ui.set_min_height(PREVIEW_HEIGHT);
                ui.vertical_centered(|ui| match self.state.selected_image() {
                    Some(SelectedImage::Uploaded(upload)) => {
                        ui.add(
                            egui::Image::from_bytes(upload.texture_uri(), upload.bytes().clone())
                                .max_height(PREVIEW_HEIGHT),
                        );
                    }
                    Some(SelectedImage::Demo {
                        category,
                        asset_path,
                    }) => {
                        if asset_path.exists() {
                            ui.add(
                                egui::Image::new(format!("file://{}", asset_path.display()))
                                    .max_height(PREVIEW_HEIGHT),
                            );
                        } else {
                            ui.label(RichText::new(category.details().icon).size(64.0));
                            ui.label(RichText::new(asset_path.display().to_string()).weak());
                        }
                    }
                    None => {
                        ui.label(RichText::new("⬆").size(48.0).color(Color32::GRAY));
                        ui.label("Click to upload an image");
                        ui.label(RichText::new("or drag and drop").small().weak());
                    }
                });
            })
            .response;

        if response.interact(Sense::click()).clicked() {
            self.actions.push(UploadAction::PickFile);
        }
    }
}

impl View for UploadView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("📷 Upload Waste Item");
        ui.add_space(8.0);

        self.draw_drop_zone(ui);

        if let Some(error) = self.state.error() {
            ui.colored_label(Color32::from_rgb(220, 38, 38), error);
        }

        if self.state.selected_image().is_some() {
            ui.add_space(8.0);
            let clear = ui.add_sized(
                [ui.available_width(), 28.0],
                egui::Button::new("Clear & Upload New"),
            );
            if clear.clicked() {
                self.actions.push(UploadAction::Clear);
            }
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Try demo images:").small());
        ui.horizontal_wrapped(|ui| {
            for category in self.demo_categories {
                let label = demo_label(*category);
                if ui.button(label).clicked() {
                    self.actions.push(UploadAction::Demo(*category));
                }
            }
        });
    }
}

/// Button text for a demo trigger, e.g. "♻️ Plastic".
fn demo_label(category: CategoryId) -> String {
    let key = category.key();
    let mut chars = key.chars();
    let name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{} {}", category.details().icon, name)
}
