use egui::{Color32, RichText};

use crate::app::views::View;

pub struct HeaderView<'a> {
    title: &'a str,
    location: &'a str,
}

impl<'a> HeaderView<'a> {
    pub fn new(title: &'a str, location: &'a str) -> Self {
        Self { title, location }
    }
}

impl View for HeaderView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("♻")
                    .size(36.0)
                    .color(Color32::from_rgb(22, 163, 74)),
            );
            ui.vertical(|ui| {
                ui.heading(RichText::new(self.title).strong().size(28.0));
                ui.label("Intelligent Waste Classification System");
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("📍 {}", self.location));
            });
        });
    }
}
