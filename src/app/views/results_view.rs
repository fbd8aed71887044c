use egui::{Color32, RichText, Stroke};

use crate::app::views::View;
use crate::render::{Accent, ResultCard, ResultView, Tone};

fn tone_fill(tone: Tone) -> Color32 {
    match tone {
        Tone::Green => Color32::from_rgb(240, 253, 244),
        Tone::Red => Color32::from_rgb(254, 242, 242),
        Tone::Blue => Color32::from_rgb(239, 246, 255),
        Tone::Orange => Color32::from_rgb(255, 247, 237),
    }
}

fn tone_stroke(tone: Tone) -> Color32 {
    match tone {
        Tone::Green => Color32::from_rgb(34, 197, 94),
        Tone::Red => Color32::from_rgb(239, 68, 68),
        Tone::Blue => Color32::from_rgb(59, 130, 246),
        Tone::Orange => Color32::from_rgb(234, 88, 12),
    }
}

fn accent_color(accent: Accent) -> Color32 {
    match accent {
        Accent::Gray => Color32::GRAY,
        Accent::Blue => Color32::from_rgb(37, 99, 235),
        Accent::Green => Color32::from_rgb(22, 163, 74),
        Accent::Red => Color32::from_rgb(220, 38, 38),
    }
}

fn block(ui: &mut egui::Ui, fill: Color32, stroke: Stroke, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .fill(fill)
        .stroke(stroke)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

pub struct ResultsView<'a> {
    view: &'a ResultView,
}

impl<'a> ResultsView<'a> {
    pub fn new(view: &'a ResultView) -> Self {
        Self { view }
    }

    fn draw_card(&self, ui: &mut egui::Ui, card: &ResultCard) {
        block(
            ui,
            tone_fill(card.card_tone),
            Stroke::new(2.0, tone_stroke(card.card_tone)),
            |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(card.title).strong().size(18.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(card.icon).size(28.0));
                    });
                });
                ui.label(format!("Material: {}", card.material));
                ui.label(format!("Confidence: {}%", card.confidence));
            },
        );

        block(ui, tone_fill(card.status_tone), Stroke::NONE, |ui| {
            ui.label(
                RichText::new(card.verdict.banner())
                    .strong()
                    .color(accent_color(card.accent)),
            );
            ui.label(format!("Bin: {}", card.guideline.bin_color));
        });

        block(ui, Color32::from_gray(248), Stroke::NONE, |ui| {
            ui.label(RichText::new("Disposal Instructions:").strong());
            ui.label(card.instructions);
            for (i, step) in card.guideline.preparation.iter().enumerate() {
                ui.label(RichText::new(format!("{}. {}", i + 1, step)).small());
            }
            ui.label(RichText::new(format!("💡 {}", card.guideline.notes)).small().weak());
        });

        block(
            ui,
            tone_fill(Tone::Blue),
            Stroke::new(1.0, Color32::from_rgb(191, 219, 254)),
            |ui| {
                ui.label(RichText::new(format!("📍 {}", card.location_heading)).strong());
                ui.label(RichText::new(card.location_note).small());
                if let Some((_, rules)) = card.local_rules {
                    ui.label(RichText::new(&rules.special_notes).small());
                }
            },
        );

        block(ui, tone_fill(Tone::Green), Stroke::NONE, |ui| {
            ui.label(
                RichText::new("Environmental Impact")
                    .strong()
                    .color(Color32::from_rgb(22, 101, 52)),
            );
            ui.label(card.impact_message());
        });

        ui.collapsing("Top predictions", |ui| {
            for (name, confidence) in &card.top_guesses {
                ui.label(format!("{name}: {confidence}%"));
            }
        });
    }
}

impl View for ResultsView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("ℹ Classification Results");
        ui.add_space(8.0);

        match self.view {
            ResultView::Loading { message } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.add(egui::Spinner::new().size(48.0));
                    ui.label(*message);
                });
            }
            ResultView::Classified(card) => self.draw_card(ui, card),
            ResultView::Empty { message } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.label(RichText::new("♻").size(64.0).color(Color32::GRAY));
                    ui.label(RichText::new(*message).color(Color32::GRAY));
                });
            }
        }
    }
}
