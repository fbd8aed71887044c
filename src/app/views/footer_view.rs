use egui::RichText;

use crate::app::views::View;

const STEPS: [(&str, &str); 3] = [
    (
        "1. Image Capture",
        "Take a photo or upload an image of your waste item",
    ),
    (
        "2. AI Classification",
        "Our CNN model identifies the material type and condition",
    ),
    (
        "3. Local Instructions",
        "Get disposal guidelines specific to your location",
    ),
];

/// Static "How EcoSort Works" strip.
pub struct FooterView;

impl View for FooterView {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("How EcoSort Works").strong());
        ui.columns(STEPS.len(), |columns| {
            for (column, (title, body)) in columns.iter_mut().zip(STEPS) {
                column.label(RichText::new(title).strong());
                column.label(body);
            }
        });
    }
}
