use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::catalog::{LocationRules, RecyclingGuideline};
use crate::classifier::Prediction;
use crate::error::AppError;
use crate::upload::UploadedImage;

use super::result_view::{ResultCard, Verdict};

const RULE: &str = "============================================================";

/// Console report for one classified image.
pub fn text_report(card: &ResultCard, image: &UploadedImage) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, card, image);
    out
}

fn write_report(out: &mut String, card: &ResultCard, image: &UploadedImage) -> std::fmt::Result {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "🌍 ECOSORT AI - WASTE CLASSIFICATION RESULTS")?;
    writeln!(out, "{RULE}")?;

    writeln!(out, "\n📸 Image: {}", image.file_name())?;
    if let Some((width, height)) = image.dimensions() {
        writeln!(out, "📊 Image Info: {width}x{height} pixels")?;
    }

    writeln!(out, "\n✅ Classification: {}", card.category.key().to_uppercase())?;
    writeln!(out, "🎯 Confidence: {}%", card.confidence)?;
    writeln!(out, "📦 Material: {}", card.material)?;

    match card.verdict {
        Verdict::Recyclable => writeln!(out, "\n♻️  RECYCLABLE")?,
        Verdict::NotRecyclable => writeln!(out, "\n🗑️  NOT RECYCLABLE")?,
    }

    writeln!(out, "\n📋 Disposal Instructions:")?;
    writeln!(out, "   {}", card.instructions)?;
    writeln!(out, "   Bin Color: {}", card.guideline.bin_color)?;
    writeln!(out, "\n   Preparation Steps:")?;
    for (i, step) in card.guideline.preparation.iter().enumerate() {
        writeln!(out, "   {}. {}", i + 1, step)?;
    }
    writeln!(out, "\n💡 Note: {}", card.guideline.notes)?;

    writeln!(out, "\n📍 {}:", card.location_heading)?;
    match card.local_rules {
        Some((_, rules)) => writeln!(out, "   {}", rules.special_notes)?,
        None => writeln!(out, "   {}", card.location_note)?,
    }

    writeln!(out, "\n🏆 Top 3 Predictions:")?;
    for (i, (name, confidence)) in card.top_guesses.iter().enumerate() {
        writeln!(out, "   {}. {}: {}%", i + 1, name, confidence)?;
    }

    writeln!(out, "\n🌱 Environmental Impact:")?;
    writeln!(out, "   {}", card.impact_message())?;
    writeln!(out, "\n{RULE}")?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Instructions<'a> {
    pub recyclable: bool,
    #[serde(flatten)]
    pub guideline: &'a RecyclingGuideline,
    pub location: &'a str,
    pub location_specific: Option<&'a LocationRules>,
}

/// What `--save-results` writes to disk.
#[derive(Debug, Serialize)]
pub struct SavedResults<'a> {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
    pub prediction: &'a Prediction,
    pub instructions: Instructions<'a>,
}

impl<'a> SavedResults<'a> {
    pub fn new(image_path: &Path, prediction: &'a Prediction, location: &'a str) -> Self {
        let category = prediction.details();
        Self {
            image: image_path.display().to_string(),
            image_data_url: None,
            prediction,
            instructions: Instructions {
                recyclable: category.recyclable,
                guideline: RecyclingGuideline::for_category(category.id),
                location,
                location_specific: LocationRules::lookup(location).map(|(_, rules)| rules),
            },
        }
    }

    pub fn with_embedded_image(mut self, image: &UploadedImage) -> Self {
        self.image_data_url = Some(image.data_url());
        self
    }
}

/// Writes `{image stem}_results.json` into `output_dir` and returns its path.
pub fn save_results(results: &SavedResults<'_>, output_dir: &Path) -> Result<PathBuf, AppError> {
    let stem = Path::new(&results.image)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ecosort".to_string());
    let path = output_dir.join(format!("{stem}_results.json"));
    let json = serde_json::to_string_pretty(results)?;
    fs::write(&path, json)?;
    info!("Saved results to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::catalog::CategoryId;
    use crate::classifier::{ClassificationSimulator, Selection};

    fn prediction(category: CategoryId) -> Prediction {
        ClassificationSimulator::new(Duration::ZERO, Some(11)).predict(Selection::Demo(category))
    }

    #[test]
    fn report_lists_everything_the_user_needs() {
        let prediction = prediction(CategoryId::Plastic);
        let card = ResultCard::new(&prediction, "Portland, OR 97201");
        let image = UploadedImage::from_bytes("bottle.jpg", b"not really a jpeg".to_vec());
        let report = text_report(&card, &image);

        assert!(report.contains("📸 Image: bottle.jpg"));
        assert!(report.contains("✅ Classification: PLASTIC"));
        assert!(report.contains("🎯 Confidence: 94.0%"));
        assert!(report.contains("♻️  RECYCLABLE"));
        assert!(report.contains("   Bin Color: Blue"));
        assert!(report.contains("   1. Rinse thoroughly to remove residue"));
        assert!(report.contains("📍 Local Guidelines for Portland, OR 97201:"));
        assert!(report.contains("Portland has comprehensive recycling programs"));
        assert!(report.contains("   1. Plastic Bottle: 94.0%"));
        assert!(!report.contains("Image Info"));
    }

    #[test]
    fn report_for_organic_says_not_recyclable() {
        let prediction = prediction(CategoryId::Organic);
        let card = ResultCard::new(&prediction, "Oslo");
        let image = UploadedImage::from_bytes("apple.jpg", Vec::new());
        let report = text_report(&card, &image);

        assert!(report.contains("🗑️  NOT RECYCLABLE"));
        assert!(report.contains(crate::render::result_view::GUIDELINE_SOURCE_NOTE));
    }

    #[test]
    fn saved_results_are_named_after_the_image() {
        let prediction = prediction(CategoryId::Glass);
        let results = SavedResults::new(Path::new("photos/jar.png"), &prediction, "New York, NY");
        let dir = std::env::temp_dir().join(format!("ecosort-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        let path = save_results(&results, &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "jar_results.json");

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(saved["image"], "photos/jar.png");
        assert_eq!(saved["prediction"]["category"], "glass");
        assert_eq!(saved["instructions"]["bin_color"], "Green");
        assert_eq!(saved["instructions"]["location"], "New York, NY");
        assert_eq!(
            saved["instructions"]["location_specific"]["special_notes"],
            "No plastic bags in blue bins"
        );
        assert!(saved.get("image_data_url").is_none());
    }

    #[test]
    fn embedded_image_is_a_data_url() {
        let prediction = prediction(CategoryId::Metal);
        let image = UploadedImage::from_bytes("can.bin", vec![1, 2, 3]);
        let results = SavedResults::new(Path::new("can.bin"), &prediction, "x")
            .with_embedded_image(&image);
        assert_eq!(
            results.image_data_url.as_deref(),
            Some("data:application/octet-stream;base64,AQID")
        );
    }
}
