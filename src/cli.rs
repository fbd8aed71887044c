use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::catalog::{CategoryId, LocationRules};
use crate::classifier::{ClassificationSimulator, Prediction};
use crate::config::Settings;
use crate::error::AppError;
use crate::render::{save_results, text_report, ResultCard, SavedResults};
use crate::session::{Phase, SessionManager};
use crate::upload::{DroppedBytes, FileSource, UploadSource};

/// EcoSort AI - Waste Classification Demo
#[derive(Parser, Debug)]
#[command(name = "ecosort", about = "EcoSort AI - Waste Classification Demo", version)]
pub struct Cli {
    /// Settings file; `ecosort.toml` is used when present and this is not given.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of settings.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the desktop demo (the default).
    Gui,
    /// Classify one image and print disposal instructions.
    Classify(ClassifyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to waste item image.
    #[arg(long, value_name = "PATH")]
    pub image: PathBuf,

    /// Your location (e.g. "Portland, OR").
    #[arg(long)]
    pub location: Option<String>,

    /// Answer with this category instead of a random one.
    #[arg(long, value_name = "CATEGORY")]
    pub demo: Option<CategoryId>,

    /// Save results to `<image stem>_results.json`.
    #[arg(long)]
    pub save_results: bool,

    /// Embed the image as a data URL in the saved results.
    #[arg(long, requires = "save_results")]
    pub embed_image: bool,

    /// Where saved results are written.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct ClassifyOutcome {
    pub prediction: Prediction,
    pub saved_to: Option<PathBuf>,
}

/// Runs one image through the same session the desktop UI uses and prints
/// the report.
pub async fn run_classify(
    args: ClassifyArgs,
    mut settings: Settings,
) -> Result<ClassifyOutcome, AppError> {
    if let Some(location) = args.location.clone() {
        settings.session.location = location;
    }
    if LocationRules::lookup(&settings.session.location).is_none() {
        let known: Vec<_> = LocationRules::known_locations().collect();
        warn!(
            "No local rules for {}, falling back to general guidelines (known: {})",
            settings.session.location,
            known.join("; ")
        );
    }

    println!("\n🔍 Loading image...");
    let image = FileSource::new(&args.image).load().await?;
    if !image.is_image() {
        return Err(AppError::UndecodableImage(args.image));
    }

    println!("🤖 Analyzing waste item with AI...");
    let simulator = ClassificationSimulator::new(
        settings.session.classification_delay(),
        settings.session.rng_seed,
    );
    let (manager, handle) = SessionManager::new(&settings.session, simulator);
    let mut state_rx = handle.subscribe();

    match args.demo {
        Some(category) => handle.select_demo(category)?,
        None => handle.upload(DroppedBytes::new(image.file_name(), image.bytes().clone()))?,
    }

    let state = state_rx
        .wait_for(|state| state.phase() == Phase::Result)
        .await
        .map_err(|_| AppError::SessionClosed)?
        .clone();
    manager.shutdown().await;

    let prediction = state.prediction().cloned().ok_or(AppError::SessionClosed)?;
    let card = ResultCard::new(&prediction, state.location());
    print!("{}", text_report(&card, &image));

    let saved_to = if args.save_results {
        let mut results = SavedResults::new(&args.image, &prediction, state.location());
        if args.embed_image {
            results = results.with_embedded_image(&image);
        }
        let path = save_results(&results, &args.output_dir)?;
        println!("\n💾 Results saved to: {}", path.display());
        Some(path)
    } else {
        None
    };

    info!("Classified {} as {}", args.image.display(), prediction.category);
    println!("\n✅ Classification complete!\n");
    Ok(ClassifyOutcome {
        prediction,
        saved_to,
    })
}
