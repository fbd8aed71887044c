use clap::Parser;
use ecosort::app::EcoSortApp;
use ecosort::cli::{self, Cli, Command};
use ecosort::config::Settings;
use ecosort::error::AppError;
use tracing::Level;

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        settings.log_level()?
    };
    init_logging(level);

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => EcoSortApp::start_gui(settings),
        Command::Classify(args) => cli::run_classify(args, settings).await.map(|_| ()),
    }
}
