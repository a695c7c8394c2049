use anyhow::Context;
use clap::Parser;
use hanzi_quiz::config::Config;
use hanzi_quiz::dataset::Dataset;
use hanzi_quiz::logging::init_tracing;
use hanzi_quiz::source::{DataSource, SheetSource, SheetsTable};
use hanzi_quiz::ui::{self, App};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "hanzi-quiz", version, about = "Chinese vocabulary flashcards from a Google Sheet")]
struct Args {
    /// Config file (default: ~/.config/hanzi-quiz/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spreadsheet id, overrides `sheet.id`
    #[arg(long)]
    sheet_id: Option<String>,

    /// Worksheet title, overrides `sheet.worksheet`
    #[arg(long)]
    worksheet: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_file = init_tracing();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(id) = args.sheet_id {
        config.sheet.id = id;
    }
    if let Some(worksheet) = args.worksheet {
        config.sheet.worksheet = Some(worksheet);
    }
    config.validate()?;

    let table = SheetsTable::new(config.sheet.clone());
    let worksheet = table
        .connect()
        .with_context(|| format!("Could not open spreadsheet '{}'", config.sheet.id))?;
    tracing::info!(worksheet = %worksheet.title, "Connected to sheet");

    let source = Arc::new(SheetSource::new(table, config.columns.clone()));
    let dataset = Dataset::load(&*source).context("Could not load vocabulary")?;

    let shared: Arc<dyn DataSource> = source.clone();
    let mut app = App::new(shared, dataset, worksheet.title);
    let result = ui::run(&mut app);
    source.table().disconnect();
    result?;

    println!("{}", app.summary());
    if let Some(path) = log_file {
        println!("Log: {}", path.display());
    }
    Ok(())
}
