use anyhow::Context;
use clap::Parser;
use inkwell_db::config::Settings;
use inkwell_scripts::{logging, runner, Script};

/// Inkwell demo scripts
///
/// Runs a fixed sequence of create/read/update/delete calls against the
/// users, preferences, posts and categories tables and prints every result.
#[derive(Parser, Debug)]
#[command(name = "inkwell-scripts")]
#[command(about = "Run a CRUD demonstration script against the Inkwell database", long_about = None)]
struct Args {
    /// Path to the SQLite database file (overrides settings and DATABASE_PATH)
    #[arg(short, long)]
    database: Option<String>,

    /// Script to run
    #[arg(value_enum)]
    script: Script,
}

fn main() {
    dotenv::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let settings = Settings::new().context("Failed to load settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Failures are logged, not turned into an exit code
    runner::run_configured(args.script, settings, args.database, &mut out);
}
