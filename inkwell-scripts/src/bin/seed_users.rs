// Delete every user, then bulk insert Bryan and John
use anyhow::Context;
use clap::Parser;
use inkwell_db::config::Settings;
use inkwell_scripts::{logging, runner, Script};

#[derive(Parser, Debug)]
#[command(name = "seed-users")]
#[command(about = "Replace all users with the two seed users", long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long)]
    database: Option<String>,
}

fn main() {
    dotenv::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let settings = Settings::new().context("Failed to load settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner::run_configured(Script::SeedUsers, settings, args.database, &mut out);
}
