use std::io;
use std::process::ExitCode;

use log::{error, info};

use geo_trivia::{console::{Console, Session}, GameConfig, ReferenceData, TriviaError};

fn run() -> Result<(), TriviaError> {
    let config = GameConfig::from_env()?;
    let data = ReferenceData::load(&config.data_dir)?;
    let stats = data.stats();
    info!("{} countries loaded", stats.countries);
    for (category, count) in &stats.with_data {
        info!("{category}: {count} countries, {} distinct items", stats.distinct_items[category]);
    }

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    Session::new(console, &data, &config).run()?;
    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
