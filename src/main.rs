//! `leakmon` - run a DMA leakage analysis and print the report.
//!
//! Usage:
//!   leakmon [BATCH.json]
//!
//! Without a batch file the built-in demonstration zones are analysed.
//! Configuration is read from `$LEAKMON_CONFIG` (default `./leakmon.toml`);
//! a `.env` file in the working directory is loaded first.

use std::error::Error;
use std::path::{Path, PathBuf};

use leakmon_service::config::LeakmonConfig;
use leakmon_service::ingest::load_batch;
use leakmon_service::logging::{self, Component};
use leakmon_service::session::AnalysisSession;
use leakmon_service::{export, report, samples};

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let config = LeakmonConfig::load_from_env()?;
    logging::init_logger(
        config.log_level()?,
        config.logging.file.as_deref(),
        config.logging.console_timestamps,
    )?;
    config.log_config();

    let batch = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            logging::info(
                Component::Ingest,
                None,
                &format!("Loading batch from {}", path.display()),
            );
            load_batch(&path)?
        }
        None => {
            logging::info(Component::Ingest, None, "No batch file given, using sample data");
            samples::sample_batch()
        }
    };

    let run = AnalysisSession::from_config(&config).run(&batch);

    println!("{}", report::render(&run));
    export::export_report(&run, Path::new(&config.output.report_path))?;

    Ok(())
}
