//! jini - packages compiled JVM applications as native Windows launchers.

use jini::cli;
use jini::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let _ = output.list("\nRecovery suggestions:", &e.recovery_suggestions());

            process::exit(1);
        }
    }
}
