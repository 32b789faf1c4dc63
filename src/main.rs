//! script_bundler - wrap a script in a double-clickable macOS application bundle.

use script_bundler::cli;
use script_bundler::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e:#}"));
            process::exit(1);
        }
    }
}
