//! appbundlegen - macOS application bundle generator.
//!
//! This binary wraps an arbitrary executable or shell command in a `.app`
//! directory tree, converts an optional icon image to `.icns` and
//! optionally code-signs the finished bundle.

mod bundler;
mod cli;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.report());
            1
        }
    };

    process::exit(exit_code);
}
