//! Command line interface for appbundlegen.

mod args;

pub use args::Args;

use clap::Parser;

use crate::bundler;
use crate::bundler::error::{Error, Result};

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // clap renders help and usage errors itself; exit 1 on a real
            // argument error, 0 for --help output.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return Ok(code);
        }
    };

    if let Err(reason) = args.validate() {
        return Err(Error::InvalidArguments(reason));
    }

    let options = args.to_options();
    let bundle = bundler::build_bundle(&options).await?;

    println!("Created {}", bundle.display());
    Ok(0)
}
