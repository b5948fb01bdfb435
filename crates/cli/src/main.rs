//! # CLI - DataAccess Interactive Shell
//!
//! A REPL-style command-line interface over a single integer store file.
//! Reads commands from stdin, executes them against the store, and prints
//! results to stdout. Designed for both interactive use and scripted testing
//! (pipe commands via stdin).
//!
//! ## Commands
//!
//! ```text
//! ENSURE bytes        Make room for at least bytes/4 integers
//! SET index value     Write an integer
//! GET index           Read an integer
//! DUMP [start] [end]  Print a range of slots (inclusive start, exclusive end)
//! LOAD                Load the backing file into an unallocated store
//! FLUSH               Write the store to its backing file
//! CLOSE               Release the buffer; the store cannot be reloaded
//! INFO                Print store debug info
//! EXIT / QUIT         Leave the shell (does not flush)
//! ```
//!
//! ## Configuration
//!
//! ```text
//! DATAACCESS_PATH           backing file path            (default: "dataaccess.bin")
//! DATAACCESS_BYTE_HINT      initial capacity in bytes    (default: 4096)
//! DATAACCESS_GROWTH_FACTOR  growth ratio, 1.0 to 16.0    (default: 1.5)
//! DATAACCESS_SYNC           fsync after every flush      (default: "true")
//! RUST_LOG                  log filter for stderr        (default: "warn")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! dataaccess started (path=dataaccess.bin, loaded=false, capacity=1024)
//! > SET 0 7
//! OK
//! > GET 0
//! 7
//! > FLUSH
//! OK (4096 bytes)
//! > EXIT
//! bye
//! ```

mod commands;

use anyhow::Result;
use commands::{execute, Flow};
use config::StoreConfig;
use dataaccess::{DataAccess, RamDataAccess};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so scripted sessions can parse stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = StoreConfig::from_env();
    // Same steps as `RamDataAccess::load_with`, kept apart so the banner can
    // report whether an existing file was picked up.
    let mut da = RamDataAccess::with_config(&config.path, &config);
    let loaded = da.load_existing();
    if !loaded {
        da.ensure_capacity(config.byte_hint);
    }
    info!(
        path = %config.path.display(),
        loaded,
        capacity = da.capacity(),
        "store opened"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "dataaccess started (path={}, loaded={}, capacity={})",
        config.path.display(),
        loaded,
        da.capacity()
    )?;
    writeln!(out, "Commands: ENSURE bytes | SET index value | GET index | DUMP [start] [end]")?;
    writeln!(out, "          LOAD | FLUSH | CLOSE | INFO | EXIT")?;
    write!(out, "> ")?;
    out.flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if execute(&mut da, &line, &mut out)? == Flow::Exit {
            break;
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    info!(path = %config.path.display(), closed = da.is_closed(), "shell exiting");
    Ok(())
}
