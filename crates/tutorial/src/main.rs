//! Walks through the observable-primer creation operators and disposal, one example at a time.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod lessons;
mod load_text;
mod transcript;

fn main() -> Result<()> {
    init_logging()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for lesson in lessons::LESSONS {
        lessons::example_of(lesson, &mut out)
            .with_context(|| format!("failed to print example `{}`", lesson.name))?;
    }
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

/// Logs go to stderr so stdout carries only example output. `RUST_LOG` overrides the `warn` default.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialise logging: {err}"))
}
