// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terminal output and logging shared by the command-line tools

pub mod reporter;

pub use reporter::Reporter;

use tracing_subscriber::EnvFilter;

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` for
/// this crate when `verbose` is on. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "warn,step_colors=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
