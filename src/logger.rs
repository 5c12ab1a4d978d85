// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diagnostic logging backend. Operator progress lines are printed directly;
//! this covers the `log` records (skip decisions, per-file failures).

use chrono::Utc;
use env_logger::{Builder, Env};
use std::io::Write;

/// Initialise env_logger with UTC ISO-8601 timestamps. `RUST_LOG` still wins.
pub fn init_logger(verbose: bool) {
    let filter_level = if verbose { "debug" } else { "info" };

    let _ = Builder::from_env(Env::default().default_filter_or(filter_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
