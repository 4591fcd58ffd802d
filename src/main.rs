/*
 * This file is part of Rampage.
 *
 * Copyright (C) 2025 Rampage contributors
 *
 * Rampage is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rampage is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rampage. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rampage::cli::Cli;
use rampage::{handlers, logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = cli.open_store()?;
    debug!(dir = ?store.dir(), "Using presets directory");

    // Optional logging to <presets dir>/rampage_log.json
    if cli.logging {
        if let Some(path) = logger::init_logging(store.dir()) {
            debug!(path = ?path, "Event log enabled");
        }
        logger::log_event("startup", serde_json::json!({
            "args": std::env::args().collect::<Vec<_>>(),
        }));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = handlers::run(&store, cli.command, stdin.lock(), io::stderr(), &mut stdout);

    if let Err(e) = &result {
        logger::log_event("error", serde_json::json!({ "message": e.to_string() }));
        if let Some(message) = handlers::user_message(e) {
            eprintln!("rampage: {}", message);
            std::process::exit(1);
        }
    }
    result
}
