// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod command;
mod config;
mod session;

use crate::config::SessionConfig;
use crate::session::{Session, SessionEnd};
use park_alloc_model::prelude::Car;
use park_alloc_registry::registry::{ParkingRegistry, Registry};
use std::{io, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    enable_tracing();

    let config = match SessionConfig::from_args(std::env::args_os().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let input = match config.input().open() {
        Ok(input) => input,
        Err(e) => {
            error!(input = %config.input(), error = %e, "cannot open command input");
            eprintln!("File is invalid ({e})");
            return ExitCode::FAILURE;
        }
    };
    info!(input = %config.input(), "session started");

    let registry = Registry::<Car>::new();
    let mut session = Session::new(registry, io::stdout().lock());
    let result = session.run(input);
    let (registry, _) = session.into_parts();
    info!(
        capacity = registry.capacity().value(),
        occupied = registry.iter_occupied().count(),
        "session finished"
    );
    match result {
        Ok(SessionEnd::Exited) | Ok(SessionEnd::EndOfInput) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
