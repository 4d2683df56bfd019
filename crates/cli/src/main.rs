// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use spoolrs::Cli;

fn main() {
    let cli = Cli::parse();
    spoolrs::logging::init();
    if let Err(e) = spoolrs::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
