// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cmd::{DEFAULT_STATE_FILE, Session};
use diagnostics::log_info;
use treefs::{DuplicateNames, Namespace, NamespaceConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "treefs")]
struct Cli {
    /// Snapshot file used by --load, --save and the state commands
    #[arg(long, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    /// Load the snapshot file before reading commands
    #[arg(long)]
    load: bool,

    /// Save the namespace to the snapshot file when the session ends
    #[arg(long)]
    save: bool,

    /// Allow several entries with the same name in one directory
    #[arg(long)]
    allow_duplicates: bool,

    /// Report failed commands on stderr
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    diagnostics::init_diagnostics();
    let cli = Cli::parse();

    let config = NamespaceConfig {
        duplicate_names: if cli.allow_duplicates {
            DuplicateNames::Allow
        } else {
            DuplicateNames::Reject
        },
    };
    let mut ns = Namespace::with_config(config);
    if cli.load {
        ns.load_state(&cli.state)
            .with_context(|| format!("loading {}", cli.state.display()))?;
    }

    let shown = cli.state.display().to_string();
    log_info!("session started, state file {state}", state: shown.as_str());

    let mut session = Session::new(ns)
        .with_state_file(cli.state.clone())
        .strict(cli.strict);
    session.run(io::stdin().lock(), &mut io::stdout().lock(), &mut io::stderr().lock())?;

    if cli.save {
        session
            .namespace()
            .save_state(&cli.state)
            .with_context(|| format!("saving {}", cli.state.display()))?;
    }
    Ok(())
}
