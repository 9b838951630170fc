// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod buildings;
pub mod expenses;
pub mod reports;
pub mod flats;
pub mod rent;
pub mod settings;
pub mod exporter;
pub mod shell;

use crate::session::Session;
use anyhow::Result;

/// Runs one parsed command line against `session`. Returns `false` when no
/// known subcommand was given.
pub fn dispatch(session: &mut Session, matches: &clap::ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("buildings", sub)) => buildings::handle(sub)?,
        Some(("expense", sub)) => expenses::handle(session, sub)?,
        Some(("report", sub)) => reports::handle(session, sub)?,
        Some(("flat", sub)) => flats::handle(session, sub)?,
        Some(("rent", sub)) => rent::handle(session, sub)?,
        Some(("settings", sub)) => settings::handle(session, sub)?,
        Some(("export", sub)) => exporter::handle(session, sub)?,
        Some(("shell", _)) => shell::run(session)?,
        _ => return Ok(false),
    }
    Ok(true)
}
