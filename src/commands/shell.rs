// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented session so edits survive between commands.

use crate::cli;
use crate::session::Session;
use crate::utils::split_command_line;
use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use std::io::{self, BufRead, Write};

const SHELL_HELP: &str = "\
Any rentbook command without the program name, plus:
  use <building>   switch building
  refresh          drop edits and regenerate the building's data
  help             this text (use `help <command>` for command help)
  exit | quit      leave the shell";

pub fn run(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    run_lines(session, stdin.lock(), true)
}

/// Feeds each line to [`run_line`]. Errors are reported and the loop keeps
/// going; it ends on `exit` or end of input.
pub fn run_lines<R: BufRead>(session: &mut Session, input: R, prompt: bool) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if prompt {
            print!("{}> ", session.building_id());
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        match run_line(session, &line?) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }
    Ok(())
}

/// Runs one shell line. Returns `false` when the shell should exit.
pub fn run_line(session: &mut Session, line: &str) -> Result<bool> {
    let args = split_command_line(line)?;
    let Some(first) = args.first() else {
        return Ok(true);
    };
    match first.as_str() {
        "exit" | "quit" => return Ok(false),
        "use" => {
            let Some(id) = args.get(1) else {
                bail!("usage: use <building>");
            };
            let b = session.select(id)?;
            println!("Now managing {}", b.display_name);
            return Ok(true);
        }
        "refresh" => {
            session.store.reset(session.building_id())?;
            println!("Reloaded {}", session.building_id());
            return Ok(true);
        }
        "help" if args.len() == 1 => {
            println!("{}", SHELL_HELP);
            return Ok(true);
        }
        "shell" => {
            println!("Already in a shell");
            return Ok(true);
        }
        _ => {}
    }

    let matches = match cli::build_cli()
        .try_get_matches_from(std::iter::once("rentbook".to_string()).chain(args))
    {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", e);
            return Ok(true);
        }
        Err(e) => return Err(e.into()),
    };
    if matches.get_one::<String>("today").is_some() {
        tracing::warn!("--today is fixed for the shell session; ignoring");
    }

    // A `--building` on the line applies to that line only.
    let explicit = match matches.value_source("building") {
        Some(ValueSource::CommandLine) => matches.get_one::<String>("building").cloned(),
        _ => None,
    };
    let Some(id) = explicit else {
        super::dispatch(session, &matches)?;
        return Ok(true);
    };
    let previous = session.building_id().to_string();
    session.select(&id)?;
    let result = super::dispatch(session, &matches);
    session.select(&previous)?;
    result?;
    Ok(true)
}
