// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::buildings::BUILDINGS;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &*BUILDINGS)? {
        return Ok(());
    }
    let rows = BUILDINGS
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.display_name.to_string(),
                b.address.to_string(),
                b.unit_count.to_string(),
                b.established_year.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Name", "Address", "Units", "Since"], rows)
    );
    Ok(())
}
