// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Latency;
use crate::buildings::{building, DEFAULT_BUILDING};
use crate::utils::parse_date;
use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;

/// Settings resolved from global flags and their environment fallbacks.
#[derive(Debug, Clone)]
pub struct Config {
    pub building: String,
    pub today: NaiveDate,
    pub latency: Latency,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let building_id = m
            .get_one::<String>("building")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BUILDING.to_string());
        building(&building_id)?;
        let today = match m.get_one::<String>("today") {
            Some(s) => parse_date(s)?,
            None => chrono::Local::now().date_naive(),
        };
        let latency = match m.get_one::<u64>("latency-ms") {
            Some(ms) => Latency::uniform(Duration::from_millis(*ms)),
            None => Latency::default(),
        };
        Ok(Self {
            building: building_id,
            today,
            latency,
        })
    }
}
