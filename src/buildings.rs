// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::Building;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

pub const DEFAULT_BUILDING: &str = "bin-ehsan-1";

pub static BUILDINGS: Lazy<Vec<Building>> = Lazy::new(|| {
    vec![
        Building {
            id: "bin-ehsan-1",
            display_name: "Bin Ehsan 1",
            address: "Block A, Gulshan-e-Iqbal",
            unit_count: 12,
            established_year: 2018,
            color_theme: "cyan",
            seed: 1001,
            expense_multiplier: Decimal::ONE,
        },
        Building {
            id: "bin-ehsan-2",
            display_name: "Bin Ehsan 2",
            address: "Block B, Gulshan-e-Iqbal",
            unit_count: 16,
            established_year: 2020,
            color_theme: "emerald",
            seed: 2002,
            expense_multiplier: Decimal::new(125, 2),
        },
        Building {
            id: "bin-ehsan-3",
            display_name: "Bin Ehsan 3",
            address: "Block C, Gulshan-e-Iqbal",
            unit_count: 20,
            established_year: 2023,
            color_theme: "violet",
            seed: 3003,
            expense_multiplier: Decimal::new(150, 2),
        },
    ]
});

pub fn building(id: &str) -> Result<&'static Building, StoreError> {
    BUILDINGS
        .iter()
        .find(|b| b.id == id.trim())
        .ok_or_else(|| StoreError::UnknownBuilding(id.to_string()))
}
