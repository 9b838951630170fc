// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Deterministic sample data for a building.
//!
//! Every random draw advances a per-pass offset, so the same seed and the
//! same `today` always reproduce the same expenses, flats and payments.

use crate::models::{
    Building, Expense, ExpenseCategory, Flat, FlatType, PaymentMethod, RentPayment, RentStatus,
};
use crate::utils::{days_in_month, month_key, month_start_back};
use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// `frac(sin(seed + offset) * 10000)` with one fresh offset per draw.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    offset: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, offset: 0 }
    }

    #[cfg(test)]
    fn offset(&self) -> u64 {
        self.offset
    }

    pub fn next_f64(&mut self) -> f64 {
        let x = ((self.seed + self.offset) as f64).sin() * 10000.0;
        self.offset += 1;
        x - x.floor()
    }

    /// Integer in `[min, max)`; returns `min` for an empty range.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        let r = self.next_f64();
        if max <= min {
            return min;
        }
        let v = min + (r * (max - min) as f64).floor() as i64;
        v.min(max - 1)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.range(0, items.len() as i64) as usize]
    }
}

#[derive(Debug, Clone)]
pub struct RecurringCharge {
    pub category: ExpenseCategory,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub months: u32,
    pub recurring: Vec<RecurringCharge>,
    pub repair_range: (i64, i64),
    pub maintenance_range: (i64, i64),
    pub occupancy_rate: f64,
    pub payment_seed_offset: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let charge = |category, min, max| RecurringCharge { category, min, max };
        Self {
            months: 6,
            recurring: vec![
                charge(ExpenseCategory::Electricity, 25_000, 45_000),
                charge(ExpenseCategory::Water, 8_000, 15_000),
                charge(ExpenseCategory::Cleaning, 15_000, 20_000),
                charge(ExpenseCategory::Security, 35_000, 45_000),
                charge(ExpenseCategory::Lift, 5_000, 8_000),
            ],
            repair_range: (5_000, 25_000),
            maintenance_range: (3_000, 18_000),
            occupancy_rate: 0.7,
            payment_seed_offset: 500,
        }
    }
}

fn category_notes(category: ExpenseCategory) -> &'static [&'static str] {
    match category {
        ExpenseCategory::Electricity => &[
            "Monthly K-Electric bill",
            "Electricity bill - peak hours adjustment",
            "Common areas electricity",
        ],
        ExpenseCategory::Water => &[
            "Monthly KWSB bill",
            "Water tanker service",
            "Water supply charges",
        ],
        ExpenseCategory::Maintenance => &[
            "General maintenance",
            "Building upkeep",
            "Monthly maintenance work",
        ],
        ExpenseCategory::Cleaning => &[
            "Monthly cleaning service",
            "Deep cleaning service",
            "Cleaning supplies",
        ],
        ExpenseCategory::Security => &[
            "Security guard salaries",
            "Security service charges",
            "Security equipment",
        ],
        ExpenseCategory::Repairs => &["Repair work", "Emergency repairs", "Scheduled repairs"],
        ExpenseCategory::Lift => &[
            "Elevator maintenance",
            "Lift service charges",
            "Elevator inspection",
        ],
        ExpenseCategory::Other => &[
            "Miscellaneous expenses",
            "Administrative costs",
            "Other building expenses",
        ],
    }
}

const REPAIR_NOTES: &[&str] = &[
    "Water pump motor repair",
    "Electrical panel repair",
    "Plumbing fixes - 3rd floor",
    "Gate motor replacement",
    "Intercom system repair",
    "Water tank cleaning and repair",
    "Roof waterproofing",
    "Boundary wall repair",
    "Parking area repairs",
    "Staircase railing repair",
];

const MAINTENANCE_NOTES: &[&str] = &[
    "Garden maintenance",
    "Pest control service",
    "Fire extinguisher refill",
    "Common area painting",
    "Water tank cleaning",
    "Drainage cleaning",
    "Generator maintenance",
    "CCTV maintenance",
    "Building inspection",
    "Emergency light batteries",
];

const FIRST_NAMES: &[&str] = &[
    "Ahmed", "Ali", "Fatima", "Ayesha", "Hassan", "Zainab", "Usman", "Sana", "Bilal", "Hira",
    "Imran", "Maryam",
];

const LAST_NAMES: &[&str] = &[
    "Khan", "Ahmed", "Siddiqui", "Qureshi", "Malik", "Hussain", "Sheikh", "Raza", "Baig", "Iqbal",
];

const REGULAR_TYPES: &[FlatType] = &[
    FlatType::Studio,
    FlatType::OneBed,
    FlatType::TwoBed,
    FlatType::ThreeBed,
];

pub fn rent_for(flat_type: FlatType) -> Decimal {
    match flat_type {
        FlatType::Studio => Decimal::from(25_000),
        FlatType::OneBed => Decimal::from(35_000),
        FlatType::TwoBed => Decimal::from(50_000),
        FlatType::ThreeBed => Decimal::from(70_000),
        FlatType::Penthouse => Decimal::from(120_000),
    }
}

fn day_in(month_start: NaiveDate, day: i64) -> NaiveDate {
    let last = days_in_month(month_start);
    let day = (day.max(1) as u32).min(last);
    month_start.with_day(day).unwrap_or(month_start)
}

/// Six months (by default) of recurring bills plus one to three ad-hoc
/// repair/maintenance records per month, newest first. Records dated after
/// `today` are drawn but dropped so the stream stays aligned.
pub fn generate_expenses(
    building: &Building,
    today: NaiveDate,
    cfg: &GeneratorConfig,
) -> Vec<Expense> {
    let mut rng = SeededRng::new(building.seed);
    let mut out = Vec::new();

    for m in 0..cfg.months {
        let month_start = month_start_back(today, m);

        for (index, charge) in cfg.recurring.iter().enumerate() {
            let date = day_in(month_start, rng.range(1, 26));
            let raw = rng.range(charge.min, charge.max);
            let payment_method = *rng.pick(PaymentMethod::ALL);
            let note = *rng.pick(category_notes(charge.category));
            if date <= today {
                out.push(Expense {
                    id: format!("{}-exp-{}-{}", building.id, m, index),
                    amount: scale(raw, building.expense_multiplier),
                    category: charge.category,
                    date,
                    payment_method,
                    notes: Some(note.to_string()),
                    created_at: date.and_time(NaiveTime::MIN).and_utc(),
                });
            }
        }

        let extras = rng.range(1, 4);
        for r in 0..extras {
            let is_repair = rng.next_f64() > 0.5;
            let date = day_in(month_start, rng.range(1, 29));
            let ((min, max), category, pool) = if is_repair {
                (cfg.repair_range, ExpenseCategory::Repairs, REPAIR_NOTES)
            } else {
                (
                    cfg.maintenance_range,
                    ExpenseCategory::Maintenance,
                    MAINTENANCE_NOTES,
                )
            };
            let raw = rng.range(min, max);
            let payment_method = *rng.pick(PaymentMethod::ALL);
            let note = *rng.pick(pool);
            if date <= today {
                out.push(Expense {
                    id: format!("{}-exp-{}-extra-{}", building.id, m, r),
                    amount: scale(raw, building.expense_multiplier),
                    category,
                    date,
                    payment_method,
                    notes: Some(note.to_string()),
                    created_at: date.and_time(NaiveTime::MIN).and_utc(),
                });
            }
        }
    }

    out.sort_by(|a, b| b.date.cmp(&a.date));
    tracing::debug!(building = building.id, count = out.len(), "generated expenses");
    out
}

fn scale(raw: i64, multiplier: Decimal) -> Decimal {
    (Decimal::from(raw) * multiplier).round()
}

/// Two flats per floor, numbered `<floor>0<n>`, with the last flat alone on
/// the top floor as the penthouse.
pub fn generate_flats(building: &Building, count: u32, cfg: &GeneratorConfig) -> Vec<Flat> {
    let mut rng = SeededRng::new(building.seed);
    let top_floor = count / 2 + 1;
    let mut flats = Vec::with_capacity(count as usize);

    for i in 0..count {
        let is_top = i + 1 == count;
        let (floor, index) = if is_top {
            (top_floor, 0)
        } else {
            (i / 2 + 1, i % 2)
        };
        let flat_number = format!("{}0{}", floor, index + 1);
        let flat_type = if is_top {
            FlatType::Penthouse
        } else {
            *rng.pick(REGULAR_TYPES)
        };
        let occupied = rng.next_f64() < cfg.occupancy_rate;
        let (tenant_name, tenant_phone) = if occupied {
            let first = rng.pick(FIRST_NAMES);
            let last = rng.pick(LAST_NAMES);
            let phone = format!(
                "03{:02}-{:07}",
                rng.range(0, 50),
                rng.range(0, 10_000_000)
            );
            (Some(format!("{} {}", first, last)), Some(phone))
        } else {
            (None, None)
        };

        flats.push(Flat {
            id: format!("{}-flat-{}", building.id, flat_number),
            flat_number,
            floor,
            r#type: flat_type,
            is_occupied: tenant_name.is_some(),
            tenant_name,
            tenant_phone,
            monthly_rent: rent_for(flat_type),
        });
    }
    tracing::debug!(building = building.id, count = flats.len(), "generated flats");
    flats
}

fn partial_amount(rent: Decimal, pct: i64) -> Decimal {
    (rent * Decimal::from(pct) / Decimal::from(100)).round()
}

/// Rent history for every occupied flat over the trailing months.
///
/// The current month may be paid, pending, partial or overdue. Past months
/// are mostly paid on time; the rest are partial or paid late in the
/// following month, never left overdue.
pub fn generate_rent_payments(
    building: &Building,
    flats: &[Flat],
    today: NaiveDate,
    cfg: &GeneratorConfig,
) -> Vec<RentPayment> {
    let mut rng = SeededRng::new(building.seed + cfg.payment_seed_offset);
    let mut out = Vec::new();

    for m in 0..cfg.months {
        let month_start = month_start_back(today, m);
        let month = month_key(month_start);

        for flat in flats.iter().filter(|f| f.is_occupied) {
            let rent = flat.monthly_rent;
            let r = rng.next_f64();
            let (status, amount, paid_date, notes) = if m == 0 {
                let latest = today.day() as i64 + 1;
                if r < 0.5 {
                    let day = day_in(month_start, rng.range(1, latest));
                    (RentStatus::Paid, rent, Some(day), None)
                } else if r < 0.7 {
                    (RentStatus::Pending, Decimal::ZERO, None, None)
                } else if r < 0.85 {
                    let amount = partial_amount(rent, rng.range(30, 71));
                    let day = day_in(month_start, rng.range(1, latest));
                    (
                        RentStatus::Partial,
                        amount,
                        Some(day),
                        Some("Partial payment received"),
                    )
                } else {
                    (RentStatus::Overdue, Decimal::ZERO, None, None)
                }
            } else if r < 0.85 {
                let day = day_in(month_start, rng.range(1, 11));
                (RentStatus::Paid, rent, Some(day), None)
            } else if r < 0.93 {
                let amount = partial_amount(rent, rng.range(30, 71));
                let day = day_in(month_start, rng.range(1, 29));
                (
                    RentStatus::Partial,
                    amount,
                    Some(day),
                    Some("Partial payment received"),
                )
            } else {
                let next_month = month_start_back(today, m - 1);
                let day = day_in(next_month, rng.range(1, 11)).min(today);
                (RentStatus::Paid, rent, Some(day), Some("Paid late"))
            };

            out.push(RentPayment {
                id: format!("{}-rent-{}", flat.id, month),
                flat_id: flat.id.clone(),
                amount,
                month: month.clone(),
                paid_date,
                status,
                notes: notes.map(str::to_string),
            });
        }
    }
    tracing::debug!(building = building.id, count = out.len(), "generated rent payments");
    out
}
