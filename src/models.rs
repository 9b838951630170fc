// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `as_str`, `label`, `ALL`, `Display` and `FromStr` for a
/// fieldless enum whose wire names are listed next to each variant.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Electricity,
    Water,
    Maintenance,
    Cleaning,
    Security,
    Repairs,
    Lift,
    Other,
}

wire_enum!(ExpenseCategory, "category", {
    Electricity => ("electricity", "Electricity"),
    Water => ("water", "Water"),
    Maintenance => ("maintenance", "Maintenance"),
    Cleaning => ("cleaning", "Cleaning"),
    Security => ("security", "Security"),
    Repairs => ("repairs", "Repairs"),
    Lift => ("lift", "Lift / Elevator"),
    Other => ("other", "Other"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Bank,
    Online,
}

wire_enum!(PaymentMethod, "payment method", {
    Cash => ("cash", "Cash"),
    Bank => ("bank", "Bank Transfer"),
    Online => ("online", "Online Payment"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlatType {
    #[serde(rename = "studio")]
    Studio,
    #[serde(rename = "1bed")]
    OneBed,
    #[serde(rename = "2bed")]
    TwoBed,
    #[serde(rename = "3bed")]
    ThreeBed,
    #[serde(rename = "penthouse")]
    Penthouse,
}

wire_enum!(FlatType, "flat type", {
    Studio => ("studio", "Studio"),
    OneBed => ("1bed", "1 Bedroom"),
    TwoBed => ("2bed", "2 Bedroom"),
    ThreeBed => ("3bed", "3 Bedroom"),
    Penthouse => ("penthouse", "Penthouse"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentStatus {
    Paid,
    Pending,
    Overdue,
    Partial,
}

wire_enum!(RentStatus, "rent status", {
    Paid => ("paid", "Paid"),
    Pending => ("pending", "Pending"),
    Overdue => ("overdue", "Overdue"),
    Partial => ("partial", "Partial"),
});

impl RentStatus {
    /// Statuses whose shortfall still counts towards what a tenant owes.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, RentStatus::Pending | RentStatus::Overdue | RentStatus::Partial)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw expense input as typed by a user, before validation.
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub amount: String,
    pub category: Option<ExpenseCategory>,
    pub date: String,
    pub payment_method: Option<PaymentMethod>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flat {
    pub id: String,
    pub flat_number: String,
    pub floor: u32,
    pub r#type: FlatType,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub monthly_rent: Decimal,
    pub is_occupied: bool,
}

#[derive(Debug, Clone)]
pub struct NewFlat {
    pub flat_number: String,
    pub floor: u32,
    pub r#type: FlatType,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub monthly_rent: Decimal,
}

impl NewFlat {
    pub fn into_flat(self, id: String) -> Flat {
        let tenant_name = normalize_tenant(self.tenant_name);
        Flat {
            id,
            flat_number: self.flat_number,
            floor: self.floor,
            r#type: self.r#type,
            is_occupied: tenant_name.is_some(),
            tenant_name,
            tenant_phone: normalize_tenant(self.tenant_phone),
            monthly_rent: self.monthly_rent,
        }
    }
}

/// Partial edit of a flat. Tenant fields use a nested option so that
/// `Some(None)` clears the value while `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct FlatUpdate {
    pub flat_number: Option<String>,
    pub floor: Option<u32>,
    pub r#type: Option<FlatType>,
    pub tenant_name: Option<Option<String>>,
    pub tenant_phone: Option<Option<String>>,
    pub monthly_rent: Option<Decimal>,
}

impl Flat {
    /// Merges `update` into this flat and recomputes occupancy from the tenant name.
    pub fn apply(&mut self, update: FlatUpdate) {
        if let Some(n) = update.flat_number {
            self.flat_number = n;
        }
        if let Some(f) = update.floor {
            self.floor = f;
        }
        if let Some(t) = update.r#type {
            self.r#type = t;
        }
        if let Some(name) = update.tenant_name {
            self.tenant_name = normalize_tenant(name);
        }
        if let Some(phone) = update.tenant_phone {
            self.tenant_phone = normalize_tenant(phone);
        }
        if let Some(rent) = update.monthly_rent {
            self.monthly_rent = rent;
        }
        self.is_occupied = self.tenant_name.is_some();
    }
}

// Blank strings from forms mean "no tenant".
fn normalize_tenant(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPayment {
    pub id: String,
    pub flat_id: String,
    pub amount: Decimal,
    pub month: String, // YYYY-MM
    pub paid_date: Option<NaiveDate>,
    pub status: RentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub flat_id: String,
    pub amount: Decimal,
    pub status: RentStatus,
    pub month: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: &'static str,
    pub display_name: &'static str,
    pub address: &'static str,
    pub unit_count: u32,
    pub established_year: i32,
    pub color_theme: &'static str,
    #[serde(skip)]
    pub seed: u64,
    /// Scales generated expense amounts; larger buildings spend more.
    #[serde(skip)]
    pub expense_multiplier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_current_month: Decimal,
    pub total_transactions: usize,
    pub highest_category: ExpenseCategory,
    pub highest_category_amount: Decimal,
    pub average_monthly: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub formatted_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatWithRent {
    #[serde(flatten)]
    pub flat: Flat,
    pub current_month_status: RentStatus,
    pub last_payment_date: Option<NaiveDate>,
    pub total_due: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalSummary {
    pub total_flats: usize,
    pub occupied_flats: usize,
    pub vacant_flats: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
    pub partial_count: usize,
    pub expected_rent: Decimal,
    pub collected_rent: Decimal,
    pub total_due: Decimal,
    pub collection_rate: u32,
}
