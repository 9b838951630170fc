// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown building '{0}'")]
    UnknownBuilding(String),
    #[error("Flat number '{number}' already exists in {building}")]
    DuplicateFlatNumber { building: String, number: String },
    #[error("Invalid stored value '{value}' in column {column}")]
    Corrupt { column: &'static str, value: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not implemented - {0}")]
    NotImplemented(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid amount")]
    Amount,
    #[error("Please select a category")]
    Category,
    #[error("Please select a date")]
    Date,
    #[error("Please select a payment method")]
    PaymentMethod,
    #[error("Flat number is required")]
    FlatNumber,
    #[error("Floor must be 1 or higher")]
    Floor,
    #[error("Monthly rent cannot be negative")]
    Rent,
    #[error("Invalid month '{0}', expected YYYY-MM")]
    Month(String),
    #[error("Expense type name cannot be empty")]
    ExpenseType,
}
