// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejection kinds for ledger mutations. Callers pick message handling by
/// kind: validation and business-rule rejections happen before any write,
/// not-found never mutates.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input: negative amount, non-positive limit, duplicate
    /// budget category.
    #[error("{0}")]
    Validation(String),

    /// A well-formed request the business rules refuse: expense past the
    /// balance, expense past a budget limit, budget created under water.
    #[error("{0}")]
    Rejected(String),

    /// The record does not exist or belongs to another user.
    #[error("{0} not found")]
    NotFound(String),
}
