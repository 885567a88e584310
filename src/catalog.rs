// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use once_cell::sync::Lazy;

/// A built-in catalog entry. Users may persist additional categories; the
/// defaults below are what a fresh install ships with.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub kind: TxKind,
}

pub static DEFAULT_CATEGORIES: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    vec![
        CatalogEntry { name: "Food & Dining", icon: "🍔", color: "#f59e0b", kind: TxKind::Expense },
        CatalogEntry { name: "Transportation", icon: "🚗", color: "#3b82f6", kind: TxKind::Expense },
        CatalogEntry { name: "Shopping", icon: "🛍️", color: "#ec4899", kind: TxKind::Expense },
        CatalogEntry { name: "Entertainment", icon: "🎬", color: "#8b5cf6", kind: TxKind::Expense },
        CatalogEntry { name: "Bills & Utilities", icon: "🧾", color: "#10b981", kind: TxKind::Expense },
        CatalogEntry { name: "Healthcare", icon: "🏥", color: "#ef4444", kind: TxKind::Expense },
        CatalogEntry { name: "Salary", icon: "💼", color: "#10b981", kind: TxKind::Income },
        CatalogEntry { name: "Other", icon: "📦", color: "#6b7280", kind: TxKind::Expense },
    ]
});

const FALLBACK_ICON: &str = "📦";
const FALLBACK_COLOR: &str = "#6b7280";

pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    DEFAULT_CATEGORIES.iter().find(|c| c.name == name)
}

pub fn icon_for(name: &str) -> &'static str {
    lookup(name).map(|c| c.icon).unwrap_or(FALLBACK_ICON)
}

pub fn color_for(name: &str) -> &'static str {
    lookup(name).map(|c| c.color).unwrap_or(FALLBACK_COLOR)
}
