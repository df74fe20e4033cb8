// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Table configuration of each list page.

use tracker_app::EntryKind;

use crate::{FilterSpec, SortConfig, TableConfig};

pub const USER_FILTER_ID: &str = "user-filter";
pub const STATUS_FILTER_ID: &str = "status-filter";
pub const CATEGORY_FILTER_ID: &str = "type-filter";
pub const SEARCH_FILTER_ID: &str = "search-filter";

const READING_COLUMNS: &[&str] = &[
    "Title",
    "Author",
    "Type",
    "Status",
    "Progress",
    "Started",
    "Completed",
    "Person",
];
const DRAWING_COLUMNS: &[&str] = &[
    "Title", "Subject", "Medium", "Status", "Hours", "Sessions", "Date", "Person",
];
const FITNESS_COLUMNS: &[&str] = &[
    "Title",
    "Activity",
    "Date",
    "Minutes",
    "Distance",
    "Intensity",
    "Status",
    "Person",
];

/// The list page table for `kind`. Person options depend on the users of the
/// instance; hosts fill them in with [`TableConfig::set_options`].
pub fn table_for(kind: EntryKind) -> TableConfig {
    let (columns, sort, category_label) = match kind {
        EntryKind::Reading => (READING_COLUMNS, SortConfig::new([5, 6], [4]), "Type"),
        EntryKind::Drawing => (DRAWING_COLUMNS, SortConfig::new([6], [4, 5]), "Medium"),
        EntryKind::Fitness => (FITNESS_COLUMNS, SortConfig::new([2], [3, 4]), "Activity"),
    };

    TableConfig::new(
        format!("{kind}-table-body"),
        format!("{kind}-count"),
        format!("{kind}-active-filters"),
    )
    .with_filter(FilterSpec::select(USER_FILTER_ID, "user", "Person"))
    .with_filter(
        FilterSpec::select(STATUS_FILTER_ID, "status", "Status")
            .with_options(kind.status_options()),
    )
    .with_filter(
        FilterSpec::select(CATEGORY_FILTER_ID, "type", category_label)
            .with_options(kind.category_options()),
    )
    .with_filter(FilterSpec::search(SEARCH_FILTER_ID, "search", "Search"))
    .with_columns(columns.iter().copied())
    .with_sort(sort)
}
