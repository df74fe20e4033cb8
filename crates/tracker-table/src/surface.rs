// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! The page as the table engine sees it.
//!
//! A `TableSurface` stands in for the rendered list page: filter controls,
//! the table body with its data and detail rows, the result counter, the chip
//! container and the optional no-results notice. Methods that address
//! optional markup report absence through their return value instead of
//! failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracker_app::{SortDirection, entry_id_from_action};

const DETAIL_ID_PREFIX: &str = "details-";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailId(String);

impl DetailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Conventional id of the detail row for an entry: `details-<id>`.
    pub fn for_entry(entry_id: i64) -> Self {
        Self(format!("{DETAIL_ID_PREFIX}{entry_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DetailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One data row of the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: RowId,
    /// Per-row data attributes, keyed by the name filters refer to.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Visible cell text in column order.
    #[serde(default)]
    pub cells: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailId>,
    /// Action target of a form embedded in the row, such as its delete button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl TableRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RowId::new(id),
            attrs: BTreeMap::new(),
            cells: Vec::new(),
            detail: None,
            action: None,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_cells<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.cells = cells.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(DetailId::new(detail));
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// The detail row paired with this row. A declared detail wins; otherwise
    /// the id is inferred from the trailing entry id of the embedded action.
    pub fn detail_id(&self) -> Option<DetailId> {
        if let Some(detail) = &self.detail {
            return Some(detail.clone());
        }
        self.action
            .as_deref()
            .and_then(entry_id_from_action)
            .map(DetailId::for_entry)
    }
}

/// One slot in the body order written back after a sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPlacement {
    Row(RowId),
    Detail(DetailId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub filter_id: String,
    pub label: String,
    pub value: String,
    /// Shown text, such as `Status: In Progress`.
    pub display: String,
}

/// What a click on a row landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Cell,
    Button,
    Link,
    Image,
    FormControl,
}

impl ClickTarget {
    pub const fn is_interactive(self) -> bool {
        !matches!(self, Self::Cell)
    }
}

pub trait TableSurface {
    /// Current value of a filter control, `None` when the control is absent.
    fn filter_value(&self, filter_id: &str) -> Option<String>;

    /// Resets a filter control to empty; false when the control is absent.
    fn clear_filter(&mut self, filter_id: &str) -> bool;

    /// Data rows of the body in display order, `None` when the body is absent.
    fn rows(&self, body_id: &str) -> Option<Vec<TableRow>>;

    fn set_row_visible(&mut self, row: &RowId, visible: bool);

    /// Visibility of a detail row, `None` when the page has no such row.
    fn detail_visible(&self, detail: &DetailId) -> Option<bool>;

    fn set_detail_visible(&mut self, detail: &DetailId, visible: bool);

    /// Re-appends body children in `order`.
    fn place_rows(&mut self, body_id: &str, order: &[RowPlacement]);

    /// False when the counter is absent.
    fn set_result_count(&mut self, counter_id: &str, visible: usize, total: usize) -> bool;

    /// False when the chip container is absent.
    fn render_chips(&mut self, chips_id: &str, chips: &[FilterChip]) -> bool;

    /// Shows or hides the no-results notice; false when the page has none.
    fn set_no_results(&mut self, _shown: bool) -> bool {
        false
    }

    /// Marks a column header sorted, or clears the mark with `None`.
    fn set_sort_indicator(&mut self, _column: usize, _direction: Option<SortDirection>) {}
}

impl<S: TableSurface + ?Sized> TableSurface for &mut S {
    fn filter_value(&self, filter_id: &str) -> Option<String> {
        (**self).filter_value(filter_id)
    }

    fn clear_filter(&mut self, filter_id: &str) -> bool {
        (**self).clear_filter(filter_id)
    }

    fn rows(&self, body_id: &str) -> Option<Vec<TableRow>> {
        (**self).rows(body_id)
    }

    fn set_row_visible(&mut self, row: &RowId, visible: bool) {
        (**self).set_row_visible(row, visible);
    }

    fn detail_visible(&self, detail: &DetailId) -> Option<bool> {
        (**self).detail_visible(detail)
    }

    fn set_detail_visible(&mut self, detail: &DetailId, visible: bool) {
        (**self).set_detail_visible(detail, visible);
    }

    fn place_rows(&mut self, body_id: &str, order: &[RowPlacement]) {
        (**self).place_rows(body_id, order);
    }

    fn set_result_count(&mut self, counter_id: &str, visible: usize, total: usize) -> bool {
        (**self).set_result_count(counter_id, visible, total)
    }

    fn render_chips(&mut self, chips_id: &str, chips: &[FilterChip]) -> bool {
        (**self).render_chips(chips_id, chips)
    }

    fn set_no_results(&mut self, shown: bool) -> bool {
        (**self).set_no_results(shown)
    }

    fn set_sort_indicator(&mut self, column: usize, direction: Option<SortDirection>) {
        (**self).set_sort_indicator(column, direction);
    }
}
