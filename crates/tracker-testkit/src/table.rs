// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::{BTreeMap, BTreeSet};
use tracker_app::SortDirection;
use tracker_table::{
    DetailId, FilterChip, RowId, RowPlacement, TableConfig, TableRow, TableSurface,
};

/// A rendered list page held in memory. Every piece of optional markup can be
/// removed to exercise the engine's no-op paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSurface {
    body_id: Option<String>,
    counter_id: Option<String>,
    chips_id: Option<String>,
    controls: BTreeMap<String, String>,
    rows: Vec<TableRow>,
    hidden: BTreeSet<RowId>,
    details: BTreeMap<DetailId, bool>,
    order: Vec<RowPlacement>,
    counter: Option<(usize, usize)>,
    chips: Vec<FilterChip>,
    no_results: Option<bool>,
    indicators: BTreeMap<usize, SortDirection>,
}

impl MemoryTableSurface {
    /// Page with every element `config` refers to, all filter controls empty.
    pub fn for_config(config: &TableConfig) -> Self {
        Self {
            body_id: Some(config.body_id.clone()),
            counter_id: Some(config.counter_id.clone()),
            chips_id: Some(config.chips_id.clone()),
            controls: config
                .filters
                .iter()
                .map(|filter| (filter.id.clone(), String::new()))
                .collect(),
            no_results: Some(false),
            ..Self::default()
        }
    }

    /// Appends rows and a hidden detail row for each row that pairs with one.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        for row in rows {
            self.order.push(RowPlacement::Row(row.id.clone()));
            if let Some(detail) = row.detail_id() {
                self.details.insert(detail.clone(), false);
                self.order.push(RowPlacement::Detail(detail));
            }
            self.rows.push(row);
        }
        self
    }

    /// Appends rows without creating their detail rows.
    pub fn with_bare_rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        for row in rows {
            self.order.push(RowPlacement::Row(row.id.clone()));
            self.rows.push(row);
        }
        self
    }

    pub fn without_body(mut self) -> Self {
        self.body_id = None;
        self
    }

    pub fn without_counter(mut self) -> Self {
        self.counter_id = None;
        self
    }

    pub fn without_chips(mut self) -> Self {
        self.chips_id = None;
        self
    }

    pub fn without_control(mut self, filter_id: &str) -> Self {
        self.controls.remove(filter_id);
        self
    }

    pub fn without_no_results(mut self) -> Self {
        self.no_results = None;
        self
    }

    /// Types or selects a value in a filter control; false when absent.
    pub fn set_filter(&mut self, filter_id: &str, value: &str) -> bool {
        match self.controls.get_mut(filter_id) {
            Some(control) => {
                *control = value.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn control(&self, filter_id: &str) -> Option<&str> {
        self.controls.get(filter_id).map(String::as_str)
    }

    pub fn is_row_visible(&self, row: &str) -> bool {
        !self.hidden.contains(&RowId::new(row))
    }

    /// Ids of visible rows in body order.
    pub fn visible_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| !self.hidden.contains(&row.id))
            .map(|row| row.id.to_string())
            .collect()
    }

    pub fn is_detail_visible(&self, detail: &str) -> Option<bool> {
        self.details.get(&DetailId::new(detail)).copied()
    }

    /// Body children in order, row and detail ids alike.
    pub fn body_order(&self) -> Vec<String> {
        self.order
            .iter()
            .map(|placement| match placement {
                RowPlacement::Row(row) => row.to_string(),
                RowPlacement::Detail(detail) => detail.to_string(),
            })
            .collect()
    }

    /// Text of one column for every row, in body order.
    pub fn column(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.cell(column).unwrap_or_default().to_owned())
            .collect()
    }

    pub fn counter(&self) -> Option<(usize, usize)> {
        self.counter
    }

    pub fn chips(&self) -> &[FilterChip] {
        &self.chips
    }

    pub fn no_results_shown(&self) -> bool {
        self.no_results.unwrap_or(false)
    }

    pub fn sort_indicator(&self, column: usize) -> Option<SortDirection> {
        self.indicators.get(&column).copied()
    }

    fn has(&self, slot: &Option<String>, id: &str) -> bool {
        slot.as_deref() == Some(id)
    }
}

impl TableSurface for MemoryTableSurface {
    fn filter_value(&self, filter_id: &str) -> Option<String> {
        self.controls.get(filter_id).cloned()
    }

    fn clear_filter(&mut self, filter_id: &str) -> bool {
        self.set_filter(filter_id, "")
    }

    fn rows(&self, body_id: &str) -> Option<Vec<TableRow>> {
        self.has(&self.body_id, body_id).then(|| self.rows.clone())
    }

    fn set_row_visible(&mut self, row: &RowId, visible: bool) {
        if visible {
            self.hidden.remove(row);
        } else {
            self.hidden.insert(row.clone());
        }
    }

    fn detail_visible(&self, detail: &DetailId) -> Option<bool> {
        self.details.get(detail).copied()
    }

    fn set_detail_visible(&mut self, detail: &DetailId, visible: bool) {
        if let Some(shown) = self.details.get_mut(detail) {
            *shown = visible;
        }
    }

    fn place_rows(&mut self, body_id: &str, order: &[RowPlacement]) {
        if !self.has(&self.body_id, body_id) {
            return;
        }
        let mut by_id: BTreeMap<RowId, TableRow> = self
            .rows
            .drain(..)
            .map(|row| (row.id.clone(), row))
            .collect();
        for placement in order {
            if let RowPlacement::Row(id) = placement
                && let Some(row) = by_id.remove(id)
            {
                self.rows.push(row);
            }
        }
        // Rows missing from `order` go last, in id order.
        self.rows.extend(by_id.into_values());
        self.order = order.to_vec();
    }

    fn set_result_count(&mut self, counter_id: &str, visible: usize, total: usize) -> bool {
        if !self.has(&self.counter_id, counter_id) {
            return false;
        }
        self.counter = Some((visible, total));
        true
    }

    fn render_chips(&mut self, chips_id: &str, chips: &[FilterChip]) -> bool {
        if !self.has(&self.chips_id, chips_id) {
            return false;
        }
        self.chips = chips.to_vec();
        true
    }

    fn set_no_results(&mut self, shown: bool) -> bool {
        match self.no_results.as_mut() {
            Some(current) => {
                *current = shown;
                true
            }
            None => false,
        }
    }

    fn set_sort_indicator(&mut self, column: usize, direction: Option<SortDirection>) {
        match direction {
            Some(direction) => {
                self.indicators.insert(column, direction);
            }
            None => {
                self.indicators.remove(&column);
            }
        }
    }
}
