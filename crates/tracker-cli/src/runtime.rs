// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tracker_table::{
    DetailId, FilterChip, FilterableTable, RowId, RowPlacement, TableCommand, TableConfig,
    TableRow, TableStatus, TableSurface,
};

/// A list page captured as JSON: the rendered rows, the detail rows present in
/// the body, and whatever the filter controls held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub details: Vec<DetailId>,
}

impl PageSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read page snapshot {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| {
            format!(
                "decode page snapshot {}; expected an object with a \"rows\" array",
                path.display()
            )
        })
    }
}

/// Table surface over a snapshot. Detail rows follow their row in the body.
pub struct SnapshotSurface {
    body_id: String,
    counter_id: String,
    chips_id: String,
    controls: BTreeMap<String, String>,
    rows: Vec<TableRow>,
    hidden: BTreeSet<RowId>,
    details: BTreeMap<DetailId, bool>,
    counter: Option<(usize, usize)>,
    chips: Vec<FilterChip>,
    no_results: bool,
}

impl SnapshotSurface {
    pub fn new(config: &TableConfig, snapshot: PageSnapshot) -> Self {
        let mut controls: BTreeMap<String, String> = config
            .filters
            .iter()
            .map(|filter| (filter.id.clone(), String::new()))
            .collect();
        for (id, value) in snapshot.filters {
            match controls.get_mut(&id) {
                Some(control) => *control = value,
                None => debug!(filter = %id, "snapshot filter has no control on this page"),
            }
        }

        Self {
            body_id: config.body_id.clone(),
            counter_id: config.counter_id.clone(),
            chips_id: config.chips_id.clone(),
            controls,
            rows: snapshot.rows,
            hidden: BTreeSet::new(),
            details: snapshot
                .details
                .into_iter()
                .map(|detail| (detail, false))
                .collect(),
            counter: None,
            chips: Vec::new(),
            no_results: false,
        }
    }

    pub fn set_control(&mut self, filter_id: &str, value: &str) -> bool {
        match self.controls.get_mut(filter_id) {
            Some(control) => {
                *control = value.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|row| !self.hidden.contains(&row.id))
    }
}

impl TableSurface for SnapshotSurface {
    fn filter_value(&self, filter_id: &str) -> Option<String> {
        self.controls.get(filter_id).cloned()
    }

    fn clear_filter(&mut self, filter_id: &str) -> bool {
        self.set_control(filter_id, "")
    }

    fn rows(&self, body_id: &str) -> Option<Vec<TableRow>> {
        (body_id == self.body_id).then(|| self.rows.clone())
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
        if body_id != self.body_id {
            return;
        }
        // Snapshot detail rows are not rendered, so only master rows move.
        let position: BTreeMap<&RowId, usize> = order
            .iter()
            .filter_map(|placement| match placement {
                RowPlacement::Row(id) => Some(id),
                RowPlacement::Detail(_) => None,
            })
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let mut rows = std::mem::take(&mut self.rows);
        rows.sort_by_key(|row| position.get(&row.id).copied().unwrap_or(usize::MAX));
        self.rows = rows;
    }

    fn set_result_count(&mut self, counter_id: &str, visible: usize, total: usize) -> bool {
        if counter_id != self.counter_id {
            return false;
        }
        self.counter = Some((visible, total));
        true
    }

    fn render_chips(&mut self, chips_id: &str, chips: &[FilterChip]) -> bool {
        if chips_id != self.chips_id {
            return false;
        }
        self.chips = chips.to_vec();
        true
    }

    fn set_no_results(&mut self, shown: bool) -> bool {
        self.no_results = shown;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// What the page shows after filters and sorts ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReport {
    pub rows: Vec<ReportRow>,
    pub chips: Vec<FilterChip>,
    pub visible: usize,
    pub total: usize,
    pub no_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    pub messages: Vec<String>,
}

impl TableReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.cells.join(" | "));
            out.push('\n');
        }
        if self.no_results {
            out.push_str("(no matching entries)\n");
        }
        if !self.chips.is_empty() {
            let chips: Vec<&str> = self.chips.iter().map(|chip| chip.display.as_str()).collect();
            out.push_str(&format!("filters: {}\n", chips.join(", ")));
        }
        if let Some(sort) = &self.sort {
            out.push_str(&format!("{sort}\n"));
        }
        out.push_str(&format!("{} of {} entries\n", self.visible, self.total));
        out
    }
}

/// Filters and sorts to run over a snapshot, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRequest {
    pub filters: Vec<(String, String)>,
    pub sorts: Vec<String>,
}

pub fn run_table(
    config: TableConfig,
    snapshot: PageSnapshot,
    request: &TableRequest,
) -> Result<TableReport> {
    let mut surface = SnapshotSurface::new(&config, snapshot);
    for (filter_id, value) in &request.filters {
        if !surface.set_control(filter_id, value) {
            let known: Vec<&str> = config.filters.iter().map(|f| f.id.as_str()).collect();
            bail!(
                "unknown filter {filter_id:?}; this page has: {}",
                known.join(", ")
            );
        }
    }

    let columns = request
        .sorts
        .iter()
        .map(|column| resolve_column(&config, column))
        .collect::<Result<Vec<_>>>()?;

    let mut table = FilterableTable::new(config, surface);
    let mut messages = vec![table.handle(TableCommand::ApplyFilters)];
    let mut sort = None;
    for column in columns {
        let status = table.handle(TableCommand::Sort(column));
        sort = Some(status.clone().message());
        messages.push(status);
    }
    info!(
        sorts = request.sorts.len(),
        filters = request.filters.len(),
        "table snapshot processed"
    );

    let surface = table.into_surface();
    let (visible, total) = surface.counter.unwrap_or_default();
    Ok(TableReport {
        rows: surface
            .visible_rows()
            .map(|row| ReportRow {
                id: row.id.to_string(),
                cells: row.cells.clone(),
            })
            .collect(),
        chips: surface.chips.clone(),
        visible,
        total,
        no_results: surface.no_results,
        sort,
        messages: messages.into_iter().map(TableStatus::message).collect(),
    })
}

/// Column by label (case-insensitive) or by zero-based index.
fn resolve_column(config: &TableConfig, column: &str) -> Result<usize> {
    let wanted = column.trim();
    if let Some(index) = config
        .columns
        .iter()
        .position(|label| label.eq_ignore_ascii_case(wanted))
    {
        return Ok(index);
    }
    match wanted.parse::<usize>() {
        Ok(index) if index < config.columns.len() || config.columns.is_empty() => Ok(index),
        _ => bail!(
            "unknown column {column:?}; use a header ({}) or a zero-based index",
            config.columns.join(", ")
        ),
    }
}
