// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, trace};
use tracker_app::SortDirection;

use crate::value::SortKey;
use crate::{
    ClickTarget, DetailId, FilterChip, FilterSpec, RowId, RowPlacement, TableConfig, TableRow,
    TableSurface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    /// Next state after selecting `column`: the same column flips direction,
    /// a new one starts ascending.
    pub fn select(current: Option<Self>, column: usize) -> Self {
        match current {
            Some(state) if state.column == column => Self {
                column,
                direction: state.direction.toggled(),
            },
            _ => Self {
                column,
                direction: SortDirection::Asc,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: usize,
    pub total: usize,
    pub chips: Vec<FilterChip>,
}

impl FilterOutcome {
    pub fn no_results(&self) -> bool {
        self.visible == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowToggle {
    Expanded(DetailId),
    Collapsed(DetailId),
    /// The click landed on a button, link, image or form control.
    Ignored,
    NoDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    ApplyFilters,
    RemoveChip(String),
    ClearAll,
    Sort(usize),
    ToggleRow { row: RowId, target: ClickTarget },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    TableMissing,
    Filtered { visible: usize, total: usize },
    NoResults { total: usize },
    FiltersCleared { visible: usize, total: usize },
    FilterUnknown(String),
    SortAsc(String),
    SortDesc(String),
    DetailShown,
    DetailHidden,
    NoDetail,
    ClickIgnored,
}

impl TableStatus {
    pub fn message(self) -> String {
        match self {
            Self::TableMissing => "table unavailable".to_owned(),
            Self::Filtered { visible, total } => format!("{visible} of {total} entries"),
            Self::NoResults { total } => format!("no entries match ({total} hidden)"),
            Self::FiltersCleared { visible, total } => {
                format!("filters cleared ({visible} of {total} entries)")
            }
            Self::FilterUnknown(id) => format!("unknown filter: {id}"),
            Self::SortAsc(column) => format!("sort {column} asc"),
            Self::SortDesc(column) => format!("sort {column} desc"),
            Self::DetailShown => "details shown".to_owned(),
            Self::DetailHidden => "details hidden".to_owned(),
            Self::NoDetail => "no details for row".to_owned(),
            Self::ClickIgnored => "click ignored".to_owned(),
        }
    }
}

/// Filter, chip, sort and detail-row behaviour for one rendered list.
pub struct FilterableTable<S> {
    config: TableConfig,
    surface: S,
    sort: Option<SortState>,
}

impl<S: TableSurface> FilterableTable<S> {
    pub fn new(config: TableConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            sort: None,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Active filters in configuration order with their applied values.
    pub fn active_filters(&self) -> Vec<(&FilterSpec, String)> {
        self.config
            .filters
            .iter()
            .filter_map(|filter| {
                let raw = self.surface.filter_value(&filter.id)?;
                filter.active_value(&raw).map(|value| (filter, value))
            })
            .collect()
    }

    pub fn filter(&mut self) -> FilterOutcome {
        let active: Vec<(FilterSpec, String)> = self
            .active_filters()
            .into_iter()
            .map(|(filter, value)| (filter.clone(), value))
            .collect();
        let chips = chips_for(&active);

        let Some(rows) = self.surface.rows(&self.config.body_id) else {
            debug!(body = %self.config.body_id, "table body missing; filter skipped");
            return FilterOutcome::default();
        };

        let total = rows.len();
        let mut visible = 0;
        for row in &rows {
            let shown = row_matches(row, &active);
            trace!(row = %row.id, shown, "filter row");
            self.surface.set_row_visible(&row.id, shown);
            if shown {
                visible += 1;
            } else if let Some(detail) = self.existing_detail(row) {
                self.surface.set_detail_visible(&detail, false);
            }
        }

        if !self
            .surface
            .set_result_count(&self.config.counter_id, visible, total)
        {
            debug!(counter = %self.config.counter_id, "result counter missing");
        }
        self.surface.set_no_results(visible == 0);
        if !self.surface.render_chips(&self.config.chips_id, &chips) {
            debug!(chips = %self.config.chips_id, "chip container missing");
        }

        FilterOutcome {
            visible,
            total,
            chips,
        }
    }

    /// Clears one filter control and filters again. Unknown ids leave the
    /// controls untouched.
    pub fn remove_chip(&mut self, filter_id: &str) -> FilterOutcome {
        if self.config.filter(filter_id).is_some() && !self.surface.clear_filter(filter_id) {
            debug!(filter = filter_id, "filter control missing");
        }
        self.filter()
    }

    pub fn clear_all(&mut self) -> FilterOutcome {
        for filter in &self.config.filters {
            self.surface.clear_filter(&filter.id);
        }
        self.filter()
    }

    /// Sorts body rows by `column`, keeping each detail row right after its
    /// data row. The sort is stable.
    pub fn sort(&mut self, column: usize) -> SortState {
        let state = SortState::select(self.sort, column);
        if let Some(previous) = self.sort
            && previous.column != column
        {
            self.surface.set_sort_indicator(previous.column, None);
        }
        self.sort = Some(state);
        self.surface.set_sort_indicator(column, Some(state.direction));

        let Some(rows) = self.surface.rows(&self.config.body_id) else {
            debug!(body = %self.config.body_id, "table body missing; sort skipped");
            return state;
        };

        let kind = self.config.column_kind(column);
        let mut keyed: Vec<(SortKey, TableRow)> = rows
            .into_iter()
            .map(|row| (SortKey::for_cell(kind, row.cell(column).unwrap_or("")), row))
            .collect();
        keyed.sort_by(|(left, _), (right, _)| match state.direction {
            SortDirection::Asc => left.compare(right),
            SortDirection::Desc => left.compare(right).reverse(),
        });

        let mut order = Vec::with_capacity(keyed.len() * 2);
        for (_, row) in &keyed {
            order.push(RowPlacement::Row(row.id.clone()));
            if let Some(detail) = self.existing_detail(row) {
                order.push(RowPlacement::Detail(detail));
            }
        }
        self.surface.place_rows(&self.config.body_id, &order);
        state
    }

    /// Toggles the detail row of `row` unless the click hit an interactive
    /// element.
    pub fn toggle_row(&mut self, row: &RowId, target: ClickTarget) -> RowToggle {
        if target.is_interactive() {
            return RowToggle::Ignored;
        }
        let Some(detail) = self
            .surface
            .rows(&self.config.body_id)
            .and_then(|rows| rows.into_iter().find(|candidate| &candidate.id == row))
            .and_then(|found| found.detail_id())
        else {
            return RowToggle::NoDetail;
        };
        match self.surface.detail_visible(&detail) {
            Some(true) => {
                self.surface.set_detail_visible(&detail, false);
                RowToggle::Collapsed(detail)
            }
            Some(false) => {
                self.surface.set_detail_visible(&detail, true);
                RowToggle::Expanded(detail)
            }
            None => {
                debug!(row = %row, detail = %detail, "detail row missing");
                RowToggle::NoDetail
            }
        }
    }

    pub fn handle(&mut self, command: TableCommand) -> TableStatus {
        match command {
            TableCommand::ApplyFilters => self.filtered_status(),
            TableCommand::RemoveChip(filter_id) => {
                if self.config.filter(&filter_id).is_none() {
                    return TableStatus::FilterUnknown(filter_id);
                }
                let outcome = self.remove_chip(&filter_id);
                self.status_for(&outcome)
            }
            TableCommand::ClearAll => {
                let outcome = self.clear_all();
                match self.status_for(&outcome) {
                    TableStatus::TableMissing => TableStatus::TableMissing,
                    _ => TableStatus::FiltersCleared {
                        visible: outcome.visible,
                        total: outcome.total,
                    },
                }
            }
            TableCommand::Sort(column) => {
                let state = self.sort(column);
                let label = self.config.column_label(column);
                match state.direction {
                    SortDirection::Asc => TableStatus::SortAsc(label),
                    SortDirection::Desc => TableStatus::SortDesc(label),
                }
            }
            TableCommand::ToggleRow { row, target } => match self.toggle_row(&row, target) {
                RowToggle::Expanded(_) => TableStatus::DetailShown,
                RowToggle::Collapsed(_) => TableStatus::DetailHidden,
                RowToggle::Ignored => TableStatus::ClickIgnored,
                RowToggle::NoDetail => TableStatus::NoDetail,
            },
        }
    }

    fn filtered_status(&mut self) -> TableStatus {
        let outcome = self.filter();
        self.status_for(&outcome)
    }

    fn status_for(&self, outcome: &FilterOutcome) -> TableStatus {
        if outcome.total == 0 && self.surface.rows(&self.config.body_id).is_none() {
            return TableStatus::TableMissing;
        }
        if outcome.no_results() {
            TableStatus::NoResults {
                total: outcome.total,
            }
        } else {
            TableStatus::Filtered {
                visible: outcome.visible,
                total: outcome.total,
            }
        }
    }

    fn existing_detail(&self, row: &TableRow) -> Option<DetailId> {
        row.detail_id()
            .filter(|detail| self.surface.detail_visible(detail).is_some())
    }
}

fn row_matches(row: &TableRow, active: &[(FilterSpec, String)]) -> bool {
    active
        .iter()
        .all(|(filter, value)| filter.matches(row.attr(&filter.data_attr), value))
}

fn chips_for(active: &[(FilterSpec, String)]) -> Vec<FilterChip> {
    active
        .iter()
        .map(|(filter, value)| FilterChip {
            filter_id: filter.id.clone(),
            label: filter.label.clone(),
            value: value.clone(),
            display: format!("{}: {}", filter.label, filter.display_value(value)),
        })
        .collect()
}
