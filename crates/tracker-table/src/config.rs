// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Exact match against the row attribute.
    Select,
    /// Case-insensitive substring match against the row attribute.
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub id: String,
    pub data_attr: String,
    pub label: String,
    pub kind: FilterKind,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterSpec {
    pub fn select(
        id: impl Into<String>,
        data_attr: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(id, data_attr, label, FilterKind::Select)
    }

    pub fn search(
        id: impl Into<String>,
        data_attr: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(id, data_attr, label, FilterKind::Search)
    }

    fn new(
        id: impl Into<String>,
        data_attr: impl Into<String>,
        label: impl Into<String>,
        kind: FilterKind,
    ) -> Self {
        Self {
            id: id.into(),
            data_attr: data_attr.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
        }
    }

    pub fn with_options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| FilterOption::new(value, label))
            .collect();
        self
    }

    /// The value this filter applies, or `None` when the control is
    /// effectively empty. Search values are trimmed; select values are taken
    /// as-is.
    pub fn active_value(&self, raw: &str) -> Option<String> {
        match self.kind {
            FilterKind::Select if !raw.is_empty() => Some(raw.to_owned()),
            FilterKind::Search if !raw.trim().is_empty() => Some(raw.trim().to_owned()),
            _ => None,
        }
    }

    /// Whether a row attribute satisfies this filter at `value`. A missing
    /// attribute never matches.
    pub fn matches(&self, attr: Option<&str>, value: &str) -> bool {
        let Some(attr) = attr else {
            return false;
        };
        match self.kind {
            FilterKind::Select => attr == value,
            FilterKind::Search => attr.to_lowercase().contains(&value.to_lowercase()),
        }
    }

    /// Human text for a value: the option label when one is declared.
    pub fn display_value<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map_or(value, |option| option.label.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Numeric,
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub date_columns: BTreeSet<usize>,
    #[serde(default)]
    pub numeric_columns: BTreeSet<usize>,
}

impl SortConfig {
    pub fn new(
        date_columns: impl IntoIterator<Item = usize>,
        numeric_columns: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            date_columns: date_columns.into_iter().collect(),
            numeric_columns: numeric_columns.into_iter().collect(),
        }
    }

    /// A column listed as both date and numeric sorts as a date.
    pub fn column_kind(&self, column: usize) -> ColumnKind {
        if self.date_columns.contains(&column) {
            ColumnKind::Date
        } else if self.numeric_columns.contains(&column) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub filters: Vec<FilterSpec>,
    pub body_id: String,
    pub counter_id: String,
    pub chips_id: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub sort: Option<SortConfig>,
}

impl TableConfig {
    pub fn new(
        body_id: impl Into<String>,
        counter_id: impl Into<String>,
        chips_id: impl Into<String>,
    ) -> Self {
        Self {
            filters: Vec::new(),
            body_id: body_id.into(),
            counter_id: counter_id.into(),
            chips_id: chips_id.into(),
            columns: Vec::new(),
            sort: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filter(&self, id: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|filter| filter.id == id)
    }

    /// Replaces the options of one filter; returns false when no filter has
    /// that id.
    pub fn set_options<I, V, L>(&mut self, id: &str, options: I) -> bool
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let Some(filter) = self.filters.iter_mut().find(|filter| filter.id == id) else {
            return false;
        };
        filter.options = options
            .into_iter()
            .map(|(value, label)| FilterOption::new(value, label))
            .collect();
        true
    }

    pub fn column_kind(&self, column: usize) -> ColumnKind {
        self.sort
            .as_ref()
            .map_or(ColumnKind::Text, |sort| sort.column_kind(column))
    }

    pub fn column_label(&self, column: usize) -> String {
        self.columns
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("column {}", column.saturating_add(1)))
    }
}
