// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Sort keys parsed leniently out of rendered cell text.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;
use time::macros::date;
use time::{Date, Month};

use crate::ColumnKind;

/// Sort position of a date cell with no readable date: before every real date.
pub const DATE_SENTINEL: Date = date!(1970 - 01 - 01);

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("ISO date pattern is valid")
});

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading number pattern is valid")
});

/// First `YYYY-MM-DD` substring that names a real calendar day.
pub fn embedded_date(text: &str) -> Option<Date> {
    ISO_DATE.captures_iter(text).find_map(|captures| {
        let year = captures.get(1)?.as_str().parse::<i32>().ok()?;
        let month = captures.get(2)?.as_str().parse::<u8>().ok()?;
        let day = captures.get(3)?.as_str().parse::<u8>().ok()?;
        Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
    })
}

/// Longest numeric prefix after leading whitespace, `0.0` when there is none.
/// `"12.5 km"` reads as `12.5`, `"1,200"` as `1`.
pub fn leading_number(text: &str) -> f64 {
    LEADING_NUMBER
        .find(text.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Date(Date),
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn for_cell(kind: ColumnKind, text: &str) -> Self {
        let text = text.trim();
        match kind {
            ColumnKind::Date => Self::Date(embedded_date(text).unwrap_or(DATE_SENTINEL)),
            ColumnKind::Numeric => Self::Number(leading_number(text)),
            ColumnKind::Text => Self::Text(text.to_lowercase()),
        }
    }

    /// Keys of one column always share a variant; mixed variants compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            _ => Ordering::Equal,
        }
    }
}
