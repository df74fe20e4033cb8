// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracker_app::FieldKind;

use crate::FieldState;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: String },
    #[error("enter a valid email address, like name@example.com")]
    Email,
    #[error("{label} must be at least {min}")]
    BelowMin { label: String, min: f64 },
    #[error("{label} must be at most {max}")]
    AboveMax { label: String, max: f64 },
}

/// First failing rule for `field`: required, then email shape, then numeric
/// range. Values that do not parse as numbers are left to the server.
pub fn validate(field: &FieldState) -> Option<FieldError> {
    let value = field.value.trim();
    if value.is_empty() {
        return field.required.then(|| FieldError::Required {
            label: field.label.clone(),
        });
    }

    if field.kind == FieldKind::Email && !is_email(value) {
        return Some(FieldError::Email);
    }

    if field.kind.is_numeric()
        && let Ok(number) = value.parse::<f64>()
    {
        if let Some(min) = field.min
            && number < min
        {
            return Some(FieldError::BelowMin {
                label: field.label.clone(),
                min,
            });
        }
        if let Some(max) = field.max
            && number > max
        {
            return Some(FieldError::AboveMax {
                label: field.label.clone(),
                max,
            });
        }
    }

    None
}

pub fn is_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}
