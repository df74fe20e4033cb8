// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracker_app::{FieldKind, FieldSpec};

/// A rendered form control and the constraints declared on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldState {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            value: String::new(),
            required: false,
            min: None,
            max: None,
        }
    }

    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name.to_owned(),
            label: spec.label.to_owned(),
            kind: spec.kind,
            value: String::new(),
            required: spec.required,
            min: spec.min,
            max: spec.max,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// One form on the page. Lookups of optional structure return `None` or
/// `false` when the markup is missing.
pub trait FormSurface {
    /// Submission target, `None` when the form declares none.
    fn action(&self) -> Option<String>;

    /// Path of the page the form is rendered on.
    fn page_path(&self) -> String;

    /// Controls in document order.
    fn fields(&self) -> Vec<FieldState>;

    fn field(&self, name: &str) -> Option<FieldState> {
        self.fields().into_iter().find(|field| field.name == name)
    }

    fn set_value(&mut self, name: &str, value: &str) -> bool;

    /// Renders `message` under the field and marks it invalid.
    fn show_field_error(&mut self, name: &str, message: &str) -> bool;

    fn clear_field_error(&mut self, name: &str) -> bool;

    /// Disables the submit control and shows `label` on it.
    fn set_submit_busy(&mut self, label: &str) -> bool;

    /// Collapsible sections, in document order.
    fn optional_sections(&self) -> Vec<String> {
        Vec::new()
    }

    /// Natural height of a section's content in pixels.
    fn section_height(&self, _section: &str) -> Option<u32> {
        None
    }

    fn expand_section(&mut self, _section: &str, _height: u32) -> bool {
        false
    }

    fn collapse_section(&mut self, _section: &str) -> bool {
        false
    }
}
