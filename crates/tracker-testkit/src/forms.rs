// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;
use tracker_app::FormKind;
use tracker_forms::{Clock, FeedbackSink, FieldState, FormSurface, Notice, NoticeId, NoticeKind};

const DEFAULT_SECTION_HEIGHT: u32 = 180;

#[derive(Debug, Clone)]
struct MemorySection {
    name: String,
    height: Option<u32>,
    open: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct MemoryForm {
    action: Option<String>,
    page_path: String,
    fields: Vec<FieldState>,
    errors: BTreeMap<String, Vec<String>>,
    submit_label: Option<String>,
    submit_disabled: bool,
    busy_decorations: usize,
    sections: Vec<MemorySection>,
}

impl MemoryForm {
    pub fn new(action: Option<&str>, page_path: &str) -> Self {
        Self {
            action: action.map(str::to_owned),
            page_path: page_path.to_owned(),
            fields: Vec::new(),
            errors: BTreeMap::new(),
            submit_label: Some("Save".to_owned()),
            submit_disabled: false,
            busy_decorations: 0,
            sections: Vec::new(),
        }
    }

    /// Add form for `kind` with every declared field and section.
    pub fn add_form(kind: FormKind) -> Self {
        let action = kind.add_action();
        Self::from_schema(kind, &action)
    }

    pub fn edit_form(kind: FormKind, id: i64) -> Self {
        let action = kind.edit_action(id);
        Self::from_schema(kind, &action)
    }

    fn from_schema(kind: FormKind, action: &str) -> Self {
        let mut form = Self::new(Some(action), action);
        form.fields = kind.fields().iter().map(FieldState::from_spec).collect();
        form.sections = kind
            .sections()
            .into_iter()
            .map(|name| MemorySection {
                name: name.to_owned(),
                height: Some(DEFAULT_SECTION_HEIGHT),
                open: None,
            })
            .collect();
        form
    }

    pub fn with_field(mut self, field: FieldState) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a section whose content has no measurable height when `None`.
    pub fn with_section(mut self, name: &str, height: Option<u32>) -> Self {
        self.sections.push(MemorySection {
            name: name.to_owned(),
            height,
            open: None,
        });
        self
    }

    pub fn without_submit(mut self) -> Self {
        self.submit_label = None;
        self
    }

    /// Simulates the user typing into a field.
    pub fn type_value(&mut self, name: &str, value: &str) -> bool {
        self.set_value(name, value)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn errors(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn submit_label(&self) -> Option<&str> {
        self.submit_label.as_deref()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    pub fn busy_decorations(&self) -> usize {
        self.busy_decorations
    }

    /// Rendered height of an open section, `None` when collapsed or absent.
    pub fn open_height(&self, section: &str) -> Option<u32> {
        self.section(section).and_then(|section| section.open)
    }

    fn section(&self, name: &str) -> Option<&MemorySection> {
        self.sections.iter().find(|section| section.name == name)
    }

    fn section_mut(&mut self, name: &str) -> Option<&mut MemorySection> {
        self.sections.iter_mut().find(|section| section.name == name)
    }
}

impl FormSurface for MemoryForm {
    fn action(&self) -> Option<String> {
        self.action.clone()
    }

    fn page_path(&self) -> String {
        self.page_path.clone()
    }

    fn fields(&self) -> Vec<FieldState> {
        self.fields.clone()
    }

    fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.to_owned();
                true
            }
            None => false,
        }
    }

    fn show_field_error(&mut self, name: &str, message: &str) -> bool {
        if !self.fields.iter().any(|field| field.name == name) {
            return false;
        }
        self.errors
            .entry(name.to_owned())
            .or_default()
            .push(message.to_owned());
        true
    }

    fn clear_field_error(&mut self, name: &str) -> bool {
        self.errors.remove(name).is_some()
    }

    fn set_submit_busy(&mut self, label: &str) -> bool {
        let Some(current) = self.submit_label.as_mut() else {
            return false;
        };
        *current = label.to_owned();
        self.submit_disabled = true;
        self.busy_decorations += 1;
        true
    }

    fn optional_sections(&self) -> Vec<String> {
        self.sections
            .iter()
            .map(|section| section.name.clone())
            .collect()
    }

    fn section_height(&self, section: &str) -> Option<u32> {
        self.section(section).and_then(|section| section.height)
    }

    fn expand_section(&mut self, section: &str, height: u32) -> bool {
        match self.section_mut(section) {
            Some(section) => {
                section.open = Some(height);
                true
            }
            None => false,
        }
    }

    fn collapse_section(&mut self, section: &str) -> bool {
        match self.section_mut(section) {
            Some(section) => {
                section.open = None;
                true
            }
            None => false,
        }
    }
}

/// Keeps every notice shown and removed, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    shown: Vec<Notice>,
    removed: Vec<NoticeId>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> &[Notice] {
        &self.shown
    }

    pub fn removed(&self) -> &[NoticeId] {
        &self.removed
    }

    pub fn shown_count(&self, kind: NoticeKind) -> usize {
        self.shown.iter().filter(|notice| notice.kind == kind).count()
    }

    /// Notices currently on screen.
    pub fn visible(&self) -> Vec<&Notice> {
        self.shown
            .iter()
            .filter(|notice| !self.removed.contains(&notice.id))
            .collect()
    }

    pub fn visible_count(&self, kind: NoticeKind) -> usize {
        self.visible()
            .into_iter()
            .filter(|notice| notice.kind == kind)
            .count()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn show(&mut self, notice: &Notice) {
        self.shown.push(notice.clone());
    }

    fn remove(&mut self, id: NoticeId) {
        self.removed.push(id);
    }
}

/// Clock moved by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
