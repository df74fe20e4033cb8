// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{EntryKind, EntryRef, Route};
use FieldKind::{Date, File, Hidden, Number, Select, Text, TextArea, Url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    Select,
    TextArea,
    Url,
    File,
    Hidden,
}

impl FieldKind {
    /// File inputs are never serialized into drafts or restored from them.
    pub const fn is_draftable(self) -> bool {
        !matches!(self, Self::File)
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub section: Option<&'static str>,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            min: None,
            max: None,
            section: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    const fn in_section(mut self, section: &'static str) -> Self {
        self.section = Some(section);
        self
    }
}

pub const SECTION_DETAILS: &str = "details";
pub const SECTION_NOTES: &str = "notes";
pub const SECTION_METRICS: &str = "metrics";

const READING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("user_id", "Person", Select).required(),
    FieldSpec::new("title", "Title", Text).required(),
    FieldSpec::new("author", "Author", Text),
    FieldSpec::new("reading_type", "Type", Select).required(),
    FieldSpec::new("status", "Status", Select).required(),
    FieldSpec::new("progress_fraction", "Progress", Number).range(0.0, 1.0),
    FieldSpec::new("isbn", "ISBN", Text).in_section(SECTION_DETAILS),
    FieldSpec::new("length_pages", "Pages", Number)
        .range(1.0, 10_000.0)
        .in_section(SECTION_DETAILS),
    FieldSpec::new("length_duration", "Duration", Text).in_section(SECTION_DETAILS),
    FieldSpec::new("series_info", "Series", Text).in_section(SECTION_DETAILS),
    FieldSpec::new("started_date", "Started", Date).in_section(SECTION_DETAILS),
    FieldSpec::new("completed_date", "Completed", Date).in_section(SECTION_DETAILS),
    FieldSpec::new("notes", "Notes", TextArea).in_section(SECTION_NOTES),
    FieldSpec::new("pause_reason", "Pause reason", Text).in_section(SECTION_NOTES),
];

const DRAWING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("user_id", "Person", Select).required(),
    FieldSpec::new("title", "Title", Text).required(),
    FieldSpec::new("subject", "Subject", Text),
    FieldSpec::new("medium", "Medium", Select),
    FieldSpec::new("status", "Status", Select).required(),
    FieldSpec::new("duration_hours", "Hours", Number)
        .range(0.0, 100.0)
        .in_section(SECTION_DETAILS),
    FieldSpec::new("sessions_count", "Sessions", Number)
        .range(1.0, 100.0)
        .in_section(SECTION_DETAILS),
    FieldSpec::new("materials_count", "Materials", Number)
        .range(1.0, 1_000_000.0)
        .in_section(SECTION_DETAILS),
    FieldSpec::new("complexity_level", "Complexity", Select).in_section(SECTION_DETAILS),
    FieldSpec::new("context", "Context", TextArea).in_section(SECTION_NOTES),
    FieldSpec::new("technical_notes", "Technical notes", TextArea).in_section(SECTION_NOTES),
    FieldSpec::new("reference_link", "Reference link", Url).in_section(SECTION_NOTES),
    FieldSpec::new("image", "Image", File).in_section(SECTION_NOTES),
];

const FITNESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("user_id", "Person", Select).required(),
    FieldSpec::new("title", "Title", Text).required(),
    FieldSpec::new("activity_type", "Activity", Select),
    FieldSpec::new("activity_date", "Date", Date),
    FieldSpec::new("status", "Status", Select).required(),
    FieldSpec::new("duration_minutes", "Minutes", Number)
        .range(0.0, 1440.0)
        .in_section(SECTION_METRICS),
    FieldSpec::new("distance_km", "Distance (km)", Number)
        .range(0.0, 1000.0)
        .in_section(SECTION_METRICS),
    FieldSpec::new("intensity_level", "Intensity", Select).in_section(SECTION_METRICS),
    FieldSpec::new("location", "Location", Text).in_section(SECTION_METRICS),
    FieldSpec::new("description", "Description", TextArea).in_section(SECTION_NOTES),
    FieldSpec::new("notes", "Notes", TextArea).in_section(SECTION_NOTES),
    FieldSpec::new("redirect_to", "", Hidden),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    Reading,
    Drawing,
    Fitness,
}

impl FormKind {
    pub const fn for_entry(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Reading => Self::Reading,
            EntryKind::Drawing => Self::Drawing,
            EntryKind::Fitness => Self::Fitness,
        }
    }

    pub const fn entry_kind(self) -> EntryKind {
        match self {
            Self::Reading => EntryKind::Reading,
            Self::Drawing => EntryKind::Drawing,
            Self::Fitness => EntryKind::Fitness,
        }
    }

    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Reading => READING_FIELDS,
            Self::Drawing => DRAWING_FIELDS,
            Self::Fitness => FITNESS_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Optional sections in declaration order, without duplicates.
    pub fn sections(self) -> Vec<&'static str> {
        let mut sections = Vec::new();
        for section in self.fields().iter().filter_map(|field| field.section) {
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        sections
    }

    pub fn add_action(self) -> String {
        Route::Add(self.entry_kind()).path()
    }

    pub fn edit_action(self, id: i64) -> String {
        Route::Edit(EntryRef::new(self.entry_kind(), id)).path()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FormKind, SECTION_DETAILS, SECTION_METRICS, SECTION_NOTES};
    use crate::EntryKind;

    #[test]
    fn every_form_requires_title_and_person() {
        for kind in [FormKind::Reading, FormKind::Drawing, FormKind::Fitness] {
            for name in ["title", "user_id"] {
                let field = kind.field(name).expect("field declared");
                assert!(field.required, "{kind:?}.{name} should be required");
                assert!(field.section.is_none());
            }
        }
    }

    #[test]
    fn numeric_ranges_follow_entry_limits() {
        let pages = FormKind::Reading
            .field("length_pages")
            .expect("pages declared");
        assert_eq!((pages.min, pages.max), (Some(1.0), Some(10_000.0)));

        let minutes = FormKind::Fitness
            .field("duration_minutes")
            .expect("minutes declared");
        assert_eq!(minutes.max, Some(1440.0));
        assert!(minutes.kind.is_numeric());
    }

    #[test]
    fn sections_are_listed_once_in_order() {
        assert_eq!(
            FormKind::Reading.sections(),
            vec![SECTION_DETAILS, SECTION_NOTES]
        );
        assert_eq!(
            FormKind::Fitness.sections(),
            vec![SECTION_METRICS, SECTION_NOTES]
        );
    }

    #[test]
    fn file_fields_are_not_draftable() {
        let image = FormKind::Drawing.field("image").expect("image declared");
        assert_eq!(image.kind, FieldKind::File);
        assert!(!image.kind.is_draftable());
        assert!(FieldKind::TextArea.is_draftable());
    }

    #[test]
    fn actions_use_web_routes() {
        assert_eq!(FormKind::Drawing.add_action(), "/web/drawing/add");
        assert_eq!(FormKind::Fitness.edit_action(4), "/web/fitness/edit/4");
        assert_eq!(
            FormKind::for_entry(EntryKind::Reading).entry_kind(),
            EntryKind::Reading
        );
    }
}
