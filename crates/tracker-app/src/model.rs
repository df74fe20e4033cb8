// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

macro_rules! app_enum {
    ($name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

app_enum!(EntryKind {
    Reading => ("reading", "Reading"),
    Drawing => ("drawing", "Drawing"),
    Fitness => ("fitness", "Fitness"),
});

app_enum!(ReadingStatus {
    Pending => ("pending", "Pending"),
    InProgress => ("in_progress", "In Progress"),
    Paused => ("paused", "Paused"),
    Completed => ("completed", "Completed"),
    Abandoned => ("abandoned", "Abandoned"),
});

app_enum!(ReadingType {
    PhysicalBook => ("physical_book", "Physical Book"),
    Audiobook => ("audiobook", "Audiobook"),
    Ebook => ("ebook", "Ebook"),
    Magazine => ("magazine", "Magazine"),
    Comic => ("comic", "Comic"),
});

app_enum!(DrawingStatus {
    Planned => ("planned", "Planned"),
    InProgress => ("in_progress", "In Progress"),
    Completed => ("completed", "Completed"),
    Abandoned => ("abandoned", "Abandoned"),
    ContinuedNextDay => ("continued_next_day", "Continued Next Day"),
});

app_enum!(DrawingMedium {
    ColoredPencils => ("colored_pencils", "Colored Pencils"),
    Pencil => ("pencil", "Pencil"),
    Crayons => ("crayons", "Crayons"),
    Markers => ("markers", "Markers"),
    Watercolor => ("watercolor", "Watercolor"),
    Digital => ("digital", "Digital"),
    Beads => ("beads", "Beads"),
    MixedMedia => ("mixed_media", "Mixed Media"),
});

app_enum!(FitnessStatus {
    Planned => ("planned", "Planned"),
    InProgress => ("in_progress", "In Progress"),
    Completed => ("completed", "Completed"),
    Skipped => ("skipped", "Skipped"),
    Cancelled => ("cancelled", "Cancelled"),
});

app_enum!(FitnessType {
    Cardio => ("cardio", "Cardio"),
    Strength => ("strength", "Strength"),
    Flexibility => ("flexibility", "Flexibility"),
    Sports => ("sports", "Sports"),
    Walking => ("walking", "Walking"),
    Running => ("running", "Running"),
    Cycling => ("cycling", "Cycling"),
    Swimming => ("swimming", "Swimming"),
    Yoga => ("yoga", "Yoga"),
    Other => ("other", "Other"),
});

app_enum!(IntensityLevel {
    Low => ("low", "Low"),
    Moderate => ("moderate", "Moderate"),
    High => ("high", "High"),
    VeryHigh => ("very high", "Very High"),
});

impl EntryKind {
    /// Status values a list page of this kind can filter on, as `(value, label)`.
    pub fn status_options(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::Reading => options(ReadingStatus::ALL, |s| (s.as_str(), s.label())),
            Self::Drawing => options(DrawingStatus::ALL, |s| (s.as_str(), s.label())),
            Self::Fitness => options(FitnessStatus::ALL, |s| (s.as_str(), s.label())),
        }
    }

    /// Category values (reading type, drawing medium, activity type).
    pub fn category_options(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::Reading => options(ReadingType::ALL, |t| (t.as_str(), t.label())),
            Self::Drawing => options(DrawingMedium::ALL, |m| (m.as_str(), m.label())),
            Self::Fitness => options(FitnessType::ALL, |t| (t.as_str(), t.label())),
        }
    }
}

fn options<T: Copy>(
    values: &[T],
    pair: impl Fn(T) -> (&'static str, &'static str),
) -> Vec<(&'static str, &'static str)> {
    values.iter().copied().map(pair).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryRef {
    Reading(ReadingEntryId),
    Drawing(DrawingEntryId),
    Fitness(FitnessEntryId),
}

impl EntryRef {
    pub const fn new(kind: EntryKind, id: i64) -> Self {
        match kind {
            EntryKind::Reading => Self::Reading(ReadingEntryId::new(id)),
            EntryKind::Drawing => Self::Drawing(DrawingEntryId::new(id)),
            EntryKind::Fitness => Self::Fitness(FitnessEntryId::new(id)),
        }
    }

    pub const fn kind(self) -> EntryKind {
        match self {
            Self::Reading(_) => EntryKind::Reading,
            Self::Drawing(_) => EntryKind::Drawing,
            Self::Fitness(_) => EntryKind::Fitness,
        }
    }

    pub const fn raw_id(self) -> i64 {
        match self {
            Self::Reading(id) => id.get(),
            Self::Drawing(id) => id.get(),
            Self::Fitness(id) => id.get(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DrawingMedium, EntryKind, EntryRef, FitnessType, IntensityLevel, ReadingStatus,
        SortDirection,
    };

    #[test]
    fn enum_values_parse_back() {
        for status in ReadingStatus::ALL {
            assert_eq!(ReadingStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(IntensityLevel::parse("very high"), Some(IntensityLevel::VeryHigh));
        assert_eq!(FitnessType::parse("yoga"), Some(FitnessType::Yoga));
        assert_eq!(DrawingMedium::parse("crayon"), None);
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(ReadingStatus::InProgress.label(), "In Progress");
        assert_eq!(DrawingMedium::MixedMedia.label(), "Mixed Media");
    }

    #[test]
    fn status_options_follow_entry_kind() {
        let drawing = EntryKind::Drawing.status_options();
        assert!(drawing.contains(&("continued_next_day", "Continued Next Day")));
        assert!(!drawing.contains(&("paused", "Paused")));

        let fitness = EntryKind::Fitness.category_options();
        assert_eq!(fitness.len(), FitnessType::ALL.len());
    }

    #[test]
    fn entry_ref_keeps_kind_and_id() {
        let entry = EntryRef::new(EntryKind::Fitness, 42);
        assert_eq!(entry.kind(), EntryKind::Fitness);
        assert_eq!(entry.raw_id(), 42);
    }

    #[test]
    fn sort_direction_toggles() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}
