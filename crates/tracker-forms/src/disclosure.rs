// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Keys that activate a section header, like a button.
    pub const fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Collapsed,
    /// Opened to the content's natural height in pixels.
    Expanded(u32),
}

/// Open/closed state of a form's optional sections for one page load.
#[derive(Debug, Clone, Default)]
pub struct Disclosure {
    sections: BTreeMap<String, SectionState>,
}

impl Disclosure {
    pub fn collapsed<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections
                .into_iter()
                .map(|section| (section.into(), SectionState::Collapsed))
                .collect(),
        }
    }

    pub fn state(&self, section: &str) -> Option<SectionState> {
        self.sections.get(section).copied()
    }

    /// Flips `section`; expanding opens to `natural_height`. Unknown sections
    /// are left alone.
    pub fn toggle(&mut self, section: &str, natural_height: u32) -> Option<SectionState> {
        let state = self.sections.get_mut(section)?;
        *state = match *state {
            SectionState::Collapsed => SectionState::Expanded(natural_height),
            SectionState::Expanded(_) => SectionState::Collapsed,
        };
        Some(*state)
    }
}

#[cfg(test)]
mod tests {
    use super::{Disclosure, Key, SectionState};

    #[test]
    fn sections_start_collapsed_and_toggle() {
        let mut disclosure = Disclosure::collapsed(["details", "notes"]);
        assert_eq!(disclosure.state("details"), Some(SectionState::Collapsed));
        assert_eq!(
            disclosure.toggle("details", 240),
            Some(SectionState::Expanded(240))
        );
        assert_eq!(
            disclosure.toggle("details", 240),
            Some(SectionState::Collapsed)
        );
        assert_eq!(disclosure.toggle("metrics", 10), None);
    }

    #[test]
    fn enter_and_space_activate() {
        assert!(Key::Enter.activates());
        assert!(Key::Space.activates());
        assert!(!Key::Other.activates());
    }
}
