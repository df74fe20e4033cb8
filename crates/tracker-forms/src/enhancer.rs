// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};
use tracker_store::{Draft, DraftStore, Storage, draft_key};

use crate::feedback::NoticeIds;
use crate::{
    AUTOSAVE_TOAST_MESSAGE, Clock, Disclosure, FeedbackSink, FieldError, FormSurface, Key,
    NoticeId, RESTORE_BANNER_MESSAGE, SUBMIT_BUSY_LABEL, SectionState, SubmitGuard,
    SubmitOutcome, TimerQueue, validate,
};

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(2);
pub const DEFAULT_BANNER_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancerSettings {
    /// Quiet period after the last input before a draft is written.
    pub autosave_delay: Duration,
    pub toast_duration: Duration,
    pub banner_duration: Duration,
}

impl Default for EnhancerSettings {
    fn default() -> Self {
        Self {
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            toast_duration: DEFAULT_TOAST_DURATION,
            banner_duration: DEFAULT_BANNER_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(usize);

impl FormId {
    /// Form at `index` in document order.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    Autosave(FormId),
    DismissToast,
    DismissBanner(FormId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field lost focus.
    Blur(String),
    /// A field's value changed; the surface already holds the new value.
    Input(String),
    Submit,
    HeaderClick(String),
    HeaderKey { section: String, key: Key },
    DismissBanner,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Valid,
    Invalid(FieldError),
    Edited { error_cleared: bool },
    Submitted,
    SubmitIgnored,
    Section(SectionState),
    BannerDismissed,
    Ignored,
    UnknownForm,
}

struct EnhancedForm<F> {
    surface: F,
    draft_key: String,
    errors: BTreeSet<String>,
    guard: SubmitGuard,
    disclosure: Disclosure,
    banner: Option<NoticeId>,
}

/// Validation, disclosure, draft autosave, submit affordance and feedback
/// for the forms of one page.
pub struct FormEnhancer<F, S, N, C> {
    forms: Vec<EnhancedForm<F>>,
    drafts: DraftStore<S>,
    feedback: N,
    clock: C,
    settings: EnhancerSettings,
    timers: TimerQueue<TimerKey>,
    notices: NoticeIds,
    toast: Option<NoticeId>,
}

impl<F, S, N, C> FormEnhancer<F, S, N, C>
where
    F: FormSurface,
    S: Storage,
    N: FeedbackSink,
    C: Clock,
{
    /// Enhances every form present on the page: collapses optional sections
    /// and restores stored drafts.
    pub fn attach(
        forms: Vec<F>,
        storage: S,
        feedback: N,
        clock: C,
        settings: EnhancerSettings,
    ) -> Self {
        let mut enhancer = Self {
            forms: Vec::with_capacity(forms.len()),
            drafts: DraftStore::new(storage),
            feedback,
            clock,
            settings,
            timers: TimerQueue::new(),
            notices: NoticeIds::default(),
            toast: None,
        };

        for surface in forms {
            let id = FormId(enhancer.forms.len());
            enhancer.forms.push(enhance(surface));
            enhancer.restore_draft(id);
        }
        enhancer
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn form_ids(&self) -> Vec<FormId> {
        (0..self.forms.len()).map(FormId).collect()
    }

    pub fn form(&self, id: FormId) -> Option<&F> {
        self.forms.get(id.0).map(|form| &form.surface)
    }

    pub fn form_mut(&mut self, id: FormId) -> Option<&mut F> {
        self.forms.get_mut(id.0).map(|form| &mut form.surface)
    }

    pub fn draft_key(&self, id: FormId) -> Option<&str> {
        self.forms.get(id.0).map(|form| form.draft_key.as_str())
    }

    pub fn section_state(&self, id: FormId, section: &str) -> Option<SectionState> {
        self.forms.get(id.0)?.disclosure.state(section)
    }

    pub fn has_error(&self, id: FormId, field: &str) -> bool {
        self.forms
            .get(id.0)
            .is_some_and(|form| form.errors.contains(field))
    }

    pub fn settings(&self) -> EnhancerSettings {
        self.settings
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn feedback(&self) -> &N {
        &self.feedback
    }

    pub fn timers(&self) -> &TimerQueue<TimerKey> {
        &self.timers
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn into_storage(self) -> S {
        self.drafts.into_inner()
    }

    pub fn dispatch(&mut self, id: FormId, event: FormEvent) -> FormOutcome {
        if id.0 >= self.forms.len() {
            return FormOutcome::UnknownForm;
        }
        trace!(form = %id, ?event, "form event");
        match event {
            FormEvent::Blur(field) => self.blur(id, &field),
            FormEvent::Input(field) => self.input(id, &field),
            FormEvent::Submit => self.submit(id),
            FormEvent::HeaderClick(section) => self.toggle_section(id, &section),
            FormEvent::HeaderKey { section, key } if key.activates() => {
                self.toggle_section(id, &section)
            }
            FormEvent::HeaderKey { .. } => FormOutcome::Ignored,
            FormEvent::DismissBanner => {
                if self.remove_banner(id) {
                    FormOutcome::BannerDismissed
                } else {
                    FormOutcome::Ignored
                }
            }
        }
    }

    /// Fires every timer that is due and returns the keys that fired.
    pub fn tick(&mut self) -> Vec<TimerKey> {
        let fired = self.timers.drain_due(self.clock.now());
        for key in &fired {
            match *key {
                TimerKey::Autosave(id) => self.autosave(id),
                TimerKey::DismissToast => {
                    if let Some(toast) = self.toast.take() {
                        self.feedback.remove(toast);
                    }
                }
                TimerKey::DismissBanner(id) => {
                    self.remove_banner(id);
                }
            }
        }
        fired
    }

    fn blur(&mut self, id: FormId, name: &str) -> FormOutcome {
        let Some(form) = self.forms.get_mut(id.0) else {
            return FormOutcome::UnknownForm;
        };
        let Some(field) = form.surface.field(name) else {
            debug!(form = %id, field = name, "blurred field missing");
            return FormOutcome::Ignored;
        };

        if form.errors.remove(name) {
            form.surface.clear_field_error(name);
        }
        match validate(&field) {
            Some(error) => {
                if form.surface.show_field_error(name, &error.to_string()) {
                    form.errors.insert(name.to_owned());
                }
                FormOutcome::Invalid(error)
            }
            None => FormOutcome::Valid,
        }
    }

    fn input(&mut self, id: FormId, name: &str) -> FormOutcome {
        let Some(form) = self.forms.get_mut(id.0) else {
            return FormOutcome::UnknownForm;
        };
        let error_cleared = form.errors.remove(name);
        if error_cleared {
            form.surface.clear_field_error(name);
        }
        if !form.guard.is_busy() {
            let deadline = self.clock.now().saturating_add(self.settings.autosave_delay);
            self.timers.schedule(TimerKey::Autosave(id), deadline);
        }
        FormOutcome::Edited { error_cleared }
    }

    fn submit(&mut self, id: FormId) -> FormOutcome {
        let Some(form) = self.forms.get_mut(id.0) else {
            return FormOutcome::UnknownForm;
        };
        if form.guard.begin() == SubmitOutcome::AlreadyBusy {
            return FormOutcome::SubmitIgnored;
        }
        if !form.surface.set_submit_busy(SUBMIT_BUSY_LABEL) {
            debug!(form = %id, "submit control missing");
        }
        self.timers.cancel(&TimerKey::Autosave(id));
        if let Err(error) = self.drafts.clear(&form.draft_key) {
            debug!(key = %form.draft_key, %error, "draft not cleared");
        }
        FormOutcome::Submitted
    }

    fn toggle_section(&mut self, id: FormId, section: &str) -> FormOutcome {
        let Some(form) = self.forms.get_mut(id.0) else {
            return FormOutcome::UnknownForm;
        };
        let height = form.surface.section_height(section).unwrap_or(0);
        match form.disclosure.toggle(section, height) {
            Some(state @ SectionState::Expanded(height)) => {
                form.surface.expand_section(section, height);
                FormOutcome::Section(state)
            }
            Some(state @ SectionState::Collapsed) => {
                form.surface.collapse_section(section);
                FormOutcome::Section(state)
            }
            None => FormOutcome::Ignored,
        }
    }

    fn autosave(&mut self, id: FormId) {
        let Some(form) = self.forms.get(id.0) else {
            return;
        };
        let draft: Draft = form
            .surface
            .fields()
            .into_iter()
            .filter(|field| field.kind.is_draftable())
            .map(|field| (field.name, field.value))
            .collect();
        match self.drafts.save(&form.draft_key, &draft) {
            Ok(()) => {
                debug!(key = %form.draft_key, fields = draft.len(), "draft saved");
                self.show_toast(AUTOSAVE_TOAST_MESSAGE);
            }
            Err(error) => debug!(key = %form.draft_key, %error, "draft autosave skipped"),
        }
    }

    fn restore_draft(&mut self, id: FormId) {
        let Some(form) = self.forms.get_mut(id.0) else {
            return;
        };
        let draft = match self.drafts.load(&form.draft_key) {
            Ok(Some(draft)) => draft,
            Ok(None) => return,
            Err(error) => {
                debug!(key = %form.draft_key, %error, "draft restore skipped");
                return;
            }
        };

        let mut restored = 0;
        for field in form.surface.fields() {
            if !field.kind.is_draftable() {
                continue;
            }
            if let Some(value) = draft.get(&field.name)
                && form.surface.set_value(&field.name, value)
            {
                restored += 1;
            }
        }
        if restored == 0 {
            return;
        }

        debug!(key = %form.draft_key, restored, "draft restored");
        let notice = self.notices.banner(RESTORE_BANNER_MESSAGE);
        self.feedback.show(&notice);
        form.banner = Some(notice.id);
        let deadline = self.clock.now().saturating_add(self.settings.banner_duration);
        self.timers.schedule(TimerKey::DismissBanner(id), deadline);
    }

    fn show_toast(&mut self, message: &str) {
        if let Some(previous) = self.toast.take() {
            self.feedback.remove(previous);
        }
        let notice = self.notices.toast(message);
        self.feedback.show(&notice);
        self.toast = Some(notice.id);
        let deadline = self.clock.now().saturating_add(self.settings.toast_duration);
        self.timers.schedule(TimerKey::DismissToast, deadline);
    }

    fn remove_banner(&mut self, id: FormId) -> bool {
        let Some(banner) = self
            .forms
            .get_mut(id.0)
            .and_then(|form| form.banner.take())
        else {
            return false;
        };
        self.timers.cancel(&TimerKey::DismissBanner(id));
        self.feedback.remove(banner);
        true
    }
}

fn enhance<F: FormSurface>(mut surface: F) -> EnhancedForm<F> {
    let action = surface.action();
    let key = draft_key(action.as_deref(), &surface.page_path());
    let sections = surface.optional_sections();
    for section in &sections {
        surface.collapse_section(section);
    }
    EnhancedForm {
        surface,
        draft_key: key,
        errors: BTreeSet::new(),
        guard: SubmitGuard::default(),
        disclosure: Disclosure::collapsed(sections),
        banner: None,
    }
}
