// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

pub const AUTOSAVE_TOAST_MESSAGE: &str = "Draft saved";
pub const RESTORE_BANNER_MESSAGE: &str = "Restored your unsaved draft from this browser.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(u64);

impl NoticeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notice-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Transient confirmation in a corner of the page.
    Toast,
    /// Informational banner at the top of a form.
    Banner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
    pub dismissible: bool,
}

/// Where toasts and banners are rendered.
pub trait FeedbackSink {
    fn show(&mut self, notice: &Notice);
    fn remove(&mut self, id: NoticeId);
}

impl<N: FeedbackSink + ?Sized> FeedbackSink for &mut N {
    fn show(&mut self, notice: &Notice) {
        (**self).show(notice);
    }

    fn remove(&mut self, id: NoticeId) {
        (**self).remove(id);
    }
}

#[derive(Debug, Default)]
pub(crate) struct NoticeIds {
    next: u64,
}

impl NoticeIds {
    pub(crate) fn toast(&mut self, message: &str) -> Notice {
        self.notice(NoticeKind::Toast, message, false)
    }

    pub(crate) fn banner(&mut self, message: &str) -> Notice {
        self.notice(NoticeKind::Banner, message, true)
    }

    fn notice(&mut self, kind: NoticeKind, message: &str, dismissible: bool) -> Notice {
        self.next += 1;
        Notice {
            id: NoticeId::new(self.next),
            kind,
            message: message.to_owned(),
            dismissible,
        }
    }
}
