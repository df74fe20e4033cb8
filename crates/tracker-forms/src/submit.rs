// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const SUBMIT_BUSY_LABEL: &str = "Saving…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// First submit: the control was disabled and decorated.
    Started,
    /// Already busy; nothing was decorated again.
    AlreadyBusy,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitGuard {
    busy: bool,
}

impl SubmitGuard {
    pub fn is_busy(self) -> bool {
        self.busy
    }

    pub fn begin(&mut self) -> SubmitOutcome {
        if self.busy {
            return SubmitOutcome::AlreadyBusy;
        }
        self.busy = true;
        SubmitOutcome::Started
    }
}
