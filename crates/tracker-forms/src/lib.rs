// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod disclosure;
pub mod enhancer;
pub mod feedback;
pub mod submit;
pub mod surface;
pub mod timers;
pub mod validation;

pub use disclosure::{Disclosure, Key, SectionState};
pub use enhancer::{
    DEFAULT_AUTOSAVE_DELAY, DEFAULT_BANNER_DURATION, DEFAULT_TOAST_DURATION, EnhancerSettings,
    FormEnhancer, FormEvent, FormId, FormOutcome, TimerKey,
};
pub use feedback::{
    AUTOSAVE_TOAST_MESSAGE, FeedbackSink, Notice, NoticeId, NoticeKind, RESTORE_BANNER_MESSAGE,
};
pub use submit::{SUBMIT_BUSY_LABEL, SubmitGuard, SubmitOutcome};
pub use surface::{FieldState, FormSurface};
pub use timers::{Clock, SystemClock, TimerQueue};
pub use validation::{FieldError, is_email, validate};
