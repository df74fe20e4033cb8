// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::time::Duration;
use tracker_app::{FieldKind, FormKind};
use tracker_forms::{
    EnhancerSettings, FieldError, FieldState, FormEnhancer, FormEvent, FormId, FormOutcome, Key,
    NoticeKind, RESTORE_BANNER_MESSAGE, SUBMIT_BUSY_LABEL, SectionState, TimerKey,
};
use tracker_store::{DraftStore, MemoryStorage, SqliteStorage, Storage, draft_key};
use tracker_testkit::{ManualClock, MemoryForm, RecordingFeedback, temp_storage_path};

type Enhancer<S> = FormEnhancer<MemoryForm, S, RecordingFeedback, ManualClock>;

fn attach<S: Storage>(forms: Vec<MemoryForm>, storage: S, clock: &ManualClock) -> Enhancer<S> {
    FormEnhancer::attach(
        forms,
        storage,
        RecordingFeedback::new(),
        clock.clone(),
        EnhancerSettings::default(),
    )
}

fn first_form<S: Storage>(enhancer: &Enhancer<S>) -> FormId {
    enhancer.form_ids()[0]
}

fn type_into<S: Storage>(enhancer: &mut Enhancer<S>, id: FormId, name: &str, value: &str) {
    if let Some(form) = enhancer.form_mut(id) {
        form.type_value(name, value);
    }
    enhancer.dispatch(id, FormEvent::Input(name.to_owned()));
}

#[test]
fn required_field_gets_one_error_until_typed_into() {
    let clock = ManualClock::new();
    let mut enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        MemoryStorage::new(),
        &clock,
    );
    let id = first_form(&enhancer);

    for _ in 0..3 {
        let outcome = enhancer.dispatch(id, FormEvent::Blur("title".to_owned()));
        assert_eq!(
            outcome,
            FormOutcome::Invalid(FieldError::Required {
                label: "Title".to_owned()
            })
        );
    }
    let form = enhancer.form(id).expect("form attached");
    assert_eq!(form.errors("title"), ["Title is required".to_owned()]);
    assert_eq!(form.error_count(), 1);
    assert!(enhancer.has_error(id, "title"));

    type_into(&mut enhancer, id, "title", "M");
    let form = enhancer.form(id).expect("form attached");
    assert!(form.errors("title").is_empty());
    assert!(!enhancer.has_error(id, "title"));
}

#[test]
fn blur_runs_rules_in_order() {
    let clock = ManualClock::new();
    let form = MemoryForm::new(Some("/web/profile"), "/web/profile")
        .with_field(FieldState::new("email", FieldKind::Email).with_label("Email"));
    let mut enhancer = attach(vec![form], MemoryStorage::new(), &clock);
    let id = first_form(&enhancer);

    type_into(&mut enhancer, id, "email", "ada at example");
    assert_eq!(
        enhancer.dispatch(id, FormEvent::Blur("email".to_owned())),
        FormOutcome::Invalid(FieldError::Email)
    );

    type_into(&mut enhancer, id, "email", "ada@example.org");
    assert_eq!(
        enhancer.dispatch(id, FormEvent::Blur("email".to_owned())),
        FormOutcome::Valid
    );
    assert_eq!(
        enhancer.dispatch(id, FormEvent::Blur("nope".to_owned())),
        FormOutcome::Ignored
    );
}

#[test]
fn range_errors_use_declared_bounds() {
    let clock = ManualClock::new();
    let mut enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Fitness)],
        MemoryStorage::new(),
        &clock,
    );
    let id = first_form(&enhancer);
    type_into(&mut enhancer, id, "duration_minutes", "2000");
    let outcome = enhancer.dispatch(id, FormEvent::Blur("duration_minutes".to_owned()));
    assert!(matches!(
        outcome,
        FormOutcome::Invalid(FieldError::AboveMax { max, .. }) if max == 1440.0
    ));
}

#[test]
fn autosave_is_trailing_and_debounced() -> Result<()> {
    let clock = ManualClock::new();
    let mut storage = MemoryStorage::new();
    let mut enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        &mut storage,
        &clock,
    );
    let id = first_form(&enhancer);
    let key = enhancer.draft_key(id).expect("key").to_owned();
    assert_eq!(key, "form-draft-/web/reading/add");

    type_into(&mut enhancer, id, "title", "Mo");
    clock.advance_ms(900);
    type_into(&mut enhancer, id, "title", "Momo");
    clock.advance_ms(900);
    assert!(enhancer.tick().is_empty());
    assert_eq!(enhancer.drafts().load(&key)?, None);

    clock.advance_ms(100);
    assert_eq!(enhancer.tick(), vec![TimerKey::Autosave(id)]);
    let draft = enhancer.drafts().load(&key)?.expect("draft saved");
    assert_eq!(draft.get("title").map(String::as_str), Some("Momo"));
    assert_eq!(enhancer.feedback().visible_count(NoticeKind::Toast), 1);

    clock.advance(Duration::from_secs(2));
    assert_eq!(enhancer.tick(), vec![TimerKey::DismissToast]);
    assert_eq!(enhancer.feedback().visible_count(NoticeKind::Toast), 0);
    Ok(())
}

#[test]
fn huge_delays_stay_pending_instead_of_overflowing() {
    let clock = ManualClock::new();
    let settings = EnhancerSettings {
        autosave_delay: Duration::from_secs(u64::MAX),
        ..EnhancerSettings::default()
    };
    let mut enhancer = FormEnhancer::attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        MemoryStorage::new(),
        RecordingFeedback::new(),
        clock.clone(),
        settings,
    );
    let id = first_form(&enhancer);

    clock.advance_ms(1000);
    type_into(&mut enhancer, id, "title", "Momo");
    assert_eq!(enhancer.timers().deadline(&TimerKey::Autosave(id)), Some(Duration::MAX));
    clock.advance(Duration::from_secs(3600));
    assert!(enhancer.tick().is_empty());
}

#[test]
fn huge_toast_duration_saturates() {
    let clock = ManualClock::new();
    let settings = EnhancerSettings {
        toast_duration: Duration::MAX,
        ..EnhancerSettings::default()
    };
    let mut enhancer = FormEnhancer::attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        MemoryStorage::new(),
        RecordingFeedback::new(),
        clock.clone(),
        settings,
    );
    let id = first_form(&enhancer);

    type_into(&mut enhancer, id, "title", "Momo");
    clock.advance(Duration::from_secs(5));
    assert_eq!(enhancer.tick(), vec![TimerKey::Autosave(id)]);
    assert_eq!(enhancer.feedback().visible_count(NoticeKind::Toast), 1);
    assert_eq!(enhancer.timers().deadline(&TimerKey::DismissToast), Some(Duration::MAX));
}

#[test]
fn newer_toast_replaces_pending_one() {
    let clock = ManualClock::new();
    let mut enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Drawing)],
        MemoryStorage::new(),
        &clock,
    );
    let id = first_form(&enhancer);

    type_into(&mut enhancer, id, "title", "Fox");
    clock.advance_ms(1000);
    enhancer.tick();
    type_into(&mut enhancer, id, "title", "Fox in snow");
    clock.advance_ms(1000);
    enhancer.tick();

    let feedback = enhancer.feedback();
    assert_eq!(feedback.shown_count(NoticeKind::Toast), 2);
    assert_eq!(feedback.visible_count(NoticeKind::Toast), 1);
    assert_eq!(
        enhancer.timers().deadline(&TimerKey::DismissToast),
        Some(Duration::from_millis(4000))
    );
}

#[test]
fn draft_restores_after_reload_with_one_banner() -> Result<()> {
    let clock = ManualClock::new();
    let mut storage = MemoryStorage::new();
    {
        let mut enhancer = attach(
            vec![MemoryForm::add_form(FormKind::Drawing)],
            &mut storage,
            &clock,
        );
        let id = first_form(&enhancer);
        type_into(&mut enhancer, id, "title", "Harbour at dusk");
        type_into(&mut enhancer, id, "medium", "watercolor");
        type_into(&mut enhancer, id, "image", "C:\\fakepath\\harbour.png");
        clock.advance_ms(1000);
        enhancer.tick();
    }

    let stored = DraftStore::new(&mut storage)
        .load("form-draft-/web/drawing/add")?
        .expect("draft stored");
    assert!(!stored.contains_key("image"));

    let reload = ManualClock::new();
    let enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Drawing)],
        &mut storage,
        &reload,
    );
    let id = first_form(&enhancer);
    let form = enhancer.form(id).expect("form attached");
    assert_eq!(form.value("title"), Some("Harbour at dusk"));
    assert_eq!(form.value("medium"), Some("watercolor"));
    assert_eq!(form.value("image"), Some(""));

    let banners: Vec<_> = enhancer
        .feedback()
        .shown()
        .iter()
        .filter(|notice| notice.kind == NoticeKind::Banner)
        .collect();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].message, RESTORE_BANNER_MESSAGE);
    assert!(banners[0].dismissible);
    Ok(())
}

#[test]
fn banner_dismisses_itself_or_on_request() {
    let clock = ManualClock::new();
    let mut storage = MemoryStorage::new();
    storage
        .set_item("form-draft-/web/fitness/add", r#"{"title":"Long ride"}"#)
        .expect("seed draft");
    storage
        .set_item("form-draft-/web/reading/add", r#"{"title":"Momo"}"#)
        .expect("seed draft");

    let mut enhancer = attach(
        vec![
            MemoryForm::add_form(FormKind::Fitness),
            MemoryForm::add_form(FormKind::Reading),
        ],
        &mut storage,
        &clock,
    );
    let ids = enhancer.form_ids();
    assert_eq!(enhancer.feedback().visible_count(NoticeKind::Banner), 2);

    assert_eq!(
        enhancer.dispatch(ids[0], FormEvent::DismissBanner),
        FormOutcome::BannerDismissed
    );
    assert_eq!(
        enhancer.dispatch(ids[0], FormEvent::DismissBanner),
        FormOutcome::Ignored
    );
    assert!(!enhancer.timers().is_pending(&TimerKey::DismissBanner(ids[0])));

    clock.advance(Duration::from_secs(5));
    assert_eq!(enhancer.tick(), vec![TimerKey::DismissBanner(ids[1])]);
    assert_eq!(enhancer.feedback().visible_count(NoticeKind::Banner), 0);
}

#[test]
fn submit_clears_draft_and_decorates_once() -> Result<()> {
    let clock = ManualClock::new();
    let mut storage = MemoryStorage::new();
    storage.set_item("form-draft-/web/reading/edit/4", r#"{"title":"Heidi"}"#)?;

    let mut enhancer = attach(
        vec![MemoryForm::edit_form(FormKind::Reading, 4)],
        &mut storage,
        &clock,
    );
    let id = first_form(&enhancer);
    type_into(&mut enhancer, id, "notes", "chapter 3");
    assert!(enhancer.timers().is_pending(&TimerKey::Autosave(id)));

    assert_eq!(enhancer.dispatch(id, FormEvent::Submit), FormOutcome::Submitted);
    assert_eq!(
        enhancer.dispatch(id, FormEvent::Submit),
        FormOutcome::SubmitIgnored
    );
    assert!(!enhancer.timers().is_pending(&TimerKey::Autosave(id)));

    let form = enhancer.form(id).expect("form attached");
    assert_eq!(form.busy_decorations(), 1);
    assert_eq!(form.submit_label(), Some(SUBMIT_BUSY_LABEL));
    assert!(form.is_submit_disabled());

    type_into(&mut enhancer, id, "notes", "late edit");
    clock.advance_ms(5000);
    enhancer.tick();
    drop(enhancer);

    assert_eq!(storage.get_item("form-draft-/web/reading/edit/4")?, None);
    Ok(())
}

#[test]
fn storage_failures_are_swallowed() {
    let clock = ManualClock::new();
    let mut enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        MemoryStorage::with_quota(8),
        &clock,
    );
    let id = first_form(&enhancer);
    type_into(&mut enhancer, id, "title", "Momo");
    clock.advance_ms(1000);
    assert_eq!(enhancer.tick(), vec![TimerKey::Autosave(id)]);
    assert_eq!(enhancer.feedback().shown_count(NoticeKind::Toast), 0);

    let mut disabled = attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        MemoryStorage::disabled(),
        &clock,
    );
    let id = first_form(&disabled);
    assert_eq!(disabled.dispatch(id, FormEvent::Submit), FormOutcome::Submitted);
    assert!(disabled.feedback().shown().is_empty());
}

#[test]
fn corrupt_drafts_are_ignored_on_attach() {
    let clock = ManualClock::new();
    let mut storage = MemoryStorage::new();
    storage
        .set_item("form-draft-/web/reading/add", "{oops")
        .expect("seed draft");
    let enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Reading)],
        &mut storage,
        &clock,
    );
    assert!(enhancer.feedback().shown().is_empty());
    assert_eq!(enhancer.next_deadline(), None);
}

#[test]
fn sections_start_collapsed_and_open_to_natural_height() {
    let clock = ManualClock::new();
    let form = MemoryForm::add_form(FormKind::Reading).with_section("extra", None);
    let mut enhancer = attach(vec![form], MemoryStorage::new(), &clock);
    let id = first_form(&enhancer);

    assert_eq!(
        enhancer.section_state(id, "details"),
        Some(SectionState::Collapsed)
    );
    assert_eq!(
        enhancer.dispatch(id, FormEvent::HeaderClick("details".to_owned())),
        FormOutcome::Section(SectionState::Expanded(180))
    );
    assert_eq!(
        enhancer.form(id).and_then(|form| form.open_height("details")),
        Some(180)
    );

    let key = |key| FormEvent::HeaderKey {
        section: "details".to_owned(),
        key,
    };
    assert_eq!(enhancer.dispatch(id, key(Key::Other)), FormOutcome::Ignored);
    assert_eq!(
        enhancer.dispatch(id, key(Key::Space)),
        FormOutcome::Section(SectionState::Collapsed)
    );
    assert_eq!(
        enhancer.dispatch(id, key(Key::Enter)),
        FormOutcome::Section(SectionState::Expanded(180))
    );

    assert_eq!(
        enhancer.dispatch(id, FormEvent::HeaderClick("extra".to_owned())),
        FormOutcome::Section(SectionState::Expanded(0))
    );
    assert_eq!(
        enhancer.dispatch(id, FormEvent::HeaderClick("missing".to_owned())),
        FormOutcome::Ignored
    );
}

#[test]
fn forms_without_action_key_drafts_by_page() {
    let clock = ManualClock::new();
    let form = MemoryForm::new(None, "/web/journal")
        .with_field(FieldState::new("entry", FieldKind::TextArea))
        .without_submit();
    let mut enhancer = attach(vec![form], MemoryStorage::new(), &clock);
    let id = first_form(&enhancer);
    assert_eq!(
        enhancer.draft_key(id),
        Some(draft_key(None, "/web/journal").as_str())
    );
    assert_eq!(enhancer.dispatch(id, FormEvent::Submit), FormOutcome::Submitted);
    assert_eq!(
        enhancer.dispatch(FormId::new(9), FormEvent::Submit),
        FormOutcome::UnknownForm
    );
}

#[test]
fn drafts_survive_in_sqlite_storage() -> Result<()> {
    let (_dir, path) = temp_storage_path()?;
    let clock = ManualClock::new();
    {
        let mut enhancer = attach(
            vec![MemoryForm::add_form(FormKind::Fitness)],
            SqliteStorage::open(&path)?,
            &clock,
        );
        let id = first_form(&enhancer);
        type_into(&mut enhancer, id, "title", "Evening swim");
        clock.advance_ms(1000);
        enhancer.tick();
    }

    let enhancer = attach(
        vec![MemoryForm::add_form(FormKind::Fitness)],
        SqliteStorage::open(&path)?,
        &ManualClock::new(),
    );
    let id = first_form(&enhancer);
    assert_eq!(
        enhancer.form(id).and_then(|form| form.value("title")),
        Some("Evening swim")
    );
    Ok(())
}
