// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Seeded list-page rows shaped like the server renders them.

use time::{Date, Duration, Month};
use tracker_app::{
    DrawingMedium, DrawingStatus, EntryKind, EntryRef, FitnessStatus, FitnessType, IntensityLevel,
    ReadingStatus, ReadingType, Route, UserId,
};
use tracker_table::TableRow;

const PEOPLE: [&str; 4] = ["Ada", "Linus", "Grace", "Ronja"];

const BOOK_TITLES: [&str; 10] = [
    "Momo",
    "The Neverending Story",
    "Pippi Longstocking",
    "Emil and the Detectives",
    "The Hobbit",
    "Matilda",
    "Anne of Green Gables",
    "Little Women",
    "Treasure Island",
    "Heidi",
];
const AUTHORS: [&str; 8] = [
    "Michael Ende",
    "Astrid Lindgren",
    "Erich Kästner",
    "J. R. R. Tolkien",
    "Roald Dahl",
    "L. M. Montgomery",
    "Louisa May Alcott",
    "Johanna Spyri",
];
const DRAWING_SUBJECTS: [&str; 8] = [
    "Fox in snow",
    "Harbour at dusk",
    "Grandma's kitchen",
    "Lighthouse",
    "Cat portrait",
    "Autumn leaves",
    "City skyline",
    "Sunflowers",
];
const WORKOUT_TITLES: [&str; 8] = [
    "Morning run",
    "Lunch walk",
    "Leg day",
    "Evening swim",
    "Hill repeats",
    "Stretch session",
    "Club match",
    "Long ride",
];

const REFERENCE_YEAR: i32 = 2025;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Users rendered in the person filter, as `(id, name)`.
pub fn demo_users() -> Vec<(UserId, &'static str)> {
    PEOPLE
        .iter()
        .enumerate()
        .map(|(index, name)| (UserId::new(index as i64 + 1), *name))
        .collect()
}

#[derive(Debug, Clone)]
pub struct EntryFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl EntryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    /// `count` rows of the list page for `kind`, with ids counting up from 1.
    pub fn rows(&mut self, kind: EntryKind, count: usize) -> Vec<TableRow> {
        (0..count)
            .map(|_| match kind {
                EntryKind::Reading => self.reading_row(),
                EntryKind::Drawing => self.drawing_row(),
                EntryKind::Fitness => self.fitness_row(),
            })
            .collect()
    }

    pub fn reading_row(&mut self) -> TableRow {
        let title = *self.pick(&BOOK_TITLES);
        let author = *self.pick(&AUTHORS);
        let kind = *self.pick(ReadingType::ALL);
        let status = *self.pick(ReadingStatus::ALL);
        let progress = self.rng.int_n(101);
        let started = self.date();
        let completed = if status == ReadingStatus::Completed {
            (started + Duration::days(self.rng.int_n(60) as i64 + 1)).to_string()
        } else {
            String::new()
        };
        self.row(
            EntryKind::Reading,
            status.as_str(),
            kind.as_str(),
            &format!("{title} {author}"),
            vec![
                title.to_owned(),
                author.to_owned(),
                kind.label().to_owned(),
                status.label().to_owned(),
                format!("{progress}%"),
                started.to_string(),
                completed,
            ],
        )
    }

    pub fn drawing_row(&mut self) -> TableRow {
        let subject = *self.pick(&DRAWING_SUBJECTS);
        let medium = *self.pick(DrawingMedium::ALL);
        let status = *self.pick(DrawingStatus::ALL);
        let hours = self.rng.int_n(40) as f64 / 4.0;
        let sessions = self.rng.int_n(12) + 1;
        let date = self.date();
        self.row(
            EntryKind::Drawing,
            status.as_str(),
            medium.as_str(),
            subject,
            vec![
                subject.to_owned(),
                subject.to_owned(),
                medium.label().to_owned(),
                status.label().to_owned(),
                format!("{hours}"),
                sessions.to_string(),
                date.to_string(),
            ],
        )
    }

    pub fn fitness_row(&mut self) -> TableRow {
        let title = *self.pick(&WORKOUT_TITLES);
        let activity = *self.pick(FitnessType::ALL);
        let status = *self.pick(FitnessStatus::ALL);
        let intensity = *self.pick(IntensityLevel::ALL);
        let minutes = self.rng.int_n(120) + 10;
        let distance = self.rng.int_n(200) as f64 / 10.0;
        let date = self.date();
        self.row(
            EntryKind::Fitness,
            status.as_str(),
            activity.as_str(),
            title,
            vec![
                title.to_owned(),
                activity.label().to_owned(),
                date.to_string(),
                minutes.to_string(),
                format!("{distance} km"),
                intensity.label().to_owned(),
                status.label().to_owned(),
            ],
        )
    }

    fn row(
        &mut self,
        kind: EntryKind,
        status: &str,
        category: &str,
        search: &str,
        mut cells: Vec<String>,
    ) -> TableRow {
        let id = self.next_id;
        self.next_id += 1;
        let (user, name) = self.pick_user();
        cells.push(name.to_owned());

        let delete = Route::Delete(EntryRef::new(kind, id)).path();
        TableRow::new(format!("{kind}-row-{id}"))
            .with_attr("user", user.to_string())
            .with_attr("status", status)
            .with_attr("type", category)
            .with_attr("search", search.to_lowercase())
            .with_cells(cells)
            .with_action(delete)
    }

    fn pick_user(&mut self) -> (UserId, &'static str) {
        let index = self.rng.int_n(PEOPLE.len());
        (UserId::new(index as i64 + 1), PEOPLE[index])
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.int_n(items.len())]
    }

    fn date(&mut self) -> Date {
        let month = Month::try_from(self.rng.int_n(12) as u8 + 1).unwrap_or(Month::January);
        let day = self.rng.int_n(28) as u8 + 1;
        Date::from_calendar_date(REFERENCE_YEAR, month, day).unwrap_or(Date::MIN)
    }
}
