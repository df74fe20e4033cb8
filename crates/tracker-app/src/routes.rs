// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use url::Url;

use crate::{EntryKind, EntryRef, UserId};

const ROUTE_BASE: &str = "http://localhost/";
const WEB_ROOT: &str = "web";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route target {target:?} is not a valid URL or path")]
    Malformed { target: String },
    #[error("route target {target:?} does not match a known page")]
    Unknown { target: String },
}

/// Pages and form targets of the web interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    UserDashboard(UserId),
    List(EntryKind),
    Add(EntryKind),
    Edit(EntryRef),
    Delete(EntryRef),
}

impl Route {
    /// Parses a path (`/web/reading/edit/3`) or absolute URL. Query strings and
    /// fragments are ignored; a trailing slash is tolerated.
    pub fn parse(target: &str) -> Result<Self, RouteError> {
        let url = resolve(target)?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();
        let unknown = || RouteError::Unknown {
            target: target.to_owned(),
        };

        match segments.as_slice() {
            [WEB_ROOT] => Ok(Self::Home),
            [WEB_ROOT, "user", id] => parse_id(id)
                .map(|id| Self::UserDashboard(UserId::new(id)))
                .ok_or_else(unknown),
            [WEB_ROOT, kind] => EntryKind::parse(kind).map(Self::List).ok_or_else(unknown),
            [WEB_ROOT, kind, "add"] => EntryKind::parse(kind).map(Self::Add).ok_or_else(unknown),
            [WEB_ROOT, kind, action @ ("edit" | "delete"), id] => {
                let kind = EntryKind::parse(kind).ok_or_else(unknown)?;
                let entry = EntryRef::new(kind, parse_id(id).ok_or_else(unknown)?);
                Ok(if *action == "edit" {
                    Self::Edit(entry)
                } else {
                    Self::Delete(entry)
                })
            }
            _ => Err(unknown()),
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Home => format!("/{WEB_ROOT}"),
            Self::UserDashboard(user) => format!("/{WEB_ROOT}/user/{user}"),
            Self::List(kind) => format!("/{WEB_ROOT}/{kind}"),
            Self::Add(kind) => format!("/{WEB_ROOT}/{kind}/add"),
            Self::Edit(entry) => format!("/{WEB_ROOT}/{}/edit/{}", entry.kind(), entry.raw_id()),
            Self::Delete(entry) => {
                format!("/{WEB_ROOT}/{}/delete/{}", entry.kind(), entry.raw_id())
            }
        }
    }
}

/// Entity id carried as the last path segment of a form target, such as
/// `/web/reading/delete/7` or `/api/reading/7?confirm=1`.
pub fn entry_id_from_action(target: &str) -> Option<i64> {
    let url = resolve(target).ok()?;
    let last = url.path_segments()?.rev().find(|segment| !segment.is_empty())?;
    parse_id(last)
}

/// Path component of a form target or page URL, without query or fragment.
pub fn target_path(target: &str) -> Option<String> {
    resolve(target).ok().map(|url| url.path().to_owned())
}

fn resolve(target: &str) -> Result<Url, RouteError> {
    let malformed = |_| RouteError::Malformed {
        target: target.to_owned(),
    };
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(RouteError::Malformed {
            target: target.to_owned(),
        });
    }
    if trimmed.contains("://") {
        return Url::parse(trimmed).map_err(malformed);
    }
    Url::parse(ROUTE_BASE)
        .and_then(|base| base.join(trimmed))
        .map_err(malformed)
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
