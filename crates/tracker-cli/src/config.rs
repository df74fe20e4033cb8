// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracker_forms::EnhancerSettings;

use crate::logging::{LogConfig, LogFormat};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";
const MAX_DURATION: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub forms: Forms,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            forms: Forms::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub path: Option<String>,
    pub quota_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Forms {
    pub autosave_delay: Option<String>,
    pub toast_duration: Option<String>,
    pub banner_duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("TRACKER_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set TRACKER_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(tracker_store::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [storage], [forms], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `tracker --print-example-config` for the current layout",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(storage_path) = &self.storage.path {
            tracker_store::validate_storage_path(storage_path)?;
        }

        if let Some(quota) = self.storage.quota_bytes
            && quota <= 0
        {
            bail!(
                "storage.quota_bytes in {} must be positive, got {}",
                path.display(),
                quota
            );
        }

        for (name, raw) in [
            ("forms.autosave_delay", &self.forms.autosave_delay),
            ("forms.toast_duration", &self.forms.toast_duration),
            ("forms.banner_duration", &self.forms.banner_duration),
        ] {
            let Some(raw) = raw else {
                continue;
            };
            let parsed =
                parse_duration(raw).with_context(|| format!("{name} in {}", path.display()))?;
            if parsed.is_zero() {
                bail!("{name} in {} must be positive, got {raw}", path.display());
            }
            if parsed > MAX_DURATION {
                bail!(
                    "{name} in {} must be at most 60m (3600s), got {raw}",
                    path.display()
                );
            }
        }

        if let Some(format) = &self.logging.format
            && LogFormat::parse(format).is_none()
        {
            bail!(
                "logging.format in {} must be \"compact\" or \"json\", got {format:?}",
                path.display()
            );
        }

        if let Some(level) = &self.logging.level {
            LogConfig::check_directives(level)
                .with_context(|| format!("logging.level in {}", path.display()))?;
        }

        Ok(())
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => tracker_store::default_storage_path(),
        }
    }

    pub fn quota_bytes(&self) -> usize {
        self.storage
            .quota_bytes
            .and_then(|quota| usize::try_from(quota).ok())
            .unwrap_or(tracker_store::DEFAULT_QUOTA_BYTES)
    }

    pub fn enhancer_settings(&self) -> Result<EnhancerSettings> {
        let defaults = EnhancerSettings::default();
        let forms = &self.forms;
        Ok(EnhancerSettings {
            autosave_delay: duration_or(forms.autosave_delay.as_deref(), defaults.autosave_delay)?,
            toast_duration: duration_or(forms.toast_duration.as_deref(), defaults.toast_duration)?,
            banner_duration: duration_or(
                forms.banner_duration.as_deref(),
                defaults.banner_duration,
            )?,
        })
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            directives: self
                .logging
                .level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            format: self
                .logging
                .format
                .as_deref()
                .and_then(LogFormat::parse)
                .unwrap_or_default(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# progress tracker config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is the platform data dir (for example ~/.local/share/{}/{})\n# path = \"/absolute/path/to/storage.db\"\nquota_bytes = {}\n\n[forms]\nautosave_delay = \"1s\"\ntoast_duration = \"2s\"\nbanner_duration = \"5s\"\n\n[logging]\n# Any tracing filter, such as \"info\" or \"tracker_forms=debug\". TRACKER_LOG wins when set.\nlevel = \"{}\"\n# \"compact\" or \"json\"\nformat = \"compact\"\n",
            path.display(),
            tracker_store::APP_NAME,
            tracker_store::STORAGE_FILE_NAME,
            tracker_store::DEFAULT_QUOTA_BYTES,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn duration_or(raw: Option<&str>, default: Duration) -> Result<Duration> {
    match raw {
        Some(raw) => parse_duration(raw),
        None => Ok(default),
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large; use at most 60m"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 2s)")
}
