//! Engine overrides read from `data-*` attributes on the canvas element.

use ink_core::Config;
use std::str::FromStr;

pub const CANVAS_ID: &str = "ink-canvas";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub config: Config,
    pub log_level: log::Level,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config: Config::default(),
            log_level: log::Level::Info,
        }
    }
}

/// Build settings from an attribute lookup. Unparseable values are logged and
/// the default kept.
pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();
    if let Some(secs) = parse::<f64>(&attr, "data-cycle-secs") {
        settings.config = settings.config.with_cycle_secs(secs);
    }
    if let Some(dpr) = parse::<f64>(&attr, "data-max-dpr") {
        settings.config = settings.config.with_max_dpr(dpr);
    }
    if let Some(level) = parse::<log::Level>(&attr, "data-log-level") {
        settings.log_level = level;
    }
    settings
}

fn parse<T: FromStr>(attr: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = attr(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[config] ignoring {}={:?}", name, raw);
            None
        }
    }
}
