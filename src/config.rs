//! Widget configuration.
//!
//! A slideshow is described by a strategy name, the list of slide sources,
//! and any number of strategy options. Option keys that start with
//! [`UI_OPTION_PREFIX`] are forwarded to the UI strategy with the prefix
//! stripped; every other key stays with the slider.
//!
//! ```toml
//! ui = "default"
//! ui-width = 960
//! ui-touch = true
//!
//! [[slide]]
//! text = "Welcome"
//!
//! [[slide]]
//! image = "photos/harbour.jpg"
//! caption = "Harbour at dawn"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SlidesError};

/// Prefix marking keys that belong to the UI strategy.
pub const UI_OPTION_PREFIX: &str = "ui-";

/// Name of the strategy used when the configuration does not pick one.
pub const DEFAULT_UI: &str = "default";

fn default_ui() -> String {
    DEFAULT_UI.to_string()
}

/// Content of one slide.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SlideSource {
    /// Local image path or http(s) URL
    Image {
        image: String,
        #[serde(default)]
        caption: Option<String>,
    },
    /// Plain text card
    Text {
        text: String,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl SlideSource {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            caption: None,
        }
    }

    pub fn image(location: impl Into<String>) -> Self {
        Self::Image {
            image: location.into(),
            caption: None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Image { caption, .. } | Self::Text { caption, .. } => caption.as_deref(),
        }
    }
}

/// Full slideshow configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SlidesConfig {
    /// Registered name of the UI strategy
    #[serde(default = "default_ui")]
    pub ui: String,
    #[serde(default, rename = "slide")]
    pub slides: Vec<SlideSource>,
    /// Everything else, `ui-` prefixed strategy options included
    #[serde(flatten)]
    pub options: BTreeMap<String, toml::Value>,
}

impl SlidesConfig {
    pub fn new(slides: Vec<SlideSource>) -> Self {
        Self {
            ui: default_ui(),
            slides,
            options: BTreeMap::new(),
        }
    }

    /// Set a raw option. Use the `ui-` prefix for strategy options.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SlidesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded slideshow config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Fail fast on configurations no slider can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(SlidesError::NoSlides);
        }
        Ok(())
    }

    /// Strategy options with the `ui-` prefix stripped.
    pub fn ui_options(&self) -> UiOptions {
        let values = self
            .options
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(UI_OPTION_PREFIX)
                    .map(|stripped| (stripped.to_string(), value.clone()))
            })
            .collect();
        UiOptions { values }
    }
}

/// Options forwarded to a UI strategy, keys already stripped of `ui-`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiOptions {
    values: BTreeMap<String, toml::Value>,
}

impl UiOptions {
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric option; integers are accepted as well as floats.
    pub fn get_f32(&self, key: &str) -> Result<Option<f32>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(toml::Value::Float(v)) => Ok(Some(*v as f32)),
            Some(toml::Value::Integer(v)) => Ok(Some(*v as f32)),
            Some(_) => Err(invalid(key, "a number")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(toml::Value::Boolean(v)) => Ok(Some(*v)),
            Some(_) => Err(invalid(key, "a boolean")),
        }
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(toml::Value::Integer(v)) if *v >= 0 => Ok(Some(*v as u64)),
            Some(_) => Err(invalid(key, "a non-negative integer")),
        }
    }
}

fn invalid(key: &str, expected: &'static str) -> SlidesError {
    SlidesError::InvalidOption {
        key: key.to_string(),
        expected,
    }
}
