use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::hold_scroll::ScrollDirection;
use crate::visibility::{SlideDirection, TransformOrigin, TransitionDurations};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate used while tweens or frame-driven scrolling are running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// How many pixels one terminal cell represents when mapping offsets
    #[serde(default = "default_cell_px")]
    pub cell_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            cell_px: default_cell_px(),
        }
    }
}

impl UiConfig {
    /// Frame period for the animation FPS, never shorter than 1ms
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }
}

/// Easing curve applied by the built-in tween engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value when the tween finishes
    None,
    Linear,
    /// Quadratic ease-out
    #[default]
    Quadratic,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Enter/exit duration in seconds.
///
/// Accepts either a single number (used for both transitions) or a table
/// with `enter`/`exit` keys (`in`/`out` are accepted as aliases).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnimationDuration {
    Uniform(f64),
    Split { enter: f64, exit: f64 },
}

impl Default for AnimationDuration {
    fn default() -> Self {
        AnimationDuration::Uniform(0.5)
    }
}

impl AnimationDuration {
    /// Seconds for the enter transition
    pub fn enter_secs(&self) -> f64 {
        match *self {
            AnimationDuration::Uniform(secs) => secs,
            AnimationDuration::Split { enter, .. } => enter,
        }
    }

    /// Seconds for the exit transition
    pub fn exit_secs(&self) -> f64 {
        match *self {
            AnimationDuration::Uniform(secs) => secs,
            AnimationDuration::Split { exit, .. } => exit,
        }
    }

    /// Validate and convert to concrete durations
    pub fn resolve(&self) -> crate::Result<TransitionDurations> {
        Ok(TransitionDurations {
            enter: positive_secs("enter", self.enter_secs())?,
            exit: positive_secs("exit", self.exit_secs())?,
        })
    }
}

fn positive_secs(name: &str, secs: f64) -> crate::Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(crate::Error::Config(format!(
            "{} duration must be a positive number of seconds, got {}",
            name, secs
        )));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| {
        crate::Error::Config(format!("{} duration {} is out of range: {}", name, secs, e))
    })
}

// Custom deserializer to accept either a number or a table
impl<'de> Deserialize<'de> for AnimationDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct AnimationDurationVisitor;

        impl<'de> Visitor<'de> for AnimationDurationVisitor {
            type Value = AnimationDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number of seconds or a map with 'enter' and 'exit'")
            }

            fn visit_f64<E>(self, value: f64) -> Result<AnimationDuration, E>
            where
                E: de::Error,
            {
                Ok(AnimationDuration::Uniform(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<AnimationDuration, E>
            where
                E: de::Error,
            {
                Ok(AnimationDuration::Uniform(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<AnimationDuration, E>
            where
                E: de::Error,
            {
                Ok(AnimationDuration::Uniform(value as f64))
            }

            fn visit_map<M>(self, mut map: M) -> Result<AnimationDuration, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut enter: Option<f64> = None;
                let mut exit: Option<f64> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "enter" | "in" => {
                            if enter.is_some() {
                                return Err(de::Error::duplicate_field("enter"));
                            }
                            enter = Some(map.next_value()?);
                        }
                        "exit" | "out" => {
                            if exit.is_some() {
                                return Err(de::Error::duplicate_field("exit"));
                            }
                            exit = Some(map.next_value()?);
                        }
                        other => {
                            return Err(de::Error::unknown_field(other, &["enter", "exit"]));
                        }
                    }
                }

                Ok(AnimationDuration::Split {
                    enter: enter.ok_or_else(|| de::Error::missing_field("enter"))?,
                    exit: exit.ok_or_else(|| de::Error::missing_field("exit"))?,
                })
            }
        }

        deserializer.deserialize_any(AnimationDurationVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Enter/exit duration (seconds, or `{ enter, exit }`)
    #[serde(default)]
    pub duration: AnimationDuration,
    /// Which side the fade+slide panel enters from
    #[serde(default)]
    pub slide_direction: SlideDirection,
    /// Slide distance in pixels
    #[serde(default = "default_slide_length")]
    pub slide_length: f64,
    /// Anchor for the scaleX panel ("left", "center center", "right top", ...)
    #[serde(default = "default_transform_origin")]
    pub transform_origin: String,
    /// Easing used by the built-in engine
    #[serde(default)]
    pub easing: EasingType,
    /// Whether panels start mounted
    #[serde(default = "default_true")]
    pub initially_visible: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            duration: AnimationDuration::default(),
            slide_direction: SlideDirection::default(),
            slide_length: default_slide_length(),
            transform_origin: default_transform_origin(),
            easing: EasingType::default(),
            initially_visible: default_true(),
        }
    }
}

impl VisibilityConfig {
    pub fn durations(&self) -> crate::Result<TransitionDurations> {
        self.duration.resolve()
    }

    pub fn origin(&self) -> crate::Result<TransformOrigin> {
        self.transform_origin.parse()
    }
}

/// Scheduling strategy for hold scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Fixed wall-clock period
    #[default]
    Interval,
    /// One step per display frame
    Frame,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Distance advanced per tick, in pixels
    #[serde(default = "default_scroll_step")]
    pub step: f64,
    /// `{ vertical = "down" | "up" }` or `{ horizontal = "left" | "right" }`
    #[serde(default)]
    pub direction: ScrollDirection,
    /// "interval" or "frame"
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Tick period for the interval strategy
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Whether touch presses start scrolling
    #[serde(default = "default_true")]
    pub touch_enabled: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step: default_scroll_step(),
            direction: ScrollDirection::default(),
            strategy: StrategyKind::default(),
            interval_ms: default_interval_ms(),
            touch_enabled: default_true(),
        }
    }
}

impl ScrollConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Keymap configuration using Vim-style notation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Toggle the fade panel
    #[serde(default = "default_key_toggle_fade")]
    pub toggle_fade: String,
    /// Toggle the fade+slide panel
    #[serde(default = "default_key_toggle_slide")]
    pub toggle_slide: String,
    /// Toggle the scaleX panel
    #[serde(default = "default_key_toggle_scale")]
    pub toggle_scale: String,
    /// Toggle all panels at once
    #[serde(default = "default_key_toggle_all")]
    pub toggle_all: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            toggle_fade: default_key_toggle_fade(),
            toggle_slide: default_key_toggle_slide(),
            toggle_scale: default_key_toggle_scale(),
            toggle_all: default_key_toggle_all(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_toggle_fade() -> String { "f".to_string() }
fn default_key_toggle_slide() -> String { "s".to_string() }
fn default_key_toggle_scale() -> String { "x".to_string() }
fn default_key_toggle_all() -> String { "<Space>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revealkit")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_cell_px() -> f64 {
    10.0
}

fn default_slide_length() -> f64 {
    50.0
}

fn default_transform_origin() -> String {
    "center center".to_string()
}

fn default_scroll_step() -> f64 {
    2.0
}

fn default_interval_ms() -> u64 {
    10
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, at animation or tick time
    pub fn validate(&self) -> crate::Result<()> {
        self.visibility.durations()?;
        self.visibility.origin()?;

        if !self.visibility.slide_length.is_finite() {
            return Err(crate::Error::Config(format!(
                "slide_length must be finite, got {}",
                self.visibility.slide_length
            )));
        }
        if !self.scroll.step.is_finite() || self.scroll.step <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll step must be positive, got {}",
                self.scroll.step
            )));
        }
        if self.scroll.interval_ms == 0 {
            return Err(crate::Error::Config(
                "scroll interval_ms must be at least 1".to_string(),
            ));
        }
        if !self.ui.cell_px.is_finite() || self.ui.cell_px <= 0.0 {
            return Err(crate::Error::Config(format!(
                "cell_px must be positive, got {}",
                self.ui.cell_px
            )));
        }

        Ok(())
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/revealkit/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("revealkit")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used by the interactive demo
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("revealkit.log")
    }
}
