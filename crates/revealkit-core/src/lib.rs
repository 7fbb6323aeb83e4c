pub mod axis;
pub mod config;
pub mod engine;
pub mod error;
pub mod hold_scroll;
pub mod motion;
pub mod visibility;

pub use config::{AppConfig, EasingType, StrategyKind};
pub use error::{Error, Result};
