use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scroll::{Animation, EasingType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Scroll animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Wait between the viewport read and the first frame (ms)
    #[serde(default)]
    pub delay_ms: f64,
    /// Animation duration (ms), must be positive
    #[serde(default = "default_duration")]
    pub duration_ms: f64,
    /// Easing curve: "linear", "cubic", "quintic", "ease-out", "ease-in-out", "back"
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms: default_duration(),
            easing: EasingType::default(),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(crate::Error::InvalidAnimation(format!(
                "duration_ms must be positive, got {}",
                self.duration_ms
            )));
        }
        if !self.delay_ms.is_finite() {
            return Err(crate::Error::InvalidAnimation(format!(
                "delay_ms must be finite, got {}",
                self.delay_ms
            )));
        }
        Ok(())
    }

    pub fn to_animation(&self) -> Animation {
        Animation::default()
            .with_delay(self.delay_ms)
            .with_duration(self.duration_ms)
            .with_easing(self.easing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

/// Highest frame rate the frame clock can honour (1ms per frame)
pub const MAX_ANIMATION_FPS: u32 = 1000;

impl UiConfig {
    pub fn validate(&self) -> crate::Result<()> {
        validate_fps(self.animation_fps)?;
        if self.tick_rate_ms == 0 {
            return Err(crate::Error::Config(
                "tick_rate_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check a frame rate is within `1..=MAX_ANIMATION_FPS`
pub fn validate_fps(fps: u32) -> crate::Result<()> {
    if fps == 0 || fps > MAX_ANIMATION_FPS {
        return Err(crate::Error::Config(format!(
            "animation_fps must be between 1 and {}, got {}",
            MAX_ANIMATION_FPS, fps
        )));
    }
    Ok(())
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_duration() -> f64 {
    1000.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.animation.validate()?;
        config.ui.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Always uses ~/.config/smoothscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("smoothscroll")
            .join("config.toml")
    }
}
