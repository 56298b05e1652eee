//! L4 Atomic Layer: Viewport geometry types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The scrollable surface an animation drives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// The window / root viewport
    Window,
    /// A scrollable element, identified by name
    Element(String),
}

impl Target {
    pub fn element(name: impl Into<String>) -> Self {
        Target::Element(name.into())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Window => f.write_str("window"),
            Target::Element(name) => write!(f, "#{}", name),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    /// `window` selects the root viewport; anything else names an element,
    /// with an optional leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("window") {
            return Ok(Target::Window);
        }
        let name = s.strip_prefix('#').unwrap_or(s);
        if name.is_empty() {
            return Err("empty element name".to_string());
        }
        Ok(Target::Element(name.to_string()))
    }
}

/// A scroll offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the full scrollable content ("scene")
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Result of a viewport read: current offset plus scene size
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Position,
    pub scene: Dimensions,
}

impl Viewport {
    pub const fn new(offset: Position, scene: Dimensions) -> Self {
        Self { offset, scene }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!("window".parse::<Target>(), Ok(Target::Window));
        assert_eq!("WINDOW".parse::<Target>(), Ok(Target::Window));
        assert_eq!("#sidebar".parse::<Target>(), Ok(Target::element("sidebar")));
        assert_eq!("sidebar".parse::<Target>(), Ok(Target::element("sidebar")));
        assert!("#".parse::<Target>().is_err());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Window.to_string(), "window");
        assert_eq!(Target::element("outline").to_string(), "#outline");
    }
}
