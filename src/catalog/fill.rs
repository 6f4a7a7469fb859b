use std::fmt;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{DesignerError, DesignerResult};

/// Value painted into a region.
///
/// JSON/text form: `"#RRGGBB"` (or `#RRGGBBAA`) for a color, `""` for none, any other token is a
/// pattern name resolved to a tileable image.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    /// Unassigned; paints nothing.
    #[default]
    None,
    /// Flat color.
    Color(Rgba8),
    /// Named pattern finish, e.g. `carbon_black`.
    Pattern(PatternName),
}

impl Fill {
    /// Parse the textual form.
    pub fn parse(s: &str) -> DesignerResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::None);
        }
        if s.starts_with('#') {
            return Rgba8::parse_hex(s).map(Self::Color);
        }
        PatternName::new(s).map(Self::Pattern)
    }

    pub fn color(hex: &str) -> DesignerResult<Self> {
        Rgba8::parse_hex(hex).map(Self::Color)
    }

    pub fn pattern(name: impl Into<String>) -> DesignerResult<Self> {
        PatternName::new(name).map(Self::Pattern)
    }

    /// Whether drawing this fill can change any pixel.
    pub fn is_visible(&self) -> bool {
        match self {
            Self::None => false,
            Self::Color(c) => !c.is_transparent(),
            Self::Pattern(_) => true,
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Color(c) => write!(f, "{c}"),
            Self::Pattern(p) => f.write_str(p.as_str()),
        }
    }
}

impl serde::Serialize for Fill {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Fill {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Hull finish selection: the solid hull color, or a pattern that overrides it visually.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum HullFinish {
    #[default]
    Solid,
    Pattern(PatternName),
}

impl HullFinish {
    pub const SOLID: &'static str = "solid";

    pub fn parse(s: &str) -> DesignerResult<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(Self::SOLID) {
            return Ok(Self::Solid);
        }
        PatternName::new(s).map(Self::Pattern)
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    pub fn pattern(&self) -> Option<&PatternName> {
        match self {
            Self::Solid => None,
            Self::Pattern(p) => Some(p),
        }
    }
}

impl fmt::Display for HullFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => f.write_str(Self::SOLID),
            Self::Pattern(p) => f.write_str(p.as_str()),
        }
    }
}

impl serde::Serialize for HullFinish {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HullFinish {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Name of a tileable pattern image.
///
/// Only built through [`PatternName::new`], so every value prints back to text that parses to the
/// same [`Fill`] or [`HullFinish`]: non-empty, `[A-Za-z0-9_-]` only, never `solid`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternName(String);

impl PatternName {
    pub fn new(name: impl Into<String>) -> DesignerResult<Self> {
        let name = name.into();
        validate_token("pattern name", &name)?;
        if name.eq_ignore_ascii_case(HullFinish::SOLID) {
            return Err(DesignerError::validation(format!(
                "pattern name '{name}' is reserved for the solid hull finish"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Asset-name tokens end up as single path segments, so only `[A-Za-z0-9_-]` is allowed.
pub(crate) fn validate_token(what: &str, s: &str) -> DesignerResult<()> {
    if s.is_empty() {
        return Err(DesignerError::validation(format!("{what} must be non-empty")));
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(DesignerError::validation(format!(
            "{what} '{s}' may only contain ASCII letters, digits, '_' and '-'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/fill.rs"]
mod tests;
