//! Radar settings and their TOML file format.
//!
//! ```toml
//! shape = "circle"
//! show_gang_zones = true
//! more_icons = false
//! circle_size = 265
//! border_thickness = 8
//! offset_x = 85
//! offset_y = 55
//! circle_color = [255, 255, 255]
//! ```
//!
//! Every key is optional. `load`/`from_toml_str` are lenient: a value outside
//! its bounds keeps the default and logs a warning. `validate` is the strict
//! check for callers that prefer rejection.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::RadarShape;
use crate::types::Rgba;

/// Bounds of the pixel sizes.
pub const SIZE_BOUNDS: RangeInclusive<u32> = 50..=800;

/// Bounds of the border thickness.
pub const BORDER_BOUNDS: RangeInclusive<u32> = 1..=50;

/// Bounds of the screen offsets.
pub const OFFSET_BOUNDS: RangeInclusive<u32> = 0..=1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{key} = {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("{key} must have 3 or 4 channels in 0..=255")]
    BadColor { key: &'static str },
}

/// Validated radar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSettings {
    /// Content (and default border) shape.
    pub shape: RadarShape,
    pub show_gang_zones: bool,
    /// Adds the supplementary shop/service icons.
    pub more_icons: bool,
    /// Circle diameter at 1920x1080.
    pub circle_size: u32,
    pub square_size_x: u32,
    pub square_size_y: u32,
    pub border_thickness: u32,
    /// Distance from the left screen edge at 1920 wide.
    pub offset_x: u32,
    /// Distance from the bottom screen edge at 1080 high.
    pub offset_y: u32,
    #[serde(with = "rgba_array")]
    pub background_color: Rgba,
    /// Tint applied to the composited map.
    #[serde(with = "rgba_array")]
    pub circle_color: Rgba,
    #[serde(with = "rgba_array")]
    pub border_color: Rgba,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            shape: RadarShape::Circle,
            show_gang_zones: true,
            more_icons: false,
            circle_size: 265,
            square_size_x: 265,
            square_size_y: 265,
            border_thickness: 8,
            offset_x: 85,
            offset_y: 55,
            background_color: Rgba::new(123, 196, 249, 255),
            circle_color: Rgba::WHITE,
            border_color: Rgba::BLACK,
        }
    }
}

/// On-disk form. Missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    shape: Option<RadarShape>,
    show_gang_zones: Option<bool>,
    more_icons: Option<bool>,
    circle_size: Option<i64>,
    square_size_x: Option<i64>,
    square_size_y: Option<i64>,
    border_thickness: Option<i64>,
    offset_x: Option<i64>,
    offset_y: Option<i64>,
    background_color: Option<Vec<i64>>,
    circle_color: Option<Vec<i64>>,
    border_color: Option<Vec<i64>>,
}

impl RadarSettings {
    /// Read settings from a TOML file, falling back to defaults per key.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        log::info!("radar settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Parse settings, keeping the default for any out-of-range value.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(text)?;
        let mut settings = Self::default();

        if let Some(shape) = file.shape {
            settings.shape = shape;
        }
        if let Some(v) = file.show_gang_zones {
            settings.show_gang_zones = v;
        }
        if let Some(v) = file.more_icons {
            settings.more_icons = v;
        }

        apply_bounded(&mut settings.circle_size, file.circle_size, "circle_size", &SIZE_BOUNDS);
        apply_bounded(&mut settings.square_size_x, file.square_size_x, "square_size_x", &SIZE_BOUNDS);
        apply_bounded(&mut settings.square_size_y, file.square_size_y, "square_size_y", &SIZE_BOUNDS);
        apply_bounded(
            &mut settings.border_thickness,
            file.border_thickness,
            "border_thickness",
            &BORDER_BOUNDS,
        );
        apply_bounded(&mut settings.offset_x, file.offset_x, "offset_x", &OFFSET_BOUNDS);
        apply_bounded(&mut settings.offset_y, file.offset_y, "offset_y", &OFFSET_BOUNDS);

        apply_color(&mut settings.background_color, file.background_color, "background_color");
        apply_color(&mut settings.circle_color, file.circle_color, "circle_color");
        apply_color(&mut settings.border_color, file.border_color, "border_color");

        Ok(settings)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Strict check of every bounded value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("circle_size", self.circle_size, &SIZE_BOUNDS)?;
        check("square_size_x", self.square_size_x, &SIZE_BOUNDS)?;
        check("square_size_y", self.square_size_y, &SIZE_BOUNDS)?;
        check("border_thickness", self.border_thickness, &BORDER_BOUNDS)?;
        check("offset_x", self.offset_x, &OFFSET_BOUNDS)?;
        check("offset_y", self.offset_y, &OFFSET_BOUNDS)?;
        Ok(())
    }
}

/// Colors are written as `[r, g, b, a]` so the file form reads back.
mod rgba_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::types::Rgba;

    pub fn serialize<S: Serializer>(color: &Rgba, s: S) -> Result<S::Ok, S::Error> {
        [color.r, color.g, color.b, color.a].serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgba, D::Error> {
        let [r, g, b, a] = <[u8; 4]>::deserialize(d)?;
        Ok(Rgba::new(r, g, b, a))
    }
}

fn check(key: &'static str, value: u32, bounds: &RangeInclusive<u32>) -> Result<(), ConfigError> {
    if bounds.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value: value as i64,
            min: *bounds.start() as i64,
            max: *bounds.end() as i64,
        })
    }
}

fn apply_bounded(
    slot: &mut u32,
    value: Option<i64>,
    key: &'static str,
    bounds: &RangeInclusive<u32>,
) {
    let Some(value) = value else {
        return;
    };
    match u32::try_from(value) {
        Ok(v) if bounds.contains(&v) => *slot = v,
        _ => log::warn!(
            "{key} = {value} outside {}..={}, keeping {}",
            bounds.start(),
            bounds.end(),
            slot
        ),
    }
}

fn apply_color(slot: &mut Rgba, value: Option<Vec<i64>>, key: &'static str) {
    let Some(channels) = value else {
        return;
    };
    match parse_color(&channels) {
        Some(color) => *slot = color,
        None => log::warn!("{}", ConfigError::BadColor { key }),
    }
}

/// `[r, g, b]` or `[r, g, b, a]`, alpha defaulting to opaque.
fn parse_color(channels: &[i64]) -> Option<Rgba> {
    if !(3..=4).contains(&channels.len()) {
        return None;
    }
    let mut out = [255u8; 4];
    for (slot, &c) in out.iter_mut().zip(channels) {
        *slot = u8::try_from(c).ok()?;
    }
    Some(Rgba::new(out[0], out[1], out[2], out[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let s = RadarSettings::from_toml_str("").unwrap();
        assert_eq!(s, RadarSettings::default());
    }

    #[test]
    fn test_values_within_bounds_are_applied() {
        let s = RadarSettings::from_toml_str(
            "shape = \"square\"\nsquare_size_x = 400\nsquare_size_y = 200\noffset_x = 0\nmore_icons = true\n",
        )
        .unwrap();
        assert_eq!(s.shape, RadarShape::Square);
        assert_eq!(s.square_size_x, 400);
        assert_eq!(s.square_size_y, 200);
        assert_eq!(s.offset_x, 0);
        assert!(s.more_icons);
    }

    #[test]
    fn test_out_of_range_keeps_default() {
        let s = RadarSettings::from_toml_str("circle_size = 900\nborder_thickness = 0\noffset_y = -4\n")
            .unwrap();
        assert_eq!(s.circle_size, 265, "oversized circle should not be clamped to 800");
        assert_eq!(s.border_thickness, 8);
        assert_eq!(s.offset_y, 55);
    }

    #[test]
    fn test_colors_with_and_without_alpha() {
        let s = RadarSettings::from_toml_str(
            "circle_color = [10, 20, 30]\nborder_color = [1, 2, 3, 4]\nbackground_color = [300, 0, 0]\n",
        )
        .unwrap();
        assert_eq!(s.circle_color, Rgba::new(10, 20, 30, 255));
        assert_eq!(s.border_color, Rgba::new(1, 2, 3, 4));
        assert_eq!(s.background_color, Rgba::new(123, 196, 249, 255));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = RadarSettings::from_toml_str("circle_size = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err}");
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let settings = RadarSettings {
            border_thickness: 51,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::OutOfRange { key, value, .. }) => {
                assert_eq!(key, "border_thickness");
                assert_eq!(value, 51);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
        assert!(RadarSettings::default().validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = RadarSettings {
            shape: RadarShape::Square,
            offset_x: 120,
            ..Default::default()
        };
        let text = settings.to_toml_string().unwrap();
        let back = RadarSettings::from_toml_str(&text).unwrap();
        assert_eq!(settings, back);
    }
}
