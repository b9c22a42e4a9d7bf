//! Hex color parsing and the built-in palettes.

use egui::Color32;

use crate::error::{EngineError, EngineResult};

pub const PEN_COLORS: [&str; 8] = [
    "#FFFFFF", "#EF4444", "#F97316", "#EAB308", "#22C55E", "#3B82F6", "#8B5CF6", "#EC4899",
];

pub const BACKGROUND_COLORS: [&str; 5] = ["#111827", "#374151", "#4B5563", "#fdfbfb", "#f3e7e9"];

/// Fill of the `off` background outside overlay mode.
pub const STANDALONE_BACKGROUND: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_hex(text: &str) -> EngineResult<Color32> {
    let invalid = || EngineError::InvalidColor(text.to_string());
    let digits = text.trim().trim_start_matches('#');

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if expanded.len() == 8 { channel(6)? } else { 255 };

    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// `#RRGGBB`, or `#RRGGBBAA` when the color is not opaque.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == u8::MAX {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// The same color with its alpha replaced; `alpha` is clamped to `0..=1`.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Serde glue storing colors as hex strings.
///
/// Deserialization also accepts the `[r, g, b, a]` array form.
pub mod hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Hex(String),
        Rgba([u8; 4]),
    }

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Hex(text) => super::parse_hex(&text).map_err(de::Error::custom),
            Repr::Rgba([r, g, b, a]) => Ok(Color32::from_rgba_unmultiplied(r, g, b, a)),
        }
    }
}
