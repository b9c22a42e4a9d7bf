use std::sync::Arc;

use egui::{Color32, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::history::StrokeStore;
use crate::palette::STANDALONE_BACKGROUND;
use crate::stroke::{Stroke, StrokeRef};

/// How the board background is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMode {
    /// Nothing in overlay mode, the standalone dark fill otherwise.
    Off,
    /// The background color at the configured transparency.
    TransparentSolid,
    /// The background color, fully opaque.
    #[default]
    OpaqueSolid,
}

impl BackgroundMode {
    /// `off -> transparent-solid -> opaque-solid -> off`
    pub fn next(self) -> Self {
        match self {
            BackgroundMode::Off => BackgroundMode::TransparentSolid,
            BackgroundMode::TransparentSolid => BackgroundMode::OpaqueSolid,
            BackgroundMode::OpaqueSolid => BackgroundMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackgroundMode::Off => "BG: Off",
            BackgroundMode::TransparentSolid => "BG: Transparent",
            BackgroundMode::OpaqueSolid => "BG: Opaque",
        }
    }
}

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "drawingHistory")]
    pub timeline: Vec<StrokeRef>,
    pub history_index: i64,
    pub pan_offset: Vec2,
    #[serde(rename = "bgColor", with = "crate::palette::hex")]
    pub background_color: Color32,
    #[serde(rename = "bgMode")]
    pub background_mode: BackgroundMode,
    /// Seconds since the UNIX epoch at save time.
    #[serde(default)]
    pub saved_at: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            timeline: Vec::new(),
            history_index: -1,
            pan_offset: Vec2::ZERO,
            background_color: STANDALONE_BACKGROUND,
            background_mode: BackgroundMode::default(),
            saved_at: 0,
        }
    }
}

impl Document {
    /// Restore a history store from the saved timeline and cursor.
    pub fn to_store(&self) -> StrokeStore {
        StrokeStore::from_timeline(self.timeline.clone(), self.history_index)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a saved document, dropping whatever is damaged.
    ///
    /// Only malformed JSON is an error. Null, unparsable or pointless stroke
    /// entries are skipped, missing fields take their defaults and the cursor
    /// is clamped to the strokes that survived.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let defaults = Document::default();

        let timeline: Vec<StrokeRef> = match root.get("drawingHistory") {
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .filter_map(|(i, entry)| parse_stroke(i, entry))
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!("Ignoring saved timeline of unexpected type: {}", type_name(other));
                Vec::new()
            }
        };

        let history_index = root
            .get("historyIndex")
            .and_then(Value::as_i64)
            .unwrap_or(defaults.history_index)
            .clamp(-1, timeline.len() as i64 - 1);

        let background_color = root
            .get("bgColor")
            // Older saves used a different key
            .or_else(|| root.get("canvasColor"))
            .and_then(|value| field::<ColorField>(value))
            .map(|field| field.0)
            .unwrap_or(defaults.background_color);

        Ok(Self {
            timeline,
            history_index,
            pan_offset: root.get("panOffset").and_then(field).unwrap_or(defaults.pan_offset),
            background_color,
            background_mode: root.get("bgMode").and_then(field).unwrap_or(defaults.background_mode),
            saved_at: root.get("savedAt").and_then(Value::as_u64).unwrap_or(0),
        })
    }
}

#[derive(Deserialize)]
struct ColorField(#[serde(with = "crate::palette::hex")] Color32);

fn field<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

fn parse_stroke(index: usize, entry: &Value) -> Option<StrokeRef> {
    if entry.is_null() {
        warn!("Dropping null stroke at position {}", index);
        return None;
    }

    match Stroke::deserialize(entry) {
        Ok(stroke) if stroke.points().is_empty() => {
            warn!("Dropping stroke {} without points", stroke.id());
            None
        }
        Ok(stroke) => Some(Arc::new(stroke)),
        Err(err) => {
            warn!("Dropping unreadable stroke at position {}: {}", index, err);
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
