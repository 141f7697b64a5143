//! # Placeholder Model
//!
//! The persisted, resolution-independent record set for one template:
//! a mapping from [`FieldKey`] to one styled bounding box in source space.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust API construction and JSON persistence. The wire shape,
//! [`PlaceholderRecord`], tolerates legacy entries that carry style fields
//! but no rectangle — those are excluded from geometry consumers without
//! discarding the operator's style tuning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SelloError;
use crate::geometry::SourceRect;

/// Font size bounds accepted by validation, in points.
pub const FONT_SIZE_MIN: u32 = 12;
pub const FONT_SIZE_MAX: u32 = 72;

/// Default text color: the dark blue used by the stock certificate template.
pub const DEFAULT_COLOR: &str = "#0b2a4a";

/// The closed set of dynamic certificate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    StudentName,
    CourseName,
    Date,
    CertificateNo,
}

impl FieldKey {
    /// All field keys, in a stable order.
    pub const ALL: [FieldKey; 4] = [
        FieldKey::StudentName,
        FieldKey::CourseName,
        FieldKey::Date,
        FieldKey::CertificateNo,
    ];

    /// The snake_case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::StudentName => "student_name",
            FieldKey::CourseName => "course_name",
            FieldKey::Date => "date",
            FieldKey::CertificateNo => "certificate_no",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = SelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student_name" => Ok(FieldKey::StudentName),
            "course_name" => Ok(FieldKey::CourseName),
            "date" => Ok(FieldKey::Date),
            "certificate_no" => Ok(FieldKey::CertificateNo),
            other => Err(SelloError::UnknownFieldKey(other.to_string())),
        }
    }
}

/// Horizontal text alignment within a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text alignment within a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Operator-tunable style fields of a placeholder.
///
/// Kept separate from the geometry so a new box commit can replace the
/// rectangle while preserving the style the operator already dialed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points, `12..=72`.
    pub font_size: u32,
    /// Text color as `#rgb` or `#rrggbb` hex.
    pub color: String,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
}

impl TextStyle {
    /// Parse the color into RGB components. Only valid on a style that
    /// passed validation.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.color)
    }
}

/// Parse `#rgb` or `#rrggbb` into RGB components.
///
/// Returns `None` for anything else — this doubles as the well-formedness
/// check used by validation.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17; // expand 0xf -> 0xff
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for i in 0..3 {
                out[i] = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

/// One named, styled bounding box in source space.
///
/// Invariants (enforced by [`PlaceholderSet::upsert`]):
/// `rect.x1 < rect.x2`, `rect.y1 < rect.y2`, style fields valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub key: FieldKey,
    #[serde(flatten)]
    pub rect: SourceRect,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl Placeholder {
    pub fn new(key: FieldKey, rect: SourceRect, style: TextStyle) -> Self {
        Self { key, rect, style }
    }
}

/// Wire/storage shape of a placeholder entry.
///
/// Mirrors what the persistence gateway actually stores: the key as a
/// string (older data may carry keys outside the current enumeration) and
/// optional rectangle coordinates (point-only legacy entries have none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderRecord {
    pub key: String,
    #[serde(default)]
    pub x1: Option<i32>,
    #[serde(default)]
    pub y1: Option<i32>,
    #[serde(default)]
    pub x2: Option<i32>,
    #[serde(default)]
    pub y2: Option<i32>,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
}

fn default_font_size() -> u32 {
    48
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl PlaceholderRecord {
    fn style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size,
            color: self.color.clone(),
            text_align: self.text_align,
            vertical_align: self.vertical_align,
        }
    }

    fn rect(&self) -> Option<SourceRect> {
        match (self.x1, self.y1, self.x2, self.y2) {
            (Some(x1), Some(y1), Some(x2), Some(y2)) => Some(SourceRect::new(x1, y1, x2, y2)),
            _ => None,
        }
    }
}

impl From<&Placeholder> for PlaceholderRecord {
    fn from(p: &Placeholder) -> Self {
        Self {
            key: p.key.as_str().to_string(),
            x1: Some(p.rect.x1),
            y1: Some(p.rect.y1),
            x2: Some(p.rect.x2),
            y2: Some(p.rect.y2),
            font_size: p.style.font_size,
            color: p.style.color.clone(),
            text_align: p.style.text_align,
            vertical_align: p.style.vertical_align,
        }
    }
}

/// Built-in style defaults per field type.
///
/// Supplied so the layout resolver always has complete alignment/size data,
/// even for a box that was just drawn and not yet styled.
pub fn defaults_for(key: FieldKey) -> TextStyle {
    let (font_size, text_align) = match key {
        FieldKey::StudentName => (48, TextAlign::Center),
        FieldKey::CourseName => (36, TextAlign::Center),
        FieldKey::Date => (16, TextAlign::Left),
        FieldKey::CertificateNo => (18, TextAlign::Left),
    };
    TextStyle {
        font_size,
        color: DEFAULT_COLOR.to_string(),
        text_align,
        vertical_align: VerticalAlign::Center,
    }
}

/// The placeholder set for one template: at most one entry per field key.
///
/// Insertion order is irrelevant; iteration order is the stable key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderSet {
    entries: BTreeMap<FieldKey, Placeholder>,
    /// Style memory for keys whose persisted record had no geometry.
    /// Consulted on the next geometry commit and re-emitted on save so the
    /// operator's tuning survives even without a box.
    styles: BTreeMap<FieldKey, TextStyle>,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert, replacing any existing entry with the same key.
    ///
    /// On error the set is left untouched.
    pub fn upsert(&mut self, placeholder: Placeholder) -> Result<(), SelloError> {
        validate(&placeholder)?;
        self.styles.remove(&placeholder.key);
        self.entries.insert(placeholder.key, placeholder);
        Ok(())
    }

    /// Commit a freshly drawn rectangle for `key`, keeping the previously
    /// tuned style fields (or the built-in defaults if there are none).
    pub fn commit_geometry(&mut self, key: FieldKey, rect: SourceRect) -> Result<(), SelloError> {
        let style = self
            .entries
            .get(&key)
            .map(|p| p.style.clone())
            .or_else(|| self.styles.get(&key).cloned())
            .unwrap_or_else(|| defaults_for(key));
        self.upsert(Placeholder::new(key, rect, style))
    }

    /// Remove an entry. Removing a non-existent key is a no-op.
    pub fn remove(&mut self, key: FieldKey) -> Option<Placeholder> {
        self.styles.remove(&key);
        self.entries.remove(&key)
    }

    pub fn get(&self, key: FieldKey) -> Option<&Placeholder> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.entries.values()
    }

    /// The complete set as a list, for rendering.
    pub fn to_list(&self) -> Vec<Placeholder> {
        self.entries.values().cloned().collect()
    }

    /// Display-space rectangles for redrawing committed boxes on the
    /// preview canvas. Derived, never the source of truth — style-only
    /// entries (no geometry) have nothing to reconstruct and are excluded.
    pub fn display_rects(
        &self,
        ctx: &crate::geometry::DisplayContext,
    ) -> Vec<(FieldKey, crate::geometry::DisplayRect)> {
        self.entries
            .values()
            .map(|p| (p.key, ctx.to_display_rect(p.rect)))
            .collect()
    }

    /// The set as wire records, including style-only entries so they are
    /// not lost on save.
    pub fn to_records(&self) -> Vec<PlaceholderRecord> {
        let mut records: Vec<PlaceholderRecord> =
            self.entries.values().map(PlaceholderRecord::from).collect();
        for (key, style) in &self.styles {
            records.push(PlaceholderRecord {
                key: key.as_str().to_string(),
                x1: None,
                y1: None,
                x2: None,
                y2: None,
                font_size: style.font_size,
                color: style.color.clone(),
                text_align: style.text_align,
                vertical_align: style.vertical_align,
            });
        }
        records
    }

    /// Rebuild a set from persisted records.
    ///
    /// Records with an unknown key are skipped with a log line. Records
    /// missing geometry are kept as style memory only — they contribute no
    /// rectangle but their style is preserved and reused on the next commit.
    /// Records with invalid geometry or style are rejected per-record the
    /// same way `upsert` would reject them, also skipped with a log line.
    pub fn from_records(records: &[PlaceholderRecord]) -> Self {
        let mut set = Self::new();
        for record in records {
            let key = match record.key.parse::<FieldKey>() {
                Ok(key) => key,
                Err(e) => {
                    eprintln!("sello: skipping persisted placeholder: {e}");
                    continue;
                }
            };
            match record.rect() {
                Some(rect) => {
                    if let Err(e) = set.upsert(Placeholder::new(key, rect, record.style())) {
                        eprintln!("sello: skipping persisted placeholder for {key}: {e}");
                    }
                }
                None => {
                    set.styles.insert(key, record.style());
                }
            }
        }
        set
    }
}

/// Strict validation of a wire record list, for accepting an operator save.
///
/// Unlike [`PlaceholderSet::from_records`] (the tolerant load path), this
/// rejects the whole list on the first unknown key or invalid entry, so a
/// failed save leaves the persisted state untouched. Style-only records
/// (no geometry) are accepted.
pub fn validate_records(records: &[PlaceholderRecord]) -> Result<(), SelloError> {
    let mut set = PlaceholderSet::new();
    for record in records {
        let key: FieldKey = record.key.parse()?;
        if let Some(rect) = record.rect() {
            set.upsert(Placeholder::new(key, rect, record.style()))?;
        }
    }
    Ok(())
}

/// Validation shared by every mutation path.
fn validate(p: &Placeholder) -> Result<(), SelloError> {
    if p.rect.is_degenerate() {
        return Err(SelloError::InvalidPlaceholder(format!(
            "zero-area box for {}: ({}, {}, {}, {})",
            p.key, p.rect.x1, p.rect.y1, p.rect.x2, p.rect.y2
        )));
    }
    if p.rect.x1 > p.rect.x2 || p.rect.y1 > p.rect.y2 {
        return Err(SelloError::InvalidPlaceholder(format!(
            "box for {} is not normalized",
            p.key
        )));
    }
    if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&p.style.font_size) {
        return Err(SelloError::InvalidPlaceholder(format!(
            "font size {} outside {}..={}",
            p.style.font_size, FONT_SIZE_MIN, FONT_SIZE_MAX
        )));
    }
    if parse_hex_color(&p.style.color).is_none() {
        return Err(SelloError::InvalidPlaceholder(format!(
            "malformed hex color {:?}",
            p.style.color
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> SourceRect {
        SourceRect::new(x1, y1, x2, y2)
    }

    #[test]
    fn test_upsert_replaces_same_key() {
        let mut set = PlaceholderSet::new();
        set.commit_geometry(FieldKey::StudentName, rect(0, 0, 100, 40))
            .unwrap();
        set.commit_geometry(FieldKey::StudentName, rect(10, 10, 200, 80))
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(FieldKey::StudentName).unwrap().rect,
            rect(10, 10, 200, 80)
        );
    }

    #[test]
    fn test_commit_keeps_style_replaces_geometry() {
        let mut set = PlaceholderSet::new();
        let mut style = defaults_for(FieldKey::Date);
        style.font_size = 22;
        style.color = "#ff0000".into();
        set.upsert(Placeholder::new(FieldKey::Date, rect(0, 0, 50, 20), style))
            .unwrap();

        set.commit_geometry(FieldKey::Date, rect(100, 100, 300, 150))
            .unwrap();
        let p = set.get(FieldKey::Date).unwrap();
        assert_eq!(p.rect, rect(100, 100, 300, 150));
        assert_eq!(p.style.font_size, 22);
        assert_eq!(p.style.color, "#ff0000");
    }

    #[test]
    fn test_commit_without_prior_entry_uses_defaults() {
        let mut set = PlaceholderSet::new();
        set.commit_geometry(FieldKey::CourseName, rect(0, 0, 100, 40))
            .unwrap();
        let p = set.get(FieldKey::CourseName).unwrap();
        assert_eq!(p.style, defaults_for(FieldKey::CourseName));
        assert_eq!(p.style.font_size, 36);
    }

    #[test]
    fn test_zero_area_rejected_state_untouched() {
        let mut set = PlaceholderSet::new();
        let err = set
            .upsert(Placeholder::new(
                FieldKey::Date,
                rect(50, 50, 50, 80),
                defaults_for(FieldKey::Date),
            ))
            .unwrap_err();
        assert!(matches!(err, SelloError::InvalidPlaceholder(_)));
        assert!(set.get(FieldKey::Date).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_font_size_bounds() {
        let mut set = PlaceholderSet::new();
        for bad in [11, 73, 0] {
            let mut style = defaults_for(FieldKey::StudentName);
            style.font_size = bad;
            let err = set
                .upsert(Placeholder::new(FieldKey::StudentName, rect(0, 0, 10, 10), style))
                .unwrap_err();
            assert!(matches!(err, SelloError::InvalidPlaceholder(_)));
        }
        for ok in [12, 72, 48] {
            let mut style = defaults_for(FieldKey::StudentName);
            style.font_size = ok;
            set.upsert(Placeholder::new(FieldKey::StudentName, rect(0, 0, 10, 10), style))
                .unwrap();
        }
    }

    #[test]
    fn test_color_validation() {
        assert_eq!(parse_hex_color("#0b2a4a"), Some([0x0b, 0x2a, 0x4a]));
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);

        let mut set = PlaceholderSet::new();
        let mut style = defaults_for(FieldKey::Date);
        style.color = "blue".into();
        let err = set
            .upsert(Placeholder::new(FieldKey::Date, rect(0, 0, 10, 10), style))
            .unwrap_err();
        assert!(matches!(err, SelloError::InvalidPlaceholder(_)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut set = PlaceholderSet::new();
        assert!(set.remove(FieldKey::Date).is_none());
        set.commit_geometry(FieldKey::Date, rect(0, 0, 10, 10)).unwrap();
        assert!(set.remove(FieldKey::Date).is_some());
        assert!(set.remove(FieldKey::Date).is_none());
    }

    #[test]
    fn test_field_key_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(key.as_str().parse::<FieldKey>().unwrap(), key);
        }
        assert!(matches!(
            "qr_code".parse::<FieldKey>(),
            Err(SelloError::UnknownFieldKey(_))
        ));
    }

    #[test]
    fn test_records_round_trip() {
        let mut set = PlaceholderSet::new();
        set.commit_geometry(FieldKey::StudentName, rect(200, 200, 600, 300))
            .unwrap();
        set.commit_geometry(FieldKey::Date, rect(50, 700, 250, 750))
            .unwrap();

        let records = set.to_records();
        let rebuilt = PlaceholderSet::from_records(&records);
        assert_eq!(rebuilt, set);
    }

    #[test]
    fn test_style_only_record_survives_load_and_save() {
        let records = vec![PlaceholderRecord {
            key: "certificate_no".into(),
            x1: None,
            y1: None,
            x2: None,
            y2: None,
            font_size: 20,
            color: "#333333".into(),
            text_align: TextAlign::Right,
            vertical_align: VerticalAlign::Bottom,
        }];
        let mut set = PlaceholderSet::from_records(&records);

        // No rectangle to reconstruct...
        assert!(set.get(FieldKey::CertificateNo).is_none());
        assert!(set.to_list().is_empty());
        // ...but the style is not deleted on save...
        assert_eq!(set.to_records(), records);

        // ...and the next commit picks it up.
        set.commit_geometry(FieldKey::CertificateNo, rect(10, 10, 90, 40))
            .unwrap();
        let p = set.get(FieldKey::CertificateNo).unwrap();
        assert_eq!(p.style.font_size, 20);
        assert_eq!(p.style.text_align, TextAlign::Right);
    }

    #[test]
    fn test_unknown_key_record_skipped() {
        let records = vec![
            PlaceholderRecord {
                key: "qr_code".into(),
                x1: Some(0),
                y1: Some(0),
                x2: Some(10),
                y2: Some(10),
                font_size: 48,
                color: DEFAULT_COLOR.into(),
                text_align: TextAlign::Center,
                vertical_align: VerticalAlign::Center,
            },
            PlaceholderRecord {
                key: "date".into(),
                x1: Some(0),
                y1: Some(0),
                x2: Some(10),
                y2: Some(10),
                font_size: 16,
                color: DEFAULT_COLOR.into(),
                text_align: TextAlign::Left,
                vertical_align: VerticalAlign::Center,
            },
        ];
        let set = PlaceholderSet::from_records(&records);
        assert_eq!(set.len(), 1);
        assert!(set.get(FieldKey::Date).is_some());
    }

    #[test]
    fn test_display_rects_reproject_committed_boxes() {
        use crate::geometry::DisplayContext;

        let mut set = PlaceholderSet::new();
        set.commit_geometry(FieldKey::StudentName, rect(200, 200, 600, 300))
            .unwrap();
        // Style-only entry contributes no rectangle
        set.styles
            .insert(FieldKey::Date, defaults_for(FieldKey::Date));

        let ctx = DisplayContext::new(600, 400, 1200, 800);
        let rects = set.display_rects(&ctx);
        assert_eq!(rects.len(), 1);
        let (key, r) = rects[0];
        assert_eq!(key, FieldKey::StudentName);
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (100, 100, 300, 150));
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{"key": "student_name", "x1": 200, "y1": 200, "x2": 600, "y2": 300}"#;
        let record: PlaceholderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.font_size, 48);
        assert_eq!(record.color, DEFAULT_COLOR);
        assert_eq!(record.text_align, TextAlign::Center);

        let set = PlaceholderSet::from_records(&[record]);
        let p = set.get(FieldKey::StudentName).unwrap();
        assert_eq!(p.rect, rect(200, 200, 600, 300));
    }
}
