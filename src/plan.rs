//! # Render Plan
//!
//! Glue between the placeholder model and the external rendering engine.
//! For every placeholder with a field value, measure the text, resolve the
//! alignment origin, and emit a [`DrawCommand`]. The engine draws each
//! command verbatim — commands are already in the template's native pixel
//! space, so it must not re-derive any scale factor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::SourcePoint;
use crate::layout::resolve_origin;
use crate::measure::TextMeasure;
use crate::placeholder::{FieldKey, PlaceholderSet};

/// Field values for one certificate, keyed by field type.
pub type FieldValues = BTreeMap<FieldKey, String>;

/// Build a field-value map for the common case of a fully-filled
/// certificate.
pub fn certificate_fields(
    student_name: impl Into<String>,
    course_name: impl Into<String>,
    date: impl Into<String>,
    certificate_no: impl Into<String>,
) -> FieldValues {
    BTreeMap::from([
        (FieldKey::StudentName, student_name.into()),
        (FieldKey::CourseName, course_name.into()),
        (FieldKey::Date, date.into()),
        (FieldKey::CertificateNo, certificate_no.into()),
    ])
}

/// One text draw for the rendering engine: what to draw, where, and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub key: FieldKey,
    pub text: String,
    /// Top-left draw origin in source space.
    pub origin: SourcePoint,
    pub font_size: u32,
    pub color: String,
}

/// Resolve draw commands for every placeholder that has a field value.
///
/// Placeholders without a value, and values without a placeholder, are
/// skipped — the engine only draws what is both placed and filled in.
/// Output order follows the stable field-key order, so identical inputs
/// produce an identical plan.
pub fn resolve_plan(
    placeholders: &PlaceholderSet,
    values: &FieldValues,
    measure: &dyn TextMeasure,
) -> Vec<DrawCommand> {
    placeholders
        .iter()
        .filter_map(|p| {
            let text = values.get(&p.key)?;
            let extent = measure.measure(text, p.style.font_size);
            let origin = resolve_origin(p.rect, p.style.text_align, p.style.vertical_align, extent);
            Some(DrawCommand {
                key: p.key,
                text: text.clone(),
                origin,
                font_size: p.style.font_size,
                color: p.style.color.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SourceRect;
    use crate::layout::TextExtent;
    use crate::measure::ApproxMeasure;
    use crate::placeholder::{Placeholder, TextAlign, VerticalAlign, defaults_for};
    use pretty_assertions::assert_eq;

    /// Fixed-extent measurer so assertions stay arithmetic.
    struct FixedMeasure(TextExtent);

    impl TextMeasure for FixedMeasure {
        fn measure(&self, _text: &str, _font_size: u32) -> TextExtent {
            self.0
        }
    }

    #[test]
    fn test_plan_resolves_center_center() {
        let mut set = PlaceholderSet::new();
        let mut style = defaults_for(FieldKey::StudentName);
        style.text_align = TextAlign::Center;
        style.vertical_align = VerticalAlign::Center;
        set.upsert(Placeholder::new(
            FieldKey::StudentName,
            SourceRect::new(0, 0, 100, 40),
            style,
        ))
        .unwrap();

        let values = BTreeMap::from([(FieldKey::StudentName, "Jane Doe".to_string())]);
        let plan = resolve_plan(&set, &values, &FixedMeasure(TextExtent::new(60, 20)));

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].origin, SourcePoint::new(20, 10));
        assert_eq!(plan[0].text, "Jane Doe");
        assert_eq!(plan[0].font_size, 48);
    }

    #[test]
    fn test_plan_skips_unfilled_and_unplaced() {
        let mut set = PlaceholderSet::new();
        set.commit_geometry(FieldKey::StudentName, SourceRect::new(0, 0, 100, 40))
            .unwrap();
        set.commit_geometry(FieldKey::Date, SourceRect::new(0, 50, 100, 90))
            .unwrap();

        // Date placed but not filled; course filled but not placed
        let values = BTreeMap::from([
            (FieldKey::StudentName, "Jane Doe".to_string()),
            (FieldKey::CourseName, "Rust 101".to_string()),
        ]);
        let plan = resolve_plan(&set, &values, &ApproxMeasure);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].key, FieldKey::StudentName);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let mut set = PlaceholderSet::new();
        for (key, y) in [
            (FieldKey::CertificateNo, 0),
            (FieldKey::StudentName, 100),
            (FieldKey::Date, 200),
        ] {
            set.commit_geometry(key, SourceRect::new(0, y, 400, y + 60))
                .unwrap();
        }
        let values = certificate_fields("Jane Doe", "Rust 101", "2026-08-27", "CERT-0042");

        let a = resolve_plan(&set, &values, &ApproxMeasure);
        let b = resolve_plan(&set, &values, &ApproxMeasure);
        assert_eq!(a, b);

        // Stable key order regardless of commit order
        let keys: Vec<FieldKey> = a.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![FieldKey::StudentName, FieldKey::Date, FieldKey::CertificateNo]
        );
    }

    #[test]
    fn test_plan_carries_style() {
        let mut set = PlaceholderSet::new();
        let mut style = defaults_for(FieldKey::CertificateNo);
        style.color = "#990000".into();
        style.font_size = 14;
        set.upsert(Placeholder::new(
            FieldKey::CertificateNo,
            SourceRect::new(900, 740, 1150, 780),
            style,
        ))
        .unwrap();

        let values = BTreeMap::from([(FieldKey::CertificateNo, "CERT-0042".to_string())]);
        let plan = resolve_plan(&set, &values, &ApproxMeasure);
        assert_eq!(plan[0].color, "#990000");
        assert_eq!(plan[0].font_size, 14);
    }
}
