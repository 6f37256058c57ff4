// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field definitions for each observation type's form.
//!
//! Every form carries its type-specific fields followed by the common
//! equipment and notes fields. [`validate_fields`] is the single check used
//! by both the interactive add flow and the gateway.

use std::collections::BTreeMap;

use serde::Serialize;
use starlog_core::{ObservationType, StarlogError};

/// `(value, label)` pairs of a choice field.
pub type Choices = &'static [(&'static str, &'static str)];

/// Input kind and its constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text { max_len: usize },
    LongText,
    Choice { choices: Choices },
    Integer { min: i64, max: i64 },
    Decimal { min: f64, max: f64 },
}

/// One form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    pub help: &'static str,
}

const ANTONIADI: Choices = &[
    ("I", "I"),
    ("II", "II"),
    ("III", "III"),
    ("IV", "IV"),
    ("V", "V"),
];

const SOLAR_SYSTEM_BODIES: Choices = &[
    ("sun", "Sun"),
    ("moon", "Moon"),
    ("mercury", "Mercury"),
    ("venus", "Venus"),
    ("mars", "Mars"),
    ("jupiter", "Jupiter"),
    ("saturn", "Saturn"),
    ("uranus", "Uranus"),
    ("neptune", "Neptune"),
    ("other", "Other"),
];

const VISIBILITY: Choices = &[
    ("easy", "Easy to see"),
    ("moderate", "Moderate difficulty"),
    ("difficult", "Difficult/faint"),
    ("invisible", "Could not see"),
];

const EVENT_TYPES: Choices = &[
    ("comet", "Comet"),
    ("meteor_shower", "Meteor Shower"),
    ("solar_eclipse", "Solar Eclipse"),
    ("lunar_eclipse", "Lunar Eclipse"),
    ("aurora", "Aurora"),
    ("other", "Other Special Event"),
];

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    help: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
        help,
    }
}

const SOLAR_SYSTEM_FIELDS: &[FieldSpec] = &[
    field(
        "celestial_body",
        "Celestial body",
        FieldKind::Choice {
            choices: SOLAR_SYSTEM_BODIES,
        },
        true,
        "",
    ),
    field(
        "altitude_degrees",
        "Altitude (degrees)",
        FieldKind::Integer { min: 0, max: 90 },
        false,
        "Altitude above the horizon.",
    ),
    field(
        "central_meridian_deg",
        "Central meridian (degrees)",
        FieldKind::Decimal {
            min: 0.0,
            max: 359.99,
        },
        false,
        "Which longitude of the planet faced Earth.",
    ),
    field(
        "phase_fraction",
        "Phase fraction",
        FieldKind::Decimal { min: 0.0, max: 1.0 },
        false,
        "How much of the disk was lit.",
    ),
    field(
        "disk_diameter_arcsec",
        "Disk diameter (arcsec)",
        FieldKind::Decimal {
            min: 0.0,
            max: 100.0,
        },
        false,
        "",
    ),
];

const STAR_FIELDS: &[FieldSpec] = &[
    field(
        "star_name",
        "Star name",
        FieldKind::Text { max_len: 200 },
        true,
        "e.g. Sirius, Mira, HD 209458",
    ),
    field(
        "magnitude_estimate",
        "Magnitude estimate",
        FieldKind::Decimal {
            min: -1.5,
            max: 15.0,
        },
        false,
        "Lower numbers are brighter.",
    ),
    field(
        "finder_chart_used",
        "Finder chart",
        FieldKind::Text { max_len: 200 },
        false,
        "e.g. AAVSO chart 15424 ABC",
    ),
];

const DEEP_SKY_FIELDS: &[FieldSpec] = &[
    field(
        "object_name",
        "Object name",
        FieldKind::Text { max_len: 200 },
        true,
        "e.g. M31, NGC 7000",
    ),
    field(
        "visibility_rating",
        "Visibility",
        FieldKind::Choice {
            choices: VISIBILITY,
        },
        false,
        "",
    ),
];

const SPECIAL_EVENT_FIELDS: &[FieldSpec] = &[
    field(
        "event_type",
        "Event type",
        FieldKind::Choice {
            choices: EVENT_TYPES,
        },
        true,
        "",
    ),
    field(
        "event_name",
        "Event name",
        FieldKind::Text { max_len: 200 },
        false,
        "e.g. Comet NEOWISE",
    ),
];

const COMMON_FIELDS: &[FieldSpec] = &[
    field(
        "antoniadi_scale",
        "Seeing (Antoniadi)",
        FieldKind::Choice { choices: ANTONIADI },
        false,
        "I is perfect, V is very poor.",
    ),
    field(
        "telescope_size_type",
        "Telescope",
        FieldKind::Text { max_len: 50 },
        false,
        "e.g. 8-inch Newtonian",
    ),
    field(
        "magnification_used",
        "Magnification",
        FieldKind::Text { max_len: 25 },
        false,
        "e.g. 150x",
    ),
    field(
        "eyepieces_used",
        "Eyepieces",
        FieldKind::Text { max_len: 25 },
        false,
        "e.g. 25mm Plössl",
    ),
    field(
        "filters_used",
        "Filters",
        FieldKind::Text { max_len: 25 },
        false,
        "e.g. Moon filter",
    ),
    field("additional_notes", "Notes", FieldKind::LongText, false, ""),
];

fn specific_fields(ty: ObservationType) -> &'static [FieldSpec] {
    match ty {
        ObservationType::SolarSystem => SOLAR_SYSTEM_FIELDS,
        ObservationType::Star => STAR_FIELDS,
        ObservationType::DeepSky => DEEP_SKY_FIELDS,
        ObservationType::SpecialEvent => SPECIAL_EVENT_FIELDS,
    }
}

/// All fields of `ty`'s form, type-specific first.
pub fn fields_for(ty: ObservationType) -> impl Iterator<Item = &'static FieldSpec> {
    specific_fields(ty).iter().chain(COMMON_FIELDS.iter())
}

/// Looks up one field of `ty`'s form.
pub fn field_spec(ty: ObservationType, name: &str) -> Option<&'static FieldSpec> {
    fields_for(ty).find(|f| f.name == name)
}

/// Field whose value names the observed object.
pub fn object_name_field(ty: ObservationType) -> &'static str {
    match ty {
        ObservationType::SolarSystem => "celestial_body",
        ObservationType::Star => "star_name",
        ObservationType::DeepSky => "object_name",
        ObservationType::SpecialEvent => "event_name",
    }
}

/// Display name of the observed object.
///
/// Choice values are shown by label. A special event without a name falls
/// back to its event type.
pub fn object_name(ty: ObservationType, fields: &BTreeMap<String, String>) -> Option<String> {
    let value = |name: &str| {
        fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| display_value(ty, name, v))
    };
    match ty {
        ObservationType::SpecialEvent => value("event_name").or_else(|| value("event_type")),
        _ => value(object_name_field(ty)),
    }
}

/// Label of a choice value, or the value itself for other kinds.
pub fn display_value(ty: ObservationType, name: &str, value: &str) -> String {
    match field_spec(ty, name).map(|f| f.kind) {
        Some(FieldKind::Choice { choices }) => choices
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

/// Checks one value against its field's constraints.
pub fn validate_value(spec: &FieldSpec, value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return if spec.required {
            Err(format!("{} is required", spec.label))
        } else {
            Ok(())
        };
    }
    match spec.kind {
        FieldKind::Text { max_len } if value.chars().count() > max_len => Err(format!(
            "{} must be at most {max_len} characters",
            spec.label
        )),
        FieldKind::Choice { choices } if !choices.iter().any(|(v, _)| *v == value) => {
            let allowed: Vec<&str> = choices.iter().map(|(v, _)| *v).collect();
            Err(format!(
                "{} must be one of: {}",
                spec.label,
                allowed.join(", ")
            ))
        }
        FieldKind::Integer { min, max } => match value.parse::<i64>() {
            Ok(n) if (min..=max).contains(&n) => Ok(()),
            _ => Err(format!(
                "{} must be a whole number between {min} and {max}",
                spec.label
            )),
        },
        FieldKind::Decimal { min, max } => match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= min && n <= max => Ok(()),
            _ => Err(format!(
                "{} must be a number between {min} and {max}",
                spec.label
            )),
        },
        _ => Ok(()),
    }
}

/// Validates a submitted form, collecting every problem.
///
/// Unknown field names are rejected so typos are not silently dropped.
pub fn validate_fields(
    ty: ObservationType,
    fields: &BTreeMap<String, String>,
) -> Result<(), StarlogError> {
    let mut problems = Vec::new();

    for name in fields.keys() {
        if field_spec(ty, name).is_none() {
            problems.push(format!("unknown field `{name}` for {} form", ty.label()));
        }
    }
    for spec in fields_for(ty) {
        let value = fields.get(spec.name).map(String::as_str).unwrap_or("");
        if let Err(problem) = validate_value(spec, value) {
            problems.push(problem);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(StarlogError::Validation(problems.join("; ")))
    }
}
