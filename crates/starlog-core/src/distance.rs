// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Distance derivation from catalog data and human-readable formatting.

use crate::error::StarlogError;

/// Miles in one light-year, as used for display.
pub const MILES_PER_LIGHT_YEAR: f64 = 5.88e12;

/// Light-minutes in one light-year.
const LIGHT_MINUTES_PER_YEAR: f64 = 525_600.0;

/// A distance in both display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub light_years: f64,
    pub miles: f64,
}

impl Distance {
    fn from_light_years(light_years: f64) -> Self {
        Self {
            light_years,
            miles: light_years * MILES_PER_LIGHT_YEAR,
        }
    }
}

/// Distance from a parallax in milliarcseconds (SIMBAD `plx_value`).
pub fn distance_from_parallax(parallax_mas: f64) -> Result<Distance, StarlogError> {
    if !parallax_mas.is_finite() || parallax_mas <= 0.0 {
        return Err(StarlogError::Validation(format!(
            "parallax must be positive, got {parallax_mas}"
        )));
    }
    Ok(Distance::from_light_years(3260.0 / parallax_mas))
}

/// Distance from a one-way light time in minutes (JPL Horizons `lighttime`).
pub fn distance_from_lighttime(minutes: f64) -> Result<Distance, StarlogError> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(StarlogError::Validation(format!(
            "light time must be positive, got {minutes}"
        )));
    }
    Ok(Distance::from_light_years(minutes / LIGHT_MINUTES_PER_YEAR))
}

/// Renders a large number as e.g. "5.3 trillion" or "147 billion".
pub fn humanize_large_number(value: f64) -> String {
    const SCALES: [(f64, &str); 4] = [
        (1e12, "trillion"),
        (1e9, "billion"),
        (1e6, "million"),
        (1e3, "thousand"),
    ];

    if value >= 1e15 {
        return format!("{:.1} quadrillion", value / 1e15);
    }
    for (scale, name) in SCALES {
        if value >= scale {
            let scaled = value / scale;
            return if scaled >= 100.0 {
                format!("{scaled:.0} {name}")
            } else {
                format!("{scaled:.1} {name}")
            };
        }
    }
    format!("{value:.0}")
}

/// Renders a distance in miles, or "distance unknown".
pub fn humanize_distance_miles(miles: Option<f64>) -> String {
    match miles {
        Some(m) if m > 0.0 => format!("{} miles", humanize_large_number(m)),
        _ => "distance unknown".to_string(),
    }
}
