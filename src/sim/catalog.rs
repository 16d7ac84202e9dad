//! Hazard catalog and the record → hazard adapter
//!
//! The catalog is a read-only list of near-earth-object records handed in by
//! the session controller. Records are decoded leniently: a nested field with
//! the wrong shape is treated as absent, never as an error.

use glam::Vec2;
use rand::Rng;
use serde_json::Value;

use super::state::{Hazard, HazardOrigin, PlayField};
use crate::error::Result;
use crate::sanitize;
use crate::tuning::Tuning;

/// One external record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRecord {
    pub name: Option<String>,
    /// `estimated_diameter.kilometers.estimated_diameter_max`
    pub max_diameter_km: Option<f64>,
}

impl CatalogRecord {
    pub fn new(name: impl Into<String>, max_diameter_km: f64) -> Self {
        Self {
            name: Some(name.into()),
            max_diameter_km: Some(max_diameter_km),
        }
    }

    /// Decode a record from a JSON value, ignoring anything malformed
    pub fn from_value(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let max_diameter_km = value
            .get("estimated_diameter")
            .and_then(|d| d.get("kilometers"))
            .and_then(|k| k.get("estimated_diameter_max"))
            .and_then(Value::as_f64);
        Self {
            name,
            max_diameter_km,
        }
    }

    /// Maximum diameter in meters, if the record carries a usable one
    pub fn diameter_m(&self) -> Option<f32> {
        self.max_diameter_km
            .filter(|km| km.is_finite())
            .map(|km| sanitize((km * 1000.0) as f32))
    }
}

/// Read-only collection of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Decode a near-earth-object feed document
    ///
    /// Accepts either the feed shape (`{"near_earth_objects": {"<date>": [...]}}`,
    /// flattened in date order) or a bare array of records. A document that is
    /// valid JSON but has neither shape yields an empty catalog.
    pub fn from_feed_json(json: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(json)?;

        let records: Vec<CatalogRecord> = match &doc {
            Value::Array(items) => items.iter().map(CatalogRecord::from_value).collect(),
            Value::Object(_) => match doc.get("near_earth_objects") {
                Some(Value::Object(by_date)) => {
                    let mut dates: Vec<&String> = by_date.keys().collect();
                    dates.sort();
                    dates
                        .into_iter()
                        .filter_map(|date| by_date.get(date).and_then(Value::as_array))
                        .flatten()
                        .map(CatalogRecord::from_value)
                        .collect()
                }
                Some(Value::Array(items)) => items.iter().map(CatalogRecord::from_value).collect(),
                _ => {
                    log::warn!("Catalog feed has no near_earth_objects, using synthetic hazards");
                    Vec::new()
                }
            },
            _ => {
                log::warn!("Catalog feed is not an object or array, using synthetic hazards");
                Vec::new()
            }
        };

        log::info!("Catalog loaded with {} records", records.len());
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Uniformly chosen record, or `None` for an empty catalog
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&CatalogRecord> {
        if self.records.is_empty() {
            None
        } else {
            self.records.get(rng.random_range(0..self.records.len()))
        }
    }
}

/// Logarithmic display size, saturating within the tuned size bounds
pub fn display_size(magnitude: f32, tuning: &Tuning) -> f32 {
    let raw = (sanitize(magnitude) + tuning.hazard_size_offset).ln() * tuning.hazard_size_scale;
    sanitize(raw)
        .max(tuning.hazard_size_min)
        .min(tuning.hazard_size_max)
}

/// Descent coefficient for catalog hazards
pub fn descent_coefficient(magnitude: f32, tuning: &Tuning) -> f32 {
    let log = (sanitize(magnitude) + tuning.descent_log_offset).ln();
    (tuning.descent_base + sanitize(log) * tuning.descent_log_scale).min(tuning.descent_max)
}

/// Uniform draw from `[min, max]`, collapsing to `min` for an inverted range
fn inclusive<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Build a hazard from an optional catalog record
///
/// A record always yields a catalog hazard (defaulting its magnitude when the
/// diameter is missing); no record yields a synthetic one.
pub fn hazard_from_record<R: Rng>(
    record: Option<&CatalogRecord>,
    field: &PlayField,
    tuning: &Tuning,
    rng: &mut R,
) -> Hazard {
    let (magnitude, descent, origin, name) = match record {
        Some(record) => {
            let magnitude = record.diameter_m().unwrap_or(tuning.default_magnitude);
            (
                magnitude,
                descent_coefficient(magnitude, tuning),
                HazardOrigin::Catalog,
                Some(record.name.clone().unwrap_or_else(|| "NEO".to_string())),
            )
        }
        None => (
            inclusive(rng, tuning.synthetic_magnitude_min, tuning.synthetic_magnitude_max),
            inclusive(rng, tuning.synthetic_descent_min, tuning.synthetic_descent_max),
            HazardOrigin::Synthetic,
            None,
        ),
    };

    let size = display_size(magnitude, tuning);
    let x = field.random_x(tuning.hazard_margin, rng);
    Hazard {
        pos: Vec2::new(x, -size),
        size,
        descent,
        magnitude,
        origin,
        name,
    }
}
