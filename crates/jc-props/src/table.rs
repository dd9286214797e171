//! Gas property table and the shared column interpolator.

use crate::error::{PropsError, PropsResult};
use jc_core::numeric::lerp_clamped;
use std::fmt;

/// Column of the gas property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasProperty {
    /// Temperature [K]
    Temperature,
    /// Specific enthalpy [kJ/kg]
    Enthalpy,
    /// Relative pressure (isentropic marker, dimensionless)
    RelativePressure,
}

impl GasProperty {
    pub const ALL: [GasProperty; 3] = [
        GasProperty::Temperature,
        GasProperty::Enthalpy,
        GasProperty::RelativePressure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GasProperty::Temperature => "temperature",
            GasProperty::Enthalpy => "enthalpy",
            GasProperty::RelativePressure => "relative pressure",
        }
    }
}

impl fmt::Display for GasProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tabulated state of the working gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasRow {
    /// Temperature [K]
    pub temperature: f64,
    /// Specific enthalpy [kJ/kg]
    pub enthalpy: f64,
    /// Relative pressure [-]
    pub relative_pressure: f64,
}

impl GasRow {
    pub fn new(temperature: f64, enthalpy: f64, relative_pressure: f64) -> Self {
        Self {
            temperature,
            enthalpy,
            relative_pressure,
        }
    }

    pub fn get(&self, property: GasProperty) -> f64 {
        match property {
            GasProperty::Temperature => self.temperature,
            GasProperty::Enthalpy => self.enthalpy,
            GasProperty::RelativePressure => self.relative_pressure,
        }
    }
}

/// Immutable (temperature, enthalpy, relative pressure) table.
///
/// Every column is strictly increasing, so any column can serve as the lookup
/// key for any other.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable {
    rows: Vec<GasRow>,
}

impl PropertyTable {
    /// Build a table, rejecting fewer than two rows, non-finite entries, or
    /// any column that is not strictly increasing.
    pub fn new(rows: Vec<GasRow>) -> PropsResult<Self> {
        if rows.len() < 2 {
            return Err(PropsError::MalformedTable {
                reason: format!("gas table needs at least 2 rows, got {}", rows.len()),
            });
        }

        for (i, row) in rows.iter().enumerate() {
            for property in GasProperty::ALL {
                if !row.get(property).is_finite() {
                    return Err(PropsError::MalformedTable {
                        reason: format!("non-finite {property} in row {i}"),
                    });
                }
            }
        }

        for (i, pair) in rows.windows(2).enumerate() {
            for property in GasProperty::ALL {
                if pair[1].get(property) <= pair[0].get(property) {
                    return Err(PropsError::MalformedTable {
                        reason: format!(
                            "{property} not strictly increasing at row {} ({} after {})",
                            i + 1,
                            pair[1].get(property),
                            pair[0].get(property)
                        ),
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[GasRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tabulated (min, max) of a column.
    pub fn domain(&self, property: GasProperty) -> (f64, f64) {
        let first = self.rows.first().map_or(f64::NAN, |r| r.get(property));
        let last = self.rows.last().map_or(f64::NAN, |r| r.get(property));
        (first, last)
    }

    /// Interpolate `to` at the point where column `from` equals `value`.
    pub fn interpolate(&self, value: f64, from: GasProperty, to: GasProperty) -> PropsResult<f64> {
        interpolate_column(
            &self.rows,
            value,
            from.name(),
            |r| r.get(from),
            |r| r.get(to),
        )
    }
}

/// Linear interpolation over rows whose `key` column is strictly increasing.
///
/// Uses a ceiling search (first row with key >= value). Queries below the first
/// key, above the last key, or non-finite are `OutOfRange`; a query equal to a
/// node returns that node's value exactly.
pub(crate) fn interpolate_column<R>(
    rows: &[R],
    value: f64,
    what: &'static str,
    key: impl Fn(&R) -> f64,
    out: impl Fn(&R) -> f64,
) -> PropsResult<f64> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(PropsError::MalformedTable {
            reason: "empty table".to_string(),
        });
    };
    let out_of_range = || PropsError::OutOfRange {
        property: what,
        value,
        min: key(first),
        max: key(last),
    };

    if !value.is_finite() {
        return Err(out_of_range());
    }

    let i = rows.partition_point(|r| key(r) < value);
    if i == rows.len() {
        return Err(out_of_range());
    }

    let ceil = &rows[i];
    if key(ceil) == value {
        return Ok(out(ceil));
    }
    if i == 0 {
        return Err(out_of_range());
    }

    let floor = &rows[i - 1];
    let ratio = (value - key(floor)) / (key(ceil) - key(floor));
    Ok(lerp_clamped(out(floor), out(ceil), ratio))
}
