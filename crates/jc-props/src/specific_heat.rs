//! Specific-heat table: cp and the heat-capacity ratio as functions of temperature.

use crate::error::{PropsError, PropsResult};
use crate::table::interpolate_column;

/// Which quantity a specific-heat lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecificHeatOutput {
    /// Specific heat at constant pressure [kJ/(kg·K)]
    Cp,
    /// Heat capacity ratio γ = cp/cv [-]
    Gamma,
}

/// One tabulated (temperature, cp, cv) row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecificHeatRow {
    /// Temperature [K]
    pub temperature: f64,
    /// cp [kJ/(kg·K)]
    pub cp: f64,
    /// cv [kJ/(kg·K)]
    pub cv: f64,
}

impl SpecificHeatRow {
    pub fn new(temperature: f64, cp: f64, cv: f64) -> Self {
        Self {
            temperature,
            cp,
            cv,
        }
    }
}

/// Immutable specific-heat table keyed by strictly increasing temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificHeatTable {
    rows: Vec<SpecificHeatRow>,
}

impl SpecificHeatTable {
    pub fn new(rows: Vec<SpecificHeatRow>) -> PropsResult<Self> {
        if rows.len() < 2 {
            return Err(PropsError::MalformedTable {
                reason: format!(
                    "specific heat table needs at least 2 rows, got {}",
                    rows.len()
                ),
            });
        }

        for (i, row) in rows.iter().enumerate() {
            if !(row.temperature.is_finite() && row.cp.is_finite() && row.cv.is_finite()) {
                return Err(PropsError::MalformedTable {
                    reason: format!("non-finite entry in row {i}"),
                });
            }
            if row.cv <= 0.0 || row.cp <= row.cv {
                return Err(PropsError::MalformedTable {
                    reason: format!("row {i} must satisfy cp > cv > 0"),
                });
            }
        }

        if let Some(i) = rows
            .windows(2)
            .position(|pair| pair[1].temperature <= pair[0].temperature)
        {
            return Err(PropsError::MalformedTable {
                reason: format!("temperature not strictly increasing at row {}", i + 1),
            });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SpecificHeatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tabulated temperature range (min, max).
    pub fn domain(&self) -> (f64, f64) {
        let first = self.rows.first().map_or(f64::NAN, |r| r.temperature);
        let last = self.rows.last().map_or(f64::NAN, |r| r.temperature);
        (first, last)
    }

    /// Interpolate cp or γ at `temperature` [K].
    ///
    /// γ is formed from the interpolated cp and cv, not by interpolating a γ column.
    pub fn interpolate(&self, temperature: f64, output: SpecificHeatOutput) -> PropsResult<f64> {
        let cp = self.column(temperature, |r| r.cp)?;
        match output {
            SpecificHeatOutput::Cp => Ok(cp),
            SpecificHeatOutput::Gamma => {
                let cv = self.column(temperature, |r| r.cv)?;
                Ok(cp / cv)
            }
        }
    }

    fn column(&self, temperature: f64, out: impl Fn(&SpecificHeatRow) -> f64) -> PropsResult<f64> {
        interpolate_column(&self.rows, temperature, "temperature", |r| r.temperature, out)
    }
}
