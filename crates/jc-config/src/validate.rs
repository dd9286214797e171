//! Configuration validation.

use crate::schema::{CycleConfig, LATEST_VERSION, PowerBalanceDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &CycleConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    positive("ambient_temperature_k", config.ambient_temperature_k)?;
    positive("ambient_pressure_kpa", config.ambient_pressure_kpa)?;
    non_negative("flight_velocity_mps", config.flight_velocity_mps)?;
    positive("air_mass_flow_kgps", config.air_mass_flow_kgps)?;

    non_negative("fuel_flow_ml_per_min", config.fuel_flow_ml_per_min)?;
    positive("fuel_density_kg_m3", config.fuel_density_kg_m3)?;
    positive("fuel_lhv_kj_per_kg", config.fuel_lhv_kj_per_kg)?;

    finite("compressor_pressure_ratio", config.compressor_pressure_ratio)?;
    if config.compressor_pressure_ratio < 1.0 {
        return Err(invalid(
            "compressor_pressure_ratio",
            config.compressor_pressure_ratio,
            "must be >= 1",
        ));
    }
    fraction("combustor_pressure_ratio", config.combustor_pressure_ratio)?;
    fraction("compressor_efficiency", config.compressor_efficiency)?;
    fraction("combustion_efficiency", config.combustion_efficiency)?;
    fraction("turbine_efficiency", config.turbine_efficiency)?;
    fraction("nozzle_efficiency", config.nozzle_efficiency)?;

    if let PowerBalanceDef::Bisection {
        max_iterations,
        rel_tol,
    } = config.power_balance
    {
        if max_iterations == 0 {
            return Err(ValidationError::InvalidValue {
                field: "power_balance.max_iterations".to_string(),
                value: max_iterations.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        positive("power_balance.rel_tol", rel_tol)?;
    }

    if let Some(load) = &config.shaft_load {
        non_negative("shaft_load.power_kw", load.power_kw)?;
        fraction("shaft_load.generator_efficiency", load.generator_efficiency)?;
    }

    if let Some(band) = &config.exhaust_band {
        positive("exhaust_band.min_k", band.min_k)?;
        positive("exhaust_band.max_k", band.max_k)?;
        if band.min_k >= band.max_k {
            return Err(invalid(
                "exhaust_band.max_k",
                band.max_k,
                "must exceed exhaust_band.min_k",
            ));
        }
    }

    if let Some(tables) = &config.tables {
        for (field, path) in [
            ("tables.gas_table", &tables.gas_table),
            ("tables.specific_heat_table", &tables.specific_heat_table),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    value: String::new(),
                    reason: "path must not be empty".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(invalid(field, value, "must be positive"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, value, "must be non-negative"));
    }
    Ok(())
}

/// Efficiencies and loss ratios: (0, 1].
fn fraction(field: &str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value <= 0.0 || value > 1.0 {
        return Err(invalid(field, value, "must be in (0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ExhaustBandDef, ShaftLoadDef};

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::InvalidValue { field, .. } => field,
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&CycleConfig::default()).unwrap();
    }

    #[test]
    fn rejects_zero_efficiency() {
        let config = CycleConfig {
            compressor_efficiency: 0.0,
            ..CycleConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(field_of(err), "compressor_efficiency");
    }

    #[test]
    fn rejects_pressure_gain_in_combustor() {
        let config = CycleConfig {
            combustor_pressure_ratio: 1.1,
            ..CycleConfig::default()
        };
        assert_eq!(
            field_of(validate_config(&config).unwrap_err()),
            "combustor_pressure_ratio"
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let config = CycleConfig {
            ambient_temperature_k: f64::NAN,
            ..CycleConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_negative_fuel_flow() {
        let config = CycleConfig {
            fuel_flow_ml_per_min: -5.0,
            ..CycleConfig::default()
        };
        assert_eq!(
            field_of(validate_config(&config).unwrap_err()),
            "fuel_flow_ml_per_min"
        );
    }

    #[test]
    fn rejects_inverted_exhaust_band() {
        let config = CycleConfig {
            exhaust_band: Some(ExhaustBandDef {
                min_k: 900.0,
                max_k: 600.0,
            }),
            ..CycleConfig::default()
        };
        assert_eq!(
            field_of(validate_config(&config).unwrap_err()),
            "exhaust_band.max_k"
        );
    }

    #[test]
    fn rejects_bad_generator_efficiency() {
        let config = CycleConfig {
            shaft_load: Some(ShaftLoadDef {
                power_kw: 1.0,
                generator_efficiency: 0.0,
            }),
            ..CycleConfig::default()
        };
        assert_eq!(
            field_of(validate_config(&config).unwrap_err()),
            "shaft_load.generator_efficiency"
        );
    }

    #[test]
    fn rejects_zero_bisection_iterations() {
        let config = CycleConfig {
            power_balance: PowerBalanceDef::Bisection {
                max_iterations: 0,
                rel_tol: 1e-9,
            },
            ..CycleConfig::default()
        };
        assert_eq!(
            field_of(validate_config(&config).unwrap_err()),
            "power_balance.max_iterations"
        );
    }

    #[test]
    fn rejects_future_version() {
        let config = CycleConfig {
            version: LATEST_VERSION + 1,
            ..CycleConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
