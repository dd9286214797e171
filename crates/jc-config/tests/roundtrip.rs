use jc_config::*;

fn full_config() -> CycleConfig {
    CycleConfig {
        flight_velocity_mps: 50.0,
        nozzle_efficiency: 0.97,
        nozzle: NozzleModelDef::SpecificHeat,
        power_balance: PowerBalanceDef::Bisection {
            max_iterations: 120,
            rel_tol: 1e-10,
        },
        shaft_load: Some(ShaftLoadDef {
            power_kw: 0.5,
            generator_efficiency: 0.9,
        }),
        exhaust_band: Some(ExhaustBandDef {
            min_k: 600.0,
            max_k: 1100.0,
        }),
        validation_mode: ValidationModeDef::Reject,
        tables: Some(TablesDef {
            gas_table: "tables/air.txt".into(),
            specific_heat_table: "tables/air_cp.txt".into(),
        }),
        ..CycleConfig::default()
    }
}

#[test]
fn roundtrip_yaml_default_config() {
    let config = CycleConfig::default();
    let path = std::env::temp_dir().join("jc_config_roundtrip_default.yaml");

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_yaml_full_config() {
    let config = full_config();
    let path = std::env::temp_dir().join("jc_config_roundtrip_full.yaml");

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_full_config() {
    let config = full_config();
    let path = std::env::temp_dir().join("jc_config_roundtrip_full.json");

    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn save_rejects_invalid_config() {
    let config = CycleConfig {
        turbine_efficiency: 1.5,
        ..CycleConfig::default()
    };
    let path = std::env::temp_dir().join("jc_config_invalid.yaml");
    let err = save_yaml(&path, &config).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn load_rejects_invalid_document() {
    let yaml = serde_yaml::to_string(&CycleConfig {
        air_mass_flow_kgps: -0.2,
        ..CycleConfig::default()
    })
    .unwrap();
    let err = from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("jc_config_does_not_exist.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(load_yaml(&path), Err(ConfigError::Io(_))));
}
