use sp_config::{ConfigError, ConfigSource, load_path};

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_path_dispatches_on_extension() {
    let inputs = write_temp(
        "sp_config_load_inputs.txt",
        "particles.fuel_species = NC10H22 NC12H26\nparticles.fuel_ref_temp = 300\n",
    );
    let yaml = write_temp(
        "sp_config_load.yaml",
        "particles:\n  fuel_species: [NC10H22, NC12H26]\n  fuel_ref_temp: 300\n",
    );
    let json = write_temp(
        "sp_config_load.json",
        r#"{"particles": {"fuel_species": ["NC10H22", "NC12H26"], "fuel_ref_temp": 300}}"#,
    );

    for path in [inputs, yaml, json] {
        let table = load_path(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        let pp = table.prefixed("particles");
        assert_eq!(
            pp.get_arr::<String>("fuel_species").unwrap(),
            vec!["NC10H22".to_string(), "NC12H26".to_string()]
        );
        assert_eq!(pp.get::<f64>("fuel_ref_temp").unwrap(), 300.0);
    }
}

#[test]
fn missing_file_reports_path() {
    let path = std::env::temp_dir().join("sp_config_does_not_exist.inputs");
    let err = load_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileRead { .. }));
    assert!(err.to_string().contains("sp_config_does_not_exist"));
}
