use super::*;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> StoreConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    StoreConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn empty_environment_gives_defaults() {
    let cfg = config_from(&[]);
    assert_eq!(cfg, StoreConfig::default());
    assert_eq!(cfg.path, PathBuf::from("dataaccess.bin"));
    assert_eq!(cfg.byte_hint, 4096);
    assert_eq!(cfg.growth_factor, 1.5);
    assert!(cfg.sync_on_flush);
}

#[test]
fn all_variables_are_read() {
    let cfg = config_from(&[
        ("DATAACCESS_PATH", "/tmp/edges.bin"),
        ("DATAACCESS_BYTE_HINT", "40"),
        ("DATAACCESS_GROWTH_FACTOR", "2.0"),
        ("DATAACCESS_SYNC", "false"),
    ]);
    assert_eq!(cfg.path, PathBuf::from("/tmp/edges.bin"));
    assert_eq!(cfg.byte_hint, 40);
    assert_eq!(cfg.growth_factor, 2.0);
    assert!(!cfg.sync_on_flush);
}

#[test]
fn garbage_values_fall_back_to_defaults() {
    let cfg = config_from(&[
        ("DATAACCESS_BYTE_HINT", "lots"),
        ("DATAACCESS_GROWTH_FACTOR", "fast"),
        ("DATAACCESS_SYNC", "maybe"),
    ]);
    assert_eq!(cfg.byte_hint, DEFAULT_BYTE_HINT);
    assert_eq!(cfg.growth_factor, DEFAULT_GROWTH_FACTOR);
    assert!(cfg.sync_on_flush);
}

#[test]
fn out_of_range_growth_factor_is_rejected() {
    let cfg = config_from(&[("DATAACCESS_GROWTH_FACTOR", "0.5")]);
    assert_eq!(cfg.growth_factor, DEFAULT_GROWTH_FACTOR);

    let cfg = config_from(&[("DATAACCESS_GROWTH_FACTOR", "NaN")]);
    assert_eq!(cfg.growth_factor, DEFAULT_GROWTH_FACTOR);

    let cfg = config_from(&[("DATAACCESS_GROWTH_FACTOR", "1e308")]);
    assert_eq!(cfg.growth_factor, DEFAULT_GROWTH_FACTOR);

    let cfg = config_from(&[("DATAACCESS_GROWTH_FACTOR", "16.5")]);
    assert_eq!(cfg.growth_factor, DEFAULT_GROWTH_FACTOR);

    let cfg = config_from(&[("DATAACCESS_GROWTH_FACTOR", "16")]);
    assert_eq!(cfg.growth_factor, MAX_GROWTH_FACTOR);

    // Exactly 1.0 is allowed: grow to the requested size, no headroom.
    let cfg = config_from(&[("DATAACCESS_GROWTH_FACTOR", "1.0")]);
    assert_eq!(cfg.growth_factor, 1.0);
}

#[test]
fn empty_path_keeps_default() {
    let cfg = config_from(&[("DATAACCESS_PATH", "")]);
    assert_eq!(cfg.path, PathBuf::from(DEFAULT_PATH));
}

#[test]
fn values_are_trimmed_before_parsing() {
    let cfg = config_from(&[("DATAACCESS_BYTE_HINT", " 80 ")]);
    assert_eq!(cfg.byte_hint, 80);
}
