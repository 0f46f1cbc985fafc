use evo_config::{ConfigWarning, EvoConfig};
use pretty_assertions::assert_eq;

#[test]
fn reports_unknown_keys_with_full_paths() {
    let text = r#"
typo = 1

[generics]
max_depth = 4

[logging]
levle = "debug"
"#;

    let (config, diagnostics) =
        EvoConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.unknown_keys,
        vec!["generics.max_depth", "logging.levle", "typo"]
    );
    assert_eq!(config, EvoConfig::default());
}

#[test]
fn clean_config_has_no_diagnostics() {
    let (_config, diagnostics) = EvoConfig::load_from_str_with_diagnostics(
        "[generics]\nmax_generic_depth = 2\n\n[logging]\nlevel = \"evo.generic=trace,info\"\n",
    )
    .expect("config should parse");

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn warns_about_clamped_depth_and_bad_level() {
    let text = r#"
[generics]
max_generic_depth = 100

[logging]
level = "evo.generic=loud"
"#;

    let (_config, diagnostics) =
        EvoConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.warnings,
        vec![
            ConfigWarning::MaxGenericDepthClamped {
                configured: 100,
                clamped: 64,
            },
            ConfigWarning::LoggingLevelInvalid {
                value: "evo.generic=loud".to_string(),
            },
        ]
    );
}
