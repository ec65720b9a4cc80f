use kindred::privatize::DEFAULT_LIFETIME_THRESHOLD;
use kindred::settings::Settings;

#[test]
fn defaults_apply_when_nothing_is_configured() {
    let settings = Settings::default();
    assert_eq!(settings.lifetime_threshold, DEFAULT_LIFETIME_THRESHOLD);
    assert_eq!(settings.locale, "en-US");
}

#[test]
fn loading_without_a_config_file_falls_back_to_defaults() {
    let settings = Settings::from_file("no-such-config").expect("defaults");
    assert_eq!(settings, Settings::default());
}
