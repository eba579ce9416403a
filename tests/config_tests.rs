// Host-side tests for startup configuration and query parsing.

use sonogrid_core::*;

#[test]
fn empty_query_uses_defaults() {
    let config = VizConfig::from_query("");
    assert_eq!(config.amount, 256);
    assert_eq!(config.count(), 65_536);
    assert_eq!(config.preset, Preset::Ocean);
    assert_eq!(config.trigger, TriggerMode::AutoStart);
    assert_eq!(config.effective_height_scale(), 32.0);
}

#[test]
fn bare_integer_sets_dimension() {
    assert_eq!(VizConfig::from_query("?512").amount, 512);
    assert_eq!(VizConfig::from_query("?64abc").amount, 64);
    assert_eq!(VizConfig::from_query("?amount=32").amount, 32);
}

#[test]
fn unusable_dimension_falls_back() {
    assert_eq!(VizConfig::from_query("?abc").amount, 256);
    assert_eq!(VizConfig::from_query("?0").amount, 256);
    assert_eq!(VizConfig::from_query("?-5").amount, 256);
}

#[test]
fn huge_dimension_is_capped() {
    assert_eq!(VizConfig::from_query("?5000").amount, MAX_GRID_DIMENSION);
    assert_eq!(resolve_grid_dimension(Some(i64::MAX)), MAX_GRID_DIMENSION);
    assert_eq!(
        VizConfig::from_query("?99999999999999999999").amount,
        MAX_GRID_DIMENSION
    );
}

#[test]
fn presets_carry_their_trigger() {
    let ember = VizConfig::from_query("?128&preset=ember");
    assert_eq!(ember.amount, 128);
    assert_eq!(ember.preset, Preset::Ember);
    assert_eq!(ember.trigger, TriggerMode::ClickToStart);
    assert_eq!(ember.effective_height_scale(), 28.0);

    let unknown = VizConfig::from_query("?preset=lava");
    assert_eq!(unknown.preset, Preset::Ocean);
}

#[test]
fn start_key_overrides_preset_trigger() {
    let config = VizConfig::from_query("?preset=ember&start=auto");
    assert_eq!(config.trigger, TriggerMode::AutoStart);
    let config = VizConfig::from_query("?start=click");
    assert_eq!(config.trigger, TriggerMode::ClickToStart);
}

#[test]
fn bad_height_scale_is_guarded() {
    let mut config = VizConfig::default();
    config.height_scale = 0.0;
    assert_eq!(config.effective_height_scale(), 32.0);
    config.height_scale = f32::NAN;
    assert_eq!(config.effective_height_scale(), 32.0);
}

#[test]
fn fft_size_covers_the_grid() {
    let params = AnalyserParams::default();
    assert_eq!(params.fft_size_for(256), 1024);
    assert_eq!(params.fft_size_for(512), 1024);
    assert_eq!(params.fft_size_for(1024), 2048);
    assert!(params.fft_size_for(1024) / 2 >= 1024);
}
