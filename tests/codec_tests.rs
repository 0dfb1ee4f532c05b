//! Codec behavior: round-tripping, clamping, legacy aliases, and profile
//! validation, all through the public decode/serialize surface.

use loupe_config::codec::DpiProbe;
use loupe_config::{
    AutoScale, CaptureMethod, Cropping, CursorScaling, FlatDpi, GraphicsCardId, Profile,
    SettingsData, Shortcut, ShortcutAction, Theme, ToolbarState, WindowPlacement, decode,
    defaults, scaling_flags,
};
use std::path::PathBuf;

fn decode_str(json: &str) -> SettingsData {
    let value: serde_json::Value = serde_json::from_str(json).expect("test document must parse");
    decode(value.as_object().expect("test document root"), &FlatDpi)
}

fn reencode(data: &SettingsData) -> SettingsData {
    let json = serde_json::to_string_pretty(data).expect("serialize");
    decode_str(&json)
}

/// A settings value with every field off its default.
fn populated_settings() -> SettingsData {
    let mut data = SettingsData::default();
    data.language = 1; // "en"
    data.theme = Theme::Dark;
    data.window = WindowPlacement {
        center_x: 960.5,
        center_y: 540.0,
        width: 800.0,
        height: 600.0,
        maximized: true,
    };
    data.shortcuts = defaults::default_shortcuts();
    data.countdown_seconds = 5;
    data.developer_mode = true;
    data.debug_mode = true;
    data.warnings_are_errors = true;
    data.show_notify_icon = false;
    data.min_frame_rate = 30.0;
    data.scaling_modes = defaults::default_scaling_modes();

    data.default_profile.scaling_mode = 2;
    data.default_profile.max_frame_rate = 120.0;
    data.default_profile.cropping_enabled = true;
    data.default_profile.cropping = Cropping {
        left: 1.0,
        top: 2.0,
        right: 3.0,
        bottom: 4.0,
    };

    let mut game = Profile::default();
    game.name = "Game".into();
    game.is_packaged = true;
    game.path_rule = "C:\\Games\\game.exe".into();
    game.class_name_rule = "GameWindow".into();
    game.launcher_path = PathBuf::from("/opt/launcher");
    game.auto_scale = AutoScale::Fullscreen;
    game.launch_parameters = "--borderless".into();
    game.scaling_mode = 0;
    game.capture_method = CaptureMethod::Gdi;
    game.graphics_card = GraphicsCardId {
        idx: 1,
        vendor_id: 0x10de,
        device_id: 0x2204,
    };
    game.frame_rate_limiter_enabled = true;
    game.max_frame_rate = 144.0;
    game.set_scaling_flag(scaling_flags::THREE_D_GAME_MODE, true);
    game.cursor_scaling = CursorScaling::Custom;
    game.custom_cursor_scaling = 1.5;
    game.auto_hide_cursor_enabled = true;
    game.auto_hide_cursor_delay = 2.0;
    data.profiles.push(game);

    data.overlay.fullscreen_initial_toolbar_state = ToolbarState::AlwaysShow;
    data.overlay.windowed_initial_toolbar_state = ToolbarState::AlwaysHide;
    data.overlay.screenshots_dir = PathBuf::from("shots");
    data.overlay.windows.insert(
        "toolbar".into(),
        loupe_config::OverlayWindowOption {
            h_area: 1,
            v_area: 2,
            h_pos: 0.5,
            v_pos: 0.25,
        },
    );
    data
}

#[test]
fn test_serialize_decode_round_trip_is_lossless() {
    let original = populated_settings();
    assert_eq!(reencode(&original), original);
}

#[test]
fn test_repeated_round_trips_do_not_drift() {
    let original = populated_settings();
    let once = reencode(&original);
    let twice = reencode(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_empty_object_decodes_to_defaults() {
    let data = decode_str("{}");
    assert_eq!(data, SettingsData::default());
}

#[test]
fn test_unknown_root_keys_are_ignored() {
    let data = decode_str(r#"{"futureFeature": {"x": 1}, "countdownSeconds": 4}"#);
    assert_eq!(data.countdown_seconds, 4);
}

// ── Clamping ───────────────────────────────────────────────────────────────

#[test]
fn test_countdown_seconds_out_of_range_resets_to_default() {
    assert_eq!(decode_str(r#"{"countdownSeconds": 0}"#).countdown_seconds, 3);
    assert_eq!(decode_str(r#"{"countdownSeconds": 6}"#).countdown_seconds, 3);
    assert_eq!(decode_str(r#"{"countdownSeconds": 2.5}"#).countdown_seconds, 3);
    assert_eq!(decode_str(r#"{"countdownSeconds": "x"}"#).countdown_seconds, 3);
    assert_eq!(decode_str(r#"{"countdownSeconds": 5}"#).countdown_seconds, 5);
}

#[test]
fn test_max_frame_rate_outside_band_resets_to_60() {
    let data = decode_str(r#"{"profiles": [{"maxFrameRate": 5.0}]}"#);
    assert_eq!(data.default_profile.max_frame_rate, 60.0);

    let data = decode_str(r#"{"profiles": [{"maxFrameRate": 2000.0}]}"#);
    assert_eq!(data.default_profile.max_frame_rate, 60.0);

    // Band boundaries themselves are valid.
    let data = decode_str(r#"{"profiles": [{"maxFrameRate": 1000.0}]}"#);
    assert_eq!(data.default_profile.max_frame_rate, 1000.0);
}

#[test]
fn test_cropping_with_negative_component_loads_all_zero() {
    let data = decode_str(
        r#"{"profiles": [{"cropping": {"left": 1.0, "top": -2.0, "right": 3.0, "bottom": 4.0}}]}"#,
    );
    assert_eq!(data.default_profile.cropping, Cropping::default());
}

#[test]
fn test_incomplete_cropping_loads_all_zero() {
    let data = decode_str(r#"{"profiles": [{"cropping": {"left": 1.0, "top": 2.0}}]}"#);
    assert_eq!(data.default_profile.cropping, Cropping::default());
}

#[test]
fn test_auto_hide_cursor_delay_clamped() {
    let data = decode_str(r#"{"profiles": [{"autoHideCursorDelay": 0.05}]}"#);
    assert_eq!(data.default_profile.auto_hide_cursor_delay, 3.0);

    let data = decode_str(r#"{"profiles": [{"autoHideCursorDelay": 4.5}]}"#);
    assert_eq!(data.default_profile.auto_hide_cursor_delay, 4.5);
}

#[test]
fn test_theme_out_of_range_resets_to_system() {
    assert_eq!(decode_str(r#"{"theme": 5}"#).theme, Theme::System);
    assert_eq!(decode_str(r#"{"theme": 2}"#).theme, Theme::Dark);
}

#[test]
fn test_min_frame_rate_out_of_domain_resets() {
    assert_eq!(decode_str(r#"{"minFrameRate": -3.0}"#).min_frame_rate, 0.0);
    assert_eq!(decode_str(r#"{"minFrameRate": 5000.0}"#).min_frame_rate, 0.0);
    assert_eq!(decode_str(r#"{"minFrameRate": 30.0}"#).min_frame_rate, 30.0);
}

// ── Legacy aliases ─────────────────────────────────────────────────────────

#[test]
fn test_down_count_alias_loads_when_countdown_absent() {
    assert_eq!(decode_str(r#"{"downCount": 4}"#).countdown_seconds, 4);
    // Current key wins when both are present.
    assert_eq!(
        decode_str(r#"{"countdownSeconds": 2, "downCount": 4}"#).countdown_seconds,
        2
    );
}

#[test]
fn test_capture_mode_alias_loads_when_capture_method_absent() {
    let data = decode_str(r#"{"profiles": [{"captureMode": 2}]}"#);
    assert_eq!(data.default_profile.capture_method, CaptureMethod::Gdi);
}

#[test]
fn test_boolean_flag_aliases() {
    let data = decode_str(r#"{"alwaysRunAsElevated": true, "showTrayIcon": false}"#);
    assert!(data.always_run_as_admin);
    assert!(!data.show_notify_icon);

    // Current keys shadow the legacy ones.
    let data = decode_str(r#"{"alwaysRunAsAdmin": false, "alwaysRunAsElevated": true}"#);
    assert!(!data.always_run_as_admin);
}

#[test]
fn test_hotkeys_alias_and_overlay_toolbar_fallback() {
    // 0xC44 = Alt+Shift+D, 0xC41 = Alt+Shift+A
    let data = decode_str(r#"{"hotkeys": {"scale": 3137, "overlay": 3140}}"#);
    let expected_scale = Shortcut {
        alt: true,
        shift: true,
        code: b'A',
        ..Shortcut::default()
    };
    let expected_toolbar = Shortcut {
        alt: true,
        shift: true,
        code: b'D',
        ..Shortcut::default()
    };
    assert_eq!(data.shortcut(ShortcutAction::Scale), expected_scale);
    assert_eq!(data.shortcut(ShortcutAction::Toolbar), expected_toolbar);
}

#[test]
fn test_shortcut_above_12_bits_leaves_slot_unchanged() {
    let data = decode_str(r#"{"shortcuts": {"scale": 69999}}"#);
    assert!(data.shortcut(ShortcutAction::Scale).is_empty());
}

#[test]
fn test_scaling_profiles_alias() {
    let data = decode_str(
        r#"{"scalingProfiles": [{}, {"name": "A", "packaged": false, "pathRule": "p", "classNameRule": "c"}]}"#,
    );
    assert_eq!(data.profiles.len(), 1);
    assert_eq!(data.profiles[0].name, "A");
}

#[test]
fn test_legacy_graphics_adapter_is_one_based() {
    let data = decode_str(r#"{"profiles": [{"graphicsAdapter": 2}]}"#);
    assert_eq!(data.default_profile.graphics_card.idx, 1);

    // Zero-based legacy index passes through.
    let data = decode_str(r#"{"profiles": [{"graphicsCard": 0}]}"#);
    assert_eq!(data.default_profile.graphics_card.idx, 0);

    // The modern object shape wins over both.
    let data = decode_str(
        r#"{"profiles": [{"graphicsCardId": {"idx": 3, "vendorId": 1, "deviceId": 2}, "graphicsAdapter": 9}]}"#,
    );
    assert_eq!(
        data.default_profile.graphics_card,
        GraphicsCardId {
            idx: 3,
            vendor_id: 1,
            device_id: 2
        }
    );
}

#[test]
fn test_legacy_boolean_auto_scale() {
    let data = decode_str(
        r#"{"profiles": [{}, {"name": "A", "packaged": false, "pathRule": "p", "classNameRule": "c", "autoScale": true}]}"#,
    );
    assert_eq!(data.profiles[0].auto_scale, AutoScale::Fullscreen);
}

#[test]
fn test_legacy_reserve_title_bar_flag() {
    let data = decode_str(r#"{"profiles": [{"reserveTitleBar": true}]}"#);
    assert!(data.default_profile.is_capture_title_bar());
}

#[test]
fn test_legacy_initial_toolbar_state_applies_to_both() {
    let data = decode_str(r#"{"overlay": {"initialToolbarState": 1}}"#);
    assert_eq!(
        data.overlay.fullscreen_initial_toolbar_state,
        ToolbarState::AlwaysShow
    );
    assert_eq!(
        data.overlay.windowed_initial_toolbar_state,
        ToolbarState::AlwaysShow
    );

    let data = decode_str(
        r#"{"overlay": {"fullscreenInitialToolbarState": 2, "windowedInitialToolbarState": 1}}"#,
    );
    assert_eq!(
        data.overlay.fullscreen_initial_toolbar_state,
        ToolbarState::AlwaysHide
    );
    assert_eq!(
        data.overlay.windowed_initial_toolbar_state,
        ToolbarState::AlwaysShow
    );
}

// ── Window placement ───────────────────────────────────────────────────────

#[test]
fn test_modern_window_placement_shape() {
    let data = decode_str(
        r#"{"windowPos": {"centerX": 500.0, "centerY": 400.0, "width": 800.0, "height": 600.0, "maximized": true}}"#,
    );
    assert_eq!(data.window.center_x, 500.0);
    assert_eq!(data.window.width, 800.0);
    assert!(data.window.maximized);
}

#[test]
fn test_legacy_pixel_placement_converts_through_dpi() {
    struct HiDpi;
    impl DpiProbe for HiDpi {
        fn dpi_at(&self, _x: f32, _y: f32) -> u32 {
            192
        }
    }

    let value: serde_json::Value =
        serde_json::from_str(r#"{"windowPos": {"x": 100, "y": 100, "width": 800, "height": 600}}"#)
            .unwrap();
    let data = decode(value.as_object().unwrap(), &HiDpi);
    assert_eq!(data.window.center_x, 500.0);
    assert_eq!(data.window.center_y, 400.0);
    assert_eq!(data.window.width, 400.0);
    assert_eq!(data.window.height, 300.0);
}

#[test]
fn test_legacy_pixel_placement_with_unresolved_dpi_uses_96() {
    let data =
        decode_str(r#"{"windowPos": {"x": 0, "y": 0, "width": 800, "height": 600}}"#);
    assert_eq!(data.window.width, 800.0);
    assert_eq!(data.window.height, 600.0);
}

// ── Profiles ───────────────────────────────────────────────────────────────

#[test]
fn test_profile_missing_class_name_rule_is_dropped() {
    let data = decode_str(
        r#"{"profiles": [{}, {"name": "A", "packaged": false, "pathRule": "p"}]}"#,
    );
    assert!(data.profiles.is_empty());
    // The identity-exempt default profile still loaded.
    assert!(data.default_profile.is_default());
}

#[test]
fn test_profile_rejection_reasons() {
    // name wrong type
    let doc = r#"{"profiles": [{}, {"name": 3, "packaged": false, "pathRule": "p", "classNameRule": "c"}]}"#;
    assert!(decode_str(doc).profiles.is_empty());

    // packaged missing
    let doc = r#"{"profiles": [{}, {"name": "A", "pathRule": "p", "classNameRule": "c"}]}"#;
    assert!(decode_str(doc).profiles.is_empty());

    // empty pathRule
    let doc = r#"{"profiles": [{}, {"name": "A", "packaged": true, "pathRule": "", "classNameRule": "c"}]}"#;
    assert!(decode_str(doc).profiles.is_empty());

    // a valid sibling survives its rejected neighbor
    let doc = r#"{"profiles": [{}, {"name": "A", "pathRule": "p", "classNameRule": "c"},
        {"name": "B", "packaged": false, "pathRule": "p", "classNameRule": "c"}]}"#;
    let data = decode_str(doc);
    assert_eq!(data.profiles.len(), 1);
    assert_eq!(data.profiles[0].name, "B");
}

#[test]
fn test_end_to_end_malformed_document() {
    let data = decode_str(
        r#"{"countdownSeconds": 10, "profiles": [{}, {"name": "  ", "pathRule": "x", "classNameRule": "y", "packaged": false}]}"#,
    );
    assert_eq!(data.countdown_seconds, 3);
    assert!(data.profiles.is_empty());
}

#[test]
fn test_scaling_mode_index_bounds_checked_against_imported_modes() {
    let doc = r#"{
        "scalingModes": [{"name": "Only", "effects": [{"name": "E", "scalingType": 1, "parameters": {}}]}],
        "profiles": [{"scalingMode": 5}, {"name": "A", "packaged": false, "pathRule": "p", "classNameRule": "c", "scalingMode": 0}]
    }"#;
    let data = decode_str(doc);
    assert_eq!(data.scaling_modes.len(), 1);
    assert_eq!(data.default_profile.scaling_mode, -1);
    assert_eq!(data.profiles[0].scaling_mode, 0);
}

#[test]
fn test_relative_launcher_path_resolved_during_load() {
    let doc = r#"{"profiles": [{}, {"name": "A", "packaged": false,
        "pathRule": "/games/emu/emu.exe", "classNameRule": "c", "launcherPath": "run.sh"}]}"#;
    let data = decode_str(doc);
    assert_eq!(
        data.profiles[0].launcher_path,
        PathBuf::from("/games/emu/run.sh")
    );
}

// ── Language ───────────────────────────────────────────────────────────────

#[test]
fn test_language_matched_case_insensitively() {
    let en = defaults::SUPPORTED_LANGUAGES
        .iter()
        .position(|tag| *tag == "en")
        .unwrap() as i32;
    assert_eq!(decode_str(r#"{"language": "EN"}"#).language, en);
    assert_eq!(decode_str(r#"{"language": "en"}"#).language, en);
    assert_eq!(decode_str(r#"{"language": "klingon"}"#).language, -1);
    assert_eq!(decode_str(r#"{"language": ""}"#).language, -1);
    assert_eq!(decode_str("{}").language, -1);
}

#[test]
fn test_language_serializes_as_tag_or_empty() {
    let mut data = SettingsData::default();
    data.language = -1;
    let json = serde_json::to_string(&data).unwrap();
    assert!(json.contains(r#""language":"""#));

    data.language = 1;
    let json = serde_json::to_string(&data).unwrap();
    assert!(json.contains(r#""language":"en""#));
}

// ── Overlay ────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_overlay_window_names_are_preserved() {
    let doc = r#"{"overlay": {"windows": {
        "toolbar": {"hArea": 1, "vArea": 0, "hPos": 0.5, "vPos": 0.0},
        "someFutureWindow": {"hArea": 2, "vArea": 2, "hPos": 0.1, "vPos": 0.9}
    }}}"#;
    let data = decode_str(doc);
    assert_eq!(data.overlay.windows.len(), 2);
    assert!(data.overlay.windows.contains_key("someFutureWindow"));

    // And they survive a round trip.
    let again = reencode(&data);
    assert!(again.overlay.windows.contains_key("someFutureWindow"));
}

// ── Serialized shape ───────────────────────────────────────────────────────

#[test]
fn test_default_profile_serialized_without_identity_keys() {
    let data = populated_settings();
    let json = serde_json::to_string_pretty(&data).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let profiles = value["profiles"].as_array().unwrap();

    assert_eq!(profiles.len(), 2);
    assert!(profiles[0].get("name").is_none());
    assert!(profiles[0].get("pathRule").is_none());
    assert!(profiles[0].get("scalingMode").is_some());
    assert_eq!(profiles[1]["name"], "Game");
    assert_eq!(profiles[1]["packaged"], true);
}

#[test]
fn test_serialization_is_deterministic() {
    let data = populated_settings();
    let first = serde_json::to_string_pretty(&data).unwrap();
    let second = serde_json::to_string_pretty(&data.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_enums_serialize_as_integers() {
    let data = populated_settings();
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&data).unwrap()).unwrap();
    assert_eq!(value["theme"], 2);
    assert_eq!(value["duplicateFrameDetectionMode"], 1);
    assert_eq!(value["overlay"]["fullscreenInitialToolbarState"], 1);
    assert_eq!(value["scalingModes"][0]["effects"][0]["scalingType"], 1);
}
