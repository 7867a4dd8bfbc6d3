#[cfg(test)]
mod tests {
    use crate::{Error, OptionsRegistry, RawOptions, SliderOptions};

    #[test]
    fn get_options_applies_custom_overrides() {
        let registry = OptionsRegistry::new();
        let defaults = registry.get_options(None);
        let custom = RawOptions {
            show_ticks: Some(true),
            ..RawOptions::default()
        };

        let opts = registry.get_options(Some(&custom));

        let expected = SliderOptions {
            show_ticks: true,
            ..defaults
        };
        assert_eq!(opts, expected);
    }

    #[test]
    fn options_updates_global_layer() {
        let registry = OptionsRegistry::new();
        let defaults = registry.get_options(None);
        registry.options(RawOptions {
            show_ticks: Some(true),
            ..RawOptions::default()
        });

        let opts = registry.get_options(None);
        assert_eq!(
            opts,
            SliderOptions {
                show_ticks: true,
                ..defaults.clone()
            }
        );

        // Later calls overlay earlier ones rather than replacing the layer.
        registry.options(RawOptions {
            ceil: Some(500.0),
            ..RawOptions::default()
        });
        let opts = registry.get_options(None);
        assert!(opts.show_ticks);
        assert_eq!(opts.ceil, 500.0);

        registry.reset();
        assert_eq!(registry.get_options(None), defaults);
    }

    #[test]
    fn instance_overrides_win_over_global_layer() {
        let registry = OptionsRegistry::new();
        registry.options(RawOptions {
            step: Some(5.0),
            vertical: Some(true),
            ..RawOptions::default()
        });
        let custom = RawOptions {
            step: Some(10.0),
            ..RawOptions::default()
        };
        let opts = registry.get_options(Some(&custom));
        assert_eq!(opts.step, 10.0);
        assert!(opts.vertical);
    }

    #[test]
    fn resolve_rejects_invalid_bounds() {
        let registry = OptionsRegistry::new();
        let custom = RawOptions {
            floor: Some(10.0),
            ceil: Some(0.0),
            ..RawOptions::default()
        };
        assert!(matches!(
            registry.resolve(Some(&custom)),
            Err(Error::InvertedBounds { .. })
        ));
    }

    #[test]
    fn parses_ron_with_bare_values_and_aliases() {
        let raw = RawOptions::from_ron(
            "(floor: 0.0, ceil: 200.0, draggableRangeOnly: true, keyboard_support: false)",
        )
        .unwrap();
        assert_eq!(raw.floor, Some(0.0));
        assert_eq!(raw.ceil, Some(200.0));
        assert_eq!(raw.draggable_range_only, Some(true));
        assert_eq!(raw.keyboard_support, Some(false));
        assert_eq!(raw.step, None);
    }

    #[test]
    fn rejects_unknown_option_names() {
        let err = RawOptions::from_ron("(floor: 0.0, handles: 3)").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn parses_json_option_names() {
        let raw: RawOptions =
            serde_json::from_str(r#"{"readOnly": true, "showTicks": true, "step": 10}"#).unwrap();
        assert_eq!(raw.read_only, Some(true));
        assert_eq!(raw.show_ticks, Some(true));
        assert_eq!(raw.step, Some(10.0));
    }

    #[test]
    fn overlay_keeps_fields_not_provided() {
        let base = RawOptions {
            floor: Some(-5.0),
            id: Some("volume".into()),
            ..RawOptions::default()
        };
        let merged = base.overlay(RawOptions {
            floor: Some(1.0),
            ..RawOptions::default()
        });
        assert_eq!(merged.floor, Some(1.0));
        assert_eq!(merged.id.as_deref(), Some("volume"));
        assert!(!merged.is_empty());
        assert!(RawOptions::default().is_empty());
    }
}
