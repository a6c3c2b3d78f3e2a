//! Property-based tests for AppSettings serialization round-trip.
//!
//! Any valid settings value must survive JSON serialization unchanged.

use linkqr::types::settings::{
    AppSettings, EncoderSettings, ExportSettings, HistorySettings, StorageSettings,
};
use proptest::prelude::*;

fn arb_path() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("/[a-z0-9_]{1,12}(/[a-z0-9_.]{1,12}){0,3}")
}

fn arb_settings() -> impl Strategy<Value = AppSettings> {
    (1usize..500, 1u32..64, arb_path(), arb_path()).prop_map(
        |(capacity, module_scale, database_path, downloads_dir)| AppSettings {
            history: HistorySettings { capacity },
            encoder: EncoderSettings { module_scale },
            storage: StorageSettings { database_path },
            export: ExportSettings { downloads_dir },
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: AppSettings = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back, settings);
    }
}
