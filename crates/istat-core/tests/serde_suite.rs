//! JSON round-trips of the host-facing types.

use proptest as _;
use rstest as _;
#[cfg(not(feature = "serde"))]
use istat_core as _;
#[cfg(not(feature = "serde"))]
use serde_json as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

#[cfg(feature = "serde")]
mod json {
    use istat_core::{
        Accumulator, CategoryWeights, DecodeTable, FetchEvent, ReportStyle, StatsConfig,
        StatsPreset, StatsSnapshot,
    };

    #[test]
    fn config_round_trips_through_json() {
        let config = StatsConfig::from_preset(StatsPreset::Classic);
        let json = serde_json::to_string(&config).expect("config serializes");
        let back: StatsConfig = serde_json::from_str(&json).expect("config deserializes");
        assert_eq!(back, config);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut acc = Accumulator::default();
        acc.admit(0x0040_0000, 0x0109_001A);
        acc.admit(0x0040_0004, 0x8C43_0004);
        let snapshot = acc.snapshot();

        let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
        let back: StatsSnapshot = serde_json::from_str(&json).expect("snapshot deserializes");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn fetch_events_deserialize_with_and_without_word() {
        let events: Vec<FetchEvent> =
            serde_json::from_str(r#"[{"address":4194304,"word":16842778},{"address":8,"word":null}]"#)
                .expect("events deserialize");
        assert_eq!(
            events,
            vec![FetchEvent::instruction(0x0040_0000, 0x0101_001A), FetchEvent::empty(8)]
        );
    }

    #[test]
    fn enums_serialize_by_variant_name() {
        assert_eq!(
            serde_json::to_string(&DecodeTable::Base).ok().as_deref(),
            Some("\"Base\"")
        );
        assert_eq!(
            serde_json::to_string(&ReportStyle::Weighted).ok().as_deref(),
            Some("\"Weighted\"")
        );
    }

    #[test]
    fn snapshot_with_wrong_total_is_rejected() {
        let json = r#"{"counts":[1,0,0,0,0],"total":7,"estimated_cycles":25.0,"weights":[25.0,4.0,2.0,3.0,1.0]}"#;
        let error = serde_json::from_str::<StatsSnapshot>(json).expect_err("total mismatch");
        assert!(error.to_string().contains("snapshot total 7"));
    }

    #[test]
    fn snapshot_with_wrong_estimate_is_rejected() {
        let json = r#"{"counts":[1,0,0,0,0],"total":1,"estimated_cycles":999.0,"weights":[25.0,4.0,2.0,3.0,1.0]}"#;
        let error = serde_json::from_str::<StatsSnapshot>(json).expect_err("estimate mismatch");
        assert!(error.to_string().contains("snapshot estimate 999"));
    }

    #[test]
    fn snapshot_with_overflowing_counts_is_rejected() {
        let json = format!(
            r#"{{"counts":[{max},1,0,0,0],"total":0,"estimated_cycles":0.0,"weights":[1.0,1.0,1.0,1.0,1.0]}}"#,
            max = u64::MAX
        );
        assert!(serde_json::from_str::<StatsSnapshot>(&json).is_err());
    }

    #[test]
    fn consistent_stored_snapshot_renders_its_own_estimate() {
        let json = r#"{"counts":[1,0,0,0,0],"total":1,"estimated_cycles":25.0,"weights":[25.0,4.0,2.0,3.0,1.0]}"#;
        let snapshot: StatsSnapshot = serde_json::from_str(json).expect("consistent snapshot");
        assert!(snapshot
            .report(ReportStyle::Plain)
            .to_string()
            .ends_with("Final Cycle: 25.0\n"));
    }

    #[test]
    fn weights_serialize_as_plain_array() {
        let json = serde_json::to_string(&CategoryWeights::EXTENDED).expect("weights serialize");
        assert_eq!(json, "[25.0,4.0,2.0,3.0,1.0]");
    }

    #[test]
    fn deserialized_weights_are_validated() {
        let negative = serde_json::from_str::<CategoryWeights>("[1.0,1.0,-1.0,1.0,1.0]");
        assert!(negative.is_err());
        let short = serde_json::from_str::<CategoryWeights>("[1.0,1.0]");
        assert!(short.is_err());
    }
}
