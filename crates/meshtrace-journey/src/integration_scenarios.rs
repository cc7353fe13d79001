//! End-to-end reconstruction scenarios
//!
//! Fixtures run the full pipeline: raw records through [`EventLog::parse`]
//! into [`reconstruct_run`], checked against hand-computed expectations.

use meshtrace_core::{AnalysisConfig, EventLog, FlowKey, RawRecord};

use crate::classify::RoutingMode;
use crate::run::reconstruct_run;

fn record(
    time: f64,
    event: &str,
    seq: u64,
    src: u32,
    dst: u32,
    node: u32,
    ttl: u32,
    via: u32,
    hop_type: &str,
) -> RawRecord {
    [
        ("simTime", time.to_string()),
        ("event", event.to_string()),
        ("packetSeq", seq.to_string()),
        ("src", src.to_string()),
        ("dst", dst.to_string()),
        ("currentNode", node.to_string()),
        ("ttlAfterDecr", ttl.to_string()),
        ("chosenVia", via.to_string()),
        ("nextHopType", hop_type.to_string()),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.clone()))
    .collect()
}

#[test]
fn test_flooding_trace_with_duplicate_copies() {
    let config = AnalysisConfig::default();
    let bcast = config.broadcast_address;

    // One flow flooded through the mesh; the destination hears two copies.
    // Records arrive out of time order, as real logs do.
    let records = vec![
        record(1.5, "DELIVERED", 0, 1000, 1001, 1001, 2, 0, "UNICAST"),
        record(0.0, "TX_SRC", 0, 1000, 1001, 1000, 5, bcast, "BCAST"),
        record(0.4, "ENQUEUE_FWD", 0, 1000, 1001, 3, 4, bcast, "BCAST"),
        record(0.5, "TX_FWD_DATA", 0, 1000, 1001, 3, 4, bcast, "BCAST"),
        record(0.6, "TX_FWD_DATA", 0, 1000, 1001, 4, 4, bcast, "BCAST"),
        record(1.2, "DELIVERED", 0, 1000, 1001, 1001, 3, 0, "UNICAST"),
    ];

    let log = EventLog::parse(records.iter(), &config).unwrap();
    let run = reconstruct_run(&log, 0, &config);

    let key = FlowKey {
        src: 1000,
        dst: 1001,
        packet_seq: 0,
    };
    let journey = &run.journeys[&key];

    assert_eq!(journey.copies_received(), 2);
    let first = journey.first_arrival().unwrap();
    assert_eq!(first.transit_time, Some(1.2));
    assert_eq!(first.hop_count, Some(2));

    // Source, two relays, destination
    assert_eq!(journey.unique_nodes_touched.len(), 4);

    assert_eq!(run.mode, RoutingMode::Flooding);
    assert_eq!(run.summary().success_rate(), Some(1.0));
}

#[test]
fn test_table_driven_trace_classification() {
    let config = AnalysisConfig::default();

    // 30 unicast next-hop choices against 5 broadcast ones
    let mut records = Vec::new();
    for seq in 0..10u64 {
        let t = seq as f64 * 10.0;
        records.push(record(t, "TX_SRC", seq, 1000, 2000, 1000, 5, 1, "UNICAST"));
        records.push(record(
            t + 0.3,
            "TX_FWD_DATA",
            seq,
            1000,
            2000,
            1,
            4,
            2,
            "UNICAST",
        ));
        records.push(record(
            t + 0.6,
            "TX_FWD_DATA",
            seq,
            1000,
            2000,
            2,
            3,
            2000,
            "UNICAST",
        ));
        records.push(record(
            t + 0.9,
            "DELIVERED",
            seq,
            1000,
            2000,
            2000,
            2,
            0,
            "UNICAST",
        ));
    }
    for seq in 10..15u64 {
        let t = seq as f64 * 10.0;
        records.push(record(
            t,
            "TX_SRC",
            seq,
            1000,
            2000,
            1000,
            5,
            config.broadcast_address,
            "BCAST",
        ));
    }

    let log = EventLog::parse(records.iter(), &config).unwrap();
    let run = reconstruct_run(&log, 0, &config);

    assert_eq!(run.mix.unicast, 30);
    assert_eq!(run.mix.broadcast, 5);
    assert_eq!(run.mode, RoutingMode::TableDriven);

    // 15 generated, 10 delivered at least once
    assert_eq!(run.generated, 15);
    assert_eq!(run.delivered_unique(), 10);
    let rate = run.summary().success_rate().unwrap();
    assert!((rate - 10.0 / 15.0).abs() < 1e-12);
}

#[test]
fn test_mixed_repetition_flows_stay_separate() {
    // The same (src, dst, seq) triple from two repetitions is processed
    // as two independent logs; keys may collide across runs.
    let config = AnalysisConfig::default();

    let rep0 = vec![
        record(0.0, "TX_SRC", 0, 1000, 1001, 1000, 5, 1, "UNICAST"),
        record(1.0, "DELIVERED", 0, 1000, 1001, 1001, 4, 0, "UNICAST"),
    ];
    let rep1 = vec![record(0.0, "TX_SRC", 0, 1000, 1001, 1000, 5, 1, "UNICAST")];

    let run0 = reconstruct_run(
        &EventLog::parse(rep0.iter(), &config).unwrap(),
        0,
        &config,
    );
    let run1 = reconstruct_run(
        &EventLog::parse(rep1.iter(), &config).unwrap(),
        1,
        &config,
    );

    assert_eq!(run0.summary().success_rate(), Some(1.0));
    assert_eq!(run1.summary().success_rate(), Some(0.0));
    assert_eq!(run0.flow_metrics()[0].repetition, 0);
    assert_eq!(run1.flow_metrics()[0].repetition, 1);
}
