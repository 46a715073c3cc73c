//! End-to-end scenarios over the public API: JSON records in, identity and
//! presentation out.

use ledgerline_common::directory::{NodeDirectory, NodeDirectoryEntry};
use ledgerline_common::payment::PaymentRecord;
use ledgerline_common::presentation::{AmountSign, PresentationKind};
use ledgerline_common::pubkey::truncate_node_pubkey;
use ledgerline_common::{map_presentation_state, resolve_identity};

const UNKNOWN: &str = "Unknown";

fn directory() -> Vec<NodeDirectoryEntry> {
    vec![
        NodeDirectoryEntry::new("nodeXYZ", "Bob"),
        NodeDirectoryEntry::new("nodeBlank", ""),
    ]
}

fn record(json: &str) -> PaymentRecord {
    PaymentRecord::from_json(json).unwrap()
}

#[test]
fn scenario_a_historical_routed_payment() {
    let payment = record(
        r#"{"path": ["A", "B", "nodeXYZ"], "sending": false, "value": 5000, "creation_date": 1000}"#,
    );

    assert_eq!(resolve_identity(&payment, &directory(), UNKNOWN), "Bob");

    let state = map_presentation_state(&payment);
    assert_eq!(state.kind, PresentationKind::Historical);
    assert_eq!(state.amount_sign, AmountSign::Negative);
    assert_eq!(state.amount_sats, 5000);
    assert!(!state.de_emphasized);
}

#[test]
fn scenario_b_failed_payment_with_malformed_request() {
    let payment = record(
        r#"{"path": [], "payment_request": "<malformed>", "sending": true,
            "status": "failed", "error": "no route", "value": 250}"#,
    );

    assert_eq!(resolve_identity(&payment, &directory(), UNKNOWN), UNKNOWN);

    let state = map_presentation_state(&payment);
    assert_eq!(state.kind, PresentationKind::Failure);
    assert_eq!(state.message.as_deref(), Some("no route"));
    assert!(state.de_emphasized);
}

#[test]
fn scenario_c_processing_payment_to_unknown_node() {
    let payment = record(r#"{"path": ["nodeXYZ"], "sending": true, "status": "sending", "value": 100}"#);
    let nodes = vec![NodeDirectoryEntry::new("someoneElse", "Eve")];

    assert_eq!(
        resolve_identity(&payment, &nodes, UNKNOWN),
        truncate_node_pubkey("nodeXYZ")
    );

    let state = map_presentation_state(&payment);
    assert_eq!(state.kind, PresentationKind::Processing);
    assert!(!state.de_emphasized);
}

#[test]
fn scenario_d_successful_payment_without_counterparty() {
    let payment = record(r#"{"path": [], "sending": true, "status": "successful", "value": 1}"#);

    assert_eq!(resolve_identity(&payment, &directory(), UNKNOWN), UNKNOWN);

    let state = map_presentation_state(&payment);
    assert_eq!(state.kind, PresentationKind::Success);
    assert!(!state.de_emphasized);
}

#[test]
fn routed_payments_never_resolve_to_the_fallback() {
    let keyed: NodeDirectory = directory().into_iter().collect();
    for hop in ["nodeXYZ", "nodeBlank", "nodeMissing", "A"] {
        let payment = PaymentRecord {
            path: vec!["first".into(), hop.into()],
            ..Default::default()
        };
        let name = resolve_identity(&payment, &keyed, UNKNOWN);
        assert_ne!(name, UNKNOWN);
        assert!(name == "Bob" || name == truncate_node_pubkey(hop));
    }
}

#[test]
fn blank_alias_behaves_like_a_miss() {
    let blank = PaymentRecord {
        path: vec!["nodeBlank".into()],
        ..Default::default()
    };
    assert_eq!(
        resolve_identity(&blank, &directory(), UNKNOWN),
        resolve_identity(&blank, &Vec::<NodeDirectoryEntry>::new(), UNKNOWN)
    );
}

#[test]
fn absent_and_empty_path_resolve_identically() {
    let absent = record(r#"{"sending": true, "status": "sending"}"#);
    let empty = record(r#"{"path": [], "sending": true, "status": "sending"}"#);
    assert_eq!(
        resolve_identity(&absent, &directory(), UNKNOWN),
        resolve_identity(&empty, &directory(), UNKNOWN)
    );
}

#[test]
fn unrecognized_status_is_reported_as_unknown() {
    let payment = record(r#"{"sending": true, "status": "in_flight", "value": 7}"#);
    let state = map_presentation_state(&payment);
    assert_eq!(state.kind, PresentationKind::Unknown);
    assert_eq!(state.message, None);
    assert!(!state.de_emphasized);
}

/// BOLT-11 test vector "1 cup coffee", payable to the node below.
const COFFEE_INVOICE: &str = "lnbc2500u1pvjluezsp5zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zygspp5qqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqypqdq5xysxxatsyp3k7enxv4jsxqzpu9qrsgquk0rl77nj30yxdy8j9vdx85fkpmdla2087ne0xh8nhedh8w27kyke0lp53ut353s06fv3qfegext0eh0ymjpf39tuven09sam30g4vgpfna3rh";
const COFFEE_PAYEE: &str = "03e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad";

#[test]
fn invoice_payment_resolves_through_decoded_payee() {
    let payment = PaymentRecord {
        payment_request: Some(COFFEE_INVOICE.into()),
        sending: true,
        status: Some(ledgerline_common::payment::PaymentStatus::Sending),
        ..Default::default()
    };

    let known = vec![NodeDirectoryEntry::new(COFFEE_PAYEE, "Alice")];
    assert_eq!(resolve_identity(&payment, &known, UNKNOWN), "Alice");

    assert_eq!(
        resolve_identity(&payment, &directory(), UNKNOWN),
        "03e7156ae3...0f934dd9ad"
    );
}
