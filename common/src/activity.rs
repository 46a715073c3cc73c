use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::AmountFormatter;
use crate::directory::NodeLookup;
use crate::identity::IdentityResolver;
use crate::invoice::PaymentRequestDecoder;
use crate::payment::PaymentRecord;
use crate::presentation::{map_presentation_state, PresentationKind, PresentationState};
use crate::pubkey::PubkeyFormatter;

/// Second line of an activity entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Subtitle {
    /// Historical entries show when the payment was created.
    Timestamp { at: DateTime<Utc> },
    /// In-flight entries show their status, plus the failure text if any.
    Status {
        kind: PresentationKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayAmount {
    /// Signed crypto amount, e.g. "- 5000 sats".
    pub crypto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiat: Option<String>,
}

/// Everything a list surface needs to draw one payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityRow {
    pub title: String,
    pub subtitle: Option<Subtitle>,
    pub amount: DisplayAmount,
    pub state: PresentationState,
    /// Payment hash to open in the detail view. In-flight payments have no
    /// detail view yet.
    pub detail_target: Option<String>,
}

impl ActivityRow {
    pub fn build<D, F, L, A>(
        payment: &PaymentRecord,
        resolver: &IdentityResolver<D, F>,
        directory: &L,
        fallback_label: &str,
        amounts: &A,
    ) -> ActivityRow
    where
        D: PaymentRequestDecoder,
        F: PubkeyFormatter,
        L: NodeLookup + ?Sized,
        A: AmountFormatter + ?Sized,
    {
        let state = map_presentation_state(payment);

        let subtitle = match state.kind {
            PresentationKind::Historical => payment.created_at().map(|at| Subtitle::Timestamp { at }),
            kind => Some(Subtitle::Status {
                kind,
                message: state.message.clone(),
            }),
        };

        let amount = DisplayAmount {
            crypto: format!(
                "{} {}",
                state.amount_sign.symbol(),
                amounts.crypto(state.amount_sats)
            ),
            fiat: amounts.fiat(state.amount_sats),
        };

        let detail_target = (!payment.sending).then(|| payment.payment_hash.clone());

        ActivityRow {
            title: resolver.resolve(payment, directory, fallback_label),
            subtitle,
            amount,
            state,
            detail_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{CryptoUnit, FiatRate, UnitFormatter};
    use crate::directory::NodeDirectoryEntry;
    use crate::payment::PaymentStatus;

    fn formatter() -> UnitFormatter {
        UnitFormatter {
            unit: CryptoUnit::Sats,
            rate: Some(FiatRate {
                code: "EUR".into(),
                per_btc: 50_000.0,
            }),
        }
    }

    #[test]
    fn historical_row_opens_detail_and_shows_date() {
        let payment = PaymentRecord {
            path: vec!["nodeXYZ".into()],
            value: 5000,
            creation_date: 1000,
            payment_hash: "hash-a".into(),
            ..Default::default()
        };
        let nodes = vec![NodeDirectoryEntry::new("nodeXYZ", "Bob")];

        let row = ActivityRow::build(
            &payment,
            &IdentityResolver::new(),
            &nodes,
            "Unknown",
            &formatter(),
        );

        assert_eq!(row.title, "Bob");
        assert_eq!(row.detail_target.as_deref(), Some("hash-a"));
        assert_eq!(
            row.subtitle,
            Some(Subtitle::Timestamp {
                at: DateTime::from_timestamp(1000, 0).unwrap()
            })
        );
        assert_eq!(row.amount.crypto, "- 5000 sats");
        assert_eq!(row.amount.fiat.as_deref(), Some("2.50 EUR"));
    }

    #[test]
    fn rows_read_back_from_their_json_output() {
        let payment = PaymentRecord {
            sending: true,
            status: Some(PaymentStatus::Failed),
            error: Some("no route".into()),
            value: 250,
            payment_hash: "hash-c".into(),
            ..Default::default()
        };
        let historical = PaymentRecord {
            path: vec!["nodeXYZ".into()],
            value: 5000,
            creation_date: 1000,
            payment_hash: "hash-d".into(),
            ..Default::default()
        };
        let nodes = vec![NodeDirectoryEntry::new("nodeXYZ", "Bob")];
        let rows: Vec<ActivityRow> = [payment, historical]
            .iter()
            .map(|p| ActivityRow::build(p, &IdentityResolver::new(), &nodes, "Unknown", &formatter()))
            .collect();

        let json = serde_json::to_string(&rows).unwrap();
        let back: Vec<ActivityRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rows);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["subtitle"]["type"], "status");
        assert_eq!(value[0]["state"]["kind"], "failure");
        assert_eq!(value[1]["subtitle"]["type"], "timestamp");
    }

    #[test]
    fn failed_row_carries_status_and_no_detail() {
        let payment = PaymentRecord {
            sending: true,
            status: Some(PaymentStatus::Failed),
            error: Some("no route".into()),
            value: 250,
            payment_hash: "hash-b".into(),
            ..Default::default()
        };
        let nodes: Vec<NodeDirectoryEntry> = Vec::new();

        let row = ActivityRow::build(
            &payment,
            &IdentityResolver::new(),
            &nodes,
            "Unknown",
            &UnitFormatter::default(),
        );

        assert_eq!(row.title, "Unknown");
        assert_eq!(row.detail_target, None);
        assert_eq!(
            row.subtitle,
            Some(Subtitle::Status {
                kind: PresentationKind::Failure,
                message: Some("no route".into()),
            })
        );
        assert!(row.state.de_emphasized);
        assert_eq!(row.amount.fiat, None);
    }
}
