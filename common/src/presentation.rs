use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::payment::{PaymentRecord, PaymentStatus};

/// What a payment list entry should convey about its payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    /// Completed payment from history; shown with its date.
    Historical,
    Processing,
    Success,
    Failure,
    /// In flight with a status this crate does not recognize.
    Unknown,
}

/// Direction an amount is drawn with. The payment list only holds outgoing
/// payments, so outflow is the only direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSign {
    Negative,
}

impl AmountSign {
    pub fn symbol(self) -> &'static str {
        match self {
            AmountSign::Negative => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationState {
    pub kind: PresentationKind,
    /// Failure text, passed through from the record unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub amount_sign: AmountSign,
    /// Magnitude in satoshis, unconverted.
    pub amount_sats: u64,
    /// Render with reduced emphasis. Only set for failures.
    pub de_emphasized: bool,
}

/// Derive the presentation of a payment from its current record.
///
/// Payment lists only contain outgoing payments, so every amount is shown as
/// an outflow.
pub fn map_presentation_state(payment: &PaymentRecord) -> PresentationState {
    let (kind, message) = if !payment.sending {
        (PresentationKind::Historical, None)
    } else {
        match &payment.status {
            Some(PaymentStatus::Sending) => (PresentationKind::Processing, None),
            Some(PaymentStatus::Successful) => (PresentationKind::Success, None),
            Some(PaymentStatus::Failed) => (
                PresentationKind::Failure,
                Some(payment.error.clone().unwrap_or_default()),
            ),
            Some(PaymentStatus::Other(status)) => {
                debug!(payment_hash = %payment.payment_hash, %status, "unrecognized payment status");
                (PresentationKind::Unknown, None)
            }
            None => {
                debug!(payment_hash = %payment.payment_hash, "in-flight payment without status");
                (PresentationKind::Unknown, None)
            }
        }
    };

    PresentationState {
        de_emphasized: kind == PresentationKind::Failure,
        kind,
        message,
        amount_sign: AmountSign::Negative,
        amount_sats: payment.value,
    }
}
