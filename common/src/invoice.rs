//! Payment request decoding.
//!
//! The identity resolver only needs the payee node key out of an encoded
//! payment request, so decoders are abstracted behind
//! [`PaymentRequestDecoder`] and report failure through [`DecodeError`]
//! instead of panicking.

use std::str::FromStr;

use lightning_invoice::Bolt11Invoice;
use serde::Serialize;
use thiserror::Error;

/// The fields of a decoded payment request this crate cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPaymentRequest {
    /// Hex-encoded node key of the payee.
    pub payee_node_key: String,
    pub payment_hash: String,
    pub amount_msat: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payment request is empty")]
    Empty,

    #[error("invalid payment request: {0}")]
    Invalid(String),
}

/// Turns an encoded payment request into its payee information.
///
/// Implementations must be pure: the same input always decodes to the same
/// output, and no network lookup may happen.
pub trait PaymentRequestDecoder {
    fn decode(&self, encoded: &str) -> Result<DecodedPaymentRequest, DecodeError>;
}

/// BOLT-11 decoder backed by `lightning-invoice`.
///
/// When the invoice carries no explicit payee field the key is recovered from
/// the invoice signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bolt11Decoder;

impl PaymentRequestDecoder for Bolt11Decoder {
    fn decode(&self, encoded: &str) -> Result<DecodedPaymentRequest, DecodeError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(DecodeError::Empty);
        }
        // Wallets hand these around with a URI scheme prefix.
        let encoded = strip_lightning_scheme(encoded);

        let invoice = Bolt11Invoice::from_str(encoded)
            .map_err(|e| DecodeError::Invalid(e.to_string()))?;

        Ok(DecodedPaymentRequest {
            payee_node_key: invoice.get_payee_pub_key().to_string(),
            payment_hash: invoice.payment_hash().to_string(),
            amount_msat: invoice.amount_milli_satoshis(),
        })
    }
}

fn strip_lightning_scheme(encoded: &str) -> &str {
    const SCHEME: &str = "lightning:";
    match encoded.get(..SCHEME.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SCHEME) => &encoded[SCHEME.len()..],
        _ => encoded,
    }
}
