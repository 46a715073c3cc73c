//! Counterparty name resolution for payment list entries.

use tracing::debug;

use crate::directory::NodeLookup;
use crate::invoice::{Bolt11Decoder, PaymentRequestDecoder};
use crate::payment::{PaymentOrigin, PaymentRecord};
use crate::pubkey::{Ellipsis, PubkeyFormatter};

/// Resolves the best display name for a payment's counterparty.
///
/// Resolution order, first hit wins:
/// 1. the last hop of the route;
/// 2. the payee node key of the decoded payment request;
/// 3. if either produced a node key: its directory alias, or the truncated key;
/// 4. otherwise the caller's fallback label.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver<D = Bolt11Decoder, F = Ellipsis> {
    decoder: D,
    formatter: F,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D, F> IdentityResolver<D, F>
where
    D: PaymentRequestDecoder,
    F: PubkeyFormatter,
{
    pub fn with_collaborators(decoder: D, formatter: F) -> Self {
        IdentityResolver { decoder, formatter }
    }

    /// Node key of the counterparty, if the record reveals one.
    pub fn counterparty_key(&self, payment: &PaymentRecord) -> Option<String> {
        match payment.origin() {
            PaymentOrigin::Routed => payment.last_hop().map(str::to_string),
            PaymentOrigin::Invoice => {
                let request = payment.payment_request()?;
                match self.decoder.decode(request) {
                    Ok(decoded) => Some(decoded.payee_node_key).filter(|key| !key.is_empty()),
                    Err(e) => {
                        debug!(payment_hash = %payment.payment_hash, "ignoring payment request: {e}");
                        None
                    }
                }
            }
            PaymentOrigin::Unattributed => None,
        }
    }

    pub fn resolve<L>(&self, payment: &PaymentRecord, directory: &L, fallback_label: &str) -> String
    where
        L: NodeLookup + ?Sized,
    {
        match self.counterparty_key(payment) {
            Some(key) => match directory.alias_of(&key) {
                Some(alias) => alias.to_string(),
                None => self.formatter.truncate(&key),
            },
            None => fallback_label.to_string(),
        }
    }
}

/// Resolve with the BOLT-11 decoder and default truncation.
pub fn resolve_identity<L>(payment: &PaymentRecord, directory: &L, fallback_label: &str) -> String
where
    L: NodeLookup + ?Sized,
{
    IdentityResolver::new().resolve(payment, directory, fallback_label)
}
