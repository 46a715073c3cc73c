use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Status reported for an outbound Lightning payment.
///
/// Unrecognized strings are kept verbatim in `Other` so that the caller can
/// decide what to show instead of the record failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Sending,
    Successful,
    Failed,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Sending => "sending",
            PaymentStatus::Successful => "successful",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sending" => PaymentStatus::Sending,
            "successful" => PaymentStatus::Successful,
            "failed" => PaymentStatus::Failed,
            _ => PaymentStatus::Other(s),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which fields of a [`PaymentRecord`] carry the counterparty.
///
/// - `Routed`: the payment went out over a route, `path` is non-empty.
/// - `Invoice`: no route is known yet, but the payment was created from an
///   encoded payment request.
/// - `Unattributed`: neither is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOrigin {
    Routed,
    Invoice,
    Unattributed,
}

/// A payment as handed over by the wallet's payment list.
///
/// `path` may be missing or `null` in the source JSON; both read as an empty
/// route. Integer fields accept either JSON numbers or the decimal strings
/// lnd uses for 64-bit values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_request: Option<String>,
    #[serde(default)]
    pub sending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Failure description; only meaningful when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Amount in satoshis, unsigned.
    #[serde(default, deserialize_with = "lenient_int")]
    pub value: u64,
    /// Seconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_int")]
    pub creation_date: i64,
    #[serde(default)]
    pub payment_hash: String,
}

/// Errors raised while accepting payment records at the boundary.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed payment JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payment {payment_hash}: hop {index} of the route is empty")]
    EmptyHop { payment_hash: String, index: usize },

    #[error("payment {payment_hash}: negative creation date {creation_date}")]
    NegativeCreationDate {
        payment_hash: String,
        creation_date: i64,
    },
}

impl PaymentRecord {
    /// Parse and validate a single record.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let record: PaymentRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Parse and validate a JSON array of records.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, RecordError> {
        let records: Vec<PaymentRecord> = serde_json::from_str(json)?;
        for record in &records {
            record.validate()?;
        }
        Ok(records)
    }

    /// Check the shape rules once so that later reads need no re-checking.
    pub fn validate(&self) -> Result<(), RecordError> {
        if let Some(index) = self.path.iter().position(|hop| hop.is_empty()) {
            return Err(RecordError::EmptyHop {
                payment_hash: self.payment_hash.clone(),
                index,
            });
        }
        if self.creation_date < 0 {
            return Err(RecordError::NegativeCreationDate {
                payment_hash: self.payment_hash.clone(),
                creation_date: self.creation_date,
            });
        }
        Ok(())
    }

    /// Final hop of the route, i.e. the counterparty of a routed payment.
    pub fn last_hop(&self) -> Option<&str> {
        self.path
            .last()
            .map(String::as_str)
            .filter(|hop| !hop.is_empty())
    }

    /// The encoded payment request, if one was recorded. Empty strings count
    /// as absent.
    pub fn payment_request(&self) -> Option<&str> {
        self.payment_request
            .as_deref()
            .filter(|request| !request.is_empty())
    }

    pub fn origin(&self) -> PaymentOrigin {
        if self.last_hop().is_some() {
            PaymentOrigin::Routed
        } else if self.payment_request().is_some() {
            PaymentOrigin::Invoice
        } else {
            PaymentOrigin::Unattributed
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.creation_date, 0)
    }
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

fn lenient_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
