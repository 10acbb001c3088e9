//! Typed wire records of the REST API.
//!
//! The server itself works on generic JSON driven by entity descriptors;
//! these types are for clients that want the concrete shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod currency {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Currency {
        pub id: Option<i64>,
        pub code: String,
        pub name: String,
        pub symbol: Option<String>,
    }
}

pub mod journal {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Journal {
        pub id: Option<i64>,
        pub code: String,
        pub name: String,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod vat_rate {
    use super::*;

    /// A VAT rate.
    ///
    /// `percentage` is sent as a decimal string so no digit is lost; compare
    /// it with `==`, which ignores the decimal scale (`1` equals `1.00`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VatRate {
        pub id: Option<i64>,
        pub code: String,
        #[serde(with = "rust_decimal::serde::str")]
        pub percentage: Decimal,
        pub description: Option<String>,
        pub valid_from: Option<DateTime<Utc>>,
    }
}

pub mod error {
    use super::*;

    /// Body of every error response.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ErrorBody {
        pub error: String,
        /// Stable failure class, e.g. `idexists` or `idnotfound`.
        pub error_key: String,
        pub entity_name: Option<String>,
    }
}
