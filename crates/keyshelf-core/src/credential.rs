//! The credential allow-list.
//!
//! Every credential lives in the OS store under [`SERVICE_NAME`], using its
//! [`CredentialName`] as the account. Names outside the allow-list never reach
//! a store backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Service namespace under which every credential is filed.
pub const SERVICE_NAME: &str = "mcp-servers";

/// A recognised credential name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialName {
    CompanyOwnerSsn,
    BankAcct,
    BankRouting,
    CompanyName,
    CompanyEin,
    CompanyAddress,
    CompanyOwner,
}

impl CredentialName {
    /// All credential names, in canonical order.
    pub const ALL: [CredentialName; 7] = [
        CredentialName::CompanyOwnerSsn,
        CredentialName::BankAcct,
        CredentialName::BankRouting,
        CredentialName::CompanyName,
        CredentialName::CompanyEin,
        CredentialName::CompanyAddress,
        CredentialName::CompanyOwner,
    ];

    /// The account string used in the OS store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyOwnerSsn => "COMPANY_OWNER_SSN",
            Self::BankAcct => "BANK_ACCT",
            Self::BankRouting => "BANK_ROUTING",
            Self::CompanyName => "COMPANY_NAME",
            Self::CompanyEin => "COMPANY_EIN",
            Self::CompanyAddress => "COMPANY_ADDRESS",
            Self::CompanyOwner => "COMPANY_OWNER",
        }
    }

    /// Comma-separated list of every accepted name, for error hints.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown credential '{0}'")]
pub struct UnknownCredential(pub String);

impl FromStr for CredentialName {
    type Err = UnknownCredential;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| UnknownCredential(s.to_string()))
    }
}
