//! InvoiceStatus - Settlement state of an invoice

use serde::{Deserialize, Serialize};

/// Settlement state
///
/// `Open` is the only state an invoice can leave; `Paid` and `Void` are final.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Open,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn is_final(self) -> bool {
        !matches!(self, InvoiceStatus::Open)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Open => write!(f, "open"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Void => write!(f, "void"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(InvoiceStatus::Open),
            "paid" => Ok(InvoiceStatus::Paid),
            "void" => Ok(InvoiceStatus::Void),
            _ => Err(format!("Unknown invoice status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PAID".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("refunded".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for status in [InvoiceStatus::Open, InvoiceStatus::Paid, InvoiceStatus::Void] {
            assert_eq!(status.to_string().parse::<InvoiceStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_only_open_is_not_final() {
        assert!(!InvoiceStatus::Open.is_final());
        assert!(InvoiceStatus::Paid.is_final());
        assert!(InvoiceStatus::Void.is_final());
    }
}
