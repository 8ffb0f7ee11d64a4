//! Standard account types and the debtor/creditor balance rule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dotted chart-of-accounts number ("1.01.01").
///
/// Segments are zero-padded, so lexical order matches chart order and an
/// ancestor is always a dotted prefix of its descendants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Separator between account-number segments.
    pub const SEPARATOR: char = '.';

    /// Creates an account number from its dotted form.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Returns the dotted form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Depth of this account in the chart (number of dotted segments).
    #[must_use]
    pub fn level(&self) -> u32 {
        u32::try_from(self.0.split(Self::SEPARATOR).count()).unwrap_or(u32::MAX)
    }

    /// The immediate parent account number, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind(Self::SEPARATOR)
            .map(|idx| Self(self.0[..idx].to_string()))
    }

    /// All ancestor account numbers, shallowest first.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Self> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(number) = current {
            current = number.parent();
            ancestors.push(number);
        }
        ancestors.reverse();
        ancestors
    }

    /// Returns true if `self` is a proper ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(Self::SEPARATOR)
    }
}

impl std::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Posting role of a standard account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Posting leaf: vouchers post directly to it.
    Posting,
    /// Control account: summarizes its children.
    Control,
}

/// Debtor/creditor nature of a standard account.
///
/// Determines the sign convention for the current balance:
/// - Debtor: balance = initial + debit - credit
/// - Creditor: balance = initial + credit - debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtorCreditor {
    /// Debtor-nature account (assets, expenses).
    Debtor,
    /// Creditor-nature account (liabilities, equity, revenue).
    Creditor,
}

impl DebtorCreditor {
    /// Current balance of a period under this nature's sign convention.
    #[must_use]
    pub fn current_balance(self, initial: Decimal, debit: Decimal, credit: Decimal) -> Decimal {
        initial + self.net_movement(debit, credit)
    }

    /// Signed net movement (debits and credits only) under this nature.
    #[must_use]
    pub fn net_movement(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debtor => debit - credit,
            Self::Creditor => credit - debit,
        }
    }
}

/// A node in the chart-of-accounts tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardAccount {
    /// Account number ("1.01.01").
    pub number: AccountNumber,
    /// Account name.
    pub name: String,
    /// Posting role.
    pub role: AccountRole,
    /// Debtor/creditor nature.
    pub nature: DebtorCreditor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_and_parent() {
        let number = AccountNumber::new("1.01.01");
        assert_eq!(number.level(), 3);
        assert_eq!(number.parent(), Some(AccountNumber::new("1.01")));
        assert_eq!(AccountNumber::new("1").parent(), None);
    }

    #[test]
    fn test_ancestors_shallowest_first() {
        let number = AccountNumber::new("1.01.01.05");
        let ancestors = number.ancestors();
        assert_eq!(
            ancestors,
            vec![
                AccountNumber::new("1"),
                AccountNumber::new("1.01"),
                AccountNumber::new("1.01.01"),
            ]
        );
    }

    #[test]
    fn test_is_ancestor_of() {
        let parent = AccountNumber::new("1.01");
        assert!(parent.is_ancestor_of(&AccountNumber::new("1.01.01")));
        assert!(!parent.is_ancestor_of(&AccountNumber::new("1.01")));
        // "1.01" is not an ancestor of "1.010" even though it is a string prefix
        assert!(!parent.is_ancestor_of(&AccountNumber::new("1.010")));
    }

    #[test]
    fn test_lexical_order_matches_chart_order() {
        assert!(AccountNumber::new("1.01.01") < AccountNumber::new("1.01.02"));
        assert!(AccountNumber::new("1.01") < AccountNumber::new("1.01.01"));
    }

    #[test]
    fn test_debtor_sign_rule() {
        let balance = DebtorCreditor::Debtor.current_balance(dec!(100), dec!(50), dec!(30));
        assert_eq!(balance, dec!(120));
    }

    #[test]
    fn test_creditor_sign_rule() {
        let balance = DebtorCreditor::Creditor.current_balance(dec!(100), dec!(50), dec!(30));
        assert_eq!(balance, dec!(80));
    }
}
