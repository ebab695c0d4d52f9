//! Account classification types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level account type.
///
/// The type decides which side increases the balance:
/// - Asset, Expense: debit-normal (debit - credit)
/// - Liability, Equity, Revenue: credit-normal (credit - debit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the side that increases this account's balance.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side on which an account's balance grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Balance = debit - credit.
    Debit,
    /// Balance = credit - debit.
    Credit,
}

impl NormalBalance {
    /// Signed change in balance caused by one line.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Finer classification inside an [`AccountType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountCategory {
    /// Cash, receivables, inventory.
    CurrentAsset,
    /// Property, plant and equipment.
    FixedAsset,
    /// Everything else the business owns.
    OtherAsset,
    /// Payables due within a year.
    CurrentLiability,
    /// Loans and other long-term obligations.
    LongTermLiability,
    /// Capital and retained earnings.
    Equity,
    /// Revenue from the main business.
    OperatingRevenue,
    /// Gains and other income.
    OtherRevenue,
    /// Direct cost of goods sold.
    CostOfGoodsSold,
    /// Running costs.
    OperatingExpense,
    /// Losses and other expenses.
    OtherExpense,
}

impl AccountCategory {
    /// The account type this category belongs to.
    #[must_use]
    pub const fn account_type(self) -> AccountType {
        match self {
            Self::CurrentAsset | Self::FixedAsset | Self::OtherAsset => AccountType::Asset,
            Self::CurrentLiability | Self::LongTermLiability => AccountType::Liability,
            Self::Equity => AccountType::Equity,
            Self::OperatingRevenue | Self::OtherRevenue => AccountType::Revenue,
            Self::CostOfGoodsSold | Self::OperatingExpense | Self::OtherExpense => {
                AccountType::Expense
            }
        }
    }

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentAsset => "CURRENT_ASSET",
            Self::FixedAsset => "FIXED_ASSET",
            Self::OtherAsset => "OTHER_ASSET",
            Self::CurrentLiability => "CURRENT_LIABILITY",
            Self::LongTermLiability => "LONG_TERM_LIABILITY",
            Self::Equity => "EQUITY",
            Self::OperatingRevenue => "OPERATING_REVENUE",
            Self::OtherRevenue => "OTHER_REVENUE",
            Self::CostOfGoodsSold => "COST_OF_GOODS_SOLD",
            Self::OperatingExpense => "OPERATING_EXPENSE",
            Self::OtherExpense => "OTHER_EXPENSE",
        }
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
