//! String-backed enums stored in entity columns.
//!
//! Each mirrors a domain enum in `neraca-core`; the `From` impls convert in
//! both directions so repositories never match on raw strings.

use neraca_core::account::{
    AccountCategory as DomainAccountCategory, AccountType as DomainAccountType,
};
use neraca_core::fiscal::FiscalPeriodStatus as DomainPeriodStatus;
use neraca_core::inventory::MovementType as DomainMovementType;
use neraca_core::ledger::JournalStatus as DomainJournalStatus;
use neraca_core::opname::OpnameStatus as DomainOpnameStatus;
use neraca_core::reservation::{
    ReservationStatus as DomainReservationStatus, ReservedFor as DomainReservedFor,
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountType {
    /// Asset.
    #[sea_orm(string_value = "ASSET")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "EQUITY")]
    Equity,
    /// Revenue.
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    /// Expense.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Account category column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AccountCategory {
    /// Current asset.
    #[sea_orm(string_value = "CURRENT_ASSET")]
    CurrentAsset,
    /// Fixed asset.
    #[sea_orm(string_value = "FIXED_ASSET")]
    FixedAsset,
    /// Other asset.
    #[sea_orm(string_value = "OTHER_ASSET")]
    OtherAsset,
    /// Current liability.
    #[sea_orm(string_value = "CURRENT_LIABILITY")]
    CurrentLiability,
    /// Long-term liability.
    #[sea_orm(string_value = "LONG_TERM_LIABILITY")]
    LongTermLiability,
    /// Equity.
    #[sea_orm(string_value = "EQUITY")]
    Equity,
    /// Operating revenue.
    #[sea_orm(string_value = "OPERATING_REVENUE")]
    OperatingRevenue,
    /// Other revenue.
    #[sea_orm(string_value = "OTHER_REVENUE")]
    OtherRevenue,
    /// Cost of goods sold.
    #[sea_orm(string_value = "COST_OF_GOODS_SOLD")]
    CostOfGoodsSold,
    /// Operating expense.
    #[sea_orm(string_value = "OPERATING_EXPENSE")]
    OperatingExpense,
    /// Other expense.
    #[sea_orm(string_value = "OTHER_EXPENSE")]
    OtherExpense,
}

/// Journal entry status column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum JournalStatus {
    /// Draft.
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Posted.
    #[sea_orm(string_value = "POSTED")]
    Posted,
    /// Voided.
    #[sea_orm(string_value = "VOIDED")]
    Voided,
}

/// Fiscal period status column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum FiscalPeriodStatus {
    /// Open.
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Closed.
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

/// Stock movement type column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MovementType {
    /// Receipt.
    #[sea_orm(string_value = "IN")]
    In,
    /// Issue.
    #[sea_orm(string_value = "OUT")]
    Out,
    /// Location to location.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// Count correction.
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}

/// Reservation status column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReservationStatus {
    /// Holding stock.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Fully consumed.
    #[sea_orm(string_value = "FULFILLED")]
    Fulfilled,
    /// Released.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// Reservation document kind column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReservedFor {
    /// Sales order.
    #[sea_orm(string_value = "SALES_ORDER")]
    SalesOrder,
    /// Transfer order.
    #[sea_orm(string_value = "TRANSFER_ORDER")]
    TransferOrder,
    /// Production order.
    #[sea_orm(string_value = "PRODUCTION_ORDER")]
    ProductionOrder,
}

/// Stock opname status column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OpnameStatus {
    /// Counting.
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Adjustments applied.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Generates `From` conversions both ways between a column enum and its
/// domain twin with identical variant names.
macro_rules! mirror_enum {
    ($column:ident, $domain:ident, [$($variant:ident),+ $(,)?]) => {
        impl From<$domain> for $column {
            fn from(value: $domain) -> Self {
                match value {
                    $($domain::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$column> for $domain {
            fn from(value: $column) -> Self {
                match value {
                    $($column::$variant => Self::$variant,)+
                }
            }
        }
    };
}

mirror_enum!(
    AccountType,
    DomainAccountType,
    [Asset, Liability, Equity, Revenue, Expense]
);
mirror_enum!(
    AccountCategory,
    DomainAccountCategory,
    [
        CurrentAsset,
        FixedAsset,
        OtherAsset,
        CurrentLiability,
        LongTermLiability,
        Equity,
        OperatingRevenue,
        OtherRevenue,
        CostOfGoodsSold,
        OperatingExpense,
        OtherExpense,
    ]
);
mirror_enum!(JournalStatus, DomainJournalStatus, [Draft, Posted, Voided]);
mirror_enum!(FiscalPeriodStatus, DomainPeriodStatus, [Open, Closed]);
mirror_enum!(MovementType, DomainMovementType, [In, Out, Transfer, Adjustment]);
mirror_enum!(ReservationStatus, DomainReservationStatus, [Active, Fulfilled, Cancelled]);
mirror_enum!(ReservedFor, DomainReservedFor, [SalesOrder, TransferOrder, ProductionOrder]);
mirror_enum!(OpnameStatus, DomainOpnameStatus, [Open, Completed]);
