//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod fiscal_periods;
pub mod inventories;
pub mod journal_entries;
pub mod journal_lines;
pub mod journal_sequences;
pub mod sea_orm_active_enums;
pub mod stock_movements;
pub mod stock_opname_items;
pub mod stock_opnames;
pub mod stock_reservations;
