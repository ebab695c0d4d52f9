//! Entity re-exports under their table-level names.

pub use super::accounts::Entity as Accounts;
pub use super::fiscal_periods::Entity as FiscalPeriods;
pub use super::inventories::Entity as Inventories;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::journal_lines::Entity as JournalLines;
pub use super::journal_sequences::Entity as JournalSequences;
pub use super::stock_movements::Entity as StockMovements;
pub use super::stock_opname_items::Entity as StockOpnameItems;
pub use super::stock_opnames::Entity as StockOpnames;
pub use super::stock_reservations::Entity as StockReservations;
