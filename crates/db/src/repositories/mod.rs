//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod auto_journal;
pub mod fiscal;
pub mod inventory;
pub mod journal;
pub mod ledger;
pub mod opname;
pub mod reconciliation;
pub mod reservation;
pub mod shipment;

pub use account::{AccountRepository, CreateAccountInput, UpdateAccountInput};
pub use auto_journal::{AutoJournalRepository, DispatchOutcome};
pub use fiscal::FiscalRepository;
pub use inventory::{InventoryRepository, LockedStock};
pub use journal::{JournalEntryWithLines, JournalRepository};
pub use ledger::LedgerRepository;
pub use opname::{OpnameCompletion, OpnameRepository, OpnameWithItems};
pub use reconciliation::{ReconciliationRepository, StockDrift};
pub use reservation::ReservationRepository;
pub use shipment::{ShipOrderInput, ShipmentLine, ShipmentRepository, ShipmentResult};
