//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Inventory policy configuration.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Account codes used by automatic journals.
    #[serde(default)]
    pub accounts: AccountMappingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// What happens when an outbound movement asks for more than is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStockPolicy {
    /// Reject the movement with an insufficient-stock error.
    #[default]
    Block,
    /// Let on-hand go negative and log a warning.
    Allow,
}

impl NegativeStockPolicy {
    /// Returns true if on-hand may drop below zero.
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Inventory configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    /// Negative on-hand policy for OUT and TRANSFER movements.
    #[serde(default)]
    pub negative_stock: NegativeStockPolicy,
}

/// Chart-of-accounts codes the automatic journals post to.
///
/// The defaults match the chart of accounts installed by the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountMappingConfig {
    /// Cash on hand / bank.
    pub cash: String,
    /// Trade receivables.
    pub accounts_receivable: String,
    /// Merchandise inventory.
    pub inventory: String,
    /// Trade payables.
    pub accounts_payable: String,
    /// Sales revenue.
    pub sales_revenue: String,
    /// Other income from stock count surpluses.
    pub inventory_gain: String,
    /// Cost of goods sold.
    pub cost_of_goods_sold: String,
    /// Expense for stock count shortages.
    pub inventory_loss: String,
}

impl Default for AccountMappingConfig {
    fn default() -> Self {
        Self {
            cash: "1100".to_string(),
            accounts_receivable: "1200".to_string(),
            inventory: "1300".to_string(),
            accounts_payable: "2100".to_string(),
            sales_revenue: "4100".to_string(),
            inventory_gain: "4900".to_string(),
            cost_of_goods_sold: "5100".to_string(),
            inventory_loss: "6900".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NERACA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("NERACA__DATABASE__URL", Some("postgres://localhost/neraca")),
                ("NERACA__INVENTORY__NEGATIVE_STOCK", Some("allow")),
                ("NERACA__ACCOUNTS__CASH", Some("1110")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/neraca");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.inventory.negative_stock, NegativeStockPolicy::Allow);
                assert_eq!(config.accounts.cash, "1110");
                assert_eq!(config.accounts.inventory, "1300");
            },
        );
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        temp_env::with_vars(
            [
                ("NERACA__DATABASE__URL", Some("postgres://localhost/neraca")),
                ("NERACA__INVENTORY__NEGATIVE_STOCK", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.inventory.negative_stock, NegativeStockPolicy::Block);
                assert_eq!(config.accounts, AccountMappingConfig::default());
            },
        );
    }

    #[test]
    fn test_negative_stock_policy() {
        assert!(!NegativeStockPolicy::Block.allows_negative());
        assert!(NegativeStockPolicy::Allow.allows_negative());
        assert_eq!(NegativeStockPolicy::default(), NegativeStockPolicy::Block);
    }
}
