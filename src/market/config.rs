//! Market simulator tunables (spec §4.6 Configuration paragraph, spec §6
//! `Market.{...}`).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct MarketConfig {
    pub initial_price: f64,
    pub initial_funds: f64,
    pub initial_holdings: i64,
    pub rounds_per_generation: usize,
    pub noise_orders_per_round: usize,
    pub sims_per_generation: usize,
    pub fundamental_value_changes_per_simulation: usize,
    pub demand_push_coefficient: f64,
    pub fundamental_pull_coefficient: f64,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub sma_period: usize,
    pub risk_free_rate: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            initial_funds: 10_000.0,
            initial_holdings: 0,
            rounds_per_generation: 50,
            noise_orders_per_round: 10,
            sims_per_generation: 5,
            fundamental_value_changes_per_simulation: 5,
            demand_push_coefficient: 0.05,
            fundamental_pull_coefficient: 0.1,
            rsi_period: 14,
            atr_period: 14,
            sma_period: 14,
            risk_free_rate: 0.0,
        }
    }
}
