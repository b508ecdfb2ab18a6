//! One episode's market state (spec §3 Market state).
use super::config::MarketConfig;
use super::indicators;
use super::participant::Participant;

#[derive(Debug, Clone)]
pub struct MarketState {
    pub price: f64,
    pub volume: u64,
    pub fundamental_value: f64,
    pub rsi: f64,
    pub sma: f64,
    pub atr: f64,
    pub price_history: Vec<f64>,
    pub participants: Vec<Participant>,
}

impl MarketState {
    /// The shared starting state cloned into every episode of a generation (spec
    /// §4.6 step 2): price = configured initial price, fundamental value drawn once
    /// from `P0*(1 + U(-0.5, 0.5))`, RSI = 50, SMA = P0, ATR = 0.
    pub fn initial(config: &MarketConfig, fundamental_value: f64, strategies: &[String]) -> Self {
        let participants = strategies
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Participant::new(
                    i as i64,
                    s.clone(),
                    config.initial_funds,
                    config.initial_holdings,
                )
            })
            .collect();

        Self {
            price: config.initial_price,
            volume: 0,
            fundamental_value,
            rsi: 50.0,
            sma: config.initial_price,
            atr: 0.0,
            price_history: Vec::new(),
            participants,
        }
    }

    /// Appends the new clearing price and recomputes indicators (spec §4.6 step 4.h).
    pub fn record_round(&mut self, price: f64, volume: u64, config: &MarketConfig) {
        self.price = price;
        self.volume = volume;
        self.price_history.push(price);
        self.rsi = indicators::rsi(&self.price_history, config.rsi_period);
        self.sma = indicators::sma(&self.price_history, config.sma_period);
        self.atr = indicators::atr(&self.price_history, config.atr_period);
    }
}
