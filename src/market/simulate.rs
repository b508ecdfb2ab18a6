//! The per-generation market simulation (spec §4.6): decode once, run
//! `sims_per_generation` independent episodes, aggregate fitness per genotype.
use super::config::MarketConfig;
use super::participant::Order;
use super::state::MarketState;
use crate::expr::{Environment, Program};
use crate::rng::worker_rng;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Per-genotype result of one generation's market simulation (spec §3 Strategy
/// result).
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub id: i64,
    pub strategy: String,
    pub active_return: f64,
    pub mean_sharpe: f64,
}

/// A full generation's market outcome: per-genotype fitness plus the aggregate
/// market statistics a caller needs to report on the generation as a whole
/// (spec §6 history export).
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub results: Vec<StrategyResult>,
    /// Mean of each episode's final clearing price.
    pub final_price: f64,
    /// Real (non-noise) buy order quantity, summed across every round of
    /// every episode.
    pub buy_orders: u64,
    /// Real (non-noise) sell order quantity, summed across every round of
    /// every episode.
    pub sell_orders: u64,
}

/// Clearing price update (spec §4.6.1). Unchanged price when there are no orders at
/// all.
pub fn clearing_price(price: f64, fundamental_value: f64, buy_qty: f64, sell_qty: f64, config: &MarketConfig) -> f64 {
    let total = buy_qty + sell_qty;
    if total == 0.0 {
        return price;
    }
    let demand_push = config.demand_push_coefficient * (buy_qty - sell_qty) / total;
    let fundamental_pull = config.fundamental_pull_coefficient * (fundamental_value - price);
    (price + demand_push + fundamental_pull).max(1.0)
}

fn sample_fundamental(initial_price: f64, rng: &mut impl Rng) -> f64 {
    initial_price * (1.0 + rng.gen_range(-0.5..0.5))
}

fn sharpe(values: &[f64], risk_free_rate: f64) -> f64 {
    if values.len() < 3 {
        return 0.0;
    }
    let excess: Vec<f64> = values
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0] - risk_free_rate)
        .collect();
    if excess.len() < 2 {
        return 0.0;
    }
    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    let variance = excess.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / excess.len() as f64;
    let stddev = variance.sqrt();
    if stddev == 0.0 {
        0.0
    } else {
        mean / stddev
    }
}

/// Runs one episode in place, mutating `state`. Returns the episode's total real
/// (non-noise) buy and sell quantities, summed across every round.
fn run_episode(
    state: &mut MarketState,
    config: &MarketConfig,
    programs: &HashMap<String, Program>,
    rng: &mut impl Rng,
) -> (u64, u64) {
    let regime_interval = if config.fundamental_value_changes_per_simulation == 0 {
        0
    } else {
        (config.rounds_per_generation / config.fundamental_value_changes_per_simulation).max(1)
    };

    let mut episode_buy = 0u64;
    let mut episode_sell = 0u64;

    for round in 0..config.rounds_per_generation {
        if regime_interval != 0 && round % regime_interval == 0 {
            state.fundamental_value = sample_fundamental(config.initial_price, rng);
        }

        let price = state.price;
        for p in state.participants.iter_mut() {
            p.update_solvency(price);
        }

        let progress = round as f64 / config.rounds_per_generation as f64;
        let mut orders = Vec::with_capacity(state.participants.len());
        for p in state.participants.iter() {
            if !p.solvent {
                orders.push(Order::Hold);
                continue;
            }
            let mut env = Environment::new();
            env.bind("$PRICE", price)
                .bind("$RSI", state.rsi)
                .bind("$SMA", state.sma)
                .bind("$ATR", state.atr)
                .bind("$VOLUME", state.volume as f64)
                .bind("$FUNDAMENTAL", state.fundamental_value)
                .bind("$CASH", p.cash)
                .bind("$HOLDINGS", p.holdings as f64)
                .bind("$PROGRESS", progress)
                .bind("$RANDOM", rng.gen_range(0.0..1.0));

            let order = programs
                .get(&p.strategy)
                .and_then(|program| program.eval_to_string(&env).ok())
                .map(|s| Order::parse(&s))
                .unwrap_or(Order::Hold);
            orders.push(order);
        }

        let (real_buy, real_sell) = orders.iter().fold((0i64, 0i64), |(b, s), o| match o {
            Order::Buy(q) if *q > 0 => (b + q, s),
            Order::Sell(q) if *q > 0 => (b, s + q),
            _ => (b, s),
        });

        let direction = rng.gen_range(0.0..1.0);
        let mut noise_buy = 0i64;
        let mut noise_sell = 0i64;
        for _ in 0..config.noise_orders_per_round {
            let qty = rng.gen_range(5..105);
            if rng.gen_range(0.0..1.0) < direction {
                noise_sell += qty;
            } else {
                noise_buy += qty;
            }
        }

        let total_buy = (real_buy + noise_buy) as f64;
        let total_sell = (real_sell + noise_sell) as f64;
        let new_price = clearing_price(state.price, state.fundamental_value, total_buy, total_sell, config);

        for (p, order) in state.participants.iter_mut().zip(orders.iter()) {
            p.execute(*order, new_price);
            p.portfolio_value_history.push(p.wealth(new_price));
        }

        let volume = (real_buy + real_sell) as u64;
        state.record_round(new_price, volume, config);

        episode_buy += real_buy as u64;
        episode_sell += real_sell as u64;
    }

    (episode_buy, episode_sell)
}

/// The per-generation procedure (spec §4.6): decode once (done by caller, passed in
/// as `strategies`), build and clone the initial state, run each episode, aggregate
/// fitness and market statistics.
pub fn run_generation(strategies: &[String], config: &MarketConfig, seed: u64) -> GenerationReport {
    let mut programs = HashMap::new();
    for s in strategies {
        programs
            .entry(s.clone())
            .or_insert_with(|| Program::compile(s).unwrap_or_else(|_| Program::compile("\"HOLD\"").unwrap()));
    }

    let mut seed_rng = ChaCha8Rng::seed_from_u64(seed);
    let fundamental_value = sample_fundamental(config.initial_price, &mut seed_rng);
    let initial_state = MarketState::initial(config, fundamental_value, strategies);

    let mut active_returns = vec![0.0; strategies.len()];
    let mut disqualified = vec![false; strategies.len()];
    let mut sharpe_sums = vec![0.0; strategies.len()];
    let mut price_sum = 0.0;
    let mut buy_orders = 0u64;
    let mut sell_orders = 0u64;

    for episode in 0..config.sims_per_generation {
        let mut episode_rng = worker_rng(seed, episode);
        let mut state = initial_state.clone();
        let (episode_buy, episode_sell) = run_episode(&mut state, config, &programs, &mut episode_rng);
        buy_orders += episode_buy;
        sell_orders += episode_sell;

        let final_price = state.price;
        price_sum += final_price;
        for (i, p) in state.participants.iter().enumerate() {
            if !p.solvent {
                disqualified[i] = true;
            }
            let passive_value = config.initial_funds + config.initial_holdings as f64 * final_price;
            let final_value = p.cash + p.holdings as f64 * final_price;
            active_returns[i] += final_value - passive_value;
            sharpe_sums[i] += sharpe(&p.portfolio_value_history, config.risk_free_rate);
        }
    }

    let results = strategies
        .iter()
        .enumerate()
        .map(|(i, s)| StrategyResult {
            id: i as i64,
            strategy: s.clone(),
            active_return: if disqualified[i] {
                f64::NEG_INFINITY
            } else {
                active_returns[i]
            },
            mean_sharpe: sharpe_sums[i] / config.sims_per_generation as f64,
        })
        .collect();

    GenerationReport {
        results,
        final_price: price_sum / config.sims_per_generation.max(1) as f64,
        buy_orders,
        sell_orders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clearing_price_unchanged_with_zero_orders() {
        let config = MarketConfig::default();
        assert_relative_eq!(clearing_price(100.0, 110.0, 0.0, 0.0, &config), 100.0);
    }

    #[test]
    fn clearing_price_with_pure_demand() {
        let config = MarketConfig {
            demand_push_coefficient: 0.05,
            fundamental_pull_coefficient: 0.0,
            ..MarketConfig::default()
        };
        assert_relative_eq!(clearing_price(100.0, 110.0, 30.0, 0.0, &config), 100.05);
    }

    #[test]
    fn price_never_drops_below_one() {
        let config = MarketConfig {
            demand_push_coefficient: 10.0,
            fundamental_pull_coefficient: 10.0,
            ..MarketConfig::default()
        };
        let price = clearing_price(1.0, -1000.0, 0.0, 100.0, &config);
        assert!(price >= 1.0);
    }

    #[test]
    fn bankrupt_strategy_is_disqualified() {
        let config = MarketConfig {
            rounds_per_generation: 3,
            sims_per_generation: 1,
            noise_orders_per_round: 0,
            fundamental_value_changes_per_simulation: 0,
            initial_funds: 100.0,
            initial_holdings: 0,
            ..MarketConfig::default()
        };
        let strategies = vec!["\"BUY 1000000\"".to_string()];
        let report = run_generation(&strategies, &config, 42);
        assert_eq!(report.results[0].active_return, f64::NEG_INFINITY);
    }

    #[test]
    fn solvent_strategy_yields_finite_fitness() {
        let config = MarketConfig {
            rounds_per_generation: 5,
            sims_per_generation: 2,
            noise_orders_per_round: 2,
            ..MarketConfig::default()
        };
        let strategies = vec!["\"HOLD\"".to_string()];
        let report = run_generation(&strategies, &config, 7);
        assert!(report.results[0].active_return.is_finite());
    }

    #[test]
    fn report_aggregates_final_price_and_real_order_totals() {
        let config = MarketConfig {
            rounds_per_generation: 5,
            sims_per_generation: 2,
            noise_orders_per_round: 0,
            ..MarketConfig::default()
        };
        let strategies = vec!["\"BUY 3\"".to_string()];
        let report = run_generation(&strategies, &config, 7);
        assert!(report.final_price > 0.0);
        assert_eq!(report.buy_orders, 3 * config.rounds_per_generation as u64 * config.sims_per_generation as u64);
        assert_eq!(report.sell_orders, 0);
    }
}
