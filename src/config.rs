use std::time::Duration;

use clap::Parser;

// Timing (in milliseconds)
pub const BASE_TICK_MS: u64 = 1000;
pub const MIN_TICK_MS: u64 = 100;
pub const SPEED_INCREASE_PER_LEVEL: u64 = 75;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    #[error("tick interval must be positive")]
    ZeroTick,
    #[error("minimum tick interval must be positive")]
    ZeroMinTick,
    #[error("minimum tick interval ({min}ms) exceeds the base interval ({base}ms)")]
    MinAboveBase { min: u64, base: u64 },
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "blockfall", about = "Falling-block puzzle for the terminal")]
pub struct Config {
    /// RNG seed. Defaults to the wall clock in milliseconds.
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u64>,

    /// Gravity interval at level 0.
    #[arg(long, env = "BLOCKFALL_TICK_MS", default_value_t = BASE_TICK_MS)]
    pub tick_ms: u64,

    /// Fastest gravity interval reachable by leveling up.
    #[arg(long, env = "BLOCKFALL_MIN_TICK_MS", default_value_t = MIN_TICK_MS)]
    pub min_tick_ms: u64,

    /// Interval shaved off per level.
    #[arg(long, env = "BLOCKFALL_SPEED_STEP_MS", default_value_t = SPEED_INCREASE_PER_LEVEL)]
    pub speed_step_ms: u64,

    /**
     * Run headless: feed an event script and print the final state as JSON.
     * Script letters: t=tick l=left r=right d=down u=rotate, whitespace ignored.
     * Example:
     *   --seed 12345678 --replay "ttt ll u tttt"
     */
    #[arg(long, value_name = "SCRIPT")]
    pub replay: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: BASE_TICK_MS,
            min_tick_ms: MIN_TICK_MS,
            speed_step_ms: SPEED_INCREASE_PER_LEVEL,
            replay: None,
        }
    }
}

impl Config {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroMinTick);
        }
        if self.min_tick_ms > self.tick_ms {
            return Err(ConfigError::MinAboveBase {
                min: self.min_tick_ms,
                base: self.tick_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval for `level`.
    pub fn tick_interval(&self, level: u32) -> Duration {
        let speed_reduction = level as u64 * self.speed_step_ms;
        let ms = self
            .tick_ms
            .saturating_sub(speed_reduction)
            .max(self.min_tick_ms);
        Duration::from_millis(ms)
    }
}
