use std::collections::HashMap;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Source of exchange rates for price conversion.
pub trait RateProvider: Send + Sync {
    fn convert(&self, amount: f64, from: &str, to: &str) -> f64;
}

/// Fixed rate table expressed as units of each currency per one US dollar.
#[derive(Debug, Clone)]
pub struct StaticRates {
    per_usd: HashMap<String, Decimal>,
}

impl Default for StaticRates {
    fn default() -> Self {
        Self::new()
            .with_rate("USD", 1.0)
            .with_rate("NGN", 1500.0)
            .with_rate("EUR", 0.92)
            .with_rate("GBP", 0.79)
    }
}

impl StaticRates {
    pub fn new() -> Self {
        Self {
            per_usd: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, code: &str, per_usd: f64) -> Self {
        match Decimal::from_f64(per_usd) {
            Some(rate) if rate > Decimal::ZERO => {
                self.per_usd.insert(code.to_uppercase(), rate);
            }
            _ => tracing::warn!(code, per_usd, "ignoring unusable exchange rate"),
        }
        self
    }

    fn rate(&self, code: &str) -> Option<Decimal> {
        self.per_usd.get(&code.to_uppercase()).copied()
    }

    fn convert_decimal(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        let (from_rate, to_rate) = (self.rate(from)?, self.rate(to)?);
        Decimal::from_f64(amount)?
            .checked_div(from_rate)?
            .checked_mul(to_rate)?
            .to_f64()
    }
}

impl RateProvider for StaticRates {
    fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        if from.eq_ignore_ascii_case(to) {
            return amount;
        }
        self.convert_decimal(amount, from, to).unwrap_or_else(|| {
            tracing::warn!(from, to, "no exchange rate, leaving amount unconverted");
            amount
        })
    }
}
