use std::sync::Arc;

use serde::Serialize;

use crate::models::find_currency;
use crate::services::currency::{format_money, sanitize_amount, CurrencyStore};
use crate::services::rates::RateProvider;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceDisplay {
    pub primary: String,
    pub secondary: Option<String>,
}

/// Renders stored prices in the session's display currency.
pub struct PriceFormatter {
    store: Arc<CurrencyStore>,
    rates: Arc<dyn RateProvider>,
}

impl PriceFormatter {
    pub fn new(store: Arc<CurrencyStore>, rates: Arc<dyn RateProvider>) -> Self {
        Self { store, rates }
    }

    /// `amount` is in `original_code`. Unknown original codes are taken to be the
    /// current currency.
    pub fn display(&self, amount: f64, original_code: &str) -> PriceDisplay {
        let current = self.store.get_current();
        let original = find_currency(original_code).unwrap_or(current);
        let amount = sanitize_amount(amount);

        if amount == 0.0 {
            return PriceDisplay {
                primary: format_money(0.0, current),
                secondary: None,
            };
        }

        let converted = self.rates.convert(amount, original.code, current.code);
        let secondary = (original.code != current.code)
            .then(|| format!("originally {}", format_money(amount, original)));

        PriceDisplay {
            primary: format_money(converted, current),
            secondary,
        }
    }
}
