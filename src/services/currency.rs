use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{default_currency, find_currency, Currency};
use crate::services::preferences::PreferenceStore;

/// Preference key holding the selected currency code.
pub const CURRENCY_KEY: &str = "currency";

/// Session-wide selected display currency.
///
/// Shared behind an `Arc`; every read after `set_current` returns sees the new value.
/// Subscribers get a `watch` receiver that always holds the latest selection.
pub struct CurrencyStore {
    current: watch::Sender<&'static Currency>,
    prefs: Arc<dyn PreferenceStore>,
}

impl CurrencyStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        let (current, _) = watch::channel(default_currency());
        Self { current, prefs }
    }

    /// Restore the persisted choice. Missing or unknown codes keep the default.
    pub fn initialize(&self) {
        match self.prefs.get(CURRENCY_KEY) {
            Ok(Some(code)) => match find_currency(&code) {
                Some(currency) => {
                    self.current.send_replace(currency);
                    tracing::debug!(code = currency.code, "restored currency preference");
                }
                None => {
                    tracing::warn!(code = %code, "ignoring unknown persisted currency");
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read currency preference");
            }
        }
    }

    pub fn get_current(&self) -> &'static Currency {
        *self.current.borrow()
    }

    /// Select `code` as the display currency. Unknown codes are ignored and `false`
    /// is returned.
    pub fn set_current(&self, code: &str) -> bool {
        let Some(currency) = find_currency(code) else {
            tracing::debug!(code, "ignoring unknown currency code");
            return false;
        };

        self.current.send_replace(currency);

        if let Err(e) = self.prefs.set(CURRENCY_KEY, currency.code) {
            tracing::warn!(error = %e, code = currency.code, "failed to persist currency preference");
        }
        true
    }

    pub fn subscribe(&self) -> watch::Receiver<&'static Currency> {
        self.current.subscribe()
    }

    /// Format `amount` in `code`, or in the current currency when `code` is absent
    /// or not in the catalog.
    pub fn format_price(&self, amount: f64, code: Option<&str>) -> String {
        let currency = code
            .and_then(find_currency)
            .unwrap_or_else(|| self.get_current());
        format_money(amount, currency)
    }
}

/// Clamp negative, NaN and infinite amounts to zero.
pub fn sanitize_amount(amount: f64) -> f64 {
    if !amount.is_finite() || amount <= 0.0 {
        if amount != 0.0 {
            tracing::debug!(amount, "clamping invalid price to zero");
        }
        0.0
    } else {
        amount
    }
}

/// `₦1,500`, `$1,234.50`: symbol prefix, comma thousands, currency-specific decimals.
pub fn format_money(amount: f64, currency: &Currency) -> String {
    let amount = sanitize_amount(amount);
    let digits = currency.fraction_digits();
    let fixed = format!("{:.*}", digits, amount);

    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{grouped}.{f}", currency.symbol),
        None => format!("{}{grouped}", currency.symbol),
    }
}
