use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::currency::CurrencyStore;
use crate::services::price_display::PriceFormatter;

pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
    pub currency: Arc<CurrencyStore>,
    pub prices: PriceFormatter,
}
