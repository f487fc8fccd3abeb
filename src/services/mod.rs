pub mod admin_filter;
pub mod backend;
pub mod booking_edit;
pub mod currency;
pub mod preferences;
pub mod price_display;
pub mod rates;
pub mod time_slot;
