pub mod currency;
pub mod health;
pub mod proxy;
