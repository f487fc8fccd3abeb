pub mod booking;
pub mod content;
pub mod currency;
pub mod service;
pub mod user;

pub use booking::{BookingRecord, BookingStatus, BookingUpdate};
pub use content::{
    AdminStats, AlertSeverity, Blog, BlogAuthor, ChartPoint, ContactMessage, EmergencyAlert,
    GalleryItem, NewBlog, NewEmergencyAlert, Subscription,
};
pub use currency::{default_currency, find_currency, list_currencies, Currency};
pub use service::{ServiceCategory, ServiceSummary};
pub use user::UserSummary;
