mod dashboard;
mod health;
mod upload;

pub use dashboard::dashboard_handler;
pub use health::health_handler;
pub use upload::upload_handler;
