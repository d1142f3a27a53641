pub mod fetch_template;
pub mod tracking_status;

pub use fetch_template::FetchTemplate;
pub use tracking_status::TrackingStatus;
