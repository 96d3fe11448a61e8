pub mod auth;
pub mod availability_service;
pub mod generator;
pub mod schedule_service;
pub mod settings_service;
pub mod time_off_service;
pub mod tips_service;

pub use auth::AuthService;
pub use availability_service::AvailabilityService;
pub use schedule_service::ScheduleService;
pub use settings_service::SettingsService;
pub use time_off_service::TimeOffService;
pub use tips_service::TipsService;
