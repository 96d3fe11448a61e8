pub mod availability_repo;
pub use availability_repo::AvailabilityRepository;
pub mod schedule_repo;
pub use schedule_repo::ScheduleRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod time_off_repo;
pub use time_off_repo::TimeOffRepository;
pub mod tips_repo;
pub use tips_repo::TipsRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
