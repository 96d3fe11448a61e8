pub mod auth;
pub mod availability;
pub mod schedule;
pub mod settings;
pub mod shifts;
pub mod time_off;
pub mod tips;
