pub mod calendar_settings;
pub mod persistence;

pub use calendar_settings::CalendarSettings;
pub use persistence::Persistable;
