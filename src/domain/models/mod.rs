pub mod appointment;
pub mod reservation;
pub mod settings;
pub mod technician;
pub mod time;
pub mod time_block;
