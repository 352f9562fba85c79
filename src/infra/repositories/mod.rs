pub mod postgres_appointment_repo;
pub mod postgres_settings_repo;
pub mod postgres_technician_repo;
pub mod postgres_time_block_repo;
pub mod sqlite_appointment_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_technician_repo;
pub mod sqlite_time_block_repo;
