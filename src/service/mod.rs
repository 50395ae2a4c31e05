pub mod access_sync;
pub mod employee;
