pub mod address_update;
pub mod import;
