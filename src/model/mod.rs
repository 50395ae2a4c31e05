pub mod account;
pub mod employee;
pub mod group;
pub mod job_title;
pub mod team;
