pub mod analysis;
pub mod capture;
pub mod common;
pub mod inventory;
pub mod workflow;
