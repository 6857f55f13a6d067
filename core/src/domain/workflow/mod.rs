pub mod entities;
pub mod script;
pub mod services;

pub use entities::*;
pub use services::*;
