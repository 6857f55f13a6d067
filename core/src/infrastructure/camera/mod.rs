pub mod directory;
pub mod scripted;
