pub mod camera;
pub mod llm;
pub mod persistence;
