pub mod business;
pub mod data;
pub mod system;
