pub mod core;
pub mod duplicate;
pub mod temporal;
