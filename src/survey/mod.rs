pub mod builder;
pub mod respond;
pub mod stats;
pub mod types;
