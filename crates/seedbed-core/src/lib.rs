pub mod client;
pub mod config;
pub mod ddl;
pub mod engine;
pub mod errors;
pub mod model;
pub mod probe;
pub mod provision;
pub mod report;
pub mod seed;
