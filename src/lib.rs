// Library for tests to access modules

pub mod aggregate;
pub mod cli;
pub mod models;
pub mod prom_repo;
pub mod report;
pub mod resolve;
pub mod series;
pub mod stats;
pub mod version;
