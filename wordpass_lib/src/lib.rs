pub mod config;
pub mod corpus;
pub mod generator;
pub mod random;
pub mod token;
pub mod transform;

pub use config::Config;
pub use corpus::WordCorpus;
pub use generator::{Error, Generator};
