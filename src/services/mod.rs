pub mod classification;
pub mod persistence;

pub use classification::ClassificationLog;
