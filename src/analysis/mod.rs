pub mod error_classifier;

pub use error_classifier::{ClassifiedError, ErrorClassifier, ErrorOrigin};
