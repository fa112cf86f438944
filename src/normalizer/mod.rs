mod config;
mod errors;
mod normalizer;
mod types;

pub use config::{FallbackRegion, NormalizerConfig};
pub use errors::InvalidReason;
pub use normalizer::PhoneNormalizer;
pub use types::{ParsedNumber, Validation};
