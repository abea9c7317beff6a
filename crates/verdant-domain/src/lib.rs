//! Verdant Domain Layer
//!
//! Core types shared by every other Verdant crate: the product records that
//! the assistant extracts from model output, the user preferences that seed a
//! recommendation, and the trait boundary to the text-generation service.
//!
//! ## Key Concepts
//!
//! - **ProductRecord**: one recommended product, every field optional
//! - **RecommendationList**: records in the order the model produced them
//! - **UserPreferences**: free-form JSON object supplied by the shopper
//! - **TextGenerator**: prompt in, completion out; implemented in `verdant-llm`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod preferences;
pub mod product;
pub mod traits;

// Re-exports for convenience
pub use preferences::UserPreferences;
pub use product::{ProductField, ProductRecord, RecommendationList};
pub use traits::TextGenerator;
