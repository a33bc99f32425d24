//! Runtime data provider for generated sample code.
//!
//! Code emitted by sample-builder refers to this crate for two things:
//!
//! - **Value types** the generator knows about: [`Uuid`], [`DateTime`],
//!   [`Url`], [`Bytes`] and the geometry types [`Point`], [`Rect`], [`Size`]
//!   and [`Vector`].
//! - **Randomized values** through [`DataGenerator`]:
//!
//! ```
//! use sample_data::{Category, DataGenerator};
//!
//! let email = DataGenerator::random(Some(Category::Email)).string();
//! assert!(email.contains('@'));
//!
//! let quantity = DataGenerator::seeded(7, None).u16();
//! assert!(quantity <= 1000);
//! ```
//!
//! ## Generators
//!
//! - **Integers** - uniform in `0..=min(MAX, 1000)`
//! - **Floats** - uniform in `0..1000`, or a two-decimal price for `price`
//! - **Strings** - realistic names, emails, addresses... chosen by category
//! - **Timestamps** - between 2000-01-01 and 2030-12-31
//! - **UUIDs** - v4, drawn from the generator's own RNG
//! - **URLs** - site URLs, or placeholder image URLs for `image(width, height)`

pub mod fake;
pub mod generator;
pub mod geometry;
pub mod url;

pub use generator::DataGenerator;
pub use geometry::{Point, Rect, Size, Vector};
pub use sample_core::Category;
pub use url::{Url, UrlError};
pub use uuid::Uuid;

/// UTC timestamp.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Byte buffer.
pub type Bytes = Vec<u8>;
