//! Random value generator called by generated sample code.

use crate::fake;
use crate::geometry::{Point, Rect, Size, Vector};
use crate::url::Url;
use crate::{Bytes, DateTime};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sample_core::{Category, SupportedDomain};
use uuid::Uuid;

/// Upper bound for random integers (clamped to each type's maximum).
pub const MAX_INTEGER: i64 = 1000;

/// Upper bound (exclusive) for random floats and coordinates.
pub const MAX_FLOAT: f64 = 1000.0;

/// Longest random byte buffer.
pub const MAX_BYTES: usize = 16;

/// 2000-01-01T00:00:00Z
const DATETIME_START: i64 = 946_684_800;

/// 2030-12-31T23:59:59Z
const DATETIME_END: i64 = 1_924_991_999;

/// String categories picked from when no category is given.
const STRING_CATEGORIES: &[Category] = &[
    Category::FirstName,
    Category::LastName,
    Category::FullName,
    Category::Email,
    Category::Address,
    Category::AppVersion,
    Category::CreditCardNumber,
    Category::CompanyName,
    Category::Username,
];

/// Source of random sample values, optionally steered by a category.
///
/// Generated code creates one per value:
/// `DataGenerator::random(Some(Category::Email)).string()`.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
    category: Option<Category>,
}

macro_rules! integer_methods {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Random `", stringify!($ty), "` in `0..=min(", stringify!($ty), "::MAX, 1000)`.")]
            pub fn $name(&mut self) -> $ty {
                let max = <$ty>::try_from(MAX_INTEGER).unwrap_or(<$ty>::MAX);
                self.rng.random_range(0..=max)
            }
        )*
    };
}

impl DataGenerator {
    /// Generator seeded from the thread-local RNG.
    pub fn random(category: Option<Category>) -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
            category,
        }
    }

    /// Deterministic generator for a given seed.
    pub fn seeded(seed: u64, category: Option<Category>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            category,
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Random `isize` in `0..=1000`.
    pub fn isize(&mut self) -> isize {
        let value = self.rng.random_range(0..=MAX_INTEGER);
        isize::try_from(value).unwrap_or(isize::MAX)
    }

    integer_methods! {
        i8 => i8,
        i16 => i16,
        i32 => i32,
        i64 => i64,
        usize => usize,
        u8 => u8,
        u16 => u16,
        u32 => u32,
        u64 => u64,
    }

    pub fn f32(&mut self) -> f32 {
        self.rng.random_range(0.0..MAX_FLOAT as f32)
    }

    /// Random `f64`; a two-decimal price for the `price` category.
    pub fn f64(&mut self) -> f64 {
        match self.category {
            Some(Category::Price) => fake::price(&mut self.rng),
            _ => self.rng.random_range(0.0..MAX_FLOAT),
        }
    }

    /// Realistic string for the category, or for a random string category.
    pub fn string(&mut self) -> String {
        let category = match self.category {
            Some(category) if category.domain() == SupportedDomain::String => category,
            _ => STRING_CATEGORIES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Category::FullName),
        };
        fake::string_for(category, &mut self.rng)
    }

    pub fn bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn bytes(&mut self) -> Bytes {
        let len = self.rng.random_range(0..=MAX_BYTES);
        let mut bytes = vec![0u8; len];
        self.rng.fill(bytes.as_mut_slice());
        bytes
    }

    /// Random timestamp between 2000-01-01 and 2030-12-31, whole seconds.
    pub fn datetime(&mut self) -> DateTime {
        let secs = self.rng.random_range(DATETIME_START..=DATETIME_END);
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    /// Version 4 UUID drawn from this generator's RNG.
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn coordinate(&mut self) -> f64 {
        self.rng.random_range(0.0..MAX_FLOAT)
    }

    pub fn point(&mut self) -> Point {
        Point::new(self.coordinate(), self.coordinate())
    }

    pub fn size(&mut self) -> Size {
        Size::new(self.coordinate(), self.coordinate())
    }

    pub fn rect(&mut self) -> Rect {
        Rect {
            origin: self.point(),
            size: self.size(),
        }
    }

    pub fn vector(&mut self) -> Vector {
        Vector::new(self.coordinate(), self.coordinate())
    }

    /// Placeholder image URL for `image(width, height)`, otherwise a site URL.
    pub fn url(&mut self) -> Url {
        match self.category {
            Some(Category::Image { width, height }) => Url::from_parts(fake::image_url(width, height)),
            _ => Url::from_parts(fake::website_url(&mut self.rng)),
        }
    }
}
