//! Compiles and runs the generator's golden output against this crate.
//!
//! The included files are checked by the generator's own end-to-end tests,
//! so any drift between emitted paths and this crate's API breaks the build
//! here.

use sample_data::{Bytes, DateTime, Point, Rect, Size, Url, Uuid, Vector};
use std::collections::HashMap;

#[derive(Debug)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub tags: Vec<String>,
    pub released: sample_data::DateTime,
}

#[derive(Debug)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub avatar: Url,
    pub balance: f64,
    pub favorite: Product,
    pub notes: HashMap<String, String>,
}

#[derive(Debug, PartialEq)]
pub enum Status {
    Active,
    Suspended { reason: String },
}

#[derive(Debug, PartialEq)]
pub struct Bounds {
    frame: Rect,
}

impl Bounds {
    pub fn new(frame: Rect) -> Self {
        Self { frame }
    }

    pub fn with_origin(origin: Point, size: Size) -> Self {
        Self::new(Rect { origin, size })
    }

    pub fn area(&self) -> f64 {
        self.frame.size.width * self.frame.size.height
    }
}

include!("../../sample-generator/tests/fixtures/showcase.expected");

/// One field per scalar kind the generator knows.
#[derive(Debug)]
pub struct Everything {
    pub int: isize,
    pub int8: i8,
    pub int16: i16,
    pub int32: i32,
    pub int64: i64,
    pub uint: usize,
    pub uint8: u8,
    pub uint16: u16,
    pub uint32: u32,
    pub uint64: u64,
    pub float32: f32,
    pub float64: f64,
    pub string: String,
    pub flag: bool,
    pub bytes: Bytes,
    pub datetime: DateTime,
    pub uuid: Uuid,
    pub point: Point,
    pub rect: Rect,
    pub size: Size,
    pub vector: Vector,
    pub url: Url,
}

include!("../../sample-generator/tests/fixtures/all_kinds.expected");

#[test]
fn test_fixed_product_samples() {
    let products = Product::sample();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, Uuid::from_u128(0));
    assert_eq!(products[1].id, Uuid::from_u128(1));
    assert_eq!(products[0].title, "Hello World");
    assert_eq!(products[0].price, 0.0);
    assert_eq!(products[0].tags, vec!["Hello World".to_string()]);
    assert_eq!(products[0].released.timestamp(), 0);
}

#[test]
fn test_randomized_customer_samples() {
    let customers = Customer::sample();
    assert_eq!(customers.len(), 2);
    for customer in &customers {
        assert!(customer.name.split(' ').count() >= 2);
        assert!(customer.email.contains('@'));
        assert_eq!(customer.avatar.as_str(), "https://picsum.photos/64/64");
        assert!((0.99..=999.99).contains(&customer.balance));
        assert_eq!(customer.favorite.id, Uuid::from_u128(0));
        assert_eq!(customer.notes.len(), 1);
    }
}

#[test]
fn test_enum_and_constructor_samples() {
    assert_eq!(
        Status::sample(),
        vec![
            Status::Active,
            Status::Suspended {
                reason: "Hello World".to_string()
            },
            Status::Active,
        ]
    );

    let bounds = Bounds::sample();
    assert_eq!(bounds, vec![Bounds::new(Rect::default())]);
    assert_eq!(bounds[0].area(), 0.0);
}

#[test]
fn test_randomized_values_for_every_kind() {
    let samples = Everything::sample();
    assert_eq!(samples.len(), 2);
    for sample in &samples {
        assert!((0..=1000).contains(&sample.int));
        assert!((0..=i8::MAX).contains(&sample.int8));
        assert!((0..=1000).contains(&sample.int16));
        assert!((0..=1000).contains(&sample.int32));
        assert!((0..=1000).contains(&sample.int64));
        assert!(sample.uint <= 1000);
        assert!(sample.uint16 <= 1000);
        assert!(sample.uint32 <= 1000);
        assert!(sample.uint64 <= 1000);
        assert!((0.0..1000.0).contains(&sample.float32));
        assert!((0.0..1000.0).contains(&sample.float64));
        assert!(!sample.string.is_empty());
        assert!(sample.bytes.len() <= sample_data::generator::MAX_BYTES);
        assert!((2000..=2030).contains(&chrono::Datelike::year(&sample.datetime)));
        assert_eq!(sample.uuid.get_version_num(), 4);
        assert!(sample.point.x >= 0.0 && sample.size.height >= 0.0);
        assert!(sample.rect.max_x() < 2000.0);
        assert!(sample.vector.dx < 1000.0);
        assert_eq!(sample.url.scheme(), "https");
    }
}
