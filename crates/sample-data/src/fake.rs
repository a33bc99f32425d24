//! Realistic fake values for string, price and URL categories.
//!
//! Names, emails, usernames, companies and street parts come from the
//! `faker_rand` en_us generators. `faker_rand` samples through rand 0.8, so
//! each value is drawn from a rand 0.8 generator seeded by the caller's RNG.
//! A seeded [`DataGenerator`](crate::DataGenerator) stays deterministic.

use faker_rand::en_us::addresses::{CityName, StreetName};
use faker_rand::en_us::company::CompanyName;
use faker_rand::en_us::internet::{Email, Username};
use faker_rand::en_us::names::{FirstName, LastName};
use rand::seq::IndexedRandom;
use rand::Rng;
use rand08::distributions::{Distribution, Standard};
use sample_core::Category;
use std::fmt::Display;

const SITES: &[&str] = &[
    "https://www.example.com",
    "https://docs.example.org",
    "https://shop.example.net",
    "https://blog.example.com",
    "https://status.example.io",
];

/// Draw one `faker_rand` value and render it.
fn faker<T, R>(rng: &mut R) -> String
where
    T: Display,
    Standard: Distribution<T>,
    R: Rng,
{
    let mut faker_rng = <rand08::rngs::StdRng as rand08::SeedableRng>::seed_from_u64(rng.random());
    rand08::Rng::gen::<T>(&mut faker_rng).to_string()
}

pub fn first_name<R: Rng>(rng: &mut R) -> String {
    faker::<FirstName, _>(rng)
}

pub fn last_name<R: Rng>(rng: &mut R) -> String {
    faker::<LastName, _>(rng)
}

pub fn full_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", first_name(rng), last_name(rng))
}

pub fn username<R: Rng>(rng: &mut R) -> String {
    faker::<Username, _>(rng)
}

pub fn email<R: Rng>(rng: &mut R) -> String {
    faker::<Email, _>(rng)
}

pub fn address<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {}, {} {:05}",
        rng.random_range(1..2000),
        faker::<StreetName, _>(rng),
        faker::<CityName, _>(rng),
        rng.random_range(10000..100000)
    )
}

pub fn app_version<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}",
        rng.random_range(0..10),
        rng.random_range(0..20),
        rng.random_range(0..50)
    )
}

pub fn company_name<R: Rng>(rng: &mut R) -> String {
    faker::<CompanyName, _>(rng)
}

/// Sixteen-digit card number with a valid Luhn check digit.
pub fn credit_card_number<R: Rng>(rng: &mut R) -> String {
    let mut digits: Vec<u32> = Vec::with_capacity(16);
    // First digit should be 1-9 to avoid leading zeros
    digits.push(rng.random_range(1..10));
    for _ in 1..15 {
        digits.push(rng.random_range(0..10));
    }
    digits.push(luhn_check_digit(&digits));
    digits
        .into_iter()
        .filter_map(|digit| char::from_digit(digit, 10))
        .collect()
}

/// Check digit that makes `payload` followed by it pass the Luhn test.
fn luhn_check_digit(payload: &[u32]) -> u32 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, &digit)| {
            if idx % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    (10 - sum % 10) % 10
}

/// Whether a digit string passes the Luhn test.
pub fn luhn_valid(number: &str) -> bool {
    let Some(digits) = number
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    match digits.split_last() {
        Some((&check, payload)) if !payload.is_empty() => luhn_check_digit(payload) == check,
        _ => false,
    }
}

/// Price between 0.99 and 999.99, rounded to cents.
pub fn price<R: Rng>(rng: &mut R) -> f64 {
    let cents: u32 = rng.random_range(99..=99_999);
    f64::from(cents) / 100.0
}

pub fn website_url<R: Rng>(rng: &mut R) -> String {
    let site = SITES.choose(rng).copied().unwrap_or("https://www.example.com");
    format!("{site}/{}", rng.random_range(1..1000))
}

pub fn image_url(width: u32, height: u32) -> String {
    format!("https://picsum.photos/{width}/{height}")
}

/// Realistic string for a string-domain category.
///
/// Categories of other domains fall back to a full name.
pub fn string_for<R: Rng>(category: Category, rng: &mut R) -> String {
    match category {
        Category::FirstName => first_name(rng),
        Category::LastName => last_name(rng),
        Category::Email => email(rng),
        Category::Address => address(rng),
        Category::AppVersion => app_version(rng),
        Category::CreditCardNumber => credit_card_number(rng),
        Category::CompanyName => company_name(rng),
        Category::Username => username(rng),
        Category::FullName | Category::Price | Category::Url | Category::Image { .. } => {
            full_name(rng)
        }
    }
}
