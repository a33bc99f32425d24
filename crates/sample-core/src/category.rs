//! Category registry.
//!
//! A category is a semantic hint attached to a member ("this `String` is an
//! email address") that steers randomized generation toward realistic values.
//! Every category belongs to exactly one [`SupportedDomain`], and a category
//! may only be applied to a member whose scalar kind lives in that domain.
//!
//! Categories round-trip through a textual token:
//!
//! | Token | Domain |
//! |-------|--------|
//! | `firstName`, `lastName`, `fullName`, `email`, `address`, `appVersion`, `creditCardNumber`, `companyName`, `username` | string |
//! | `price` | double |
//! | `url`, `image(width:W,height:H)` | url |

use crate::types::ScalarKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a category token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryParseError {
    /// The token does not name any known category
    #[error("unknown category '{0}'")]
    Unknown(String),

    /// The token names `image` but its dimensions are missing or malformed
    #[error("invalid image category '{token}': {reason}")]
    InvalidImage { token: String, reason: String },
}

/// Value domain a category produces values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedDomain {
    /// Text values (`String`)
    String,
    /// Floating point values (`f64`)
    Double,
    /// URL values (`Url`)
    UrlLike,
}

impl SupportedDomain {
    /// The scalar kind a member must have to accept categories of this domain.
    pub fn expected_kind(&self) -> ScalarKind {
        match self {
            SupportedDomain::String => ScalarKind::String,
            SupportedDomain::Double => ScalarKind::Float64,
            SupportedDomain::UrlLike => ScalarKind::Url,
        }
    }

    /// Rust type name a member must have to accept categories of this domain.
    pub fn expected_type(&self) -> &'static str {
        self.expected_kind().type_name()
    }
}

impl fmt::Display for SupportedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportedDomain::String => write!(f, "string"),
            SupportedDomain::Double => write!(f, "double"),
            SupportedDomain::UrlLike => write!(f, "url"),
        }
    }
}

/// Semantic category of a sample value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FirstName,
    LastName,
    FullName,
    Email,
    Address,
    AppVersion,
    CreditCardNumber,
    CompanyName,
    Username,
    Price,
    Url,
    /// Placeholder image URL with the given pixel dimensions
    Image { width: u32, height: u32 },
}

impl Category {
    /// Every category except the parameterized `image`.
    pub const SIMPLE: [Category; 11] = [
        Category::FirstName,
        Category::LastName,
        Category::FullName,
        Category::Email,
        Category::Address,
        Category::AppVersion,
        Category::CreditCardNumber,
        Category::CompanyName,
        Category::Username,
        Category::Price,
        Category::Url,
    ];

    /// Create an image category.
    pub fn image(width: u32, height: u32) -> Self {
        Category::Image { width, height }
    }

    /// The value domain this category produces values in.
    pub fn domain(&self) -> SupportedDomain {
        match self {
            Category::FirstName
            | Category::LastName
            | Category::FullName
            | Category::Email
            | Category::Address
            | Category::AppVersion
            | Category::CreditCardNumber
            | Category::CompanyName
            | Category::Username => SupportedDomain::String,
            Category::Price => SupportedDomain::Double,
            Category::Url | Category::Image { .. } => SupportedDomain::UrlLike,
        }
    }

    /// Whether this category may be applied to a member of the given kind.
    pub fn is_compatible(&self, kind: ScalarKind) -> bool {
        kind.domain() == Some(self.domain())
    }

    /// Variant name as written in Rust source (`Email`, `Image`).
    pub fn variant_name(&self) -> &'static str {
        match self {
            Category::FirstName => "FirstName",
            Category::LastName => "LastName",
            Category::FullName => "FullName",
            Category::Email => "Email",
            Category::Address => "Address",
            Category::AppVersion => "AppVersion",
            Category::CreditCardNumber => "CreditCardNumber",
            Category::CompanyName => "CompanyName",
            Category::Username => "Username",
            Category::Price => "Price",
            Category::Url => "Url",
            Category::Image { .. } => "Image",
        }
    }

    fn from_simple_token(token: &str) -> Option<Self> {
        let category = match token {
            "firstName" | "first_name" => Category::FirstName,
            "lastName" | "last_name" => Category::LastName,
            "fullName" | "full_name" => Category::FullName,
            "email" => Category::Email,
            "address" => Category::Address,
            "appVersion" | "app_version" => Category::AppVersion,
            "creditCardNumber" | "credit_card_number" => Category::CreditCardNumber,
            "companyName" | "company_name" => Category::CompanyName,
            "username" | "user_name" => Category::Username,
            "price" => Category::Price,
            "url" => Category::Url,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Category::FirstName => "firstName",
            Category::LastName => "lastName",
            Category::FullName => "fullName",
            Category::Email => "email",
            Category::Address => "address",
            Category::AppVersion => "appVersion",
            Category::CreditCardNumber => "creditCardNumber",
            Category::CompanyName => "companyName",
            Category::Username => "username",
            Category::Price => "price",
            Category::Url => "url",
            Category::Image { width, height } => {
                return write!(f, "image(width:{width},height:{height})");
            }
        };
        f.write_str(token)
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Some(category) = Category::from_simple_token(token) {
            return Ok(category);
        }
        match token.strip_prefix("image") {
            Some(rest) => parse_image_arguments(token, rest),
            None => Err(CategoryParseError::Unknown(token.to_string())),
        }
    }
}

/// Parse `(width:W,height:H)`, tolerating whitespace around every element.
fn parse_image_arguments(token: &str, rest: &str) -> Result<Category, CategoryParseError> {
    let invalid = |reason: &str| CategoryParseError::InvalidImage {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let inner = rest
        .trim()
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| invalid("expected '(width:W,height:H)'"))?;

    let mut parts = inner.split(',');
    let width = parse_dimension(parts.next(), "width").map_err(|reason| invalid(&reason))?;
    let height = parse_dimension(parts.next(), "height").map_err(|reason| invalid(&reason))?;
    if parts.next().is_some() {
        return Err(invalid("unexpected extra argument"));
    }

    Ok(Category::Image { width, height })
}

fn parse_dimension(part: Option<&str>, label: &str) -> Result<u32, String> {
    let part = part.ok_or_else(|| format!("missing '{label}'"))?;
    let (name, value) = part
        .split_once(':')
        .ok_or_else(|| format!("expected '{label}:<pixels>'"))?;
    if name.trim() != label {
        return Err(format!("expected '{label}', found '{}'", name.trim()));
    }
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("'{}' is not a valid {label}", value.trim()))
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
