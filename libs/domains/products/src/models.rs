use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use strum::Display;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

/// Exclusive upper bound for prices, `NUMERIC(10, 2)` leaves 8 integer digits
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Product category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

/// A category name that is not a member of [`Category`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Result<Self, UnknownCategory> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory(name.to_string()))
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Category::parse(&name).map_err(serde::de::Error::custom)
    }
}

/// A persisted product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Fedora")]
    pub name: String,
    #[schema(example = "A red hat")]
    pub description: String,
    /// Decimal string with at most two fractional digits
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    pub fn from_parts(id: i32, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: two_places(payload.price),
            available: payload.available,
            category: payload.category,
        }
    }

    /// Replace every field except `id`
    pub fn apply(&mut self, payload: ProductPayload) {
        let id = self.id;
        *self = Self::from_parts(id, payload);
    }
}

/// Body of create and full-replace requests.
///
/// An `id` key in the body is ignored; ids are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    #[schema(example = "Fedora", min_length = 1, max_length = 100)]
    pub name: String,
    #[validate(length(max = 250, message = "description must be at most 250 characters"))]
    #[schema(example = "A red hat", max_length = 250)]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl ProductPayload {
    /// Parse and validate a request body.
    ///
    /// Every failure (malformed JSON, missing key, wrong type, unknown
    /// category, field rule) becomes [`ProductError::Validation`].
    pub fn from_json(body: &[u8]) -> ProductResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ProductError::Validation(format!("Invalid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(ProductError::Validation(
                "Invalid product: body must be a JSON object".to_string(),
            ));
        }

        let mut payload: Self = serde_json::from_value(value)
            .map_err(|e| ProductError::Validation(format!("Invalid product: {}", e)))?;

        payload
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        payload.price = two_places(payload.price);
        Ok(payload)
    }
}

impl From<Product> for ProductPayload {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            description: product.description,
            price: product.price,
            available: product.available,
            category: product.category,
        }
    }
}

/// Store form of a price: exactly two fractional digits, zero unsigned
fn two_places(price: Decimal) -> Decimal {
    let mut price = if price.is_zero() {
        Decimal::ZERO
    } else {
        price.round_dp(2)
    };
    price.rescale(2);
    price
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let fail = |code: &'static str, message: &'static str| {
        Err(ValidationError::new(code).with_message(Cow::Borrowed(message)))
    };

    if price.is_sign_negative() && !price.is_zero() {
        return fail("price_negative", "price must not be negative");
    }
    if price.normalize().scale() > 2 {
        return fail("price_scale", "price must have at most two decimal places");
    }
    if *price >= PRICE_LIMIT {
        return fail("price_range", "price must be less than 100000000");
    }
    Ok(())
}
