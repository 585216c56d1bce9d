use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, Product};

/// Raw listing query string, parsed into a [`ProductFilter`]
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact product name
    pub name: Option<String>,
    /// Category name, case-insensitive
    #[param(example = "CLOTHS")]
    pub category: Option<String>,
    /// One of true, t, 1, yes, false, f, 0, no
    #[param(example = "true")]
    pub available: Option<String>,
}

/// Conjunctive listing criteria; no criteria lists everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub available: Option<bool>,
}

impl TryFrom<ProductQuery> for ProductFilter {
    type Error = ProductError;

    fn try_from(query: ProductQuery) -> ProductResult<Self> {
        let category = non_empty(query.category)
            .map(|name| Category::parse(&name))
            .transpose()?;

        let available = non_empty(query.available)
            .map(|token| parse_availability(&token))
            .transpose()?;

        Ok(Self {
            name: non_empty(query.name),
            category,
            available,
        })
    }
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if &product.name != name {
                return false;
            }
        }
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(available) = self.available {
            if product.available != available {
                return false;
            }
        }
        true
    }

    /// Keep only the products matching every criterion, preserving order
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Parse an availability token, case-insensitively.
pub fn parse_availability(token: &str) -> ProductResult<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Ok(true),
        "false" | "f" | "0" | "no" => Ok(false),
        _ => Err(ProductError::Validation(format!(
            "Invalid availability: {}",
            token
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i32, name: &str, category: Category, available: bool) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price: Decimal::new(100, 2),
            available,
            category,
        }
    }

    fn query(name: Option<&str>, category: Option<&str>, available: Option<&str>) -> ProductQuery {
        ProductQuery {
            name: name.map(String::from),
            category: category.map(String::from),
            available: available.map(String::from),
        }
    }

    #[test]
    fn test_availability_tokens() {
        for token in ["true", "T", "1", "Yes"] {
            assert!(parse_availability(token).unwrap(), "{token}");
        }
        for token in ["false", "F", "0", "NO"] {
            assert!(!parse_availability(token).unwrap(), "{token}");
        }
        for token in ["maybe", "2", "y"] {
            assert!(matches!(
                parse_availability(token),
                Err(ProductError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_empty_values_are_absent() {
        let filter = ProductFilter::try_from(query(Some(""), Some(""), Some(""))).unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let filter = ProductFilter::try_from(query(None, Some("food"), None)).unwrap();
        assert_eq!(filter.category, Some(Category::Food));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = ProductFilter::try_from(query(None, Some("SHOES"), None)).unwrap_err();
        assert!(matches!(err, ProductError::Validation(ref m) if m.contains("SHOES")));
    }

    #[test]
    fn test_bad_availability_is_rejected() {
        let err = ProductFilter::try_from(query(None, None, Some("sometimes"))).unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let products = vec![
            product(1, "Fedora", Category::Cloths, true),
            product(2, "Fedora", Category::Tools, true),
            product(3, "Wrench", Category::Tools, false),
            product(4, "Fedora", Category::Cloths, false),
        ];

        let filter =
            ProductFilter::try_from(query(Some("Fedora"), Some("CLOTHS"), None)).unwrap();
        let ids: Vec<i32> = filter.apply(products.clone()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);

        let filter =
            ProductFilter::try_from(query(Some("Fedora"), Some("cloths"), Some("no"))).unwrap();
        let ids: Vec<i32> = filter.apply(products.clone()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4]);

        assert_eq!(ProductFilter::default().apply(products).len(), 4);
    }
}
