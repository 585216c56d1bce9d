//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data derived from a test name
//! - `assertions`: small assertion helpers
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let name = builder.name("product", "main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same seed always yields the same values, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Unique, readable name such as `test-product-12345-main`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Deterministic number below `bound`, varied by `salt`
    pub fn number(&self, salt: u64, bound: u64) -> u64 {
        // splitmix64 finalizer
        let mut z = self.seed.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)) % bound.max(1)
    }

    /// Deterministic element of `items`, varied by `salt`
    pub fn pick<'a, T>(&self, salt: u64, items: &'a [T]) -> &'a T {
        &items[self.number(salt, items.len() as u64) as usize]
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap an `Option`, naming `context` on failure
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `items` is sorted by `key`
    pub fn assert_sorted_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K, context: &str) {
        assert!(
            items.windows(2).all(|w| key(&w[0]) <= key(&w[1])),
            "{}: items are not sorted",
            context
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.name("product", "test"), b.name("product", "test"));
        assert_eq!(a.number(3, 1000), b.number(3, 1000));
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.seed(), b.seed());
        assert_ne!(a.name("product", "x"), b.name("product", "x"));
    }

    #[test]
    fn test_number_respects_bound() {
        let builder = TestDataBuilder::from_test_name("bounds");
        for salt in 0..100 {
            assert!(builder.number(salt, 7) < 7);
        }
        assert_eq!(builder.number(1, 0), 0);
    }

    #[test]
    fn test_pick_returns_member() {
        let builder = TestDataBuilder::new(9);
        let items = ["a", "b", "c"];
        assert!(items.contains(builder.pick(1, &items)));
    }

    #[test]
    fn test_assertions() {
        assert_eq!(assertions::assert_some(Some(3), "value"), 3);
        assertions::assert_sorted_by_key(&[1, 2, 2, 5], |v| *v, "ids");
    }

    #[test]
    #[should_panic(expected = "not sorted")]
    fn test_assert_sorted_by_key_panics() {
        assertions::assert_sorted_by_key(&[3, 1], |v| *v, "ids");
    }
}
