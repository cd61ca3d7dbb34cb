//! Newtype IDs for type-safe row references.
//!
//! The dvdrental schema keys every table with an integer column. Wrapping
//! those keys keeps a `CityId` from being passed where a `CountryId` is
//! expected.

/// Macro to define a type-safe ID wrapper around `i32`.
///
/// Generated types are `Copy`, serialize transparently as a bare integer, and
/// (with the `postgres` feature) encode/decode as `INT4`.
///
/// # Example
///
/// ```rust
/// # use dvdrental_core::define_id;
/// define_id!(RentalId);
///
/// let id = RentalId::new(7);
/// assert_eq!(id.as_i32(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(CustomerId);
define_id!(StoreId);
define_id!(AddressId);
define_id!(CityId);
define_id!(CountryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&CustomerId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_id_from_str_trims_whitespace() {
        let id: CustomerId = " 15 ".parse().unwrap();
        assert_eq!(id, CustomerId::new(15));
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert!("abc".parse::<CityId>().is_err());
        assert!("".parse::<CityId>().is_err());
    }
}
