//! Macro for implementing Display and FromStr for label enums
//!
//! Generates both traits from one variant-to-label table, so the string form
//! used in logs and the form accepted from configuration cannot drift.
//!
//! # Example
//!
//! ```rust
//! use statesync_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Outcome {
//!     Deleted,
//!     AlreadyAbsent,
//! }
//!
//! impl_domain_status_conversions!(Outcome {
//!     Deleted => "deleted",
//!     AlreadyAbsent => "already_absent",
//! });
//!
//! assert_eq!(Outcome::Deleted.to_string(), "deleted");
//! assert_eq!("ALREADY_ABSENT".parse::<Outcome>(), Ok(Outcome::AlreadyAbsent));
//! ```

/// Implements Display and FromStr traits for label enums
///
/// - Display writes the label exactly as given
/// - FromStr accepts the label case-insensitively
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
