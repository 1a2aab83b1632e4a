//! Typed domain model for the resource-tracking dashboard.
//!
//! # Responsibility
//! - Define the eight entity shapes consumed by lookup, metrics and views.
//! - Keep label enums tolerant of unknown values so a foreign dataset never
//!   fails to render.
//!
//! # Invariants
//! - Entities are identified by opaque, non-empty string ids.
//! - Relationships are foreign-key ids only; there are no embedded graphs.
//! - Entities are immutable once loaded into a store.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

/// Declares a label enum with a closed set of wire labels plus an
/// `Unrecognized` fallback that keeps the label it was decoded from.
///
/// Deserialization never fails on an unknown label; it yields `Unrecognized`
/// and emits a `warn` event so the dataset issue stays visible in logs.
/// Serializing an `Unrecognized` value writes the original label back.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Label outside the known set, kept verbatim.
            Unrecognized(Box<str>),
        }

        impl $name {
            /// Wire labels of the known variants, in declaration order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Returns the wire label, or the raw text of an unknown label.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Unrecognized(raw) => &**raw,
                }
            }

            /// Parses an exact wire label.
            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $( $label => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Parses a wire label, keeping unknown input as `Unrecognized`.
            pub fn from_label(raw: &str) -> Self {
                Self::parse(raw).unwrap_or_else(|| Self::Unrecognized(raw.into()))
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                if let Some(value) = Self::parse(&raw) {
                    return Ok(value);
                }
                log::warn!(
                    "event=label_fallback module=model status=degraded kind={} label={} expected={}",
                    stringify!($name),
                    raw,
                    Self::LABELS.join("|")
                );
                Ok(Self::Unrecognized(raw.into_boxed_str()))
            }
        }
    };
}

pub mod budget;
pub mod member;
pub mod project;
pub mod report;
pub mod risk;

/// Validation failures for loaded entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    EmptyId {
        entity: &'static str,
    },
    InvalidDateWindow {
        entity: &'static str,
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    PercentOutOfRange {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },
    InvalidAmount {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { entity } => write!(f, "{entity} id cannot be empty"),
            Self::InvalidDateWindow {
                entity,
                id,
                start,
                end,
            } => write!(
                f,
                "{entity} `{id}`: end date ({end}) must be >= start date ({start})"
            ),
            Self::PercentOutOfRange {
                entity,
                id,
                field,
                value,
            } => write!(f, "{entity} `{id}`: {field} ({value}) must be within 0..=100"),
            Self::InvalidAmount {
                entity,
                id,
                field,
                value,
            } => write!(
                f,
                "{entity} `{id}`: {field} ({value}) must be a finite, non-negative amount"
            ),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn check_id(entity: &'static str, id: &str) -> Result<(), ModelValidationError> {
    if id.trim().is_empty() {
        return Err(ModelValidationError::EmptyId { entity });
    }
    Ok(())
}

pub(crate) fn check_window(
    entity: &'static str,
    id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), ModelValidationError> {
    if end < start {
        return Err(ModelValidationError::InvalidDateWindow {
            entity,
            id: id.to_string(),
            start,
            end,
        });
    }
    Ok(())
}

pub(crate) fn check_percent(
    entity: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), ModelValidationError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ModelValidationError::PercentOutOfRange {
            entity,
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

pub(crate) fn check_amount(
    entity: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), ModelValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelValidationError::InvalidAmount {
            entity,
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(())
}
