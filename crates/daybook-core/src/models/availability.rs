// ABOUTME: Typed outcome of best-effort remote lookups
// ABOUTME: Either the looked-up value or an inspectable reason it is unavailable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a lookup produced no data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The service API key is not configured
    MissingApiKey,
    /// The upstream search returned no results
    NoMatch,
    /// The best result did not resemble the query closely enough
    LowSimilarity {
        /// Description returned by the upstream
        description: String,
        /// Normalized similarity score in `[0, 1]`
        score: f64,
    },
    /// The result carried none of the requested nutrients
    MissingNutrients,
    /// A place could not be geocoded
    PlaceNotFound {
        /// Name of the place that yielded no coordinates
        place: String,
    },
    /// The routing response carried no route segment
    NoRoute,
    /// The request never produced a response (connect failure, timeout)
    Transport {
        /// Transport error description
        message: String,
    },
    /// The upstream answered with a non-success status
    Status {
        /// HTTP status code
        code: u16,
    },
    /// The upstream payload could not be decoded
    Malformed {
        /// Decode error description
        message: String,
    },
}

impl UnavailableReason {
    /// True when the reason is a fault (transport, status, payload) rather than a
    /// legitimate "no data" answer
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Malformed { .. }
        )
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key not configured"),
            Self::NoMatch => write!(f, "no matching result"),
            Self::LowSimilarity { description, score } => {
                write!(f, "best result '{description}' too dissimilar ({score:.2})")
            }
            Self::MissingNutrients => write!(f, "result has no energy or protein values"),
            Self::PlaceNotFound { place } => write!(f, "no coordinates for '{place}'"),
            Self::NoRoute => write!(f, "no route segment in directions response"),
            Self::Transport { message } => write!(f, "transport failure: {message}"),
            Self::Status { code } => write!(f, "upstream returned HTTP {code}"),
            Self::Malformed { message } => write!(f, "malformed response: {message}"),
        }
    }
}

/// Result of a lookup that never fails past its boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    /// The lookup produced data
    Available(T),
    /// The lookup produced nothing, with the reason
    Unavailable(UnavailableReason),
}

impl<T> Availability<T> {
    /// True when data is present
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Convert into an `Option`, dropping the reason
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    /// The reason data is missing, if it is
    #[must_use]
    pub const fn reason(&self) -> Option<&UnavailableReason> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

impl<T> From<UnavailableReason> for Availability<T> {
    fn from(reason: UnavailableReason) -> Self {
        Self::Unavailable(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_classification() {
        assert!(UnavailableReason::Status { code: 500 }.is_fault());
        assert!(UnavailableReason::Malformed {
            message: "eof".into()
        }
        .is_fault());
        assert!(!UnavailableReason::NoMatch.is_fault());
        assert!(!UnavailableReason::MissingApiKey.is_fault());
    }

    #[test]
    fn test_availability_accessors() {
        let found: Availability<u8> = Availability::Available(3);
        assert!(found.is_available());
        assert!(found.reason().is_none());
        assert_eq!(found.into_option(), Some(3));

        let missing: Availability<u8> = UnavailableReason::NoRoute.into();
        assert!(!missing.is_available());
        assert_eq!(missing.reason(), Some(&UnavailableReason::NoRoute));
        assert_eq!(missing.into_option(), None);
    }

    #[test]
    fn test_reason_display() {
        let reason = UnavailableReason::PlaceNotFound {
            place: "atlantis".into(),
        };
        assert_eq!(reason.to_string(), "no coordinates for 'atlantis'");
    }
}
