//! Permission decisions and the reasons behind them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::city::CityAttribute;

/// Outcome for one (distributor, city) pair.
///
/// Renders as `YES` / `NO` in text reports and serializes as
/// `GRANTED` / `DENIED`.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    #[strum(serialize = "YES")]
    Granted,
    #[strum(serialize = "NO")]
    Denied,
}

impl Decision {
    #[inline]
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }

    #[inline]
    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Denied)
    }
}

/// Why a [`Decision`] came out the way it did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    /// An exclude rule equals one of the city's attributes.
    Excluded {
        attribute: CityAttribute,
        token: String,
        rule: String,
    },
    /// An include rule contains one of the city's attributes.
    Included {
        attribute: CityAttribute,
        token: String,
        rule: String,
    },
    /// Nothing excluded the city, but nothing included it either.
    NoIncludeMatch,
    /// An ancestor denied the city; `cause` is that ancestor's own reason.
    AncestorDenied {
        ancestor: String,
        cause: Box<DecisionReason>,
    },
}

/// A decision together with its explanation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Evaluation {
    pub decision: Decision,
    pub reason: DecisionReason,
}

impl Evaluation {
    pub fn granted(reason: DecisionReason) -> Self {
        Evaluation {
            decision: Decision::Granted,
            reason,
        }
    }

    pub fn denied(reason: DecisionReason) -> Self {
        Evaluation {
            decision: Decision::Denied,
            reason,
        }
    }
}
