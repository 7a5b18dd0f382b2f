//! String-backed enumerations stored in `varchar` columns.
//!
//! The database keeps the lowercase wire names; these types are what request
//! validation parses into and what domain rules match on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a string is not one of an enumeration's wire names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Database / wire representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Account role. New identities start as `User`.
    Role("role") {
        User => "user",
        Admin => "admin",
    }
}

string_enum! {
    /// Physical condition of a listed phone.
    Condition("condition") {
        Excellent => "excellent",
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

string_enum! {
    /// Listing moderation lifecycle.
    MobileStatus("listing status") {
        /// Awaiting admin review
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Sold => "sold",
    }
}

impl MobileStatus {
    /// `pending -> approved | rejected`, `approved -> sold`. Rejected and sold are terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Sold)
        )
    }
}

string_enum! {
    /// Mobile network operator for recharges.
    Operator("operator") {
        Airtel => "airtel",
        Jio => "jio",
        Vi => "vi",
        Bsnl => "bsnl",
    }
}

impl Operator {
    /// Guess the operator from the first three digits of a ten-digit number.
    ///
    /// Unknown prefixes fall back to BSNL. Returns `None` when fewer than three
    /// digits are present.
    #[must_use]
    pub fn detect(mobile_number: &str) -> Option<Self> {
        let digits: String = mobile_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let national = digits
            .strip_prefix("91")
            .filter(|rest| rest.len() == 10)
            .unwrap_or(digits.as_str());
        let prefix = national.get(..3)?;

        let operator = match prefix {
            "701" | "702" | "703" | "704" | "705" | "706" | "707" | "708" | "709" => Self::Airtel,
            "891" | "892" | "893" | "894" | "895" | "896" | "897" | "898" | "899" => Self::Jio,
            "900" | "901" | "902" | "903" | "904" | "905" | "906" | "907" | "908" | "909" => {
                Self::Vi
            }
            _ => Self::Bsnl,
        };
        Some(operator)
    }
}

string_enum! {
    PlanType("plan type") {
        Prepaid => "prepaid",
        Postpaid => "postpaid",
        Dth => "dth",
    }
}

string_enum! {
    PaymentMethod("payment method") {
        Upi => "upi",
        Wallet => "wallet",
        Card => "card",
    }
}

string_enum! {
    /// Recharge settlement state. `Success` and `Failed` are terminal.
    RechargeStatus("recharge status") {
        Pending => "pending",
        Success => "success",
        Failed => "failed",
    }
}

string_enum! {
    /// Order fulfilment state.
    OrderStatus("order status") {
        Pending => "pending",
        Confirmed => "confirmed",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

string_enum! {
    /// Order payment state. Revenue counts `Completed` orders only; note that
    /// recharges use `success` for the equivalent outcome.
    PaymentStatus("payment status") {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}
