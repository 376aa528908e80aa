use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

/// Currency code of a group.
///
/// A group keeps all its amounts in a single currency and nothing is ever
/// converted. The currency is only used to render amounts.
///
/// Both supported currencies use 2 minor units, so `10.50` ⇄ `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Eur => "€",
        }
    }

    /// Renders an amount with the currency symbol, e.g. `₹30.00`.
    ///
    /// ```rust
    /// use engine::{Currency, MoneyCents};
    ///
    /// assert_eq!(Currency::Inr.format(MoneyCents::new(3000)), "₹30.00");
    /// assert_eq!(Currency::Eur.format(MoneyCents::new(-5)), "-€0.05");
    /// ```
    #[must_use]
    pub fn format(self, amount: MoneyCents) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{sign}{}{}", self.symbol(), amount.abs())
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::InvalidAmount(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("inr").unwrap(), Currency::Inr);
        assert_eq!(Currency::try_from(" Eur ").unwrap(), Currency::Eur);
        assert!(Currency::try_from("USD").is_err());
    }
}
