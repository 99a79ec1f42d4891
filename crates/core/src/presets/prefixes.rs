//! Metric prefixes
//!
//! Plain multiplicative scalars; applying a prefix scales a quantity's value and
//! leaves its dimension alone.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core_types::{DimensionalSystem, Quantity};
use crate::error::{Result, UnitsError};

/// SI metric prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prefix {
    /// 10⁻³⁰
    Quecto,
    /// 10⁻²⁷
    Ronto,
    /// 10⁻²⁴
    Yocto,
    /// 10⁻²¹
    Zepto,
    /// 10⁻¹⁸
    Atto,
    /// 10⁻¹⁵
    Femto,
    /// 10⁻¹²
    Pico,
    /// 10⁻⁹
    Nano,
    /// 10⁻⁶
    Micro,
    /// 10⁻³
    Milli,
    /// 10⁻²
    Centi,
    /// 10⁻¹
    Deci,
    /// 10¹
    Deca,
    /// 10²
    Hecto,
    /// 10³
    Kilo,
    /// 10⁶
    Mega,
    /// 10⁹
    Giga,
    /// 10¹²
    Tera,
    /// 10¹⁵
    Peta,
    /// 10¹⁸
    Exa,
    /// 10²¹
    Zetta,
    /// 10²⁴
    Yotta,
    /// 10²⁷
    Ronna,
    /// 10³⁰
    Quetta,
}

impl Prefix {
    /// Every prefix, smallest first
    pub const ALL: [Prefix; 24] = [
        Prefix::Quecto,
        Prefix::Ronto,
        Prefix::Yocto,
        Prefix::Zepto,
        Prefix::Atto,
        Prefix::Femto,
        Prefix::Pico,
        Prefix::Nano,
        Prefix::Micro,
        Prefix::Milli,
        Prefix::Centi,
        Prefix::Deci,
        Prefix::Deca,
        Prefix::Hecto,
        Prefix::Kilo,
        Prefix::Mega,
        Prefix::Giga,
        Prefix::Tera,
        Prefix::Peta,
        Prefix::Exa,
        Prefix::Zetta,
        Prefix::Yotta,
        Prefix::Ronna,
        Prefix::Quetta,
    ];

    /// Multiplicative factor
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Quecto => 1e-30,
            Self::Ronto => 1e-27,
            Self::Yocto => 1e-24,
            Self::Zepto => 1e-21,
            Self::Atto => 1e-18,
            Self::Femto => 1e-15,
            Self::Pico => 1e-12,
            Self::Nano => 1e-9,
            Self::Micro => 1e-6,
            Self::Milli => 1e-3,
            Self::Centi => 1e-2,
            Self::Deci => 1e-1,
            Self::Deca => 1e1,
            Self::Hecto => 1e2,
            Self::Kilo => 1e3,
            Self::Mega => 1e6,
            Self::Giga => 1e9,
            Self::Tera => 1e12,
            Self::Peta => 1e15,
            Self::Exa => 1e18,
            Self::Zetta => 1e21,
            Self::Yotta => 1e24,
            Self::Ronna => 1e27,
            Self::Quetta => 1e30,
        }
    }

    /// Lowercase name (e.g. `"giga"`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quecto => "quecto",
            Self::Ronto => "ronto",
            Self::Yocto => "yocto",
            Self::Zepto => "zepto",
            Self::Atto => "atto",
            Self::Femto => "femto",
            Self::Pico => "pico",
            Self::Nano => "nano",
            Self::Micro => "micro",
            Self::Milli => "milli",
            Self::Centi => "centi",
            Self::Deci => "deci",
            Self::Deca => "deca",
            Self::Hecto => "hecto",
            Self::Kilo => "kilo",
            Self::Mega => "mega",
            Self::Giga => "giga",
            Self::Tera => "tera",
            Self::Peta => "peta",
            Self::Exa => "exa",
            Self::Zetta => "zetta",
            Self::Yotta => "yotta",
            Self::Ronna => "ronna",
            Self::Quetta => "quetta",
        }
    }

    /// Symbol (e.g. `"G"`); case sensitive, `"m"` is milli and `"M"` is mega
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Quecto => "q",
            Self::Ronto => "r",
            Self::Yocto => "y",
            Self::Zepto => "z",
            Self::Atto => "a",
            Self::Femto => "f",
            Self::Pico => "p",
            Self::Nano => "n",
            Self::Micro => "μ",
            Self::Milli => "m",
            Self::Centi => "c",
            Self::Deci => "d",
            Self::Deca => "da",
            Self::Hecto => "h",
            Self::Kilo => "k",
            Self::Mega => "M",
            Self::Giga => "G",
            Self::Tera => "T",
            Self::Peta => "P",
            Self::Exa => "E",
            Self::Zetta => "Z",
            Self::Yotta => "Y",
            Self::Ronna => "R",
            Self::Quetta => "Q",
        }
    }

    /// Scale a quantity by this prefix.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if the scaled value overflows.
    pub fn apply<S: DimensionalSystem>(self, quantity: &Quantity<S>) -> Result<Quantity<S>> {
        quantity.scale(self.factor())
    }
}

/// Micro sign (U+00B5), accepted alongside the Greek mu of [`Prefix::symbol`]
const MICRO_SIGN: &str = "\u{b5}";

impl FromStr for Prefix {
    type Err = UnitsError;

    /// Accepts a name in any case (`"Giga"`) or an exact symbol (`"G"`).
    fn from_str(s: &str) -> Result<Self> {
        Prefix::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .or_else(|| Prefix::ALL.iter().copied().find(|p| p.symbol() == s))
            .or_else(|| (s == MICRO_SIGN).then_some(Prefix::Micro))
            .ok_or_else(|| UnitsError::UnknownPrefix {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_are_ordered() {
        for pair in Prefix::ALL.windows(2) {
            assert!(pair[0].factor() < pair[1].factor());
        }
        assert_eq!(Prefix::Giga.factor(), 1e9);
        assert_eq!(Prefix::Milli.factor(), 1e-3);
    }

    #[test]
    fn test_parse_names_and_symbols() {
        assert_eq!("giga".parse::<Prefix>().unwrap(), Prefix::Giga);
        assert_eq!("Kilo".parse::<Prefix>().unwrap(), Prefix::Kilo);
        assert_eq!("m".parse::<Prefix>().unwrap(), Prefix::Milli);
        assert_eq!("M".parse::<Prefix>().unwrap(), Prefix::Mega);
        assert_eq!("da".parse::<Prefix>().unwrap(), Prefix::Deca);
        assert!(matches!(
            "kibi".parse::<Prefix>(),
            Err(UnitsError::UnknownPrefix { .. })
        ));
    }

    #[test]
    fn test_micro_accepts_both_code_points() {
        assert_eq!("\u{3bc}".parse::<Prefix>().unwrap(), Prefix::Micro);
        assert_eq!("\u{b5}".parse::<Prefix>().unwrap(), Prefix::Micro);
        assert_eq!(Prefix::Micro.symbol(), "\u{3bc}");
    }

    #[test]
    fn test_every_name_round_trips() {
        for prefix in Prefix::ALL {
            assert_eq!(prefix.name().parse::<Prefix>().unwrap(), prefix);
            assert_eq!(prefix.symbol().parse::<Prefix>().unwrap(), prefix);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Prefix::Giga).unwrap();
        assert_eq!(json, "\"giga\"");
        let back: Prefix = serde_json::from_str("\"nano\"").unwrap();
        assert_eq!(back, Prefix::Nano);
    }
}
