//! Error types for the quantity algebra and measurement-system construction
//!
//! Every variant is a contract violation raised at the point where it is detected:
//! either a configuration bug (bad defining units, duplicated names) or a usage bug
//! (combining quantities that cannot be combined). None of them are transient, so
//! callers propagate them with `?` and surface them at their own boundary.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = UnitsError> = std::result::Result<T, E>;

/// Errors raised by [`crate::Dimension`], quantities and systems.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitsError {
    /// A dimension vector's length disagrees with the system's base-quantity count.
    #[error("system '{system}' has {expected} base quantities but got {actual} exponents")]
    DimensionArityMismatch {
        /// Name of the system the vector was checked against
        system: String,
        /// Base-quantity count of the system
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Two quantities reference different system instances.
    #[error("cannot combine a quantity of system '{left}' with one of system '{right}'")]
    SystemMismatch {
        /// System of the left operand
        left: String,
        /// System of the right operand
        right: String,
    },

    /// Addition or subtraction between quantities of unequal dimension.
    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Exponents of the left operand
        left: Vec<f64>,
        /// Exponents of the right operand
        right: Vec<f64>,
    },

    /// A magnitude is NaN or infinite.
    #[error("{context}: {value} is not a finite real value")]
    InvalidValue {
        /// Operation that produced or received the value
        context: &'static str,
        /// The offending value
        value: f64,
    },

    /// A defining unit has value exactly zero, so its logarithm is undefined.
    #[error("defining unit '{symbol}' has value zero")]
    ZeroValuedUnit {
        /// Symbol of the defining unit
        symbol: String,
    },

    /// A defining unit has a negative value, so its logarithm is undefined.
    #[error("defining unit '{symbol}' has negative value {value}")]
    NegativeValuedUnit {
        /// Symbol of the defining unit
        symbol: String,
        /// The offending value
        value: f64,
    },

    /// The defining quantities are dimensionally dependent.
    #[error("defining units of '{system}' are not independent (determinant {determinant:e})")]
    SingularBasis {
        /// Name of the measurement system being built
        system: String,
        /// Determinant of the transfer matrix
        determinant: f64,
    },

    /// A base quantity or defining unit was declared without a name or symbol.
    #[error("base quantity #{index} of '{system}' is missing a name or unit symbol")]
    MissingUnitName {
        /// Name of the system being built
        system: String,
        /// Position of the unnamed entry
        index: usize,
    },

    /// A quantity name or unit symbol appears twice in one system.
    #[error("'{name}' is declared more than once in '{system}'")]
    DuplicateName {
        /// Name of the system being built
        system: String,
        /// The repeated name
        name: String,
    },

    /// A physical system was declared with no base quantities.
    #[error("system '{system}' declares no base quantities")]
    EmptySystem {
        /// Name of the system being built
        system: String,
    },

    /// Conversion between measurement systems over different underlying systems.
    #[error("'{from}' and '{to}' are not built over the same physical system")]
    IncompatibleUnderlyingSystem {
        /// Source system
        from: String,
        /// Target system
        to: String,
    },

    /// Lookup of a unit symbol that the system does not define.
    #[error("system '{system}' has no unit '{symbol}'")]
    UnknownUnit {
        /// Name of the system searched
        system: String,
        /// Symbol that was requested
        symbol: String,
    },

    /// A metric prefix name that is not recognised.
    #[error("unknown metric prefix '{name}'")]
    UnknownPrefix {
        /// Name that was requested
        name: String,
    },
}

impl UnitsError {
    /// Check a magnitude and wrap it in [`UnitsError::InvalidValue`] if it is not finite.
    ///
    /// # Arguments
    /// * `value` - Magnitude to validate
    /// * `context` - Operation name reported in the error
    #[inline]
    pub(crate) fn check_finite(value: f64, context: &'static str) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(UnitsError::InvalidValue { context, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert_eq!(UnitsError::check_finite(2.5, "test"), Ok(2.5));
        assert!(matches!(
            UnitsError::check_finite(f64::NAN, "test"),
            Err(UnitsError::InvalidValue { context: "test", .. })
        ));
        assert!(UnitsError::check_finite(f64::INFINITY, "test").is_err());
    }

    #[test]
    fn test_messages_name_the_system() {
        let err = UnitsError::SingularBasis {
            system: "Broken".to_string(),
            determinant: 0.0,
        };
        assert!(err.to_string().contains("Broken"));

        let err = UnitsError::IncompatibleUnderlyingSystem {
            from: "SI".to_string(),
            to: "Other".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'SI' and 'Other' are not built over the same physical system"
        );
    }
}
