//! Macros to reduce boilerplate in the codebase

/// Macro to generate Display and FromStr implementations for enums
///
/// Parsing is case-insensitive; unknown strings are passed to the given
/// error constructor.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::error::AutoclassError;
///
/// enum_display_fromstr!(
///     MyEnum,
///     AutoclassError::invalid_sort_key,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant-2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::AutoclassError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_variant(s.to_string())),
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use crate::error::AutoclassError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestEnum {
        Alpha,
        BetaGamma,
    }

    enum_display_fromstr!(TestEnum, AutoclassError::invalid_engine, {
        Alpha => "alpha",
        BetaGamma => "beta-gamma",
    });

    #[test]
    fn test_display() {
        assert_eq!(TestEnum::Alpha.to_string(), "alpha");
        assert_eq!(TestEnum::BetaGamma.to_string(), "beta-gamma");
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("ALPHA".parse::<TestEnum>().unwrap(), TestEnum::Alpha);
        assert_eq!(" beta-gamma ".parse::<TestEnum>().unwrap(), TestEnum::BetaGamma);
        assert!(matches!(
            "delta".parse::<TestEnum>(),
            Err(AutoclassError::InvalidEngine(s)) if s == "delta"
        ));
    }
}
