/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts in the minor currency unit (e.g. cents).
pub type Amount = i64;

/// Defines a closed enum persisted as TEXT and serialized verbatim.
///
/// Each variant carries its wire/database spelling. The generated type gets
/// `as_str`, `ALL`, `Display`, `FromStr` and `TryFrom<String>` (the latter is
/// what `#[sqlx(try_from = "String")]` uses when decoding rows).
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The persisted / serialized spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::CoreError;

    define_text_enum! {
        Shade {
            Light = "light",
            Dark = "Dark",
        }
    }

    #[test]
    fn text_spelling_round_trips_through_parse_and_serde() {
        assert_eq!("light".parse::<Shade>().unwrap(), Shade::Light);
        assert_eq!(Shade::Dark.to_string(), "Dark");
        assert_eq!(serde_json::to_string(&Shade::Light).unwrap(), "\"light\"");
        assert_eq!(Shade::ALL, &[Shade::Light, Shade::Dark]);
    }

    #[test]
    fn unknown_text_is_a_validation_error() {
        let err = Shade::try_from("dark".to_string()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("light, Dark"));
    }
}
