use thiserror::Error;

/// Raised when a stored tag does not match any enum variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} tag: {value}")]
pub struct EnumParseError {
    pub field: String,
    pub value: String,
}

/// Macro to generate an enum with stable snake_case tags, `as_str` and
/// `std::str::FromStr`. Tags are the wire/audit representation; serde
/// follows them via `rename_all`.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enums::EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err($crate::enums::EnumParseError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use str_enum;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    str_enum!(Sample {
        FirstThing => "first_thing",
        Second => "second",
    });

    #[test]
    fn as_str_round_trips() {
        assert_eq!(Sample::FirstThing.as_str(), "first_thing");
        assert_eq!(Sample::from_str("first_thing").unwrap(), Sample::FirstThing);
        assert_eq!(Sample::from_str("second").unwrap(), Sample::Second);
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = Sample::from_str("third").unwrap_err();
        assert_eq!(err.value, "third");
        assert_eq!(err.field, "Sample");
    }

    #[test]
    fn serde_uses_snake_tags() {
        let json = serde_json::to_string(&Sample::FirstThing).unwrap();
        assert_eq!(json, "\"first_thing\"");
    }
}
