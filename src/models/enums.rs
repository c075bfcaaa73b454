use crate::error::EnumParseError;

/// Macro to generate a string-backed enum with `as_str`, `FromStr`, and
/// serde round-tripping through the wire string (the JSON contract uses
/// lowercase / parenthesized forms that derive renaming cannot express).
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(EnumParseError {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(Frequency {
    Constant => "constant",
    Intermittent => "intermittent",
    Once => "once",
});

str_enum!(DurationUnit {
    Hours => "hour(s)",
    Days => "day(s)",
    Weeks => "week(s)",
    Months => "month(s)",
    Years => "year(s)",
});

str_enum!(QuestionType {
    Text => "text",
    Select => "select",
    Multiselect => "multiselect",
    Scale => "scale",
    YesNo => "yesno",
});

str_enum!(RuleCategory {
    Urgent => "urgent",
    Diagnostic => "diagnostic",
    Demographic => "demographic",
    Lifestyle => "lifestyle",
});

str_enum!(RiskLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
    Urgent => "urgent",
});

str_enum!(SeverityCategory {
    Low => "low",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(PhqBand {
    Minimal => "minimal",
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(FatigueFrequency {
    Never => "never",
    Rarely => "rarely",
    Sometimes => "sometimes",
    Often => "often",
    Always => "always",
});

str_enum!(AppetiteChange {
    Increased => "increased",
    Decreased => "decreased",
    NoChange => "no_change",
});

str_enum!(BodySystem {
    Neurological => "neurological",
    Cardiovascular => "cardiovascular",
    Gastrointestinal => "gastrointestinal",
    Respiratory => "respiratory",
    Musculoskeletal => "musculoskeletal",
    Constitutional => "constitutional",
    Genitourinary => "genitourinary",
    Other => "other",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_str() {
        assert_eq!(
            "intermittent".parse::<Frequency>().unwrap(),
            Frequency::Intermittent
        );
        assert_eq!(Frequency::Intermittent.as_str(), "intermittent");
        assert_eq!("day(s)".parse::<DurationUnit>().unwrap(), DurationUnit::Days);
        assert_eq!("yesno".parse::<QuestionType>().unwrap(), QuestionType::YesNo);
    }

    #[test]
    fn unknown_value_rejected() {
        let err = "weekly".parse::<Frequency>().unwrap_err();
        assert_eq!(err.field, "Frequency");
        assert_eq!(err.value, "weekly");
    }

    #[test]
    fn serde_uses_wire_string() {
        let json = serde_json::to_string(&DurationUnit::Weeks).unwrap();
        assert_eq!(json, "\"week(s)\"");
        let back: DurationUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DurationUnit::Weeks);
    }

    #[test]
    fn serde_rejects_unknown() {
        assert!(serde_json::from_str::<RiskLevel>("\"critical\"").is_err());
    }
}
