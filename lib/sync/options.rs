use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

#[cfg(test)]
use proptest::prelude::*;

/// Configuration for the [`Replica`][`crate::sync::Replica`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(deny_unknown_fields, rename = "options", default)]
pub struct Options {
    /// How long to wait for further commits before pushing the latest state.
    #[serde(with = "humantime_serde")]
    #[cfg_attr(test, strategy((0u64..60_000).prop_map(Duration::from_millis)))]
    pub debounce: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(30),
        }
    }
}

/// The reason why parsing [`Options`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse synchronization options")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for Options {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn options_deserializes_missing_fields_to_default() {
        assert_eq!("options()".parse(), Ok(Options::default()));
    }

    #[test]
    fn debounce_is_written_in_human_units() {
        assert_eq!(
            "options(debounce: \"250ms\")".parse(),
            Ok(Options {
                debounce: Duration::from_millis(250)
            })
        );
    }

    #[proptest]
    fn parsing_printed_options_is_an_identity(o: Options) {
        assert_eq!(o.to_string().parse(), Ok(o));
    }
}
