use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown colour map `{0}`, expected one of: hsb, fire")]
pub struct ColourMapKindParseError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MandelbrotColourMapKinds {
    #[default]
    HsbGradient,
    FireGradient,
}

impl MandelbrotColourMapKinds {
    pub const ALL: &'static [Self] = &[Self::HsbGradient, Self::FireGradient];

    /// Name accepted on the command line.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::HsbGradient => "hsb",
            Self::FireGradient => "fire",
        }
    }
}

impl fmt::Display for MandelbrotColourMapKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for MandelbrotColourMapKinds {
    type Err = ColourMapKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.cli_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColourMapKindParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_default_first() {
        assert_eq!(
            MandelbrotColourMapKinds::ALL.first(),
            Some(&MandelbrotColourMapKinds::default())
        );
    }

    #[test]
    fn test_every_kind_parses_from_its_display_name() {
        for &kind in MandelbrotColourMapKinds::ALL {
            assert_eq!(kind.to_string().parse::<MandelbrotColourMapKinds>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(
            "rainbow".parse::<MandelbrotColourMapKinds>(),
            Err(ColourMapKindParseError("rainbow".to_string()))
        );
    }
}
