use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Boolean switch with explicit enable/disable semantics.
///
/// Parses the loose spellings found in environment files
/// (`true`/`false`, `yes`/`no`, `1`/`0`, `on`/`off`, `enabled`/`disabled`)
/// and renders as the `ENABLED`/`DISABLED` constants AWS expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(bool);

impl Flag {
    pub const fn enabled() -> Self {
        Self(true)
    }

    pub const fn disabled() -> Self {
        Self(false)
    }

    pub const fn is_enabled(&self) -> bool {
        self.0
    }

    pub const fn is_disabled(&self) -> bool {
        !self.0
    }

    /// `"ENABLED"` or `"DISABLED"`.
    pub const fn as_switch(&self) -> &'static str {
        if self.0 { "ENABLED" } else { "DISABLED" }
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::enabled()
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}

impl FromStr for Flag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" | "on" | "enabled" => Ok(Self::enabled()),
            "false" | "no" | "0" | "off" | "disabled" => Ok(Self::disabled()),
            _ => Err(ModelError::Invalid(format!("not a boolean flag: '{s}'"))),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_switch())
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;

    #[test]
    fn default_is_enabled() {
        assert!(Flag::default().is_enabled());
    }

    #[test]
    fn parses_loose_spellings() {
        for s in ["true", "YES", "1", "on", "Enabled", " true "] {
            assert!(s.parse::<Flag>().unwrap().is_enabled(), "{s:?}");
        }
        for s in ["false", "no", "0", "OFF", "disabled"] {
            assert!(s.parse::<Flag>().unwrap().is_disabled(), "{s:?}");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Flag>().is_err());
        assert!("maybe".parse::<Flag>().is_err());
    }

    #[test]
    fn renders_aws_switch() {
        assert_eq!(Flag::enabled().as_switch(), "ENABLED");
        assert_eq!(Flag::disabled().to_string(), "DISABLED");
    }

    #[test]
    fn serde_is_plain_bool() {
        assert_eq!(serde_json::to_string(&Flag::disabled()).unwrap(), "false");
        let back: Flag = serde_json::from_str("true").unwrap();
        assert!(back.is_enabled());
    }
}
