//! Dialect selection and per-file source tweaks

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::gecko;
use super::registry::ProductionRegistry;

static GECKO: LazyLock<ProductionRegistry> = LazyLock::new(gecko::registry);
static SERVO: LazyLock<ProductionRegistry> = LazyLock::new(ProductionRegistry::new);

/// Gecko's `Window.webidl` declares a member the baseline grammar rejects
const GECKO_TWEAKS: &[SourceTweak] = &[SourceTweak {
    file_name: "Window.webidl",
    find: "SharedArrayBuffer",
    replace: "// SharedArrayBuffer",
}];

/// Engine flavour of WebIDL being parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Gecko,
    Servo,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Gecko => "gecko",
            Dialect::Servo => "servo",
        }
    }

    /// Productions used to parse this dialect
    pub fn registry(&self) -> &'static ProductionRegistry {
        match self {
            Dialect::Gecko => &GECKO,
            Dialect::Servo => &SERVO,
        }
    }

    /// Tweaks applying to `source_name`, matched on its file name
    pub fn tweaks_for(&self, source_name: &str) -> Vec<SourceTweak> {
        let tweaks: &[SourceTweak] = match self {
            Dialect::Gecko => GECKO_TWEAKS,
            Dialect::Servo => &[],
        };
        let file_name = Path::new(source_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(source_name);
        tweaks
            .iter()
            .filter(|tweak| tweak.file_name == file_name)
            .copied()
            .collect()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gecko" => Ok(Dialect::Gecko),
            "servo" => Ok(Dialect::Servo),
            other => Err(format!("Unknown dialect '{other}', expected gecko or servo")),
        }
    }
}

/// A textual substitution made before tokenising and undone after writing
///
/// Only the first occurrence is replaced in either direction. Since `replace`
/// contains `find`, undoing restores the input exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTweak {
    pub file_name: &'static str,
    pub find: &'static str,
    pub replace: &'static str,
}

impl SourceTweak {
    pub fn apply(&self, text: &str) -> String {
        text.replacen(self.find, self.replace, 1)
    }

    pub fn reverse(&self, text: &str) -> String {
        text.replacen(self.replace, self.find, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        assert_eq!("Servo".parse::<Dialect>().unwrap(), Dialect::Servo);
        assert_eq!(Dialect::default(), Dialect::Gecko);
        assert_eq!(Dialect::Gecko.to_string(), "gecko");
        assert!("blink".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_tweaks_match_file_name_only() {
        assert_eq!(Dialect::Gecko.tweaks_for("dom/webidl/Window.webidl").len(), 1);
        assert_eq!(Dialect::Gecko.tweaks_for("Window.webidl").len(), 1);
        assert!(Dialect::Gecko.tweaks_for("MyWindow.webidl").is_empty());
        assert!(Dialect::Servo.tweaks_for("Window.webidl").is_empty());
    }

    #[test]
    fn test_tweak_reverses_exactly() {
        let tweak = GECKO_TWEAKS[0];
        for text in [
            "a SharedArrayBuffer b SharedArrayBuffer",
            "// SharedArrayBuffer then SharedArrayBuffer",
            "nothing here",
        ] {
            assert_eq!(tweak.reverse(&tweak.apply(text)), text);
        }
        assert_eq!(tweak.apply("x SharedArrayBuffer y"), "x // SharedArrayBuffer y");
    }
}
