//! IDE identity.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The IDE whose rules files are being managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ide {
    /// Visual Studio Code with GitHub Copilot
    #[default]
    VsCode,
    Cursor,
    Windsurf,
    Trae,
}

impl Ide {
    pub const ALL: [Ide; 4] = [Ide::VsCode, Ide::Cursor, Ide::Windsurf, Ide::Trae];

    /// Canonical lowercase identifier, accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Ide::VsCode => "vscode",
            Ide::Cursor => "cursor",
            Ide::Windsurf => "windsurf",
            Ide::Trae => "trae",
        }
    }

    /// Human readable product name.
    pub fn display_name(self) -> &'static str {
        match self {
            Ide::VsCode => "VS Code",
            Ide::Cursor => "Cursor",
            Ide::Windsurf => "Windsurf",
            Ide::Trae => "Trae",
        }
    }

    /// Identify the IDE from the host application's name.
    ///
    /// Forks of VS Code report their own product name; anything unrecognized
    /// is treated as VS Code.
    pub fn from_app_name(app_name: &str) -> Self {
        let name = app_name.to_lowercase();
        if name.contains("cursor") {
            Ide::Cursor
        } else if name.contains("windsurf") {
            Ide::Windsurf
        } else if name.contains("trae") {
            Ide::Trae
        } else {
            Ide::VsCode
        }
    }
}

impl fmt::Display for Ide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a string does not name a supported IDE.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown IDE '{0}' (expected one of: vscode, cursor, windsurf, trae)")]
pub struct ParseIdeError(pub String);

impl FromStr for Ide {
    type Err = ParseIdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vscode" | "code" => Ok(Ide::VsCode),
            "cursor" => Ok(Ide::Cursor),
            "windsurf" => Ok(Ide::Windsurf),
            "trae" => Ok(Ide::Trae),
            _ => Err(ParseIdeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_app_name() {
        assert_eq!(Ide::from_app_name("Cursor"), Ide::Cursor);
        assert_eq!(Ide::from_app_name("Windsurf - Next"), Ide::Windsurf);
        assert_eq!(Ide::from_app_name("Trae CN"), Ide::Trae);
        assert_eq!(Ide::from_app_name("Visual Studio Code"), Ide::VsCode);
        assert_eq!(Ide::from_app_name(""), Ide::VsCode);
    }

    #[test]
    fn test_from_str_accepts_canonical_names() {
        for ide in Ide::ALL {
            assert_eq!(ide.as_str().parse::<Ide>().unwrap(), ide);
        }
        assert_eq!("code".parse::<Ide>().unwrap(), Ide::VsCode);
        assert!("emacs".parse::<Ide>().is_err());
    }
}
