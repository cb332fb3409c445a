use std::fmt;

/// Categorical bucket reported by the scoring service.
///
/// Parsing never fails: any value outside the known three is kept verbatim as
/// `Unrecognized` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
    Unrecognized(String),
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "safe" => Self::Safe,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert_eq!(RiskLevel::parse("safe"), RiskLevel::Safe);
        assert_eq!(RiskLevel::parse("warning"), RiskLevel::Warning);
        assert_eq!(RiskLevel::parse("danger"), RiskLevel::Danger);
    }

    #[test]
    fn unknown_level_is_kept_verbatim() {
        let level = RiskLevel::parse("Critical ");
        assert_eq!(level, RiskLevel::Unrecognized("Critical ".to_string()));
        assert_eq!(level.to_string(), "Critical ");
    }

    #[test]
    fn matching_is_exact() {
        assert_eq!(
            RiskLevel::parse("DANGER"),
            RiskLevel::Unrecognized("DANGER".to_string())
        );
    }
}
