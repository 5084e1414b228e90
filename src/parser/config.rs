use serde::{Deserialize, Serialize};

/// Default maximum list nesting
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for [`crate::parser::SExprParser`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Deepest list nesting kept in the tree; a list opened past it is
    /// replaced by a single `Error` atom
    pub max_depth: usize,
    /// Put `Error` atoms where input ends inside a string or list
    /// instead of silently returning what was read
    pub report_unterminated: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            report_unterminated: false,
        }
    }
}

impl ParserConfig {
    /// Sets the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Turns error atoms for unterminated input on or off
    pub fn with_report_unterminated(mut self, report: bool) -> Self {
        self.report_unterminated = report;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.report_unterminated);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config, ParserConfig::default().with_max_depth(8));
    }
}
