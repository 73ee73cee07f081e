use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// A text transformation the service knows how to request from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Summarize,
    Rewrite,
    Correct,
    Expand,
    Paraphrase,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Summarize,
        Mode::Rewrite,
        Mode::Correct,
        Mode::Expand,
        Mode::Paraphrase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Summarize => "summarize",
            Mode::Rewrite => "rewrite",
            Mode::Correct => "correct",
            Mode::Expand => "expand",
            Mode::Paraphrase => "paraphrase",
        }
    }

    /// Field name used by the per-mode endpoints, e.g. `{"summary": ...}`.
    pub fn response_field(&self) -> &'static str {
        match self {
            Mode::Summarize => "summary",
            Mode::Rewrite => "rewritten",
            Mode::Correct => "corrected",
            Mode::Expand => "expanded",
            Mode::Paraphrase => "paraphrased",
        }
    }

    /// Suffix of the `MODEL_<MODE>` override variable.
    pub fn env_suffix(&self) -> &'static str {
        match self {
            Mode::Summarize => "SUMMARIZE",
            Mode::Rewrite => "REWRITE",
            Mode::Correct => "CORRECT",
            Mode::Expand => "EXPAND",
            Mode::Paraphrase => "PARAPHRASE",
        }
    }

    /// Resolve the `mode` of a request body; anything other than a known
    /// string is a client error.
    pub fn from_request_value(value: Option<&Value>) -> Result<Self, AppError> {
        match value {
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(Mode::invalid(&other.to_string())),
            None => Err(Mode::invalid("")),
        }
    }

    fn invalid(given: &str) -> AppError {
        AppError::BadRequest(format!(
            "Invalid mode '{}'. Valid modes: {}",
            given,
            Mode::valid_modes()
        ))
    }

    pub fn valid_modes() -> String {
        Mode::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| Mode::invalid(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(" Summarize ".parse::<Mode>().unwrap(), Mode::Summarize);
    }

    #[test]
    fn test_unknown_mode_lists_valid_modes() {
        let err = "translate".parse::<Mode>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("translate"));
        for mode in Mode::ALL {
            assert!(message.contains(mode.as_str()), "missing {} in {}", mode, message);
        }
    }

    #[test]
    fn test_request_value_must_be_known_string() {
        assert_eq!(
            Mode::from_request_value(Some(&Value::from("expand"))).unwrap(),
            Mode::Expand
        );
        for value in [None, Some(Value::Null), Some(Value::from(3)), Some(Value::from(true))] {
            let err = Mode::from_request_value(value.as_ref()).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
            assert!(err.to_string().contains(&Mode::valid_modes()), "{}", err);
        }
    }

    #[test]
    fn test_response_fields() {
        let fields: Vec<_> = Mode::ALL.iter().map(|m| m.response_field()).collect();
        assert_eq!(fields, ["summary", "rewritten", "corrected", "expanded", "paraphrased"]);
    }

    #[test]
    fn test_response_fields_are_distinct() {
        let mut fields: Vec<_> = Mode::ALL.iter().map(|m| m.response_field()).collect();
        fields.sort();
        fields.dedup();
        assert_eq!(fields.len(), Mode::ALL.len());
    }
}
