//! Placeholder substitution engine
//!
//! Template text marks a field with its name wrapped in double braces:
//! `{{ExperimentName}}`. Substitution walks every text run and replaces
//! each whole-token occurrence with the bound display value. A token split
//! across adjacent runs is not matched; well-formed templates keep each
//! placeholder inside a single run. The pass is idempotent as long as no
//! bound value is itself a placeholder token.

use labreport_data::ExperimentMetadata;
use labreport_ooxml::{rewrite_runs, RunDirective};

use crate::error::Result;

/// Opening half of the placeholder marker pair
pub const TOKEN_OPEN: &str = "{{";
/// Closing half of the placeholder marker pair
pub const TOKEN_CLOSE: &str = "}}";

/// Durations of zero render as this character instead of "0"
pub const ELIDED_VALUE: &str = "/";

/// Fields whose zero value is elided at display time
const ZERO_ELIDED_FIELDS: &[&str] = &["ExcitationTime", "IntervalTime"];

/// Placeholder tokens bound to their display values
///
/// Materialized from [`ExperimentMetadata`] per run; display rules live
/// here, never in the parsed metadata.
#[derive(Debug, Clone)]
pub struct PlaceholderBinding {
    entries: Vec<(String, String)>,
}

impl PlaceholderBinding {
    /// Build the binding from parsed metadata, applying display rules
    pub fn from_metadata(meta: &ExperimentMetadata) -> Self {
        let entries = meta
            .iter()
            .map(|(name, value)| {
                let display = if ZERO_ELIDED_FIELDS.contains(&name) && value == "0" {
                    ELIDED_VALUE.to_string()
                } else {
                    value.to_string()
                };
                (format!("{TOKEN_OPEN}{name}{TOKEN_CLOSE}"), display)
            })
            .collect();
        Self { entries }
    }

    /// Replace every bound token in `text`; None when nothing matched
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut out = text.to_string();
        let mut changed = false;
        for (token, value) in &self.entries {
            if out.contains(token.as_str()) {
                out = out.replace(token.as_str(), value);
                changed = true;
            }
        }
        changed.then_some(out)
    }

    /// Number of bound tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the binding is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replace placeholder tokens in every text run of the body.
///
/// Runs without a matching token round-trip untouched; no block is
/// reordered or removed.
pub fn substitute_placeholders(xml: &[u8], binding: &PlaceholderBinding) -> Result<Vec<u8>> {
    let mut replaced = 0usize;
    let out = rewrite_runs(xml, |text| match binding.apply(text) {
        Some(new_text) => {
            replaced += 1;
            RunDirective::replace(new_text)
        }
        None => RunDirective::keep(),
    })?;
    log::debug!("Substituted placeholders in {replaced} runs");
    Ok(out)
}
