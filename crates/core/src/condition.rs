//! Condition records held in the catalog.
//!
//! A [`Condition`] is created once when the catalog is loaded and is read-only afterwards.
//! Its name is validated at construction so that every condition the matcher ranks has
//! something to display.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating a [`ConditionName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionNameError {
    /// The name was empty or contained only whitespace
    #[error("condition name cannot be empty")]
    Empty,
}

/// Display name of a condition, guaranteed to contain at least one non-whitespace character.
///
/// Leading and trailing whitespace is trimmed on construction. Names are compared
/// ordinally (byte-wise), which is the order the matcher uses for tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionName(String);

impl ConditionName {
    /// Creates a new `ConditionName`, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionNameError::Empty`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ConditionNameError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConditionNameError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Names of the built-in catalog are known to be valid.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConditionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConditionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ConditionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ConditionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ConditionName::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A named medical condition with its ordered symptom list and advice text.
///
/// The symptom list is kept exactly as supplied: order is preserved and duplicate entries
/// are not removed. A condition with no symptoms is valid but never produces a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    name: ConditionName,
    symptoms: Vec<String>,
    #[serde(default)]
    advice: String,
}

impl Condition {
    /// Creates a condition from already validated parts.
    pub fn new(name: ConditionName, symptoms: Vec<String>, advice: impl Into<String>) -> Self {
        Self {
            name,
            symptoms,
            advice: advice.into(),
        }
    }

    /// Creates a condition from a raw name, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionNameError::Empty`] if `name` is blank.
    pub fn try_new(
        name: impl AsRef<str>,
        symptoms: Vec<String>,
        advice: impl Into<String>,
    ) -> Result<Self, ConditionNameError> {
        Ok(Self::new(ConditionName::new(name)?, symptoms, advice))
    }

    pub fn name(&self) -> &ConditionName {
        &self.name
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn advice(&self) -> &str {
        &self.advice
    }

    /// Whether `symptom` appears anywhere in this condition's list (exact, case-sensitive).
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }
}
