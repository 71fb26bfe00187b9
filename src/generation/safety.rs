//! Content-safety policy sent with every generation call.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PreconditionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_DANGEROUS")]
    Dangerous,
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 5] = [
        HarmCategory::Dangerous,
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            HarmCategory::Dangerous => "HARM_CATEGORY_DANGEROUS",
            HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
        }
    }
}

impl fmt::Display for HarmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmThreshold {
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmThreshold,
}

/// Ordered category-to-threshold settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyPolicy {
    settings: Vec<SafetySetting>,
}

impl SafetyPolicy {
    /// The policy both workflows use: every category, nothing blocked.
    pub fn permissive() -> Self {
        Self {
            settings: HarmCategory::ALL
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: HarmThreshold::BlockNone,
                })
                .collect(),
        }
    }

    /// Builds a policy from arbitrary settings. Completeness is checked at call time.
    pub fn from_settings(settings: Vec<SafetySetting>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &[SafetySetting] {
        &self.settings
    }

    /// A policy must list each of the five categories exactly once.
    pub fn ensure_complete(&self) -> Result<(), PreconditionError> {
        for (i, setting) in self.settings.iter().enumerate() {
            if self.settings[..i]
                .iter()
                .any(|earlier| earlier.category == setting.category)
            {
                return Err(PreconditionError::DuplicateCategory(setting.category));
            }
        }
        match HarmCategory::ALL
            .iter()
            .find(|category| !self.settings.iter().any(|s| s.category == **category))
        {
            Some(missing) => Err(PreconditionError::IncompletePolicy(*missing)),
            None => Ok(()),
        }
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_policy_is_complete_and_ordered() {
        let policy = SafetyPolicy::permissive();
        assert!(policy.ensure_complete().is_ok());
        let categories: Vec<HarmCategory> = policy.settings().iter().map(|s| s.category).collect();
        assert_eq!(categories, HarmCategory::ALL.to_vec());
        assert!(
            policy
                .settings()
                .iter()
                .all(|s| s.threshold == HarmThreshold::BlockNone)
        );
    }

    #[test]
    fn partial_policy_names_missing_category() {
        let mut settings = SafetyPolicy::permissive().settings().to_vec();
        settings.retain(|s| s.category != HarmCategory::HateSpeech);
        let policy = SafetyPolicy::from_settings(settings);
        assert_eq!(
            policy.ensure_complete(),
            Err(PreconditionError::IncompletePolicy(HarmCategory::HateSpeech))
        );
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let mut settings = SafetyPolicy::permissive().settings().to_vec();
        settings.push(settings[0]);
        let policy = SafetyPolicy::from_settings(settings);
        assert_eq!(
            policy.ensure_complete(),
            Err(PreconditionError::DuplicateCategory(HarmCategory::Dangerous))
        );
    }

    #[test]
    fn serializes_to_wire_names() {
        let json = serde_json::to_value(SafetyPolicy::permissive().settings()).unwrap();
        assert_eq!(json[0]["category"], "HARM_CATEGORY_DANGEROUS");
        assert_eq!(json[4]["category"], "HARM_CATEGORY_DANGEROUS_CONTENT");
        assert_eq!(json[2]["threshold"], "BLOCK_NONE");
    }
}
