//! Typed career profile and the validation that produces it.
//!
//! [`RawProfile`] mirrors what a form submits: every selection may be absent.
//! [`Profile::validate`] turns it into a [`Profile`] whose closed-set fields are
//! tagged variants, or reports the first offending field.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog;
use crate::error::CareerError;

pub const MAX_EXPERIENCE_YEARS: u8 = 20;

/// A closed set of selections with the labels the form displays.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Label shown to the user and embedded in prompts.
    fn label(self) -> &'static str;

    /// Short machine identifier, e.g. `in-office`.
    fn ident(self) -> &'static str;

    /// Matches either the label or the identifier, ignoring ASCII case.
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.iter().copied().find(|choice| {
            choice.label().eq_ignore_ascii_case(value) || choice.ident().eq_ignore_ascii_case(value)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkEnvironment {
    Remote,
    InOffice,
    Hybrid,
}

impl Choice for WorkEnvironment {
    const ALL: &'static [Self] = &[Self::Remote, Self::InOffice, Self::Hybrid];

    fn label(self) -> &'static str {
        match self {
            WorkEnvironment::Remote => "Remote",
            WorkEnvironment::InOffice => "In-office",
            WorkEnvironment::Hybrid => "Hybrid (a mix of remote and in-office)",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            WorkEnvironment::Remote => "remote",
            WorkEnvironment::InOffice => "in-office",
            WorkEnvironment::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerInterest {
    TechnologyAndDevelopment,
    MarketingAndSales,
    DesignAndCreative,
    OperationsAndManagement,
    FinanceAndAnalytics,
}

impl Choice for CareerInterest {
    const ALL: &'static [Self] = &[
        Self::TechnologyAndDevelopment,
        Self::MarketingAndSales,
        Self::DesignAndCreative,
        Self::OperationsAndManagement,
        Self::FinanceAndAnalytics,
    ];

    fn label(self) -> &'static str {
        match self {
            CareerInterest::TechnologyAndDevelopment => "Technology and Development",
            CareerInterest::MarketingAndSales => "Marketing and Sales",
            CareerInterest::DesignAndCreative => "Design and Creative",
            CareerInterest::OperationsAndManagement => "Operations and Management",
            CareerInterest::FinanceAndAnalytics => "Finance and Analytics",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            CareerInterest::TechnologyAndDevelopment => "technology",
            CareerInterest::MarketingAndSales => "marketing",
            CareerInterest::DesignAndCreative => "design",
            CareerInterest::OperationsAndManagement => "operations",
            CareerInterest::FinanceAndAnalytics => "finance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Retail,
    Other,
}

impl Choice for Industry {
    const ALL: &'static [Self] = &[
        Self::Technology,
        Self::Healthcare,
        Self::Finance,
        Self::Education,
        Self::Retail,
        Self::Other,
    ];

    fn label(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Retail => "Retail",
            Industry::Other => "Other (please specify)",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Finance => "finance",
            Industry::Education => "education",
            Industry::Retail => "retail",
            Industry::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStyle {
    Team,
    Independent,
    Both,
}

impl Choice for WorkStyle {
    const ALL: &'static [Self] = &[Self::Team, Self::Independent, Self::Both];

    fn label(self) -> &'static str {
        match self {
            WorkStyle::Team => "Team-based",
            WorkStyle::Independent => "Independent",
            WorkStyle::Both => "Both",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            WorkStyle::Team => "team",
            WorkStyle::Independent => "independent",
            WorkStyle::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkSchedule {
    NineToFive,
    Flexible,
    PartTime,
    Shift,
}

impl Choice for WorkSchedule {
    const ALL: &'static [Self] = &[Self::NineToFive, Self::Flexible, Self::PartTime, Self::Shift];

    fn label(self) -> &'static str {
        match self {
            WorkSchedule::NineToFive => "9-to-5",
            WorkSchedule::Flexible => "Flexible hours",
            WorkSchedule::PartTime => "Part-time",
            WorkSchedule::Shift => "Shift work",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            WorkSchedule::NineToFive => "nine-to-five",
            WorkSchedule::Flexible => "flexible",
            WorkSchedule::PartTime => "part-time",
            WorkSchedule::Shift => "shift",
        }
    }
}

/// Profile fields, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileField {
    Education,
    Skills,
    Personality,
    WorkExperienceYears,
    WorkEnvironment,
    CareerInterests,
    PreferredIndustry,
    PreferredWorkStyle,
    WorkLocation,
    WorkSchedule,
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileField::Education => "education",
            ProfileField::Skills => "skills",
            ProfileField::Personality => "personality",
            ProfileField::WorkExperienceYears => "work_experience_years",
            ProfileField::WorkEnvironment => "work_environment",
            ProfileField::CareerInterests => "career_interests",
            ProfileField::PreferredIndustry => "preferred_industry",
            ProfileField::PreferredWorkStyle => "preferred_work_style",
            ProfileField::WorkLocation => "work_location",
            ProfileField::WorkSchedule => "work_schedule",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required selection: {field}")]
    Missing { field: ProfileField },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: ProfileField, reason: String },
}

impl ValidationError {
    pub fn field(&self) -> ProfileField {
        match self {
            ValidationError::Missing { field } | ValidationError::Invalid { field, .. } => *field,
        }
    }
}

/// Unvalidated form submission. Any selection may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub education: Option<String>,
    pub skills: Vec<String>,
    pub personality: Option<String>,
    pub work_experience_years: Option<i64>,
    pub work_environment: Option<String>,
    pub career_interests: Option<String>,
    pub preferred_industry: Option<String>,
    pub preferred_work_style: Option<String>,
    pub work_location: Option<String>,
    pub work_schedule: Option<String>,
}

impl RawProfile {
    /// Reads a submission from a `.json` or `.toml` file.
    pub fn from_path(path: &Path) -> Result<Self, CareerError> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(serde_json::from_str(&contents)?),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(toml::from_str(&contents)?),
            _ => Err(CareerError::UnsupportedInput(format!(
                "{}: expected a .toml or .json profile",
                path.display()
            ))),
        }
    }
}

/// A validated career profile, ready for prompt synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub education: String,
    pub skills: Vec<String>,
    pub personality: String,
    pub work_experience_years: u8,
    pub work_environment: WorkEnvironment,
    pub career_interests: CareerInterest,
    pub preferred_industry: Industry,
    pub preferred_work_style: WorkStyle,
    pub work_location: String,
    pub work_schedule: WorkSchedule,
}

impl Profile {
    /// Checks every field in prompt order and stops at the first failure.
    pub fn validate(raw: RawProfile) -> Result<Self, ValidationError> {
        let education = vocabulary(
            ProfileField::Education,
            raw.education,
            catalog::is_known_education,
        )?;

        let mut skills = Vec::with_capacity(raw.skills.len());
        for skill in raw.skills {
            let skill = skill.trim().to_string();
            if skill.is_empty() {
                return Err(invalid(ProfileField::Skills, "skill entries must not be blank"));
            }
            if !catalog::is_known_skill(&skill) {
                debug!(skill = %skill, "keeping skill outside the known vocabulary");
            }
            if !skills.contains(&skill) {
                skills.push(skill);
            }
        }

        let personality = present(ProfileField::Personality, raw.personality)?;
        if !catalog::is_known_personality(&personality) {
            debug!(personality = %personality, "keeping personality outside the known vocabulary");
        }

        let years = raw
            .work_experience_years
            .ok_or(ValidationError::Missing {
                field: ProfileField::WorkExperienceYears,
            })?;
        let work_experience_years = u8::try_from(years)
            .ok()
            .filter(|y| *y <= MAX_EXPERIENCE_YEARS)
            .ok_or_else(|| {
                invalid(
                    ProfileField::WorkExperienceYears,
                    format!("{years} is outside 0..={MAX_EXPERIENCE_YEARS}"),
                )
            })?;

        Ok(Self {
            education,
            skills,
            personality,
            work_experience_years,
            work_environment: choice(ProfileField::WorkEnvironment, raw.work_environment)?,
            career_interests: choice(ProfileField::CareerInterests, raw.career_interests)?,
            preferred_industry: choice(ProfileField::PreferredIndustry, raw.preferred_industry)?,
            preferred_work_style: choice(ProfileField::PreferredWorkStyle, raw.preferred_work_style)?,
            work_location: vocabulary(
                ProfileField::WorkLocation,
                raw.work_location,
                catalog::is_known_country,
            )?,
            work_schedule: choice(ProfileField::WorkSchedule, raw.work_schedule)?,
        })
    }
}

fn invalid(field: ProfileField, reason: impl Into<String>) -> ValidationError {
    ValidationError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn present(field: ProfileField, value: Option<String>) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing { field })
}

fn vocabulary(
    field: ProfileField,
    value: Option<String>,
    known: fn(&str) -> bool,
) -> Result<String, ValidationError> {
    let value = present(field, value)?;
    if known(&value) {
        Ok(value)
    } else {
        Err(invalid(field, format!("'{value}' is not one of the offered options")))
    }
}

fn choice<T: Choice>(field: ProfileField, value: Option<String>) -> Result<T, ValidationError> {
    let value = present(field, value)?;
    T::parse(&value).ok_or_else(|| {
        let options: Vec<&str> = T::ALL.iter().map(|c| c.label()).collect();
        invalid(
            field,
            format!("'{value}' is not one of: {}", options.join(", ")),
        )
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_raw() -> RawProfile {
        RawProfile {
            education: Some("Computer Science".into()),
            skills: vec!["programming".into()],
            personality: Some("analytical".into()),
            work_experience_years: Some(2),
            work_environment: Some("Remote".into()),
            career_interests: Some("Technology and Development".into()),
            preferred_industry: Some("Technology".into()),
            preferred_work_style: Some("Independent".into()),
            work_location: Some("Canada".into()),
            work_schedule: Some("Flexible hours".into()),
        }
    }

    #[test]
    fn profile_files_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("profile.toml");
        std::fs::write(
            &toml_path,
            "education = \"Design\"\nskills = [\"design\"]\nwork_experience_years = 4\n",
        )
        .unwrap();
        let raw = RawProfile::from_path(&toml_path).unwrap();
        assert_eq!(raw.education.as_deref(), Some("Design"));
        assert_eq!(raw.work_experience_years, Some(4));
        assert!(raw.personality.is_none());

        let json_path = dir.path().join("profile.json");
        std::fs::write(&json_path, serde_json::to_string(&sample_raw()).unwrap()).unwrap();
        assert_eq!(RawProfile::from_path(&json_path).unwrap(), sample_raw());

        let yaml_path = dir.path().join("profile.yaml");
        std::fs::write(&yaml_path, "education: Design").unwrap();
        assert!(matches!(
            RawProfile::from_path(&yaml_path),
            Err(CareerError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn valid_profile_maps_to_variants() {
        let profile = Profile::validate(sample_raw()).unwrap();
        assert_eq!(profile.education, "Computer Science");
        assert_eq!(profile.work_environment, WorkEnvironment::Remote);
        assert_eq!(profile.career_interests, CareerInterest::TechnologyAndDevelopment);
        assert_eq!(profile.preferred_industry, Industry::Technology);
        assert_eq!(profile.preferred_work_style, WorkStyle::Independent);
        assert_eq!(profile.work_schedule, WorkSchedule::Flexible);
        assert_eq!(profile.work_experience_years, 2);
    }

    #[test]
    fn choices_parse_from_identifier() {
        assert_eq!(WorkEnvironment::parse("hybrid"), Some(WorkEnvironment::Hybrid));
        assert_eq!(WorkSchedule::parse("FLEXIBLE"), Some(WorkSchedule::Flexible));
        assert_eq!(WorkStyle::parse("Team-based"), Some(WorkStyle::Team));
        assert_eq!(Industry::parse("Other (please specify)"), Some(Industry::Other));
        assert_eq!(WorkSchedule::parse("weekends"), None);
    }

    #[test]
    fn each_missing_selection_names_its_field() {
        let cases: [(ProfileField, fn(&mut RawProfile)); 9] = [
            (ProfileField::Education, |r| r.education = None),
            (ProfileField::Personality, |r| r.personality = None),
            (ProfileField::WorkExperienceYears, |r| r.work_experience_years = None),
            (ProfileField::WorkEnvironment, |r| r.work_environment = None),
            (ProfileField::CareerInterests, |r| r.career_interests = None),
            (ProfileField::PreferredIndustry, |r| r.preferred_industry = None),
            (ProfileField::PreferredWorkStyle, |r| r.preferred_work_style = None),
            (ProfileField::WorkLocation, |r| r.work_location = Some("  ".into())),
            (ProfileField::WorkSchedule, |r| r.work_schedule = None),
        ];

        for (field, clear) in cases {
            let mut raw = sample_raw();
            clear(&mut raw);
            let err = Profile::validate(raw).unwrap_err();
            assert_eq!(err, ValidationError::Missing { field }, "field {field}");
        }
    }

    #[test]
    fn experience_bounds_are_inclusive() {
        for years in [0, 20] {
            let mut raw = sample_raw();
            raw.work_experience_years = Some(years);
            assert!(Profile::validate(raw).is_ok(), "{years} should be accepted");
        }
        for years in [-1, 21] {
            let mut raw = sample_raw();
            raw.work_experience_years = Some(years);
            let err = Profile::validate(raw).unwrap_err();
            assert_eq!(err.field(), ProfileField::WorkExperienceYears);
            assert!(matches!(err, ValidationError::Invalid { .. }));
        }
    }

    #[test]
    fn empty_skills_are_allowed() {
        let mut raw = sample_raw();
        raw.skills.clear();
        let profile = Profile::validate(raw).unwrap();
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn unknown_skills_are_kept_verbatim() {
        let mut raw = sample_raw();
        raw.skills = vec!["programming".into(), "Rust async".into(), "programming".into()];
        let profile = Profile::validate(raw).unwrap();
        assert_eq!(profile.skills, vec!["programming", "Rust async"]);
    }

    #[test]
    fn skills_are_trimmed_before_deduplication() {
        let mut raw = sample_raw();
        raw.skills = vec!["  Rust  ".into(), "Rust".into(), "\tanalytics".into()];
        let profile = Profile::validate(raw).unwrap();
        assert_eq!(profile.skills, vec!["Rust", "analytics"]);
    }

    #[test]
    fn personality_outside_vocabulary_is_kept() {
        let mut raw = sample_raw();
        raw.personality = Some("adventurous".into());
        let profile = Profile::validate(raw).unwrap();
        assert_eq!(profile.personality, "adventurous");

        let mut raw = sample_raw();
        raw.personality = Some("   ".into());
        assert_eq!(
            Profile::validate(raw).unwrap_err(),
            ValidationError::Missing {
                field: ProfileField::Personality
            }
        );
    }

    #[test]
    fn closed_set_rejects_unknown_values() {
        let mut raw = sample_raw();
        raw.work_schedule = Some("Weekends only".into());
        let err = Profile::validate(raw).unwrap_err();
        assert_eq!(err.field(), ProfileField::WorkSchedule);
        assert!(err.to_string().contains("Weekends only"));

        let mut raw = sample_raw();
        raw.work_location = Some("Atlantis".into());
        assert_eq!(
            Profile::validate(raw).unwrap_err().field(),
            ProfileField::WorkLocation
        );
    }

    #[test]
    fn raw_profile_deserializes_with_gaps() {
        let raw: RawProfile = toml::from_str(
            r#"
            education = "Design"
            work_experience_years = 4
            "#,
        )
        .unwrap();
        assert_eq!(raw.education.as_deref(), Some("Design"));
        assert!(raw.skills.is_empty());
        assert!(raw.personality.is_none());
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError::Missing {
            field: ProfileField::WorkSchedule,
        };
        assert_eq!(err.to_string(), "missing required selection: work_schedule");
    }
}
