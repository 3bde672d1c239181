use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Tag that stands for "no known diseases" in a family member's disease set
pub const NO_DISEASE: &str = "None";

/// Disease tags offered by the profile form
pub const DISEASE_OPTIONS: [&str; 8] = [
    "Diabetes",
    "Hypertension",
    "Asthma",
    "Heart Disease",
    "Thyroid",
    "Cancer",
    "Kidney Issues",
    NO_DISEASE,
];

/// Health and demographic record used to drive recommendation generation
///
/// Every field is optional on the wire; completeness is decided by
/// `core::validator`, not by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<AgeField>,
    #[serde(default, deserialize_with = "deserialize_gender")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(rename = "familyMembers", default)]
    pub family_members: Vec<FamilyMember>,
}

/// Age as submitted: forms send text, stored profiles may carry a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeField {
    Years(u64),
    Text(String),
}

impl AgeField {
    /// Parse leading decimal digits, ignoring surrounding whitespace
    ///
    /// `"40"` and `"40 years"` both yield 40; `""`, `"abc"` and values that
    /// overflow yield `None`.
    pub fn years(&self) -> Option<u64> {
        match self {
            AgeField::Years(years) => Some(*years),
            AgeField::Text(text) => {
                let trimmed = text.trim();
                let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
                let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
                if digits.is_empty() {
                    None
                } else {
                    digits.parse().ok()
                }
            }
        }
    }
}

impl fmt::Display for AgeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeField::Years(years) => write!(f, "{}", years),
            AgeField::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for AgeField {
    fn from(years: u64) -> Self {
        AgeField::Years(years)
    }
}

impl From<&str> for AgeField {
    fn from(text: &str) -> Self {
        AgeField::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blank strings count as "not chosen" so the validator can report them
fn deserialize_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => Gender::parse(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid gender '{}', expected one of: male, female, other",
                value
            ))
        }),
    }
}

/// A relative covered alongside the profile owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<AgeField>,
    #[serde(default)]
    pub relation: Relation,
    #[serde(default, deserialize_with = "deserialize_member_gender")]
    pub gender: Option<MemberGender>,
    #[serde(default)]
    pub diseases: DiseaseSet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    #[default]
    Spouse,
    Child,
    Parent,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Spouse => "spouse",
            Relation::Child => "child",
            Relation::Parent => "parent",
        }
    }
}

/// Family member gender; has no default and must be picked explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberGender {
    Male,
    Female,
    Other,
}

fn deserialize_member_gender<'de, D>(deserializer: D) -> Result<Option<MemberGender>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("Male") => Ok(Some(MemberGender::Male)),
        Some("Female") => Ok(Some(MemberGender::Female)),
        Some("Other") => Ok(Some(MemberGender::Other)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid family member gender '{}', expected one of: Male, Female, Other",
            other
        ))),
    }
}

fn is_no_disease(tag: &str) -> bool {
    tag.eq_ignore_ascii_case(NO_DISEASE)
}

/// Disease tags of a family member
///
/// Never empty: holds exactly `{"None"}` or one or more other tags, in the
/// order they were selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DiseaseSet(Vec<String>);

impl DiseaseSet {
    pub fn none() -> Self {
        Self(vec![NO_DISEASE.to_string()])
    }

    /// Build a set from arbitrary tags, restoring the invariant
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Vec::new();
        for tag in tags {
            let tag: String = tag.into();
            let tag = tag.trim();
            if tag.is_empty() || is_no_disease(tag) || set.iter().any(|t: &String| t == tag) {
                continue;
            }
            set.push(tag.to_string());
        }
        if set.is_empty() {
            Self::none()
        } else {
            Self(set)
        }
    }

    /// Select or deselect a tag
    ///
    /// Selecting "None" clears everything else; selecting any other tag
    /// drops "None"; deselecting the last tag reverts to `{"None"}`.
    ///
    /// Blank tags leave the set unchanged; "None" matches in any case.
    pub fn toggle(&mut self, disease: &str) {
        let disease = disease.trim();
        if disease.is_empty() {
            return;
        }
        if is_no_disease(disease) {
            *self = Self::none();
            return;
        }

        self.0.retain(|t| !is_no_disease(t));

        if let Some(pos) = self.0.iter().position(|t| t == disease) {
            self.0.remove(pos);
        } else {
            self.0.push(disease.to_string());
        }

        if self.0.is_empty() {
            *self = Self::none();
        }
    }

    pub fn is_none(&self) -> bool {
        self.0.len() == 1 && self.0[0] == NO_DISEASE
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.0.iter().any(|t| t == disease)
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }
}

impl Default for DiseaseSet {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<String>> for DiseaseSet {
    fn from(tags: Vec<String>) -> Self {
        Self::from_tags(tags)
    }
}

impl From<DiseaseSet> for Vec<String> {
    fn from(set: DiseaseSet) -> Self {
        set.0
    }
}

/// A single insurance plan recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub name: String,
    pub provider: String,
    pub premium: f64,
    pub coverage: f64,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    pub match_reason: String,
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub coverage_details: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub exclusions: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub risk_factors: String,
}

/// Accepts `90` and `90.0`; rejects fractions and values outside `u8`
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&raw) {
        return Err(serde::de::Error::custom(format!("score {} is not a whole number in 0..=255", raw)));
    }
    Ok(raw as u8)
}

/// Absent or null text reads as empty
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entry of the static plan catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsurancePlan {
    pub id: u32,
    pub name: &'static str,
    pub provider: &'static str,
    pub premium: f64,
    pub coverage: f64,
    pub features: &'static [&'static str],
}

/// A profile as persisted for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub profile: HealthProfile,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// User-facing message returned alongside a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NoticeKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NoticeKind::Error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_field_parsing() {
        assert_eq!(AgeField::from("40").years(), Some(40));
        assert_eq!(AgeField::from(" 52 years").years(), Some(52));
        assert_eq!(AgeField::from("").years(), None);
        assert_eq!(AgeField::from("forty").years(), None);
        assert_eq!(AgeField::Years(7).years(), Some(7));
    }

    #[test]
    fn test_profile_deserializes_text_and_numeric_age() {
        let json = r#"{"fullName":"Asha","age":"34","gender":"Female","city":"Pune","conditions":"None"}"#;
        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age, Some(AgeField::Text("34".to_string())));
        assert_eq!(profile.gender, Some(Gender::Female));

        let json = r#"{"age":34,"gender":""}"#;
        let profile: HealthProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age, Some(AgeField::Years(34)));
        assert_eq!(profile.gender, None);
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let json = r#"{"gender":"robot"}"#;
        assert!(serde_json::from_str::<HealthProfile>(json).is_err());
    }

    #[test]
    fn test_disease_set_normalizes_on_deserialize() {
        let member: FamilyMember =
            serde_json::from_str(r#"{"relation":"child","diseases":[]}"#).unwrap();
        assert!(member.diseases.is_none());
        assert_eq!(member.gender, None);

        let member: FamilyMember =
            serde_json::from_str(r#"{"gender":"Male","diseases":["None","Asthma","Asthma"]}"#).unwrap();
        assert_eq!(member.diseases.tags(), ["Asthma".to_string()]);
        assert_eq!(member.gender, Some(MemberGender::Male));
    }

    #[test]
    fn test_blank_toggle_leaves_set_unchanged() {
        let mut set = DiseaseSet::none();
        set.toggle("  ");
        assert!(set.is_none());

        set.toggle("Asthma");
        set.toggle("");
        assert_eq!(set.tags(), ["Asthma".to_string()]);
    }

    #[test]
    fn test_no_disease_tag_matches_any_case() {
        let mut set = DiseaseSet::from_tags(["Thyroid"]);
        set.toggle("none");
        assert!(set.is_none());

        let set = DiseaseSet::from_tags(["NONE", "Asthma", "none"]);
        assert_eq!(set.tags(), ["Asthma".to_string()]);
        assert!(DiseaseSet::from_tags(["none"]).is_none());
    }

    #[test]
    fn test_recommendation_optional_text_and_whole_float_score() {
        let json = r#"{"name":"Plan","provider":"P","premium":1000,"coverage":500000,
            "score":90.0,"matchReason":"fits","features":[],"exclusions":null}"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.score, 90);
        assert_eq!(rec.coverage_details, "");
        assert_eq!(rec.exclusions, "");

        let fractional = json.replace("90.0", "90.5");
        assert!(serde_json::from_str::<Recommendation>(&fractional).is_err());
        let negative = json.replace("90.0", "-1");
        assert!(serde_json::from_str::<Recommendation>(&negative).is_err());
    }

    #[test]
    fn test_recommendation_uses_camel_case() {
        let rec = Recommendation {
            name: "Plan".to_string(),
            provider: "Provider".to_string(),
            premium: 1000.0,
            coverage: 500000.0,
            score: 90,
            match_reason: "reason".to_string(),
            features: vec!["a".to_string()],
            coverage_details: "details".to_string(),
            exclusions: "none".to_string(),
            risk_factors: "low".to_string(),
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value.get("matchReason").is_some());
        assert!(value.get("coverageDetails").is_some());
        assert!(value.get("riskFactors").is_some());
    }
}
