use crate::models::HealthProfile;

/// Fields that must be filled in before recommendations can be generated
///
/// Declaration order is the order missing fields are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    FullName,
    Age,
    Gender,
    City,
    Conditions,
}

impl RequiredField {
    pub const ALL: [RequiredField; 5] = [
        RequiredField::FullName,
        RequiredField::Age,
        RequiredField::Gender,
        RequiredField::City,
        RequiredField::Conditions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::FullName => "Full Name",
            RequiredField::Age => "Age",
            RequiredField::Gender => "Gender",
            RequiredField::City => "City",
            RequiredField::Conditions => "Pre-existing Conditions",
        }
    }

    /// A field is missing if absent or blank once rendered as text
    fn is_missing(&self, profile: &HealthProfile) -> bool {
        let text = match self {
            RequiredField::FullName => profile.full_name.clone(),
            RequiredField::Age => profile.age.as_ref().map(|age| age.to_string()),
            RequiredField::Gender => profile.gender.map(|g| g.as_str().to_string()),
            RequiredField::City => profile.city.clone(),
            RequiredField::Conditions => profile.conditions.clone(),
        };

        text.map_or(true, |value| value.trim().is_empty())
    }
}

/// Whether the profile carries every field required for generation
pub fn is_complete(profile: Option<&HealthProfile>) -> bool {
    match profile {
        None => false,
        Some(profile) => RequiredField::ALL.iter().all(|field| !field.is_missing(profile)),
    }
}

/// Labels of the required fields that are missing, in declaration order
pub fn missing_fields(profile: Option<&HealthProfile>) -> Vec<&'static str> {
    RequiredField::ALL
        .iter()
        .filter(|field| profile.map_or(true, |p| field.is_missing(p)))
        .map(RequiredField::label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeField, Gender};

    fn complete_profile() -> HealthProfile {
        HealthProfile {
            full_name: Some("Ravi Kumar".to_string()),
            age: Some(AgeField::from("40")),
            gender: Some(Gender::Male),
            city: Some("Chennai".to_string()),
            conditions: Some("None".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_profile_reports_everything() {
        assert!(!is_complete(None));
        assert_eq!(
            missing_fields(None),
            vec!["Full Name", "Age", "Gender", "City", "Pre-existing Conditions"]
        );
    }

    #[test]
    fn test_complete_profile() {
        let profile = complete_profile();
        assert!(is_complete(Some(&profile)));
        assert!(missing_fields(Some(&profile)).is_empty());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut profile = complete_profile();
        profile.city = Some("   ".to_string());
        profile.age = Some(AgeField::from(" "));
        assert!(!is_complete(Some(&profile)));
        assert_eq!(missing_fields(Some(&profile)), vec!["Age", "City"]);
    }

    #[test]
    fn test_empty_profile_reports_all_in_order() {
        let profile = HealthProfile::default();
        assert_eq!(missing_fields(Some(&profile)).len(), 5);
        assert_eq!(missing_fields(Some(&profile))[4], "Pre-existing Conditions");
    }
}
