use crate::models::HealthProfile;

const RESPONSE_CONTRACT: &str = r#"RETURN FORMAT (JSON):
Return ONLY a valid JSON array with exactly 3 recommendations. Each recommendation must have:
{
  "name": "Plan Name",
  "provider": "Insurance Provider",
  "premium": number (annual premium in INR),
  "coverage": number (coverage amount in INR),
  "score": number (1-100 match score),
  "matchReason": "Why this plan suits their SPECIFIC conditions and profile",
  "features": ["feature1", "feature2", "feature3"],
  "coverageDetails": "What this covers for their specific diseases",
  "exclusions": "Important exclusions related to their conditions",
  "riskFactors": "Risk factors based on their health profile"
}

IMPORTANT: Return ONLY the JSON array, no other text. Make sure each plan is truly personalized to their conditions."#;

/// Summary of family members, e.g. `spouse age 35, child age 8`, or `None`
pub fn family_summary(profile: &HealthProfile) -> String {
    if profile.family_members.is_empty() {
        return "None".to_string();
    }

    profile
        .family_members
        .iter()
        .map(|member| {
            let age = member.age.as_ref().map(|a| a.to_string()).unwrap_or_default();
            format!("{} age {}", member.relation.as_str(), age.trim())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the instruction text sent to the inference endpoint
pub fn build_prompt(profile: &HealthProfile) -> String {
    let text_or = |value: &Option<String>, default: &str| -> String {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    format!(
        "You are an expert health insurance advisor AI. Analyze the following complete health profile and generate 3 personalized insurance plan recommendations.

USER HEALTH PROFILE:
- Name: {name}
- Age: {age} years
- Gender: {gender}
- City/Location: {city}
- Pre-existing Conditions/Diseases: {conditions}
- Preferred Hospital: {hospital}
- Family Members: {count} ({family})

STRICT REQUIREMENTS:
1. Base ALL recommendations on the user's specific diseases, age, and health conditions listed above
2. Each recommendation MUST be different and personalized to their exact health profile
3. If they have diabetes, hypertension, or other conditions - recommendations MUST address these specifically
4. DO NOT give generic advice - every recommendation should reference their actual conditions
5. Consider their age, location, and family situation
6. Provide realistic premium estimates based on their risk profile

{contract}",
        name = text_or(&profile.full_name, ""),
        age = profile.age.as_ref().map(|a| a.to_string()).unwrap_or_default(),
        gender = profile.gender.map(|g| g.as_str()).unwrap_or_default(),
        city = text_or(&profile.city, ""),
        conditions = text_or(&profile.conditions, "None"),
        hospital = text_or(&profile.hospital, "Any"),
        count = profile.family_members.len(),
        family = family_summary(profile),
        contract = RESPONSE_CONTRACT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeField, FamilyMember, Gender, Relation};

    fn profile() -> HealthProfile {
        HealthProfile {
            full_name: Some("Meera Iyer".to_string()),
            age: Some(AgeField::Years(45)),
            gender: Some(Gender::Female),
            city: Some("Bengaluru".to_string()),
            conditions: Some("Hypertension".to_string()),
            hospital: None,
            family_members: vec![],
        }
    }

    #[test]
    fn test_prompt_embeds_profile() {
        let prompt = build_prompt(&profile());
        assert!(prompt.contains("- Name: Meera Iyer"));
        assert!(prompt.contains("- Age: 45 years"));
        assert!(prompt.contains("- Gender: female"));
        assert!(prompt.contains("- Pre-existing Conditions/Diseases: Hypertension"));
        assert!(prompt.contains("- Preferred Hospital: Any"));
        assert!(prompt.contains("- Family Members: 0 (None)"));
        assert!(prompt.contains("\"riskFactors\""));
    }

    #[test]
    fn test_family_summary() {
        let mut profile = profile();
        profile.family_members = vec![
            FamilyMember { relation: Relation::Spouse, age: Some(AgeField::from("44")), ..Default::default() },
            FamilyMember { relation: Relation::Child, age: Some(AgeField::Years(9)), ..Default::default() },
        ];
        assert_eq!(family_summary(&profile), "spouse age 44, child age 9");
        assert!(build_prompt(&profile).contains("- Family Members: 2 (spouse age 44, child age 9)"));
    }
}
