use crate::models::{HealthProfile, Recommendation};

/// Age assumed when the profile's age cannot be parsed
pub const DEFAULT_AGE: u64 = 30;

const BASE_PREMIUM: u64 = 10_000;
const PREMIUM_PER_YEAR: u64 = 200;
const DIABETES_SURCHARGE: u64 = 5_000;
const BP_SURCHARGE: u64 = 3_000;
const HEART_SURCHARGE: u64 = 8_000;

/// Condition signals detected from the free-text conditions field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionSignals {
    pub diabetes: bool,
    pub blood_pressure: bool,
    pub heart: bool,
}

impl ConditionSignals {
    /// Case-insensitive keyword detection
    pub fn detect(conditions: &str) -> Self {
        let conditions = conditions.to_lowercase();

        Self {
            diabetes: mentions(&conditions, &["diabetes", "sugar"]),
            blood_pressure: mentions(&conditions, &["bp", "hypertension", "pressure"]),
            heart: mentions(&conditions, &["heart", "cardio"]),
        }
    }

    pub fn any(&self) -> bool {
        self.diabetes || self.blood_pressure || self.heart
    }
}

#[inline]
fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Age used for pricing; zero and unparseable ages fall back to 30
pub fn effective_age(profile: &HealthProfile) -> u64 {
    profile
        .age
        .as_ref()
        .and_then(|age| age.years())
        .filter(|&years| years > 0)
        .unwrap_or(DEFAULT_AGE)
}

/// Annual base premium: age loading plus independent condition surcharges
pub fn base_premium(age: u64, signals: ConditionSignals) -> u64 {
    let mut premium = BASE_PREMIUM.saturating_add(age.saturating_mul(PREMIUM_PER_YEAR));
    if signals.diabetes {
        premium = premium.saturating_add(DIABETES_SURCHARGE);
    }
    if signals.blood_pressure {
        premium = premium.saturating_add(BP_SURCHARGE);
    }
    if signals.heart {
        premium = premium.saturating_add(HEART_SURCHARGE);
    }
    premium
}

/// Derive three recommendations from the profile without any I/O
///
/// The first plan targets the detected condition, the second is the value
/// option and the third the premium option. Output depends only on the
/// profile's age, conditions and city.
pub fn local_recommendations(profile: &HealthProfile) -> Vec<Recommendation> {
    let signals = ConditionSignals::detect(profile.conditions.as_deref().unwrap_or_default());
    let base = base_premium(effective_age(profile), signals) as f64;

    vec![
        targeted_plan(profile, signals, base),
        value_plan(base),
        premium_plan(base),
    ]
}

fn targeted_plan(profile: &HealthProfile, signals: ConditionSignals, base: f64) -> Recommendation {
    let (name, provider, match_reason) = if signals.diabetes {
        (
            "Diabetes Care Pro",
            "Care Health",
            "Specifically designed for diabetes management with coverage for insulin and regular checkups.".to_string(),
        )
    } else if signals.heart {
        (
            "Heart Secure Gold",
            "Star Health",
            "Specialized cardiac care coverage essential for your heart condition.".to_string(),
        )
    } else {
        (
            "Optima Restore",
            "HDFC ERGO",
            format!(
                "Best comprehensive coverage for your age group in {}.",
                profile.city.as_deref().unwrap_or_default().trim()
            ),
        )
    };

    let coverage_details = if signals.diabetes {
        "Covers hospitalization due to diabetes complications and insulin costs."
    } else {
        "Comprehensive hospitalization coverage including pre/post expenses."
    };

    let risk_factors = if signals.any() {
        "Higher premium due to pre-existing conditions."
    } else {
        "Standard risk profile for your age."
    };

    Recommendation {
        name: name.to_string(),
        provider: provider.to_string(),
        premium: base,
        coverage: 1_000_000.0,
        score: 95,
        match_reason,
        features: features(&[
            if signals.diabetes { "Insulin Cover" } else { "No Claim Bonus" },
            "Cashless Treatment",
            "Annual Health Checkup",
        ]),
        coverage_details: coverage_details.to_string(),
        exclusions: "Waiting period of 2 years for pre-existing conditions.".to_string(),
        risk_factors: risk_factors.to_string(),
    }
}

fn value_plan(base: f64) -> Recommendation {
    Recommendation {
        name: "Health Companion".to_string(),
        provider: "Niva Bupa".to_string(),
        premium: base * 0.8,
        coverage: 500_000.0,
        score: 88,
        match_reason: "Most cost-effective option providing essential coverage for your needs.".to_string(),
        features: features(&["Refill Benefit", "Direct Claim Settlement", "Tax Benefit"]),
        coverage_details: "Standard hospitalization coverage with refill benefit.".to_string(),
        exclusions: "Cosmetic treatments and non-medical expenses.".to_string(),
        risk_factors: "Lower coverage amount might be insufficient for major surgeries.".to_string(),
    }
}

fn premium_plan(base: f64) -> Recommendation {
    Recommendation {
        name: "ReAssure 2.0".to_string(),
        provider: "Niva Bupa".to_string(),
        premium: base * 1.3,
        coverage: 2_500_000.0,
        score: 82,
        match_reason: "Maximum coverage with unlimited restoration, ideal for long-term security.".to_string(),
        features: features(&["Unlimited Restoration", "Lock the Clock", "Booster Benefit"]),
        coverage_details: "Extensive coverage for all major illnesses and modern treatments.".to_string(),
        exclusions: "Experimental treatments.".to_string(),
        risk_factors: "Higher premium cost.".to_string(),
    }
}

#[inline]
fn features(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}
