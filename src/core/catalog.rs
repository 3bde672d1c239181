use crate::models::InsurancePlan;

static PLANS: [InsurancePlan; 6] = [
    InsurancePlan {
        id: 1,
        name: "Care Plus",
        provider: "Care Health",
        premium: 12500.0,
        coverage: 500000.0,
        features: &["No Copay", "Free Health Checkup", "Cashless Treatment", "Global Coverage"],
    },
    InsurancePlan {
        id: 2,
        name: "Optima Restore",
        provider: "HDFC ERGO",
        premium: 15000.0,
        coverage: 1000000.0,
        features: &["Restore Benefit", "2x Coverage", "No Claim Bonus", "Daily Cash"],
    },
    InsurancePlan {
        id: 3,
        name: "Health Companion",
        provider: "Niva Bupa",
        premium: 11000.0,
        coverage: 500000.0,
        features: &["Direct Claim Settlement", "Refill Benefit", "Alternative Treatment"],
    },
    InsurancePlan {
        id: 4,
        name: "Activ Health",
        provider: "Aditya Birla",
        premium: 13500.0,
        coverage: 700000.0,
        features: &["Chronic Management", "Health Returns", "Day Care Procedures"],
    },
    InsurancePlan {
        id: 5,
        name: "Young Star",
        provider: "Star Health",
        premium: 9000.0,
        coverage: 300000.0,
        features: &["Mid-term Inclusion", "Wellness Program", "E-Medical Opinion"],
    },
    InsurancePlan {
        id: 6,
        name: "ProHealth",
        provider: "Manipal Cigna",
        premium: 14000.0,
        coverage: 1000000.0,
        features: &["Unlimited Restoration", "Healthy Rewards", "Worldwide Emergency"],
    },
];

/// All plans in the static catalog
pub fn plans() -> &'static [InsurancePlan] {
    &PLANS
}

/// Look up a catalog plan by id
pub fn find(id: u32) -> Option<&'static InsurancePlan> {
    PLANS.iter().find(|plan| plan.id == id)
}
