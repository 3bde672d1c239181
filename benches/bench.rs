// Criterion benchmarks for MediNest

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use medinest::core::{build_prompt, local_recommendations, is_complete, missing_fields, format_inr};
use medinest::models::{AgeField, FamilyMember, Gender, HealthProfile, MemberGender, Relation};

fn create_profile(family_size: usize) -> HealthProfile {
    HealthProfile {
        full_name: Some("Benchmark User".to_string()),
        age: Some(AgeField::from("45")),
        gender: Some(Gender::Other),
        city: Some("Hyderabad".to_string()),
        conditions: Some("Type 2 diabetes, hypertension, mild cardio issues".to_string()),
        hospital: Some("Apollo".to_string()),
        family_members: (0..family_size)
            .map(|i| FamilyMember {
                name: format!("Member {}", i),
                age: Some(AgeField::Years(10 + i as u64)),
                relation: if i % 2 == 0 { Relation::Child } else { Relation::Parent },
                gender: Some(MemberGender::Female),
                ..Default::default()
            })
            .collect(),
    }
}

fn bench_validator(c: &mut Criterion) {
    let profile = create_profile(2);
    let empty = HealthProfile::default();

    c.bench_function("is_complete", |b| {
        b.iter(|| is_complete(black_box(Some(&profile))))
    });

    c.bench_function("missing_fields_empty_profile", |b| {
        b.iter(|| missing_fields(black_box(Some(&empty))))
    });
}

fn bench_fallback(c: &mut Criterion) {
    let profile = create_profile(2);

    c.bench_function("local_recommendations", |b| {
        b.iter(|| local_recommendations(black_box(&profile)))
    });

    c.bench_function("format_inr", |b| {
        b.iter(|| format_inr(black_box(2_500_000.0)))
    });
}

fn bench_prompt(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_prompt");

    for size in [0, 4, 16].iter() {
        let profile = create_profile(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &profile, |b, profile| {
            b.iter(|| build_prompt(black_box(profile)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validator, bench_fallback, bench_prompt);
criterion_main!(benches);
