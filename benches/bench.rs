// Criterion benchmarks for Study Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use study_match::core::{calculate_schedule_points, Matcher};
use study_match::models::{Group, LearnerProfile};

const SUBJECTS: [&str; 4] = ["Computer Science", "Mathematics", "Chemistry", "Physics"];
const TOPICS: [&str; 4] = ["Data Structures", "Calculus", "Organic Chemistry", "Mechanics"];
const SCHEDULES: [&str; 4] = [
    "Mondays and Wednesdays, 7-9pm",
    "Tuesday and Thursday evenings",
    "Friday afternoons",
    "Saturday morning",
];
const STYLES: [&str; 4] = ["Visual", "Auditory", "Kinesthetic", "Group discussion"];

fn create_group(id: usize) -> Group {
    Group {
        id: id.to_string(),
        name: format!("Group {}", id),
        subject: SUBJECTS[id % 4].to_string(),
        topic: TOPICS[(id / 4) % 4].to_string(),
        schedule: SCHEDULES[(id / 16) % 4].to_string(),
        learning_style: Some(STYLES[id % 3].to_string()),
        ..Default::default()
    }
}

fn create_profile() -> LearnerProfile {
    LearnerProfile {
        subjects: ["Computer Science".to_string(), "Mathematics".to_string()]
            .into_iter()
            .collect(),
        topics: vec!["Data Structures".to_string(), "Calculus".to_string()],
        schedule: vec![
            "Monday Evening".to_string(),
            "Tuesday Evening".to_string(),
            "Wednesday Morning".to_string(),
            "Friday Afternoon".to_string(),
        ],
        learning_style: Some("Visual".to_string()),
    }
}

fn bench_schedule_points(c: &mut Criterion) {
    let profile = create_profile();

    c.bench_function("schedule_points", |b| {
        b.iter(|| {
            calculate_schedule_points(
                black_box(&profile.schedule),
                black_box("Mondays and Wednesdays, 7-9pm"),
                black_box(25.0),
            )
        });
    });
}

fn bench_single_score(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let profile = create_profile();
    let group = create_group(0);

    c.bench_function("match_score", |b| {
        b.iter(|| matcher.score(black_box(&profile), black_box(&group)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let profile = create_profile();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Group> = (0..*candidate_count).map(create_group).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&profile), black_box(&candidates)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_schedule_points, bench_single_score, bench_matching);

criterion_main!(benches);
