use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use fitforge_domain as domain;

fn time(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
}

pub static EXERCISE: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: "bench_press".into(),
    name: domain::Name::new("Bench Press").unwrap(),
    equipment: domain::Equipment::Barbell,
    category: domain::Category::Push,
    engagement: vec![
        domain::MuscleEngagement {
            muscle: domain::Muscle::PectoralisMajor,
            percentage: domain::Percentage::new(70.0).unwrap(),
        },
        domain::MuscleEngagement {
            muscle: domain::Muscle::TricepsBrachii,
            percentage: domain::Percentage::new(30.0).unwrap(),
        },
    ],
});

pub static SESSION: LazyLock<domain::Session> = LazyLock::new(|| domain::Session {
    id: "s1".into(),
    name: domain::Name::new("Push Day").unwrap(),
    start_time: time(9, 10, 0),
    end_time: time(9, 11, 0),
    sets: vec![
        domain::Set {
            id: "s1-1".into(),
            exercise_id: "bench_press".into(),
            weight: 100.0,
            reps: 10,
            timestamp: time(9, 10, 10),
            rpe: Some(domain::RPE::new(8.5).unwrap()),
            is_warmup: false,
        },
        domain::Set {
            id: "s1-2".into(),
            exercise_id: "bench_press".into(),
            weight: 40.0,
            reps: 12,
            timestamp: time(9, 10, 5),
            rpe: None,
            is_warmup: true,
        },
    ],
});

pub static SESSION_2: LazyLock<domain::Session> = LazyLock::new(|| domain::Session {
    id: "s2".into(),
    name: domain::Name::new("Leg Day").unwrap(),
    start_time: time(10, 8, 0),
    end_time: time(10, 9, 15),
    sets: vec![domain::Set {
        id: "s2-1".into(),
        exercise_id: "squat".into(),
        weight: 140.0,
        reps: 5,
        timestamp: time(10, 8, 20),
        rpe: Some(domain::RPE::NINE),
        is_warmup: false,
    }],
});

pub static ONGOING_SESSION: LazyLock<domain::OngoingSession> = LazyLock::new(|| {
    let mut ongoing_session = domain::OngoingSession::start(
        domain::Name::new("Pull Day").unwrap(),
        time(10, 17, 0),
    );
    ongoing_session.id = "s3".into();
    ongoing_session.log_set(domain::Set {
        id: "s3-1".into(),
        exercise_id: "pullup".into(),
        weight: 0.0,
        reps: 8,
        timestamp: time(10, 17, 5),
        rpe: None,
        is_warmup: false,
    });
    ongoing_session
});
