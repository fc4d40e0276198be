use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timetable_engine::generator::coloring::{generate_coloring, ColoringAlgorithm};
use timetable_engine::generator::greedy::generate_greedy;
use timetable_engine::repository::InMemoryRepository;
use timetable_engine::types::{
    Classroom, ClassroomId, Course, CourseId, EngineConfig, StudentGroup, StudentGroupId, Teacher, TeacherId,
};

fn medium_repository() -> InMemoryRepository {
    let teachers: Vec<Teacher> = (0..8)
        .map(|i| Teacher {
            id: TeacherId(format!("t{i}")),
            name: format!("Teacher {i}"),
            role: "faculty".to_string(),
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            department: None,
        })
        .collect();

    let classrooms: Vec<Classroom> = (0..6)
        .map(|i| Classroom {
            id: ClassroomId(format!("r{i}")),
            name: format!("Room {i}"),
            capacity: 30,
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
        })
        .collect();

    let groups: Vec<StudentGroup> = (0..10)
        .map(|i| StudentGroup {
            id: StudentGroupId(format!("g{i}")),
            name: format!("Group {i}"),
            size: 20,
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            semester: None,
            department: None,
        })
        .collect();

    let courses: Vec<Course> = (0..20)
        .map(|i| Course {
            id: CourseId(format!("c{i}")),
            name: format!("Course {i}"),
            duration: 60,
            frequency: 3,
            teacher_id: TeacherId(format!("t{}", i % teachers.len())),
            student_group_ids: vec![StudentGroupId(format!("g{}", i % groups.len()))],
            active: true,
            semester: None,
            department: None,
        })
        .collect();

    InMemoryRepository::new(courses, classrooms, groups, teachers)
}

fn bench_greedy(c: &mut Criterion) {
    let repo = medium_repository();
    let config = EngineConfig::default();
    let snapshot = repo.snapshot("fall-2026", None);

    c.bench_function("greedy_generate_medium", |b| {
        b.iter(|| {
            let result = generate_greedy(black_box(&repo), black_box(&config), black_box(&snapshot), "fall-2026", "2026").unwrap();
            black_box(result.placed.len())
        })
    });
}

fn bench_dsatur(c: &mut Criterion) {
    let repo = medium_repository();
    let config = EngineConfig::default();
    let snapshot = repo.snapshot("fall-2026", None);

    c.bench_function("dsatur_generate_medium", |b| {
        b.iter(|| {
            let result = generate_coloring(black_box(&config), black_box(&snapshot), ColoringAlgorithm::Dsatur, "fall-2026", "2026").unwrap();
            black_box(result.schedule.len())
        })
    });
}

criterion_group!(benches, bench_greedy, bench_dsatur);
criterion_main!(benches);
