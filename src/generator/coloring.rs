//! Graph-coloring generator: Welsh-Powell and DSATUR share a graph
//! construction and a classroom-assignment pass; only the vertex ordering
//! strategy differs between them.

use crate::error::Result;
use crate::types::{
    time, within_availability, ClassroomId, CourseId, Day, EngineConfig, EntitySnapshot, EntryId,
    StudentGroupId, TeacherId, TimetableEntry,
};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringAlgorithm {
    WelshPowell,
    Dsatur,
}

#[derive(Debug, Clone)]
struct Node {
    course_id: CourseId,
    group_id: StudentGroupId,
    teacher_id: TeacherId,
    duration: u32,
    required_capacity: u32,
}

#[derive(Debug, Clone, Copy)]
struct Color {
    day: Day,
    start: usize,
}

#[derive(Debug, Clone)]
pub struct UnscheduledNode {
    pub course_id: CourseId,
    pub group_id: StudentGroupId,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ColoringMetadata {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub colors_used: usize,
}

#[derive(Debug, Clone)]
pub struct ColoringResult {
    pub schedule: Vec<TimetableEntry>,
    pub total_slots: usize,
    pub unscheduled: Vec<UnscheduledNode>,
    pub metadata: ColoringMetadata,
}

fn build_nodes(snapshot: &EntitySnapshot) -> Vec<Node> {
    let mut nodes = Vec::new();
    for course in &snapshot.courses {
        for group_id in &course.student_group_ids {
            let Some(group) = snapshot.student_group(group_id) else {
                continue;
            };
            for _ in 0..course.frequency {
                nodes.push(Node {
                    course_id: course.id.clone(),
                    group_id: group.id.clone(),
                    teacher_id: course.teacher_id.clone(),
                    duration: course.duration,
                    required_capacity: group.size,
                });
            }
        }
    }
    nodes
}

fn build_adjacency(nodes: &[Node]) -> Vec<HashSet<usize>> {
    let mut adjacency = vec![HashSet::new(); nodes.len()];
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let shares = nodes[i].teacher_id == nodes[j].teacher_id
                || nodes[i].group_id == nodes[j].group_id
                || nodes[i].course_id == nodes[j].course_id;
            if shares {
                adjacency[i].insert(j);
                adjacency[j].insert(i);
            }
        }
    }
    adjacency
}

fn raw_starts(config: &EngineConfig) -> Result<Vec<String>> {
    time::generate_slots(&config.slot_start, &config.slot_end, config.slot_step, 0)
}

fn build_colors(config: &EngineConfig) -> Result<Vec<Color>> {
    let starts = raw_starts(config)?;
    let mut colors = Vec::with_capacity(Day::ALL.len() * starts.len());
    for day in Day::ALL {
        for start in 0..starts.len() {
            colors.push(Color { day, start });
        }
    }
    Ok(colors)
}

/// Whether `node` can legally occupy `color`: the slot fits its duration, at
/// least one classroom meets its capacity, and teacher/group availability
/// both pass for the derived `(day, start, end)` window.
fn color_is_feasible(
    node: &Node,
    color: &Color,
    starts: &[String],
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
) -> Result<bool> {
    let start = &starts[color.start];
    let start_min = time::to_minutes(start)?;
    let slot_end_min = time::to_minutes(&config.slot_end)?;
    if start_min + node.duration > slot_end_min {
        return Ok(false);
    }
    let end = time::end_of(start, node.duration)?;

    let teacher = snapshot.teacher(&node.teacher_id);
    if !within_availability(teacher, color.day, start, &end)? {
        return Ok(false);
    }
    let group = snapshot.student_group(&node.group_id);
    if !within_availability(group, color.day, start, &end)? {
        return Ok(false);
    }

    let any_classroom_fits = snapshot.classrooms.iter().any(|room| {
        room.fits(node.required_capacity)
            && within_availability(Some(room), color.day, start, &end).unwrap_or(false)
    });

    Ok(any_classroom_fits)
}

fn lowest_feasible_color(
    node_idx: usize,
    nodes: &[Node],
    adjacency: &[HashSet<usize>],
    assigned: &[Option<usize>],
    colors: &[Color],
    starts: &[String],
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
) -> Result<Option<usize>> {
    let used_by_neighbors: HashSet<usize> = adjacency[node_idx]
        .iter()
        .filter_map(|&n| assigned[n])
        .collect();

    for (color_idx, color) in colors.iter().enumerate() {
        if used_by_neighbors.contains(&color_idx) {
            continue;
        }
        if color_is_feasible(&nodes[node_idx], color, starts, config, snapshot)? {
            return Ok(Some(color_idx));
        }
    }
    Ok(None)
}

fn welsh_powell_order(nodes: &[Node], adjacency: &[HashSet<usize>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| adjacency[b].len().cmp(&adjacency[a].len()).then(a.cmp(&b)));
    order
}

fn color_welsh_powell(
    nodes: &[Node],
    adjacency: &[HashSet<usize>],
    colors: &[Color],
    starts: &[String],
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
) -> Result<Vec<Option<usize>>> {
    let mut assigned: Vec<Option<usize>> = vec![None; nodes.len()];
    for node_idx in welsh_powell_order(nodes, adjacency) {
        assigned[node_idx] =
            lowest_feasible_color(node_idx, nodes, adjacency, &assigned, colors, starts, config, snapshot)?;
    }
    Ok(assigned)
}

fn color_dsatur(
    nodes: &[Node],
    adjacency: &[HashSet<usize>],
    colors: &[Color],
    starts: &[String],
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
) -> Result<Vec<Option<usize>>> {
    let mut assigned: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut remaining: HashSet<usize> = (0..nodes.len()).collect();

    while let Some(&next) = remaining.iter().min_by(|&&a, &&b| {
        let sat_a = saturation(a, adjacency, &assigned);
        let sat_b = saturation(b, adjacency, &assigned);
        sat_b
            .cmp(&sat_a)
            .then(adjacency[b].len().cmp(&adjacency[a].len()))
            .then(a.cmp(&b))
    }) {
        assigned[next] =
            lowest_feasible_color(next, nodes, adjacency, &assigned, colors, starts, config, snapshot)?;
        remaining.remove(&next);
    }
    Ok(assigned)
}

fn saturation(node_idx: usize, adjacency: &[HashSet<usize>], assigned: &[Option<usize>]) -> usize {
    adjacency[node_idx]
        .iter()
        .filter_map(|&n| assigned[n])
        .collect::<HashSet<_>>()
        .len()
}

/// Assign a classroom to each colored node, in node-index order, tracking the
/// `(classroom, day, start)` keys already claimed within this pass.
fn assign_classrooms(
    nodes: &[Node],
    assigned_colors: &[Option<usize>],
    colors: &[Color],
    starts: &[String],
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    semester: &str,
    academic_year: &str,
) -> Result<(Vec<TimetableEntry>, Vec<UnscheduledNode>)> {
    let mut used_keys: HashSet<(ClassroomId, Day, String)> = HashSet::new();
    let mut schedule = Vec::new();
    let mut unscheduled = Vec::new();
    let mut next_id: u64 = 0;

    for (idx, node) in nodes.iter().enumerate() {
        let Some(color_idx) = assigned_colors[idx] else {
            unscheduled.push(UnscheduledNode {
                course_id: node.course_id.clone(),
                group_id: node.group_id.clone(),
                reason: "no feasible color found during coloring".to_string(),
            });
            continue;
        };
        let color = colors[color_idx];
        let start = &starts[color.start];
        let end = time::end_of(start, node.duration)?;

        let classroom = snapshot.classrooms.iter().find(|room| {
            room.fits(node.required_capacity)
                && within_availability(Some(*room), color.day, start, &end).unwrap_or(false)
                && !used_keys.contains(&(room.id.clone(), color.day, start.clone()))
        });

        match classroom {
            Some(room) => {
                used_keys.insert((room.id.clone(), color.day, start.clone()));
                let entry = TimetableEntry::new(
                    EntryId(format!("coloring-{next_id}")),
                    node.course_id.clone(),
                    node.group_id.clone(),
                    node.teacher_id.clone(),
                    room.id.clone(),
                    color.day,
                    start.clone(),
                    node.duration,
                    1,
                    semester,
                    academic_year,
                )?;
                next_id += 1;
                schedule.push(entry);
            }
            None => unscheduled.push(UnscheduledNode {
                course_id: node.course_id.clone(),
                group_id: node.group_id.clone(),
                reason: "no classroom available for assigned color".to_string(),
            }),
        }
    }

    Ok((schedule, unscheduled))
}

pub fn generate_coloring(
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    algorithm: ColoringAlgorithm,
    semester: &str,
    academic_year: &str,
) -> Result<ColoringResult> {
    let nodes = build_nodes(snapshot);
    let adjacency = build_adjacency(&nodes);
    let total_edges = adjacency.iter().map(|s| s.len()).sum::<usize>() / 2;
    let colors = build_colors(config)?;
    let starts = raw_starts(config)?;

    let assigned_colors = match algorithm {
        ColoringAlgorithm::WelshPowell => {
            color_welsh_powell(&nodes, &adjacency, &colors, &starts, config, snapshot)?
        }
        ColoringAlgorithm::Dsatur => color_dsatur(&nodes, &adjacency, &colors, &starts, config, snapshot)?,
    };

    let colors_used = assigned_colors.iter().flatten().collect::<HashSet<_>>().len();
    let (schedule, mut unscheduled) =
        assign_classrooms(&nodes, &assigned_colors, &colors, &starts, config, snapshot, semester, academic_year)?;

    unscheduled.sort_by(|a, b| (a.course_id.to_string(), a.group_id.to_string()).cmp(&(b.course_id.to_string(), b.group_id.to_string())));

    let total_slots = schedule.len();
    Ok(ColoringResult {
        schedule,
        total_slots,
        unscheduled,
        metadata: ColoringMetadata {
            total_nodes: nodes.len(),
            total_edges,
            colors_used,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classroom, ClassroomId, Course, CourseId, StudentGroup, StudentGroupId, Teacher, TeacherId};

    fn snapshot() -> EntitySnapshot {
        let teacher1 = Teacher {
            id: TeacherId("t1".into()),
            name: "Dr. A".into(),
            role: "faculty".into(),
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            department: None,
        };
        let teacher2 = Teacher {
            id: TeacherId("t2".into()),
            name: "Dr. B".into(),
            role: "faculty".into(),
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            department: None,
        };
        let group = StudentGroup {
            id: StudentGroupId("g1".into()),
            name: "Group 1".into(),
            size: 20,
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
            semester: None,
            department: None,
        };
        let classroom = Classroom {
            id: ClassroomId("r1".into()),
            name: "Room 1".into(),
            capacity: 30,
            availability: Default::default(),
            blackout_periods: Default::default(),
            active: true,
        };
        let course1 = Course {
            id: CourseId("c1".into()),
            name: "Intro".into(),
            duration: 60,
            frequency: 1,
            teacher_id: TeacherId("t1".into()),
            student_group_ids: vec![StudentGroupId("g1".into())],
            active: true,
            semester: None,
            department: None,
        };
        let course2 = Course {
            id: CourseId("c2".into()),
            name: "Advanced".into(),
            duration: 60,
            frequency: 1,
            teacher_id: TeacherId("t2".into()),
            student_group_ids: vec![StudentGroupId("g1".into())],
            active: true,
            semester: None,
            department: None,
        };
        EntitySnapshot {
            courses: vec![course1, course2],
            classrooms: vec![classroom],
            student_groups: vec![group],
            teachers: vec![teacher1, teacher2],
        }
    }

    #[test]
    fn welsh_powell_colors_conflicting_sessions_differently() {
        let config = EngineConfig::default();
        let snap = snapshot();
        let result = generate_coloring(&config, &snap, ColoringAlgorithm::WelshPowell, "fall-2026", "2026").unwrap();
        assert_eq!(result.metadata.total_nodes, 2);
        assert_eq!(result.metadata.total_edges, 1); // same group edges c1<->c2
        assert_eq!(result.schedule.len(), 2);
        let (e1, e2) = (&result.schedule[0], &result.schedule[1]);
        assert!(e1.day != e2.day || e1.start_time != e2.start_time);
    }

    #[test]
    fn dsatur_produces_same_node_and_edge_counts() {
        let config = EngineConfig::default();
        let snap = snapshot();
        let result = generate_coloring(&config, &snap, ColoringAlgorithm::Dsatur, "fall-2026", "2026").unwrap();
        assert_eq!(result.metadata.total_nodes, 2);
        assert_eq!(result.schedule.len(), 2);
    }

    #[test]
    fn insufficient_capacity_yields_unscheduled_node() {
        let config = EngineConfig::default();
        let mut snap = snapshot();
        snap.student_groups[0].size = 999;
        let result = generate_coloring(&config, &snap, ColoringAlgorithm::WelshPowell, "fall-2026", "2026").unwrap();
        assert!(result.schedule.is_empty());
        assert_eq!(result.unscheduled.len(), 2);
    }
}
