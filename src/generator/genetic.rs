//! Genetic optimizer: a chromosome is one gene per `(course, group,
//! frequency-index)` triple; fitness penalizes hard and soft conflicts plus
//! day/teacher workload imbalance.

use crate::error::Result;
use crate::kernel::{check_conflicts, CandidateEntities, CandidatePlacement, Conflict};
use crate::repository::InMemoryRepository;
use crate::types::{
    time, ClassroomId, CourseId, Day, EngineConfig, EntityNames, EntitySnapshot, EntryId, StudentGroupId, TeacherId,
    TimetableEntry,
};
use itertools::Itertools;
use rand::prelude::*;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct Gene {
    pub course_id: CourseId,
    pub group_id: StudentGroupId,
    pub teacher_id: TeacherId,
    pub classroom_id: Option<ClassroomId>,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
}

pub type Chromosome = Vec<Gene>;

#[derive(Debug, Clone)]
struct SessionTemplate {
    course_id: CourseId,
    group_id: StudentGroupId,
    teacher_id: TeacherId,
    duration: u32,
    required_capacity: u32,
}

#[derive(Debug, Clone)]
pub struct GeneticParams {
    pub population_size: usize,
    pub max_generations: u32,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_rate: f64,
    pub seed: Option<u64>,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elitism_rate: 0.1,
            seed: None,
        }
    }
}

/// Reduced parameters the comparator runs the genetic optimizer with.
impl GeneticParams {
    pub fn reduced() -> Self {
        Self {
            population_size: 20,
            max_generations: 30,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct FitnessBreakdown {
    pub fitness: f64,
    pub conflicts: usize,
    pub hard: usize,
    pub soft: usize,
}

#[derive(Debug, Clone)]
pub struct GeneticMetadata {
    pub algorithm: String,
    pub generations: u32,
    pub population_size: usize,
}

#[derive(Debug, Clone)]
pub struct GeneticResult {
    pub schedule: Chromosome,
    pub fitness: FitnessBreakdown,
    pub metadata: GeneticMetadata,
}

fn session_templates(snapshot: &EntitySnapshot) -> Vec<SessionTemplate> {
    let mut templates = Vec::new();
    for course in &snapshot.courses {
        for group_id in &course.student_group_ids {
            let Some(group) = snapshot.student_group(group_id) else {
                continue;
            };
            for _ in 0..course.frequency {
                templates.push(SessionTemplate {
                    course_id: course.id.clone(),
                    group_id: group.id.clone(),
                    teacher_id: course.teacher_id.clone(),
                    duration: course.duration,
                    required_capacity: group.size,
                });
            }
        }
    }
    templates
}

fn qualifying_classrooms<'a>(snapshot: &'a EntitySnapshot, required_capacity: u32) -> Vec<&'a ClassroomId> {
    snapshot
        .classrooms
        .iter()
        .filter(|r| r.fits(required_capacity))
        .map(|r| &r.id)
        .collect()
}

fn random_gene(template: &SessionTemplate, config: &EngineConfig, snapshot: &EntitySnapshot, rng: &mut StdRng) -> Result<Gene> {
    let day = *Day::ALL.choose(rng).expect("Day::ALL is non-empty");
    let slots = time::generate_slots(&config.slot_start, &config.slot_end, config.slot_step, template.duration)?;
    let start = slots
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| config.slot_start.clone());
    let end = time::end_of(&start, template.duration)?;

    let candidates = qualifying_classrooms(snapshot, template.required_capacity);
    let classroom_id = candidates.choose(rng).map(|id| (*id).clone());

    Ok(Gene {
        course_id: template.course_id.clone(),
        group_id: template.group_id.clone(),
        teacher_id: template.teacher_id.clone(),
        classroom_id,
        day,
        start_time: start,
        end_time: end,
        duration: template.duration,
    })
}

fn random_chromosome(templates: &[SessionTemplate], config: &EngineConfig, snapshot: &EntitySnapshot, rng: &mut StdRng) -> Result<Chromosome> {
    templates.iter().map(|t| random_gene(t, config, snapshot, rng)).collect()
}

fn gene_to_entry(gene: &Gene, index: usize) -> Option<TimetableEntry> {
    stamped_gene_to_entry(gene, index, "", "")
}

fn stamped_gene_to_entry(gene: &Gene, index: usize, semester: &str, academic_year: &str) -> Option<TimetableEntry> {
    let classroom_id = gene.classroom_id.clone()?;
    Some(TimetableEntry {
        id: EntryId(format!("ga-{index}")),
        course_id: gene.course_id.clone(),
        student_group_id: gene.group_id.clone(),
        teacher_id: gene.teacher_id.clone(),
        classroom_id,
        day: gene.day,
        start_time: gene.start_time.clone(),
        end_time: gene.end_time.clone(),
        duration: gene.duration,
        week_number: 1,
        semester: semester.to_string(),
        academic_year: academic_year.to_string(),
    })
}

/// Convert a finished chromosome into persisted entries, dropping genes that
/// never received a classroom (counted as unscheduled by the caller instead).
pub fn chromosome_to_entries(chromosome: &Chromosome, semester: &str, academic_year: &str) -> Vec<TimetableEntry> {
    chromosome
        .iter()
        .enumerate()
        .filter_map(|(i, gene)| stamped_gene_to_entry(gene, i, semester, academic_year))
        .collect()
}

fn stddev(counts: impl Iterator<Item = usize>) -> f64 {
    let values: Vec<f64> = counts.map(|c| c as f64).collect();
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Evaluate one chromosome's fitness (lower is better).
fn evaluate_fitness(
    chromosome: &Chromosome,
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    empty_repo: &InMemoryRepository,
    names: &EntityNames,
) -> Result<FitnessBreakdown> {
    let mut hard = 0usize;
    let mut soft = 0usize;
    let mut total_conflicts = 0usize;

    for (i, gene) in chromosome.iter().enumerate() {
        let Some(classroom_id) = gene.classroom_id.clone() else {
            hard += 1;
            total_conflicts += 1;
            continue;
        };

        let pending: Vec<TimetableEntry> = chromosome
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .filter_map(|(j, g)| gene_to_entry(g, j))
            .collect();

        let candidate = CandidatePlacement {
            course_id: gene.course_id.clone(),
            student_group_id: gene.group_id.clone(),
            teacher_id: gene.teacher_id.clone(),
            classroom_id,
            day: gene.day,
            start_time: gene.start_time.clone(),
            end_time: gene.end_time.clone(),
            exclude_entry_id: None,
        };
        let entities = CandidateEntities {
            teacher: snapshot.teacher(&gene.teacher_id),
            classroom: snapshot.classroom(&candidate.classroom_id),
            student_group: snapshot.student_group(&gene.group_id),
        };

        let conflicts: Vec<Conflict> = check_conflicts(empty_repo, config, names, &candidate, &pending, &entities)?;
        total_conflicts += conflicts.len();
        for conflict in &conflicts {
            if conflict.kind.is_hard() {
                hard += 1;
            } else {
                soft += 1;
            }
        }
    }

    let day_variance = stddev(Day::ALL.iter().map(|d| chromosome.iter().filter(|g| g.day == *d).count()));

    let teacher_counts = chromosome.iter().map(|g| g.teacher_id.clone()).counts();
    let teacher_variance = stddev(teacher_counts.values().copied());

    let fitness =
        1000.0 * hard as f64 + 100.0 * soft as f64 + 10.0 * day_variance + 5.0 * teacher_variance;

    Ok(FitnessBreakdown {
        fitness,
        conflicts: total_conflicts,
        hard,
        soft,
    })
}

fn tournament_select<'a>(population: &'a [Chromosome], fitness: &[f64], rng: &mut StdRng) -> &'a Chromosome {
    let mut best_idx = (0..population.len()).choose(rng).unwrap_or(0);
    for _ in 0..2 {
        let idx = (0..population.len()).choose(rng).unwrap_or(0);
        if fitness[idx] < fitness[best_idx] {
            best_idx = idx;
        }
    }
    &population[best_idx]
}

fn crossover(parent1: &Chromosome, parent2: &Chromosome, rate: f64, rng: &mut StdRng) -> (Chromosome, Chromosome) {
    if rng.random::<f64>() >= rate {
        return (parent1.clone(), parent2.clone());
    }
    let bound = parent1.len().min(parent2.len());
    if bound == 0 {
        return (parent1.clone(), parent2.clone());
    }
    let cut = rng.random_range(0..bound);
    let mut child1 = parent1[..cut].to_vec();
    child1.extend_from_slice(&parent2[cut..]);
    let mut child2 = parent2[..cut].to_vec();
    child2.extend_from_slice(&parent1[cut..]);
    (child1, child2)
}

fn mutate(
    chromosome: &mut Chromosome,
    templates: &[SessionTemplate],
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    rate: f64,
    rng: &mut StdRng,
) -> Result<()> {
    for (gene, template) in chromosome.iter_mut().zip(templates.iter()) {
        if rng.random::<f64>() >= rate {
            continue;
        }
        match rng.random_range(0..3) {
            0 => {
                let slots =
                    time::generate_slots(&config.slot_start, &config.slot_end, config.slot_step, gene.duration)?;
                if let Some(start) = slots.choose(rng) {
                    gene.start_time = start.clone();
                    gene.end_time = time::end_of(start, gene.duration)?;
                }
            }
            1 => {
                gene.day = *Day::ALL.choose(rng).expect("Day::ALL is non-empty");
            }
            _ => {
                let candidates = qualifying_classrooms(snapshot, template.required_capacity);
                gene.classroom_id = candidates.choose(rng).map(|id| (*id).clone());
            }
        }
    }
    Ok(())
}

/// Run the generational genetic loop over `snapshot`'s active entities.
pub fn generate_genetic(config: &EngineConfig, snapshot: &EntitySnapshot, params: &GeneticParams) -> Result<GeneticResult> {
    let templates = session_templates(snapshot);
    let empty_repo = InMemoryRepository::default();
    let names = snapshot.names();

    let seed = params.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut population: Vec<Chromosome> = (0..params.population_size)
        .map(|_| random_chromosome(&templates, config, snapshot, &mut rng))
        .collect::<Result<Vec<_>>>()?;

    let mut best: Option<(Chromosome, FitnessBreakdown)> = None;
    let mut generations_without_improvement = 0u32;
    let mut generations_run = 0u32;

    for generation in 0..params.max_generations {
        generations_run = generation + 1;

        let fitness_values: Vec<FitnessBreakdown> = population
            .iter()
            .map(|c| evaluate_fitness(c, config, snapshot, &empty_repo, &names))
            .collect::<Result<Vec<_>>>()?;
        let fitness_scores: Vec<f64> = fitness_values.iter().map(|f| f.fitness).collect();

        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_by(|&a, &b| fitness_scores[a].partial_cmp(&fitness_scores[b]).unwrap());

        let current_best_idx = ranked[0];
        let improved = best
            .as_ref()
            .map(|(_, f)| fitness_scores[current_best_idx] < f.fitness)
            .unwrap_or(true);

        if improved {
            best = Some((population[current_best_idx].clone(), fitness_values[current_best_idx].clone()));
            generations_without_improvement = 0;
        } else {
            generations_without_improvement += 1;
        }

        let best_fitness = best.as_ref().map(|(_, f)| f.fitness).unwrap_or(f64::MAX);
        if generations_without_improvement >= 20 && best_fitness < 100.0 {
            break;
        }

        let elite_count = ((population.len() as f64) * params.elitism_rate).floor() as usize;
        let mut next_generation: Vec<Chromosome> = ranked[..elite_count.min(ranked.len())]
            .iter()
            .map(|&idx| population[idx].clone())
            .collect();

        while next_generation.len() < population.len() {
            let parent1 = tournament_select(&population, &fitness_scores, &mut rng).clone();
            let parent2 = tournament_select(&population, &fitness_scores, &mut rng).clone();
            let (mut child1, mut child2) = crossover(&parent1, &parent2, params.crossover_rate, &mut rng);
            mutate(&mut child1, &templates, config, snapshot, params.mutation_rate, &mut rng)?;
            mutate(&mut child2, &templates, config, snapshot, params.mutation_rate, &mut rng)?;
            next_generation.push(child1);
            if next_generation.len() < population.len() {
                next_generation.push(child2);
            }
        }

        population = next_generation;
    }

    let (schedule, fitness) = match best {
        Some(pair) => pair,
        None => {
            let chromosome = population.into_iter().next().unwrap_or_default();
            let fitness = evaluate_fitness(&chromosome, config, snapshot, &empty_repo, &names)?;
            (chromosome, fitness)
        }
    };

    Ok(GeneticResult {
        schedule,
        fitness,
        metadata: GeneticMetadata {
            algorithm: "genetic".to_string(),
            generations: generations_run,
            population_size: params.population_size,
        },
    })
}
