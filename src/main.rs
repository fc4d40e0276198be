use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use timetable_engine::generator::coloring::{generate_coloring, ColoringAlgorithm};
use timetable_engine::generator::comparator::compare_algorithms;
use timetable_engine::generator::genetic::{chromosome_to_entries, generate_genetic, GeneticParams};
use timetable_engine::generator::greedy::generate_greedy;
use timetable_engine::kernel::{check_conflicts, CandidateEntities, CandidatePlacement};
use timetable_engine::parser::{load_input_from_dir, validate_input};
use timetable_engine::repository::TimetableRepository;
use timetable_engine::reporter::{
    generate_group_schedule, generate_json_summary, generate_teacher_schedule, print_summary,
    render_comparison, write_schedule_reports, OutputFormat,
};
use timetable_engine::types::{
    time, ClassroomId, CourseId, Day, EntityNames, StudentGroupId, TeacherId, TimetableEntry,
};

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "Conflict-free academic timetable scheduling engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single candidate placement against the conflict kernel (does not persist it)
    Check {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        course: String,
        #[arg(long)]
        group: String,
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        classroom: String,
        #[arg(long)]
        day: String,
        #[arg(long = "start")]
        start_time: String,
        #[arg(long, default_value_t = 60)]
        duration: u32,
    },

    /// List persisted timetable entries from a loaded data set, optionally filtered
    List {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        classroom: Option<String>,
    },

    /// Generate a schedule with the deterministic greedy first-fit generator
    Generate {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        semester: String,
        #[arg(long = "academic-year")]
        academic_year: String,
        #[arg(long)]
        department: Option<String>,
        /// Print the conflicts behind each unscheduled session
        #[arg(long)]
        debug: bool,
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
        /// json, markdown, text, all, or a comma-separated list
        #[arg(short, long, default_value = "all")]
        format: String,
        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a schedule with the genetic optimizer
    GenerateGenetic {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        semester: String,
        #[arg(long = "academic-year")]
        academic_year: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long = "population-size", default_value_t = 50)]
        population_size: usize,
        #[arg(long = "max-generations", default_value_t = 100)]
        max_generations: u32,
        #[arg(long = "mutation-rate", default_value_t = 0.1)]
        mutation_rate: f64,
        #[arg(long = "crossover-rate", default_value_t = 0.8)]
        crossover_rate: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
        #[arg(short, long, default_value = "all")]
        format: String,
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a schedule with a graph-coloring generator
    GenerateGraphColoring {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        semester: String,
        #[arg(long = "academic-year")]
        academic_year: String,
        #[arg(long)]
        department: Option<String>,
        /// dsatur or welsh-powell
        #[arg(long, default_value = "dsatur")]
        algorithm: String,
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
        #[arg(short, long, default_value = "all")]
        format: String,
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run all three generation strategies over the same input and report side by side
    Compare {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        semester: String,
        #[arg(long = "academic-year")]
        academic_year: String,
        #[arg(long)]
        department: Option<String>,
    },

    /// Generate the bundled sample data set and run the greedy generator over it
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            data,
            course,
            group,
            teacher,
            classroom,
            day,
            start_time,
            duration,
        } => run_check(&data, &course, &group, &teacher, &classroom, &day, &start_time, duration),
        Commands::List {
            data,
            day,
            course,
            group,
            teacher,
            classroom,
        } => run_list(&data, day, course, group, teacher, classroom),
        Commands::Generate {
            data,
            semester,
            academic_year,
            department,
            debug,
            output,
            format,
            quiet,
        } => run_generate(&data, &semester, &academic_year, department.as_deref(), debug, &output, &format, quiet),
        Commands::GenerateGenetic {
            data,
            semester,
            academic_year,
            department,
            population_size,
            max_generations,
            mutation_rate,
            crossover_rate,
            seed,
            output,
            format,
            quiet,
        } => run_generate_genetic(
            &data,
            &semester,
            &academic_year,
            department.as_deref(),
            population_size,
            max_generations,
            mutation_rate,
            crossover_rate,
            seed,
            &output,
            &format,
            quiet,
        ),
        Commands::GenerateGraphColoring {
            data,
            semester,
            academic_year,
            department,
            algorithm,
            output,
            format,
            quiet,
        } => run_generate_coloring(&data, &semester, &academic_year, department.as_deref(), &algorithm, &output, &format, quiet),
        Commands::Compare {
            data,
            semester,
            academic_year,
            department,
        } => run_compare(&data, &semester, &academic_year, department.as_deref()),
        Commands::Demo => run_demo(),
    }
}

fn parse_day(s: &str) -> Result<Day> {
    match s.to_lowercase().as_str() {
        "monday" | "mon" => Ok(Day::Monday),
        "tuesday" | "tue" => Ok(Day::Tuesday),
        "wednesday" | "wed" => Ok(Day::Wednesday),
        "thursday" | "thu" => Ok(Day::Thursday),
        "friday" | "fri" => Ok(Day::Friday),
        "saturday" | "sat" => Ok(Day::Saturday),
        other => anyhow::bail!("unknown day '{other}' (expected monday..saturday)"),
    }
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format.eq_ignore_ascii_case("all") {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    data: &PathBuf,
    course: &str,
    group: &str,
    teacher: &str,
    classroom: &str,
    day: &str,
    start_time: &str,
    duration: u32,
) -> Result<()> {
    let (repo, config) = load_input_from_dir(data).context("failed to load input data")?;
    let day = parse_day(day)?;
    let end_time = time::end_of(start_time, duration)?;

    let course_id = CourseId(course.to_string());
    let group_id = StudentGroupId(group.to_string());
    let teacher_id = TeacherId(teacher.to_string());
    let classroom_id = ClassroomId(classroom.to_string());

    let names = EntityNames::from_snapshot(&repo.courses, &repo.teachers, &repo.classrooms, &repo.student_groups);

    let candidate = CandidatePlacement {
        course_id: course_id.clone(),
        student_group_id: group_id.clone(),
        teacher_id: teacher_id.clone(),
        classroom_id: classroom_id.clone(),
        day,
        start_time: start_time.to_string(),
        end_time,
        exclude_entry_id: None,
    };
    let entities = CandidateEntities {
        teacher: repo.teachers.iter().find(|t| t.id == teacher_id),
        classroom: repo.classrooms.iter().find(|r| r.id == classroom_id),
        student_group: repo.student_groups.iter().find(|g| g.id == group_id),
    };

    let conflicts = check_conflicts(&repo, &config, &names, &candidate, &[], &entities)?;

    if conflicts.is_empty() {
        println!("{}", "\u{2713} Placement is admissible".green().bold());
    } else {
        println!("{}", "\u{2717} Placement conflicts:".red().bold());
        for conflict in &conflicts {
            println!("  - [{:?}] {}", conflict.kind, conflict.message);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_list(
    data: &PathBuf,
    day: Option<String>,
    course: Option<String>,
    group: Option<String>,
    teacher: Option<String>,
    classroom: Option<String>,
) -> Result<()> {
    let (repo, _config) = load_input_from_dir(data).context("failed to load input data")?;
    let names = EntityNames::from_snapshot(&repo.courses, &repo.teachers, &repo.classrooms, &repo.student_groups);

    let only_filter = day.is_none() && course.is_none() && classroom.is_none();
    if only_filter {
        if let Some(group_id) = &group {
            if teacher.is_none() {
                return print_entity_schedule(
                    generate_group_schedule(&repo.entries, &names, &StudentGroupId(group_id.clone())),
                    "student group",
                    group_id,
                );
            }
        }
        if let Some(teacher_id) = &teacher {
            if group.is_none() {
                return print_entity_schedule(
                    generate_teacher_schedule(&repo.entries, &names, &TeacherId(teacher_id.clone())),
                    "teacher",
                    teacher_id,
                );
            }
        }
    }

    let day_filter = day.as_deref().map(parse_day).transpose()?;
    let mut entries: Vec<&TimetableEntry> = repo
        .entries
        .iter()
        .filter(|e| day_filter.map(|d| e.day == d).unwrap_or(true))
        .filter(|e| course.as_deref().map(|c| e.course_id.0 == c).unwrap_or(true))
        .filter(|e| group.as_deref().map(|g| e.student_group_id.0 == g).unwrap_or(true))
        .filter(|e| teacher.as_deref().map(|t| e.teacher_id.0 == t).unwrap_or(true))
        .filter(|e| classroom.as_deref().map(|r| e.classroom_id.0 == r).unwrap_or(true))
        .collect();
    entries.sort_by_key(|e| (Day::ALL.iter().position(|d| *d == e.day).unwrap_or(usize::MAX), e.start_time.clone()));

    if entries.is_empty() {
        println!("No matching timetable entries");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{:<10} {}-{} | {} | {} | {} | {}",
            entry.day.name(),
            entry.start_time,
            entry.end_time,
            names.course(&entry.course_id),
            names.student_group(&entry.student_group_id),
            names.teacher(&entry.teacher_id),
            names.classroom(&entry.classroom_id),
        );
    }

    Ok(())
}

fn print_entity_schedule(report: Option<String>, label: &str, id: &str) -> Result<()> {
    match report {
        Some(text) => println!("{text}"),
        None => println!("No entries found for {label} '{id}'"),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    data: &PathBuf,
    semester: &str,
    academic_year: &str,
    department: Option<&str>,
    debug: bool,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let (repo, mut config) = load_input_from_dir(data).context("failed to load input data")?;
    if debug {
        config.debug = true;
    }

    let validation = validate_input(&repo)?;
    if !quiet {
        for warning in &validation.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
    }

    let snapshot = repo.snapshot(semester, department);
    if !quiet {
        println!(
            "Loaded {} courses, {} teachers, {} classrooms, {} student groups",
            snapshot.courses.len(),
            snapshot.teachers.len(),
            snapshot.classrooms.len(),
            snapshot.student_groups.len()
        );
        println!("\nRunning greedy generator...\n");
    }

    let result = generate_greedy(&repo, &config, &snapshot, semester, academic_year)?;
    let names = snapshot.names();

    if config.debug {
        for unscheduled in &result.unscheduled {
            println!(
                "{} {} / {}: {} conflict(s) at last attempted slot",
                "unscheduled:".yellow(),
                names.course(&unscheduled.course_id),
                names.student_group(&unscheduled.student_group_id),
                unscheduled.last_conflicts.len()
            );
            for conflict in &unscheduled.last_conflicts {
                println!("    - [{:?}] {}", conflict.kind, conflict.message);
            }
        }
    }

    let formats = parse_formats(format);
    write_schedule_reports("greedy", &result.placed, &names, result.unscheduled.len(), output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary("greedy", result.placed.len(), result.unscheduled.len())?);
    } else {
        print_summary("greedy", result.placed.len(), result.unscheduled.len());
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_generate_genetic(
    data: &PathBuf,
    semester: &str,
    academic_year: &str,
    department: Option<&str>,
    population_size: usize,
    max_generations: u32,
    mutation_rate: f64,
    crossover_rate: f64,
    seed: Option<u64>,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let (repo, config) = load_input_from_dir(data).context("failed to load input data")?;
    let validation = validate_input(&repo)?;
    if !quiet {
        for warning in &validation.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
    }

    let snapshot = repo.snapshot(semester, department);
    let names = snapshot.names();

    let params = GeneticParams {
        population_size,
        max_generations,
        mutation_rate,
        crossover_rate,
        seed,
        ..GeneticParams::default()
    };

    if !quiet {
        println!(
            "Running genetic optimizer (population_size={}, max_generations={})...\n",
            params.population_size, params.max_generations
        );
    }

    let result = generate_genetic(&config, &snapshot, &params)?;
    let entries = chromosome_to_entries(&result.schedule, semester, academic_year);
    let unscheduled = result.schedule.len() - entries.len();

    let formats = parse_formats(format);
    write_schedule_reports("genetic", &entries, &names, unscheduled, output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary("genetic", entries.len(), unscheduled)?);
    } else {
        print_summary("genetic", entries.len(), unscheduled);
        println!(
            "  Fitness: {:.1} (hard={}, soft={}), generations run: {}",
            result.fitness.fitness, result.fitness.hard, result.fitness.soft, result.metadata.generations
        );
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_generate_coloring(
    data: &PathBuf,
    semester: &str,
    academic_year: &str,
    department: Option<&str>,
    algorithm: &str,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let (repo, config) = load_input_from_dir(data).context("failed to load input data")?;
    let validation = validate_input(&repo)?;
    if !quiet {
        for warning in &validation.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
    }

    let (algo, algo_name) = match algorithm.to_lowercase().replace('_', "-").as_str() {
        "dsatur" => (ColoringAlgorithm::Dsatur, "dsatur"),
        "welsh-powell" => (ColoringAlgorithm::WelshPowell, "welsh-powell"),
        other => anyhow::bail!("unknown graph-coloring algorithm '{other}' (expected dsatur or welsh-powell)"),
    };

    let snapshot = repo.snapshot(semester, department);
    let names = snapshot.names();

    if !quiet {
        println!("Running graph-coloring generator ({algo_name})...\n");
    }

    let result = generate_coloring(&config, &snapshot, algo, semester, academic_year)?;

    let formats = parse_formats(format);
    write_schedule_reports(algo_name, &result.schedule, &names, result.unscheduled.len(), output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary(algo_name, result.total_slots, result.unscheduled.len())?);
    } else {
        print_summary(algo_name, result.total_slots, result.unscheduled.len());
        println!(
            "  total_nodes={} total_edges={} colors_used={}",
            result.metadata.total_nodes, result.metadata.total_edges, result.metadata.colors_used
        );
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_compare(data: &PathBuf, semester: &str, academic_year: &str, department: Option<&str>) -> Result<()> {
    let (repo, config) = load_input_from_dir(data).context("failed to load input data")?;
    validate_input(&repo)?;
    let snapshot = repo.snapshot(semester, department);

    println!("{}", "Algorithm comparison".bold().cyan());
    println!("{}", "\u{2500}".repeat(40));

    let outcomes = compare_algorithms(&config, &snapshot, semester, academic_year);
    println!("{}", render_comparison(&outcomes));

    Ok(())
}

fn run_demo() -> Result<()> {
    println!("{}", "Timetable Engine Demo".bold().cyan());
    println!("{}", "\u{2500}".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    let output_path = PathBuf::from("output");

    if !demo_path.join("courses.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    println!("Loading demo data from: {}", demo_path.display());
    let (repo, config) = load_input_from_dir(&demo_path).context("failed to load demo data")?;

    let validation = validate_input(&repo)?;
    for warning in &validation.warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }

    let semester = "fall-2026";
    let academic_year = "2026";
    let snapshot = repo.snapshot(semester, None);
    println!(
        "Loaded {} courses, {} teachers, {} classrooms, {} student groups",
        snapshot.courses.len(),
        snapshot.teachers.len(),
        snapshot.classrooms.len(),
        snapshot.student_groups.len()
    );

    println!("\nGenerating schedule with the greedy generator...\n");
    let result = generate_greedy(&repo, &config, &snapshot, semester, academic_year)?;
    let names = snapshot.names();

    print_summary("greedy", result.placed.len(), result.unscheduled.len());

    write_schedule_reports(
        "greedy",
        &result.placed,
        &names,
        result.unscheduled.len(),
        &output_path,
        &[OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text],
    )?;

    println!("Reports written to: {}", output_path.display().to_string().green());

    Ok(())
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let teachers = serde_json::json!([
        {"id": "t-math", "name": "Dr. Nguyen"},
        {"id": "t-eng", "name": "Ms. Alvarez"},
        {"id": "t-sci", "name": "Dr. Okafor"},
        {"id": "t-art", "name": "Mr. Dubois"}
    ]);
    std::fs::write(path.join("teachers.json"), serde_json::to_string_pretty(&teachers)?)?;

    let classrooms = serde_json::json!([
        {"id": "r-101", "name": "Room 101", "capacity": 30},
        {"id": "r-102", "name": "Room 102", "capacity": 28},
        {"id": "r-lab", "name": "Science Lab", "capacity": 24},
        {"id": "r-studio", "name": "Art Studio", "capacity": 20}
    ]);
    std::fs::write(path.join("classrooms.json"), serde_json::to_string_pretty(&classrooms)?)?;

    let student_groups = serde_json::json!([
        {"id": "g-10a", "name": "Grade 10 - A", "size": 26, "semester": "fall-2026"},
        {"id": "g-10b", "name": "Grade 10 - B", "size": 24, "semester": "fall-2026"},
        {"id": "g-11a", "name": "Grade 11 - A", "size": 22, "semester": "fall-2026"}
    ]);
    std::fs::write(path.join("student_groups.json"), serde_json::to_string_pretty(&student_groups)?)?;

    let courses = serde_json::json!([
        {"id": "c-math10", "name": "Algebra II", "duration": 60, "frequency": 4, "teacher_id": "t-math", "student_group_ids": ["g-10a", "g-10b"], "semester": "fall-2026"},
        {"id": "c-eng10", "name": "English 10", "duration": 60, "frequency": 3, "teacher_id": "t-eng", "student_group_ids": ["g-10a", "g-10b"], "semester": "fall-2026"},
        {"id": "c-sci10", "name": "Biology", "duration": 90, "frequency": 2, "teacher_id": "t-sci", "student_group_ids": ["g-10a"], "semester": "fall-2026"},
        {"id": "c-math11", "name": "Pre-Calculus", "duration": 60, "frequency": 4, "teacher_id": "t-math", "student_group_ids": ["g-11a"], "semester": "fall-2026"},
        {"id": "c-art", "name": "Studio Art", "duration": 60, "frequency": 2, "teacher_id": "t-art", "student_group_ids": ["g-10a", "g-11a"], "semester": "fall-2026"}
    ]);
    std::fs::write(path.join("courses.json"), serde_json::to_string_pretty(&courses)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
