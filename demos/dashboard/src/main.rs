//! Terminal stand-in for the GradPath dashboard.
//!
//! Renders the seeded profile card and course tables, then runs the three
//! advisor flows when `GEMINI_API_KEY` is configured. Without a key the AI
//! panels degrade to a "Not Configured" notice, mirroring the web UI.

use anyhow::Result;
use planner_adapters::gemini::{GeminiClient, GeminiConfig};
use planner_adapters::traits::TextGenerator;
use planner_flows::{electives, paths, prediction};
use planner_primitives::DashboardSeed;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let seed = DashboardSeed::sample();
    render_profile_card(&seed);
    render_course_tables(&seed);

    let config = GeminiConfig::from_env();
    if !config.is_configured() {
        println!("Gemini API: Not Configured");
        println!("Set GEMINI_API_KEY to enable the planning, elective, and prediction panels.");
        return Ok(());
    }
    println!("Gemini API: Active\n");

    let client = GeminiClient::new(config)?;
    run_advisor_panels(&client, &seed).await;

    Ok(())
}

fn render_profile_card(seed: &DashboardSeed) {
    let student = &seed.student;
    println!("=== {} ===", student.name);
    println!("{} | {}", student.email, student.major);
    println!(
        "Credits: {}/{} ({:.0}%) | GPA {} | Term: {}\n",
        student.completed_credits,
        student.total_credits,
        student.progress() * 100.0,
        student.gpa,
        student.current_term
    );
}

fn render_course_tables(seed: &DashboardSeed) {
    println!("--- Completed ({}) ---", seed.completed.len());
    for entry in &seed.completed {
        println!(
            "  {}  {} ({} cr, grade {})",
            entry.course.code, entry.course.name, entry.course.credits, entry.grade
        );
    }

    println!("--- Pending ({}) ---", seed.pending.len());
    for course in &seed.pending {
        println!("  {}  {} ({} cr)", course.code, course.name, course.credits);
    }
    println!();
}

async fn run_advisor_panels(generator: &dyn TextGenerator, seed: &DashboardSeed) {
    println!("--- Optimal Path ---");
    let request = paths::PathRequest::new(
        seed.completed_codes(),
        seed.pending_codes(),
        "Fall 2025",
    )
    .with_student_profile("Student interested in AI and machine learning, with strong programming skills.");

    match paths::flow().run(generator, &request).await {
        Ok(plan) => {
            for course in &plan.optimal_path {
                println!("  {}  {}: {}", course.code, course.name, course.benefit);
            }
            println!("  Estimated graduation: {}\n", plan.estimated_graduation_time);
        }
        Err(err) => warn!(error = %err, "could not generate an optimal path"),
    }

    println!("--- Elective Recommendations ---");
    let request = electives::ElectiveRequest::new(
        "Completed the data-science core with consistent A grades.",
        "Enjoys hackathons, building side projects, reading sci-fi, and gaming.",
        "Wants to work as a machine learning engineer after graduation.",
    );

    match electives::flow().run(generator, &request).await {
        Ok(advice) => {
            for elective in &advice.elective_recommendations {
                println!("  - {elective}");
            }
            println!("  {}\n", advice.reasoning);
        }
        Err(err) => warn!(error = %err, "could not recommend electives"),
    }

    println!("--- Graduation Prediction ---");
    let student = &seed.student;
    let planned: Vec<String> = seed
        .pending
        .iter()
        .map(|course| format!("{} ({} credits)", course.code, course.credits))
        .collect();
    let request = prediction::PredictionRequest::new(
        student.completed_credits,
        student.total_credits,
        format!("[{}]", planned.join(", ")),
        student.gpa,
        "Students in this major graduate in 4.5 years on average, with 85% finishing within five years.",
    );

    match prediction::flow().run(generator, &request).await {
        Ok(forecast) => {
            println!(
                "  {} (confidence: {})\n  {}",
                forecast.predicted_graduation_time, forecast.confidence_level, forecast.reasoning
            );
        }
        Err(err) => warn!(error = %err, "could not predict graduation time"),
    }
}
