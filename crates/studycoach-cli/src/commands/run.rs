//! The `studycoach run` command — one interactive coaching session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Table;

use studycoach_classifiers::config::{create_classifier, load_config_from};
use studycoach_core::catalog::load_content_pack;
use studycoach_core::dashboard::DashboardSummary;
use studycoach_core::session::Session;

pub async fn execute(
    config_path: Option<PathBuf>,
    content_pack_override: Option<PathBuf>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        format == "table" || format == "json",
        "unknown format '{format}' (expected: table, json)"
    );

    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(pack) = content_pack_override {
        config.content_pack = pack;
    }

    // Content load failure is the one fatal error: no session starts
    // without a valid catalog.
    let catalog = Arc::new(
        load_content_pack(&config.content_pack)
            .with_context(|| format!("cannot start: {}", config.content_pack.display()))?,
    );
    let classifier = create_classifier(&config);

    let mut session = Session::new(Arc::clone(&catalog));
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Personalized Study Coach: {}", catalog.topic());
    println!("Answer each question briefly; an empty line is fine.\n");

    // Diagnostic phase: one free-text answer per question.
    for question in catalog.questions() {
        println!("{}", question.question);
        let answer = read_line(&mut input)?;
        session.record_answer(&question.id, answer.trim_end());
    }

    // Analyze on explicit submission of all answers.
    println!("\nAnalyzing your answers...\n");
    session.analyze(classifier.as_ref()).await;
    print_results(&session);

    // Coaching content per verdict.
    for result in session.results() {
        let help = catalog.help_for(&result.misconception_id);
        println!("\n[{}] {}", result.question_id, help.explanation);
        for hint in &help.hints {
            println!("  hint: {hint}");
        }
    }

    // Practice phase.
    session.generate_practice();
    if session.practice().is_empty() {
        println!("\nNo practice needed, nothing to drill.");
    } else {
        println!("\nPractice time! Answer the following:\n");
        let assignment: Vec<(String, Vec<(String, String)>)> = session
            .practice()
            .iter()
            .map(|(qid, set)| {
                (
                    qid.clone(),
                    set.iter()
                        .map(|p| (p.id.clone(), p.prompt.clone()))
                        .collect(),
                )
            })
            .collect();

        for (question_id, practice_set) in &assignment {
            for (practice_id, prompt) in practice_set {
                println!("{prompt}");
                let submitted = read_line(&mut input)?;
                if let Some(graded) = session.check_practice(question_id, practice_id, &submitted)
                {
                    println!("  {}\n", graded.feedback);
                }
            }
        }
    }

    // Tutor-facing dashboard.
    let summary = DashboardSummary::from_log(session.events(), config.recent_events);
    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_dashboard(&summary),
    }

    Ok(())
}

/// Read one line, treating EOF as an empty answer so a piped session ends
/// gracefully instead of erroring.
fn read_line(input: &mut impl BufRead) -> Result<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read input")?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn print_results(session: &Session) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Verdict", "Confidence", "Why"]);
    for result in session.results() {
        table.add_row(vec![
            result.question_id.clone(),
            result.misconception_name.clone(),
            format!("{:.0}%", result.confidence * 100.0),
            result.reason.clone(),
        ]);
    }
    println!("{table}");
}

fn print_dashboard(summary: &DashboardSummary) {
    println!("\nSession dashboard");

    let mut totals = Table::new();
    totals.set_header(vec!["Metric", "Count"]);
    totals.add_row(vec![
        "Diagnostics analyzed".to_string(),
        summary.diagnostics_analyzed.to_string(),
    ]);
    totals.add_row(vec![
        "Practice generated".to_string(),
        summary.practice_generated.to_string(),
    ]);
    totals.add_row(vec![
        "Practice attempted".to_string(),
        summary.practice_attempted.to_string(),
    ]);
    totals.add_row(vec![
        "Practice correct".to_string(),
        summary.practice_correct.to_string(),
    ]);
    println!("{totals}");

    if !summary.misconception_frequency.is_empty() {
        let mut freq = Table::new();
        freq.set_header(vec!["Misconception", "Count"]);
        for entry in &summary.misconception_frequency {
            freq.add_row(vec![
                entry.misconception_id.clone(),
                entry.count.to_string(),
            ]);
        }
        println!("{freq}");
    }

    if !summary.recent.is_empty() {
        println!("Recent activity (newest first):");
        for event in &summary.recent {
            println!("  [{}] {}", event.seq, event.description);
        }
    }
}
