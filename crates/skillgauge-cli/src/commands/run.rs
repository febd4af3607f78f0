//! The `skillgauge run` command.
//!
//! Drives a single assessment session on stdin/stdout: one question at a
//! time, then the scored breakdown against the selected experience bracket.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use skillgauge_core::breakdown::BreakdownEntry;
use skillgauge_core::catalog::{cross_validate, load_catalog, load_matrix};
use skillgauge_core::model::{ExperienceBracket, Question, SkillLevel};
use skillgauge_core::scoring::GroupScore;
use skillgauge_core::session::{Session, SessionView, Theme};

/// Machine-readable results document for `--format json`.
#[derive(Serialize)]
struct ResultsDoc<'a> {
    assessment: &'a str,
    bracket: ExperienceBracket,
    overall: GroupScore,
    entries: &'a [BreakdownEntry],
}

pub fn execute(
    questions_path: PathBuf,
    matrix_path: PathBuf,
    bracket: Option<String>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "table" | "json"),
        "unknown format: {format} (expected table or json)"
    );

    let catalog = load_catalog(&questions_path)?;
    let matrix = load_matrix(&matrix_path)?;
    anyhow::ensure!(
        !catalog.questions.is_empty(),
        "catalog {} has no questions",
        catalog.id
    );

    // Same gate as `skillgauge validate`; misaligned data never reaches a
    // session.
    let check = cross_validate(&catalog, &matrix);
    if !check.is_aligned() {
        anyhow::bail!(
            "catalog and matrix are misaligned (missing: {:?}, unused: {:?}); run `skillgauge validate`",
            check.missing,
            check.unused
        );
    }

    tracing::info!(
        catalog = %catalog.id,
        questions = catalog.questions.len(),
        "starting session"
    );

    let mut session = Session::new(catalog, matrix);
    if let Some(b) = bracket {
        let bracket = b
            .parse::<ExperienceBracket>()
            .map_err(|e| anyhow::anyhow!(e))?;
        session.set_bracket(bracket);
    }

    println!("{}", session.catalog().name);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match session.view() {
            SessionView::Asking {
                question,
                index,
                total,
                selected,
            } => {
                render_question(question, index, total, selected);
                println!(
                    "[1/2/3] answer  [b]ack  [r]estart  [e] bracket ({})  [t]heme  [q]uit",
                    session.state().bracket
                );
            }
            SessionView::Complete { overall, breakdown } => {
                render_results(&session, overall, &breakdown, &format)?;
                println!(
                    "[r]estart  [e] bracket ({})  [q]uit",
                    session.state().bracket
                );
            }
        }

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?.trim().to_lowercase();

        match input.as_str() {
            "q" | "quit" => break,
            "b" | "back" => session.back(),
            "r" | "restart" => session.restart(),
            "t" | "theme" => session.toggle_theme(),
            "e" | "bracket" => {
                let next = session.state().bracket.next();
                session.set_bracket(next);
            }
            other => {
                if session.is_complete() {
                    println!("Unknown input: {other}");
                } else if let Ok(level) = other.parse::<SkillLevel>() {
                    session.select(level);
                } else {
                    println!("Unknown input: {other}");
                }
            }
        }
    }

    Ok(())
}

fn render_question(question: &Question, index: usize, total: usize, selected: Option<SkillLevel>) {
    println!("\n{} | {}", question.section, question.sub_section);
    println!("Question {} / {total}", index + 1);
    println!("{}. {}", index + 1, question.question);
    for level in SkillLevel::ALL {
        let marker = if selected == Some(level) { " *" } else { "" };
        println!("  [{}] {level}{marker}", level.score());
    }
}

fn render_results(
    session: &Session,
    overall: GroupScore,
    breakdown: &[BreakdownEntry],
    format: &str,
) -> Result<()> {
    if format == "json" {
        let doc = ResultsDoc {
            assessment: &session.catalog().name,
            bracket: session.state().bracket,
            overall,
            entries: breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("\nEvaluation complete");
    println!(
        "Overall total: {} / {} (bracket {})",
        overall.total,
        overall.max,
        session.state().bracket
    );
    println!("{}", breakdown_table(breakdown, session.state().theme));
    Ok(())
}

fn breakdown_table(breakdown: &[BreakdownEntry], theme: Theme) -> comfy_table::Table {
    use comfy_table::{presets, Cell, Table};

    let mut table = Table::new();
    // The theme toggle only changes how borders are drawn.
    table.load_preset(match theme {
        Theme::Light => presets::UTF8_FULL,
        Theme::Dark => presets::ASCII_FULL,
    });
    table.set_header(vec![
        "Section",
        "Sub-section",
        "Score",
        "Target",
        "Status",
        "Coaching",
    ]);

    for row in breakdown {
        let status = if row.on_track {
            "on track".to_string()
        } else {
            format!("below target ({})", row.category)
        };
        table.add_row(vec![
            Cell::new(&row.section),
            Cell::new(&row.sub_section),
            Cell::new(format!("{} / {}", row.total, row.max)),
            Cell::new(row.target),
            Cell::new(status),
            Cell::new(&row.message),
        ]);
    }

    table
}
