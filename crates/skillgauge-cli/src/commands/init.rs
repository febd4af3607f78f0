//! The `skillgauge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("assessments")?;

    let questions_path = std::path::Path::new("assessments/questions.toml");
    if questions_path.exists() {
        println!("assessments/questions.toml already exists, skipping.");
    } else {
        std::fs::write(questions_path, STARTER_QUESTIONS)?;
        println!("Created assessments/questions.toml");
    }

    let matrix_path = std::path::Path::new("assessments/score-matrix.toml");
    if matrix_path.exists() {
        println!("assessments/score-matrix.toml already exists, skipping.");
    } else {
        std::fs::write(matrix_path, STARTER_MATRIX)?;
        println!("Created assessments/score-matrix.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit the files with your own sections and targets");
    println!(
        "  2. Run: skillgauge validate --questions assessments/questions.toml --matrix assessments/score-matrix.toml"
    );
    println!(
        "  3. Run: skillgauge run --questions assessments/questions.toml --matrix assessments/score-matrix.toml"
    );

    Ok(())
}

const STARTER_QUESTIONS: &str = r#"[assessment]
id = "starter"
name = "Starter Assessment"
description = "Replace these questions with your own"

[[questions]]
id = "core-001"
section = "Core Skills"
sub_section = "Fundamentals"
question = "How confident are you with the fundamentals of your craft?"

[[questions]]
id = "core-002"
section = "Core Skills"
sub_section = "Fundamentals"
question = "How confident are you explaining the fundamentals to a newcomer?"

[[questions]]
id = "tools-001"
section = "Tooling"
sub_section = "Daily Workflow"
question = "How confident are you with the tools you use every day?"
"#;

const STARTER_MATRIX: &str = r#"[matrix]
id = "starter-matrix"
name = "Starter Score Matrix"
description = "Targets per experience bracket for the starter assessment"

[[entries]]
id = "mx-core-fundamentals"
section = "Core Skills"
sub_section = "Fundamentals"

[entries.expected]
"0-3" = 3
"3-6" = 4
"6-9" = 6

[[entries]]
id = "mx-tools-workflow"
section = "Tooling"
sub_section = "Daily Workflow"

[entries.expected]
"0-3" = 1
"3-6" = 2
"6-9" = 3
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use skillgauge_core::catalog::{cross_validate, parse_catalog_str, parse_matrix_str};
    use std::path::PathBuf;

    #[test]
    fn starter_files_are_valid_and_aligned() {
        let src = PathBuf::from("starter.toml");
        let catalog = parse_catalog_str(STARTER_QUESTIONS, &src).unwrap();
        let matrix = parse_matrix_str(STARTER_MATRIX, &src).unwrap();
        assert!(cross_validate(&catalog, &matrix).is_aligned());
    }
}
