//! The `skillgauge validate` command.
//!
//! Build-blocking gate: schema and uniqueness checks happen during load,
//! then the catalog/matrix group keys are cross-checked. Any mismatch is
//! printed as offending-key lists and the process exits with status 1.

use std::path::PathBuf;
use std::process;

use anyhow::Result;

use skillgauge_core::catalog::{cross_validate, load_catalog, load_matrix};

pub fn execute(questions_path: PathBuf, matrix_path: PathBuf) -> Result<()> {
    let catalog = load_catalog(&questions_path)?;
    let matrix = load_matrix(&matrix_path)?;

    println!(
        "Catalog: {} ({} questions)",
        catalog.name,
        catalog.questions.len()
    );
    println!("Matrix: {} ({} entries)", matrix.name, matrix.entries.len());

    let check = cross_validate(&catalog, &matrix);

    if check.is_aligned() {
        println!("Assessment data check passed: questions and score matrix are aligned.");
        return Ok(());
    }

    if !check.missing.is_empty() {
        eprintln!("Missing score-matrix entries for question groups:");
        for key in &check.missing {
            eprintln!("- {key}");
        }
    }

    if !check.unused.is_empty() {
        eprintln!("Score-matrix entries without matching questions:");
        for key in &check.unused {
            eprintln!("- {key}");
        }
    }

    process::exit(1);
}
