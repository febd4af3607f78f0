use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skillgauge_core::breakdown::build_breakdown;
use skillgauge_core::model::{
    AnswerMap, ExpectedScores, ExperienceBracket, Question, ScoreMatrixEntry, SkillLevel,
};
use skillgauge_core::scoring::section_totals;

fn make_catalog(groups: usize, questions_per_group: usize) -> Vec<Question> {
    let mut questions = Vec::new();
    for g in 0..groups {
        for q in 0..questions_per_group {
            questions.push(Question {
                id: format!("q-{g}-{q}"),
                section: format!("Section {g}"),
                sub_section: format!("Topic {g}"),
                question: format!("Benchmark question {g}/{q}"),
            });
        }
    }
    questions
}

fn make_matrix(groups: usize) -> Vec<ScoreMatrixEntry> {
    (0..groups)
        .map(|g| ScoreMatrixEntry {
            id: format!("mx-{g}"),
            section: format!("Section {g}"),
            sub_section: format!("Topic {g}"),
            expected: ExpectedScores {
                years_0_to_3: 4,
                years_3_to_6: 6,
                years_6_to_9: 8,
            },
        })
        .collect()
}

fn make_answers(questions: &[Question]) -> AnswerMap {
    let levels = SkillLevel::ALL;
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| (q.id.clone(), levels[i % levels.len()]))
        .collect()
}

fn bench_section_totals(c: &mut Criterion) {
    let questions = make_catalog(20, 5);
    let answers = make_answers(&questions);

    c.bench_function("section_totals_100q", |b| {
        b.iter(|| section_totals(black_box(&questions), black_box(&answers)))
    });
}

fn bench_build_breakdown(c: &mut Criterion) {
    let questions = make_catalog(20, 5);
    let answers = make_answers(&questions);
    let matrix = make_matrix(20);
    let totals = section_totals(&questions, &answers);

    c.bench_function("build_breakdown_20_entries", |b| {
        b.iter(|| {
            build_breakdown(
                black_box(&matrix),
                black_box(&totals),
                ExperienceBracket::Years3To6,
                7,
            )
        })
    });
}

criterion_group!(benches, bench_section_totals, bench_build_breakdown);
criterion_main!(benches);
