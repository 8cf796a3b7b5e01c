use criterion::{black_box, criterion_group, criterion_main, Criterion};

use exambank_core::classify::classify_line;
use exambank_core::export::to_json;
use exambank_core::model::BatchContext;
use exambank_core::scan::scan_text;

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_line");

    group.bench_function("question", |b| {
        b.iter(|| classify_line(black_box("12. Which gas do plants absorb?")))
    });

    group.bench_function("marked_option", |b| {
        b.iter(|| classify_line(black_box("B. Carbon dioxide *")))
    });

    group.bench_function("other", |b| {
        b.iter(|| classify_line(black_box("Answer all questions in this section.")))
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_text");
    let ctx = BatchContext::new("Biology", "Form 2").expect("valid context");

    let small = generate_paper(10);
    let medium = generate_paper(100);
    let large = generate_paper(1000);

    group.bench_function("10_questions", |b| {
        b.iter(|| scan_text(black_box(&small), &ctx))
    });

    group.bench_function("100_questions", |b| {
        b.iter(|| scan_text(black_box(&medium), &ctx))
    });

    group.bench_function("1000_questions", |b| {
        b.iter(|| scan_text(black_box(&large), &ctx))
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let ctx = BatchContext::new("Biology", "Form 2").expect("valid context");
    let questions = scan_text(&generate_paper(100), &ctx).questions;

    c.bench_function("export_100_questions", |b| {
        b.iter(|| to_json(black_box(&questions)))
    });
}

/// A paper where every fifth question is missing its last option.
fn generate_paper(n: usize) -> String {
    let mut s = String::from("BIOLOGY PAPER 1\n\n");
    for i in 1..=n {
        s.push_str(&format!("{i}. Question number {i}?\n"));
        s.push_str(&format!("A. first answer {i}\n"));
        s.push_str(&format!("B. second answer {i} *\n"));
        s.push_str(&format!("C. third answer {i}\n"));
        if i % 5 != 0 {
            s.push_str(&format!("D. fourth answer {i}\n"));
        }
        s.push_str("T. Cells\n\n");
    }
    s
}

criterion_group!(benches, bench_classify, bench_scan, bench_export);
criterion_main!(benches);
