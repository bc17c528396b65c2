use std::hint::black_box;

use anchorfp::{
    create_descriptors, fingerprint_token, resolve_all, resolve_token, DocTree, FocusConfig,
    FocusEngine, NodeId,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Synthetic article: `sections` sections of one heading and eight paragraphs.
fn build_page(sections: usize) -> (DocTree, Vec<NodeId>) {
    let mut doc = DocTree::new();
    let root = doc.root();
    let main = doc
        .append_element_with_id(root, "main", "content")
        .expect("append main");
    let mut paragraphs = Vec::new();
    for s in 0..sections {
        let section = doc
            .append_element_with_id(main, "section", &format!("s{s}"))
            .expect("append section");
        doc.append_text_element(section, "h2", &format!("Section {s}"))
            .expect("append heading");
        for p in 0..8 {
            let text = format!("Paragraph {p} of section {s}, with enough words to fill a snippet.");
            paragraphs.push(doc.append_text_element(section, "p", &text).expect("append p"));
        }
    }
    (doc, paragraphs)
}

fn sample(nodes: &[NodeId], count: usize) -> Vec<NodeId> {
    let step = (nodes.len() / count).max(1);
    nodes.iter().step_by(step).take(count).copied().collect()
}

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    let (doc, paragraphs) = build_page(200);

    for count in [1usize, 16, 128] {
        let targets = sample(&paragraphs, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("token", count), &targets, |b, targets| {
            b.iter(|| fingerprint_token(&doc, black_box(targets), doc.root()))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for sections in [10usize, 100, 1000] {
        let (doc, paragraphs) = build_page(sections);
        let targets = sample(&paragraphs, 8);
        let descriptors = create_descriptors(&doc, &targets, doc.root());
        let token = fingerprint_token(&doc, &targets, doc.root());

        group.throughput(Throughput::Elements(doc.len() as u64));
        group.bench_with_input(BenchmarkId::new("descriptors", sections), &descriptors, |b, d| {
            b.iter(|| resolve_all(&doc, doc.root(), black_box(d)))
        });
        group.bench_with_input(BenchmarkId::new("token", sections), &token, |b, t| {
            b.iter(|| resolve_token(&doc, doc.root(), black_box(t)))
        });
    }

    group.finish();
}

fn bench_focus_cycle(c: &mut Criterion) {
    let (mut doc, paragraphs) = build_page(100);
    let token = fingerprint_token(&doc, &sample(&paragraphs, 4), doc.root());
    let mut engine = FocusEngine::new(doc.root(), FocusConfig::default()).expect("engine");

    c.bench_function("focus_apply_exit", |b| {
        b.iter(|| {
            let outcome = engine.apply_focus_mode(&mut doc, black_box(&token));
            engine.exit_focus_mode(&mut doc);
            outcome
        })
    });
}

criterion_group!(benches, bench_fingerprint, bench_resolve, bench_focus_cycle);
criterion_main!(benches);
