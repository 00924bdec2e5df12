use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rfp_match::{rank, Analyzer, Corpus, Document, StopWords, TFIDFVectorizer};

const VOCAB: &[&str] = &[
    "screen", "grit", "pump", "station", "sludge", "digester", "aeration", "basin", "clarifier",
    "outfall", "influent", "effluent", "valve", "pipeline", "electrical", "controls", "scada",
    "generator", "concrete", "excavation", "bypass", "odor", "blower", "membrane", "filter",
    "the", "of", "and", "to", "for", "with", "by", "on", "at", "from",
];

/// Deterministic pseudo-random document
fn synthetic_doc(seed: usize, words: usize) -> String {
    let mut state = (seed as u64).wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut out = Vec::with_capacity(words);
    for _ in 0..words {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        out.push(VOCAB[(state >> 33) as usize % VOCAB.len()]);
    }
    out.join(" ")
}

fn synthetic_corpus(docs: usize, words: usize) -> Corpus {
    (0..docs)
        .map(|i| (format!("proposal-{i}"), synthetic_doc(i + 1, words)))
        .collect()
}

fn rank_benchmark(c: &mut Criterion) {
    let base = Document::new("rfp", synthetic_doc(0, 2_000));
    let stopwords = StopWords::for_locale("english").unwrap_or_default();

    let mut group = c.benchmark_group("rank");
    for &docs in &[10usize, 100, 500] {
        let corpus = synthetic_corpus(docs, 1_000);
        group.throughput(Throughput::Elements(docs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(docs), &corpus, |b, corpus| {
            b.iter(|| rank(black_box(&base), black_box(corpus), &stopwords, 10))
        });
    }
    group.finish();
}

fn fit_benchmark(c: &mut Criterion) {
    let texts: Vec<String> = (0..200).map(|i| synthetic_doc(i, 1_000)).collect();
    let analyzer = Analyzer::default();
    let stopwords = StopWords::none();

    c.bench_function("fit_transform", |b| {
        b.iter(|| <TFIDFVectorizer<f64>>::fit_transform(black_box(texts.as_slice()), &analyzer, &stopwords))
    });
}

criterion_group!(benches, rank_benchmark, fit_benchmark);
criterion_main!(benches);
