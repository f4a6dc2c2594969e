use criterion::{black_box, criterion_group, criterion_main, Criterion};

use screener_core::model::{Difficulty, Question, QuestionKind};
use screener_core::ranker::ResumeRanker;
use screener_core::scoring::score_answer;

fn make_question(kind: QuestionKind, keywords: &[&str]) -> Question {
    Question {
        id: "bench".into(),
        kind,
        difficulty: Difficulty::Advanced,
        prompt: String::new(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        model_answer: String::new(),
    }
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_resume");
    let ranker = ResumeRanker::default();

    let short = "python developer, flask, sql. b.s. computer science";
    let long = {
        let mut s = String::from("senior lead engineer. m.s. ");
        for i in 0..500 {
            s.push_str(&format!("project {i}: kubernetes, cloud, django api work. "));
        }
        s
    };

    group.bench_function("short", |b| {
        b.iter(|| ranker.rank(black_box(short), black_box("short.txt")))
    });

    group.bench_function("long", |b| {
        b.iter(|| ranker.rank(black_box(&long), black_box("long.pdf")))
    });

    group.finish();
}

fn bench_score_answer(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_answer");
    let technical = make_question(
        QuestionKind::Technical,
        &["yield", "memory", "large data", "iteration"],
    );
    let generic = make_question(QuestionKind::Generic, &[]);

    group.bench_function("technical_full", |b| {
        let answer = "Use yield to stream large data with lazy iteration and low memory.";
        b.iter(|| score_answer(black_box(&technical), black_box(answer), 30))
    });

    group.bench_function("technical_none", |b| {
        let answer = "I would just use a list for everything.";
        b.iter(|| score_answer(black_box(&technical), black_box(answer), 30))
    });

    group.bench_function("generic", |b| {
        let answer = "I enjoy building data pipelines with small, well-tested libraries.";
        b.iter(|| score_answer(black_box(&generic), black_box(answer), 30))
    });

    group.finish();
}

criterion_group!(benches, bench_rank, bench_score_answer);
criterion_main!(benches);
