use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use atomreader::{parse, Scanner};

const PROGRAM: &str = r#"
; factorial and friends
(define (fact n)
  (if (< n 2)
      1
      (* n (fact (- n 1)))))

(define greeting "hello, \"world\"")
(define pi 3.14159e0)
(map 'fact (list 1 2 3 4 5))
"#;

fn scanner_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize small program", |b| {
        b.iter(|| Scanner::new(black_box(PROGRAM)).scan_tokens())
    });
}

fn parser_benchmark(c: &mut Criterion) {
    c.bench_function("parse small program", |b| {
        b.iter(|| parse(black_box(PROGRAM)))
    });

    let mut group = c.benchmark_group("nesting_depth");
    for depth in [10usize, 100, 500].iter() {
        let source = format!("{}x{}", "(".repeat(*depth), ")".repeat(*depth));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &source, |b, source| {
            b.iter(|| parse(black_box(source)))
        });
    }
    group.finish();
}

fn printer_benchmark(c: &mut Criterion) {
    let tree = parse(PROGRAM);
    c.bench_function("print small program", |b| b.iter(|| black_box(&tree).to_string()));
}

criterion_group!(benches, scanner_benchmark, parser_benchmark, printer_benchmark);
criterion_main!(benches);
