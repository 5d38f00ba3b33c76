use criterion::{Criterion, black_box, criterion_group, criterion_main};
use exam_import::{classify_format, parse_report};

const HEADER: &str = "Öğrenci No\tAdı Soyadı\tSınıf\tKitapçık\tTürkçe D\tTürkçe Y\tTürkçe Net\t\
                      Mat D\tMat Y\tMat Net\tFen D\tFen Y\tFen Net\tDoğru\tYanlış\tNet\tLGS Puanı";

fn build_report(rows: usize) -> String {
    let mut report = String::from(HEADER);
    for i in 0..rows {
        report.push_str(&format!(
            "\n{}\töğrenci {}\t8-{}\t{}\t{}\t{}\t{},33\t{}\t{}\t{}\t{}\t{}\t\t{}\t{}\t{},67\t{},5",
            1000 + i,
            i,
            ["A", "B", "C"][i % 3],
            ["A", "B"][i % 2],
            i % 20,
            i % 5,
            i % 18,
            i % 20,
            i % 7,
            i % 16,
            i % 20,
            i % 4,
            i % 60,
            i % 16,
            i % 55,
            200 + i % 300,
        ));
    }
    report
}

fn bench_parse_report(c: &mut Criterion) {
    let small = build_report(40);
    let large = build_report(5_000);

    c.bench_function("parse_report_40_rows", |b| {
        b.iter(|| parse_report(black_box(&small)))
    });
    c.bench_function("parse_report_5000_rows", |b| {
        b.iter(|| parse_report(black_box(&large)))
    });
    c.bench_function("classify_format_5000_rows", |b| {
        b.iter(|| classify_format(black_box(&large)))
    });
}

criterion_group!(benches, bench_parse_report);
criterion_main!(benches);
