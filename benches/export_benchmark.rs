use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridexport::{
    record, CellValue, ColumnDescriptor, CsvExporter, ExcelExporter, ExportOptions, GridSource,
    RowData,
};

fn employees(size: usize) -> GridSource {
    let columns = vec![
        ColumnDescriptor::new("ID", 0),
        ColumnDescriptor::new("Name", 1),
        ColumnDescriptor::new("Value", 2),
    ];
    let rows: Vec<RowData> = (0..size)
        .map(|i| {
            record([
                ("ID", CellValue::Int(i as i64)),
                ("Name", format!("Name_{}", i % 500).into()),
                ("Value", CellValue::Int((i * 100) as i64)),
            ])
            .into()
        })
        .collect();
    GridSource::new(columns, rows)
}

fn benchmark_xlsx(c: &mut Criterion) {
    let mut group = c.benchmark_group("xlsx");
    group.sample_size(10); // Reduce samples for large benchmarks

    for size in [100, 1000, 10000].iter() {
        let source = employees(*size);
        let options = ExportOptions::xlsx("bench");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let file = ExcelExporter::new()
                    .export_grid(black_box(&source), &options)
                    .unwrap();
                black_box(file.bytes.len())
            });
        });
    }

    group.finish();
}

fn benchmark_fixed_width(c: &mut Criterion) {
    let source = employees(10000);
    let mut options = ExportOptions::xlsx("bench");
    options.column_width = Some(20.0);

    c.bench_function("xlsx_fixed_width_10000", |b| {
        b.iter(|| {
            ExcelExporter::new()
                .export_grid(black_box(&source), &options)
                .unwrap()
        });
    });
}

fn benchmark_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv");

    for size in [1000, 10000].iter() {
        let source = employees(*size);
        let options = ExportOptions::csv("bench");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                CsvExporter::new()
                    .export_grid(black_box(&source), &options)
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_xlsx, benchmark_fixed_width, benchmark_csv);
criterion_main!(benches);
