use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resale_processor::models::Transaction;
use resale_processor::processors::inflation_adjuster::compounding_index;
use resale_processor::processors::{GeoClassifier, StoreyRangeParser};

const LOCATIONS: &[(&str, &str, &str)] = &[
    ("Bedok", "Bedok Nth Rd", "101"),
    ("Central Area", "Smith St", "2"),
    ("Central Area", "Jln Berseh", "9"),
    ("Kallang/Whampoa", "Beach Rd", "15"),
    ("Kallang/Whampoa", "Beach Rd", "3"),
    ("Kallang/Whampoa", "Whampoa Dr", "80"),
    ("Tampines", "Tampines St 44", "401"),
    ("Woodlands", "Marsiling Dr", "12"),
];

fn create_test_records(count: usize) -> Vec<Transaction> {
    let date = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();

    (0..count)
        .map(|i| {
            let (town, street, block) = LOCATIONS[i % LOCATIONS.len()];
            Transaction {
                row_id: i as u64,
                date,
                month: 3,
                year: 2015,
                town: town.to_string(),
                flat_type: "4 Room".to_string(),
                block: block.to_string(),
                street_name: street.to_string(),
                storey_range: format!("{:02} TO {:02}", 1 + (i % 10) * 3, 3 + (i % 10) * 3),
                start_floor: 0,
                storey_count: 0,
                floor_area_sqm: 92.0,
                flat_model: "Model A".to_string(),
                lease_year: 1990,
                years_leased: 25,
                resale_price: 400000.0 + i as f64,
                infl_adj_price: None,
                region: None,
                planning_area: town.to_string(),
            }
        })
        .collect()
}

fn benchmark_classification(c: &mut Criterion) {
    let classifier = GeoClassifier::new();
    let mut group = c.benchmark_group("classification");

    for size in [1_000, 10_000, 100_000] {
        let records = create_test_records(size);
        group.bench_with_input(BenchmarkId::new("classify", size), &records, |b, records| {
            b.iter(|| {
                let mut records = records.clone();
                classifier.classify(black_box(&mut records)).unwrap()
            })
        });
    }

    group.bench_function("planning_area_block_override", |b| {
        b.iter(|| classifier.planning_area(black_box("Kallang/Whampoa"), black_box("Beach Rd"), black_box("15")))
    });

    group.finish();
}

fn benchmark_storey_parsing(c: &mut Criterion) {
    let parser = StoreyRangeParser::new();
    let records = create_test_records(10_000);

    c.bench_function("storey_range_10k", |b| {
        b.iter(|| {
            let mut records = records.clone();
            parser.apply(black_box(&mut records)).unwrap()
        })
    });
}

fn benchmark_compounding_index(c: &mut Criterion) {
    let series: Vec<(i32, f64)> = (1960..=2024)
        .map(|year| (year, ((year % 7) as f64 - 2.0) * 0.8))
        .collect();

    c.bench_function("compounding_index_65_years", |b| {
        b.iter(|| compounding_index(black_box(&series)))
    });
}

criterion_group!(
    benches,
    benchmark_classification,
    benchmark_storey_parsing,
    benchmark_compounding_index
);
criterion_main!(benches);
