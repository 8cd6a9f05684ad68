use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{ContactNumber, EnrollmentRecord, Reference, ValidatedEnrollment};
use record_store::{JsonFileRecordStore, RecordRepository, RecordStore};

fn make_records(count: usize) -> Vec<EnrollmentRecord> {
    (0..count)
        .map(|i| {
            EnrollmentRecord::pending(
                Reference::generate(),
                ValidatedEnrollment {
                    name: format!("Student {i}"),
                    contact: ContactNumber::new("+55 11 99999-9999"),
                    course: "EEB".to_string(),
                },
            )
        })
        .collect()
}

fn bench_load(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("json_file_store/load");

    for size in [10usize, 100, 1000] {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRecordStore::new(dir.path().join("students.json"));
        rt.block_on(store.save(&make_records(size))).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| rt.block_on(store.load()).unwrap());
        });
    }

    group.finish();
}

fn bench_append(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("json_file_store/append");

    for size in [10usize, 100, 1000] {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRecordStore::new(dir.path().join("students.json"));
        rt.block_on(store.save(&make_records(size))).unwrap();
        let repo = RecordRepository::new(store);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let record = make_records(1).remove(0);
                rt.block_on(repo.append(record)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_append);
criterion_main!(benches);
