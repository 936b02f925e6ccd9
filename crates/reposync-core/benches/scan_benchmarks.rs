use criterion::{Criterion, black_box, criterion_group, criterion_main};
use reposync_core::{ContentVerifier, MetadataScanner, PathPair, Scanner, Verifier};
use reposync_fs::ExclusionSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 20 directories of 25 files, with CRLF on one side.
fn populate(root: &Path, line_ending: &str) {
    for dir in 0..20 {
        let dir_path = root.join(format!("module_{dir:02}"));
        fs::create_dir_all(&dir_path).unwrap();
        for file in 0..25 {
            let content = ["line one", "line two", &format!("file {file}")].join(line_ending);
            fs::write(dir_path.join(format!("file_{file:02}.c")), content).unwrap();
        }
    }
}

fn scan_benchmark(c: &mut Criterion) {
    // Converged trees: the common case of a pass with nothing to do
    c.bench_function("scan::MetadataScanner (converged)", |b| {
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        populate(source.path(), "\n");
        for entry in fs::read_dir(source.path()).unwrap() {
            let dir = entry.unwrap().path();
            let target = destination.path().join(dir.file_name().unwrap());
            fs::create_dir_all(&target).unwrap();
            for file in fs::read_dir(&dir).unwrap() {
                let file = file.unwrap().path();
                reposync_fs::io::copy_atomic(&file, &target.join(file.file_name().unwrap()))
                    .unwrap();
            }
        }
        let pair = PathPair::new(source.path(), destination.path());
        let exclusions = ExclusionSet::with_defaults();
        let scanner = MetadataScanner::default();

        b.iter(|| {
            let outcome = scanner.scan(black_box(&pair), &exclusions).unwrap();
            assert!(outcome.is_empty());
        })
    });
}

fn verify_benchmark(c: &mut Criterion) {
    // Every file differs only in line endings
    c.bench_function("verify::ContentVerifier (crlf churn)", |b| {
        let source = tempdir().unwrap();
        let destination = tempdir().unwrap();
        populate(source.path(), "\r\n");
        populate(destination.path(), "\n");
        let pair = PathPair::new(source.path(), destination.path());
        let candidates = MetadataScanner::default()
            .scan(&pair, &ExclusionSet::with_defaults())
            .unwrap()
            .candidates;
        let verifier = ContentVerifier::new();

        b.iter(|| {
            let outcome = verifier.verify(black_box(&candidates), &pair);
            assert!(outcome.changes.is_empty());
        })
    });
}

criterion_group!(benches, scan_benchmark, verify_benchmark);
criterion_main!(benches);
