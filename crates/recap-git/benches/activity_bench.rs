use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use recap_git::scanner::sort_chronologically;
use recap_git::{AuthorScope, CommitRecord, RepoScan, RepositoryRef, TimeWindow, aggregate};

/// Build scans for `repos` repositories with `commits` commits each
fn sample_scans(window: &TimeWindow, repos: usize, commits: usize) -> Vec<RepoScan> {
    (0..repos)
        .map(|r| {
            let repo = RepositoryRef::from_path(format!("/bench/repo-{r}"));
            let records = (0..commits)
                .map(|c| CommitRecord {
                    repo: repo.clone(),
                    hash: format!("{:040x}", r * commits + c),
                    author_name: format!("Author {}", c % 3),
                    author_email: format!("author{}@example.com", c % 3),
                    // Spread commits before, inside, and after the window
                    timestamp: window.start() + Duration::minutes((c as i64 * 37) % 2880 - 480),
                    message: format!("Commit message {c}\n\nBody text"),
                    diff: None,
                })
                .collect();
            RepoScan {
                repo,
                commits: records,
                author: AuthorScope::AllAuthors,
                branch: Some("main".to_string()),
                warning: None,
            }
        })
        .collect()
}

fn activity_benchmarks(c: &mut Criterion) {
    let window = TimeWindow::day_of(
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        chrono_tz::UTC,
    );

    let mut group = c.benchmark_group("aggregate");
    for repos in [1, 10, 50] {
        let scans = sample_scans(&window, repos, 200);
        group.bench_with_input(BenchmarkId::from_parameter(repos), &scans, |b, scans| {
            b.iter(|| aggregate(window, scans.clone()))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("sort");
    let mut commits = sample_scans(&window, 1, 5_000).remove(0).commits;
    commits.reverse();
    group.bench_function("sort_chronologically_5000", |b| {
        b.iter(|| {
            let mut copy = commits.clone();
            sort_chronologically(&mut copy);
            copy
        })
    });
    group.finish();
}

criterion_group!(benches, activity_benchmarks);
criterion_main!(benches);
