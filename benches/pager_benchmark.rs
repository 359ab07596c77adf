//! Performance benchmarks for the activity pager
//!
//! Measures pager passes over courses of growing size.
//! Run with: cargo bench

use campus::course::{ActivityPager, StandardAccessPolicy, LOAD_MORE_ACTIVITIES};
use campus::models::{ModuleRef, Section};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate an expanded course with `sections` sections of `per_section` modules.
///
/// Every fifth section is collapsed and every seventh module is stealth, so
/// the pager exercises its skip paths.
fn generate_course(sections: usize, per_section: usize) -> Vec<Section> {
    let mut list = vec![Section::all_sections("All sections")];
    list.extend((0..sections).map(|i| {
        let id = i as i64 + 1;
        let modules = (0..per_section)
            .map(|n| {
                let module = ModuleRef::new(id * 1000 + n as i64, id, "page");
                if n % 7 == 6 {
                    module.stealth()
                } else {
                    module
                }
            })
            .collect();
        let mut section = Section::new(id, id).with_modules(modules);
        section.expanded = i % 5 != 4;
        section
    }));
    list
}

/// Benchmark a single pass with the default quota
fn bench_single_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager_single_pass");
    let policy = StandardAccessPolicy;

    for size in [10, 50, 200].iter() {
        let sections = generate_course(*size, 3);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_sections", size)),
            &sections,
            |b, sections| {
                b.iter(|| {
                    let mut pager = ActivityPager::new(LOAD_MORE_ACTIVITIES);
                    black_box(pager.show_more(black_box(sections), &policy))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark paging through a whole course until nothing is left
fn bench_page_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager_page_to_end");
    let policy = StandardAccessPolicy;

    for (size, per_section) in [(20, 5), (100, 5), (500, 10)].iter() {
        let sections = generate_course(*size, *per_section);
        group.throughput(Throughput::Elements(sections.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("sections", format!("{}x{}", size, per_section)),
            &sections,
            |b, sections| {
                b.iter(|| {
                    let mut pager = ActivityPager::new(LOAD_MORE_ACTIVITIES);
                    let mut passes = 0;
                    loop {
                        pager.show_more(sections, &policy);
                        passes += 1;
                        if !pager.can_load_more() {
                            break;
                        }
                    }
                    black_box(passes)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the effect of the quota on a large course
fn bench_quota(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager_quota");
    let policy = StandardAccessPolicy;
    let sections = generate_course(300, 6);

    for quota in [1, 10, 50, 250].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(quota), quota, |b, &quota| {
            b.iter(|| {
                let mut pager = ActivityPager::new(quota);
                pager.show_more(&sections, &policy);
                while pager.can_load_more() {
                    pager.show_more(&sections, &policy);
                }
                black_box(pager.cursor())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_pass, bench_page_to_end, bench_quota);
criterion_main!(benches);
