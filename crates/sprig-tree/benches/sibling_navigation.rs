//! Benchmarks for sibling navigation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sprig_tree::{Blueprint, Blueprints, CyclePolicy, FilterSet, NewPage, PageTree, SiblingAware};

/// Create a single-level tree with alternating templates and statuses.
fn create_tree(breadth: usize, policy: Option<CyclePolicy>) -> PageTree {
    let blueprints = match policy {
        Some(cycle) => ["a", "b"].into_iter().fold(Blueprints::new(), |bp, t| {
            bp.with(
                t,
                Blueprint {
                    cycle: Some(cycle.clone()),
                    ..Default::default()
                },
            )
        }),
        None => Blueprints::new(),
    };

    let mut builder = PageTree::builder().with_blueprints(blueprints);
    let parent = builder.add_child(None, NewPage::new("root")).unwrap();
    for i in 0..breadth {
        let template = if i % 2 == 0 { "a" } else { "b" };
        let mut page = NewPage::new(format!("page-{i}")).template(template);
        if i % 3 != 0 {
            page = page.num(u32::try_from(i).unwrap());
        }
        if i % 7 == 0 {
            builder.add_draft(Some(parent), page).unwrap();
        } else {
            builder.add_child(Some(parent), page).unwrap();
        }
    }
    builder.build()
}

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");

    for breadth in [10, 100, 1000] {
        let tree = create_tree(breadth, None);
        let middle = tree.get(&format!("root/page-{}", breadth / 2 + 1)).unwrap();

        group.bench_with_input(BenchmarkId::new("next", breadth), &middle, |b, page| {
            b.iter(|| page.next());
        });
        group.bench_with_input(
            BenchmarkId::new("prev_listed", breadth),
            &middle,
            |b, page| b.iter(|| page.prev_listed()),
        );
    }

    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");

    let policies = [
        ("default", None),
        ("all", Some(CyclePolicy::all())),
        (
            "listed_sorted",
            Some(CyclePolicy {
                status: Some(FilterSet::one("listed")),
                template: Some(FilterSet::one("a")),
                sort_by: Some("num desc".parse().unwrap()),
            }),
        ),
    ];

    for (name, policy) in policies {
        let tree = create_tree(500, policy);
        let page = tree.get("root/page-250").unwrap();

        group.bench_function(BenchmarkId::new("next_cycle", name), |b| {
            b.iter(|| page.next_cycle());
        });
        group.bench_function(BenchmarkId::new("prev_cycle", name), |b| {
            b.iter(|| page.prev_cycle());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_adjacency, bench_cycle);
criterion_main!(benches);
