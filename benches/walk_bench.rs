use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use sieve_digraph::prelude::*;

/// Complete binary tree with `levels` levels, ids `1..2^levels`, edges `n -> 2n, 2n+1`.
fn build_binary_tree(levels: u32) -> IdGraph<u32> {
    let last = (1u32 << levels) - 1;
    IdGraph::from_child_map(
        1..=last,
        (1..=last / 2).map(|n| (n, [2 * n, 2 * n + 1])),
    )
    .expect("ids in range")
}

fn bench_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for &levels in &[10u32, 14u32] {
        let g = build_binary_tree(levels);
        let leaf = 1u32 << (levels - 1);

        group.bench_with_input(BenchmarkId::new("descendants_bfs", levels), &levels, |b, _| {
            b.iter(|| black_box(g.walk_ids(Strategy::BFS, true, [1], Dir::Down)));
        });

        group.bench_with_input(BenchmarkId::new("descendants_dfs", levels), &levels, |b, _| {
            b.iter(|| black_box(g.walk_ids(Strategy::DFS, true, [1], Dir::Down)));
        });

        group.bench_with_input(BenchmarkId::new("ancestor_ids", levels), &levels, |b, _| {
            b.iter(|| black_box(g.ancestor_ids(&leaf, false)));
        });

        group.bench_with_input(BenchmarkId::new("build_and_topsort", levels), &levels, |b, &l| {
            b.iter(|| black_box(build_binary_tree(l).optional_topsort()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_walks);
criterion_main!(benches);
