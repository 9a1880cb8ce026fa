//! Multilevel coarsening: matches and contracts a fine [`Graph`] into a
//! smaller weighted [`CoarseGraph`] so eigenvector computation converges
//! quickly on the reduced problem (component C of the embedding pipeline).
//!
//! The matching loop below is a direct port of the reference engine's
//! `simpleCoarsening`: a union-find over vertex ids, resolved with path
//! *halving* rather than full path compression during the matching rounds
//! (`while parent[u] != u { parent[u] = parent[parent[u]]; u = parent[u]; }`),
//! with a separate finalization pass before numbering coarse vertices. This
//! is deliberate — see DESIGN.md — and must not be "simplified" into a
//! fully-compressing find, which would change which vertex ids land in
//! which coarse group on ties.

use speclayout_graph::{CoarseGraph, Graph};

/// Default maximum coarse vertex count the matching rounds aim for.
pub const DEFAULT_TARGET: usize = 1000;
/// Hard cap on the number of matching rounds, regardless of whether the
/// target was reached.
pub const DEFAULT_ROUND_CAP: usize = 100;

/// Result of coarsening a fine graph: the coarse graph itself, plus the
/// fine-to-coarse vertex mapping (`coarse_id[v]` for every fine vertex `v`).
pub struct Coarsening {
    pub coarse: CoarseGraph,
    pub coarse_id: Vec<u32>,
}

fn find(parent: &mut [usize], mut u: usize) -> usize {
    while parent[u] != u {
        parent[u] = parent[parent[u]];
        u = parent[u];
    }
    u
}

/// Runs the matching rounds and contracts the result into a [`CoarseGraph`].
///
/// Rounds continue until the coarse vertex count drops to `n_target` or
/// `round_cap` rounds have run, whichever comes first. Matching within a
/// round scans vertices in increasing id order (required for determinism —
/// see spec.md §5).
pub fn coarsen(graph: &Graph, n_target: usize, round_cap: usize) -> Coarsening {
    let n = graph.n();
    let mut parent: Vec<usize> = (0..n).collect();
    let mut available = vec![true; n];

    let mut coarse_count = n;
    let mut rounds = 0usize;
    while coarse_count > n_target && rounds < round_cap {
        rounds += 1;
        let mut matched = 0usize;
        for i in 0..n {
            let u = find(&mut parent, i);
            if !available[u] {
                continue;
            }
            for &w in graph.neighbors(u) {
                let v = find(&mut parent, w as usize);
                if v == u || !available[v] {
                    continue;
                }
                let (hi, lo) = if u > v { (u, v) } else { (v, u) };
                parent[hi] = lo;
                available[u] = false;
                available[v] = false;
                matched += 2;
                break;
            }
        }
        let unmatched = coarse_count - matched;
        coarse_count = matched / 2 + unmatched;
        available.iter_mut().for_each(|a| *a = true);
    }
    log::debug!(
        "coarsening: {} fine vertices -> {} coarse vertices over {} round(s)",
        n,
        coarse_count,
        rounds
    );

    // Finalize roots: a second find pass, without path halving mid-pass,
    // matching the reference implementation's separate "update coarse IDs"
    // step.
    for i in 0..n {
        let mut u = parent[i];
        while u != parent[u] {
            u = parent[parent[u]];
        }
        parent[i] = u;
    }

    // Number roots densely in increasing vertex-id order.
    let mut vertex_ids = vec![u32::MAX; n];
    let mut next_id = 0u32;
    for i in 0..n {
        if parent[i] == i {
            vertex_ids[i] = next_id;
            next_id += 1;
        }
    }
    for i in 0..n {
        if vertex_ids[i] == u32::MAX {
            vertex_ids[i] = vertex_ids[parent[i]];
        }
    }
    let n_coarse = next_id as usize;

    // Emit every fine incidence as a coarse (u, v) pair, sort lexically, and
    // compact runs of identical pairs into one coarse edge per run.
    let mut coarse_edges: Vec<(u32, u32)> = Vec::with_capacity(graph.m());
    for i in 0..n {
        let u = vertex_ids[i];
        for &w in graph.neighbors(i) {
            let v = vertex_ids[w as usize];
            coarse_edges.push((u, v));
        }
    }
    coarse_edges.sort_unstable();

    let mut row_offsets = vec![0u32; n_coarse + 1];
    let mut adj = Vec::new();
    let mut eweights = Vec::new();
    let mut idx = 0;
    while idx < coarse_edges.len() {
        let (u, v) = coarse_edges[idx];
        let mut run = 1usize;
        while idx + run < coarse_edges.len() && coarse_edges[idx + run] == (u, v) {
            run += 1;
        }
        adj.push(v);
        eweights.push(run as f64);
        row_offsets[u as usize + 1] += 1;
        idx += run;
    }
    for i in 0..n_coarse {
        row_offsets[i + 1] += row_offsets[i];
    }

    let coarse = CoarseGraph::from_parts(row_offsets, adj, eweights);
    Coarsening {
        coarse,
        coarse_id: vertex_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speclayout_graph::Graph;

    #[test]
    fn coarsening_never_exceeds_fine_count() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let result = coarsen(&g, 1000, 100);
        assert!(result.coarse.n() <= g.n());
        for &cid in &result.coarse_id {
            assert!((cid as usize) < result.coarse.n());
        }
    }

    #[test]
    fn complete_graph_k10_coarsens_to_a_handful_of_reps() {
        let mut edges = Vec::new();
        for u in 0..10u32 {
            for v in (u + 1)..10u32 {
                edges.push((u, v));
            }
        }
        let g = Graph::from_edges(edges).unwrap();
        // n_target must sit below the fine vertex count or the `while
        // coarse_count > n_target` guard never runs a round at all.
        let result = coarsen(&g, 2, 100);
        assert!(result.coarse.n() >= 1 && result.coarse.n() <= 5);
    }

    #[test]
    fn coarse_edges_have_no_duplicate_endpoints_and_positive_weight() {
        let mut edges = Vec::new();
        for u in 0..20u32 {
            for v in (u + 1)..20u32 {
                edges.push((u, v));
            }
        }
        let g = Graph::from_edges(edges).unwrap();
        let result = coarsen(&g, 2, 100);
        for u in 0..result.coarse.n() {
            let neighbors = result.coarse.neighbors(u);
            let mut seen = std::collections::HashSet::new();
            for &v in neighbors {
                assert!(seen.insert(v), "duplicate coarse edge endpoint");
            }
            for &w in result.coarse.weights(u) {
                assert!(w > 0.0);
            }
        }
    }

    #[test]
    fn every_fine_vertex_is_mapped() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let result = coarsen(&g, 2, 100);
        assert_eq!(result.coarse_id.len(), g.n());
        for &cid in &result.coarse_id {
            assert!((cid as usize) < result.coarse.n());
        }
    }
}
