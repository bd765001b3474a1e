//! Graph construction tests
//! Both construction methods, node collapsing, parallel edges and degree bookkeeping

use kmer_assembler::assembly::graph_builder::*;
use kmer_assembler::core::graph::DiGraph;
use kmer_assembler::utils::sequence::kmers_of;

fn random_dna(rng: &mut fastrand::Rng, length: usize) -> String {
    (0..length).map(|_| b"acgt"[rng.usize(0..4)] as char).collect()
}

fn shuffled(mut kmers: Vec<String>, rng: &mut fastrand::Rng) -> Vec<String> {
    rng.shuffle(&mut kmers);
    kmers
}

/// Incoming counts must equal how often each index appears in outgoing lists
fn assert_degree_invariant(graph: &DiGraph, kmer_count: usize) {
    let mut observed = vec![0usize; graph.len()];
    for node in graph.nodes() {
        for &target in node.outgoing() {
            observed[target] += 1;
        }
    }
    for (index, node) in graph.nodes().iter().enumerate() {
        assert_eq!(
            node.in_degree(),
            observed[index],
            "incoming count of node {index} ({}) disagrees with outgoing lists",
            node.label()
        );
    }
    let total_out: usize = graph.nodes().iter().map(|n| n.out_degree()).sum();
    let total_in: usize = graph.nodes().iter().map(|n| n.in_degree()).sum();
    assert_eq!(total_out, kmer_count);
    assert_eq!(total_in, kmer_count);
}

#[cfg(test)]
mod graph_construction_tests {
    use super::*;

    #[test]
    fn test_homopolymer_collapses_to_single_node() {
        // "aaaaaaaaaaa" with k = 5: seven copies of "aaaaa"
        let kmers = kmers_of("aaaaaaaaaaa", 5);
        assert_eq!(kmers.len(), 7);

        for method in ConstructionMethod::ALL {
            let graph = method.build(&kmers).unwrap();
            assert_eq!(graph.len(), 1);
            let node = graph.node(0).unwrap();
            assert_eq!(node.label(), "aaaa");
            assert_eq!(node.out_degree(), 7);
            assert_eq!(node.in_degree(), 7);
            assert!(node.outgoing().iter().all(|&t| t == 0));
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let kmers = kmers_of("agcagctcagc", 3);
        let graph = build_by_comparison(&kmers).unwrap();
        let labels: std::collections::HashSet<&str> =
            graph.nodes().iter().map(|n| n.label()).collect();
        assert_eq!(labels.len(), graph.len());
        assert_eq!(graph.len(), 5); // ag, gc, ca, ct, tc
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_first_appearance_order() {
        let graph = build_by_hashing(&["cag", "agc", "gca"]).unwrap();
        let labels: Vec<&str> = graph.nodes().iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["ca", "ag", "gc"]);
    }

    #[test]
    fn test_degree_invariant_on_random_inputs() {
        let mut rng = fastrand::Rng::with_seed(2024);
        for _ in 0..50 {
            let length = rng.usize(5..400);
            let k = rng.usize(2..6).min(length);
            let kmers = shuffled(kmers_of(&random_dna(&mut rng, length), k), &mut rng);

            for method in ConstructionMethod::ALL {
                let graph = method.build(&kmers).unwrap();
                assert_degree_invariant(&graph, kmers.len());
                assert!(graph.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_methods_build_identical_graphs() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..30 {
            let length = rng.usize(10..300);
            let k = rng.usize(3..12).min(length);
            let kmers = shuffled(kmers_of(&random_dna(&mut rng, length), k), &mut rng);

            let by_comparison = build_by_comparison(&kmers).unwrap();
            let by_hashing = build_by_hashing(&kmers).unwrap();
            assert_eq!(by_comparison, by_hashing);
        }
    }

    #[test]
    fn test_alphabet_is_not_restricted_to_dna() {
        let graph = build_by_hashing(&["xyz", "yzx", "zxy"]).unwrap();
        assert_eq!(graph.len(), 3);
        assert!(graph.is_balanced());
    }

    #[test]
    fn test_empty_input_builds_empty_graph() {
        let graph = build_by_hashing::<&str>(&[]).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
