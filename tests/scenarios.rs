use box_office_networks::data::FilmRecord;
use box_office_networks::graph::{build_networks, CompressedGraph};
use box_office_networks::stats::degree::{degree_distribution, histogram_with_edges};
use box_office_networks::stats::structure::{
    average_clustering, average_shortest_path_length, structural_statistics,
};

fn film(title: &str, cast: &[&str]) -> FilmRecord {
    FilmRecord::new(title, cast.iter().map(|a| a.to_string()).collect())
}

fn index(graph: &CompressedGraph, id: &str) -> usize {
    graph.node_index(id).unwrap()
}

#[test]
fn shared_actor_links_only_those_films() {
    let records = vec![film("A", &["x", "y"]), film("B", &["y", "z"]), film("C", &["w"])];
    let networks = build_networks(&records).unwrap();

    let films = &networks.film;
    assert_eq!(films.node_count, 3);
    assert_eq!(films.edge_count(), 1);
    assert!(films.has_edge(index(films, "A"), index(films, "B") as u32));
    assert_eq!(films.degree(index(films, "C")), 0);

    let actors = &networks.actor;
    assert_eq!(actors.node_count, 4);
    assert_eq!(actors.edge_count(), 2);
    assert!(actors.has_edge(index(actors, "x"), index(actors, "y") as u32));
    assert!(actors.has_edge(index(actors, "y"), index(actors, "z") as u32));
    assert_eq!(actors.degree(index(actors, "w")), 0);
}

#[test]
fn known_degree_sequence_bins() {
    let degrees = [0.0, 1.0, 1.0, 2.0, 2.0, 3.0];
    let hist = histogram_with_edges(&degrees, &[0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(hist.counts, vec![1, 2, 2, 1]);
}

#[test]
fn film_network_degree_distribution_has_a_bin_per_degree() {
    // chain F1-F2-F3-F4, a triangle F4-F5-F7 through actor s, F6 alone
    let records = vec![
        film("F1", &["p"]),
        film("F2", &["p", "q"]),
        film("F3", &["q", "r"]),
        film("F4", &["r", "s"]),
        film("F5", &["s"]),
        film("F6", &["lone"]),
        film("F7", &["s"]),
    ];
    let films = build_networks(&records).unwrap().film;

    let mut degrees = films.degrees();
    degrees.sort_unstable();
    assert_eq!(degrees, vec![0, 1, 2, 2, 2, 2, 3]);

    let hist = degree_distribution(&films);
    assert_eq!(hist.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(hist.counts, vec![1, 1, 4, 1]);
}

#[test]
fn giant_component_statistics_ignore_smaller_component() {
    // triangle on 0..3, path on 3..8
    let graph = CompressedGraph::from_edge_list(
        8,
        &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 6), (6, 7)],
    );

    // path of 5: distances sum to 20 over 10 pairs
    assert!((average_shortest_path_length(&graph).unwrap() - 2.0).abs() < 1e-12);

    let stats = structural_statistics(&graph).unwrap();
    assert_eq!(stats.component_count, 2);
    assert_eq!(stats.giant_component_nodes, 5);
    assert_eq!(stats.giant_component_edges, 4);
    assert_eq!(stats.average_clustering, 0.0);
    assert!((stats.average_shortest_path - 2.0).abs() < 1e-12);

    // the whole graph would count the triangle
    assert!(average_clustering(&graph) > 0.0);
}
