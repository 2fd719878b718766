//! Film and actor co-occurrence networks built from film records

use crate::data::preprocessing::normalize_genre;
use crate::data::FilmRecord;
use crate::error::Result;
use crate::graph::builder::GraphBuilder;
use crate::graph::compressed::FilmAttributes;
use crate::graph::CompressedGraph;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Both networks derived from one set of film records
#[derive(Debug, Clone)]
pub struct FilmNetworks {
    /// One node per film, edges between films sharing an actor
    pub film: CompressedGraph,

    /// One node per actor, edges between co-stars
    pub actor: CompressedGraph,
}

/// Build the film network and the actor network in one go
pub fn build_networks(records: &[FilmRecord]) -> Result<FilmNetworks> {
    Ok(FilmNetworks {
        film: build_film_network(records)?,
        actor: build_actor_network(records)?,
    })
}

/// Distinct, non-blank cast members of a film in billing order
fn distinct_cast(record: &FilmRecord) -> Vec<&str> {
    let mut seen = HashSet::new();
    record
        .cast
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty() && seen.insert(*a))
        .collect()
}

/// Build the film network: one node per film, one edge per pair of films sharing an actor
pub fn build_film_network(records: &[FilmRecord]) -> Result<CompressedGraph> {
    log::info!("Building film network from {} records", records.len());

    let mut builder = GraphBuilder::with_capacity(records.len());
    let mut films_by_actor: HashMap<&str, Vec<u32>> = HashMap::new();

    for record in records {
        let attributes = FilmAttributes {
            genres: record.genres.iter().map(|g| normalize_genre(g)).collect(),
            box_office: record.box_office,
            bucket: record.bucket,
            community: None,
        };
        let idx = builder.add_film_node(record.identifier()?, attributes)?;

        for actor in distinct_cast(record) {
            films_by_actor.entry(actor).or_default().push(idx);
        }
    }

    for films in films_by_actor.values() {
        for (&a, &b) in films.iter().tuple_combinations() {
            builder.add_edge_by_index(a, b);
        }
    }

    let graph = builder.build();
    log::info!(
        "Film network has {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );
    Ok(graph)
}

/// Build the actor network: one node per actor, a clique over each film's cast
pub fn build_actor_network(records: &[FilmRecord]) -> Result<CompressedGraph> {
    log::info!("Building actor network from {} records", records.len());

    let mut builder = GraphBuilder::with_capacity(records.len() * 8);

    for record in records {
        record.identifier()?;

        let cast: Vec<u32> = distinct_cast(record)
            .into_iter()
            .map(|actor| builder.get_or_create_node(actor))
            .collect();

        for (&a, &b) in cast.iter().tuple_combinations() {
            builder.add_edge_by_index(a, b);
        }
    }

    let graph = builder.build();
    log::info!(
        "Actor network has {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn film(title: &str, cast: &[&str]) -> FilmRecord {
        FilmRecord::new(title, cast.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn disjoint_casts_are_not_linked() {
        let records = vec![film("A", &["x", "y"]), film("B", &["z"]), film("C", &[])];
        let graph = build_film_network(&records).unwrap();
        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn several_shared_actors_give_one_edge() {
        let records = vec![film("A", &["x", "y", "z"]), film("B", &["y", "z"])];
        let graph = build_film_network(&records).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn cast_forms_a_clique() {
        let records = vec![film("A", &["a", "b", "c", "d"])];
        let graph = build_actor_network(&records).unwrap();
        assert_eq!(graph.node_count, 4);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn recurring_pairs_are_counted_once() {
        let records = vec![film("A", &["a", "b", "c"]), film("B", &["b", "c", "d"])];
        let graph = build_actor_network(&records).unwrap();
        // {a,b},{a,c},{b,c} + {b,d},{c,d}; {b,c} appears in both films
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn repeated_credit_is_not_a_self_loop() {
        let records = vec![film("A", &["a", "a", "b"])];
        let graph = build_actor_network(&records).unwrap();
        assert_eq!(graph.node_count, 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn film_attributes_are_normalised() {
        let records = vec![
            film("A", &["x"]).with_genres(vec!["Science Fiction".into(), "Drama".into()])
        ];
        let graph = build_film_network(&records).unwrap();
        let attrs = graph.attributes(0).unwrap();
        assert!(attrs.has_genre("ScienceFiction"));
        assert_eq!(attrs.community, None);
    }

    #[test]
    fn missing_identifier_fails() {
        let records = vec![film("A", &["x"]), film("", &["y"])];
        assert!(matches!(build_film_network(&records), Err(AnalysisError::Data(_))));
        assert!(matches!(build_actor_network(&records), Err(AnalysisError::Data(_))));
    }

    #[test]
    fn duplicate_identifier_fails() {
        let records = vec![film("A", &["x"]), film("A", &["y"])];
        assert!(matches!(build_film_network(&records), Err(AnalysisError::Data(_))));
    }
}
