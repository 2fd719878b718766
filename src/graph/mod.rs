//! Graph representation, construction and connectivity

pub mod compressed;
pub mod builder;
pub mod networks;
pub mod algorithms;

pub use compressed::{CompressedGraph, FilmAttributes};
pub use networks::{build_actor_network, build_film_network, build_networks, FilmNetworks};
