//! Treaps with lazy segment actions, kept in an arena.
//!
//! A [`Forest`] stores the nodes of many trees in one arena and hands out [`Root`]
//! handles. Trees can be split and merged in `O(log n)` expected time, segments can be
//! summarized and acted upon lazily, and trees can be ordered either by position
//! ([`ByRank`]) or by key ([`ByKey`]).
//!
//! The [`Sequence`] and [`OrderedMultiset`] wrappers own a forest with a single tree,
//! for when handles aren't needed.
//!
//! What the trees store is described by the [`Data`] trait; common choices live in
//! [`example_data`].

#[macro_use]
extern crate derive_destructure;

mod arena;
pub mod config;
pub mod data;
pub mod error;
pub mod forest;
mod node;
pub mod ordered;
mod priority;
pub mod sequence;

pub use arena::{NodeRef, Root};
pub use config::ForestConfig;
pub use data::*;
pub use error::{Result, TreeError};
pub use forest::*;
pub use ordered::*;
pub use sequence::*;
