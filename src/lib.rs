//! Materialize declarative directory trees onto disk.
//!
//! A tree is described as a [`structure::Container`] of named directories and
//! files, and [`materializer::materialize`] creates it below a base path.

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod description;
pub mod ext;
pub mod materializer;
pub mod structure;
#[cfg(test)]
mod test_support;
