// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # kg2aas
//!
//! Bidirectional mapping between RDF triple graphs and typed Asset
//! Administration Shell (AAS 3.0) documents.
//!
//! ## Architecture
//!
//! - **Triple graph** (`graph`): immutable, indexed triple store with Turtle and N-Triples I/O
//! - **Query** (`query`): placeholder binding on SPARQL templates, oxigraph-backed executor
//! - **Classifier** (`classify`): finds shells, submodels and concept descriptions by `rdf:type`
//! - **Mapper** (`mapper`): graph → typed [`model`] tree, with type dispatch and cycle detection
//! - **Serializer** (`serializer`): typed tree → graph, with deterministic identifiers
//! - **Validation** (`validate`): adapter to an external JSON-schema validator
//! - **Pipeline** (`pipeline`): query → classify → map → validate, configured from TOML
//!
//! ## Library usage
//!
//! ```no_run
//! use kg2aas::graph::rdf;
//! use kg2aas::pipeline::{Pipeline, PipelineConfig};
//! use kg2aas::query::{OxigraphExecutor, QueryTemplate};
//!
//! let source = rdf::read_file("dataset.ttl".as_ref()).unwrap();
//! let template = QueryTemplate::load("mapping.sparql".as_ref()).unwrap();
//! let pipeline = Pipeline::new(PipelineConfig::with_namespace("https://lab.example.net"));
//! let env = pipeline
//!     .run(&source, &template, &OxigraphExecutor::new(), None)
//!     .unwrap();
//! println!("{}", kg2aas::pipeline::to_json(&env).unwrap());
//! ```

pub mod classify;
pub mod error;
pub mod graph;
pub mod mapper;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod serializer;
pub mod validate;
pub mod vocab;
