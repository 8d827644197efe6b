//! Rich diagnostic error types for kg2aas.
//!
//! Each stage of the mapping pipeline defines its own error type with miette
//! `#[diagnostic]` derives, so a failed run tells the user which stage broke,
//! which subject and predicate were involved, and what to look at next.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for kg2aas.
///
/// Each variant wraps a stage-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum Kg2AasError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validate(#[from] ValidateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("malformed triple {triple}: {reason}")]
    #[diagnostic(
        code(kg2aas::graph::malformed_triple),
        help(
            "The literal's lexical form does not match its declared datatype. \
             Fix the value in the source graph or declare a matching datatype."
        )
    )]
    MalformedTriple { triple: String, reason: String },

    #[error("invalid IRI <{iri}>: {message}")]
    #[diagnostic(
        code(kg2aas::graph::invalid_iri),
        help("IRIs must be absolute (scheme included) and must not contain spaces or angle brackets.")
    )]
    InvalidIri { iri: String, message: String },

    #[error("failed to parse {format} input: {message}")]
    #[diagnostic(
        code(kg2aas::graph::parse),
        help("Check the syntax of the input document. Turtle files need their prefixes declared.")
    )]
    Parse { format: String, message: String },

    #[error("failed to serialize graph as {format}: {message}")]
    #[diagnostic(code(kg2aas::graph::serialize))]
    Serialize { format: String, message: String },

    #[error("unsupported RDF term in {position} position: {term}")]
    #[diagnostic(
        code(kg2aas::graph::unsupported_term),
        help("Only IRIs, blank nodes and literals are supported. RDF 1.2 triple terms are not.")
    )]
    UnsupportedTerm { position: &'static str, term: String },

    #[error("failed to read {path}")]
    #[diagnostic(
        code(kg2aas::graph::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum QueryError {
    #[error("query execution failed: {message}")]
    #[diagnostic(
        code(kg2aas::query::execution),
        help(
            "The SPARQL engine rejected the query or failed while evaluating it. \
             Check the query syntax; mapping queries must be CONSTRUCT or DESCRIBE queries."
        )
    )]
    Execution { message: String },

    #[error("invalid query binding: {message}")]
    #[diagnostic(
        code(kg2aas::query::binding),
        help("Placeholders must be non-empty strings.")
    )]
    InvalidBinding { message: String },

    #[error("failed to read query template {path}")]
    #[diagnostic(code(kg2aas::query::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Classification errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClassifyError {
    #[error("subject {subject} is typed as more than one root entity: {types:?}")]
    #[diagnostic(
        code(kg2aas::classify::ambiguous_type),
        help(
            "A subject may be a shell, a submodel or a concept description, never several. \
             Remove the conflicting rdf:type triples from the mapping query."
        )
    )]
    AmbiguousType { subject: String, types: Vec<String> },
}

// ---------------------------------------------------------------------------
// Mapping errors (both directions)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum MapError {
    #[error("subject {subject} has unknown type <{type_iri}>")]
    #[diagnostic(
        code(kg2aas::map::unknown_type),
        help(
            "The rdf:type of this subject is not an AAS class that can appear here. \
             Check the class IRI against the AAS 3.0 RDF vocabulary."
        )
    )]
    UnknownType { subject: String, type_iri: String },

    #[error("subject {subject} is missing mandatory property <{predicate}>")]
    #[diagnostic(
        code(kg2aas::map::missing_property),
        help("Add the property to the source graph or to the mapping query's CONSTRUCT template.")
    )]
    MissingProperty { subject: String, predicate: String },

    #[error("subject {subject}: literal of <{predicate}> has unsupported datatype <{datatype}>")]
    #[diagnostic(
        code(kg2aas::map::unsupported_literal_type),
        help("Supported datatypes are rdf:langString and the XSD string, numeric, boolean, temporal and binary types.")
    )]
    UnsupportedLiteralType {
        subject: String,
        predicate: String,
        datatype: String,
    },

    #[error("cyclic reference at {subject} (depth {depth}, limit {max_depth})")]
    #[diagnostic(
        code(kg2aas::map::cyclic_reference),
        help(
            "The node graph below a root entity must be a tree. \
             Either the input links a node back to one of its ancestors, \
             or the nesting is deeper than `max_depth` allows."
        )
    )]
    CyclicReference {
        subject: String,
        depth: usize,
        max_depth: usize,
    },

    #[error("subject {subject}: <{predicate}> expects {expected}, found {found}")]
    #[diagnostic(
        code(kg2aas::map::unexpected_term),
        help("Nested structures must be IRIs or blank nodes; scalar values must be literals.")
    )]
    UnexpectedTerm {
        subject: String,
        predicate: String,
        expected: &'static str,
        found: String,
    },

    #[error("subject {subject}: invalid value for <{predicate}>: {message}")]
    #[diagnostic(code(kg2aas::map::invalid_value))]
    InvalidValue {
        subject: String,
        predicate: String,
        message: String,
    },

    #[error("identifier {identifier} is already in use")]
    #[diagnostic(
        code(kg2aas::map::identifier_collision),
        help(
            "Serializing would overwrite an existing subject. \
             Enable overwriting explicitly or give the entity a fresh id."
        )
    )]
    IdentifierCollision { identifier: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ValidateError {
    #[error("document does not conform to the schema ({} violation(s))", .violations.len())]
    #[diagnostic(
        code(kg2aas::validate::schema),
        help(
            "The document is structurally well-formed but violates the AAS JSON schema. \
             Each violation names the offending JSON path."
        )
    )]
    SchemaValidation {
        violations: Vec<crate::validate::Violation>,
    },

    #[error("failed to fetch schema from {location}: {message}")]
    #[diagnostic(
        code(kg2aas::validate::schema_fetch),
        help("Check the schema URL or path and your network connection.")
    )]
    SchemaFetch { location: String, message: String },

    #[error("validator failed: {message}")]
    #[diagnostic(
        code(kg2aas::validate::validator),
        help(
            "The external validator did not answer with a validation result. \
             Check that it is installed and speaks the JSON request/response protocol."
        )
    )]
    Validator { message: String },
}

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("pipeline run cancelled before {stage}")]
    #[diagnostic(code(kg2aas::pipeline::cancelled))]
    Cancelled { stage: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validate(#[from] ValidateError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(kg2aas::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(kg2aas::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(code(kg2aas::config::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(kg2aas::config::invalid), help("{message}"))]
    Invalid { message: String },
}

/// Convenience alias for functions returning kg2aas results.
pub type Kg2AasResult<T> = std::result::Result<T, Kg2AasError>;
