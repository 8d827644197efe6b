//! RDF syntax boundary: Turtle / N-Triples in and out via `oxigraph::io`.
//!
//! Conversion between oxigraph's model and ours happens only here and in the
//! query executor.

use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model as ox;

use crate::error::GraphError;
use crate::vocab::{AAS_NS, RDF_NS, XSD_NS};

use super::{BlankNode, GraphResult, Iri, Literal, Subject, Term, Triple, TripleGraph};

/// Parse RDF text of the given format into a [`TripleGraph`].
///
/// Quads outside the default graph are folded into it.
pub fn parse(data: &[u8], format: RdfFormat, base_iri: Option<&str>) -> GraphResult<TripleGraph> {
    let mut parser = RdfParser::from_format(format);
    if let Some(base) = base_iri {
        parser = parser.with_base_iri(base).map_err(|e| GraphError::InvalidIri {
            iri: base.to_string(),
            message: e.to_string(),
        })?;
    }

    let mut triples = Vec::new();
    for quad in parser.for_reader(data) {
        let quad = quad.map_err(|e| GraphError::Parse {
            format: format.name().to_string(),
            message: e.to_string(),
        })?;
        triples.push(from_ox_triple(ox::Triple::new(
            quad.subject,
            quad.predicate,
            quad.object,
        ))?);
    }
    TripleGraph::load(triples)
}

/// Parse a Turtle document.
pub fn parse_turtle(text: &str) -> GraphResult<TripleGraph> {
    parse(text.as_bytes(), RdfFormat::Turtle, None)
}

/// Parse an N-Triples document.
pub fn parse_ntriples(text: &str) -> GraphResult<TripleGraph> {
    parse(text.as_bytes(), RdfFormat::NTriples, None)
}

/// Read an RDF file, picking the syntax from its extension (Turtle by default).
pub fn read_file(path: &Path) -> GraphResult<TripleGraph> {
    let data = std::fs::read(path).map_err(|e| GraphError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::Turtle);
    tracing::info!(path = %path.display(), format = format.name(), "reading RDF graph");
    parse(&data, format, None)
}

/// Serialize a graph in the given format, triples in graph order.
pub fn serialize(graph: &TripleGraph, format: RdfFormat) -> GraphResult<String> {
    let err = |message: String| GraphError::Serialize {
        format: format.name().to_string(),
        message,
    };

    let mut serializer = RdfSerializer::from_format(format);
    if format == RdfFormat::Turtle {
        for (prefix, iri) in [("aas", AAS_NS), ("rdf", RDF_NS), ("xsd", XSD_NS)] {
            serializer = serializer
                .with_prefix(prefix, iri)
                .map_err(|e| err(e.to_string()))?;
        }
    }

    let mut writer = serializer.for_writer(Vec::new());
    for triple in graph.triples() {
        let triple = to_ox_triple(triple)?;
        writer
            .serialize_triple(&triple)
            .map_err(|e| err(e.to_string()))?;
    }
    let bytes = writer.finish().map_err(|e| err(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| err(e.to_string()))
}

pub fn to_turtle(graph: &TripleGraph) -> GraphResult<String> {
    serialize(graph, RdfFormat::Turtle)
}

pub fn to_ntriples(graph: &TripleGraph) -> GraphResult<String> {
    serialize(graph, RdfFormat::NTriples)
}

// ---------------------------------------------------------------------------
// Model conversion
// ---------------------------------------------------------------------------

pub(crate) fn from_ox_triple(triple: ox::Triple) -> GraphResult<Triple> {
    let subject = match triple.subject {
        ox::NamedOrBlankNode::NamedNode(n) => Subject::Iri(Iri::new_unchecked(n.into_string())),
        ox::NamedOrBlankNode::BlankNode(b) => Subject::Blank(BlankNode::new(b.as_str())),
    };
    let predicate = Iri::new_unchecked(triple.predicate.into_string());
    let object = from_ox_term(triple.object)?;
    Ok(Triple {
        subject,
        predicate,
        object,
    })
}

fn from_ox_term(term: ox::Term) -> GraphResult<Term> {
    match term {
        ox::Term::NamedNode(n) => Ok(Term::Iri(Iri::new_unchecked(n.into_string()))),
        ox::Term::BlankNode(b) => Ok(Term::Blank(BlankNode::new(b.as_str()))),
        ox::Term::Literal(lit) => Ok(Term::Literal(match lit.language() {
            Some(lang) => Literal::lang_string(lit.value(), lang),
            None => Literal::typed(lit.value(), Iri::new_unchecked(lit.datatype().as_str())),
        })),
        #[allow(unreachable_patterns)]
        other => Err(GraphError::UnsupportedTerm {
            position: "object",
            term: other.to_string(),
        }),
    }
}

pub(crate) fn to_ox_triple(triple: &Triple) -> GraphResult<ox::Triple> {
    let subject: ox::NamedOrBlankNode = match &triple.subject {
        Subject::Iri(iri) => named_node(iri)?.into(),
        Subject::Blank(b) => blank_node(b)?.into(),
    };
    let predicate = named_node(&triple.predicate)?;
    let object: ox::Term = match &triple.object {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::Blank(b) => blank_node(b)?.into(),
        Term::Literal(lit) => match lit.language() {
            Some(lang) => ox::Literal::new_language_tagged_literal(lit.lexical(), lang)
                .map_err(|e| GraphError::Serialize {
                    format: "rdf".into(),
                    message: format!("invalid language tag {lang:?}: {e}"),
                })?
                .into(),
            None => ox::Literal::new_typed_literal(lit.lexical(), named_node(lit.datatype())?)
                .into(),
        },
    };
    Ok(ox::Triple::new(subject, predicate, object))
}

fn named_node(iri: &Iri) -> GraphResult<ox::NamedNode> {
    ox::NamedNode::new(iri.as_str()).map_err(|e| GraphError::InvalidIri {
        iri: iri.as_str().to_string(),
        message: e.to_string(),
    })
}

fn blank_node(b: &BlankNode) -> GraphResult<ox::BlankNode> {
    ox::BlankNode::new(b.label()).map_err(|e| GraphError::Serialize {
        format: "rdf".into(),
        message: format!("invalid blank node label {:?}: {e}", b.label()),
    })
}
