//! Datatype-aware literal handling.
//!
//! The graph checks lexical forms of the datatypes it knows when triples are
//! loaded; the mapper converts literals into typed values and rejects datatypes
//! outside the supported set.

use std::sync::LazyLock;

use regex::Regex;

use crate::vocab::{RDF_LANG_STRING, XSD_NS};

use super::Literal;

static RE_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static RE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").unwrap());

static RE_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?INF|NaN)$").unwrap()
});

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]{4,}-[0-9]{2}-[0-9]{2}(Z|[+-][0-9]{2}:[0-9]{2})?$").unwrap()
});

static RE_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-?[0-9]{4,}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$",
    )
    .unwrap()
});

static RE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$").unwrap()
});

static RE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?P([0-9]+Y)?([0-9]+M)?([0-9]+D)?(T([0-9]+H)?([0-9]+M)?([0-9]+(\.[0-9]+)?S)?)?$")
        .unwrap()
});

static RE_HEX_BINARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-fA-F]{2})*$").unwrap());

static RE_BASE64_BINARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/\s]*=?\s*=?\s*$").unwrap());

/// Family of a supported datatype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatatypeKind {
    /// `xsd:string` and its derived string types, `xsd:anyURI`.
    String,
    /// `rdf:langString`.
    LangString,
    Boolean,
    /// An integer type with inclusive bounds (`None` = unbounded).
    Integer { min: Option<i128>, max: Option<i128> },
    Decimal,
    /// `xsd:double` and `xsd:float`.
    Double,
    Date,
    DateTime,
    Time,
    Duration,
    /// Partial Gregorian dates (`gYear`, `gMonthDay`, ...), kept lexical.
    Gregorian,
    HexBinary,
    Base64Binary,
}

/// Classify a datatype IRI. Returns `None` for datatypes outside the supported set.
pub fn datatype_kind(datatype: &str) -> Option<DatatypeKind> {
    if datatype == RDF_LANG_STRING {
        return Some(DatatypeKind::LangString);
    }
    let local = datatype.strip_prefix(XSD_NS)?;
    let kind = match local {
        "string" | "normalizedString" | "token" | "language" | "Name" | "NCName" | "NMTOKEN"
        | "anyURI" | "dateTimeStamp" => DatatypeKind::String,
        "boolean" => DatatypeKind::Boolean,
        "integer" => DatatypeKind::Integer { min: None, max: None },
        "long" => bounded(i64::MIN as i128, i64::MAX as i128),
        "int" => bounded(i32::MIN as i128, i32::MAX as i128),
        "short" => bounded(i16::MIN as i128, i16::MAX as i128),
        "byte" => bounded(i8::MIN as i128, i8::MAX as i128),
        "unsignedLong" => bounded(0, u64::MAX as i128),
        "unsignedInt" => bounded(0, u32::MAX as i128),
        "unsignedShort" => bounded(0, u16::MAX as i128),
        "unsignedByte" => bounded(0, u8::MAX as i128),
        "nonNegativeInteger" => DatatypeKind::Integer { min: Some(0), max: None },
        "positiveInteger" => DatatypeKind::Integer { min: Some(1), max: None },
        "nonPositiveInteger" => DatatypeKind::Integer { min: None, max: Some(0) },
        "negativeInteger" => DatatypeKind::Integer { min: None, max: Some(-1) },
        "decimal" => DatatypeKind::Decimal,
        "double" | "float" => DatatypeKind::Double,
        "date" => DatatypeKind::Date,
        "dateTime" => DatatypeKind::DateTime,
        "time" => DatatypeKind::Time,
        "duration" | "dayTimeDuration" | "yearMonthDuration" => DatatypeKind::Duration,
        "gYear" | "gYearMonth" | "gMonth" | "gMonthDay" | "gDay" => DatatypeKind::Gregorian,
        "hexBinary" => DatatypeKind::HexBinary,
        "base64Binary" => DatatypeKind::Base64Binary,
        _ => return None,
    };
    Some(kind)
}

fn bounded(min: i128, max: i128) -> DatatypeKind {
    DatatypeKind::Integer {
        min: Some(min),
        max: Some(max),
    }
}

/// Check a literal's lexical form against its datatype.
///
/// Literals with datatypes outside the supported set pass; the mapper rejects
/// them only if it actually has to convert one.
pub fn check_lexical(literal: &Literal) -> Result<(), String> {
    match datatype_kind(literal.datatype().as_str()) {
        Some(kind) => check_kind(kind, literal.lexical()),
        None => Ok(()),
    }
}

fn check_kind(kind: DatatypeKind, lexical: &str) -> Result<(), String> {
    let ok = match kind {
        DatatypeKind::String | DatatypeKind::LangString | DatatypeKind::Gregorian => true,
        DatatypeKind::Boolean => matches!(lexical, "true" | "false" | "1" | "0"),
        DatatypeKind::Integer { min, max } => {
            if !RE_INTEGER.is_match(lexical) {
                false
            } else {
                // Beyond i128 only unbounded xsd:integer can hold the value.
                match lexical.parse::<i128>() {
                    Ok(v) => min.is_none_or(|m| v >= m) && max.is_none_or(|m| v <= m),
                    Err(_) => min.is_none() && max.is_none(),
                }
            }
        }
        DatatypeKind::Decimal => RE_DECIMAL.is_match(lexical),
        DatatypeKind::Double => RE_DOUBLE.is_match(lexical),
        DatatypeKind::Date => RE_DATE.is_match(lexical),
        DatatypeKind::DateTime => RE_DATE_TIME.is_match(lexical),
        DatatypeKind::Time => RE_TIME.is_match(lexical),
        DatatypeKind::Duration => {
            RE_DURATION.is_match(lexical)
                && !lexical.ends_with('P')
                && !lexical.ends_with('T')
        }
        DatatypeKind::HexBinary => RE_HEX_BINARY.is_match(lexical),
        DatatypeKind::Base64Binary => {
            RE_BASE64_BINARY.is_match(lexical)
                && lexical.chars().filter(|c| !c.is_whitespace()).count() % 4 == 0
        }
    };
    if ok {
        Ok(())
    } else {
        Err(format!("\"{lexical}\" is not a valid lexical form for {kind:?}"))
    }
}

/// A literal converted according to its datatype.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Text(String),
    LangText { text: String, language: String },
    Boolean(bool),
    Integer(i128),
    /// Decimal, double, temporal and binary values keep their lexical form.
    Lexical { lexical: String, kind: DatatypeKind },
}

/// Why a literal could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    UnsupportedDatatype(String),
    InvalidLexical(String),
}

/// Convert a literal into a [`LiteralValue`] according to its datatype IRI.
pub fn convert(literal: &Literal) -> Result<LiteralValue, ConversionError> {
    let datatype = literal.datatype().as_str();
    let kind = datatype_kind(datatype)
        .ok_or_else(|| ConversionError::UnsupportedDatatype(datatype.to_string()))?;
    check_kind(kind, literal.lexical()).map_err(ConversionError::InvalidLexical)?;

    let lexical = literal.lexical();
    Ok(match kind {
        DatatypeKind::String => LiteralValue::Text(lexical.to_string()),
        DatatypeKind::LangString => LiteralValue::LangText {
            text: lexical.to_string(),
            language: literal.language().unwrap_or_default().to_string(),
        },
        DatatypeKind::Boolean => LiteralValue::Boolean(matches!(lexical, "true" | "1")),
        DatatypeKind::Integer { .. } => match lexical.parse::<i128>() {
            Ok(v) => LiteralValue::Integer(v),
            Err(_) => LiteralValue::Lexical {
                lexical: lexical.to_string(),
                kind,
            },
        },
        _ => LiteralValue::Lexical {
            lexical: lexical.to_string(),
            kind,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Iri;

    fn xsd(local: &str, lexical: &str) -> Literal {
        Literal::typed(lexical, Iri::new(format!("{XSD_NS}{local}")).unwrap())
    }

    #[test]
    fn integer_ranges_are_enforced() {
        assert!(check_lexical(&xsd("byte", "127")).is_ok());
        assert!(check_lexical(&xsd("byte", "128")).is_err());
        assert!(check_lexical(&xsd("unsignedInt", "-1")).is_err());
        assert!(check_lexical(&xsd("integer", "123456789012345678901234567890123456789012")).is_ok());
        assert!(check_lexical(&xsd("positiveInteger", "0")).is_err());
    }

    #[test]
    fn numeric_and_boolean_forms() {
        assert!(check_lexical(&xsd("decimal", "210.5")).is_ok());
        assert!(check_lexical(&xsd("decimal", "2.1e2")).is_err());
        assert!(check_lexical(&xsd("double", "2.1e2")).is_ok());
        assert!(check_lexical(&xsd("double", "-INF")).is_ok());
        assert!(check_lexical(&xsd("boolean", "yes")).is_err());
    }

    #[test]
    fn temporal_forms() {
        assert!(check_lexical(&xsd("date", "2024-05-01")).is_ok());
        assert!(check_lexical(&xsd("dateTime", "2024-05-01T12:00:00.5Z")).is_ok());
        assert!(check_lexical(&xsd("dateTime", "2024-05-01 12:00")).is_err());
        assert!(check_lexical(&xsd("duration", "PT5M")).is_ok());
        assert!(check_lexical(&xsd("duration", "P")).is_err());
        assert!(check_lexical(&xsd("duration", "P1DT")).is_err());
    }

    #[test]
    fn binary_forms() {
        assert!(check_lexical(&xsd("hexBinary", "0fA1")).is_ok());
        assert!(check_lexical(&xsd("hexBinary", "0fA")).is_err());
        assert!(check_lexical(&xsd("base64Binary", "aGVsbG8=")).is_ok());
        assert!(check_lexical(&xsd("base64Binary", "aGVsbG8")).is_err());
    }

    #[test]
    fn unknown_datatypes_pass_the_load_check_but_fail_conversion() {
        let lit = Literal::typed("x", Iri::new("https://example.org/dt/custom").unwrap());
        assert!(check_lexical(&lit).is_ok());
        assert_eq!(
            convert(&lit),
            Err(ConversionError::UnsupportedDatatype(
                "https://example.org/dt/custom".into()
            ))
        );
    }

    #[test]
    fn conversion_by_datatype() {
        assert_eq!(convert(&xsd("boolean", "1")), Ok(LiteralValue::Boolean(true)));
        assert_eq!(convert(&xsd("int", "-42")), Ok(LiteralValue::Integer(-42)));
        assert_eq!(
            convert(&Literal::lang_string("Zugfestigkeit", "de")),
            Ok(LiteralValue::LangText {
                text: "Zugfestigkeit".into(),
                language: "de".into()
            })
        );
        assert!(matches!(
            convert(&xsd("decimal", "0.25")),
            Ok(LiteralValue::Lexical { lexical, .. }) if lexical == "0.25"
        ));
    }
}
