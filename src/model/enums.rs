//! AAS enumerations.
//!
//! Every enumeration has two spellings: the JSON literal (`"Instance"`,
//! `"xs:string"`) and the RDF IRI (`aas:ModellingKind/Instance`, `xsd:string`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An enumeration with a JSON literal and an RDF IRI per value.
pub trait AasEnum: Sized + Copy + 'static {
    /// Enumeration name, for error messages.
    const NAME: &'static str;

    /// Value for an RDF IRI.
    fn from_iri(iri: &str) -> Option<Self>;

    /// RDF IRI of the value.
    fn iri(self) -> &'static str;

    /// JSON literal of the value.
    fn as_str(self) -> &'static str;
}

/// Declares an [`AasEnum`] with serde renames for the JSON literals.
///
/// `Variant => "json"` uses the JSON literal as the IRI suffix;
/// `Variant => "json" as "suffix"` spells the suffix out.
macro_rules! aas_enum {
    (
        $(#[$meta:meta])*
        $name:ident in $prefix:literal {
            $( $variant:ident => $json:literal as $local:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $json)] $variant, )+
        }

        impl AasEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn from_iri(iri: &str) -> Option<Self> {
                match iri.strip_prefix($prefix)? {
                    $( $local => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn iri(self) -> &'static str {
                match self {
                    $( Self::$variant => concat!($prefix, $local), )+
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $json, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident in $prefix:literal {
            $( $variant:ident => $json:literal ),+ $(,)?
        }
    ) => {
        aas_enum! {
            $(#[$meta])*
            $name in $prefix { $( $variant => $json as $json ),+ }
        }
    };
}

aas_enum! {
    ModellingKind in "https://admin-shell.io/aas/3/0/ModellingKind/" {
        Template => "Template",
        Instance => "Instance",
    }
}

aas_enum! {
    AssetKind in "https://admin-shell.io/aas/3/0/AssetKind/" {
        Type => "Type",
        Instance => "Instance",
        NotApplicable => "NotApplicable",
    }
}

aas_enum! {
    ReferenceTypes in "https://admin-shell.io/aas/3/0/ReferenceTypes/" {
        ExternalReference => "ExternalReference",
        ModelReference => "ModelReference",
    }
}

aas_enum! {
    KeyTypes in "https://admin-shell.io/aas/3/0/KeyTypes/" {
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        AssetAdministrationShell => "AssetAdministrationShell",
        BasicEventElement => "BasicEventElement",
        Blob => "Blob",
        Capability => "Capability",
        ConceptDescription => "ConceptDescription",
        DataElement => "DataElement",
        Entity => "Entity",
        EventElement => "EventElement",
        File => "File",
        FragmentReference => "FragmentReference",
        GlobalReference => "GlobalReference",
        Identifiable => "Identifiable",
        MultiLanguageProperty => "MultiLanguageProperty",
        Operation => "Operation",
        Property => "Property",
        Range => "Range",
        Referable => "Referable",
        ReferenceElement => "ReferenceElement",
        RelationshipElement => "RelationshipElement",
        Submodel => "Submodel",
        SubmodelElement => "SubmodelElement",
        SubmodelElementCollection => "SubmodelElementCollection",
        SubmodelElementList => "SubmodelElementList",
    }
}

aas_enum! {
    EntityType in "https://admin-shell.io/aas/3/0/EntityType/" {
        CoManagedEntity => "CoManagedEntity",
        SelfManagedEntity => "SelfManagedEntity",
    }
}

aas_enum! {
    QualifierKind in "https://admin-shell.io/aas/3/0/QualifierKind/" {
        ConceptQualifier => "ConceptQualifier",
        TemplateQualifier => "TemplateQualifier",
        ValueQualifier => "ValueQualifier",
    }
}

aas_enum! {
    /// Element kind of a `SubmodelElementList`.
    AasSubmodelElements in "https://admin-shell.io/aas/3/0/AasSubmodelElements/" {
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        BasicEventElement => "BasicEventElement",
        Blob => "Blob",
        Capability => "Capability",
        DataElement => "DataElement",
        Entity => "Entity",
        EventElement => "EventElement",
        File => "File",
        MultiLanguageProperty => "MultiLanguageProperty",
        Operation => "Operation",
        Property => "Property",
        Range => "Range",
        ReferenceElement => "ReferenceElement",
        RelationshipElement => "RelationshipElement",
        SubmodelElement => "SubmodelElement",
        SubmodelElementCollection => "SubmodelElementCollection",
        SubmodelElementList => "SubmodelElementList",
    }
}

aas_enum! {
    Direction in "https://admin-shell.io/aas/3/0/Direction/" {
        Input => "input",
        Output => "output",
    }
}

aas_enum! {
    StateOfEvent in "https://admin-shell.io/aas/3/0/StateOfEvent/" {
        On => "on",
        Off => "off",
    }
}

aas_enum! {
    DataTypeIec61360 in "https://admin-shell.io/aas/3/0/DataTypeIec61360/" {
        Date => "DATE",
        String => "STRING",
        StringTranslatable => "STRING_TRANSLATABLE",
        IntegerMeasure => "INTEGER_MEASURE",
        IntegerCount => "INTEGER_COUNT",
        IntegerCurrency => "INTEGER_CURRENCY",
        RealMeasure => "REAL_MEASURE",
        RealCount => "REAL_COUNT",
        RealCurrency => "REAL_CURRENCY",
        Boolean => "BOOLEAN",
        Iri => "IRI",
        Irdi => "IRDI",
        Rational => "RATIONAL",
        RationalMeasure => "RATIONAL_MEASURE",
        Time => "TIME",
        Timestamp => "TIMESTAMP",
        File => "FILE",
        Html => "HTML",
        Blob => "BLOB",
    }
}

aas_enum! {
    /// Value type of properties, ranges and qualifiers. In RDF the value is
    /// the XSD datatype IRI itself.
    DataTypeDefXsd in "http://www.w3.org/2001/XMLSchema#" {
        AnyUri => "xs:anyURI" as "anyURI",
        Base64Binary => "xs:base64Binary" as "base64Binary",
        Boolean => "xs:boolean" as "boolean",
        Byte => "xs:byte" as "byte",
        Date => "xs:date" as "date",
        DateTime => "xs:dateTime" as "dateTime",
        Decimal => "xs:decimal" as "decimal",
        Double => "xs:double" as "double",
        Duration => "xs:duration" as "duration",
        Float => "xs:float" as "float",
        GDay => "xs:gDay" as "gDay",
        GMonth => "xs:gMonth" as "gMonth",
        GMonthDay => "xs:gMonthDay" as "gMonthDay",
        GYear => "xs:gYear" as "gYear",
        GYearMonth => "xs:gYearMonth" as "gYearMonth",
        HexBinary => "xs:hexBinary" as "hexBinary",
        Int => "xs:int" as "int",
        Integer => "xs:integer" as "integer",
        Long => "xs:long" as "long",
        NegativeInteger => "xs:negativeInteger" as "negativeInteger",
        NonNegativeInteger => "xs:nonNegativeInteger" as "nonNegativeInteger",
        NonPositiveInteger => "xs:nonPositiveInteger" as "nonPositiveInteger",
        PositiveInteger => "xs:positiveInteger" as "positiveInteger",
        Short => "xs:short" as "short",
        String => "xs:string" as "string",
        Time => "xs:time" as "time",
        UnsignedByte => "xs:unsignedByte" as "unsignedByte",
        UnsignedInt => "xs:unsignedInt" as "unsignedInt",
        UnsignedLong => "xs:unsignedLong" as "unsignedLong",
        UnsignedShort => "xs:unsignedShort" as "unsignedShort",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aas_enum_iris() {
        assert_eq!(
            ModellingKind::Instance.iri(),
            "https://admin-shell.io/aas/3/0/ModellingKind/Instance"
        );
        assert_eq!(
            Direction::from_iri("https://admin-shell.io/aas/3/0/Direction/output"),
            Some(Direction::Output)
        );
        assert_eq!(KeyTypes::from_iri("https://admin-shell.io/aas/3/0/KeyTypes/Nope"), None);
        assert_eq!(AssetKind::from_iri("https://example.org/AssetKind/Type"), None);
    }

    #[test]
    fn xsd_value_types_use_prefixed_json_and_xsd_iris() {
        assert_eq!(DataTypeDefXsd::Double.iri(), "http://www.w3.org/2001/XMLSchema#double");
        assert_eq!(DataTypeDefXsd::Double.as_str(), "xs:double");
        assert_eq!(
            serde_json::to_value(DataTypeDefXsd::AnyUri).unwrap(),
            serde_json::json!("xs:anyURI")
        );
        let parsed: DataTypeDefXsd = serde_json::from_str("\"xs:dateTime\"").unwrap();
        assert_eq!(parsed, DataTypeDefXsd::DateTime);
    }

    #[test]
    fn iec61360_types_serialize_upper_snake() {
        assert_eq!(DataTypeIec61360::RealMeasure.to_string(), "REAL_MEASURE");
        assert_eq!(
            DataTypeIec61360::from_iri("https://admin-shell.io/aas/3/0/DataTypeIec61360/REAL_MEASURE"),
            Some(DataTypeIec61360::RealMeasure)
        );
    }
}
