//! Identifiable root entities: shells, submodels, concept descriptions.

use serde::{Deserialize, Serialize};

use super::common::{
    AdministrativeInformation, EmbeddedDataSpecification, Reference, Referable, Resource,
    SpecificAssetId,
};
use super::element::{ElementHeader, SubmodelElement};
use super::enums::{AssetKind, ModellingKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    pub asset_kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thumbnail: Option<Resource>,
}

/// An asset administration shell. Submodels are referenced, not owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    #[serde(flatten)]
    pub referable: Referable,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<EmbeddedDataSpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Reference>,
    pub asset_information: AssetInformation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,
}

/// A submodel and the element tree it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub struct Submodel {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModellingKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodel_elements: Vec<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub struct ConceptDescription {
    #[serde(flatten)]
    pub referable: Referable,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<EmbeddedDataSpecification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub is_case_of: Vec<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataTypeDefXsd, Property};
    use serde_json::json;

    #[test]
    fn submodel_json_carries_model_type() {
        let sm = Submodel {
            header: ElementHeader::with_id_short("TensileTest"),
            id: "https://example.org/sm/1".into(),
            administration: None,
            kind: Some(ModellingKind::Instance),
            submodel_elements: vec![SubmodelElement::Property(Property {
                header: ElementHeader::with_id_short("Force"),
                value_type: DataTypeDefXsd::Double,
                value: None,
                value_id: None,
            })],
        };
        assert_eq!(
            serde_json::to_value(&sm).unwrap(),
            json!({
                "modelType": "Submodel",
                "id": "https://example.org/sm/1",
                "idShort": "TensileTest",
                "kind": "Instance",
                "submodelElements": [
                    {"modelType": "Property", "idShort": "Force", "valueType": "xs:double"}
                ]
            })
        );
    }

    #[test]
    fn shell_json_parses() {
        let shell: AssetAdministrationShell = serde_json::from_value(json!({
            "modelType": "AssetAdministrationShell",
            "id": "https://example.org/aas/1",
            "assetInformation": {"assetKind": "Instance", "globalAssetId": "urn:asset:1"},
            "submodels": [
                {"type": "ModelReference", "keys": [{"type": "Submodel", "value": "https://example.org/sm/1"}]}
            ]
        }))
        .unwrap();
        assert_eq!(shell.asset_information.asset_kind, AssetKind::Instance);
        assert_eq!(shell.submodels.len(), 1);
        assert!(shell.referable.id_short.is_none());
    }
}
