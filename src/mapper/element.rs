//! Constructors for submodel elements, one per variant.

use crate::graph::Subject;
use crate::model::{
    AnnotatedRelationshipElement, BasicEventElement, Blob, Capability, Entity, File,
    MultiLanguageProperty, Operation, OperationVariable, Property, Range, ReferenceElement,
    RelationshipElement, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};
use crate::vocab::{
    self, blob, class, entity, event, file, list, multi_language_property, operation, property,
    range, relationship,
};

use super::{MapResult, Mapper, Scope};

const ELEMENT_CLASSES: &[&str] = &[
    class::PROPERTY,
    class::MULTI_LANGUAGE_PROPERTY,
    class::RANGE,
    class::FILE,
    class::BLOB,
    class::REFERENCE_ELEMENT,
    class::SUBMODEL_ELEMENT_COLLECTION,
    class::SUBMODEL_ELEMENT_LIST,
    class::RELATIONSHIP_ELEMENT,
    class::ANNOTATED_RELATIONSHIP_ELEMENT,
    class::ENTITY,
    class::CAPABILITY,
    class::OPERATION,
    class::BASIC_EVENT_ELEMENT,
];

impl Mapper<'_> {
    /// Map a single submodel element subject.
    pub fn submodel_element(&self, subject: &Subject) -> MapResult<SubmodelElement> {
        self.map_element(&Scope::root(subject))
    }

    pub(super) fn map_element(&self, scope: &Scope<'_>) -> MapResult<SubmodelElement> {
        let class_iri = self.dispatch_type(scope, ELEMENT_CLASSES)?;
        tracing::trace!(subject = %scope.subject, class = class_iri, depth = scope.depth, "mapping element");
        Ok(match class_iri {
            class::PROPERTY => SubmodelElement::Property(self.property(scope)?),
            class::MULTI_LANGUAGE_PROPERTY => {
                SubmodelElement::MultiLanguageProperty(self.multi_language_property(scope)?)
            }
            class::RANGE => SubmodelElement::Range(self.range(scope)?),
            class::FILE => SubmodelElement::File(self.file(scope)?),
            class::BLOB => SubmodelElement::Blob(self.blob(scope)?),
            class::REFERENCE_ELEMENT => {
                SubmodelElement::ReferenceElement(self.reference_element(scope)?)
            }
            class::SUBMODEL_ELEMENT_COLLECTION => {
                SubmodelElement::SubmodelElementCollection(self.collection(scope)?)
            }
            class::SUBMODEL_ELEMENT_LIST => SubmodelElement::SubmodelElementList(self.list(scope)?),
            class::RELATIONSHIP_ELEMENT => {
                SubmodelElement::RelationshipElement(self.relationship(scope)?)
            }
            class::ANNOTATED_RELATIONSHIP_ELEMENT => {
                SubmodelElement::AnnotatedRelationshipElement(self.annotated_relationship(scope)?)
            }
            class::ENTITY => SubmodelElement::Entity(self.entity(scope)?),
            class::CAPABILITY => SubmodelElement::Capability(Capability {
                header: self.header(scope)?,
            }),
            class::OPERATION => SubmodelElement::Operation(self.operation(scope)?),
            _ => SubmodelElement::BasicEventElement(self.basic_event(scope)?),
        })
    }

    fn property(&self, scope: &Scope<'_>) -> MapResult<Property> {
        Ok(Property {
            header: self.header(scope)?,
            value_type: self.required_enumeration(scope, property::VALUE_TYPE)?,
            value: self.text(scope, property::VALUE)?,
            value_id: self.nested(scope, property::VALUE_ID, Self::reference)?,
        })
    }

    fn multi_language_property(&self, scope: &Scope<'_>) -> MapResult<MultiLanguageProperty> {
        Ok(MultiLanguageProperty {
            header: self.header(scope)?,
            value: self.lang_strings(scope, multi_language_property::VALUE)?,
            value_id: self.nested(scope, multi_language_property::VALUE_ID, Self::reference)?,
        })
    }

    fn range(&self, scope: &Scope<'_>) -> MapResult<Range> {
        Ok(Range {
            header: self.header(scope)?,
            value_type: self.required_enumeration(scope, range::VALUE_TYPE)?,
            min: self.text(scope, range::MIN)?,
            max: self.text(scope, range::MAX)?,
        })
    }

    fn file(&self, scope: &Scope<'_>) -> MapResult<File> {
        Ok(File {
            header: self.header(scope)?,
            content_type: self.text(scope, file::CONTENT_TYPE)?,
            value: self.text(scope, file::VALUE)?,
        })
    }

    fn blob(&self, scope: &Scope<'_>) -> MapResult<Blob> {
        Ok(Blob {
            header: self.header(scope)?,
            content_type: self.text(scope, blob::CONTENT_TYPE)?,
            value: self.text(scope, blob::VALUE)?,
        })
    }

    fn reference_element(&self, scope: &Scope<'_>) -> MapResult<ReferenceElement> {
        Ok(ReferenceElement {
            header: self.header(scope)?,
            value: self.nested(scope, vocab::REFERENCE_ELEMENT_VALUE, Self::reference)?,
        })
    }

    fn collection(&self, scope: &Scope<'_>) -> MapResult<SubmodelElementCollection> {
        Ok(SubmodelElementCollection {
            header: self.header(scope)?,
            value: self.nested_list(scope, vocab::COLLECTION_VALUE, Self::map_element)?,
        })
    }

    fn list(&self, scope: &Scope<'_>) -> MapResult<SubmodelElementList> {
        Ok(SubmodelElementList {
            header: self.header(scope)?,
            order_relevant: self.boolean(scope, list::ORDER_RELEVANT)?,
            semantic_id_list_element: self.nested(
                scope,
                list::SEMANTIC_ID_LIST_ELEMENT,
                Self::reference,
            )?,
            type_value_list_element: self
                .required_enumeration(scope, list::TYPE_VALUE_LIST_ELEMENT)?,
            value_type_list_element: self.enumeration(scope, list::VALUE_TYPE_LIST_ELEMENT)?,
            value: self.nested_list(scope, list::VALUE, Self::map_element)?,
        })
    }

    fn relationship(&self, scope: &Scope<'_>) -> MapResult<RelationshipElement> {
        Ok(RelationshipElement {
            header: self.header(scope)?,
            first: self.required(scope, relationship::FIRST, Self::reference)?,
            second: self.required(scope, relationship::SECOND, Self::reference)?,
        })
    }

    fn annotated_relationship(
        &self,
        scope: &Scope<'_>,
    ) -> MapResult<AnnotatedRelationshipElement> {
        Ok(AnnotatedRelationshipElement {
            header: self.header(scope)?,
            first: self.required(scope, relationship::FIRST, Self::reference)?,
            second: self.required(scope, relationship::SECOND, Self::reference)?,
            annotations: self.nested_list(scope, relationship::ANNOTATIONS, Self::map_element)?,
        })
    }

    fn entity(&self, scope: &Scope<'_>) -> MapResult<Entity> {
        Ok(Entity {
            header: self.header(scope)?,
            entity_type: self.required_enumeration(scope, entity::ENTITY_TYPE)?,
            global_asset_id: self.text(scope, entity::GLOBAL_ASSET_ID)?,
            specific_asset_ids: self.nested_list(
                scope,
                entity::SPECIFIC_ASSET_IDS,
                Self::specific_asset_id,
            )?,
            statements: self.nested_list(scope, entity::STATEMENTS, Self::map_element)?,
        })
    }

    fn operation(&self, scope: &Scope<'_>) -> MapResult<Operation> {
        Ok(Operation {
            header: self.header(scope)?,
            input_variables: self.nested_list(
                scope,
                operation::INPUT_VARIABLES,
                Self::operation_variable,
            )?,
            output_variables: self.nested_list(
                scope,
                operation::OUTPUT_VARIABLES,
                Self::operation_variable,
            )?,
            inoutput_variables: self.nested_list(
                scope,
                operation::INOUTPUT_VARIABLES,
                Self::operation_variable,
            )?,
        })
    }

    fn operation_variable(&self, scope: &Scope<'_>) -> MapResult<OperationVariable> {
        let value = self.required(scope, operation::VARIABLE_VALUE, Self::map_element)?;
        Ok(OperationVariable {
            value: Box::new(value),
        })
    }

    fn basic_event(&self, scope: &Scope<'_>) -> MapResult<BasicEventElement> {
        Ok(BasicEventElement {
            header: self.header(scope)?,
            observed: self.required(scope, event::OBSERVED, Self::reference)?,
            direction: self.required_enumeration(scope, event::DIRECTION)?,
            state: self.required_enumeration(scope, event::STATE)?,
            message_topic: self.text(scope, event::MESSAGE_TOPIC)?,
            message_broker: self.nested(scope, event::MESSAGE_BROKER, Self::reference)?,
            last_update: self.text(scope, event::LAST_UPDATE)?,
            min_interval: self.text(scope, event::MIN_INTERVAL)?,
            max_interval: self.text(scope, event::MAX_INTERVAL)?,
        })
    }
}
