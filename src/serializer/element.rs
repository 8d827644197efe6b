//! Emitters for submodel elements.

use crate::graph::{Iri, Literal};
use crate::mapper::MapResult;
use crate::model::{OperationVariable, SubmodelElement};
use crate::vocab::{
    self, blob, class, entity, event, file, list, multi_language_property, operation, property,
    range, relationship,
};

use super::Emitter;

impl Emitter<'_> {
    /// Emit an ordered list of elements under `predicate`.
    pub(super) fn elements(
        &mut self,
        parent: &Iri,
        predicate: &str,
        elements: &[SubmodelElement],
    ) -> MapResult<()> {
        for (pos, element) in elements.iter().enumerate() {
            let node = self.node(parent, predicate, Some(pos), element.class_iri())?;
            self.element(&node, element)?;
        }
        Ok(())
    }

    fn element(&mut self, s: &Iri, element: &SubmodelElement) -> MapResult<()> {
        self.header(s, element.header())?;
        match element {
            SubmodelElement::Property(p) => {
                self.enumeration(s, property::VALUE_TYPE, Some(p.value_type));
                self.text(s, property::VALUE, p.value.as_deref());
                if let Some(value_id) = &p.value_id {
                    self.reference(s, property::VALUE_ID, None, value_id)?;
                }
            }
            SubmodelElement::MultiLanguageProperty(p) => {
                self.lang_strings(
                    s,
                    multi_language_property::VALUE,
                    class::LANG_STRING_TEXT_TYPE,
                    &p.value,
                )?;
                if let Some(value_id) = &p.value_id {
                    self.reference(s, multi_language_property::VALUE_ID, None, value_id)?;
                }
            }
            SubmodelElement::Range(r) => {
                self.enumeration(s, range::VALUE_TYPE, Some(r.value_type));
                self.text(s, range::MIN, r.min.as_deref());
                self.text(s, range::MAX, r.max.as_deref());
            }
            SubmodelElement::File(f) => {
                self.text(s, file::CONTENT_TYPE, f.content_type.as_deref());
                self.text(s, file::VALUE, f.value.as_deref());
            }
            SubmodelElement::Blob(b) => {
                self.text(s, blob::CONTENT_TYPE, b.content_type.as_deref());
                self.text(s, blob::VALUE, b.value.as_deref());
            }
            SubmodelElement::ReferenceElement(r) => {
                if let Some(value) = &r.value {
                    self.reference(s, vocab::REFERENCE_ELEMENT_VALUE, None, value)?;
                }
            }
            SubmodelElement::SubmodelElementCollection(c) => {
                self.elements(s, vocab::COLLECTION_VALUE, &c.value)?;
            }
            SubmodelElement::SubmodelElementList(l) => {
                if let Some(order_relevant) = l.order_relevant {
                    self.emit(s, list::ORDER_RELEVANT, Literal::boolean(order_relevant));
                }
                if let Some(semantic_id) = &l.semantic_id_list_element {
                    self.reference(s, list::SEMANTIC_ID_LIST_ELEMENT, None, semantic_id)?;
                }
                self.enumeration(s, list::TYPE_VALUE_LIST_ELEMENT, Some(l.type_value_list_element));
                self.enumeration(s, list::VALUE_TYPE_LIST_ELEMENT, l.value_type_list_element);
                self.elements(s, list::VALUE, &l.value)?;
            }
            SubmodelElement::RelationshipElement(r) => {
                self.reference(s, relationship::FIRST, None, &r.first)?;
                self.reference(s, relationship::SECOND, None, &r.second)?;
            }
            SubmodelElement::AnnotatedRelationshipElement(r) => {
                self.reference(s, relationship::FIRST, None, &r.first)?;
                self.reference(s, relationship::SECOND, None, &r.second)?;
                self.elements(s, relationship::ANNOTATIONS, &r.annotations)?;
            }
            SubmodelElement::Entity(e) => {
                self.enumeration(s, entity::ENTITY_TYPE, Some(e.entity_type));
                self.text(s, entity::GLOBAL_ASSET_ID, e.global_asset_id.as_deref());
                self.specific_asset_ids(s, entity::SPECIFIC_ASSET_IDS, &e.specific_asset_ids)?;
                self.elements(s, entity::STATEMENTS, &e.statements)?;
            }
            SubmodelElement::Capability(_) => {}
            SubmodelElement::Operation(o) => {
                self.operation_variables(s, operation::INPUT_VARIABLES, &o.input_variables)?;
                self.operation_variables(s, operation::OUTPUT_VARIABLES, &o.output_variables)?;
                self.operation_variables(
                    s,
                    operation::INOUTPUT_VARIABLES,
                    &o.inoutput_variables,
                )?;
            }
            SubmodelElement::BasicEventElement(e) => {
                self.reference(s, event::OBSERVED, None, &e.observed)?;
                self.enumeration(s, event::DIRECTION, Some(e.direction));
                self.enumeration(s, event::STATE, Some(e.state));
                self.text(s, event::MESSAGE_TOPIC, e.message_topic.as_deref());
                if let Some(broker) = &e.message_broker {
                    self.reference(s, event::MESSAGE_BROKER, None, broker)?;
                }
                self.text(s, event::LAST_UPDATE, e.last_update.as_deref());
                self.text(s, event::MIN_INTERVAL, e.min_interval.as_deref());
                self.text(s, event::MAX_INTERVAL, e.max_interval.as_deref());
            }
        }
        Ok(())
    }

    fn operation_variables(
        &mut self,
        parent: &Iri,
        predicate: &str,
        variables: &[OperationVariable],
    ) -> MapResult<()> {
        for (pos, variable) in variables.iter().enumerate() {
            let node = self.node(parent, predicate, Some(pos), class::OPERATION_VARIABLE)?;
            let value = self.node(
                &node,
                operation::VARIABLE_VALUE,
                None,
                variable.value.class_iri(),
            )?;
            self.element(&value, &variable.value)?;
        }
        Ok(())
    }
}
