// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Authoring helpers: node batches for new data types and the core skeleton.

use super::{AddNodesItem, NodeClass, NodeSet};
use crate::types::{
    ids, DataTypeDefinition, EnumDefinition, EnumField, NodeId, StructureDefinition,
    StructureField,
};

/// Builds the nodes of a new structure data type.
///
/// # Example
///
/// ```rust
/// use uaboot::address_space::StructureBuilder;
/// use uaboot::types::{ids, NodeId, StructureField};
///
/// let set = StructureBuilder::new(NodeId::numeric(1, 3001), "PumpStatus")
///     .encoding_id(NodeId::numeric(1, 3002))
///     .field(StructureField::new("Speed", ids::DOUBLE))
///     .field(StructureField::new("Label", ids::STRING).optional())
///     .build();
/// assert_eq!(set.nodes.len(), 2);
/// ```
pub struct StructureBuilder {
    data_type_id: NodeId,
    name: String,
    parent: NodeId,
    encoding_id: NodeId,
    fields: Vec<StructureField>,
}

impl StructureBuilder {
    pub fn new(data_type_id: NodeId, name: impl Into<String>) -> Self {
        Self {
            data_type_id,
            name: name.into(),
            parent: ids::STRUCTURE,
            encoding_id: NodeId::null(),
            fields: Vec::new(),
        }
    }

    /// Supertype (defaults to `Structure`).
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = parent;
        self
    }

    /// Id of the `Default Binary` encoding object. Without one, no encoding
    /// object is emitted.
    pub fn encoding_id(mut self, encoding_id: NodeId) -> Self {
        self.encoding_id = encoding_id;
        self
    }

    pub fn field(mut self, field: StructureField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = StructureField>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn build(self) -> NodeSet {
        let mut definition = StructureDefinition::new(self.fields);
        definition.base_data_type = self.parent.clone();
        definition.default_encoding_id = self.encoding_id.clone();

        let mut nodes = vec![AddNodesItem::new(
            self.data_type_id.clone(),
            self.name,
            NodeClass::DataType,
        )
        .under(self.parent, ids::HAS_SUBTYPE)
        .with_definition(DataTypeDefinition::Structure(definition))];

        if !self.encoding_id.is_null() {
            nodes.push(
                AddNodesItem::new(self.encoding_id, ids::DEFAULT_BINARY, NodeClass::Object)
                    .under(self.data_type_id, ids::HAS_ENCODING)
                    .with_type_definition(ids::DATA_TYPE_ENCODING_TYPE),
            );
        }

        NodeSet {
            nodes,
            references: Vec::new(),
        }
    }
}

/// Builds the node of a new enumeration (or option set) data type.
///
/// Values are assigned sequentially in declaration order.
pub struct EnumBuilder {
    data_type_id: NodeId,
    name: String,
    parent: NodeId,
    fields: Vec<EnumField>,
}

impl EnumBuilder {
    pub fn new(data_type_id: NodeId, name: impl Into<String>) -> Self {
        Self {
            data_type_id,
            name: name.into(),
            parent: ids::ENUMERATION,
            fields: Vec::new(),
        }
    }

    /// Supertype (defaults to `Enumeration`; an unsigned integer for option sets).
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = parent;
        self
    }

    pub fn value(mut self, name: impl Into<String>) -> Self {
        let next = self.fields.len() as i64;
        self.fields.push(EnumField::new(name, next));
        self
    }

    pub fn values<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for name in names {
            self = self.value(name);
        }
        self
    }

    pub fn build(self) -> NodeSet {
        let node = AddNodesItem::new(self.data_type_id, self.name, NodeClass::DataType)
            .under(self.parent, ids::HAS_SUBTYPE)
            .with_definition(DataTypeDefinition::Enumeration(EnumDefinition {
                fields: self.fields,
            }));
        NodeSet {
            nodes: vec![node],
            references: Vec::new(),
        }
    }
}

/// Minimal namespace-0 skeleton: folders, object types, reference types and
/// the data type tree down to the built-in primitives. Parents precede
/// children, so a single pass inserts it.
pub fn core_type_nodes() -> NodeSet {
    let object_type = |id: NodeId, name: &str| AddNodesItem::new(id, name, NodeClass::ObjectType);
    let folder = |id: NodeId, name: &str| {
        AddNodesItem::new(id, name, NodeClass::Object).with_type_definition(ids::FOLDER_TYPE)
    };
    let reference_type =
        |id: NodeId, name: &str| AddNodesItem::new(id, name, NodeClass::ReferenceType);
    let data_type = |id: NodeId, name: &str, parent: &NodeId| {
        AddNodesItem::new(id, name, NodeClass::DataType).under(parent.clone(), ids::HAS_SUBTYPE)
    };

    let mut nodes = vec![
        object_type(ids::BASE_OBJECT_TYPE, "BaseObjectType"),
        object_type(ids::FOLDER_TYPE, "FolderType").under(ids::BASE_OBJECT_TYPE, ids::HAS_SUBTYPE),
        object_type(ids::DATA_TYPE_ENCODING_TYPE, "DataTypeEncodingType")
            .under(ids::BASE_OBJECT_TYPE, ids::HAS_SUBTYPE),
        folder(ids::ROOT_FOLDER, "Root"),
        folder(ids::OBJECTS_FOLDER, "Objects").under(ids::ROOT_FOLDER, ids::ORGANIZES),
        folder(ids::TYPES_FOLDER, "Types").under(ids::ROOT_FOLDER, ids::ORGANIZES),
        folder(ids::DATA_TYPES_FOLDER, "DataTypes").under(ids::TYPES_FOLDER, ids::ORGANIZES),
        folder(ids::REFERENCE_TYPES_FOLDER, "ReferenceTypes")
            .under(ids::TYPES_FOLDER, ids::ORGANIZES),
        reference_type(ids::REFERENCES, "References")
            .under(ids::REFERENCE_TYPES_FOLDER, ids::ORGANIZES),
    ];

    // Reference type tree, flattened to two levels.
    let hierarchical = [
        (ids::ORGANIZES, "Organizes"),
        (ids::HAS_COMPONENT, "HasComponent"),
        (ids::HAS_PROPERTY, "HasProperty"),
        (ids::HAS_SUBTYPE, "HasSubtype"),
    ];
    let non_hierarchical = [
        (ids::HAS_ENCODING, "HasEncoding"),
        (ids::HAS_TYPE_DEFINITION, "HasTypeDefinition"),
    ];
    nodes.push(
        reference_type(ids::HIERARCHICAL_REFERENCES, "HierarchicalReferences")
            .under(ids::REFERENCES, ids::HAS_SUBTYPE),
    );
    nodes.push(
        reference_type(ids::NON_HIERARCHICAL_REFERENCES, "NonHierarchicalReferences")
            .under(ids::REFERENCES, ids::HAS_SUBTYPE),
    );
    for (id, name) in hierarchical {
        nodes.push(reference_type(id, name).under(ids::HIERARCHICAL_REFERENCES, ids::HAS_SUBTYPE));
    }
    for (id, name) in non_hierarchical {
        nodes.push(
            reference_type(id, name).under(ids::NON_HIERARCHICAL_REFERENCES, ids::HAS_SUBTYPE),
        );
    }

    nodes.push(
        AddNodesItem::new(ids::BASE_DATA_TYPE, "BaseDataType", NodeClass::DataType)
            .under(ids::DATA_TYPES_FOLDER, ids::ORGANIZES),
    );
    let tree: [(NodeId, &str, NodeId); 28] = [
        (ids::BOOLEAN, "Boolean", ids::BASE_DATA_TYPE),
        (ids::NUMBER, "Number", ids::BASE_DATA_TYPE),
        (ids::INTEGER, "Integer", ids::NUMBER),
        (ids::UINTEGER, "UInteger", ids::NUMBER),
        (ids::SBYTE, "SByte", ids::INTEGER),
        (ids::INT16, "Int16", ids::INTEGER),
        (ids::INT32, "Int32", ids::INTEGER),
        (ids::INT64, "Int64", ids::INTEGER),
        (ids::BYTE, "Byte", ids::UINTEGER),
        (ids::UINT16, "UInt16", ids::UINTEGER),
        (ids::UINT32, "UInt32", ids::UINTEGER),
        (ids::UINT64, "UInt64", ids::UINTEGER),
        (ids::FLOAT, "Float", ids::NUMBER),
        (ids::DOUBLE, "Double", ids::NUMBER),
        (ids::STRING, "String", ids::BASE_DATA_TYPE),
        (ids::DATE_TIME, "DateTime", ids::BASE_DATA_TYPE),
        (ids::GUID, "Guid", ids::BASE_DATA_TYPE),
        (ids::BYTE_STRING, "ByteString", ids::BASE_DATA_TYPE),
        (ids::XML_ELEMENT, "XmlElement", ids::BASE_DATA_TYPE),
        (ids::NODE_ID, "NodeId", ids::BASE_DATA_TYPE),
        (ids::EXPANDED_NODE_ID, "ExpandedNodeId", ids::BASE_DATA_TYPE),
        (ids::STATUS_CODE, "StatusCode", ids::BASE_DATA_TYPE),
        (ids::QUALIFIED_NAME, "QualifiedName", ids::BASE_DATA_TYPE),
        (ids::LOCALIZED_TEXT, "LocalizedText", ids::BASE_DATA_TYPE),
        (ids::DATA_VALUE, "DataValue", ids::BASE_DATA_TYPE),
        (ids::DIAGNOSTIC_INFO, "DiagnosticInfo", ids::BASE_DATA_TYPE),
        (ids::STRUCTURE, "Structure", ids::BASE_DATA_TYPE),
        (ids::ENUMERATION, "Enumeration", ids::BASE_DATA_TYPE),
    ];
    for (id, name, parent) in tree {
        nodes.push(data_type(id, name, &parent));
    }

    NodeSet {
        nodes,
        references: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::{bulk_load_address_space, MemoryAddressSpace};
    use crate::config::RetryPolicy;
    use crate::types::StructureType;

    #[test]
    fn test_structure_builder_nodes() {
        let set = StructureBuilder::new(NodeId::numeric(1, 10), "Valve")
            .encoding_id(NodeId::numeric(1, 11))
            .field(StructureField::new("Open", ids::BOOLEAN))
            .field(StructureField::new("Note", ids::STRING).optional())
            .build();

        assert_eq!(set.nodes.len(), 2);
        let dt = &set.nodes[0];
        assert_eq!(dt.parent_node_id, ids::STRUCTURE);
        assert_eq!(dt.reference_type_id, ids::HAS_SUBTYPE);
        let def = dt
            .data_type_definition
            .as_ref()
            .and_then(DataTypeDefinition::as_structure)
            .expect("structure");
        assert_eq!(def.structure_type, StructureType::StructureWithOptionalFields);
        assert_eq!(def.default_encoding_id, NodeId::numeric(1, 11));
        assert_eq!(def.base_data_type, ids::STRUCTURE);

        let enc = &set.nodes[1];
        assert_eq!(enc.browse_name, "Default Binary");
        assert_eq!(enc.reference_type_id, ids::HAS_ENCODING);
    }

    #[test]
    fn test_enum_builder_sequential_values() {
        let set = EnumBuilder::new(NodeId::numeric(1, 20), "Color")
            .values(["Red", "Green", "Blue"])
            .build();
        let def = set.nodes[0]
            .data_type_definition
            .as_ref()
            .and_then(DataTypeDefinition::as_enumeration)
            .expect("enum");
        let values: Vec<_> = def.fields.iter().map(|f| (f.name.as_str(), f.value)).collect();
        assert_eq!(values, vec![("Red", 0), ("Green", 1), ("Blue", 2)]);
    }

    #[tokio::test]
    async fn test_core_skeleton_loads_in_one_pass() {
        let space = MemoryAddressSpace::new();
        let core = core_type_nodes();
        let report = bulk_load_address_space(
            &space,
            core.nodes,
            core.references,
            RetryPolicy::SinglePass,
        )
        .await
        .expect("core");
        assert_eq!(report.deferred, 0);
        assert!(space.has_reference(&ids::BASE_DATA_TYPE, &ids::HAS_SUBTYPE, &ids::STRUCTURE));
        assert!(space.has_reference(&ids::UINTEGER, &ids::HAS_SUBTYPE, &ids::UINT32));
        assert!(space.contains(&ids::DATA_TYPE_ENCODING_TYPE));
    }
}
