// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in wire types and the catalog of platform data types.

use crate::types::{ids, NodeId, UaValue};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// OPC UA built-in types (Part 6, 5.1.2), numbered by their type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
}

const ALL_BUILTINS: [BuiltinType; 25] = [
    BuiltinType::Boolean,
    BuiltinType::SByte,
    BuiltinType::Byte,
    BuiltinType::Int16,
    BuiltinType::UInt16,
    BuiltinType::Int32,
    BuiltinType::UInt32,
    BuiltinType::Int64,
    BuiltinType::UInt64,
    BuiltinType::Float,
    BuiltinType::Double,
    BuiltinType::String,
    BuiltinType::DateTime,
    BuiltinType::Guid,
    BuiltinType::ByteString,
    BuiltinType::XmlElement,
    BuiltinType::NodeId,
    BuiltinType::ExpandedNodeId,
    BuiltinType::StatusCode,
    BuiltinType::QualifiedName,
    BuiltinType::LocalizedText,
    BuiltinType::ExtensionObject,
    BuiltinType::DataValue,
    BuiltinType::Variant,
    BuiltinType::DiagnosticInfo,
];

impl BuiltinType {
    pub fn from_id(id: u32) -> Option<Self> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        ALL_BUILTINS.get(index).copied()
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::ByteString => "ByteString",
            Self::XmlElement => "XmlElement",
            Self::NodeId => "NodeId",
            Self::ExpandedNodeId => "ExpandedNodeId",
            Self::StatusCode => "StatusCode",
            Self::QualifiedName => "QualifiedName",
            Self::LocalizedText => "LocalizedText",
            Self::ExtensionObject => "ExtensionObject",
            Self::DataValue => "DataValue",
            Self::Variant => "Variant",
            Self::DiagnosticInfo => "DiagnosticInfo",
        }
    }

    /// Unsigned integer types usable as option set storage.
    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::Byte | Self::UInt16 | Self::UInt32 | Self::UInt64)
    }

    /// Zero value of this type.
    pub fn default_value(self) -> UaValue {
        match self {
            Self::Boolean => UaValue::Boolean(false),
            Self::SByte => UaValue::SByte(0),
            Self::Byte => UaValue::Byte(0),
            Self::Int16 => UaValue::Int16(0),
            Self::UInt16 => UaValue::UInt16(0),
            Self::Int32 => UaValue::Int32(0),
            Self::UInt32 => UaValue::UInt32(0),
            Self::Int64 => UaValue::Int64(0),
            Self::UInt64 => UaValue::UInt64(0),
            Self::Float => UaValue::Float(0.0),
            Self::Double => UaValue::Double(0.0),
            Self::String => UaValue::String(String::new()),
            Self::DateTime => UaValue::DateTime(0),
            Self::Guid => UaValue::Guid([0; 16]),
            Self::ByteString => UaValue::ByteString(Vec::new()),
            Self::XmlElement => UaValue::XmlElement(String::new()),
            Self::NodeId | Self::ExpandedNodeId => UaValue::NodeId(NodeId::null()),
            Self::StatusCode => UaValue::StatusCode(0),
            Self::QualifiedName => UaValue::QualifiedName {
                namespace: 0,
                name: String::new(),
            },
            Self::LocalizedText => UaValue::LocalizedText {
                locale: String::new(),
                text: String::new(),
            },
            Self::ExtensionObject | Self::DataValue | Self::Variant | Self::DiagnosticInfo => {
                UaValue::Null
            }
        }
    }
}

/// Wire type tag of a layout field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireType {
    Builtin(BuiltinType),
    /// A registered or platform structure, by name.
    Structure(String),
    /// A registered or platform enumeration, by name.
    Enumeration(String),
    /// Sequence of the inner type.
    List(Box<WireType>),
}

impl WireType {
    pub fn list_of(inner: WireType) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Innermost non-list type.
    pub fn element(&self) -> &WireType {
        match self {
            Self::List(inner) => inner.element(),
            other => other,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(b) => f.write_str(b.name()),
            Self::Structure(name) | Self::Enumeration(name) => f.write_str(name),
            Self::List(inner) => write!(f, "ListOf{}", inner),
        }
    }
}

/// Platform data types known before bootstrap.
///
/// Maps namespace-0 data type ids to wire tags and answers whether a browse
/// name belongs to the platform (such nodes are never re-registered).
#[derive(Debug, Clone, Default)]
pub struct BuiltinCatalog {
    by_id: HashMap<NodeId, WireType>,
    names: HashSet<String>,
}

impl BuiltinCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in primitives, abstract roots, common aliases and the standard
    /// structures and enumerations.
    ///
    /// This is a subset of namespace 0, not the full set of standard data
    /// types. A field typed by any other namespace-0 type is treated as a
    /// custom dependency, and the structure pass fails with
    /// [`CompileError::UnresolvedFieldType`](crate::error::CompileError).
    /// Add such types with [`with_type`](Self::with_type) and hand the
    /// catalog to `TypeBootstrap::with_catalog`.
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        for b in ALL_BUILTINS {
            catalog.insert(NodeId::numeric(0, b.id()), b.name(), WireType::Builtin(b));
        }
        // Data type 22 is Structure, 24 is BaseDataType.
        catalog.names.insert("Structure".into());
        catalog.names.insert("BaseDataType".into());

        let roots = [
            (ids::NUMBER, "Number", BuiltinType::Variant),
            (ids::INTEGER, "Integer", BuiltinType::Variant),
            (ids::UINTEGER, "UInteger", BuiltinType::Variant),
            (ids::ENUMERATION, "Enumeration", BuiltinType::Int32),
        ];
        for (id, name, b) in roots {
            catalog.insert(id, name, WireType::Builtin(b));
        }

        for &(id, name, b) in ALIASES {
            catalog.insert(NodeId::numeric(0, id), name, WireType::Builtin(b));
        }
        for &(id, name) in STANDARD_STRUCTURES {
            catalog.insert(NodeId::numeric(0, id), name, WireType::Structure(name.into()));
        }
        for &(id, name) in STANDARD_ENUMERATIONS {
            catalog.insert(NodeId::numeric(0, id), name, WireType::Enumeration(name.into()));
        }
        catalog
    }

    fn insert(&mut self, id: NodeId, name: &str, wire: WireType) {
        self.by_id.insert(id, wire);
        self.names.insert(name.to_string());
    }

    /// Add a platform type with its wire tag.
    pub fn with_type(mut self, id: NodeId, name: impl Into<String>, wire: WireType) -> Self {
        let name = name.into();
        self.insert(id, &name, wire);
        self
    }

    /// Treat `name` as a platform name without mapping an id.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn resolve(&self, data_type: &NodeId) -> Option<&WireType> {
        self.by_id.get(data_type)
    }

    pub fn contains(&self, data_type: &NodeId) -> bool {
        self.by_id.contains_key(data_type)
    }

    pub fn is_builtin_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Storage width of an option set rooted at `root`.
    pub fn unsigned_width(&self, root: &NodeId) -> Option<BuiltinType> {
        match self.by_id.get(root)? {
            WireType::Builtin(b) if b.is_unsigned() => Some(*b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

const ALIASES: &[(u32, &str, BuiltinType)] = &[
    (30, "Image", BuiltinType::ByteString),
    (288, "IntegerId", BuiltinType::UInt32),
    (289, "Counter", BuiltinType::UInt32),
    (290, "Duration", BuiltinType::Double),
    (291, "NumericRange", BuiltinType::String),
    (292, "Time", BuiltinType::String),
    (293, "Date", BuiltinType::DateTime),
    (294, "UtcTime", BuiltinType::DateTime),
    (295, "LocaleId", BuiltinType::String),
    (311, "ApplicationInstanceCertificate", BuiltinType::ByteString),
    (388, "SessionAuthenticationToken", BuiltinType::NodeId),
    (2000, "ImageBMP", BuiltinType::ByteString),
    (2001, "ImageGIF", BuiltinType::ByteString),
    (2002, "ImageJPG", BuiltinType::ByteString),
    (2003, "ImagePNG", BuiltinType::ByteString),
    (11737, "BitFieldMaskDataType", BuiltinType::UInt64),
    (12877, "NormalizedString", BuiltinType::String),
    (12878, "DecimalString", BuiltinType::String),
    (12879, "DurationString", BuiltinType::String),
    (12880, "TimeString", BuiltinType::String),
    (12881, "DateString", BuiltinType::String),
    (16307, "AudioDataType", BuiltinType::ByteString),
    (17588, "Index", BuiltinType::UInt32),
    (20998, "VersionTime", BuiltinType::UInt32),
    (23751, "UriString", BuiltinType::String),
];

const STANDARD_STRUCTURES: &[(u32, &str)] = &[
    (296, "Argument"),
    (884, "Range"),
    (887, "EUInformation"),
    (7594, "EnumValueType"),
    (8912, "TimeZoneDataType"),
    (12755, "OptionSet"),
    (12756, "Union"),
    (96, "RolePermissionType"),
    (97, "DataTypeDefinition"),
    (99, "StructureDefinition"),
    (100, "EnumDefinition"),
    (101, "StructureField"),
    (102, "EnumField"),
    (308, "ApplicationDescription"),
    (338, "BuildInfo"),
    (862, "ServerStatusDataType"),
    (12171, "ComplexNumberType"),
    (12172, "DoubleComplexNumberType"),
    (12079, "AxisInformation"),
    (12080, "XVType"),
    (14533, "KeyValuePair"),
    (586, "FilterOperand"),
];

const STANDARD_ENUMERATIONS: &[(u32, &str)] = &[
    (98, "StructureType"),
    (256, "IdType"),
    (257, "NodeClass"),
    (302, "MessageSecurityMode"),
    (307, "ApplicationType"),
    (315, "UserTokenType"),
    (852, "ServerState"),
    (12077, "AxisScaleEnumeration"),
    (120, "NamingRuleType"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids() {
        assert_eq!(BuiltinType::from_id(1), Some(BuiltinType::Boolean));
        assert_eq!(BuiltinType::from_id(25), Some(BuiltinType::DiagnosticInfo));
        assert_eq!(BuiltinType::from_id(0), None);
        assert_eq!(BuiltinType::from_id(26), None);
        assert_eq!(BuiltinType::Double.id(), 11);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(BuiltinType::Boolean.default_value(), UaValue::Boolean(false));
        assert_eq!(BuiltinType::String.default_value(), UaValue::String(String::new()));
        assert_eq!(BuiltinType::Guid.default_value(), UaValue::Guid([0; 16]));
        assert_eq!(BuiltinType::DateTime.default_value(), UaValue::DateTime(0));
        assert!(BuiltinType::Variant.default_value().is_null());
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = BuiltinCatalog::standard();
        assert_eq!(
            catalog.resolve(&ids::DOUBLE),
            Some(&WireType::Builtin(BuiltinType::Double))
        );
        assert_eq!(
            catalog.resolve(&ids::STRUCTURE),
            Some(&WireType::Builtin(BuiltinType::ExtensionObject))
        );
        assert_eq!(
            catalog.resolve(&NodeId::numeric(0, 290)),
            Some(&WireType::Builtin(BuiltinType::Double))
        );
        assert_eq!(
            catalog.resolve(&NodeId::numeric(0, 296)),
            Some(&WireType::Structure("Argument".into()))
        );
        assert!(catalog.is_builtin_name("Structure"));
        assert!(catalog.is_builtin_name("ServerState"));
        assert!(!catalog.is_builtin_name("PumpStatus"));
        assert!(!catalog.contains(&NodeId::numeric(1, 11)));
        assert_eq!(catalog.unsigned_width(&ids::UINT32), Some(BuiltinType::UInt32));
        assert_eq!(catalog.unsigned_width(&ids::INT32), None);
    }

    #[test]
    fn test_catalog_extension() {
        let catalog = BuiltinCatalog::new()
            .with_type(NodeId::numeric(3, 1), "VendorId", WireType::Builtin(BuiltinType::UInt32))
            .with_name("VendorLegacy");
        assert!(catalog.contains(&NodeId::numeric(3, 1)));
        assert!(catalog.is_builtin_name("VendorId"));
        assert!(catalog.is_builtin_name("VendorLegacy"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_wire_type_display() {
        let list = WireType::list_of(WireType::Structure("Point".into()));
        assert_eq!(list.to_string(), "ListOfPoint");
        assert_eq!(list.element(), &WireType::Structure("Point".into()));
    }
}
