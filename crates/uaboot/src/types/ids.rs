// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Well-known namespace-0 node identifiers (OPC UA Part 6, NodeIds.csv).

use super::NodeId;

// ============================================================================
// Reference types
// ============================================================================

pub const REFERENCES: NodeId = NodeId::numeric(0, 31);
pub const HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 33);
pub const NON_HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 32);
pub const ORGANIZES: NodeId = NodeId::numeric(0, 35);
pub const HAS_ENCODING: NodeId = NodeId::numeric(0, 38);
pub const HAS_TYPE_DEFINITION: NodeId = NodeId::numeric(0, 40);
pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);
pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);
pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);

// ============================================================================
// Data types
// ============================================================================

pub const BOOLEAN: NodeId = NodeId::numeric(0, 1);
pub const SBYTE: NodeId = NodeId::numeric(0, 2);
pub const BYTE: NodeId = NodeId::numeric(0, 3);
pub const INT16: NodeId = NodeId::numeric(0, 4);
pub const UINT16: NodeId = NodeId::numeric(0, 5);
pub const INT32: NodeId = NodeId::numeric(0, 6);
pub const UINT32: NodeId = NodeId::numeric(0, 7);
pub const INT64: NodeId = NodeId::numeric(0, 8);
pub const UINT64: NodeId = NodeId::numeric(0, 9);
pub const FLOAT: NodeId = NodeId::numeric(0, 10);
pub const DOUBLE: NodeId = NodeId::numeric(0, 11);
pub const STRING: NodeId = NodeId::numeric(0, 12);
pub const DATE_TIME: NodeId = NodeId::numeric(0, 13);
pub const GUID: NodeId = NodeId::numeric(0, 14);
pub const BYTE_STRING: NodeId = NodeId::numeric(0, 15);
pub const XML_ELEMENT: NodeId = NodeId::numeric(0, 16);
pub const NODE_ID: NodeId = NodeId::numeric(0, 17);
pub const EXPANDED_NODE_ID: NodeId = NodeId::numeric(0, 18);
pub const STATUS_CODE: NodeId = NodeId::numeric(0, 19);
pub const QUALIFIED_NAME: NodeId = NodeId::numeric(0, 20);
pub const LOCALIZED_TEXT: NodeId = NodeId::numeric(0, 21);
pub const STRUCTURE: NodeId = NodeId::numeric(0, 22);
pub const DATA_VALUE: NodeId = NodeId::numeric(0, 23);
pub const BASE_DATA_TYPE: NodeId = NodeId::numeric(0, 24);
pub const DIAGNOSTIC_INFO: NodeId = NodeId::numeric(0, 25);
pub const NUMBER: NodeId = NodeId::numeric(0, 26);
pub const INTEGER: NodeId = NodeId::numeric(0, 27);
pub const UINTEGER: NodeId = NodeId::numeric(0, 28);
pub const ENUMERATION: NodeId = NodeId::numeric(0, 29);

// ============================================================================
// Object types and folders
// ============================================================================

pub const BASE_OBJECT_TYPE: NodeId = NodeId::numeric(0, 58);
pub const FOLDER_TYPE: NodeId = NodeId::numeric(0, 61);
pub const DATA_TYPE_ENCODING_TYPE: NodeId = NodeId::numeric(0, 76);

pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);
pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);
pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);
pub const DATA_TYPES_FOLDER: NodeId = NodeId::numeric(0, 90);
pub const REFERENCE_TYPES_FOLDER: NodeId = NodeId::numeric(0, 91);

/// Browse name of the binary encoding object of a structure.
pub const DEFAULT_BINARY: &str = "Default Binary";
