// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Core protocol data model: node ids, definitions, values.

pub mod ids;
mod definition;
mod node_id;
mod value;

pub use definition::{
    DataTypeDefinition, EnumDefinition, EnumField, StructureDefinition, StructureField,
    StructureType, ValueRank,
};
pub use node_id::{Identifier, NodeId, ParseNodeIdError};
pub use value::{StructValue, UaValue};
