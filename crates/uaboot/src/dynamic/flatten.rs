// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural inheritance: a subtype's fields follow its parent's.
//!
//! Plain concatenation. Names are neither renamed nor deduplicated, so a
//! subtype redeclaring an inherited field name carries both.

use crate::types::{DataTypeDefinition, StructureDefinition, StructureField};

/// `parent` (already flattened) followed by `own`, both in declared order.
pub fn flatten_fields(
    parent: Option<&[StructureField]>,
    own: &[StructureField],
) -> Vec<StructureField> {
    let inherited = parent.unwrap_or_default();
    let mut fields = Vec::with_capacity(inherited.len() + own.len());
    fields.extend_from_slice(inherited);
    fields.extend_from_slice(own);
    fields
}

/// Flatten a structure definition; enumerations pass through unchanged.
pub fn flatten_definition(
    parent: Option<&[StructureField]>,
    definition: DataTypeDefinition,
) -> DataTypeDefinition {
    match definition {
        DataTypeDefinition::Structure(def) => DataTypeDefinition::Structure(StructureDefinition {
            fields: flatten_fields(parent, &def.fields),
            ..def
        }),
        other => other,
    }
}
