// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field layout compilation.
//!
//! Turns a flattened, dependency-ordered [`TypeDescriptor`] into a
//! [`RuntimeType`]:
//!
//! - optional fields get a synthetic `Encoding` mask as the first entry; bit
//!   *i* is the *i*-th optional field in declaration order
//! - array fields become `List(T)` whatever `T` is
//! - field types resolve against the built-in catalog, then registered
//!   structures and enumerations; anything else is fatal
//! - enumeration members take their position as value (`1 << position` for
//!   option sets), not the value carried in the definition

use super::builtin::{BuiltinCatalog, BuiltinType, WireType};
use super::descriptor::TypeDescriptor;
use super::registry::TypeRegistry;
use super::runtime_type::{
    EnumFlavor, EnumLayout, EnumMember, LayoutField, RuntimeKind, RuntimeType, StructKind,
    StructLayout, ENCODING_MASK_FIELD,
};
use crate::error::CompileError;
use crate::types::{
    DataTypeDefinition, EnumDefinition, StructureDefinition, StructureField, StructureType,
    UaValue,
};
use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("static pattern"));
static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("static pattern"));

/// Largest number of optional fields a `Byte` mask holds.
const BYTE_MASK_BITS: usize = 8;
/// Largest number of optional fields any mask holds.
const MAX_MASK_BITS: usize = 32;

/// Make `name` a legal identifier.
///
/// Runs of non-word characters become `_`; a leading digit run gets a `_`
/// prefix. Idempotent.
pub fn sanitize(name: &str) -> String {
    let replaced = NON_WORD.replace_all(name, "_");
    LEADING_DIGITS.replace(&replaced, "_$0").into_owned()
}

/// Compiles descriptors against the catalog and the types registered so far.
pub struct FieldLayoutCompiler<'a> {
    catalog: &'a BuiltinCatalog,
    registry: &'a TypeRegistry,
}

impl<'a> FieldLayoutCompiler<'a> {
    pub fn new(catalog: &'a BuiltinCatalog, registry: &'a TypeRegistry) -> Self {
        Self { catalog, registry }
    }

    pub fn compile(&self, desc: &TypeDescriptor) -> Result<RuntimeType, CompileError> {
        match &desc.schema {
            DataTypeDefinition::Structure(def) => self.compile_structure_definition(desc, def),
            DataTypeDefinition::Enumeration(def) => Ok(self.compile_enum_definition(desc, def)),
        }
    }

    /// Compile a descriptor expected to carry a structure definition.
    pub fn compile_structure(&self, desc: &TypeDescriptor) -> Result<RuntimeType, CompileError> {
        match &desc.schema {
            DataTypeDefinition::Structure(def) => self.compile_structure_definition(desc, def),
            DataTypeDefinition::Enumeration(_) => Err(CompileError::NotAStructure {
                type_name: desc.name.clone(),
            }),
        }
    }

    /// Compile a descriptor expected to carry an enumeration definition.
    pub fn compile_enum(&self, desc: &TypeDescriptor) -> Result<RuntimeType, CompileError> {
        match &desc.schema {
            DataTypeDefinition::Enumeration(def) => Ok(self.compile_enum_definition(desc, def)),
            DataTypeDefinition::Structure(_) => Err(CompileError::NotAnEnumeration {
                type_name: desc.name.clone(),
            }),
        }
    }

    fn compile_structure_definition(
        &self,
        desc: &TypeDescriptor,
        def: &StructureDefinition,
    ) -> Result<RuntimeType, CompileError> {
        if !matches!(
            def.structure_type,
            StructureType::Structure | StructureType::StructureWithOptionalFields
        ) {
            return Err(CompileError::UnsupportedStructureKind {
                type_name: desc.name.clone(),
                kind: def.structure_type,
            });
        }

        let optional_count = def.fields.iter().filter(|f| f.is_optional).count();
        if optional_count > MAX_MASK_BITS {
            return Err(CompileError::TooManyOptionalFields {
                type_name: desc.name.clone(),
                count: optional_count,
            });
        }

        let mut fields = Vec::with_capacity(def.fields.len() + 1);
        let kind = if optional_count == 0 {
            StructKind::Structure
        } else {
            let mask = if optional_count <= BYTE_MASK_BITS {
                BuiltinType::Byte
            } else {
                BuiltinType::UInt32
            };
            fields.push(LayoutField {
                name: ENCODING_MASK_FIELD.to_string(),
                source_name: String::new(),
                wire: WireType::Builtin(mask),
                optional_bit: None,
                default: mask.default_value(),
            });
            StructKind::StructureWithOptionalFields
        };

        let mut next_bit = 0u8;
        for field in &def.fields {
            let wire = self.resolve(desc, field)?;
            let default = if field.is_array() {
                UaValue::Array(Vec::new())
            } else {
                self.default_for(&wire)
            };
            let wire = if field.is_array() {
                WireType::list_of(wire)
            } else {
                wire
            };
            let optional_bit = if field.is_optional {
                let bit = next_bit;
                next_bit += 1;
                Some(bit)
            } else {
                None
            };
            fields.push(LayoutField {
                name: self.field_name(desc, &field.name),
                source_name: field.name.clone(),
                wire,
                optional_bit,
                default,
            });
        }

        log::debug!(
            "[FieldLayout] {}: {} field(s), {:?}",
            desc.name,
            fields.len(),
            kind
        );
        Ok(RuntimeType {
            name: desc.name.clone(),
            data_type_id: desc.data_type_id.clone(),
            encoding_id: desc.encoding_id.clone(),
            kind: RuntimeKind::Structure(StructLayout { kind, fields }),
        })
    }

    fn compile_enum_definition(&self, desc: &TypeDescriptor, def: &EnumDefinition) -> RuntimeType {
        if let EnumFlavor::OptionSet(storage) = desc.flavor {
            let bits = storage_bits(storage);
            if def.fields.len() > bits {
                log::warn!(
                    "[FieldLayout] {}: {} option bits do not fit in {}",
                    desc.name,
                    def.fields.len(),
                    storage.name()
                );
            }
        }
        let members = def
            .fields
            .iter()
            .enumerate()
            .map(|(position, field)| EnumMember {
                name: self.field_name(desc, &field.name),
                value: member_value(desc.flavor, position),
            })
            .collect();

        RuntimeType {
            name: desc.name.clone(),
            data_type_id: desc.data_type_id.clone(),
            encoding_id: None,
            kind: RuntimeKind::Enumeration(EnumLayout {
                flavor: desc.flavor,
                members,
            }),
        }
    }

    /// Wire tag of one field's element type.
    fn resolve(
        &self,
        desc: &TypeDescriptor,
        field: &StructureField,
    ) -> Result<WireType, CompileError> {
        if let Some(wire) = self.catalog.resolve(&field.data_type) {
            return Ok(wire.clone());
        }
        match self.registry.lookup_by_data_type_id(&field.data_type) {
            Ok(ty) => Ok(ty.wire_type()),
            Err(_) => Err(CompileError::UnresolvedFieldType {
                type_name: desc.name.clone(),
                field: field.name.clone(),
                data_type: field.data_type.clone(),
            }),
        }
    }

    fn default_for(&self, wire: &WireType) -> UaValue {
        match wire {
            WireType::Builtin(b) => b.default_value(),
            WireType::Structure(name) => self
                .registry
                .lookup_by_name(name)
                .map(|ty| ty.default_value())
                .unwrap_or(UaValue::Null),
            WireType::Enumeration(_) => UaValue::Enumeration(0),
            WireType::List(_) => UaValue::Array(Vec::new()),
        }
    }

    fn field_name(&self, desc: &TypeDescriptor, name: &str) -> String {
        let clean = sanitize(name);
        if clean != name {
            log::warn!(
                "[FieldLayout] {}: renamed '{}' to '{}'",
                desc.name,
                name,
                clean
            );
        }
        clean
    }
}

fn storage_bits(storage: BuiltinType) -> usize {
    match storage {
        BuiltinType::Byte | BuiltinType::SByte => 8,
        BuiltinType::UInt16 | BuiltinType::Int16 => 16,
        BuiltinType::UInt32 | BuiltinType::Int32 => 32,
        _ => 64,
    }
}

/// Runtime value of the member at `position`.
///
/// Option set bits past 63 wrap to 0; the storage width caps real sets far
/// below that.
fn member_value(flavor: EnumFlavor, position: usize) -> i64 {
    match flavor {
        EnumFlavor::Plain => position as i64,
        EnumFlavor::OptionSet(_) => u32::try_from(position)
            .ok()
            .and_then(|p| 1u64.checked_shl(p))
            .map(|v| v as i64)
            .unwrap_or(0),
    }
}
