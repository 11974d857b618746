// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Instances of registered structure types.

use super::builtin::BuiltinType;
use super::runtime_type::{LayoutField, RuntimeType, StructLayout};
use crate::types::{StructValue, UaValue};
use std::sync::Arc;
use thiserror::Error;

/// Errors for [`StructInstance`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("type {type_name} has no field {field}")]
    FieldNotFound { type_name: String, field: String },

    #[error("type {0} is not a structure")]
    NotAStructure(String),

    #[error("field {field} of {type_name} is not optional")]
    NotOptional { type_name: String, field: String },

    #[error("mask {mask:#x} selects {expected} value(s), got {got}")]
    ValueCountMismatch {
        mask: u32,
        expected: usize,
        got: usize,
    },
}

/// Field values of one structure instance, in layout order.
///
/// Required fields are always present. Optional fields start absent and
/// hold their default until set.
#[derive(Debug, Clone, PartialEq)]
pub struct StructInstance {
    ty: Arc<RuntimeType>,
    values: Vec<UaValue>,
    present: Vec<bool>,
}

impl StructInstance {
    /// Instance with every field at its default.
    pub fn new(ty: &Arc<RuntimeType>) -> Result<Self, InstanceError> {
        let layout = layout_of(ty)?;
        let (values, present) = layout
            .data_fields()
            .map(|f| (f.default.clone(), !f.is_optional()))
            .unzip();
        Ok(Self {
            ty: Arc::clone(ty),
            values,
            present,
        })
    }

    /// Rebuild an instance from a decoded mask and the values of the fields
    /// it selects, in layout order.
    ///
    /// Required fields always consume a value; optional fields consume one
    /// only when their bit is set. Absent optional fields get their default.
    pub fn assemble(
        ty: &Arc<RuntimeType>,
        mask: u32,
        values: Vec<UaValue>,
    ) -> Result<Self, InstanceError> {
        let layout = layout_of(ty)?;
        let selected = |f: &LayoutField| match f.optional_bit {
            Some(bit) => mask & (1 << bit) != 0,
            None => true,
        };

        let expected = layout.data_fields().filter(|f| selected(*f)).count();
        if expected != values.len() {
            return Err(InstanceError::ValueCountMismatch {
                mask,
                expected,
                got: values.len(),
            });
        }

        let mut supplied = values.into_iter();
        let mut out = Vec::new();
        let mut present = Vec::new();
        for field in layout.data_fields() {
            let is_set = selected(field);
            let value = if is_set { supplied.next() } else { None };
            out.push(value.unwrap_or_else(|| field.default.clone()));
            present.push(is_set);
        }

        Ok(Self {
            ty: Arc::clone(ty),
            values: out,
            present,
        })
    }

    pub fn runtime_type(&self) -> &Arc<RuntimeType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        &self.ty.name
    }

    /// Set a field and mark it present.
    pub fn set(&mut self, name: &str, value: impl Into<UaValue>) -> Result<(), InstanceError> {
        let (index, _) = self.position(name)?;
        self.values[index] = value.into();
        self.present[index] = true;
        Ok(())
    }

    /// Current value of a field; absent optional fields read as their default.
    pub fn get(&self, name: &str) -> Result<&UaValue, InstanceError> {
        let (index, _) = self.position(name)?;
        Ok(&self.values[index])
    }

    /// Mark an optional field absent and reset it to its default.
    pub fn clear(&mut self, name: &str) -> Result<(), InstanceError> {
        let (index, field) = self.position(name)?;
        if !field.is_optional() {
            return Err(InstanceError::NotOptional {
                type_name: self.ty.name.clone(),
                field: name.to_string(),
            });
        }
        let default = field.default.clone();
        self.values[index] = default;
        self.present[index] = false;
        Ok(())
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.position(name)
            .map(|(index, _)| self.present[index])
            .unwrap_or(false)
    }

    /// Encoding mask: bit `i` set when the `i`-th optional field is present.
    pub fn encoding_mask(&self) -> u32 {
        self.fields()
            .zip(&self.present)
            .filter_map(|(f, &present)| match f.optional_bit {
                Some(bit) if present => Some(1u32 << bit),
                _ => None,
            })
            .fold(0, |mask, bit| mask | bit)
    }

    /// Values a codec writes after the mask: required fields plus present
    /// optional fields, in layout order.
    pub fn present_values(&self) -> Vec<&UaValue> {
        self.values
            .iter()
            .zip(&self.present)
            .filter(|(_, present)| **present)
            .map(|(v, _)| v)
            .collect()
    }

    /// Whole instance as a value, mask field first when the type has one.
    pub fn to_value(&self) -> UaValue {
        let mut fields = Vec::with_capacity(self.values.len() + 1);
        if let Some(mask_type) = self.ty.as_struct().and_then(StructLayout::mask_type) {
            let mask = self.encoding_mask();
            let value = match mask_type {
                BuiltinType::Byte => UaValue::Byte(mask as u8),
                _ => UaValue::UInt32(mask),
            };
            fields.push((super::runtime_type::ENCODING_MASK_FIELD.to_string(), value));
        }
        fields.extend(
            self.fields()
                .zip(&self.values)
                .map(|(f, v)| (f.name.clone(), v.clone())),
        );
        UaValue::Structure(StructValue {
            type_name: self.ty.name.clone(),
            fields,
        })
    }

    /// Data fields of the layout; `new`/`assemble` reject non-structures.
    fn fields(&self) -> impl Iterator<Item = &LayoutField> {
        self.ty.as_struct().into_iter().flat_map(StructLayout::data_fields)
    }

    fn position(&self, name: &str) -> Result<(usize, &LayoutField), InstanceError> {
        self.fields()
            .enumerate()
            .find(|(_, f)| f.name == name)
            .ok_or_else(|| InstanceError::FieldNotFound {
                type_name: self.ty.name.clone(),
                field: name.to_string(),
            })
    }
}

fn layout_of(ty: &RuntimeType) -> Result<&StructLayout, InstanceError> {
    ty.as_struct()
        .ok_or_else(|| InstanceError::NotAStructure(ty.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::builtin::{BuiltinType, WireType};
    use crate::dynamic::runtime_type::{
        EnumFlavor, EnumLayout, RuntimeKind, StructKind, ENCODING_MASK_FIELD,
    };
    use crate::types::NodeId;

    fn field(name: &str, b: BuiltinType, bit: Option<u8>) -> LayoutField {
        LayoutField {
            name: name.into(),
            source_name: name.into(),
            wire: WireType::Builtin(b),
            optional_bit: bit,
            default: b.default_value(),
        }
    }

    /// `[Encoding, Speed, Label?, Note?]`
    fn reading() -> Arc<RuntimeType> {
        let mask = LayoutField {
            name: ENCODING_MASK_FIELD.into(),
            source_name: String::new(),
            wire: WireType::Builtin(BuiltinType::Byte),
            optional_bit: None,
            default: UaValue::Byte(0),
        };
        Arc::new(RuntimeType {
            name: "Reading".into(),
            data_type_id: NodeId::numeric(2, 1),
            encoding_id: Some(NodeId::numeric(2, 2)),
            kind: RuntimeKind::Structure(StructLayout {
                kind: StructKind::StructureWithOptionalFields,
                fields: vec![
                    mask,
                    field("Speed", BuiltinType::Double, None),
                    field("Label", BuiltinType::String, Some(0)),
                    field("Note", BuiltinType::String, Some(1)),
                ],
            }),
        })
    }

    #[test]
    fn test_new_has_defaults() {
        let ty = reading();
        let inst = StructInstance::new(&ty).unwrap();
        assert_eq!(inst.type_name(), "Reading");
        assert!(Arc::ptr_eq(inst.runtime_type(), &ty));
        assert_eq!(inst.get("Speed").unwrap(), &UaValue::Double(0.0));
        assert_eq!(inst.get("Label").unwrap(), &UaValue::String(String::new()));
        assert!(inst.is_present("Speed"));
        assert!(!inst.is_present("Label"));
        assert_eq!(inst.encoding_mask(), 0);
    }

    #[test]
    fn test_set_and_clear() {
        let mut inst = StructInstance::new(&reading()).unwrap();
        inst.set("Speed", 12.5).unwrap();
        inst.set("Note", "hot").unwrap();
        assert_eq!(inst.encoding_mask(), 0b10);
        assert_eq!(inst.present_values().len(), 2);

        inst.clear("Note").unwrap();
        assert_eq!(inst.encoding_mask(), 0);
        assert_eq!(inst.get("Note").unwrap(), &UaValue::String(String::new()));

        assert!(matches!(
            inst.clear("Speed"),
            Err(InstanceError::NotOptional { .. })
        ));
        assert!(matches!(
            inst.set("Missing", 1),
            Err(InstanceError::FieldNotFound { .. })
        ));
        assert!(!inst.is_present("Missing"));
    }

    #[test]
    fn test_assemble_label_present_note_absent() {
        let ty = reading();
        let inst = StructInstance::assemble(
            &ty,
            0b01,
            vec![UaValue::Double(3.0), UaValue::from("pump 1")],
        )
        .unwrap();

        assert_eq!(inst.encoding_mask() & 0b01, 0b01);
        assert_eq!(inst.encoding_mask() & 0b10, 0);
        assert_eq!(inst.get("Label").unwrap().as_str(), Some("pump 1"));
        assert_eq!(inst.get("Note").unwrap(), &BuiltinType::String.default_value());
        assert!(!inst.is_present("Note"));
    }

    #[test]
    fn test_assemble_value_count_checked() {
        let err = StructInstance::assemble(&reading(), 0b11, vec![UaValue::Double(1.0)]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::ValueCountMismatch {
                mask: 0b11,
                expected: 3,
                got: 1
            }
        );
    }

    #[test]
    fn test_to_value_leads_with_mask() {
        let mut inst = StructInstance::new(&reading()).unwrap();
        inst.set("Label", "x").unwrap();
        let value = inst.to_value();
        let s = value.as_struct().unwrap();
        assert_eq!(s.type_name, "Reading");
        assert_eq!(s.fields[0], (ENCODING_MASK_FIELD.to_string(), UaValue::Byte(1)));
        assert_eq!(s.fields.len(), 4);
    }

    #[test]
    fn test_enum_is_not_a_structure() {
        let ty = Arc::new(RuntimeType {
            name: "Color".into(),
            data_type_id: NodeId::numeric(2, 3),
            encoding_id: None,
            kind: RuntimeKind::Enumeration(EnumLayout {
                flavor: EnumFlavor::Plain,
                members: vec![],
            }),
        });
        assert_eq!(
            StructInstance::new(&ty).unwrap_err(),
            InstanceError::NotAStructure("Color".into())
        );
    }
}
