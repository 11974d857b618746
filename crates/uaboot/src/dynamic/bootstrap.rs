// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type system bootstrap.
//!
//! Walks the subtype trees under the configured enumeration, option set and
//! structure roots, and registers a runtime type for every custom data type
//! it finds. Each pass works on a staged copy of the registry: a fatal error
//! leaves the live registry untouched.
//!
//! Enumerations must be loaded before structures; a structure field typed by
//! an unregistered enumeration is a fatal [`CompileError::UnresolvedFieldType`].

use super::builtin::BuiltinCatalog;
use super::descriptor::TypeDescriptor;
use super::flatten::{flatten_definition, flatten_fields};
use super::layout::FieldLayoutCompiler;
use super::ordering::DependencyOrderer;
use super::reader::{ReadOutcome, SchemaReader};
use super::registry::TypeRegistry;
use super::runtime_type::EnumFlavor;
use crate::address_space::{ReferenceDescription, TypeDefinitionSource};
use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, CompileError, ReadError};
use crate::types::{ids, DataTypeDefinition, NodeId, StructureField};
use std::collections::HashSet;
use std::sync::Arc;

/// Why a discovered type was not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Excluded,
    NotApplicable,
    ReadFailed(ReadError),
    Compile(CompileError),
    /// Name, encoding id or data type id already registered.
    Duplicate,
    /// The base data type (held here) was itself skipped.
    ParentSkipped(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedType {
    pub node_id: NodeId,
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of one or more bootstrap passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Registered type names, in registration order.
    pub registered: Vec<String>,
    pub skipped: Vec<SkippedType>,
}

impl BootstrapReport {
    pub fn merge(&mut self, other: BootstrapReport) {
        self.registered.extend(other.registered);
        self.skipped.extend(other.skipped);
    }

    fn skip(&mut self, node_id: &NodeId, name: &str, reason: SkipReason) {
        self.skipped.push(SkippedType {
            node_id: node_id.clone(),
            name: name.to_string(),
            reason,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Enumerations,
    Structures,
}

/// Inherited field list handed from a structure to its subtypes.
type Shape = Option<Arc<Vec<StructureField>>>;

/// Discovers custom data types and registers their runtime types.
pub struct TypeBootstrap<'a, S> {
    source: &'a S,
    config: BootstrapConfig,
    catalog: BuiltinCatalog,
    registry: TypeRegistry,
    enums_loaded: bool,
}

impl<'a, S: TypeDefinitionSource> TypeBootstrap<'a, S> {
    pub fn new(source: &'a S, config: BootstrapConfig) -> Self {
        Self {
            source,
            config,
            catalog: BuiltinCatalog::standard(),
            registry: TypeRegistry::new(),
            enums_loaded: false,
        }
    }

    /// Replace the platform type catalog.
    pub fn with_catalog(mut self, catalog: BuiltinCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Start from an existing registry instead of an empty one.
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &BuiltinCatalog {
        &self.catalog
    }

    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }

    /// Enumerations, then option sets, then structures, from the configured
    /// roots.
    pub async fn load_data_type_definitions(&mut self) -> Result<BootstrapReport, BootstrapError> {
        let enum_root = self.config.enumeration_root.clone();
        let option_roots = self.config.option_set_roots.clone();
        let struct_root = self.config.structure_root.clone();

        let mut report = self.load_enum_definitions(&enum_root).await?;
        report.merge(self.load_option_set_definitions(&option_roots).await?);
        report.merge(self.load_structure_definitions(&struct_root).await?);
        log::info!(
            "[TypeBootstrap] {} type(s) registered, {} skipped",
            report.registered.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Register the enumerations directly under `root`.
    pub async fn load_enum_definitions(
        &mut self,
        root: &NodeId,
    ) -> Result<BootstrapReport, BootstrapError> {
        let mut report = BootstrapReport::default();
        let descriptors = self
            .discover_direct(root, EnumFlavor::Plain, &mut report)
            .await?;
        let report = self.commit(Pass::Enumerations, descriptors, report)?;
        self.enums_loaded = true;
        Ok(report)
    }

    /// Register the option sets directly under each unsigned integer root.
    ///
    /// Roots that are not unsigned integers in the catalog are ignored.
    pub async fn load_option_set_definitions(
        &mut self,
        roots: &[NodeId],
    ) -> Result<BootstrapReport, BootstrapError> {
        let mut report = BootstrapReport::default();
        let mut descriptors = Vec::new();
        for root in roots {
            let Some(width) = self.catalog.unsigned_width(root) else {
                log::warn!("[TypeBootstrap] {} is not an unsigned integer, ignored", root);
                continue;
            };
            let found = self
                .discover_direct(root, EnumFlavor::OptionSet(width), &mut report)
                .await?;
            descriptors.extend(found);
        }
        self.commit(Pass::Enumerations, descriptors, report)
    }

    /// Register every structure in the subtype tree under `root`.
    ///
    /// Discovery is pre-order depth first, so a subtype always sees its
    /// parent's flattened fields. Types skipped because their name is built
    /// in still hand their own definition down as the inherited shape; a
    /// subtype of any other skipped type is skipped with
    /// [`SkipReason::ParentSkipped`].
    pub async fn load_structure_definitions(
        &mut self,
        root: &NodeId,
    ) -> Result<BootstrapReport, BootstrapError> {
        if !self.enums_loaded {
            log::warn!("[TypeBootstrap] loading structures before enumerations");
        }

        let mut report = BootstrapReport::default();
        let mut descriptors = Vec::new();
        let mut visited = HashSet::new();
        let reader = SchemaReader::new(self.source, &self.catalog, &self.config);

        let mut stack: Vec<(ReferenceDescription, Shape)> = Vec::new();
        push_children(&mut stack, self.browse_subtypes(root).await?, None);

        while let Some((node, parent)) = stack.pop() {
            if !visited.insert(node.node_id.clone()) {
                continue;
            }

            let shape = match reader.read(&node).await {
                ReadOutcome::Definition(definition) => {
                    let flat = flatten_definition(parent.as_deref().map(Vec::as_slice), definition);
                    let shape = match &flat {
                        DataTypeDefinition::Structure(def) => Some(Arc::new(def.fields.clone())),
                        DataTypeDefinition::Enumeration(_) => parent.clone(),
                    };
                    let mut desc =
                        TypeDescriptor::new(node.node_id.clone(), &node.browse_name, flat, &self.catalog);
                    if desc.encoding_id.is_none() && desc.is_structure() {
                        if let Some(encoding) = self.default_binary(&node.node_id).await {
                            desc = desc.with_encoding_id(encoding);
                        }
                    }
                    log::debug!(
                        "[TypeBootstrap] discovered {} {}",
                        desc.schema.kind_name(),
                        desc.name
                    );
                    descriptors.push(desc);
                    shape
                }
                ReadOutcome::BuiltinName => match reader.read_unchecked(&node.node_id).await {
                    Some(DataTypeDefinition::Structure(def)) => Some(Arc::new(flatten_fields(
                        parent.as_deref().map(Vec::as_slice),
                        &def.fields,
                    ))),
                    _ => parent.clone(),
                },
                other => {
                    // nothing to hand down; subtypes are dropped at commit
                    record_skip(&mut report, &node, other);
                    None
                }
            };

            let children = self.browse_subtypes(&node.node_id).await?;
            push_children(&mut stack, children, shape);
        }

        let ordered = DependencyOrderer::order(descriptors)?;
        self.commit(Pass::Structures, ordered, report)
    }

    /// Read the enum definitions of the direct subtypes of `root`.
    async fn discover_direct(
        &self,
        root: &NodeId,
        flavor: EnumFlavor,
        report: &mut BootstrapReport,
    ) -> Result<Vec<TypeDescriptor>, BootstrapError> {
        let reader = SchemaReader::new(self.source, &self.catalog, &self.config);
        let mut descriptors = Vec::new();
        for node in self.browse_subtypes(root).await? {
            match reader.read(&node).await {
                ReadOutcome::Definition(definition) => {
                    let desc = TypeDescriptor::new(
                        node.node_id.clone(),
                        &node.browse_name,
                        definition,
                        &self.catalog,
                    )
                    .with_flavor(flavor);
                    log::debug!("[TypeBootstrap] discovered enumeration {}", desc.name);
                    descriptors.push(desc);
                }
                ReadOutcome::BuiltinName => {}
                other => record_skip(report, &node, other),
            }
        }
        Ok(descriptors)
    }

    /// Compile and register on a staged registry; swap it in on success.
    fn commit(
        &mut self,
        pass: Pass,
        descriptors: Vec<TypeDescriptor>,
        mut report: BootstrapReport,
    ) -> Result<BootstrapReport, BootstrapError> {
        let mut staged = self.registry.clone();
        let mut unavailable: HashSet<NodeId> = report
            .skipped
            .iter()
            .filter(|s| s.reason != SkipReason::Duplicate)
            .map(|s| s.node_id.clone())
            .collect();

        for desc in descriptors {
            let base = desc.schema.as_structure().map(|def| &def.base_data_type);
            if let Some(base) = base.filter(|b| unavailable.contains(*b)).cloned() {
                log::warn!(
                    "[TypeBootstrap] {} skipped: base type {} was skipped",
                    desc.name,
                    base
                );
                unavailable.insert(desc.data_type_id.clone());
                report.skip(&desc.data_type_id, &desc.name, SkipReason::ParentSkipped(base));
                continue;
            }

            let compiler = FieldLayoutCompiler::new(&self.catalog, &staged);
            let compiled = match pass {
                Pass::Enumerations => compiler.compile_enum(&desc),
                Pass::Structures => compiler.compile_structure(&desc),
            };
            match compiled {
                Ok(ty) => {
                    let name = ty.name.clone();
                    if staged.register(ty) {
                        report.registered.push(name);
                    } else {
                        report.skip(&desc.data_type_id, &desc.name, SkipReason::Duplicate);
                    }
                }
                Err(e) if e.is_fatal() => {
                    log::error!("[TypeBootstrap] {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    log::warn!("[TypeBootstrap] {} skipped: {}", desc.name, e);
                    unavailable.insert(desc.data_type_id.clone());
                    report.skip(&desc.data_type_id, &desc.name, SkipReason::Compile(e));
                }
            }
        }

        log::info!(
            "[TypeBootstrap] {:?}: {} registered, {} skipped",
            pass,
            report.registered.len(),
            report.skipped.len()
        );
        self.registry = staged;
        Ok(report)
    }

    async fn browse_subtypes(
        &self,
        node: &NodeId,
    ) -> Result<Vec<ReferenceDescription>, BootstrapError> {
        self.source
            .get_child_descriptions(node, &ids::HAS_SUBTYPE)
            .await
            .map_err(|source| BootstrapError::Browse {
                node: node.clone(),
                source,
            })
    }

    /// The `Default Binary` encoding object of `data_type`, if browsable.
    async fn default_binary(&self, data_type: &NodeId) -> Option<NodeId> {
        match self
            .source
            .get_child_descriptions(data_type, &ids::HAS_ENCODING)
            .await
        {
            Ok(children) => children
                .into_iter()
                .find(|c| c.browse_name == ids::DEFAULT_BINARY)
                .map(|c| c.node_id),
            Err(e) => {
                log::warn!("[TypeBootstrap] no encoding for {}: {}", data_type, e);
                None
            }
        }
    }
}

/// Push in reverse so the first child is visited first.
fn push_children(
    stack: &mut Vec<(ReferenceDescription, Shape)>,
    children: Vec<ReferenceDescription>,
    shape: Shape,
) {
    for child in children.into_iter().rev() {
        stack.push((child, shape.clone()));
    }
}

fn record_skip(report: &mut BootstrapReport, node: &ReferenceDescription, outcome: ReadOutcome) {
    let reason = match outcome {
        ReadOutcome::Excluded => SkipReason::Excluded,
        ReadOutcome::NotApplicable => SkipReason::NotApplicable,
        ReadOutcome::ReadFailed(e) => SkipReason::ReadFailed(e),
        ReadOutcome::Definition(_) | ReadOutcome::BuiltinName => return,
    };
    report.skip(&node.node_id, &node.browse_name, reason);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::{
        core_type_nodes, EnumBuilder, MemoryAddressSpace, NodeSet, StructureBuilder,
    };
    use crate::dynamic::builtin::{BuiltinType, WireType};
    use crate::dynamic::runtime_type::StructKind;
    use crate::error::OrderError;
    use crate::types::{StructureDefinition, StructureType};

    fn n(id: u32) -> NodeId {
        NodeId::numeric(1, id)
    }

    fn seeded(sets: Vec<NodeSet>) -> MemoryAddressSpace {
        let space = MemoryAddressSpace::new();
        let mut all = core_type_nodes();
        for set in sets {
            all.extend(set);
        }
        for item in &all.nodes {
            space.insert_node(item).unwrap();
        }
        for item in &all.references {
            space.insert_reference(item).unwrap();
        }
        space
    }

    fn color() -> NodeSet {
        EnumBuilder::new(n(50), "Color")
            .values(["Red", "Green", "Blue"])
            .build()
    }

    #[tokio::test]
    async fn test_full_bootstrap() {
        let space = seeded(vec![
            color(),
            EnumBuilder::new(n(60), "AccessFlags")
                .parent(ids::BYTE)
                .values(["Read", "Write"])
                .build(),
            StructureBuilder::new(n(1), "Base")
                .encoding_id(n(1001))
                .field(StructureField::new("X", ids::INT32))
                .build(),
            StructureBuilder::new(n(2), "Derived")
                .parent(n(1))
                .encoding_id(n(1002))
                .field(StructureField::new("Y", ids::STRING))
                .field(StructureField::new("Hue", n(50)).optional())
                .build(),
        ]);

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let report = boot.load_data_type_definitions().await.unwrap();
        assert_eq!(report.registered, vec!["Color", "AccessFlags", "Base", "Derived"]);
        assert!(report.skipped.is_empty());

        let registry = boot.into_registry();
        let derived = registry.lookup_by_encoding_id(&n(1002)).unwrap();
        let layout = derived.as_struct().unwrap();
        let names: Vec<_> = layout.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Encoding", "X", "Y", "Hue"]);
        assert_eq!(layout.kind, StructKind::StructureWithOptionalFields);
        assert_eq!(
            layout.field("Hue").unwrap().wire,
            WireType::Enumeration("Color".into())
        );

        let flags = registry.lookup_by_name("AccessFlags").unwrap();
        assert_eq!(flags.as_enum().unwrap().value_of("Write"), Some(2));
        assert_eq!(flags.as_enum().unwrap().storage(), BuiltinType::Byte);
    }

    #[tokio::test]
    async fn test_encoding_found_by_browse() {
        let mut set = StructureBuilder::new(n(1), "Sensor")
            .encoding_id(n(1001))
            .field(StructureField::new("V", ids::FLOAT))
            .build();
        if let Some(DataTypeDefinition::Structure(def)) = &mut set.nodes[0].data_type_definition {
            def.default_encoding_id = NodeId::null();
        }
        let space = seeded(vec![set]);

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();
        let ty = boot.registry().lookup_by_name("Sensor").unwrap();
        assert_eq!(ty.encoding_id, Some(n(1001)));
    }

    #[tokio::test]
    async fn test_recoverable_failures_skip_one_type() {
        let mut union = StructureDefinition::new(vec![StructureField::new("A", ids::INT32)]);
        union.structure_type = StructureType::Union;
        let mut union_set = StructureBuilder::new(n(3), "Choice").build();
        union_set.nodes[0].data_type_definition = Some(DataTypeDefinition::Structure(union));

        let space = seeded(vec![
            StructureBuilder::new(n(1), "Good")
                .field(StructureField::new("A", ids::INT32))
                .build(),
            StructureBuilder::new(n(2), "Flaky").build(),
            union_set,
            StructureBuilder::new(n(4), "FilterOperand").build(),
        ]);
        space.fail_reads_for(n(2));

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        boot.load_enum_definitions(&ids::ENUMERATION).await.unwrap();
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();

        assert_eq!(report.registered, vec!["Good"]);
        let reasons: Vec<_> = report.skipped.iter().map(|s| (s.name.as_str(), &s.reason)).collect();
        assert_eq!(reasons.len(), 3);
        assert!(reasons.iter().any(|(name, r)| *name == "Flaky" && matches!(r, SkipReason::ReadFailed(_))));
        assert!(reasons.iter().any(|(name, r)| *name == "Choice"
            && matches!(r, SkipReason::Compile(CompileError::UnsupportedStructureKind { .. }))));
        assert!(reasons.iter().any(|(name, r)| *name == "FilterOperand" && **r == SkipReason::Excluded));
    }

    #[tokio::test]
    async fn test_fatal_error_leaves_registry_untouched() {
        // Lamp uses an enumeration that was never loaded
        let space = seeded(vec![
            color(),
            StructureBuilder::new(n(1), "Fine")
                .field(StructureField::new("A", ids::INT32))
                .build(),
            StructureBuilder::new(n(2), "Lamp")
                .field(StructureField::new("Hue", n(50)))
                .build(),
        ]);

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let err = boot
            .load_structure_definitions(&ids::STRUCTURE)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Compile(CompileError::UnresolvedFieldType { .. })
        ));
        assert!(boot.registry().is_empty());
    }

    #[tokio::test]
    async fn test_cycle_aborts() {
        let space = seeded(vec![
            StructureBuilder::new(n(1), "A")
                .field(StructureField::new("B", n(2)))
                .build(),
            StructureBuilder::new(n(2), "B")
                .field(StructureField::new("A", n(1)))
                .build(),
        ]);
        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let err = boot
            .load_structure_definitions(&ids::STRUCTURE)
            .await
            .unwrap_err();
        let BootstrapError::Order(OrderError::CyclicTypeDependency { cycle }) = err else {
            panic!("expected a cycle");
        };
        assert_eq!(cycle.len(), 2);
    }

    #[tokio::test]
    async fn test_browse_failure_is_fatal() {
        let space = seeded(vec![StructureBuilder::new(n(1), "A").build()]);
        space.fail_browse_for(n(1));
        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let err = boot
            .load_structure_definitions(&ids::STRUCTURE)
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Browse { node, .. } if node == n(1)));
        assert!(boot.registry().is_empty());
    }

    #[tokio::test]
    async fn test_builtin_parent_passes_shape_down() {
        // "Range" is a platform name: not registered, but its fields are inherited
        let space = seeded(vec![
            StructureBuilder::new(n(1), "Range")
                .field(StructureField::new("Low", ids::DOUBLE))
                .field(StructureField::new("High", ids::DOUBLE))
                .build(),
            StructureBuilder::new(n(2), "TaggedRange")
                .parent(n(1))
                .field(StructureField::new("Tag", ids::STRING))
                .build(),
        ]);
        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();
        assert_eq!(report.registered, vec!["TaggedRange"]);

        let ty = boot.registry().lookup_by_name("TaggedRange").unwrap();
        let names: Vec<_> = ty
            .as_struct()
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Low", "High", "Tag"]);
    }

    #[tokio::test]
    async fn test_second_run_reports_duplicates() {
        let space = seeded(vec![color()]);
        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        boot.load_enum_definitions(&ids::ENUMERATION).await.unwrap();
        let again = boot.load_enum_definitions(&ids::ENUMERATION).await.unwrap();
        assert!(again.registered.is_empty());
        assert_eq!(again.skipped[0].reason, SkipReason::Duplicate);
        assert_eq!(boot.registry().len(), 1);
    }

    fn reasons(report: &BootstrapReport) -> Vec<(&str, SkipReason)> {
        report
            .skipped
            .iter()
            .map(|s| (s.name.as_str(), s.reason.clone()))
            .collect()
    }

    /// Parent{P1, P2} <- Child{C} <- GrandChild{D}
    fn lineage(parent: &str) -> Vec<NodeSet> {
        vec![
            StructureBuilder::new(n(1), parent)
                .field(StructureField::new("P1", ids::INT32))
                .field(StructureField::new("P2", ids::STRING))
                .build(),
            StructureBuilder::new(n(2), "Child")
                .parent(n(1))
                .field(StructureField::new("C", ids::DOUBLE))
                .build(),
            StructureBuilder::new(n(3), "GrandChild")
                .parent(n(2))
                .field(StructureField::new("D", ids::BOOLEAN))
                .build(),
        ]
    }

    #[tokio::test]
    async fn test_subtypes_of_unreadable_parent_are_skipped() {
        let space = seeded(lineage("Parent"));
        space.fail_reads_for(n(1));

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();

        assert!(report.registered.is_empty());
        assert!(boot.registry().is_empty());
        let skipped = reasons(&report);
        assert!(matches!(skipped[0], ("Parent", SkipReason::ReadFailed(_))));
        assert_eq!(
            &skipped[1..],
            &[
                ("Child", SkipReason::ParentSkipped(n(1))),
                ("GrandChild", SkipReason::ParentSkipped(n(2))),
            ]
        );
    }

    #[tokio::test]
    async fn test_subtypes_of_excluded_parent_are_skipped() {
        let space = seeded(lineage("Legacy"));
        let config = BootstrapConfig::default().with_excluded("Legacy");
        let mut boot = TypeBootstrap::new(&space, config);
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();

        assert!(report.registered.is_empty());
        assert_eq!(
            reasons(&report),
            vec![
                ("Legacy", SkipReason::Excluded),
                ("Child", SkipReason::ParentSkipped(n(1))),
                ("GrandChild", SkipReason::ParentSkipped(n(2))),
            ]
        );
    }

    #[tokio::test]
    async fn test_subtypes_of_parent_without_definition_are_skipped() {
        let mut sets = lineage("Bare");
        sets[0].nodes[0].data_type_definition = None;
        let space = seeded(sets);

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();

        assert!(report.registered.is_empty());
        assert_eq!(
            reasons(&report),
            vec![
                ("Bare", SkipReason::NotApplicable),
                ("Child", SkipReason::ParentSkipped(n(1))),
                ("GrandChild", SkipReason::ParentSkipped(n(2))),
            ]
        );
    }

    #[tokio::test]
    async fn test_subtypes_of_uncompilable_parent_are_skipped() {
        let mut sets = lineage("Choice");
        if let Some(DataTypeDefinition::Structure(def)) = &mut sets[0].nodes[0].data_type_definition {
            def.structure_type = StructureType::Union;
        }
        sets.push(
            StructureBuilder::new(n(4), "Sibling")
                .field(StructureField::new("S", ids::INT32))
                .build(),
        );
        let space = seeded(sets);

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();

        assert_eq!(report.registered, vec!["Sibling"]);
        assert!(boot.registry().lookup_by_name("Child").is_err());
        let skipped = reasons(&report);
        assert!(matches!(
            skipped[0],
            ("Choice", SkipReason::Compile(CompileError::UnsupportedStructureKind { .. }))
        ));
        assert_eq!(
            &skipped[1..],
            &[
                ("Child", SkipReason::ParentSkipped(n(1))),
                ("GrandChild", SkipReason::ParentSkipped(n(2))),
            ]
        );
    }

    #[tokio::test]
    async fn test_enumeration_under_structure_root_is_skipped() {
        let space = seeded(vec![
            EnumBuilder::new(n(1), "Misfiled")
                .parent(ids::STRUCTURE)
                .values(["A", "B"])
                .build(),
            StructureBuilder::new(n(2), "Below")
                .parent(n(1))
                .field(StructureField::new("X", ids::INT32))
                .build(),
        ]);
        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();

        assert!(report.registered.is_empty());
        assert_eq!(
            reasons(&report),
            vec![
                (
                    "Misfiled",
                    SkipReason::Compile(CompileError::NotAStructure {
                        type_name: "Misfiled".into()
                    })
                ),
                ("Below", SkipReason::ParentSkipped(n(1))),
            ]
        );
    }

    #[tokio::test]
    async fn test_extended_catalog_resolves_platform_field() {
        // a namespace-0 type the standard catalog does not carry
        let diagnostics = NodeId::numeric(0, 12345);
        let space = seeded(vec![StructureBuilder::new(n(1), "Report")
            .field(StructureField::new("Diag", diagnostics.clone()))
            .build()]);

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default());
        assert!(!boot.catalog().contains(&diagnostics));
        let err = boot
            .load_structure_definitions(&ids::STRUCTURE)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Compile(CompileError::UnresolvedFieldType { .. })
        ));

        let catalog = BuiltinCatalog::standard().with_type(
            diagnostics.clone(),
            "VendorDiagnostics",
            WireType::Builtin(BuiltinType::ExtensionObject),
        );
        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default()).with_catalog(catalog);
        assert!(boot.catalog().contains(&diagnostics));
        boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();
        let report = boot.registry().lookup_by_name("Report").unwrap();
        assert_eq!(
            report.as_struct().unwrap().field("Diag").unwrap().wire,
            WireType::Builtin(BuiltinType::ExtensionObject)
        );
    }

    #[tokio::test]
    async fn test_structures_resolve_against_prior_registry() {
        let space = seeded(vec![
            color(),
            StructureBuilder::new(n(1), "Lamp")
                .field(StructureField::new("Hue", n(50)))
                .build(),
        ]);
        let mut first = TypeBootstrap::new(&space, BootstrapConfig::default());
        first.load_enum_definitions(&ids::ENUMERATION).await.unwrap();
        let registry = first.into_registry();

        let mut boot = TypeBootstrap::new(&space, BootstrapConfig::default()).with_registry(registry);
        let report = boot.load_structure_definitions(&ids::STRUCTURE).await.unwrap();
        assert_eq!(report.registered, vec!["Lamp"]);
        assert_eq!(boot.registry().len(), 2);
    }
}
