use smol_str::SmolStr;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Name of the material returned for unknown material names.
pub const DEFAULT_MATERIAL: &str = "_default";

#[derive(Debug, PartialEq, Eq)]
pub struct Material {
    name: SmolStr,
    is_default: bool,
}

impl Material {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the fallback material of its registry.
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Shared handle to a registered material.
pub type MaterialRef = Arc<Material>;

/// Resolves material names to materials.
pub trait MaterialRegistry {
    /// Returns the material with the given name.
    ///
    /// This never fails: unknown names resolve to a registry-defined default material.
    fn find_material(&self, name: &str) -> MaterialRef;
}

impl<F> MaterialRegistry for F
where
    F: Fn(&str) -> MaterialRef,
{
    fn find_material(&self, name: &str) -> MaterialRef {
        self(name)
    }
}

/// In-memory material registry.
#[derive(Debug)]
pub struct MaterialTable {
    materials: HashMap<SmolStr, MaterialRef>,
    default: MaterialRef,
}

impl Default for MaterialTable {
    fn default() -> Self {
        MaterialTable::new()
    }
}

impl MaterialTable {
    pub fn new() -> MaterialTable {
        MaterialTable {
            materials: HashMap::new(),
            default: Arc::new(Material {
                name: DEFAULT_MATERIAL.into(),
                is_default: true,
            }),
        }
    }

    /// Registers a material, or returns the existing one with the same name.
    pub fn insert(&mut self, name: &str) -> MaterialRef {
        self.materials
            .entry(name.into())
            .or_insert_with(|| {
                Arc::new(Material {
                    name: name.into(),
                    is_default: false,
                })
            })
            .clone()
    }

    pub fn default_material(&self) -> &MaterialRef {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialRegistry for MaterialTable {
    fn find_material(&self, name: &str) -> MaterialRef {
        match self.materials.get(name) {
            Some(material) => material.clone(),
            None => {
                debug!("unknown material `{name}`, using default");
                self.default.clone()
            }
        }
    }
}
