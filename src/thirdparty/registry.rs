use kube::core::GroupVersion;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, PoisonError, RwLock},
};

/// Types which can be registered for a group/version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnownType {
    ListOptions,
    DeleteOptions,
    ThirdPartyResourceObject,
    ThirdPartyResourceObjectList,
}

impl KnownType {
    /// Everything a client for custom resource objects needs.
    pub const ALL: [KnownType; 4] = [
        Self::ListOptions,
        Self::DeleteOptions,
        Self::ThirdPartyResourceObject,
        Self::ThirdPartyResourceObjectList,
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ListOptions => "ListOptions",
            Self::DeleteOptions => "DeleteOptions",
            Self::ThirdPartyResourceObject => "ThirdPartyResourceObject",
            Self::ThirdPartyResourceObjectList => "ThirdPartyResourceObjectList",
        }
    }
}

/// Registry of the types known per group/version.
///
/// Clones share the same registry. Registering is idempotent and safe from
/// multiple threads.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: Arc<RwLock<BTreeMap<String, BTreeSet<KnownType>>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_known_types(&self, group_version: &GroupVersion, types: &[KnownType]) {
        let api_version = group_version.api_version();
        log::debug!("Registering {types:?} for {api_version}");

        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(api_version)
            .or_default()
            .extend(types.iter().copied());
    }

    pub fn is_registered(&self, group_version: &GroupVersion, ty: KnownType) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&group_version.api_version())
            .is_some_and(|types| types.contains(&ty))
    }

    /// Check if objects of the `apiVersion` can be handled.
    pub fn recognizes(&self, api_version: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(api_version)
            .is_some_and(|types| types.contains(&KnownType::ThirdPartyResourceObject))
    }

    /// All group/versions with registered types, as `apiVersion` strings.
    pub fn group_versions(&self) -> Vec<String> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
