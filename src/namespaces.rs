//! Namespace registry and level/version resolution
//!
//! Every supported (level, version) pair has exactly one canonical namespace
//! URI, which is what gets written, plus a sorted set of alternate URIs that
//! are accepted as the same schema on read. Unknown pairs resolve to the
//! registry's fallback entry, Level 1 Version 3.

use crate::xml::XmlNamespaces;

/// Default SED-ML level for new documents
pub const DEFAULT_LEVEL: u32 = 1;
/// Default SED-ML version for new documents
pub const DEFAULT_VERSION: u32 = 5;

/// MathML namespace used by data generator formulas
pub const MATHML_URI: &str = "http://www.w3.org/1998/Math/MathML";

const FALLBACK_LEVEL: u32 = 1;
const FALLBACK_VERSION: u32 = 3;

/// Immutable description of one schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceDescriptor {
    /// Schema level
    pub level: u32,
    /// Schema version within the level
    pub version: u32,
    /// URI written for this version
    pub uri: &'static str,
    /// Other URIs recognized as this version on read, sorted
    pub alternates: &'static [&'static str],
}

impl NamespaceDescriptor {
    /// Whether `uri` is the canonical URI or one of the alternates
    pub fn recognizes(&self, uri: &str) -> bool {
        uri == self.uri || self.alternates.binary_search(&uri).is_ok()
    }
}

static REGISTRY: [NamespaceDescriptor; 5] = [
    NamespaceDescriptor {
        level: 1,
        version: 1,
        uri: "http://sed-ml.org/",
        alternates: &["http://sed-ml.org", "http://sed-ml.org/sed-ml/level1/version1"],
    },
    NamespaceDescriptor {
        level: 1,
        version: 2,
        uri: "http://sed-ml.org/sed-ml/level1/version2",
        alternates: &["http://sed-ml.org/sed-ml/level1/version2/"],
    },
    NamespaceDescriptor {
        level: 1,
        version: 3,
        uri: "http://sed-ml.org/sed-ml/level1/version3",
        alternates: &["http://sed-ml.org/sed-ml/level1/version3/"],
    },
    NamespaceDescriptor {
        level: 1,
        version: 4,
        uri: "http://sed-ml.org/sed-ml/level1/version4",
        alternates: &["http://sed-ml.org/sed-ml/level1/version4/"],
    },
    NamespaceDescriptor {
        level: 1,
        version: 5,
        uri: "http://sed-ml.org/sed-ml/level1/version5",
        alternates: &["http://sed-ml.org/sed-ml/level1/version5/"],
    },
];

/// Every registered schema version
pub fn supported() -> &'static [NamespaceDescriptor] {
    &REGISTRY
}

/// Exact registry entry for (level, version)
pub fn find(level: u32, version: u32) -> Option<&'static NamespaceDescriptor> {
    REGISTRY
        .iter()
        .find(|d| d.level == level && d.version == version)
}

/// Registry entry for (level, version), falling back to Level 1 Version 3
pub fn lookup(level: u32, version: u32) -> &'static NamespaceDescriptor {
    find(level, version)
        .or_else(|| find(FALLBACK_LEVEL, FALLBACK_VERSION))
        .unwrap_or(&REGISTRY[2])
}

/// Canonical URI written for (level, version)
pub fn sed_namespace_uri(level: u32, version: u32) -> &'static str {
    lookup(level, version).uri
}

/// Registry entry recognizing `uri`, canonical or alternate
pub fn from_uri(uri: &str) -> Option<&'static NamespaceDescriptor> {
    REGISTRY.iter().find(|d| d.recognizes(uri))
}

/// Whether `uri` belongs to any registered SED-ML version
pub fn is_sed_namespace(uri: &str) -> bool {
    from_uri(uri).is_some()
}

/// Level, version and namespace declarations carried by a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SedNamespaces {
    level: u32,
    version: u32,
    namespaces: XmlNamespaces,
}

impl SedNamespaces {
    /// Declarations for (level, version) with the canonical URI as default namespace
    pub fn new(level: u32, version: u32) -> Self {
        let mut namespaces = XmlNamespaces::new();
        namespaces.add(sed_namespace_uri(level, version), "");
        Self {
            level,
            version,
            namespaces,
        }
    }

    /// Level and version with no declarations
    pub fn bare(level: u32, version: u32) -> Self {
        Self {
            level,
            version,
            namespaces: XmlNamespaces::new(),
        }
    }

    /// Schema level
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Schema version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Change level and version, keeping declarations
    pub fn set_level_and_version(&mut self, level: u32, version: u32) {
        self.level = level;
        self.version = version;
    }

    /// Registry entry for this level and version
    pub fn descriptor(&self) -> &'static NamespaceDescriptor {
        lookup(self.level, self.version)
    }

    /// Canonical URI for this level and version
    pub fn uri(&self) -> &'static str {
        self.descriptor().uri
    }

    /// Declared namespaces
    pub fn namespaces(&self) -> &XmlNamespaces {
        &self.namespaces
    }

    /// Mutable declared namespaces
    pub fn namespaces_mut(&mut self) -> &mut XmlNamespaces {
        &mut self.namespaces
    }

    /// Replace the declared namespaces
    pub fn set_namespaces(&mut self, namespaces: XmlNamespaces) {
        self.namespaces = namespaces;
    }

    /// Whether an object carrying `other` may be added under these declarations
    ///
    /// A default namespace declared on `other` must be recognized for this
    /// level and version.
    pub fn accepts(&self, other: &SedNamespaces) -> bool {
        match other.namespaces.uri("") {
            Some(uri) => self.descriptor().recognizes(uri),
            None => true,
        }
    }
}

impl Default for SedNamespaces {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL, DEFAULT_VERSION)
    }
}
