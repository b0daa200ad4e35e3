//! Capability composition.
//!
//! A composite service is assembled from independent capability units that
//! all borrow one shared connector. Each unit publishes a
//! [`CapabilityDescriptor`] listing the methods it contributes; a
//! [`Composition`] folds descriptors together and refuses any method name
//! that two different units both claim. The same check is available as a
//! `const fn` so composites can reject collisions at compile time too.
//!
//! # Example
//!
//! ```
//! use ghissues::composition::{CapabilityDescriptor, Composition};
//!
//! const NOTES: CapabilityDescriptor = CapabilityDescriptor {
//!     name: "notes",
//!     methods: &["add_note"],
//! };
//! const STICKERS: CapabilityDescriptor = CapabilityDescriptor {
//!     name: "stickers",
//!     methods: &["add_note", "add_sticker"],
//! };
//!
//! let err = Composition::new()
//!     .incorporate(NOTES)
//!     .and_then(|c| c.incorporate(STICKERS))
//!     .unwrap_err();
//! assert!(err.to_string().contains("add_note"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Static description of a capability: its name and the methods it provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub name: &'static str,
    pub methods: &'static [&'static str],
}

/// A behaviour unit that can be incorporated into a composite service.
///
/// Implementors hold nothing but the shared connector handle they were
/// attached with.
pub trait Capability: Sized {
    /// The connector type this unit drives.
    type Connector: ?Sized;

    /// Name and method list of this capability.
    const DESCRIPTOR: CapabilityDescriptor;

    /// Build the unit around a shared connector handle.
    fn attach(connector: Arc<Self::Connector>) -> Self;

    /// The connector handle this unit was attached with.
    fn connector(&self) -> &Arc<Self::Connector>;
}

/// Incremental builder that detects method-name collisions.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    descriptors: Vec<CapabilityDescriptor>,
    methods: BTreeMap<&'static str, &'static str>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability's methods to the composition.
    ///
    /// Incorporating the identical descriptor twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionConflict`] if any method is already
    /// provided by another capability, or is listed twice by this one.
    pub fn incorporate(mut self, descriptor: CapabilityDescriptor) -> Result<Self> {
        if self.descriptors.contains(&descriptor) {
            return Ok(self);
        }

        let mut added: BTreeMap<&'static str, &'static str> = BTreeMap::new();
        for &method in descriptor.methods {
            let existing = self
                .methods
                .get(method)
                .or_else(|| added.get(method))
                .copied();
            if let Some(first) = existing {
                tracing::error!(method, first, second = descriptor.name, "capability conflict");
                return Err(Error::ConstructionConflict {
                    method,
                    first,
                    second: descriptor.name,
                });
            }
            added.insert(method, descriptor.name);
        }

        self.methods.extend(added);
        self.descriptors.push(descriptor);
        Ok(self)
    }

    /// Finish the composition.
    pub fn build(self) -> Manifest {
        Manifest {
            capabilities: self.descriptors.iter().map(|d| d.name).collect(),
            methods: self.methods,
        }
    }
}

/// The validated method surface of a composite service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    capabilities: Vec<&'static str>,
    methods: BTreeMap<&'static str, &'static str>,
}

impl Manifest {
    /// Compose descriptors in order, failing on the first collision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionConflict`] on a method-name collision.
    pub fn compose(descriptors: &[CapabilityDescriptor]) -> Result<Self> {
        descriptors
            .iter()
            .try_fold(Composition::new(), |c, d| c.incorporate(*d))
            .map(Composition::build)
    }

    /// Capability names in incorporation order.
    pub fn capabilities(&self) -> &[&'static str] {
        &self.capabilities
    }

    /// The capability that provides `method`, if any.
    pub fn provider(&self, method: &str) -> Option<&'static str> {
        self.methods.get(method).copied()
    }

    pub fn provides(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// All method names, sorted.
    pub fn methods(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Whether two method lists share no name. Usable in `const` assertions.
pub const fn methods_disjoint(a: &[&str], b: &[&str]) -> bool {
    let mut i = 0;
    while i < a.len() {
        let mut j = 0;
        while j < b.len() {
            if str_eq(a[i], b[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Whether every pair of distinct descriptors is method-disjoint.
pub const fn descriptors_disjoint(descriptors: &[CapabilityDescriptor]) -> bool {
    let mut i = 0;
    while i < descriptors.len() {
        let mut j = i + 1;
        while j < descriptors.len() {
            if !methods_disjoint(descriptors[i].methods, descriptors[j].methods) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Assert at compile time that a set of descriptors is method-disjoint.
///
/// ```
/// use ghissues::assert_disjoint_capabilities;
/// use ghissues::capabilities::{ASSIGNEES, ISSUES, LABELS};
///
/// assert_disjoint_capabilities!(ISSUES, LABELS, ASSIGNEES);
/// ```
#[macro_export]
macro_rules! assert_disjoint_capabilities {
    ($($descriptor:expr),+ $(,)?) => {
        const _: () = assert!(
            $crate::composition::descriptors_disjoint(&[$($descriptor),+]),
            "capabilities declare overlapping method names"
        );
    };
}
