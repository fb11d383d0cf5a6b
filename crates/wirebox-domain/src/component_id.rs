//! Component identifiers
//!
//! A [`ComponentId`] names one logical injectable component: the component
//! type plus an optional qualifier type. Qualifiers only take part in deriving
//! the identifier; the stored descriptor never sees them.

use crate::constants::QUALIFIER_SEPARATOR;
use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Ordered, hashable key for a requested component type
///
/// Equality, ordering and hashing only look at the `TypeId`s. The printable
/// names are kept for diagnostics.
///
/// # Example
///
/// ```
/// use wirebox_domain::ComponentId;
///
/// struct Primary;
///
/// assert_eq!(ComponentId::of::<u32>(), ComponentId::of::<u32>());
/// assert_ne!(ComponentId::of::<u32>(), ComponentId::annotated::<Primary, u32>());
/// assert_eq!(ComponentId::of::<u32>(), ComponentId::annotated::<(), u32>());
/// ```
#[derive(Clone, Copy)]
pub struct ComponentId {
    type_id: TypeId,
    qualifier: Option<TypeId>,
    type_name: &'static str,
    qualifier_name: Option<&'static str>,
}

impl ComponentId {
    /// Identifier of the unqualified component `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            qualifier: None,
            type_name: type_name::<T>(),
            qualifier_name: None,
        }
    }

    /// Identifier of `T` qualified by the marker type `A`
    ///
    /// The unit type `()` means "no qualifier", so `annotated::<(), T>()`
    /// equals `of::<T>()`.
    pub fn annotated<A: 'static, T: ?Sized + 'static>() -> Self {
        Self::of::<T>().with_qualifier::<A>()
    }

    /// The same component type under a different qualifier
    pub fn with_qualifier<A: 'static>(self) -> Self {
        let qualifier = TypeId::of::<A>();
        if qualifier == TypeId::of::<()>() {
            return Self {
                qualifier: None,
                qualifier_name: None,
                ..self
            };
        }
        Self {
            qualifier: Some(qualifier),
            qualifier_name: Some(type_name::<A>()),
            ..self
        }
    }

    /// `TypeId` of the component type, qualifier erased
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Printable name of the component type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Printable name of the qualifier, if any
    pub fn qualifier_name(&self) -> Option<&'static str> {
        self.qualifier_name
    }

    /// Whether this identifier carries a qualifier
    pub fn is_annotated(&self) -> bool {
        self.qualifier.is_some()
    }

    fn key(&self) -> (TypeId, Option<TypeId>) {
        (self.type_id, self.qualifier)
    }
}

impl PartialEq for ComponentId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ComponentId {}

impl PartialOrd for ComponentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for ComponentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier_name {
            Some(qualifier) => write!(f, "{}{QUALIFIER_SEPARATOR}{qualifier}", self.type_name),
            None => f.write_str(self.type_name),
        }
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({self})")
    }
}
