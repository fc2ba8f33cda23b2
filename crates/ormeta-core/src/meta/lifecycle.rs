use super::{ClassId, MemberId};

/// Where a descriptor sits in its lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only user-supplied values are set.
    #[default]
    Raw,

    /// Types are resolved and type-dependent defaults applied.
    Populated,

    /// Structural sub-descriptors have been derived.
    Initialised,
}

/// Non-owning back-reference from a descriptor to what it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Class(ClassId),
    Member(MemberId),
}

/// Lifecycle bookkeeping carried by every descriptor that populates or
/// initialises.
///
/// Cloning a node yields a fresh, unattached `Raw` node: a deep copy is a new
/// subtree whose parent link is wired by whoever attaches it.
#[derive(Debug, Default)]
pub struct Node {
    phase: Phase,
    parent: Option<Parent>,
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Node::default()
    }
}

impl Node {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn parent(&self) -> Option<Parent> {
        self.parent
    }

    pub(crate) fn attach(&mut self, parent: Parent) {
        self.parent = Some(parent);
    }

    #[track_caller]
    pub(crate) fn begin_populate(&self, what: &str) {
        assert_eq!(
            self.phase,
            Phase::Raw,
            "{what} has already been populated"
        );
    }

    pub(crate) fn finish_populate(&mut self) {
        self.phase = Phase::Populated;
    }

    /// Descriptors without a populate step may initialise straight from `Raw`.
    #[track_caller]
    pub(crate) fn begin_initialise(&self, what: &str, requires_populate: bool) {
        assert_ne!(
            self.phase,
            Phase::Initialised,
            "{what} has already been initialised"
        );
        if requires_populate {
            assert_eq!(
                self.phase,
                Phase::Populated,
                "{what} must be populated before it is initialised"
            );
        }
    }

    pub(crate) fn finish_initialise(&mut self) {
        self.phase = Phase::Initialised;
    }
}

/// Shared read access to a descriptor's lifecycle node.
pub trait Descriptor {
    fn node(&self) -> &Node;

    fn phase(&self) -> Phase {
        self.node().phase()
    }

    fn parent(&self) -> Option<Parent> {
        self.node().parent()
    }

    fn is_populated(&self) -> bool {
        matches!(self.phase(), Phase::Populated | Phase::Initialised)
    }

    fn is_initialised(&self) -> bool {
        self.phase() == Phase::Initialised
    }
}

macro_rules! impl_descriptor {
    ( $($ty:ty),+ $(,)? ) => {
        $(
            impl $crate::meta::Descriptor for $ty {
                fn node(&self) -> &$crate::meta::Node {
                    &self.node
                }
            }
        )+
    };
}
