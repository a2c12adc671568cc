use crate::container::entry::Invokable;
use std::collections::HashMap;
use std::fmt;

/// Address identity of an invokable's closure allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvokableId(usize);

impl InvokableId {
    pub(crate) fn from_ptr(ptr: *const ()) -> Self {
        Self(ptr as usize)
    }
}

impl fmt::Debug for InvokableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Membership set keyed by invokable identity rather than value
///
/// Members are pinned by holding a clone, so an address cannot be
/// reused by another closure while it is attached.
#[derive(Debug, Clone, Default)]
pub struct IdentitySet {
    members: HashMap<InvokableId, Invokable>,
}

impl IdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `item`, returning false if it was already a member
    pub fn attach(&mut self, item: &Invokable) -> bool {
        self.members.insert(item.id(), item.clone()).is_none()
    }

    /// Detach `item`, returning whether it was a member
    pub fn detach(&mut self, item: &Invokable) -> bool {
        self.members.remove(&item.id()).is_some()
    }

    pub fn contains(&self, item: &Invokable) -> bool {
        self.members.contains_key(&item.id())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
