use crate::container::identity::InvokableId;
use crate::container::Container;
use crate::errors::{ContainerError, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Plain, type-erased service value
pub type Service = Arc<dyn Any + Send + Sync>;

type CallFn = dyn Fn(&mut Container, &[Entry]) -> Result<Entry> + Send + Sync;

/// Callable payload: invoked with the container plus call-site arguments
///
/// Factories receive no arguments, extensions receive the resolved item.
/// Identity is the closure allocation, so clones are the same invokable.
#[derive(Clone)]
pub struct Invokable {
    call: Arc<CallFn>,
}

impl Invokable {
    /// Wrap a closure using the raw calling convention
    pub fn new<F>(call: F) -> Self
    where
        F: Fn(&mut Container, &[Entry]) -> Result<Entry> + Send + Sync + 'static,
    {
        Self {
            call: Arc::new(call),
        }
    }

    /// Factory producing an entry from the container
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&mut Container) -> Result<Entry> + Send + Sync + 'static,
    {
        Self::new(move |container, _| factory(container))
    }

    /// Factory producing a plain value of type `T`
    pub fn service<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Container) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(move |container, _| factory(container).map(Entry::value))
    }

    /// Extension receiving the container and the freshly resolved item
    pub fn extension<F>(extension: F) -> Self
    where
        F: Fn(&mut Container, &Entry) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(move |container, args| {
            let item = args.first().ok_or_else(|| {
                ContainerError::invalid_payload("Extension invoked without an item")
            })?;
            extension(container, item)?;
            Ok(Entry::value(()))
        })
    }

    /// Invoke with the given arguments
    pub fn call(&self, container: &mut Container, args: &[Entry]) -> Result<Entry> {
        (self.call)(container, args)
    }

    pub fn id(&self) -> InvokableId {
        InvokableId::from_ptr(Arc::as_ptr(&self.call) as *const ())
    }

    pub fn ptr_eq(&self, other: &Invokable) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for Invokable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Invokable").field(&self.id()).finish()
    }
}

/// Payload stored under a container key
#[derive(Clone)]
pub enum Entry {
    /// Plain data, returned as-is by resolution
    Value(Service),
    /// Factory, extension or protected literal
    Invokable(Invokable),
}

impl Entry {
    /// Wrap a plain value
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Entry::Value(Arc::new(value))
    }

    /// Store an already shared value without re-wrapping it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Entry::Value(value)
    }

    pub fn is_invokable(&self) -> bool {
        matches!(self, Entry::Invokable(_))
    }

    pub fn as_invokable(&self) -> Option<&Invokable> {
        match self {
            Entry::Invokable(invokable) => Some(invokable),
            Entry::Value(_) => None,
        }
    }

    /// Downcast a plain value to a shared handle of `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Entry::Value(service) => service.clone().downcast::<T>().ok(),
            Entry::Invokable(_) => None,
        }
    }

    /// Borrow a plain value as `T`
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Entry::Value(service) => service.downcast_ref::<T>(),
            Entry::Invokable(_) => None,
        }
    }

    /// Check whether both entries point at the same allocation
    pub fn ptr_eq(&self, other: &Entry) -> bool {
        match (self, other) {
            (Entry::Value(a), Entry::Value(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (Entry::Invokable(a), Entry::Invokable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<Invokable> for Entry {
    fn from(invokable: Invokable) -> Self {
        Entry::Invokable(invokable)
    }
}

impl From<Service> for Entry {
    fn from(service: Service) -> Self {
        Entry::Value(service)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Value(_) => f.debug_tuple("Value").field(&"<value>").finish(),
            Entry::Invokable(invokable) => f.debug_tuple("Invokable").field(&invokable.id()).finish(),
        }
    }
}
