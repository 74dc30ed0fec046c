//! Opaque handle to the API client that produced an object.
//!
//! Objects only carry it around and hand it to the objects nested inside them;
//! nothing in this crate calls into it.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct ClientRef(Arc<dyn Any + Send + Sync>);

impl ClientRef {
    pub fn new<T: Any + Send + Sync>(client: T) -> Self {
        ClientRef(Arc::new(client))
    }

    pub fn from_arc<T: Any + Send + Sync>(client: Arc<T>) -> Self {
        ClientRef(client)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// true when both handles point at the same client
    pub fn ptr_eq(&self, other: &ClientRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientRef(..)")
    }
}
