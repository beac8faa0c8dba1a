//! Opaque Payloads
//!
//! Cause entries and context values are owned by the callers that push them.
//! The manager only orders and indexes them, so both are shared pointers to
//! arbitrary `Any` values compared by identity, never by content.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

macro_rules! opaque_payload {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            value: Arc<dyn Any + Send + Sync>,
            type_name: &'static str,
        }

        impl $name {
            /// Wrap a value in a fresh allocation with its own identity.
            pub fn new<T: Any + Send + Sync>(value: T) -> Self {
                Self {
                    value: Arc::new(value),
                    type_name: std::any::type_name::<T>(),
                }
            }

            /// Borrow the payload as `T` if that is its concrete type.
            pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
                self.value.downcast_ref::<T>()
            }

            /// Shared handle to the payload as `T` if that is its concrete type.
            pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
                Arc::clone(&self.value).downcast::<T>().ok()
            }

            pub fn is<T: Any>(&self) -> bool {
                self.value.is::<T>()
            }

            /// Identity comparison: true only for clones of the same payload.
            pub fn ptr_eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.value, &other.value)
            }

            /// Name of the concrete type, for diagnostics.
            pub fn type_name(&self) -> &'static str {
                self.type_name
            }
        }

        impl<T: Any + Send + Sync> From<Arc<T>> for $name {
            fn from(value: Arc<T>) -> Self {
                Self {
                    value,
                    type_name: std::any::type_name::<T>(),
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ptr_eq(other)
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({} @ {:p})",
                    stringify!($name),
                    self.type_name,
                    Arc::as_ptr(&self.value) as *const ()
                )
            }
        }
    };
}

opaque_payload!(
    /// An entry on the cause stack: the object responsible for an action.
    CauseEntry
);

opaque_payload!(
    /// A value stored under a context key.
    ContextValue
);
