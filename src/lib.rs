//! Causestack: Scoped Cause and Context Tracking
//!
//! Records why an action is happening (a stack of cause entries) and what
//! situational facts apply (a keyed context map). Scopes open frames that put
//! both back exactly as they found them when the scope ends, and consumers
//! read cached immutable snapshots to tag the events they emit.
//!
//! ```
//! use causestack::{CauseEntry, CauseStackManager, ContextKey, ContextValue};
//!
//! const OWNER: ContextKey = ContextKey::from_static("example:owner");
//!
//! let mut manager = CauseStackManager::new(CauseEntry::new("server"));
//! {
//!     let mut scope = manager.create_scope();
//!     scope.push_cause(CauseEntry::new("player"));
//!     scope.add_context(OWNER, ContextValue::new("alex"));
//!     assert_eq!(scope.current_cause().root().downcast_ref::<&str>(), Some(&"player"));
//! }
//! assert!(manager.get_context(&OWNER).is_none());
//! ```

pub mod cause;
pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod logging;
pub mod manager;
pub mod payload;
pub mod scope;

pub use cause::{Cause, CauseStack};
pub use config::CauseStackConfig;
pub use context::{keys, ContextKey, ContextMap, EventContext};
pub use error::{ConfigError, StackError};
pub use frame::{FrameHandle, FrameId};
pub use manager::CauseStackManager;
pub use payload::{CauseEntry, ContextValue};
pub use scope::CauseScope;
