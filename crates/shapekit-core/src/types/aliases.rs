//! Type aliases for shared ownership.
//!
//! Editing runs on a single thread, so shared state is `Rc<RefCell<T>>`
//! rather than `Arc<Mutex<T>>`. The aliases keep the intent readable at
//! the call site.
//!
//! ```rust,ignore
//! use shapekit_core::types::*;
//!
//! let log: Shared<Vec<String>> = Shared::new(RefCell::new(Vec::new()));
//! log.borrow_mut().push("created".to_string());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Used where an engine service is boxed into the editor but its state must
/// stay observable from outside (tests, the headless session summary).
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value in a new [`Shared`] cell.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
