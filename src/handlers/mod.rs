//! The control-surface components, in the order the controller offers input to them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod clip;
pub use clip::*;

mod remote;
pub use remote::*;

mod nav;
pub use nav::*;

mod transport;
pub use transport::*;

/// Whether the shift button is held. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct ShiftState(Arc<AtomicBool>);

impl ShiftState {
    pub fn is_held(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, held: bool) {
        self.0.store(held, Ordering::SeqCst);
    }
}
