//! Graph extensions: typed add-on objects owned by a graph.

use std::any::Any;
use std::fmt::Debug;

/// An object attached to a graph for the graph's lifetime (or until removed).
pub trait GraphExtension: Any + Debug {
    /// Display name, used in logs.
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn GraphExtension {
    pub fn is<T: GraphExtension>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: GraphExtension>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: GraphExtension>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
