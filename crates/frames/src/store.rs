use crate::types::{Frame, FrameGraph};

/// Read access to frames by name
///
/// This is the whole contract lexicon code relies on; inheritance and
/// space membership stay behind it.
pub trait FrameStore {
    fn frame_by_name(&self, name: &str) -> Option<&Frame>;
}

impl FrameStore for FrameGraph {
    fn frame_by_name(&self, name: &str) -> Option<&Frame> {
        self.frame(name)
    }
}

impl<T: FrameStore + ?Sized> FrameStore for &T {
    fn frame_by_name(&self, name: &str) -> Option<&Frame> {
        (**self).frame_by_name(name)
    }
}
