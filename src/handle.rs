use std::{
    hash::Hash,
    sync::{mpsc::Sender, Arc},
};

pub type HandleId = u64;

/// Shared handle to one requested sprite sheet.
///
/// Clones share the same request. When the last clone drops, the loader that
/// issued it is told so it can discard the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) Arc<StrongHandle>);

impl Handle {
    pub(crate) fn new(id: HandleId, resource_index: usize, drop_sender: Sender<DropEvent>) -> Self {
        Self(Arc::new(StrongHandle {
            id,
            resource_index,
            drop_sender,
        }))
    }

    pub fn id(&self) -> HandleId {
        self.0.id
    }

    /// Index of the sheet this handle was requested for
    pub fn resource_index(&self) -> usize {
        self.0.resource_index
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DropEvent(pub HandleId);

#[derive(Debug)]
pub(crate) struct StrongHandle {
    id: HandleId,
    resource_index: usize,
    drop_sender: Sender<DropEvent>,
}

impl Hash for StrongHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Hash::hash(&self.id, state)
    }
}

impl Eq for StrongHandle {}

impl PartialEq for StrongHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for StrongHandle {
    fn drop(&mut self) {
        let _ = self.drop_sender.send(DropEvent(self.id));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use super::*;

    #[test]
    fn test_drop_reported_after_last_clone() {
        let (sender, receiver) = channel();
        let handle = Handle::new(7, 2, sender);
        let clone = handle.clone();
        assert_eq!(clone.resource_index(), 2);
        drop(handle);
        assert!(receiver.try_recv().is_err());
        drop(clone);
        assert_eq!(receiver.try_recv(), Ok(DropEvent(7)));
    }
}
