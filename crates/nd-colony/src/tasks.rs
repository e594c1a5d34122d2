//! Hauling jobs: move `quantity` units from one building's stock to another.

use std::collections::VecDeque;

use nd_core::BuildingId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InventoryTask {
    pub giver: BuildingId,
    pub receiver: BuildingId,
    pub quantity: u32,
}

/// Open tasks, handed out oldest first.
#[derive(Clone, Debug, Default)]
pub struct TaskBoard {
    open: VecDeque<InventoryTask>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, task: InventoryTask) {
        self.open.push_back(task);
    }

    /// Put an abandoned task at the front so it is handed out next.
    pub fn repost(&mut self, task: InventoryTask) {
        self.open.push_front(task);
    }

    pub fn take(&mut self) -> Option<InventoryTask> {
        self.open.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
