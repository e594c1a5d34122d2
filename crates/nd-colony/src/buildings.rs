//! Dwellings and working places.
//!
//! A building has a fixed number of slots.  `assigned` counts dwarves that
//! hold a slot (their dwelling or job is here); `occupants` counts dwarves
//! that are inside right now.  Occupants are always a subset of the
//! assigned dwarves.

use nd_core::{AgentId, BuildingId, Vec2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildingKind {
    Dwelling,
    /// A static job keeps the dwarf inside for the whole shift.
    WorkingPlace { static_job: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub kind: BuildingKind,
    /// Door position dwarves path to.
    pub position: Vec2,
    pub capacity: u32,
    pub assigned: u32,
    pub occupants: u32,
    /// Resource units stored here.
    pub stock: u32,
}

impl Building {
    #[inline]
    pub fn has_free_slot(&self) -> bool {
        self.assigned < self.capacity
    }

    #[inline]
    pub fn is_dwelling(&self) -> bool {
        self.kind == BuildingKind::Dwelling
    }

    #[inline]
    pub fn is_working_place(&self) -> bool {
        matches!(self.kind, BuildingKind::WorkingPlace { .. })
    }
}

#[derive(Clone, Debug, Default)]
pub struct BuildingRegistry {
    buildings: Vec<Building>,
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dwelling(&mut self, position: Vec2, capacity: u32) -> BuildingId {
        self.add(BuildingKind::Dwelling, position, capacity)
    }

    pub fn add_working_place(&mut self, position: Vec2, capacity: u32, static_job: bool) -> BuildingId {
        self.add(BuildingKind::WorkingPlace { static_job }, position, capacity)
    }

    fn add(&mut self, kind: BuildingKind, position: Vec2, capacity: u32) -> BuildingId {
        let id = BuildingId(self.buildings.len() as u32);
        self.buildings.push(Building { kind, position, capacity, assigned: 0, occupants: 0, stock: 0 });
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(id.index())
    }

    /// The building `ids[agent]` points at, if any.
    pub fn lookup(&self, ids: &[BuildingId], agent: AgentId) -> Option<(BuildingId, &Building)> {
        let id = *ids.get(agent.index())?;
        self.get(id).map(|b| (id, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuildingId, &Building)> + '_ {
        self.buildings.iter().enumerate().map(|(i, b)| (BuildingId(i as u32), b))
    }

    /// Take a slot in the lowest-id building accepted by `want` that still
    /// has one.
    pub fn reserve(&mut self, want: impl Fn(&Building) -> bool) -> Option<BuildingId> {
        let (i, building) = self
            .buildings
            .iter_mut()
            .enumerate()
            .find(|(_, b)| want(b) && b.has_free_slot())?;
        building.assigned += 1;
        Some(BuildingId(i as u32))
    }

    /// Give a reserved slot back.
    pub fn release(&mut self, id: BuildingId) {
        if let Some(b) = self.get_mut(id) {
            b.assigned = b.assigned.saturating_sub(1);
        }
    }

    pub fn enter(&mut self, id: BuildingId) -> bool {
        match self.get_mut(id) {
            Some(b) if b.occupants < b.assigned => {
                b.occupants += 1;
                true
            }
            _ => false,
        }
    }

    pub fn exit(&mut self, id: BuildingId) -> bool {
        match self.get_mut(id) {
            Some(b) if b.occupants > 0 => {
                b.occupants -= 1;
                true
            }
            _ => false,
        }
    }
}
