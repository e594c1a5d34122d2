//! Leaf dispatch: one call into the world per leaf visit.

use nd_core::AgentId;

use crate::node::{Destination, LeafKind};
use crate::status::NodeStatus;
use crate::world::DwarfWorld;

/// Result of running a leaf once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeafOutcome {
    Success,
    Fail,
    /// Keep the agent on this leaf; it runs again next tick.
    Running,
    /// Keep the agent on this leaf and stop stepping it until the world
    /// wakes it.
    Sleep,
}

impl LeafOutcome {
    #[inline]
    fn from_bool(ok: bool) -> Self {
        if ok { LeafOutcome::Success } else { LeafOutcome::Fail }
    }

    /// The status reported to the parent, or `None` if the agent stays.
    #[inline]
    pub fn finished(self) -> Option<NodeStatus> {
        match self {
            LeafOutcome::Success => Some(NodeStatus::Success),
            LeafOutcome::Fail => Some(NodeStatus::Fail),
            LeafOutcome::Running | LeafOutcome::Sleep => None,
        }
    }
}

/// Run `leaf` for `agent`.
pub fn run_leaf<W: DwarfWorld + ?Sized>(leaf: LeafKind, agent: AgentId, world: &mut W) -> LeafOutcome {
    match leaf {
        LeafKind::WaitForPath => {
            if world.has_path(agent) {
                LeafOutcome::Success
            } else {
                LeafOutcome::Sleep
            }
        }
        LeafKind::MoveTo => {
            if world.is_at_destination(agent) {
                LeafOutcome::Success
            } else {
                world.add_path_following(agent);
                LeafOutcome::Running
            }
        }
        LeafKind::FindPathTo(destination) => find_path_to(destination, agent, world),

        LeafKind::HasDwelling => LeafOutcome::from_bool(world.dwelling(agent).is_some()),
        LeafKind::SetDwelling => LeafOutcome::from_bool(world.assign_dwelling(agent)),
        LeafKind::EnterDwelling => LeafOutcome::from_bool(world.enter_dwelling(agent)),
        LeafKind::ExitDwelling => LeafOutcome::from_bool(world.exit_dwelling(agent)),

        LeafKind::HasJob => LeafOutcome::from_bool(world.has_job(agent)),
        LeafKind::HasStaticJob => LeafOutcome::from_bool(world.has_static_job(agent)),
        LeafKind::AssignJob => LeafOutcome::from_bool(world.assign_job(agent)),
        LeafKind::EnterWorkingPlace => LeafOutcome::from_bool(world.enter_working_place(agent)),
        LeafKind::ExitWorkingPlace => LeafOutcome::from_bool(world.exit_working_place(agent)),

        LeafKind::IsDayTime => LeafOutcome::from_bool(world.is_day_time()),
        LeafKind::IsNightTime => LeafOutcome::from_bool(world.is_night_time()),
        LeafKind::WaitDayTime => wait_until(world.is_day_time()),
        LeafKind::WaitNightTime => wait_until(world.is_night_time()),

        LeafKind::AskInventoryTask => LeafOutcome::from_bool(world.ask_inventory_task(agent)),
        LeafKind::TakeResources => LeafOutcome::from_bool(world.take_resources(agent)),
        LeafKind::PutResources => LeafOutcome::from_bool(world.put_resources(agent)),
    }
}

#[inline]
fn wait_until(condition: bool) -> LeafOutcome {
    if condition { LeafOutcome::Success } else { LeafOutcome::Running }
}

fn find_path_to<W: DwarfWorld + ?Sized>(destination: Destination, agent: AgentId, world: &mut W) -> LeafOutcome {
    let position = match destination {
        Destination::Random => return LeafOutcome::from_bool(world.add_find_random_path(agent)),
        Destination::InventoryTaskGiver => {
            return LeafOutcome::from_bool(world.add_inventory_task_path_to_giver(agent));
        }
        Destination::InventoryTaskReceiver => {
            return LeafOutcome::from_bool(world.add_inventory_task_path_to_receiver(agent));
        }
        Destination::Dwelling => world.dwelling_position(agent),
        Destination::WorkingPlace => world.working_place_position(agent),
    };
    match position {
        Some(pos) => {
            world.add_find_path_to_destination(agent, pos);
            LeafOutcome::Success
        }
        None => LeafOutcome::Fail,
    }
}
