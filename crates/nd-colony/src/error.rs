use nd_core::{AgentId, BuildingId};
use nd_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColonyError {
    #[error("dwarf {0} is not alive")]
    DeadDwarf(AgentId),

    #[error("building {0} does not exist")]
    UnknownBuilding(BuildingId),

    #[error("inventory task from {0} to itself")]
    SelfDelivery(BuildingId),

    #[error("navigation error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type ColonyResult<T> = Result<T, ColonyError>;
