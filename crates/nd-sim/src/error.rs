use nd_behavior::BehaviorError;
use nd_colony::ColonyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("behavior tree error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("colony error: {0}")]
    Colony(#[from] ColonyError),
}

pub type SimResult<T> = Result<T, SimError>;
