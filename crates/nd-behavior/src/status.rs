//! Per-agent control values.

/// Outcome of a node, as seen by its parent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Success,
    Fail,
    /// Still working; also the value carried while descending.
    #[default]
    Running,
}

impl NodeStatus {
    #[inline]
    pub fn from_bool(ok: bool) -> Self {
        if ok { NodeStatus::Success } else { NodeStatus::Fail }
    }

    /// Success ↔ Fail; Running is unchanged.
    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            NodeStatus::Success => NodeStatus::Fail,
            NodeStatus::Fail => NodeStatus::Success,
            NodeStatus::Running => NodeStatus::Running,
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NodeStatus::Success => "success",
            NodeStatus::Fail    => "fail",
            NodeStatus::Running => "running",
        })
    }
}

/// Direction control last moved in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Entered from the parent; the node starts fresh.
    #[default]
    Down,
    /// Returned from a child; `previous_status` holds the child's outcome.
    Up,
}
