use crate::constant::NODE_ID_RANGE;

/// How far a remote node has come through commissioning. The order of the
/// variants is the order of the procedure; a node never moves backwards.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default)]
pub enum NodeState {
    #[default]
    Unknown,
    /// Device type and vendor id were read.
    Identified,
    /// Baseline communication parameters were pushed.
    Configured,
    /// SDO client/server COB-IDs were set.
    Linked,
    /// `Enter Operational` was sent.
    Operational,
}

/// Identity of one remote device under commissioning.
///
/// Only `Commissioner::scan` hands out nodes past `Unknown`, so the identity
/// fields are meaningful whenever `state() >= NodeState::Identified`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Node {
    pub(crate) node_id: u8,
    pub(crate) device_type: u32,
    pub(crate) vendor_id: u32,
    pub(crate) state: NodeState,
}

impl Node {
    /// A node that has not been scanned yet.
    pub fn new(node_id: u8) -> Self {
        Node { node_id, device_type: 0, vendor_id: 0, state: NodeState::Unknown }
    }

    pub(crate) fn identified(node_id: u8, device_type: u32, vendor_id: u32) -> Self {
        Node { node_id, device_type, vendor_id, state: NodeState::Identified }
    }

    pub fn node_id(&self) -> u8 {
        self.node_id
    }

    pub fn device_type(&self) -> u32 {
        self.device_type
    }

    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn is_identified(&self) -> bool {
        self.state >= NodeState::Identified
    }

    /// Moves forward to `state`; requests to go back are ignored.
    pub(crate) fn advance(&mut self, state: NodeState) {
        if state > self.state {
            self.state = state;
        }
    }
}

pub fn is_valid_node_id(node_id: u8) -> bool {
    NODE_ID_RANGE.contains(&node_id)
}
