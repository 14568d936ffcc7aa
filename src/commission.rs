//! Two-phase commissioning of a remote node.
//!
//! `scan` identifies the node and pushes its baseline communication
//! parameters, `connect` links its SDO client to the master and starts it.
//! Every SDO exchange blocks for at most the timeout given to the call, so a
//! whole procedure can block for the sum of its steps.

use crate::constant::{REG_DEVICE_TYPE, REG_IDENTITY, SUB_IDENTITY_VENDOR_ID};
use crate::error::{CommissionError, SdoError};
use crate::nmt::NmtCommand;
use crate::node::{is_valid_node_id, Node, NodeState};
use crate::prelude::*;
use crate::profile::{CommissionProfile, ConfigWrite};
use crate::transport::{NmtSender, SdoTransport};
use crate::util::convert_bytes_to_u32;
use crate::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: ConfigWrite,
    pub result: Result<(), SdoError>,
}

/// Outcome of every write attempted by one procedure, in the order they were sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteLog {
    outcomes: Vec<StepOutcome>,
}

impl WriteLog {
    fn record(&mut self, step: ConfigWrite, result: Result<(), SdoError>) {
        self.outcomes.push(StepOutcome { step, result });
    }

    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// True when every write was acknowledged.
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn first_failure(&self) -> Option<&StepOutcome> {
        self.failures().next()
    }

    /// Error of the final write, `None` if it went through. Earlier failures
    /// are not reflected here, use `first_failure` to catch those.
    pub fn last_error(&self) -> Option<SdoError> {
        self.outcomes.last().and_then(|o| o.result.err())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub node: Node,
    /// The baseline configuration writes.
    pub writes: WriteLog,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectReport {
    /// The SDO linkage writes.
    pub writes: WriteLog,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommissionReport {
    pub node: Node,
    pub scan: WriteLog,
    pub connect: WriteLog,
}

pub struct Commissioner<T: SdoTransport, N: NmtSender> {
    transport: T,
    nmt: N,
    profile: CommissionProfile,
}

impl<T: SdoTransport, N: NmtSender> Commissioner<T, N> {
    pub fn new(transport: T, nmt: N) -> Self {
        Self::with_profile(transport, nmt, CommissionProfile::default())
    }

    pub fn with_profile(transport: T, nmt: N, profile: CommissionProfile) -> Self {
        Commissioner { transport, nmt, profile }
    }

    pub fn profile(&self) -> &CommissionProfile {
        &self.profile
    }

    pub fn into_parts(self) -> (T, N) {
        (self.transport, self.nmt)
    }

    /// Identifies the node at `node_id` and pushes its baseline configuration.
    ///
    /// Identification failures return at once, before any write is sent.
    /// Configuration writes are best effort unless the profile is strict: their
    /// outcomes are in the returned `WriteLog`.
    pub fn scan(&mut self, node_id: u8, timeout: Duration) -> Result<ScanReport, CommissionError> {
        if !is_valid_node_id(node_id) {
            return Err(CommissionError::InvalidNodeId { node_id });
        }
        debug!("Scanning node {}", node_id);

        let device_type = self.read_identity(node_id, REG_DEVICE_TYPE, 0, timeout)?;
        let vendor_id = self.read_identity(node_id, REG_IDENTITY, SUB_IDENTITY_VENDOR_ID, timeout)?;
        let mut node = Node::identified(node_id, device_type, vendor_id);
        info!("Node {} identified: device type {:#010x}, vendor {:#010x}",
              node_id, device_type, vendor_id);

        let plan = self.profile.baseline_plan();
        let writes = self.run_plan(&node, &plan, timeout)?;
        node.advance(NodeState::Configured);
        Ok(ScanReport { node, writes })
    }

    /// Links the node's SDO client to the master and starts it.
    ///
    /// `node` must come out of a successful `scan`. The `Enter Operational`
    /// command is sent even if some linkage writes failed, unless the profile
    /// is strict.
    pub fn connect(&mut self, node: &mut Node, timeout: Duration) -> Result<ConnectReport, CommissionError> {
        let node_id = node.node_id();
        if !is_valid_node_id(node_id) {
            return Err(CommissionError::InvalidNodeId { node_id });
        }
        if node.state() < NodeState::Configured {
            warn!("Refusing to connect node {} in state {:?}", node_id, node.state());
            return Err(CommissionError::NotIdentified { node_id });
        }

        let plan = self.profile.link_plan();
        let writes = self.run_plan(node, &plan, timeout)?;
        node.advance(NodeState::Linked);

        self.nmt.send_nmt_command(NmtCommand::EnterOperational, node_id);
        node.advance(NodeState::Operational);
        info!("Node {} is operational ({} of {} linkage writes failed)",
              node_id, writes.failure_count(), writes.len());
        Ok(ConnectReport { writes })
    }

    /// `scan` followed by `connect`, with the profile's timeout.
    pub fn commission(&mut self, node_id: u8) -> Result<CommissionReport, CommissionError> {
        let timeout = self.profile.timeout;
        let ScanReport { mut node, writes: scan } = self.scan(node_id, timeout)?;
        let ConnectReport { writes: connect } = self.connect(&mut node, timeout)?;
        Ok(CommissionReport { node, scan, connect })
    }

    /// Scans every address in `node_ids` and keeps the nodes that answered.
    pub fn discover<I: IntoIterator<Item = u8>>(&mut self, node_ids: I) -> Vec<Node> {
        let timeout = self.profile.timeout;
        let mut nodes = Vec::new();
        for node_id in node_ids {
            match self.scan(node_id, timeout) {
                Ok(report) => nodes.push(report.node),
                Err(err) => {
                    debug!("Skipping node {}: {}", node_id, err);
                }
            }
        }
        nodes
    }

    fn read_identity(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<u32, CommissionError> {
        match self.transport.sdo_read(node_id, index, sub_index, timeout) {
            Ok(data) => convert_bytes_to_u32(&data).ok_or_else(|| {
                warn!("Node {}: {:#06x}:{:02x} returned {} bytes", node_id, index, sub_index, data.len());
                CommissionError::NodeTypeUnreadable { node_id, index, sub_index, len: data.len() }
            }),
            Err(err) if err.is_timeout() => {
                warn!("Node {}: no answer on {:#06x}:{:02x}", node_id, index, sub_index);
                Err(CommissionError::NodeTimeout { node_id })
            }
            Err(err) => {
                warn!("Node {}: {:#06x}:{:02x} failed: {}", node_id, index, sub_index, err);
                Err(CommissionError::NodeUnavailable { node_id, cause: err })
            }
        }
    }

    fn run_plan(&mut self, node: &Node, plan: &[ConfigWrite], timeout: Duration)
        -> Result<WriteLog, CommissionError> {
        let node_id = node.node_id();
        let mut log = WriteLog::default();
        for step in plan {
            debug!("Node {}: writing {} to {:#06x}:{:02x} ({:x?})",
                   node_id, step.name, step.index, step.sub_index, step.payload);
            let result = self.transport.sdo_write(node_id, step.index, step.sub_index, &step.payload, timeout);
            log.record(step.clone(), result);
            if let Err(cause) = result {
                warn!("Node {}: {} ({:#06x}:{:02x}) failed: {}",
                      node_id, step.name, step.index, step.sub_index, cause);
                if self.profile.strict_writes {
                    return Err(CommissionError::ConfigurationFailed {
                        node: node.clone(), step: step.name, cause, writes: log,
                    });
                }
            }
        }
        Ok(log)
    }
}
