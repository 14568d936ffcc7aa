use std::collections::HashMap;
use std::time::Duration;

use canopen_commission::constant::{ABORT_LEGACY_TIMEOUT, REG_DEVICE_TYPE, REG_IDENTITY};
use canopen_commission::{NmtCommand, NmtSender, SdoError, SdoTransport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Read { node_id: u8, index: u16, sub_index: u8 },
    Write { node_id: u8, index: u16, sub_index: u8, payload: Vec<u8> },
}

/// An SDO server answering from a fixed table. Requests for any other node id
/// time out the way a missing device does.
pub struct SimDevice {
    pub node_id: u8,
    reads: HashMap<(u16, u8), Result<Vec<u8>, SdoError>>,
    failing_writes: HashMap<(u16, u8), SdoError>,
    pub calls: Vec<Call>,
}

impl SimDevice {
    pub fn new(node_id: u8, device_type: u32, vendor_id: u32) -> Self {
        SimDevice {
            node_id,
            reads: HashMap::new(),
            failing_writes: HashMap::new(),
            calls: Vec::new(),
        }
        .with_read(REG_DEVICE_TYPE, 0, Ok(device_type.to_le_bytes().to_vec()))
        .with_read(REG_IDENTITY, 1, Ok(vendor_id.to_le_bytes().to_vec()))
    }

    pub fn with_read(mut self, index: u16, sub_index: u8, result: Result<Vec<u8>, SdoError>) -> Self {
        self.reads.insert((index, sub_index), result);
        self
    }

    pub fn failing_write(mut self, index: u16, sub_index: u8, err: SdoError) -> Self {
        self.failing_writes.insert((index, sub_index), err);
        self
    }

    pub fn read_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Read { .. })).count()
    }

    pub fn writes(&self) -> Vec<(u16, u8, Vec<u8>)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Write { index, sub_index, payload, .. } => Some((*index, *sub_index, payload.clone())),
                Call::Read { .. } => None,
            })
            .collect()
    }
}

impl SdoTransport for SimDevice {
    fn sdo_read(&mut self, node_id: u8, index: u16, sub_index: u8, _timeout: Duration)
        -> Result<Vec<u8>, SdoError> {
        self.calls.push(Call::Read { node_id, index, sub_index });
        if node_id != self.node_id {
            return Err(SdoError::Abort(ABORT_LEGACY_TIMEOUT));
        }
        self.reads
            .get(&(index, sub_index))
            .cloned()
            .unwrap_or(Err(SdoError::Abort(0x0602_0000)))
    }

    fn sdo_write(&mut self, node_id: u8, index: u16, sub_index: u8, payload: &[u8], _timeout: Duration)
        -> Result<(), SdoError> {
        self.calls.push(Call::Write { node_id, index, sub_index, payload: payload.to_vec() });
        if node_id != self.node_id {
            return Err(SdoError::Abort(ABORT_LEGACY_TIMEOUT));
        }
        match self.failing_writes.get(&(index, sub_index)) {
            Some(err) => Err(*err),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct NmtLog {
    pub commands: Vec<(NmtCommand, u8)>,
}

impl NmtSender for NmtLog {
    fn send_nmt_command(&mut self, command: NmtCommand, node_id: u8) {
        self.commands.push((command, node_id));
    }
}
