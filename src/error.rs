use core::fmt::Formatter;

use crate::commission::WriteLog;
use crate::constant::{ABORT_LEGACY_TIMEOUT, ABORT_SDO_TIMEOUT};
use crate::node::Node;
use crate::prelude::*;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ErrorCode {
    InvalidStandardId { cob_id: u16 },
    FrameCreationFailed { data: Vec<u8> },
    ProcesedSectionFailed { section_name: String, more_info: String },
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidStandardId { cob_id } => write!(f, "Invalid Standard ID: {:#x}", cob_id),
            ErrorCode::FrameCreationFailed { data } => write!(f, "Frame creation failed, data: {:x?}", data),
            ErrorCode::ProcesedSectionFailed { section_name, more_info } =>
                write!(f, "Processed section failed, section_name: {:?}, more info: {:?}",
                       section_name, more_info),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AbortCode {
    ToggleBitNotAlternated,
    SdoProtocolTimedOut,
    CommandSpecifierNotValidOrUnknown,
    OutOfMemory,
    UnsupportedAccessToObject,
    AttemptToReadWriteOnlyObject,
    AttemptToWriteReadOnlyObject,
    ObjectDoesNotExistInObjectDictionary,
    GeneralParameterIncompatibility,
    GeneralInternalIncompatibility,
    HardwareError,
    DataTypeMismatchLengthMismatch,
    DataTypeMismatchLengthTooHigh,
    DataTypeMismatchLengthTooLow,
    SubIndexDoesNotExist,
    ValueRangeExceeded,
    GeneralError,
    DataTransferOrStoreFailed,
    DataTransferOrStoreFailedDueToDeviceState,
}

const ABORT_CODES: &[(AbortCode, u32, &str)] = &[
    (AbortCode::ToggleBitNotAlternated, 0x0503_0000, "Toggle bit not alternated"),
    (AbortCode::SdoProtocolTimedOut, 0x0504_0000, "SDO protocol timed out"),
    (AbortCode::CommandSpecifierNotValidOrUnknown, 0x0504_0001, "Client/server command specifier not valid or unknown"),
    (AbortCode::OutOfMemory, 0x0504_0005, "Out of memory"),
    (AbortCode::UnsupportedAccessToObject, 0x0601_0000, "Unsupported access to an object"),
    (AbortCode::AttemptToReadWriteOnlyObject, 0x0601_0001, "Attempt to read a write only object"),
    (AbortCode::AttemptToWriteReadOnlyObject, 0x0601_0002, "Attempt to write a read only object"),
    (AbortCode::ObjectDoesNotExistInObjectDictionary, 0x0602_0000, "Object does not exist in the object dictionary"),
    (AbortCode::GeneralParameterIncompatibility, 0x0604_0043, "General parameter incompatibility reason"),
    (AbortCode::GeneralInternalIncompatibility, 0x0604_0047, "General internal incompatibility in the device"),
    (AbortCode::HardwareError, 0x0606_0000, "Access failed due to a hardware error"),
    (AbortCode::DataTypeMismatchLengthMismatch, 0x0607_0010, "Data type does not match; length of service parameter does not match"),
    (AbortCode::DataTypeMismatchLengthTooHigh, 0x0607_0012, "Data type does not match; length of service parameter too high"),
    (AbortCode::DataTypeMismatchLengthTooLow, 0x0607_0013, "Data type does not match; length of service parameter too low"),
    (AbortCode::SubIndexDoesNotExist, 0x0609_0011, "Sub-index does not exist"),
    (AbortCode::ValueRangeExceeded, 0x0609_0030, "Value range of parameter exceeded (only for write access)"),
    (AbortCode::GeneralError, 0x0800_0000, "General error"),
    (AbortCode::DataTransferOrStoreFailed, 0x0800_0020, "Data cannot be transferred or stored to the application"),
    (AbortCode::DataTransferOrStoreFailedDueToDeviceState, 0x0800_0022,
     "Data cannot be transferred or stored to the application because of the present device state"),
];

impl AbortCode {
    fn entry(&self) -> &'static (AbortCode, u32, &'static str) {
        // Every variant has a row in ABORT_CODES.
        ABORT_CODES.iter().find(|(ac, _, _)| ac == self).unwrap_or(&ABORT_CODES[0])
    }

    pub fn code(&self) -> u32 {
        self.entry().1
    }

    pub fn description(&self) -> &'static str {
        self.entry().2
    }

    pub fn from_code(code: u32) -> Option<Self> {
        ABORT_CODES.iter().find(|(_, c, _)| *c == code).map(|(ac, _, _)| *ac)
    }
}

/// Human readable text for a raw abort code, for log lines.
pub fn describe_abort(code: u32) -> &'static str {
    match code {
        ABORT_LEGACY_TIMEOUT => "Node did not respond in time",
        _ => AbortCode::from_code(code).map_or("Unknown abort code", |ac| ac.description()),
    }
}

/// Failures below the SDO protocol: the bus, the driver or a malformed reply.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TransportError {
    FrameCreationFailed,
    Transmit,
    Receive,
    InvalidPayloadLength { len: usize },
    UnexpectedResponse { cmd: u8 },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::FrameCreationFailed => write!(f, "failed to build CAN frame"),
            TransportError::Transmit => write!(f, "failed to transmit CAN frame"),
            TransportError::Receive => write!(f, "failed to receive CAN frame"),
            TransportError::InvalidPayloadLength { len } =>
                write!(f, "payload of {} bytes does not fit an expedited transfer (1..=4)", len),
            TransportError::UnexpectedResponse { cmd } =>
                write!(f, "unexpected SDO response command {:#04x}", cmd),
        }
    }
}

/// Outcome of one failed SDO exchange.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SdoError {
    /// The server (or the local engine) aborted with a non-zero code.
    Abort(u32),
    Transport(TransportError),
}

impl SdoError {
    pub fn abort_code(&self) -> Option<u32> {
        match *self {
            SdoError::Abort(code) => Some(code),
            SdoError::Transport(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.abort_code(), Some(ABORT_LEGACY_TIMEOUT) | Some(ABORT_SDO_TIMEOUT))
    }
}

impl From<TransportError> for SdoError {
    fn from(err: TransportError) -> Self {
        SdoError::Transport(err)
    }
}

impl fmt::Display for SdoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SdoError::Abort(code) => write!(f, "abort {:#010x} ({})", code, describe_abort(*code)),
            SdoError::Transport(err) => write!(f, "transport error: {}", err),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CommissionError {
    /// The node did not answer an identification read in time.
    NodeTimeout { node_id: u8 },
    /// An identification read returned the wrong number of bytes.
    NodeTypeUnreadable { node_id: u8, index: u16, sub_index: u8, len: usize },
    NodeUnavailable { node_id: u8, cause: SdoError },
    InvalidNodeId { node_id: u8 },
    /// `connect` was called before `scan` finished for this node.
    NotIdentified { node_id: u8 },
    /// Only returned in strict mode. `node` is left in the last state it
    /// reached and `writes` ends with the failed step.
    ConfigurationFailed { node: Node, step: &'static str, cause: SdoError, writes: WriteLog },
}

impl CommissionError {
    pub fn node_id(&self) -> u8 {
        match self {
            CommissionError::NodeTimeout { node_id }
            | CommissionError::NodeTypeUnreadable { node_id, .. }
            | CommissionError::NodeUnavailable { node_id, .. }
            | CommissionError::InvalidNodeId { node_id }
            | CommissionError::NotIdentified { node_id } => *node_id,
            CommissionError::ConfigurationFailed { node, .. } => node.node_id(),
        }
    }
}

impl fmt::Display for CommissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CommissionError::NodeTimeout { node_id } =>
                write!(f, "node {} did not respond in time", node_id),
            CommissionError::NodeTypeUnreadable { node_id, index, sub_index, len } =>
                write!(f, "node {}: {:#06x}:{:02x} returned {} bytes, expected 4",
                       node_id, index, sub_index, len),
            CommissionError::NodeUnavailable { node_id, cause } =>
                write!(f, "node {} unavailable: {}", node_id, cause),
            CommissionError::InvalidNodeId { node_id } =>
                write!(f, "node id {} is outside 1..=127", node_id),
            CommissionError::NotIdentified { node_id } =>
                write!(f, "node {} has not been scanned", node_id),
            CommissionError::ConfigurationFailed { node, step, cause, .. } =>
                write!(f, "node {}: step '{}' failed: {}", node.node_id(), step, cause),
        }
    }
}
