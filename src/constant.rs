use core::ops::RangeInclusive;

/// Canopen Function code prefixes on COB_ID
pub(crate) const COB_FUNC_NMT: u16 = 0x000;
pub(crate) const COB_FUNC_TRANSMIT_SDO: u16 = 0x580;
pub(crate) const COB_FUNC_RECEIVE_SDO: u16 = 0x600;

/// Valid addresses for a remote node.
pub const NODE_ID_RANGE: RangeInclusive<u8> = 1..=127;

/// CANOPEN Registers
pub const REG_DEVICE_TYPE: u16 = 0x1000;
pub const REG_PRODUCER_HEARTBEAT_TIME: u16 = 0x1017;
pub const REG_IDENTITY: u16 = 0x1018;
pub const REG_SDO_CLIENT_PARAMETER_2: u16 = 0x1281;

pub const SUB_IDENTITY_VENDOR_ID: u8 = 0x01;

/// Manufacturer specific registers describing how the drive talks to its master.
/// Overridable through `CommissionProfile`.
pub const REG_REMOTE_NODE_TYPE: u16 = 0x4000;
pub const REG_REMOTE_NODE_SERVER_SDO: u16 = 0x4001;
pub const REG_REMOTE_NODE_CLIENT_SDO: u16 = 0x4002;
pub const REG_REMOTE_NODE_TXPDO_1: u16 = 0x4003;
pub const REG_REMOTE_NODE_RXPDO_1: u16 = 0x4004;

/// Baseline values pushed during scan.
pub const DEFAULT_HEARTBEAT_TIME: u16 = 0x0400;
pub const NODE_TYPE_MASTER: u8 = 0x25;
pub const PDO_ENABLE: u8 = 0x01;

/// SDO linkage pushed during connect.
pub const DEFAULT_MASTER_NODE_ID: u8 = 0x01;
pub const DEFAULT_REQUEST_COB_ID: u32 = 0x501;
pub const DEFAULT_RESPONSE_COB_ID: u32 = 0x481;
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Abort codes reported when a node did not answer in time. The first one is
/// what some SDO engines report instead of the standard value.
pub const ABORT_LEGACY_TIMEOUT: u32 = 0x0000_0405;
pub const ABORT_SDO_TIMEOUT: u32 = 0x0504_0000;

/// SDO command specifiers
pub(crate) const CCS_DOWNLOAD_INITIATE: u8 = 1;
pub(crate) const CCS_UPLOAD_INITIATE: u8 = 2;
pub(crate) const CCS_UPLOAD_SEGMENT: u8 = 3;
pub(crate) const CS_ABORT: u8 = 4;
pub(crate) const SCS_UPLOAD_SEGMENT: u8 = 0;
pub(crate) const SCS_UPLOAD_INITIATE: u8 = 2;
pub(crate) const SCS_DOWNLOAD_INITIATE: u8 = 3;
