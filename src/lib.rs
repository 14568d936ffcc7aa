//! Commissioning of remote CANopen nodes: identify a node over SDO, push its
//! baseline communication parameters, link its SDO client to the master and
//! start it with NMT.

#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]

extern crate alloc;

pub mod clock;
pub mod cmd_header;
pub mod commission;
pub mod constant;
pub mod error;
pub mod nmt;
pub mod node;
pub mod profile;
pub mod sdo_client;
pub mod transport;
pub mod util;

mod prelude;

pub use commission::{CommissionReport, Commissioner, ConnectReport, ScanReport, StepOutcome, WriteLog};
pub use error::{CommissionError, SdoError, TransportError};
pub use nmt::NmtCommand;
pub use node::{Node, NodeState};
pub use profile::{CommissionProfile, ConfigWrite};
pub use transport::{NmtSender, SdoTransport};
