//! The services commissioning is built on. Anything that can run a blocking
//! SDO exchange and send NMT commands can drive a `Commissioner`.

use core::cell::RefCell;

use crate::error::SdoError;
use crate::nmt::NmtCommand;
use crate::prelude::*;

pub trait SdoTransport {
    /// Uploads `index:sub_index` from `node_id`. Blocks until the server answers
    /// or `timeout` runs out. The returned buffer holds exactly the bytes sent
    /// by the server.
    fn sdo_read(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<Vec<u8>, SdoError>;

    /// Downloads `payload` into `index:sub_index` of `node_id`.
    fn sdo_write(&mut self, node_id: u8, index: u16, sub_index: u8, payload: &[u8], timeout: Duration)
        -> Result<(), SdoError>;
}

pub trait NmtSender {
    /// Fire and forget, the node does not acknowledge NMT commands.
    fn send_nmt_command(&mut self, command: NmtCommand, node_id: u8);
}

impl<T: SdoTransport + ?Sized> SdoTransport for &mut T {
    fn sdo_read(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<Vec<u8>, SdoError> {
        (**self).sdo_read(node_id, index, sub_index, timeout)
    }

    fn sdo_write(&mut self, node_id: u8, index: u16, sub_index: u8, payload: &[u8], timeout: Duration)
        -> Result<(), SdoError> {
        (**self).sdo_write(node_id, index, sub_index, payload, timeout)
    }
}

impl<N: NmtSender + ?Sized> NmtSender for &mut N {
    fn send_nmt_command(&mut self, command: NmtCommand, node_id: u8) {
        (**self).send_nmt_command(command, node_id)
    }
}

/// Lets one bus object act as both collaborators:
/// `Commissioner::new(&bus, &bus)` with `bus: RefCell<CanSdoClient<..>>`.
impl<T: SdoTransport + ?Sized> SdoTransport for &RefCell<T> {
    fn sdo_read(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<Vec<u8>, SdoError> {
        self.borrow_mut().sdo_read(node_id, index, sub_index, timeout)
    }

    fn sdo_write(&mut self, node_id: u8, index: u16, sub_index: u8, payload: &[u8], timeout: Duration)
        -> Result<(), SdoError> {
        self.borrow_mut().sdo_write(node_id, index, sub_index, payload, timeout)
    }
}

impl<N: NmtSender + ?Sized> NmtSender for &RefCell<N> {
    fn send_nmt_command(&mut self, command: NmtCommand, node_id: u8) {
        self.borrow_mut().send_nmt_command(command, node_id)
    }
}
