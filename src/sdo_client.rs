//! A blocking SDO client and NMT master on top of a non-blocking CAN driver.
//!
//! Only the transfers commissioning needs are supported: expedited and
//! segmented uploads, expedited downloads (1 to 4 bytes).

use embedded_can::nb::Can;
use embedded_can::Frame;

use crate::clock::Clock;
use crate::cmd_header::{SdoInitiateCmd, SdoSegmentCmd};
use crate::constant::*;
use crate::error::{AbortCode, SdoError, TransportError};
use crate::nmt::NmtCommand;
use crate::prelude::*;
use crate::transport::{NmtSender, SdoTransport};
use crate::util::{convert_bytes_to_u32, create_frame, create_frame_with_padding, get_cob_id, sdo_payload};
use crate::{debug, error, warn};

pub struct CanSdoClient<CAN, CLK> where CAN: Can, CAN::Frame: Frame + Debug, CLK: Clock {
    can_network: CAN,
    clock: CLK,
}

impl<CAN, CLK> CanSdoClient<CAN, CLK> where CAN: Can, CAN::Frame: Frame + Debug, CLK: Clock {
    pub fn new(can_network: CAN, clock: CLK) -> Self {
        CanSdoClient { can_network, clock }
    }

    pub fn can_network(&mut self) -> &mut CAN {
        &mut self.can_network
    }

    fn transmit(&mut self, frame: &CAN::Frame) -> Result<(), TransportError> {
        match nb::block!(self.can_network.transmit(frame)) {
            Ok(_) => {
                debug!("sent a frame: {:?}", frame);
                Ok(())
            }
            Err(err) => {
                error!("Errors in transmitting CAN frame {:?}, err: {:?}", frame, err);
                Err(TransportError::Transmit)
            }
        }
    }

    fn send_request(&mut self, node_id: u8, data: &[u8]) -> Result<(), TransportError> {
        let frame = create_frame_with_padding(COB_FUNC_RECEIVE_SDO | node_id as u16, data)
            .map_err(|ec| {
                error!("Errors in creating SDO CAN frame: {:x?}, error_code = {:?}", data, ec);
                TransportError::FrameCreationFailed
            })?;
        self.transmit(&frame)
    }

    fn send_abort(&mut self, node_id: u8, index: u16, sub_index: u8, code: u32) {
        let data = sdo_payload(CS_ABORT << 5, index, sub_index, &code.to_le_bytes());
        if let Err(err) = self.send_request(node_id, &data) {
            warn!("Failed to abort SDO transfer on node {}: {}", node_id, err);
        }
    }

    /// Waits for the next SDO response from `node_id`. Frames for other
    /// objects are dropped. On timeout the transfer is aborted towards the server.
    /// A timeout too large to fit the clock waits without a deadline.
    fn receive_response(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<Vec<u8>, SdoError> {
        let deadline = self.clock.now().checked_add(timeout);
        let response_cob_id = COB_FUNC_TRANSMIT_SDO | node_id as u16;
        loop {
            match self.can_network.receive() {
                Ok(frame) => {
                    if get_cob_id(&frame) == Some(response_cob_id) {
                        debug!("got frame: {:?}", frame);
                        return parse_response(frame.data());
                    }
                }
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(err)) => {
                    error!("Errors in reading CAN frame, {:?}", err);
                    return Err(TransportError::Receive.into());
                }
            }
            if deadline.is_some_and(|deadline| self.clock.now() >= deadline) {
                warn!("SDO {:#06x}:{:02x} on node {} timed out", index, sub_index, node_id);
                self.send_abort(node_id, index, sub_index, ABORT_SDO_TIMEOUT);
                return Err(SdoError::Abort(ABORT_SDO_TIMEOUT));
            }
        }
    }

    fn upload_segments(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<Vec<u8>, SdoError> {
        let mut data = Vec::new();
        let mut toggle = 0u8;
        loop {
            let req: u8 = SdoSegmentCmd::new().with_cs(CCS_UPLOAD_SEGMENT).with_t(toggle).into();
            self.send_request(node_id, &[req])?;
            let resp = self.receive_response(node_id, index, sub_index, timeout)?;
            let cmd = SdoSegmentCmd::from(resp[0]);
            if cmd.cs() != SCS_UPLOAD_SEGMENT {
                return Err(TransportError::UnexpectedResponse { cmd: resp[0] }.into());
            }
            if cmd.t() != toggle {
                let code = AbortCode::ToggleBitNotAlternated.code();
                self.send_abort(node_id, index, sub_index, code);
                return Err(SdoError::Abort(code));
            }
            let len = 7 - cmd.n() as usize;
            data.extend_from_slice(&resp[1..1 + len]);
            if cmd.c() {
                return Ok(data);
            }
            toggle ^= 1;
        }
    }
}

/// Splits a raw response into either its 8 data bytes or the abort it carries.
fn parse_response(data: &[u8]) -> Result<Vec<u8>, SdoError> {
    if data.len() != 8 {
        let cmd = data.first().copied().unwrap_or_default();
        return Err(TransportError::UnexpectedResponse { cmd }.into());
    }
    if data[0] >> 5 == CS_ABORT {
        let code = convert_bytes_to_u32(&data[4..8]).unwrap_or(AbortCode::GeneralError.code());
        return Err(SdoError::Abort(code));
    }
    Ok(data.to_vec())
}

fn check_mux(resp: &[u8], index: u16, sub_index: u8) -> Result<(), SdoError> {
    if u16::from_le_bytes([resp[1], resp[2]]) != index || resp[3] != sub_index {
        return Err(TransportError::UnexpectedResponse { cmd: resp[0] }.into());
    }
    Ok(())
}

impl<CAN, CLK> SdoTransport for CanSdoClient<CAN, CLK>
    where CAN: Can, CAN::Frame: Frame + Debug, CLK: Clock {
    fn sdo_read(&mut self, node_id: u8, index: u16, sub_index: u8, timeout: Duration)
        -> Result<Vec<u8>, SdoError> {
        let req: u8 = SdoInitiateCmd::new().with_cs(CCS_UPLOAD_INITIATE).into();
        self.send_request(node_id, &sdo_payload(req, index, sub_index, &[]))?;
        let resp = self.receive_response(node_id, index, sub_index, timeout)?;

        let cmd = SdoInitiateCmd::from(resp[0]);
        if cmd.cs() != SCS_UPLOAD_INITIATE {
            return Err(TransportError::UnexpectedResponse { cmd: resp[0] }.into());
        }
        check_mux(&resp, index, sub_index)?;
        if cmd.e() {
            return Ok(resp[4..4 + cmd.expedited_len()].to_vec());
        }

        let data = self.upload_segments(node_id, index, sub_index, timeout)?;
        if cmd.s() {
            let size = convert_bytes_to_u32(&resp[4..8]).unwrap_or_default();
            if size as usize != data.len() {
                warn!("Node {} announced {} bytes for {:#06x}:{:02x} but sent {}",
                      node_id, size, index, sub_index, data.len());
            }
        }
        Ok(data)
    }

    fn sdo_write(&mut self, node_id: u8, index: u16, sub_index: u8, payload: &[u8], timeout: Duration)
        -> Result<(), SdoError> {
        if payload.is_empty() || payload.len() > 4 {
            return Err(TransportError::InvalidPayloadLength { len: payload.len() }.into());
        }
        let req: u8 = SdoInitiateCmd::new()
            .with_cs(CCS_DOWNLOAD_INITIATE)
            .with_n((4 - payload.len()) as u8)
            .with_e(true)
            .with_s(true)
            .into();
        self.send_request(node_id, &sdo_payload(req, index, sub_index, payload))?;
        let resp = self.receive_response(node_id, index, sub_index, timeout)?;

        if resp[0] >> 5 != SCS_DOWNLOAD_INITIATE {
            return Err(TransportError::UnexpectedResponse { cmd: resp[0] }.into());
        }
        check_mux(&resp, index, sub_index)
    }
}

impl<CAN, CLK> NmtSender for CanSdoClient<CAN, CLK>
    where CAN: Can, CAN::Frame: Frame + Debug, CLK: Clock {
    fn send_nmt_command(&mut self, command: NmtCommand, node_id: u8) {
        let frame = match create_frame::<CAN::Frame>(COB_FUNC_NMT, &[command.code(), node_id]) {
            Ok(frame) => frame,
            Err(ec) => {
                error!("Errors in creating NMT frame for node {}: {:?}", node_id, ec);
                return;
            }
        };
        if self.transmit(&frame).is_err() {
            error!("NMT {:?} to node {} was not sent", command, node_id);
        }
    }
}
