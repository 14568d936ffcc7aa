use core::str::FromStr;

use embedded_can::{Frame, Id, StandardId};

use crate::error::ErrorCode;
use crate::prelude::*;

pub trait ParseRadix: FromStr {
    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::Err>
        where
            Self: Sized;
}

macro_rules! impl_parse_radix_for {
    ($t:ty) => {
        impl ParseRadix for $t {
            fn from_str_radix(s: &str, radix: u32) -> Result<Self, <Self as FromStr>::Err> {
                <$t>::from_str_radix(s, radix)
            }
        }
    };
}

impl_parse_radix_for!(u8);
impl_parse_radix_for!(u16);
impl_parse_radix_for!(u32);
impl_parse_radix_for!(u64);

/// Parses decimal or `0x` prefixed hex, as found in EDS-style files.
pub fn parse_number<T: ParseRadix>(s: &str) -> Option<T> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        T::from_str_radix(&s[2..], 16).ok()
    } else {
        s.parse().ok()
    }
}

pub fn get_cob_id<F: Frame>(frame: &F) -> Option<u16> {
    if let Id::Standard(sid) = frame.id() {
        return Some(sid.as_raw());
    }
    // No standard id. We only support CAN 2.0a in current version.
    None
}

pub fn flatten(slices: &[&[u8]]) -> Vec<u8> {
    slices
        .iter()
        .flat_map(|&slice| slice.iter().cloned())
        .take(8)
        .chain(core::iter::repeat(0).take(8))
        .take(8)
        .collect()
}

/// Builds the 8 data bytes of an SDO request: command, index (LE), sub-index, data.
pub fn sdo_payload(cmd: u8, index: u16, sub_index: u8, data: &[u8]) -> Vec<u8> {
    flatten(&[&[cmd], &index.to_le_bytes(), &[sub_index], data])
}

pub fn create_frame_with_padding<F: Frame + Debug>(cob_id: u16, data: &[u8])
    -> Result<F, ErrorCode> {
    let mut packet = Vec::from(&data[..data.len().min(8)]);
    packet.resize(8, 0);

    F::new(StandardId::new(cob_id).ok_or(ErrorCode::InvalidStandardId {cob_id})?,
           &packet).ok_or(ErrorCode::FrameCreationFailed {data: data.to_vec()})
}

pub fn create_frame<F: Frame + Debug>(cob_id: u16, data: &[u8]) -> Result<F, ErrorCode> {
    F::new(StandardId::new(cob_id).ok_or(ErrorCode::InvalidStandardId {cob_id})?, data)
        .ok_or(ErrorCode::FrameCreationFailed{data: data.to_vec()})
}

/// CANopen transfers numbers little-endian: `data[0]` is the least significant byte.
pub fn convert_bytes_to_u32(data: &[u8]) -> Option<u32> {
    let arr: [u8; 4] = data.try_into().ok()?;
    Some(u32::from_le_bytes(arr))
}
