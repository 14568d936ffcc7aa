use bitfield_struct::bitfield;

/// Represents the SDO (Service Data Object) Initiate command byte, shared by the
/// download initiate request and the upload initiate response.
/// The bitfield representation is based on an `u8` (8-bit unsigned integer), with the most significant bit (MSB) ordering.
#[bitfield(u8, order = Msb)]
pub struct SdoInitiateCmd {
    /// Command Specifier.
    /// `ccs = 1` for a download request, `scs = 2` for an upload response.
    #[bits(3)]
    pub cs: u8,

    /// Reserved bit.
    #[bits(1)]
    _reserved_0: u8,

    /// Number of data bytes that do not contain data, ranging from 0 to 3.
    /// For example, if `n` is 2, then the last 2 bytes of the 4-byte data field do not contain meaningful data.
    #[bits(2)]
    pub n: u8,

    /// Expedited Transfer flag.
    /// Indicates whether the SDO transfer is expedited (`true`) or segmented (`false`).
    #[bits(1)]
    pub e: bool,

    /// Size indicator.
    /// If set (`true`), indicates that the `n` field (or the size field for segmented
    /// transfers) is valid.
    #[bits(1)]
    pub s: bool,
}

impl SdoInitiateCmd {
    /// Number of meaningful bytes in an expedited transfer.
    pub fn expedited_len(&self) -> usize {
        if self.s() {
            4 - self.n() as usize
        } else {
            4
        }
    }
}

/// Represents the SDO (Service Data Object) Upload Segment command byte.
/// The bitfield representation is based on an `u8` (8-bit unsigned integer) with the most significant bit (MSB) ordering.
#[bitfield(u8, order = Msb)]
pub struct SdoSegmentCmd {
    /// Command Specifier.
    /// `ccs = 3` on the request, `scs = 0` on the response.
    #[bits(3)]
    pub cs: u8,

    /// Toggle bit.
    /// Alternates for each subsequent segment during a segmented SDO transfer.
    #[bits(1)]
    pub t: u8,

    /// Number of data bytes that do not contain data, ranging from 0 to 7 in case of segment commands.
    #[bits(3)]
    pub n: u8,

    /// No more segments indicator.
    /// If set (`true`), this is the last segment of the transfer.
    #[bits(1)]
    pub c: bool,
}
