/// NMT command specifiers sent by the master on COB-ID 0x000.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NmtCommand {
    EnterOperational,
    Stop,
    EnterPreOperational,
    ResetNode,
    ResetCommunication,
}

impl NmtCommand {
    pub fn code(&self) -> u8 {
        match *self {
            NmtCommand::EnterOperational => 0x01,
            NmtCommand::Stop => 0x02,
            NmtCommand::EnterPreOperational => 0x80,
            NmtCommand::ResetNode => 0x81,
            NmtCommand::ResetCommunication => 0x82,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(NmtCommand::EnterOperational),
            0x02 => Some(NmtCommand::Stop),
            0x80 => Some(NmtCommand::EnterPreOperational),
            0x81 => Some(NmtCommand::ResetNode),
            0x82 => Some(NmtCommand::ResetCommunication),
            _ => None,
        }
    }
}

#[cfg(test)]
mod nmt_tests {
    use super::NmtCommand;

    #[test]
    fn test_codes_round_trip() {
        for cmd in [NmtCommand::EnterOperational, NmtCommand::Stop, NmtCommand::EnterPreOperational,
                    NmtCommand::ResetNode, NmtCommand::ResetCommunication] {
            assert_eq!(NmtCommand::from_code(cmd.code()), Some(cmd));
        }
        assert_eq!(NmtCommand::EnterOperational.code(), 0x01);
        assert_eq!(NmtCommand::from_code(0x03), None);
    }
}
