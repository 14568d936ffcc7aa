use std::cell::Cell;
use std::collections::VecDeque;
use std::time::Duration;

use canopen_commission::clock::Clock;
use embedded_can::{ErrorKind, Frame, Id, StandardId};

#[derive(Clone, PartialEq, Eq)]
pub struct MockFrame {
    id: Id,
    data: Vec<u8>,
}

impl MockFrame {
    pub fn raw_id(&self) -> u16 {
        match self.id {
            Id::Standard(sid) => sid.as_raw(),
            Id::Extended(_) => panic!("extended ids are not used in these tests"),
        }
    }
}

impl Frame for MockFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        Some(MockFrame { id: id.into(), data: data.to_vec() })
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.data.len()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for MockFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03X} {:02x?}", self.raw_id(), self.data)
    }
}

pub fn genf(cob_id: u16, data: &[u8]) -> MockFrame {
    MockFrame::new(StandardId::new(cob_id).expect("valid standard id"), data).expect("valid frame")
}

#[derive(Debug)]
pub struct MockError;

impl embedded_can::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Records every transmitted frame and hands out queued frames on receive.
/// An empty queue reads as `WouldBlock`.
#[derive(Default)]
pub struct MockCan {
    pub sent: Vec<MockFrame>,
    pub incoming: VecDeque<MockFrame>,
    pub broken_receive: bool,
}

impl MockCan {
    pub fn with_responses(responses: Vec<MockFrame>) -> Self {
        MockCan { incoming: responses.into(), ..Default::default() }
    }
}

impl embedded_can::nb::Can for MockCan {
    type Frame = MockFrame;
    type Error = MockError;

    fn transmit(&mut self, frame: &Self::Frame) -> nb::Result<Option<Self::Frame>, Self::Error> {
        self.sent.push(frame.clone());
        Ok(None)
    }

    fn receive(&mut self) -> nb::Result<Self::Frame, Self::Error> {
        if self.broken_receive {
            return Err(nb::Error::Other(MockError));
        }
        self.incoming.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

/// Moves forward by `step` every time it is read.
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        ManualClock { now: Cell::new(Duration::ZERO), step }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
