//! Mock I²C bus shared by the driver and processor tests.

use embedded_hal::i2c::{self, ErrorType, I2c, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address)
    }
}

/// One recorded write: device address and up to two payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Write {
    pub addr: u8,
    pub bytes: [u8; 2],
    pub len: usize,
}

impl Write {
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

const LOG_SIZE: usize = 512;

/// Records every write in order. With `failing` set, every transaction
/// returns [`MockError`] and nothing is logged.
pub struct MockI2c {
    log: [Write; LOG_SIZE],
    count: usize,
    pub failing: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            log: [Write::default(); LOG_SIZE],
            count: 0,
            failing: false,
        }
    }

    pub fn writes(&self) -> &[Write] {
        &self.log[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Value of the last `[reg, value]` write to `addr`.
    pub fn last_reg(&self, addr: u8, reg: u8) -> Option<u8> {
        self.writes()
            .iter()
            .rev()
            .find(|w| w.addr == addr && w.len == 2 && w.bytes[0] == reg)
            .map(|w| w.bytes[1])
    }

    /// Last single-byte command to `addr` whose high nibble is `prefix`.
    pub fn last_cmd(&self, addr: u8, prefix: u8) -> Option<u8> {
        self.writes()
            .iter()
            .rev()
            .find(|w| w.addr == addr && w.len == 1 && w.bytes[0] & 0xF0 == prefix)
            .map(|w| w.bytes[0])
    }

    fn record(&mut self, addr: u8, data: &[u8]) {
        if self.count == LOG_SIZE {
            return;
        }
        let mut w = Write {
            addr,
            bytes: [0; 2],
            len: data.len().min(2),
        };
        w.bytes[..w.len].copy_from_slice(&data[..w.len]);
        self.log[self.count] = w;
        self.count += 1;
    }
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if self.failing {
            return Err(MockError);
        }
        for op in operations.iter() {
            if let Operation::Write(data) = op {
                self.record(address, data);
            }
        }
        Ok(())
    }
}
