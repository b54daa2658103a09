/// Test doubles simulating register devices, line sources and timers during
/// integration tests.
use periph_telemetry::core::{Phase, TransactionResult};
use periph_telemetry::protocol::transport::traits::{
    line_source::LineSource, sample_timer::SampleTimer, transport::Transport,
};
use std::collections::VecDeque;
use tokio::time::{sleep, Duration};

#[allow(dead_code)]
/// 256-register device with an auto-incrementing pointer, scripted failures
/// and a log of every write phase.
pub struct RegisterFile {
    pub registers: [u8; 256],
    /// Next transactions to fail outright.
    pub failures_left: usize,
    pub transactions: usize,
    pub writes: Vec<Vec<u8>>,
}

#[allow(dead_code)]
impl RegisterFile {
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            failures_left: 0,
            transactions: 0,
            writes: Vec::new(),
        }
    }

    pub fn load(&mut self, address: u8, bytes: &[u8]) {
        let start = address as usize;
        self.registers[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// Run `phases` against the register map. `volatile` may override the value
    /// read at a register so wrappers can simulate status bits.
    fn run(
        &mut self,
        phases: &mut [Phase<'_>],
        mut volatile: impl FnMut(u8) -> Option<u8>,
    ) -> TransactionResult {
        self.transactions += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return TransactionResult::failed();
        }

        let mut pointer = 0usize;
        let mut moved = 0;
        for phase in phases.iter_mut() {
            match phase {
                Phase::Write(bytes) => {
                    self.writes.push(bytes.to_vec());
                    if let Some((register, payload)) = bytes.split_first() {
                        pointer = *register as usize;
                        for (offset, byte) in payload.iter().enumerate() {
                            self.registers[(pointer + offset) & 0xFF] = *byte;
                        }
                    }
                    moved += bytes.len();
                }
                Phase::Read(buffer) => {
                    for slot in buffer.iter_mut() {
                        *slot = volatile(pointer as u8)
                            .unwrap_or(self.registers[pointer & 0xFF]);
                        pointer += 1;
                    }
                    moved += buffer.len();
                }
            }
        }
        TransactionResult::completed(moved)
    }
}

impl Transport for RegisterFile {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        self.run(phases, |_| None)
    }
}

//==================================================================================BME280
#[allow(dead_code)]
pub const TEMP_PRESS_CALIBRATION: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C,
    0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];
#[allow(dead_code)]
pub const HUMIDITY_CALIBRATION: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];
/// adc_P = 415148, adc_T = 519888, adc_H = 30000.
#[allow(dead_code)]
pub const REFERENCE_BURST: [u8; 8] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x30];

#[allow(dead_code)]
/// BME280 register map: datasheet calibration, one reference burst, and a
/// `measuring` status bit held for a few polls after each forced trigger.
pub struct SimulatedBme280 {
    pub file: RegisterFile,
    pub busy_polls: usize,
    busy_left: usize,
}

#[allow(dead_code)]
impl SimulatedBme280 {
    pub fn new() -> Self {
        let mut file = RegisterFile::new();
        file.registers[0xD0] = 0x60;
        file.load(0x88, &TEMP_PRESS_CALIBRATION);
        file.registers[0xA1] = 75;
        file.load(0xE1, &HUMIDITY_CALIBRATION);
        file.load(0xF7, &REFERENCE_BURST);
        Self {
            file,
            busy_polls: 1,
            busy_left: 0,
        }
    }

    /// Replace the measurement burst returned by the next reads.
    pub fn set_burst(&mut self, burst: &[u8; 8]) {
        self.file.load(0xF7, burst);
    }
}

impl Transport for SimulatedBme280 {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        let forced = matches!(&*phases, [Phase::Write([0xF4, ctrl_meas])] if ctrl_meas & 0b11 == 0b01);
        let busy_left = &mut self.busy_left;
        let result = self.file.run(phases, |register| {
            (register == 0xF3).then(|| {
                if *busy_left > 0 {
                    *busy_left -= 1;
                    1 << 3
                } else {
                    0
                }
            })
        });
        if forced && result.success {
            self.busy_left = self.busy_polls;
        }
        result
    }
}

//==================================================================================LINES
#[allow(dead_code)]
#[derive(Debug, PartialEq, Eq)]
/// The scripted source ran out of lines.
pub struct SourceClosed;

#[allow(dead_code)]
/// Line source replaying a fixed script, then reporting [`SourceClosed`].
pub struct ScriptedLines {
    lines: VecDeque<Vec<u8>>,
}

#[allow(dead_code)]
impl ScriptedLines {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self {
            lines: lines.into_iter().map(|l| l.as_ref().to_vec()).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    type Error = SourceClosed;

    async fn next_line<'a>(&'a mut self, buffer: &'a mut [u8]) -> Result<usize, Self::Error> {
        let line = self.lines.pop_front().ok_or(SourceClosed)?;
        let copied = line.len().min(buffer.len());
        buffer[..copied].copy_from_slice(&line[..copied]);
        Ok(line.len())
    }
}

//==================================================================================TIMERS
#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct TokioTimer;

impl SampleTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[allow(dead_code)]
/// Blocking delay that returns immediately.
pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
