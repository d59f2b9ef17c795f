use std::time::Duration;

use chrono::Local;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info};

use crate::device::GmcDevice;
use crate::error::GmcError;
use crate::logfile::LogFile;
use crate::reading::{Count, Reading, TIMESTAMP_FORMAT};
use crate::system_command::Measurement;

fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    if let Ok(terminate) = terminator_rx.try_recv() {
        return terminate;
    }
    return false;
}

/// Sleeps for `duration` unless a stop request arrives first.
fn wait_or_terminate(terminator_rx: &Receiver<bool>, duration: Duration) -> bool {
    match terminator_rx.recv_timeout(duration) {
        Ok(terminate) => terminate,
        Err(RecvTimeoutError::Timeout) => false,
        Err(RecvTimeoutError::Disconnected) => {
            // nobody can stop us anymore
            std::thread::sleep(duration);
            false
        }
    }
}

pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub struct PollLoop<'a> {
    device: &'a mut GmcDevice,
    log_file: &'a LogFile,
    cycle_interval: Duration,
    max_cycles: Option<u64>,
}

impl<'a> PollLoop<'a> {
    pub fn new(device: &'a mut GmcDevice, log_file: &'a LogFile, cycle_interval: Duration) -> Self {
        PollLoop {
            device,
            log_file,
            cycle_interval,
            max_cycles: None,
        }
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Runs the six measurements of one cycle.
    pub fn poll_once(&mut self, index: u64) -> Result<Reading, GmcError> {
        let timestamp = timestamp();
        let mut counts: [Count; 6] = [Ok(0); 6];
        for (count, measurement) in counts.iter_mut().zip(Measurement::POLL_ORDER) {
            *count = self.device.measure(measurement)?;
        }
        let [cpm, cps, cpm1st, cpm2nd, cps1st, cps2nd] = counts;
        Ok(Reading {
            index,
            timestamp,
            cpm,
            cps,
            cpm1st,
            cpm2nd,
            cps1st,
            cps2nd,
        })
    }

    /// Polls until `terminator_rx` receives `true` or the cycle limit is reached.
    /// Returns the number of completed cycles.
    pub fn run(&mut self, terminator_rx: &Receiver<bool>) -> Result<u64, GmcError> {
        // residual bytes of the version reply would shift every frame
        self.device.discard_pending()?;

        let mut index: u64 = 0;
        loop {
            if self.max_cycles.map_or(false, |n| index >= n) {
                debug!("Reached the cycle limit of {}", index);
                break;
            }
            if do_terminate(terminator_rx) {
                break;
            }

            let reading = self.poll_once(index)?;
            println!("{}", reading.summary());
            self.log_file.append(&reading)?;
            index += 1;

            if self.max_cycles.map_or(false, |n| index >= n) {
                continue;
            }
            if wait_or_terminate(terminator_rx, self.cycle_interval) {
                break;
            }
        }
        info!("Stopped logging after {} cycles", index);
        Ok(index)
    }
}
