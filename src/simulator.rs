//! A counter answering on the master side of a pseudo terminal, for tests.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver};
use serialport::{SerialPort, TTYPort};

pub struct SimulatedCounter {
    replies: HashMap<Vec<u8>, Vec<u8>>,
}

fn take_command(pending: &mut Vec<u8>) -> Option<Vec<u8>> {
    let end = pending.windows(2).position(|w| w == b">>")? + 2;
    let start = pending[..end].iter().rposition(|&b| b == b'<').unwrap_or(0);
    let command = pending[start..end].to_vec();
    pending.drain(..end);
    Some(command)
}

impl SimulatedCounter {
    pub fn new() -> Self {
        SimulatedCounter {
            replies: HashMap::new(),
        }
    }

    pub fn reply(mut self, command: &[u8], reply: &[u8]) -> Self {
        self.replies.insert(command.to_vec(), reply.to_vec());
        self
    }

    /// Returns the port to talk to the counter and a receiver of the commands it got.
    pub fn spawn(self) -> (Box<dyn SerialPort>, Receiver<Vec<u8>>) {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        master.set_timeout(Duration::from_millis(20)).unwrap();
        let (command_tx, command_rx) = unbounded();

        std::thread::spawn(move || {
            let mut pending: Vec<u8> = Vec::new();
            let mut buf = [0u8; 64];
            loop {
                match master.read(&mut buf) {
                    Ok(n) => pending.extend_from_slice(&buf[..n]),
                    Err(ref e) if e.kind() == io::ErrorKind::TimedOut => continue,
                    Err(_) => return,
                }
                while let Some(command) = take_command(&mut pending) {
                    let reply = self.replies.get(&command);
                    // the test may not watch the commands
                    let _ = command_tx.send(command);
                    if let Some(reply) = reply {
                        if master.write_all(reply).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;
        slave_ptr.set_timeout(Duration::from_millis(100)).unwrap();
        (slave_ptr, command_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_command() {
        let mut pending = b"<GETVER>><GETCPM".to_vec();
        assert_eq!(take_command(&mut pending), Some(b"<GETVER>>".to_vec()));
        assert_eq!(take_command(&mut pending), None);
        pending.extend_from_slice(b">>");
        assert_eq!(take_command(&mut pending), Some(b"<GETCPM>>".to_vec()));
        assert!(pending.is_empty());
    }
}
