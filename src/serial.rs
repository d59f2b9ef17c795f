use serialport::SerialPort;
use std::io;
use std::io::{Read, Write};

use log::debug;

pub fn send_command(port: &mut Box<dyn SerialPort>, command: &[u8]) -> Result<(), io::Error> {
    port.write_all(command)?;
    port.flush()
}

/// Number of bytes waiting in the input buffer.
/// Another process holding the same port makes the query fail; that counts as zero.
pub fn get_n_read(port: &mut Box<dyn SerialPort>) -> usize {
    match port.bytes_to_read() {
        Ok(n) => n as usize,
        Err(e) => {
            debug!("Failed to query the pending bytes: {}", e);
            0
        }
    }
}

/// Reads until `data_size` bytes arrived or the port timed out.
/// A short packet is returned as is.
pub fn read(port: &mut Box<dyn SerialPort>, data_size: usize) -> Result<Vec<u8>, io::Error> {
    let mut packet: Vec<u8> = vec![0; data_size];
    let mut n_filled: usize = 0;
    while n_filled < data_size {
        match port.read(&mut packet[n_filled..]) {
            Ok(0) => break,
            Ok(n) => n_filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    packet.truncate(n_filled);
    Ok(packet)
}

/// Reads single bytes until nothing more is coming.
pub fn read_extra_bytes(port: &mut Box<dyn SerialPort>) -> Result<Vec<u8>, io::Error> {
    let mut extra: Vec<u8> = Vec::new();
    if get_n_read(port) == 0 {
        return Ok(extra);
    }
    loop {
        let byte = read(port, 1)?;
        if byte.is_empty() {
            break;
        }
        extra.extend(byte);
    }
    Ok(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::TTYPort;
    use std::time::Duration;

    fn sleep_ms(duration: u64) {
        std::thread::sleep(Duration::from_millis(duration));
    }

    #[test]
    fn test_send_command() {
        let (master, mut slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut master_ptr = Box::new(master) as Box<dyn SerialPort>;
        send_command(&mut master_ptr, b"<GETCPM>>").unwrap();

        sleep_ms(10);
        let mut buf = [0u8; 9];
        slave.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"<GETCPM>>");
    }

    #[test]
    fn test_read() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;
        slave_ptr.set_timeout(Duration::from_millis(50)).unwrap();

        master.write_all(&[0x00, 0x0A, 0x80, 0x0A]).unwrap();
        sleep_ms(10);
        assert_eq!(read(&mut slave_ptr, 2).unwrap(), vec![0x00, 0x0A]);
        assert_eq!(read(&mut slave_ptr, 2).unwrap(), vec![0x80, 0x0A]);

        // short read
        master.write_all(&[0x01]).unwrap();
        sleep_ms(10);
        assert_eq!(read(&mut slave_ptr, 4).unwrap(), vec![0x01]);

        // nothing to read
        assert_eq!(read(&mut slave_ptr, 2).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_get_n_read() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;
        assert_eq!(get_n_read(&mut slave_ptr), 0);

        master.write_all(&[0x00, 0x0A, 0x80]).unwrap();
        sleep_ms(10);
        assert_eq!(get_n_read(&mut slave_ptr), 3);
    }

    /// A port whose pending-byte query fails: /dev/null is no terminal.
    fn port_without_pending_count() -> Box<dyn SerialPort> {
        use std::os::unix::io::{FromRawFd, IntoRawFd};
        let fd = std::fs::File::open("/dev/null").unwrap().into_raw_fd();
        Box::new(unsafe { TTYPort::from_raw_fd(fd) })
    }

    #[test]
    fn test_get_n_read_failure() {
        let mut port = port_without_pending_count();
        assert!(port.bytes_to_read().is_err());
        assert_eq!(get_n_read(&mut port), 0);
        assert_eq!(read_extra_bytes(&mut port).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_read_extra_bytes() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;
        slave_ptr.set_timeout(Duration::from_millis(50)).unwrap();

        // when zero bytes to read
        assert_eq!(read_extra_bytes(&mut slave_ptr).unwrap(), Vec::<u8>::new());

        master.write_all(b"8\r\n").unwrap();
        sleep_ms(10);
        assert_eq!(read_extra_bytes(&mut slave_ptr).unwrap(), b"8\r\n".to_vec());
        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 0);
    }
}
