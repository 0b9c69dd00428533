use std::fmt;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;


pub const DEFAULT_PORT: u16 = 5000;


#[derive(Debug)]
pub enum CommunicationError {
    Io(io::Error),
    ConnectionClosed,
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Io(err) => write!(f, "{err}"),
            CommunicationError::ConnectionClosed => write!(f, "connection closed by the server"),
        }
    }
}

impl std::error::Error for CommunicationError {}

// Appends the default port when the address carries none.
pub fn parse_address(address: &str) -> String {
    if address.contains(':') {
        address.to_owned()
    } else {
        format!("{address}:{DEFAULT_PORT}")
    }
}

// One protocol message per line; trailing "\r\n" or "\n" is stripped.
pub fn read_line(reader: &mut BufReader<TcpStream>) -> Result<String, CommunicationError> {
    let mut line = String::new();
    let num_bytes = reader.read_line(&mut line).map_err(CommunicationError::Io)?;
    if num_bytes == 0 {
        return Err(CommunicationError::ConnectionClosed);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

pub fn write_command(stream: &mut TcpStream, command: &str) -> Result<(), CommunicationError> {
    stream.write_all(command.as_bytes()).map_err(CommunicationError::Io)?;
    stream.write_all(b"\n").map_err(CommunicationError::Io)
}
