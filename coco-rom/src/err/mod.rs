use thiserror::Error;

/// Errors that arise while reading or writing a cassette or disk container.
#[derive(Error, Debug)]
pub enum Error {
	#[error("truncated container: expected at least {expected} bytes, got {got}")]
	Truncated { expected: usize, got: usize },
	#[error("bad sync byte at offset {offset:#06x}: expected 0x3C, got {got:#04x}")]
	BadSync { offset: usize, got: u8 },
	#[error("checksum mismatch in block at offset {offset:#06x}: expected {expected:#04x}, got {got:#04x}")]
	BadChecksum { offset: usize, expected: u8, got: u8 },
	#[error("unknown cassette block type {0:#04x}")]
	UnknownBlockType(u8),
	#[error("cassette payload too large: {0} bytes exceeds the 255-byte data block limit")]
	PayloadTooLarge(usize),
	#[error("disk image has wrong size: expected {expected} bytes, got {got}")]
	BadImageSize { expected: usize, got: usize },
	#[error("disk image is full: no free directory entry")]
	DirectoryFull,
	#[error("disk image is full: no free granule")]
	NoFreeGranule,
	#[error("file name {0:?} is too long for an 8.3 directory entry")]
	NameTooLong(String),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
