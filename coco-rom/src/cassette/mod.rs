//! Cassette (`.CAS`) container byte layout.
//!
//! A cassette image is a flat stream of blocks: `[leader][sync][type][length]
//! [payload][checksum]`. A program on tape is `Namefile, Data+, EOF`.

use crate::err::{Error, Result};

/// Byte written repeatedly before a block's sync byte.
pub const LEADER_BYTE: u8 = 0x55;
/// Marks the end of a block's leader, immediately before `type`.
pub const SYNC_BYTE: u8 = 0x3C;
/// Default leader length used when writing a new block.
pub const DEFAULT_LEADER_LEN: usize = 128;
/// Maximum payload size of a single Data block.
pub const MAX_DATA_PAYLOAD: usize = 255;

/// Block type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
	Namefile,
	Data,
	Eof,
}

impl BlockType {
	#[must_use]
	pub fn byte(self) -> u8 {
		match self {
			Self::Namefile => 0x00,
			Self::Data => 0x01,
			Self::Eof => 0xFF,
		}
	}

	pub fn from_byte(b: u8) -> Result<Self> {
		match b {
			0x00 => Ok(Self::Namefile),
			0x01 => Ok(Self::Data),
			0xFF => Ok(Self::Eof),
			other => Err(Error::UnknownBlockType(other)),
		}
	}
}

/// File-type byte stored in a Namefile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
	Basic = 0,
	Data = 1,
	ObjectCode = 2,
}

impl FileType {
	#[must_use]
	pub fn byte(self) -> u8 {
		self as u8
	}
}

/// The fixed 15-byte Namefile payload: program metadata preceding the data blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamefileHeader {
	/// 8-byte space-padded, uppercased program name.
	pub name: [u8; 8],
	pub file_type: u8,
	pub ascii_flag: u8,
	pub gap_flag: u8,
	pub exec_addr: u16,
	pub load_addr: u16,
}

impl NamefileHeader {
	#[must_use]
	pub fn new(name: &str, file_type: FileType, load_addr: u16, exec_addr: u16) -> Self {
		let mut padded = [b' '; 8];
		for (dst, src) in padded.iter_mut().zip(name.to_ascii_uppercase().bytes()) {
			*dst = src;
		}
		Self {
			name: padded,
			file_type: file_type.byte(),
			ascii_flag: 0,
			gap_flag: 0,
			exec_addr,
			load_addr,
		}
	}

	#[must_use]
	pub fn name_str(&self) -> String {
		String::from_utf8_lossy(&self.name).trim_end().to_string()
	}

	#[must_use]
	pub fn to_bytes(&self) -> [u8; 15] {
		let mut out = [0u8; 15];
		out[0..8].copy_from_slice(&self.name);
		out[8] = self.file_type;
		out[9] = self.ascii_flag;
		out[10] = self.gap_flag;
		out[11] = (self.exec_addr >> 8) as u8;
		out[12] = (self.exec_addr & 0xFF) as u8;
		out[13] = (self.load_addr >> 8) as u8;
		out[14] = (self.load_addr & 0xFF) as u8;
		out
	}

	pub fn from_bytes(b: &[u8]) -> Result<Self> {
		if b.len() != 15 {
			return Err(Error::Truncated { expected: 15, got: b.len() });
		}
		let mut name = [0u8; 8];
		name.copy_from_slice(&b[0..8]);
		Ok(Self {
			name,
			file_type: b[8],
			ascii_flag: b[9],
			gap_flag: b[10],
			exec_addr: u16::from_be_bytes([b[11], b[12]]),
			load_addr: u16::from_be_bytes([b[13], b[14]]),
		})
	}
}

/// One parsed or to-be-written cassette block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CassetteBlock {
	Namefile(NamefileHeader),
	Data(Vec<u8>),
	Eof,
}

impl CassetteBlock {
	fn block_type(&self) -> BlockType {
		match self {
			Self::Namefile(_) => BlockType::Namefile,
			Self::Data(_) => BlockType::Data,
			Self::Eof => BlockType::Eof,
		}
	}

	fn payload(&self) -> Vec<u8> {
		match self {
			Self::Namefile(h) => h.to_bytes().to_vec(),
			Self::Data(d) => d.clone(),
			Self::Eof => Vec::new(),
		}
	}

	/// Encode this block with the given leader length.
	#[must_use]
	pub fn encode(&self, leader_len: usize) -> Vec<u8> {
		let payload = self.payload();
		let mut out = Vec::with_capacity(leader_len + 3 + payload.len() + 1);
		out.extend(std::iter::repeat_n(LEADER_BYTE, leader_len));
		out.push(SYNC_BYTE);
		out.push(self.block_type().byte());
		out.push(payload.len() as u8);
		out.extend_from_slice(&payload);
		out.push(checksum(self.block_type().byte(), &payload));
		out
	}
}

#[must_use]
fn checksum(type_byte: u8, payload: &[u8]) -> u8 {
	let mut sum: u32 = u32::from(type_byte) + payload.len() as u32;
	for b in payload {
		sum += u32::from(*b);
	}
	(sum % 256) as u8
}

/// Parse every block out of a raw cassette byte stream, in order.
pub fn parse_blocks(bytes: &[u8]) -> Result<Vec<CassetteBlock>> {
	let mut blocks = Vec::new();
	let mut pos = 0usize;
	while pos < bytes.len() {
		// skip leader bytes (and any padding) until we find sync
		while pos < bytes.len() && bytes[pos] != SYNC_BYTE {
			pos += 1;
		}
		if pos >= bytes.len() {
			break;
		}
		let sync_offset = pos;
		pos += 1;
		if pos + 2 > bytes.len() {
			return Err(Error::Truncated { expected: pos + 2, got: bytes.len() });
		}
		let type_byte = bytes[pos];
		let length = bytes[pos + 1] as usize;
		pos += 2;
		if pos + length + 1 > bytes.len() {
			return Err(Error::Truncated { expected: pos + length + 1, got: bytes.len() });
		}
		let payload = &bytes[pos..pos + length];
		pos += length;
		let actual_checksum = bytes[pos];
		pos += 1;

		let expected_checksum = checksum(type_byte, payload);
		if actual_checksum != expected_checksum {
			return Err(Error::BadChecksum {
				offset: sync_offset,
				expected: expected_checksum,
				got: actual_checksum,
			});
		}

		let block = match BlockType::from_byte(type_byte)? {
			BlockType::Namefile => CassetteBlock::Namefile(NamefileHeader::from_bytes(payload)?),
			BlockType::Data => CassetteBlock::Data(payload.to_vec()),
			BlockType::Eof => CassetteBlock::Eof,
		};
		blocks.push(block);
	}
	Ok(blocks)
}

/// A single named program ready to be written to (or read from) a tape: a
/// Namefile header plus the raw bytes of its data blocks, reassembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CassetteProgram {
	pub header: NamefileHeader,
	pub data: Vec<u8>,
}

/// Encode a single program as `Namefile, Data+, EOF`.
#[must_use]
pub fn encode_program(program: &CassetteProgram, leader_len: usize) -> Vec<u8> {
	let mut out = CassetteBlock::Namefile(program.header.clone()).encode(leader_len);
	for chunk in program.data.chunks(MAX_DATA_PAYLOAD) {
		out.extend(CassetteBlock::Data(chunk.to_vec()).encode(leader_len));
	}
	out.extend(CassetteBlock::Eof.encode(leader_len));
	out
}

/// Append an encoded program's bytes onto an existing cassette image.
#[must_use]
pub fn append_program(existing: &[u8], program: &CassetteProgram, leader_len: usize) -> Vec<u8> {
	let mut out = existing.to_vec();
	out.extend(encode_program(program, leader_len));
	out
}

/// Reassemble every `Namefile, Data+, EOF` run in a cassette image into programs.
pub fn list_programs(bytes: &[u8]) -> Result<Vec<CassetteProgram>> {
	let blocks = parse_blocks(bytes)?;
	let mut programs = Vec::new();
	let mut current: Option<(NamefileHeader, Vec<u8>)> = None;
	for block in blocks {
		match block {
			CassetteBlock::Namefile(h) => current = Some((h, Vec::new())),
			CassetteBlock::Data(d) => {
				if let Some((_, buf)) = current.as_mut() {
					buf.extend(d);
				}
			}
			CassetteBlock::Eof => {
				if let Some((header, data)) = current.take() {
					programs.push(CassetteProgram { header, data });
				}
			}
		}
	}
	Ok(programs)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn checksum_matches_type_length_and_payload_sum() {
		let payload = vec![0x41, 0x42, 0x43];
		let c = checksum(BlockType::Data.byte(), &payload);
		let expected = (1u32 + 3 + 0x41 + 0x42 + 0x43) % 256;
		assert_eq!(u32::from(c), expected);
	}

	#[test]
	fn single_program_round_trips() {
		let header = NamefileHeader::new("HELLO", FileType::ObjectCode, 0x0E00, 0x0E00);
		let program = CassetteProgram { header, data: vec![0x86, 0x41, 0x39] };
		let bytes = encode_program(&program, 4);
		let programs = list_programs(&bytes).unwrap();
		assert_eq!(programs.len(), 1);
		assert_eq!(programs[0].data, program.data);
		assert_eq!(programs[0].header.name_str(), "HELLO");
	}

	#[test]
	fn appended_programs_round_trip_both() {
		let h1 = NamefileHeader::new("FIRST", FileType::ObjectCode, 0x1000, 0x1000);
		let p1 = CassetteProgram { header: h1, data: vec![1, 2, 3] };
		let h2 = NamefileHeader::new("SECOND", FileType::ObjectCode, 0x2000, 0x2000);
		let p2 = CassetteProgram { header: h2, data: vec![4, 5, 6, 7] };

		let bytes = encode_program(&p1, 4);
		let bytes = append_program(&bytes, &p2, 4);

		let programs = list_programs(&bytes).unwrap();
		assert_eq!(programs.len(), 2);
		assert_eq!(programs[0].header.name_str(), "FIRST");
		assert_eq!(programs[1].header.name_str(), "SECOND");
		assert_eq!(programs[1].data, vec![4, 5, 6, 7]);
	}

	#[test]
	fn data_block_larger_than_255_bytes_is_split() {
		let header = NamefileHeader::new("BIG", FileType::Data, 0, 0);
		let data = vec![0xAAu8; 600];
		let program = CassetteProgram { header, data: data.clone() };
		let bytes = encode_program(&program, 2);
		let blocks = parse_blocks(&bytes).unwrap();
		let data_blocks = blocks.iter().filter(|b| matches!(b, CassetteBlock::Data(_))).count();
		assert_eq!(data_blocks, 3); // 255 + 255 + 90
		let programs = list_programs(&bytes).unwrap();
		assert_eq!(programs[0].data, data);
	}

	#[test]
	fn corrupted_checksum_is_rejected() {
		let header = NamefileHeader::new("X", FileType::Basic, 0, 0);
		let program = CassetteProgram { header, data: vec![1] };
		let mut bytes = encode_program(&program, 1);
		let last = bytes.len() - 1;
		bytes[last] ^= 0xFF;
		assert!(matches!(parse_blocks(&bytes), Err(Error::BadChecksum { .. })));
	}
}
