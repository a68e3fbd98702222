//! Packaging an assembled program into a loadable file (§6: `--to_bin`,
//! `--to_cas`, `--to_dsk`).
//!
//! All three share the same payload: [`Image::primary_run`], the contiguous
//! run holding the `END` execution address (or the first-written run, if
//! none does). A program that used `ORG` to scatter itself across several
//! disjoint runs still only gets one loadable chunk out of these three
//! commands -- anything beyond the primary run is reachable only via
//! `--print`'s per-statement addresses, same as the real tools this mirrors.

use std::io::Write;
use std::path::Path;

use coco_rom::cassette::{self, CassetteProgram, FileType as CassetteFileType, NamefileHeader};
use coco_rom::disk::{DiskImage, FileType as DiskFileType};
use tempfile::NamedTempFile;

use crate::core::{AssembledProgram, Image};
use crate::error::{AssemblyError, AssemblyResult, SourcePos};

fn io_err(path: &Path, source: std::io::Error) -> AssemblyError {
	AssemblyError::io(SourcePos::unknown(), std::io::Error::new(source.kind(), format!("{}: {source}", path.display())))
}

fn container_err(path: &Path, source: impl std::fmt::Display) -> AssemblyError {
	AssemblyError::container_full(format!("{}: {source}", path.display()))
}

/// Refuse to clobber an existing container unless the caller asked to append
/// to it -- a non-appending write must leave a pre-existing file untouched.
fn refuse_if_not_appending(path: &Path, append: bool) -> AssemblyResult<()> {
	if !append && path.exists() {
		return Err(io_err(
			path,
			std::io::Error::new(std::io::ErrorKind::AlreadyExists, "refusing to overwrite without --append"),
		));
	}
	Ok(())
}

/// Write `bytes` to `path` without ever leaving a truncated file behind on
/// failure: write to a temp file in the same directory, then rename it over
/// `path`, which is atomic on the same filesystem.
fn atomic_write(path: &Path, bytes: &[u8]) -> AssemblyResult<()> {
	let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
	let mut temp = NamedTempFile::new_in(dir).map_err(|e| io_err(path, e))?;
	temp.write_all(bytes).map_err(|e| io_err(path, e))?;
	temp.persist(path).map_err(|e| io_err(path, e.error))?;
	Ok(())
}

fn primary_run_bytes(image: &Image) -> (u16, &[u8]) {
	match image.primary_run() {
		Some(run) => (run.origin, run.bytes.as_slice()),
		None => (0, &[]),
	}
}

/// Write the primary run's raw bytes, no header, no gap-filling: the
/// `--to_bin` contract.
pub fn write_bin(program: &AssembledProgram, path: &Path, append: bool) -> AssemblyResult<()> {
	refuse_if_not_appending(path, append)?;
	let (_, bytes) = primary_run_bytes(&program.image);
	atomic_write(path, bytes)
}

/// Build the cassette program (Namefile + Data) for an assembled program's
/// primary run.
fn cassette_program(program: &AssembledProgram, name: &str) -> CassetteProgram {
	let (load_addr, bytes) = primary_run_bytes(&program.image);
	let header = NamefileHeader::new(name, CassetteFileType::ObjectCode, load_addr, program.image.execution_address);
	CassetteProgram { header, data: bytes.to_vec() }
}

/// Write (or append to) a `.CAS` cassette image.
pub fn write_cas(
	program: &AssembledProgram,
	path: &Path,
	name: &str,
	append: bool,
	leader_len: usize,
) -> AssemblyResult<()> {
	refuse_if_not_appending(path, append)?;
	let cassette_program = cassette_program(program, name);
	let bytes = if append && path.exists() {
		let existing = std::fs::read(path).map_err(|e| io_err(path, e))?;
		cassette::append_program(&existing, &cassette_program, leader_len)
	} else {
		cassette::encode_program(&cassette_program, leader_len)
	};
	atomic_write(path, &bytes)
}

/// Split a program name such as `HELLO.BIN` into its 8.3 name/extension
/// parts, defaulting the extension to `BIN`.
fn split_name_ext(name: &str) -> (&str, &str) {
	match name.rsplit_once('.') {
		Some((stem, ext)) if !ext.is_empty() => (stem, ext),
		_ => (name, "BIN"),
	}
}

/// Write (or append to) a `.DSK` disk image.
pub fn write_dsk(program: &AssembledProgram, path: &Path, name: &str, append: bool) -> AssemblyResult<()> {
	refuse_if_not_appending(path, append)?;
	let mut image = if append && path.exists() {
		let existing = std::fs::read(path).map_err(|e| io_err(path, e))?;
		DiskImage::from_bytes(existing).map_err(|e| container_err(path, e))?
	} else {
		DiskImage::blank()
	};

	let (_, bytes) = primary_run_bytes(&program.image);
	let (stem, ext) = split_name_ext(name);
	image.write_file(stem, ext, DiskFileType::Binary, bytes).map_err(|e| container_err(path, e))?;

	atomic_write(path, &image.into_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::AssembledStatement;
	use crate::error::SourcePos;
	use crate::parsing::{Statement, StatementBody};
	use std::path::PathBuf;

	fn sample_program() -> AssembledProgram {
		let mut image = Image::new();
		image.write(0x0E00, &[0x86, 0x41, 0x39]);
		image.execution_address = 0x0E00;
		let statement = Statement {
			pos: SourcePos::new(PathBuf::from("t.asm"), 1, 1),
			label: None,
			body: StatementBody::Empty,
			comment: None,
			raw_text: String::new(),
		};
		AssembledProgram {
			statements: vec![AssembledStatement { statement, address: 0x0E00, bytes: vec![0x86, 0x41, 0x39] }],
			symbols: crate::symbols::SymbolTable::new(),
			image,
			program_name: Some("HELLO".to_string()),
		}
	}

	#[test]
	fn to_bin_writes_the_primary_run_bytes() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.bin");
		write_bin(&sample_program(), &path, false).unwrap();
		assert_eq!(std::fs::read(&path).unwrap(), vec![0x86, 0x41, 0x39]);
	}

	#[test]
	fn to_bin_refuses_to_overwrite_without_append() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.bin");
		write_bin(&sample_program(), &path, false).unwrap();
		let err = write_bin(&sample_program(), &path, false).unwrap_err();
		assert!(matches!(err, AssemblyError::Io { .. }));
	}

	#[test]
	fn to_cas_refuses_to_overwrite_without_append() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.cas");
		write_cas(&sample_program(), &path, "FIRST", false, 2).unwrap();
		let err = write_cas(&sample_program(), &path, "SECOND", false, 2).unwrap_err();
		assert!(matches!(err, AssemblyError::Io { .. }));
	}

	#[test]
	fn to_cas_round_trips_through_coco_rom() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.cas");
		write_cas(&sample_program(), &path, "HELLO", false, 4).unwrap();
		let bytes = std::fs::read(&path).unwrap();
		let programs = cassette::list_programs(&bytes).unwrap();
		assert_eq!(programs.len(), 1);
		assert_eq!(programs[0].header.name_str(), "HELLO");
		assert_eq!(programs[0].data, vec![0x86, 0x41, 0x39]);
	}

	#[test]
	fn to_cas_append_keeps_both_programs() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.cas");
		write_cas(&sample_program(), &path, "FIRST", false, 2).unwrap();
		write_cas(&sample_program(), &path, "SECOND", true, 2).unwrap();
		let bytes = std::fs::read(&path).unwrap();
		let programs = cassette::list_programs(&bytes).unwrap();
		assert_eq!(programs.len(), 2);
		assert_eq!(programs[1].header.name_str(), "SECOND");
	}

	#[test]
	fn to_dsk_writes_a_readable_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.dsk");
		write_dsk(&sample_program(), &path, "HELLO.BIN", false).unwrap();
		let bytes = std::fs::read(&path).unwrap();
		let image = DiskImage::from_bytes(bytes).unwrap();
		let files = image.list_files();
		assert_eq!(files.len(), 1);
		assert_eq!(files[0].name_str(), "HELLO");
		assert_eq!(files[0].ext_str(), "BIN");
		assert_eq!(image.read_file(&files[0]), vec![0x86, 0x41, 0x39]);
	}
}
