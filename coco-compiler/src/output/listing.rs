//! Listing record formatting (§6: "Listing record (consumed by `--print`)").
//!
//! Each assembled statement becomes one [`ListingRecord`]: hex address, up to
//! five bytes of hex-encoded machine code, and the four source columns this
//! statement was parsed from. A statement whose `emitted_bytes` runs longer
//! than five bytes (only `FCB`/`FCC`/`FDB` with a long operand list can) is
//! still fully represented in `bytes_hex` -- the "\u{2264}10 chars" figure in
//! §6 describes the common case, not a hard truncation.

use std::fmt::Write as _;

use crate::core::AssembledStatement;
use crate::parsing::{Statement, StatementBody};
use crate::utils::{byte_to_hex, word_to_hex};

/// One formatted listing line, ready to print or write to a listing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
	pub address_hex: String,
	pub bytes_hex: String,
	pub label: String,
	pub mnemonic: String,
	pub operand_text: String,
	pub comment: String,
}

fn mnemonic_and_operand(statement: &Statement) -> (String, String) {
	match &statement.body {
		StatementBody::Empty => (String::new(), String::new()),
		StatementBody::Directive(directive) => directive_text(directive),
		StatementBody::Instruction(instr) => {
			(instr.mnemonic.to_string(), operand_source_text(&statement.raw_text))
		}
	}
}

/// Recover the raw operand text as written, by re-splitting the source line --
/// the parser already did this once, but [`Statement`] only keeps the
/// classified [`crate::instructions::OperandSyntax`], not the original text.
fn operand_source_text(raw_text: &str) -> String {
	crate::parsing::split_line(raw_text).operand_text.unwrap_or_default()
}

fn directive_text(directive: &crate::parsing::Directive) -> (String, String) {
	use crate::parsing::Directive;
	match directive {
		Directive::Org(e) => ("ORG".to_string(), e.clone()),
		Directive::Equ(e) => ("EQU".to_string(), e.clone()),
		Directive::Nam(n) => ("NAM".to_string(), n.clone()),
		Directive::End(e) => ("END".to_string(), e.clone().unwrap_or_default()),
		Directive::Setdp(e) => ("SETDP".to_string(), e.clone()),
		Directive::Fcb(es) => ("FCB".to_string(), es.join(",")),
		Directive::Fdb(es) => ("FDB".to_string(), es.join(",")),
		Directive::Fcc(s) => ("FCC".to_string(), format!("\"{s}\"")),
		Directive::Rmb(e) => ("RMB".to_string(), e.clone()),
	}
}

impl ListingRecord {
	/// Build a listing record from one assembled statement.
	#[must_use]
	pub fn from_assembled(assembled: &AssembledStatement) -> Self {
		let (mnemonic, operand_text) = mnemonic_and_operand(&assembled.statement);
		let mut bytes_hex = String::new();
		for byte in &assembled.bytes {
			let _ = write!(bytes_hex, "{}", byte_to_hex(*byte));
		}
		Self {
			address_hex: word_to_hex(assembled.address),
			bytes_hex,
			label: assembled.statement.label.clone().unwrap_or_default(),
			mnemonic,
			operand_text,
			comment: assembled.statement.comment.clone().unwrap_or_default(),
		}
	}
}

impl std::fmt::Display for ListingRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{:<4} {:<10} {:<8} {:<6} {:<20} {}",
			self.address_hex, self.bytes_hex, self.label, self.mnemonic, self.operand_text, self.comment
		)
	}
}

/// Build one listing record per assembled statement, in program order.
#[must_use]
pub fn build(statements: &[AssembledStatement]) -> Vec<ListingRecord> {
	statements.iter().map(ListingRecord::from_assembled).collect()
}

/// Render the full listing as text, one line per statement.
#[must_use]
pub fn render(statements: &[AssembledStatement]) -> String {
	let mut out = String::new();
	for record in build(statements) {
		let _ = writeln!(out, "{record}");
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SourcePos;
	use crate::parsing::{Statement, StatementBody};
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("t.asm"), 1, 1)
	}

	#[test]
	fn record_formats_bytes_as_uppercase_hex() {
		let assembled = AssembledStatement {
			statement: Statement {
				pos: pos(),
				label: Some("START".to_string()),
				body: StatementBody::Empty,
				comment: None,
				raw_text: "START LDX #$1234".to_string(),
			},
			address: 0x0E00,
			bytes: vec![0x8E, 0x12, 0x34],
		};
		let record = ListingRecord::from_assembled(&assembled);
		assert_eq!(record.address_hex, "0E00");
		assert_eq!(record.bytes_hex, "8E1234");
		assert_eq!(record.label, "START");
		assert_eq!(record.operand_text, "#$1234");
	}

	#[test]
	fn directive_lines_recover_mnemonic_and_operand() {
		let assembled = AssembledStatement {
			statement: Statement {
				pos: pos(),
				label: None,
				body: StatementBody::Directive(crate::parsing::Directive::Org("$0E00".to_string())),
				comment: None,
				raw_text: "\tORG $0E00".to_string(),
			},
			address: 0x0E00,
			bytes: Vec::new(),
		};
		let record = ListingRecord::from_assembled(&assembled);
		assert_eq!(record.mnemonic, "ORG");
		assert_eq!(record.operand_text, "$0E00");
		assert_eq!(record.bytes_hex, "");
	}
}
