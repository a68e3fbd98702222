//! Pseudo-op recognition.
//!
//! A directive's expression text is kept as a string here and left for the
//! two-pass driver to evaluate via [`crate::parsing::expressions::evaluate`]
//! against the symbol table as it stands at that point in the pass -- this
//! module only recognizes which pseudo-op a mnemonic names and pulls its
//! operand text apart into the pieces each op needs (a list for `FCB`/`FDB`,
//! a delimited string body for `FCC`, a single expression everywhere else).

use crate::error::{AssemblyError, AssemblyResult, SourcePos};

/// A recognized pseudo-op, with its operand already split into the shape the
/// two-pass driver needs but its expression text left unevaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// `ORG expr` -- set the program counter.
	Org(String),
	/// `EQU expr` -- define the statement's label to this value.
	Equ(String),
	/// `NAM name` -- record the program name.
	Nam(String),
	/// `END [expr]` -- mark the terminal statement, optionally naming the
	/// execution address.
	End(Option<String>),
	/// `SETDP expr` -- set the assumed direct page.
	Setdp(String),
	/// `FCB e1,e2,...` -- emit each as one byte.
	Fcb(Vec<String>),
	/// `FDB e1,e2,...` -- emit each as a big-endian 16-bit word.
	Fdb(Vec<String>),
	/// `FCC /text/` -- emit the literal bytes of `text`.
	Fcc(String),
	/// `RMB expr` -- reserve `expr` zero bytes.
	Rmb(String),
}

/// Recognize `mnemonic` as a pseudo-op and parse its operand text. Returns
/// `Ok(None)` for anything that isn't one of the nine pseudo-ops -- the
/// caller then tries it as a machine instruction instead.
pub fn parse_directive(
	mnemonic: &str,
	operand_text: Option<&str>,
	pos: &SourcePos,
) -> AssemblyResult<Option<Directive>> {
	let upper = mnemonic.to_ascii_uppercase();
	let directive = match upper.as_str() {
		"ORG" => Directive::Org(require_operand(operand_text, "ORG", pos)?),
		"EQU" => Directive::Equ(require_operand(operand_text, "EQU", pos)?),
		"NAM" => Directive::Nam(require_operand(operand_text, "NAM", pos)?),
		"END" => Directive::End(operand_text.map(str::trim).map(str::to_string).filter(|s| !s.is_empty())),
		"SETDP" => Directive::Setdp(require_operand(operand_text, "SETDP", pos)?),
		"FCB" => Directive::Fcb(split_list(require_operand(operand_text, "FCB", pos)?)),
		"FDB" => Directive::Fdb(split_list(require_operand(operand_text, "FDB", pos)?)),
		"FCC" => Directive::Fcc(parse_delimited_string(require_operand(operand_text, "FCC", pos)?.as_str(), pos)?),
		"RMB" => Directive::Rmb(require_operand(operand_text, "RMB", pos)?),
		_ => return Ok(None),
	};
	Ok(Some(directive))
}

fn require_operand(operand_text: Option<&str>, op: &str, pos: &SourcePos) -> AssemblyResult<String> {
	match operand_text.map(str::trim) {
		Some(text) if !text.is_empty() => Ok(text.to_string()),
		_ => Err(AssemblyError::syntax(pos.clone(), format!("{op} requires an operand"))),
	}
}

fn split_list(text: String) -> Vec<String> {
	text.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// Parse `FCC`'s delimited string body: the first character of the operand
/// is the delimiter, and the string runs to the next occurrence of that same
/// character.
fn parse_delimited_string(text: &str, pos: &SourcePos) -> AssemblyResult<String> {
	let mut chars = text.chars();
	let delimiter = chars.next().ok_or_else(|| AssemblyError::syntax(pos.clone(), "FCC requires a delimiter".to_string()))?;
	let rest = chars.as_str();
	let end = rest
		.find(delimiter)
		.ok_or_else(|| AssemblyError::syntax(pos.clone(), format!("FCC string is missing its closing '{delimiter}'")))?;
	Ok(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("t.asm"), 1, 1)
	}

	#[test]
	fn org_captures_expression_text() {
		let directive = parse_directive("ORG", Some("$0E00"), &pos()).unwrap();
		assert_eq!(directive, Some(Directive::Org("$0E00".to_string())));
	}

	#[test]
	fn non_directive_mnemonic_returns_none() {
		assert_eq!(parse_directive("LDA", Some("#65"), &pos()).unwrap(), None);
	}

	#[test]
	fn end_operand_is_optional() {
		assert_eq!(parse_directive("END", None, &pos()).unwrap(), Some(Directive::End(None)));
		assert_eq!(
			parse_directive("END", Some("START"), &pos()).unwrap(),
			Some(Directive::End(Some("START".to_string())))
		);
	}

	#[test]
	fn org_without_operand_is_an_error() {
		let err = parse_directive("ORG", None, &pos());
		assert!(matches!(err, Err(AssemblyError::SyntaxError { .. })));
	}

	#[test]
	fn fcb_splits_on_commas() {
		let directive = parse_directive("FCB", Some("1, 2,3"), &pos()).unwrap();
		assert_eq!(
			directive,
			Some(Directive::Fcb(vec!["1".to_string(), "2".to_string(), "3".to_string()]))
		);
	}

	#[test]
	fn fdb_splits_on_commas() {
		let directive = parse_directive("FDB", Some("$1234,$5678"), &pos()).unwrap();
		assert_eq!(
			directive,
			Some(Directive::Fdb(vec!["$1234".to_string(), "$5678".to_string()]))
		);
	}

	#[test]
	fn fcc_with_quote_delimiter() {
		let directive = parse_directive("FCC", Some("\"AB\""), &pos()).unwrap();
		assert_eq!(directive, Some(Directive::Fcc("AB".to_string())));
	}

	#[test]
	fn fcc_with_slash_delimiter() {
		let directive = parse_directive("FCC", Some("/hello/"), &pos()).unwrap();
		assert_eq!(directive, Some(Directive::Fcc("hello".to_string())));
	}

	#[test]
	fn fcc_missing_closing_delimiter_errors() {
		let err = parse_directive("FCC", Some("\"AB"), &pos());
		assert!(matches!(err, Err(AssemblyError::SyntaxError { .. })));
	}

	#[test]
	fn setdp_and_rmb_capture_expression_text() {
		assert_eq!(parse_directive("SETDP", Some("$10"), &pos()).unwrap(), Some(Directive::Setdp("$10".to_string())));
		assert_eq!(parse_directive("RMB", Some("4"), &pos()).unwrap(), Some(Directive::Rmb("4".to_string())));
	}

	#[test]
	fn lowercase_mnemonic_is_recognized() {
		assert_eq!(parse_directive("org", Some("$100"), &pos()).unwrap(), Some(Directive::Org("$100".to_string())));
	}
}
