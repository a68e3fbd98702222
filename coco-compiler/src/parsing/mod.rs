//! Source reading and statement parsing.
//!
//! A source file becomes a flat list of [`SourceLine`]s (after `INCLUDE`
//! expansion), then a flat list of [`Statement`]s (one per line, label plus
//! body), ready for the two-pass driver in [`crate::core`].

pub mod directives;
pub mod expressions;
pub mod parser;

pub use directives::Directive;
pub use parser::{ParsedLine, classify_operand, split_line};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::CompleteInstruction;

/// One physical line of source, tagged with the file/line it came from.
#[derive(Debug, Clone)]
pub struct SourceLine {
	pub pos: SourcePos,
	pub text: String,
}

/// Read `path` as a flat line list, expanding `INCLUDE "path"` by textual
/// substitution. Included paths are resolved relative to the including
/// file's own directory; a file that (directly or transitively) includes
/// itself is an [`AssemblyError::IncludeCycle`].
pub fn read_source(path: &Path) -> AssemblyResult<Vec<SourceLine>> {
	let mut stack = HashSet::new();
	let mut out = Vec::new();
	read_source_into(path, &mut stack, &mut out)?;
	Ok(out)
}

fn read_source_into(
	path: &Path,
	stack: &mut HashSet<PathBuf>,
	out: &mut Vec<SourceLine>,
) -> AssemblyResult<()> {
	let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
	if !stack.insert(canonical.clone()) {
		return Err(AssemblyError::include_cycle(SourcePos::unknown(), path.to_path_buf()));
	}
	let contents = std::fs::read_to_string(path)
		.map_err(|e| AssemblyError::io(SourcePos::new(path.to_path_buf(), 0, 0), e))?;
	let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

	for (idx, line) in contents.lines().enumerate() {
		let pos = SourcePos::new(path.to_path_buf(), idx + 1, 1);
		if let Some(include_path) = parse_include_directive(line) {
			let resolved =
				if include_path.is_absolute() { include_path } else { dir.join(include_path) };
			read_source_into(&resolved, stack, out)?;
			continue;
		}
		out.push(SourceLine { pos, text: line.to_string() });
	}

	stack.remove(&canonical);
	Ok(())
}

fn parse_include_directive(line: &str) -> Option<PathBuf> {
	let code = match line.find(';') {
		Some(idx) => &line[..idx],
		None => line,
	};
	let mut tokens = code.split_whitespace();
	let first = tokens.next()?;
	if !first.eq_ignore_ascii_case("INCLUDE") {
		return None;
	}
	let raw = tokens.next()?;
	Some(PathBuf::from(raw.trim_matches('"')))
}

/// A directive or machine instruction, as classified by the parser. Empty
/// bodies (label-only or comment-only lines) carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementBody {
	Instruction(CompleteInstruction),
	Directive(Directive),
	Empty,
}

/// A single parsed source statement, prior to address assignment.
#[derive(Debug, Clone)]
pub struct Statement {
	pub pos: SourcePos,
	pub label: Option<String>,
	pub body: StatementBody,
	pub comment: Option<String>,
	pub raw_text: String,
}

/// Parse one [`SourceLine`] into a [`Statement`].
pub fn parse_statement(line: &SourceLine) -> AssemblyResult<Statement> {
	let parsed = split_line(&line.text);
	let body = match &parsed.mnemonic {
		None => StatementBody::Empty,
		Some(mnemonic) => {
			if let Some(directive) =
				directives::parse_directive(mnemonic, parsed.operand_text.as_deref(), &line.pos)?
			{
				StatementBody::Directive(directive)
			} else {
				let mnemonic = crate::instructions::Mnemonic::from_name(mnemonic).ok_or_else(|| {
					AssemblyError::syntax(line.pos.clone(), format!("unknown mnemonic '{mnemonic}'"))
				})?;
				let operand = classify_operand(mnemonic, parsed.operand_text.as_deref(), &line.pos)?;
				crate::instructions::validation::validate(mnemonic, &operand, &line.pos)?;
				StatementBody::Instruction(CompleteInstruction { mnemonic, operand, pos: line.pos.clone() })
			}
		}
	};
	Ok(Statement {
		pos: line.pos.clone(),
		label: parsed.label,
		body,
		comment: parsed.comment,
		raw_text: line.text.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn include_directive_is_recognized_by_first_token() {
		assert_eq!(parse_include_directive("  INCLUDE \"foo.asm\""), Some(PathBuf::from("foo.asm")));
		assert_eq!(parse_include_directive("LDA #5"), None);
	}

	#[test]
	fn parse_statement_classifies_a_label_and_instruction() {
		let line =
			SourceLine { pos: SourcePos::new(PathBuf::from("t.asm"), 1, 1), text: "START LDA #65".to_string() };
		let stmt = parse_statement(&line).unwrap();
		assert_eq!(stmt.label.as_deref(), Some("START"));
		assert!(matches!(stmt.body, StatementBody::Instruction(_)));
	}

	#[test]
	fn parse_statement_recognizes_a_directive() {
		let line = SourceLine { pos: SourcePos::new(PathBuf::from("t.asm"), 1, 1), text: " ORG $0E00".to_string() };
		let stmt = parse_statement(&line).unwrap();
		assert!(matches!(stmt.body, StatementBody::Directive(Directive::Org(_))));
	}

	#[test]
	fn unknown_mnemonic_is_a_syntax_error() {
		let line = SourceLine { pos: SourcePos::new(PathBuf::from("t.asm"), 1, 1), text: " FROB #1".to_string() };
		let err = parse_statement(&line);
		assert!(matches!(err, Err(AssemblyError::SyntaxError { .. })));
	}
}
