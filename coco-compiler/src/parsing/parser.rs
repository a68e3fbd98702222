//! Column-oriented line splitting and operand classification.
//!
//! EDTASM+ source is column-sensitive: a label must start in column 1, and
//! everything else (mnemonic, operand, comment) must not. This module turns
//! one raw source line into its four constituent fields, then classifies the
//! operand text into the addressing-mode shape the encoder eventually needs.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::addressing::IndexRegister;
use crate::instructions::opcodes::Mnemonic;
use crate::instructions::{IndexedOffsetSyntax, OperandSyntax};

/// The four fields of one source line, before the mnemonic/operand text has
/// been interpreted as a directive or instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
	pub label: Option<String>,
	pub mnemonic: Option<String>,
	pub operand_text: Option<String>,
	pub comment: Option<String>,
}

/// Split one raw source line into label/mnemonic/operand/comment fields.
///
/// A `#` in column 1 is a full-line comment. Otherwise, a `;` anywhere
/// starts a trailing comment that runs to end of line. A label is present
/// iff the line's first character is non-whitespace (column 1) and the
/// line isn't comment-only; the first whitespace-delimited token after the
/// label region (or the first token overall, if there is no label) is the
/// mnemonic, and everything after it up to the comment is the operand.
#[must_use]
pub fn split_line(text: &str) -> ParsedLine {
	if text.starts_with('#') {
		return ParsedLine::default();
	}

	let (code, comment) = match text.find(';') {
		Some(idx) => (&text[..idx], Some(text[idx + 1..].trim().to_string())),
		None => (text, None),
	};

	if code.trim().is_empty() {
		return ParsedLine { comment, ..ParsedLine::default() };
	}

	let starts_in_column_one = code.starts_with(|c: char| !c.is_whitespace());

	let label_end = if starts_in_column_one {
		code.find(char::is_whitespace).unwrap_or(code.len())
	} else {
		0
	};
	let label = if starts_in_column_one { Some(code[..label_end].to_string()) } else { None };

	let rest = code[label_end..].trim_start();
	if rest.is_empty() {
		return ParsedLine { label, comment, ..ParsedLine::default() };
	}
	let mnemonic_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
	let mnemonic = Some(rest[..mnemonic_end].to_string());
	let operand_text = {
		let trimmed = rest[mnemonic_end..].trim();
		if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
	};

	ParsedLine { label, mnemonic, operand_text, comment }
}

/// Classify a mnemonic's operand text into its syntactic addressing-mode
/// shape, per the ordered rules in the addressing-mode table: empty is
/// Inherent; `#expr` is Immediate; bracketed text with no comma is
/// ExtendedIndirect; a comma with a register and an optional `[...]` wrapper
/// is Indexed or ProgramCounterRelative; a leading `<`/`>` forces
/// Direct/Extended; an unprefixed branch mnemonic's operand is Relative;
/// push/pull/tfr/exg operands are register lists or pairs; anything else is
/// DirectOrExtended.
pub fn classify_operand(
	mnemonic: Mnemonic,
	operand_text: Option<&str>,
	pos: &SourcePos,
) -> AssemblyResult<OperandSyntax> {
	let Some(text) = operand_text else {
		return Ok(OperandSyntax::None);
	};
	let text = text.trim();
	if text.is_empty() {
		return Ok(OperandSyntax::None);
	}

	if let Some(rest) = text.strip_prefix('#') {
		return Ok(OperandSyntax::Immediate(rest.trim().to_string()));
	}

	if matches!(mnemonic, Mnemonic::Pshs | Mnemonic::Puls | Mnemonic::Pshu | Mnemonic::Pulu) {
		let names = text.split(',').map(|s| s.trim().to_string()).collect();
		return Ok(OperandSyntax::RegisterList(names));
	}

	if matches!(mnemonic, Mnemonic::Tfr | Mnemonic::Exg) {
		let mut parts = text.split(',').map(str::trim);
		let a = parts.next().ok_or_else(|| bad_operand(pos, text))?;
		let b = parts.next().ok_or_else(|| bad_operand(pos, text))?;
		return Ok(OperandSyntax::RegisterPair(a.to_string(), b.to_string()));
	}

	if let Some(inner) = bracketed(text) {
		if !inner.contains(',') {
			return Ok(OperandSyntax::ExtendedIndirect(inner.trim().to_string()));
		}
		return classify_indexed_body(inner.trim(), true, pos);
	}

	if text.contains(',') {
		return classify_indexed_body(text, false, pos);
	}

	if let Some(rest) = text.strip_prefix('<') {
		return Ok(OperandSyntax::ForcedDirect(rest.trim().to_string()));
	}
	if let Some(rest) = text.strip_prefix('>') {
		return Ok(OperandSyntax::ForcedExtended(rest.trim().to_string()));
	}

	if mnemonic.is_short_branch() || mnemonic.is_long_branch() {
		return Ok(OperandSyntax::Relative(text.to_string()));
	}

	Ok(OperandSyntax::DirectOrExtended(text.to_string()))
}

fn bracketed(text: &str) -> Option<&str> {
	let stripped = text.strip_prefix('[')?;
	stripped.strip_suffix(']')
}

fn bad_operand(pos: &SourcePos, text: &str) -> AssemblyError {
	AssemblyError::syntax(pos.clone(), format!("malformed operand '{text}'"))
}

/// Classify the body of a comma-separated indexed/PCR operand (already
/// stripped of its optional `[...]` wrapper, with `indirect` recording
/// whether that wrapper was present).
fn classify_indexed_body(body: &str, indirect: bool, pos: &SourcePos) -> AssemblyResult<OperandSyntax> {
	let comma = body.find(',').ok_or_else(|| bad_operand(pos, body))?;
	let left = body[..comma].trim();
	let right = body[comma + 1..].trim();

	if right.eq_ignore_ascii_case("PCR") {
		if left.starts_with('<') || left.starts_with('>') {
			return Err(AssemblyError::syntax(
				pos.clone(),
				"'<'/'>' cannot be combined with a PCR operand".to_string(),
			));
		}
		return Ok(OperandSyntax::ProgramCounterRelative { expr: left.to_string(), indirect });
	}

	if left.starts_with('<') || left.starts_with('>') {
		return Err(AssemblyError::syntax(
			pos.clone(),
			"'<'/'>' cannot be combined with an indexed operand".to_string(),
		));
	}

	let base = IndexRegister::from_name(right)
		.ok_or_else(|| AssemblyError::syntax(pos.clone(), format!("'{right}' is not a valid index register")))?;

	let offset = parse_offset_form(left, pos)?;
	Ok(OperandSyntax::Indexed { base, offset, indirect })
}

fn parse_offset_form(left: &str, pos: &SourcePos) -> AssemblyResult<IndexedOffsetSyntax> {
	if left.is_empty() {
		return Ok(IndexedOffsetSyntax::Zero);
	}
	if let Some(rest) = left.strip_prefix("--") {
		if !rest.is_empty() {
			return Err(bad_operand(pos, left));
		}
		return Ok(IndexedOffsetSyntax::PreDec2);
	}
	if let Some(rest) = left.strip_prefix('-') {
		if !rest.is_empty() {
			return Err(bad_operand(pos, left));
		}
		return Ok(IndexedOffsetSyntax::PreDec1);
	}
	if let Some(rest) = left.strip_suffix("++") {
		if !rest.is_empty() {
			return Err(bad_operand(pos, left));
		}
		return Ok(IndexedOffsetSyntax::PostInc2);
	}
	if let Some(rest) = left.strip_suffix('+') {
		if !rest.is_empty() {
			return Err(bad_operand(pos, left));
		}
		return Ok(IndexedOffsetSyntax::PostInc1);
	}
	match left.to_ascii_uppercase().as_str() {
		"A" => return Ok(IndexedOffsetSyntax::AccumulatorA),
		"B" => return Ok(IndexedOffsetSyntax::AccumulatorB),
		"D" => return Ok(IndexedOffsetSyntax::AccumulatorD),
		_ => {}
	}
	Ok(IndexedOffsetSyntax::Constant(left.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("t.asm"), 1, 1)
	}

	#[test]
	fn label_requires_column_one() {
		let parsed = split_line("START LDA #65");
		assert_eq!(parsed.label.as_deref(), Some("START"));
		assert_eq!(parsed.mnemonic.as_deref(), Some("LDA"));
		assert_eq!(parsed.operand_text.as_deref(), Some("#65"));
	}

	#[test]
	fn indented_line_has_no_label() {
		let parsed = split_line("   LDA #65");
		assert_eq!(parsed.label, None);
		assert_eq!(parsed.mnemonic.as_deref(), Some("LDA"));
		assert_eq!(parsed.operand_text.as_deref(), Some("#65"));
	}

	#[test]
	fn trailing_comment_is_split_off() {
		let parsed = split_line("   LDA #65  ; load it");
		assert_eq!(parsed.operand_text.as_deref(), Some("#65"));
		assert_eq!(parsed.comment.as_deref(), Some("load it"));
	}

	#[test]
	fn hash_in_column_one_is_a_full_line_comment() {
		let parsed = split_line("# a comment, not a directive");
		assert_eq!(parsed, ParsedLine::default());
	}

	#[test]
	fn comment_only_line_has_no_mnemonic() {
		let parsed = split_line("; just a comment");
		assert_eq!(parsed.mnemonic, None);
		assert_eq!(parsed.comment.as_deref(), Some("just a comment"));
	}

	#[test]
	fn blank_line_splits_to_nothing() {
		assert_eq!(split_line(""), ParsedLine::default());
		assert_eq!(split_line("   "), ParsedLine::default());
	}

	#[test]
	fn label_only_line_has_no_mnemonic() {
		let parsed = split_line("START");
		assert_eq!(parsed.label.as_deref(), Some("START"));
		assert_eq!(parsed.mnemonic, None);
	}

	#[test]
	fn empty_operand_is_inherent() {
		let operand = classify_operand(Mnemonic::Nop, None, &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::None);
	}

	#[test]
	fn immediate_operand_strips_hash() {
		let operand = classify_operand(Mnemonic::Lda, Some("#65"), &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::Immediate("65".to_string()));
	}

	#[test]
	fn bracketed_no_comma_is_extended_indirect() {
		let operand = classify_operand(Mnemonic::Jmp, Some("[TARGET]"), &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::ExtendedIndirect("TARGET".to_string()));
	}

	#[test]
	fn indexed_zero_offset() {
		let operand = classify_operand(Mnemonic::Lda, Some(",X"), &pos()).unwrap();
		assert_eq!(
			operand,
			OperandSyntax::Indexed { base: IndexRegister::X, offset: IndexedOffsetSyntax::Zero, indirect: false }
		);
	}

	#[test]
	fn indexed_postinc_forms() {
		assert_eq!(
			classify_operand(Mnemonic::Lda, Some(",X+"), &pos()).unwrap(),
			OperandSyntax::Indexed { base: IndexRegister::X, offset: IndexedOffsetSyntax::PostInc1, indirect: false }
		);
		assert_eq!(
			classify_operand(Mnemonic::Lda, Some(",X++"), &pos()).unwrap(),
			OperandSyntax::Indexed { base: IndexRegister::X, offset: IndexedOffsetSyntax::PostInc2, indirect: false }
		);
		assert_eq!(
			classify_operand(Mnemonic::Lda, Some(",-X"), &pos()).unwrap(),
			OperandSyntax::Indexed { base: IndexRegister::X, offset: IndexedOffsetSyntax::PreDec1, indirect: false }
		);
		assert_eq!(
			classify_operand(Mnemonic::Lda, Some(",--X"), &pos()).unwrap(),
			OperandSyntax::Indexed { base: IndexRegister::X, offset: IndexedOffsetSyntax::PreDec2, indirect: false }
		);
	}

	#[test]
	fn indexed_constant_offset() {
		let operand = classify_operand(Mnemonic::Lda, Some("5,Y"), &pos()).unwrap();
		assert_eq!(
			operand,
			OperandSyntax::Indexed {
				base: IndexRegister::Y,
				offset: IndexedOffsetSyntax::Constant("5".to_string()),
				indirect: false
			}
		);
	}

	#[test]
	fn indexed_indirect_bracketed() {
		let operand = classify_operand(Mnemonic::Lda, Some("[5,Y]"), &pos()).unwrap();
		assert_eq!(
			operand,
			OperandSyntax::Indexed {
				base: IndexRegister::Y,
				offset: IndexedOffsetSyntax::Constant("5".to_string()),
				indirect: true
			}
		);
	}

	#[test]
	fn program_counter_relative() {
		let operand = classify_operand(Mnemonic::Leax, Some("TARGET,PCR"), &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::ProgramCounterRelative { expr: "TARGET".to_string(), indirect: false });
	}

	#[test]
	fn forced_direct_and_extended_prefixes() {
		assert_eq!(
			classify_operand(Mnemonic::Lda, Some("<FOO"), &pos()).unwrap(),
			OperandSyntax::ForcedDirect("FOO".to_string())
		);
		assert_eq!(
			classify_operand(Mnemonic::Lda, Some(">FOO"), &pos()).unwrap(),
			OperandSyntax::ForcedExtended("FOO".to_string())
		);
	}

	#[test]
	fn forced_prefix_on_indexed_operand_is_rejected() {
		let err = classify_operand(Mnemonic::Lda, Some("<5,Y"), &pos());
		assert!(matches!(err, Err(AssemblyError::SyntaxError { .. })));
	}

	#[test]
	fn branch_mnemonic_operand_is_relative() {
		let operand = classify_operand(Mnemonic::Beq, Some("TARGET"), &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::Relative("TARGET".to_string()));
	}

	#[test]
	fn unprefixed_non_branch_operand_is_direct_or_extended() {
		let operand = classify_operand(Mnemonic::Lda, Some("TARGET"), &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::DirectOrExtended("TARGET".to_string()));
	}

	#[test]
	fn pshs_operand_is_a_register_list() {
		let operand = classify_operand(Mnemonic::Pshs, Some("A,B,X"), &pos()).unwrap();
		assert_eq!(
			operand,
			OperandSyntax::RegisterList(vec!["A".to_string(), "B".to_string(), "X".to_string()])
		);
	}

	#[test]
	fn tfr_operand_is_a_register_pair() {
		let operand = classify_operand(Mnemonic::Tfr, Some("X,Y"), &pos()).unwrap();
		assert_eq!(operand, OperandSyntax::RegisterPair("X".to_string(), "Y".to_string()));
	}

	#[test]
	fn fcc_operand_with_embedded_space_is_not_resplit() {
		let parsed = split_line("   FCC \"A B\"");
		assert_eq!(parsed.operand_text.as_deref(), Some("\"A B\""));
	}
}
