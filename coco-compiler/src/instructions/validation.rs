//! Legality checks for 6809 instructions beyond "does this opcode exist".
//!
//! [`opcode_for`] already rejects any `(mnemonic, addressing-mode family)`
//! pair with no table row (e.g. `STA #5`). What's left here is the set of
//! combinations that are syntactically well-formed, resolve to a legal
//! family, and are *still* illegal on real hardware: indirect auto
//! inc/dec-by-one, mismatched register widths in `TFR`/`EXG`, and a `<`
//! operand whose value doesn't actually live on the current direct page.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};

use super::addressing::{AddressingModeFamily, IndexedOffsetForm};
use super::opcodes::{Mnemonic, opcode_for};
use super::{IndexedOffsetSyntax, OperandSyntax, RegisterPairMember};

/// Map an [`OperandSyntax`] to the addressing-mode family it will occupy in
/// the opcode table, for the purpose of checking the mnemonic supports it at
/// all. This mirrors [`super::encoding::encode`]'s own dispatch, but without
/// needing a resolved value -- legality never depends on the operand's
/// eventual value (direct-page fit is checked separately, at encode time,
/// since it can only be known once the symbol resolves).
fn family_of(operand: &OperandSyntax) -> AddressingModeFamily {
	match operand {
		OperandSyntax::None => AddressingModeFamily::Inherent,
		OperandSyntax::Immediate(_) => AddressingModeFamily::Immediate,
		OperandSyntax::ForcedDirect(_) => AddressingModeFamily::Direct,
		OperandSyntax::ForcedExtended(_) | OperandSyntax::DirectOrExtended(_) => AddressingModeFamily::Extended,
		OperandSyntax::ExtendedIndirect(_)
		| OperandSyntax::Indexed { .. }
		| OperandSyntax::ProgramCounterRelative { .. } => AddressingModeFamily::Indexed,
		OperandSyntax::Relative(_) => AddressingModeFamily::Relative,
		OperandSyntax::RegisterList(_) => AddressingModeFamily::RegisterList,
		OperandSyntax::RegisterPair(_, _) => AddressingModeFamily::RegisterPair,
	}
}

/// Validate that a mnemonic and its parsed operand form a legal
/// instruction. Called once per statement during pass 1, before sizing --
/// catching shape errors early means pass 1 reports them alongside other
/// parse-time diagnostics instead of failing pass 2 fail-fast.
pub fn validate(mnemonic: Mnemonic, operand: &OperandSyntax, pos: &SourcePos) -> AssemblyResult<()> {
	// `DirectOrExtended` degrades to whichever of Direct/Extended the table
	// actually supports: plenty of mnemonics, e.g. JSR, support both and an
	// unprefixed operand should resolve to either, but some (JMP has both
	// too, LEAX only Indexed) only have one. Accept it as long as at least
	// one of Direct/Extended is legal; `encode` picks the actual mode later.
	let family = family_of(operand);
	let family_ok = if matches!(operand, OperandSyntax::DirectOrExtended(_)) {
		opcode_for(mnemonic, AddressingModeFamily::Direct).is_some()
			|| opcode_for(mnemonic, AddressingModeFamily::Extended).is_some()
	} else {
		opcode_for(mnemonic, family).is_some()
	};
	if !family_ok {
		return Err(AssemblyError::illegal_addressing_mode(
			pos.clone(),
			mnemonic.to_string(),
			format!("{family:?}"),
		));
	}

	match operand {
		OperandSyntax::Indexed { offset, indirect, .. } => validate_indexed(offset, *indirect, pos),
		OperandSyntax::RegisterPair(a, b) => validate_register_pair(mnemonic, a, b, pos),
		OperandSyntax::Relative(_) => validate_branch(mnemonic, pos),
		_ => Ok(()),
	}
}

fn validate_indexed(offset: &IndexedOffsetSyntax, indirect: bool, pos: &SourcePos) -> AssemblyResult<()> {
	if !indirect {
		return Ok(());
	}
	let illegal = matches!(offset, IndexedOffsetSyntax::PostInc1 | IndexedOffsetSyntax::PreDec1);
	if illegal {
		return Err(AssemblyError::illegal_indexed_combination(
			pos.clone(),
			"auto increment/decrement by one is illegal when indirect (use ,++ or ,-- instead)".to_string(),
		));
	}
	Ok(())
}

/// Whether a resolved indexed-offset form is still legal when combined with
/// indirection. `validate_indexed` above only has the syntax available
/// (before an expression is evaluated); `encoding::encode` calls this again
/// on the resolved [`IndexedOffsetForm`] so a width that only becomes known
/// after resolution (a constant that happens to land on `PostInc1`'s form,
/// which can't actually happen, but mirrors the syntax-level check) is
/// caught the same way.
#[must_use]
pub fn is_illegal_indirect_form(form: IndexedOffsetForm) -> bool {
	form.is_illegal_when_indirect()
}

fn validate_register_pair(mnemonic: Mnemonic, a: &str, b: &str, pos: &SourcePos) -> AssemblyResult<()> {
	if !matches!(mnemonic, Mnemonic::Tfr | Mnemonic::Exg) {
		return Ok(());
	}
	let ra = RegisterPairMember::from_name(a)
		.ok_or_else(|| AssemblyError::syntax(pos.clone(), format!("'{a}' is not a valid register")))?;
	let rb = RegisterPairMember::from_name(b)
		.ok_or_else(|| AssemblyError::syntax(pos.clone(), format!("'{b}' is not a valid register")))?;
	if ra.is_16_bit() != rb.is_16_bit() {
		return Err(AssemblyError::illegal_indexed_combination(
			pos.clone(),
			format!("{mnemonic} {a},{b}: cannot mix an 8-bit register with a 16-bit one"),
		));
	}
	Ok(())
}

fn validate_branch(mnemonic: Mnemonic, pos: &SourcePos) -> AssemblyResult<()> {
	if mnemonic.is_short_branch() || mnemonic.is_long_branch() {
		Ok(())
	} else {
		Err(AssemblyError::illegal_addressing_mode(pos.clone(), mnemonic.to_string(), "relative".to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("t.asm"), 1, 1)
	}

	#[test]
	fn sta_immediate_is_rejected() {
		let operand = OperandSyntax::Immediate("5".to_string());
		let err = validate(Mnemonic::Sta, &operand, &pos());
		assert!(matches!(err, Err(AssemblyError::IllegalAddressingMode { .. })));
	}

	#[test]
	fn indirect_postinc1_is_rejected() {
		let operand = OperandSyntax::Indexed {
			base: super::super::addressing::IndexRegister::X,
			offset: IndexedOffsetSyntax::PostInc1,
			indirect: true,
		};
		let err = validate(Mnemonic::Lda, &operand, &pos());
		assert!(matches!(err, Err(AssemblyError::IllegalIndexedCombination { .. })));
	}

	#[test]
	fn indirect_postinc2_is_legal() {
		let operand = OperandSyntax::Indexed {
			base: super::super::addressing::IndexRegister::X,
			offset: IndexedOffsetSyntax::PostInc2,
			indirect: true,
		};
		assert!(validate(Mnemonic::Lda, &operand, &pos()).is_ok());
	}

	#[test]
	fn tfr_rejects_mismatched_widths() {
		let operand = OperandSyntax::RegisterPair("A".to_string(), "X".to_string());
		let err = validate(Mnemonic::Tfr, &operand, &pos());
		assert!(matches!(err, Err(AssemblyError::IllegalIndexedCombination { .. })));
	}

	#[test]
	fn tfr_accepts_matched_16_bit_pair() {
		let operand = OperandSyntax::RegisterPair("X".to_string(), "Y".to_string());
		assert!(validate(Mnemonic::Tfr, &operand, &pos()).is_ok());
	}

	#[test]
	fn direct_or_extended_accepted_when_table_has_either() {
		let operand = OperandSyntax::DirectOrExtended("LABEL".to_string());
		assert!(validate(Mnemonic::Lda, &operand, &pos()).is_ok());
	}

	#[test]
	fn leax_rejects_relative() {
		let operand = OperandSyntax::Relative("TARGET".to_string());
		let err = validate(Mnemonic::Leax, &operand, &pos());
		assert!(err.is_err());
	}
}
