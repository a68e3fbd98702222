//! Operand resolution and instruction encoding for the 6809.
//!
//! The two passes share this module but call it differently: pass 1 wants
//! only a byte count ([`sized`]), sizing unresolved forward references
//! pessimistically (Extended rather than Direct, 16-bit rather than 5-bit);
//! pass 2 wants the final bytes ([`encode`]) and treats anything still
//! unresolved as a hard error.
//!
//! [`expressions::evaluate`] already guarantees that an unresolved symbol
//! only ever comes back as `Ok(None)` when the pass is [`EvalContext::First`]
//! -- during the final pass it is a hard `Err` instead. Every branch below
//! can therefore treat `None` purely as "pass 1, placeholder bytes".

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::parsing::expressions::{self, EvalContext, EvalOutcome};
use crate::symbols::SymbolTable;

use super::addressing::{AddressingModeFamily, IndexRegister, IndexedOffsetForm, OperandSize};
use super::opcodes::{Mnemonic, opcode_for};
use super::{CompleteInstruction, IndexedOffsetSyntax, OperandSyntax, RegisterPairMember, StackRegister};

/// Context an encode/size call runs in: which pass, and the policy knobs
/// that only matter for pass 2's strictness.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext {
	pub address: u16,
	pub direct_page: u8,
	pub pass: EvalContext,
	pub truncate_on_overflow: bool,
	/// Set by the driver when pass 1 sized this statement's `DirectOrExtended`,
	/// indexed-constant, or program-counter-relative operand against an
	/// *unresolved* forward reference, and therefore assumed the larger form
	/// (Extended, 16-bit constant, 16-bit displacement). Pass 2 must honor
	/// that size even once the symbol resolves to a value that would now fit
	/// a smaller form -- otherwise a statement could shrink out from under
	/// every address pass 1 already handed out after it.
	pub force_pessimistic: bool,
}

fn eval(text: &str, pos: &SourcePos, symbols: &SymbolTable, ctx: EncodeContext) -> AssemblyResult<Option<i32>> {
	match expressions::evaluate(text, pos, symbols, ctx.pass)? {
		EvalOutcome::Value(v) => Ok(Some(v)),
		EvalOutcome::Unresolved => Ok(None),
	}
}

fn fits_unsigned(value: i32, bits: u32) -> bool {
	value >= 0 && value < (1i64 << bits) as i32
}

fn fits_signed(value: i32, bits: u32) -> bool {
	let half = 1i64 << (bits - 1);
	(value as i64) >= -half && (value as i64) < half
}

fn truncate8(value: i32, pos: &SourcePos, ctx: EncodeContext) -> AssemblyResult<u8> {
	if !ctx.truncate_on_overflow && !fits_signed(value, 8) && !fits_unsigned(value, 8) {
		return Err(AssemblyError::value_out_of_range(
			pos.clone(),
			format!("value {value} does not fit an 8-bit operand"),
		));
	}
	Ok((value & 0xFF) as u8)
}

fn truncate16(value: i32, pos: &SourcePos, ctx: EncodeContext) -> AssemblyResult<u16> {
	if !ctx.truncate_on_overflow && !fits_signed(value, 16) && !fits_unsigned(value, 16) {
		return Err(AssemblyError::value_out_of_range(
			pos.clone(),
			format!("value {value} does not fit a 16-bit operand"),
		));
	}
	Ok((value & 0xFFFF) as u16)
}

/// Resolve an indexed operand's offset form to its final shape. An
/// unresolved constant is sized pessimistically as `Const16` so pass 1's
/// addresses never shrink out from under it.
fn resolve_offset_form(
	syntax: &IndexedOffsetSyntax,
	pos: &SourcePos,
	symbols: &SymbolTable,
	ctx: EncodeContext,
) -> AssemblyResult<IndexedOffsetForm> {
	Ok(match syntax {
		IndexedOffsetSyntax::Zero => IndexedOffsetForm::Zero,
		IndexedOffsetSyntax::AccumulatorA => IndexedOffsetForm::AccumulatorA,
		IndexedOffsetSyntax::AccumulatorB => IndexedOffsetForm::AccumulatorB,
		IndexedOffsetSyntax::AccumulatorD => IndexedOffsetForm::AccumulatorD,
		IndexedOffsetSyntax::PostInc1 => IndexedOffsetForm::PostInc1,
		IndexedOffsetSyntax::PostInc2 => IndexedOffsetForm::PostInc2,
		IndexedOffsetSyntax::PreDec1 => IndexedOffsetForm::PreDec1,
		IndexedOffsetSyntax::PreDec2 => IndexedOffsetForm::PreDec2,
		IndexedOffsetSyntax::Constant(text) => match eval(text, pos, symbols, ctx)? {
			None => IndexedOffsetForm::Const16(0),
			Some(v) if ctx.force_pessimistic => {
				if fits_signed(v, 16) {
					IndexedOffsetForm::Const16(v as i16)
				} else {
					return Err(AssemblyError::value_out_of_range(
						pos.clone(),
						format!("indexed offset {v} does not fit 16 bits"),
					));
				}
			}
			Some(0) => IndexedOffsetForm::Zero,
			Some(v) if fits_signed(v, 5) => IndexedOffsetForm::Const5(v as i8),
			Some(v) if fits_signed(v, 8) => IndexedOffsetForm::Const8(v as i8),
			Some(v) if fits_signed(v, 16) => IndexedOffsetForm::Const16(v as i16),
			Some(v) => {
				return Err(AssemblyError::value_out_of_range(
					pos.clone(),
					format!("indexed offset {v} does not fit 16 bits"),
				));
			}
		},
	})
}

fn index_post_byte(base: IndexRegister, form: IndexedOffsetForm, indirect: bool) -> (u8, Vec<u8>) {
	if let IndexedOffsetForm::Const5(n) = form {
		return ((base.post_byte_bits() << 5) | (n as u8 & 0x1F), Vec::new());
	}
	let rr = base.post_byte_bits() << 5;
	let code: u8 = match form {
		IndexedOffsetForm::PostInc1 => 0b00000,
		IndexedOffsetForm::PostInc2 => 0b00001,
		IndexedOffsetForm::PreDec1 => 0b00010,
		IndexedOffsetForm::PreDec2 => 0b00011,
		IndexedOffsetForm::Zero => 0b00100,
		IndexedOffsetForm::AccumulatorB => 0b00101,
		IndexedOffsetForm::AccumulatorA => 0b00110,
		IndexedOffsetForm::Const8(_) => 0b01000,
		IndexedOffsetForm::Const16(_) => 0b01001,
		IndexedOffsetForm::AccumulatorD => 0b01011,
		IndexedOffsetForm::Const5(_) => unreachable!(),
	};
	let indirect_bit = if indirect { 0x10 } else { 0 };
	let byte = 0x80 | rr | indirect_bit | code;
	let extra = match form {
		IndexedOffsetForm::Const8(n) => vec![n as u8],
		IndexedOffsetForm::Const16(n) => n.to_be_bytes().to_vec(),
		_ => Vec::new(),
	};
	(byte, extra)
}

fn pcr_post_byte(size: OperandSize, indirect: bool) -> u8 {
	let code: u8 = match size {
		OperandSize::Bit8 => 0b01100,
		OperandSize::Bit16 => 0b01101,
	};
	let indirect_bit = if indirect { 0x10 } else { 0 };
	0x80 | indirect_bit | code
}

const EXTENDED_INDIRECT_POST_BYTE: u8 = 0x9F;

fn opcode_bytes(mnemonic: Mnemonic, family: AddressingModeFamily, pos: &SourcePos) -> AssemblyResult<Vec<u8>> {
	opcode_for(mnemonic, family)
		.map(|e| e.bytes())
		.ok_or_else(|| AssemblyError::illegal_addressing_mode(pos.clone(), mnemonic.to_string(), format!("{family:?}")))
}

fn register_list_bytes(names: &[String], stack_pointer_name: &str, pos: &SourcePos) -> AssemblyResult<u8> {
	let mut byte = 0u8;
	for name in names {
		let reg = StackRegister::from_name(name, stack_pointer_name).ok_or_else(|| {
			AssemblyError::illegal_indexed_combination(
				pos.clone(),
				format!("'{name}' is not a valid register for this push/pull list"),
			)
		})?;
		byte |= reg.post_byte_bit();
	}
	Ok(byte)
}

fn register_pair_byte(a: &str, b: &str, pos: &SourcePos) -> AssemblyResult<u8> {
	let ra = RegisterPairMember::from_name(a)
		.ok_or_else(|| AssemblyError::syntax(pos.clone(), format!("'{a}' is not a valid register")))?;
	let rb = RegisterPairMember::from_name(b)
		.ok_or_else(|| AssemblyError::syntax(pos.clone(), format!("'{b}' is not a valid register")))?;
	if ra.is_16_bit() != rb.is_16_bit() {
		return Err(AssemblyError::illegal_indexed_combination(
			pos.clone(),
			format!("cannot mix an 8-bit register ({a} or {b}) with a 16-bit one"),
		));
	}
	Ok((ra.nibble() << 4) | rb.nibble())
}

/// Resolve the operand, choose a concrete opcode family, and return the full
/// instruction byte sequence, including the opcode.
pub fn encode(instr: &CompleteInstruction, symbols: &SymbolTable, ctx: EncodeContext) -> AssemblyResult<Vec<u8>> {
	let pos = &instr.pos;
	let mnemonic = instr.mnemonic;

	match &instr.operand {
		OperandSyntax::None => opcode_bytes(mnemonic, AddressingModeFamily::Inherent, pos),

		OperandSyntax::Immediate(text) => {
			let width = mnemonic.immediate_width().ok_or_else(|| {
				AssemblyError::illegal_addressing_mode(pos.clone(), mnemonic.to_string(), "immediate".to_string())
			})?;
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Immediate, pos)?;
			match (eval(text, pos, symbols, ctx)?, width) {
				(Some(v), OperandSize::Bit8) => bytes.push(truncate8(v, pos, ctx)?),
				(Some(v), OperandSize::Bit16) => bytes.extend(truncate16(v, pos, ctx)?.to_be_bytes()),
				(None, OperandSize::Bit8) => bytes.push(0),
				(None, OperandSize::Bit16) => bytes.extend([0u8, 0u8]),
			}
			Ok(bytes)
		}

		OperandSyntax::ForcedDirect(text) => {
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Direct, pos)?;
			match eval(text, pos, symbols, ctx)? {
				Some(value) => {
					let high = ((value >> 8) & 0xFF) as u8;
					if high != ctx.direct_page {
						return Err(AssemblyError::direct_page_mismatch(pos.clone(), ctx.direct_page, high));
					}
					bytes.push((value & 0xFF) as u8);
				}
				None => bytes.push(0),
			}
			Ok(bytes)
		}

		OperandSyntax::ForcedExtended(text) => {
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Extended, pos)?;
			match eval(text, pos, symbols, ctx)? {
				Some(value) => bytes.extend(truncate16(value, pos, ctx)?.to_be_bytes()),
				None => bytes.extend([0u8, 0u8]),
			}
			Ok(bytes)
		}

		OperandSyntax::DirectOrExtended(text) => match eval(text, pos, symbols, ctx)? {
			Some(value) => {
				let high = ((value >> 8) & 0xFF) as u8;
				if !ctx.force_pessimistic && high == ctx.direct_page {
					let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Direct, pos)?;
					bytes.push((value & 0xFF) as u8);
					Ok(bytes)
				} else {
					let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Extended, pos)?;
					bytes.extend(truncate16(value, pos, ctx)?.to_be_bytes());
					Ok(bytes)
				}
			}
			// Pessimistic pass-1 sizing: assume Extended, not Direct.
			None => {
				let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Extended, pos)?;
				bytes.extend([0u8, 0u8]);
				Ok(bytes)
			}
		},

		OperandSyntax::ExtendedIndirect(text) => {
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Indexed, pos)?;
			bytes.push(EXTENDED_INDIRECT_POST_BYTE);
			match eval(text, pos, symbols, ctx)? {
				Some(value) => bytes.extend(truncate16(value, pos, ctx)?.to_be_bytes()),
				None => bytes.extend([0u8, 0u8]),
			}
			Ok(bytes)
		}

		OperandSyntax::Indexed { base, offset, indirect } => {
			let form = resolve_offset_form(offset, pos, symbols, ctx)?;
			if *indirect && form.is_illegal_when_indirect() {
				return Err(AssemblyError::illegal_indexed_combination(
					pos.clone(),
					"auto increment/decrement by one is illegal when indirect".to_string(),
				));
			}
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::Indexed, pos)?;
			let (post_byte, extra) = index_post_byte(*base, form, *indirect);
			bytes.push(post_byte);
			bytes.extend(extra);
			Ok(bytes)
		}

		OperandSyntax::ProgramCounterRelative { expr, indirect } => {
			let opcode = opcode_bytes(mnemonic, AddressingModeFamily::Indexed, pos)?;
			let opcode_len = opcode.len();
			match eval(expr, pos, symbols, ctx)? {
				None => {
					// Width is not yet known; size pessimistically as 16-bit.
					let mut bytes = opcode;
					bytes.push(pcr_post_byte(OperandSize::Bit16, *indirect));
					bytes.extend([0u8, 0u8]);
					Ok(bytes)
				}
				Some(target) => {
					// The effective PC for a PCR displacement is taken right after the
					// post-byte, before the displacement field itself -- the same
					// reference point regardless of whether the 8- or 16-bit form ends
					// up chosen.
					let pc_after = ctx.address.wrapping_add((opcode_len + 1) as u16);
					let displacement = target - i32::from(pc_after);
					let mut bytes = opcode;
					if !ctx.force_pessimistic && fits_signed(displacement, 8) {
						bytes.push(pcr_post_byte(OperandSize::Bit8, *indirect));
						bytes.push(displacement as u8);
					} else {
						if !fits_signed(displacement, 16) {
							return Err(AssemblyError::value_out_of_range(
								pos.clone(),
								format!("program-counter-relative target out of range ({displacement} bytes)"),
							));
						}
						bytes.push(pcr_post_byte(OperandSize::Bit16, *indirect));
						bytes.extend((displacement as i16).to_be_bytes());
					}
					Ok(bytes)
				}
			}
		}

		OperandSyntax::Relative(text) => {
			let is_short = mnemonic.is_short_branch();
			let opcode = opcode_bytes(mnemonic, AddressingModeFamily::Relative, pos)?;
			let disp_width: u16 = if is_short { 1 } else { 2 };
			let opcode_len = opcode.len() as u16;
			match eval(text, pos, symbols, ctx)? {
				None => {
					let mut bytes = opcode;
					bytes.extend(std::iter::repeat_n(0u8, disp_width as usize));
					Ok(bytes)
				}
				Some(target) => {
					let pc_after = ctx.address.wrapping_add(opcode_len + disp_width);
					let displacement = target - i32::from(pc_after);
					let mut bytes = opcode;
					if is_short {
						if !fits_signed(displacement, 8) {
							let suggestion =
								mnemonic.long_form().map(|m| format!(", use {m}")).unwrap_or_default();
							return Err(AssemblyError::value_out_of_range(
								pos.clone(),
								format!("branch target out of range ({displacement} bytes){suggestion}"),
							));
						}
						bytes.push(displacement as u8);
					} else {
						if !fits_signed(displacement, 16) {
							return Err(AssemblyError::value_out_of_range(
								pos.clone(),
								format!("branch target out of range ({displacement} bytes)"),
							));
						}
						bytes.extend((displacement as i16).to_be_bytes());
					}
					Ok(bytes)
				}
			}
		}

		OperandSyntax::RegisterList(names) => {
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::RegisterList, pos)?;
			let stack_pointer_name = match mnemonic {
				Mnemonic::Pshu | Mnemonic::Pulu => "U",
				_ => "S",
			};
			bytes.push(register_list_bytes(names, stack_pointer_name, pos)?);
			Ok(bytes)
		}

		OperandSyntax::RegisterPair(a, b) => {
			let mut bytes = opcode_bytes(mnemonic, AddressingModeFamily::RegisterPair, pos)?;
			bytes.push(register_pair_byte(a, b, pos)?);
			Ok(bytes)
		}
	}
}

/// Compute the byte size of an instruction without fully encoding it --
/// pass 1's job.
pub fn sized(instr: &CompleteInstruction, symbols: &SymbolTable, ctx: EncodeContext) -> AssemblyResult<usize> {
	debug_assert_eq!(ctx.pass, EvalContext::First);
	Ok(encode(instr, symbols, ctx)?.len())
}
