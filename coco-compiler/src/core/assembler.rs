//! The two-pass driver: walks a parsed statement list twice, assigning
//! addresses and sizes in pass 1, then resolving and emitting final bytes in
//! pass 2.
//!
//! Pass 1 never emits bytes -- it only needs [`encoding::sized`] to learn how
//! many bytes a statement will eventually take, sizing any statement whose
//! width depends on a still-unresolved forward reference pessimistically (see
//! [`encoding::EncodeContext::force_pessimistic`]). That same pessimistic
//! choice is recorded per statement and threaded into pass 2, so a symbol
//! that resolves to a smaller encoding than pass 1 assumed can never shrink
//! a statement out from under addresses already handed out after it.

use std::path::Path;

use crate::config::Config;
use crate::error::{AssemblyError, AssemblyResult, ErrorCollector, SourcePos};
use crate::instructions::encoding::{self, EncodeContext};
use crate::instructions::{IndexedOffsetSyntax, OperandSyntax};
use crate::parsing::expressions::{self, EvalContext, EvalOutcome};
use crate::parsing::{self, Directive, Statement, StatementBody};
use crate::symbols::{SymbolKind, SymbolTable};
use crate::utils::Timer;

use super::image::Image;

/// One statement after pass 2: its final address and emitted bytes, still
/// carrying the original parse so the listing can recover label/mnemonic/
/// operand/comment text.
#[derive(Debug, Clone)]
pub struct AssembledStatement {
	pub statement: Statement,
	pub address: u16,
	pub bytes: Vec<u8>,
}

/// The output of a complete assembly run.
#[derive(Debug, Clone)]
pub struct AssembledProgram {
	pub statements: Vec<AssembledStatement>,
	pub symbols: SymbolTable,
	pub image: Image,
	pub program_name: Option<String>,
}

/// A statement carrying everything pass 1 learned about it: where it lands,
/// how big it is, the direct page in effect at that point, and (for
/// instructions) whether its size was pinned pessimistically.
struct SizedStatement {
	statement: Statement,
	address: u16,
	size: usize,
	direct_page: u8,
	force_pessimistic: bool,
}

/// Evaluate `text` against `symbols`, treating an unresolved reference as a
/// hard error regardless of which pass is calling -- the pseudo-ops that use
/// this (`ORG`, `EQU`, `SETDP`, `END`, `RMB`) forbid forward references by
/// definition: their pass-1 effect needs a concrete value immediately.
fn resolve_now(text: &str, pos: &SourcePos, symbols: &SymbolTable) -> AssemblyResult<i32> {
	match expressions::evaluate(text, pos, symbols, EvalContext::Final)? {
		EvalOutcome::Value(v) => Ok(v),
		EvalOutcome::Unresolved => unreachable!("EvalContext::Final never returns Unresolved"),
	}
}

fn as_u16(value: i32) -> u16 {
	(value as i64 & 0xFFFF) as u16
}

fn check_bounds(address: u16, size: usize, pos: &SourcePos) -> AssemblyResult<()> {
	if u32::from(address) + size as u32 > 0x1_0000 {
		return Err(AssemblyError::value_out_of_range(
			pos.clone(),
			format!("statement at ${address:04X} of size {size} runs past the end of the address space"),
		));
	}
	Ok(())
}

/// Whether `operand`'s size-relevant expression is still unresolved under
/// [`EvalContext::First`] -- the only three operand shapes whose encoded
/// width depends on a value that might not be known yet.
fn force_pessimistic_for(
	operand: &OperandSyntax,
	pos: &SourcePos,
	symbols: &SymbolTable,
) -> AssemblyResult<bool> {
	let text = match operand {
		OperandSyntax::DirectOrExtended(text) => text,
		OperandSyntax::Indexed { offset: IndexedOffsetSyntax::Constant(text), .. } => text,
		OperandSyntax::ProgramCounterRelative { expr, .. } => expr,
		_ => return Ok(false),
	};
	match expressions::evaluate(text, pos, symbols, EvalContext::First)? {
		EvalOutcome::Value(_) => Ok(false),
		EvalOutcome::Unresolved => Ok(true),
	}
}

struct Pass1Output {
	statements: Vec<SizedStatement>,
	symbols: SymbolTable,
	program_name: Option<String>,
	execution_address: u16,
}

fn run_pass_one(statements: Vec<Statement>, config: &Config) -> AssemblyResult<Pass1Output> {
	let mut symbols = SymbolTable::new();
	let mut pc: u16 = 0;
	let mut direct_page = config.assembly.default_direct_page;
	let mut first_origin: Option<u16> = None;
	let mut execution_address: Option<u16> = None;
	let mut program_name: Option<String> = None;
	let mut sized = Vec::with_capacity(statements.len());

	for statement in statements {
		let pos = statement.pos.clone();

		macro_rules! define_label_at_pc {
			() => {
				if let Some(label) = &statement.label {
					symbols.define(label, pc, SymbolKind::Address, pos.clone())?;
				}
			};
		}

		match &statement.body {
			StatementBody::Empty => {
				define_label_at_pc!();
				sized.push(SizedStatement { statement, address: pc, size: 0, direct_page, force_pessimistic: false });
			}

			StatementBody::Directive(directive) => match directive {
				Directive::Org(expr) => {
					let value = as_u16(resolve_now(expr, &pos, &symbols)?);
					pc = value;
					first_origin.get_or_insert(value);
					sized.push(SizedStatement { statement, address: pc, size: 0, direct_page, force_pessimistic: false });
				}
				Directive::Equ(expr) => {
					let label = statement
						.label
						.as_deref()
						.ok_or_else(|| AssemblyError::syntax(pos.clone(), "EQU requires a label"))?;
					let value = as_u16(resolve_now(expr, &pos, &symbols)?);
					symbols.define(label, value, SymbolKind::Equate, pos.clone())?;
					sized.push(SizedStatement { statement, address: pc, size: 0, direct_page, force_pessimistic: false });
				}
				Directive::Nam(name) => {
					define_label_at_pc!();
					program_name = Some(name.trim().to_string());
					sized.push(SizedStatement { statement, address: pc, size: 0, direct_page, force_pessimistic: false });
				}
				Directive::Setdp(expr) => {
					direct_page = (resolve_now(expr, &pos, &symbols)? & 0xFF) as u8;
					sized.push(SizedStatement { statement, address: pc, size: 0, direct_page, force_pessimistic: false });
				}
				Directive::End(expr) => {
					define_label_at_pc!();
					let exec = match expr {
						Some(expr) => as_u16(resolve_now(expr, &pos, &symbols)?),
						None => first_origin.unwrap_or(0),
					};
					execution_address = Some(exec);
					sized.push(SizedStatement { statement, address: pc, size: 0, direct_page, force_pessimistic: false });
					break;
				}
				Directive::Fcb(exprs) => {
					define_label_at_pc!();
					let size = exprs.len();
					check_bounds(pc, size, &pos)?;
					sized.push(SizedStatement { statement, address: pc, size, direct_page, force_pessimistic: false });
					pc += size as u16;
				}
				Directive::Fdb(exprs) => {
					define_label_at_pc!();
					let size = exprs.len() * 2;
					check_bounds(pc, size, &pos)?;
					sized.push(SizedStatement { statement, address: pc, size, direct_page, force_pessimistic: false });
					pc += size as u16;
				}
				Directive::Fcc(text) => {
					define_label_at_pc!();
					let size = text.len();
					check_bounds(pc, size, &pos)?;
					sized.push(SizedStatement { statement, address: pc, size, direct_page, force_pessimistic: false });
					pc += size as u16;
				}
				Directive::Rmb(expr) => {
					define_label_at_pc!();
					let size = as_u16(resolve_now(expr, &pos, &symbols)?) as usize;
					check_bounds(pc, size, &pos)?;
					sized.push(SizedStatement { statement, address: pc, size, direct_page, force_pessimistic: false });
					pc += size as u16;
				}
			},

			StatementBody::Instruction(instr) => {
				define_label_at_pc!();
				let force_pessimistic = force_pessimistic_for(&instr.operand, &pos, &symbols)?;
				let ctx = EncodeContext {
					address: pc,
					direct_page,
					pass: EvalContext::First,
					truncate_on_overflow: config.assembly.truncate_on_overflow,
					force_pessimistic,
				};
				let size = encoding::sized(instr, &symbols, ctx)?;
				check_bounds(pc, size, &pos)?;
				sized.push(SizedStatement { statement, address: pc, size, direct_page, force_pessimistic });
				pc += size as u16;
			}
		}
	}

	Ok(Pass1Output {
		statements: sized,
		symbols,
		program_name,
		execution_address: execution_address.unwrap_or_else(|| first_origin.unwrap_or(0)),
	})
}

fn truncated_byte(value: i32, pos: &SourcePos, truncate_on_overflow: bool) -> AssemblyResult<u8> {
	if !truncate_on_overflow
		&& !crate::utils::fits_in_bits_signed(value, 8)
		&& !crate::utils::fits_in_bits_unsigned(value, 8)
	{
		return Err(AssemblyError::value_out_of_range(pos.clone(), format!("value {value} does not fit a byte")));
	}
	Ok((value & 0xFF) as u8)
}

fn truncated_word(value: i32, pos: &SourcePos, truncate_on_overflow: bool) -> AssemblyResult<u16> {
	if !truncate_on_overflow
		&& !crate::utils::fits_in_bits_signed(value, 16)
		&& !crate::utils::fits_in_bits_unsigned(value, 16)
	{
		return Err(AssemblyError::value_out_of_range(pos.clone(), format!("value {value} does not fit a word")));
	}
	Ok((value & 0xFFFF) as u16)
}

fn emit(instr: &SizedStatement, symbols: &SymbolTable, config: &Config) -> AssemblyResult<Vec<u8>> {
	let pos = &instr.statement.pos;
	let bytes = match &instr.statement.body {
		StatementBody::Empty => Vec::new(),
		StatementBody::Directive(directive) => match directive {
			Directive::Org(_) | Directive::Equ(_) | Directive::Nam(_) | Directive::Setdp(_) | Directive::End(_) => {
				Vec::new()
			}
			Directive::Fcb(exprs) => {
				let mut bytes = Vec::with_capacity(exprs.len());
				for expr in exprs {
					let value = resolve_now(expr, pos, symbols)?;
					bytes.push(truncated_byte(value, pos, config.assembly.truncate_on_overflow)?);
				}
				bytes
			}
			Directive::Fdb(exprs) => {
				let mut bytes = Vec::with_capacity(exprs.len() * 2);
				for expr in exprs {
					let value = resolve_now(expr, pos, symbols)?;
					bytes.extend(truncated_word(value, pos, config.assembly.truncate_on_overflow)?.to_be_bytes());
				}
				bytes
			}
			Directive::Fcc(text) => text.bytes().collect(),
			Directive::Rmb(_) => vec![config.assembly.fill_value; instr.size],
		},
		StatementBody::Instruction(complete) => {
			let ctx = EncodeContext {
				address: instr.address,
				direct_page: instr.direct_page,
				pass: EvalContext::Final,
				truncate_on_overflow: config.assembly.truncate_on_overflow,
				force_pessimistic: instr.force_pessimistic,
			};
			encoding::encode(complete, symbols, ctx)?
		}
	};

	if bytes.len() != instr.size {
		return Err(AssemblyError::value_out_of_range(
			pos.clone(),
			format!(
				"statement encoded to {} bytes in pass 2 but was sized {} in pass 1",
				bytes.len(),
				instr.size
			),
		));
	}
	Ok(bytes)
}

/// Run both passes over `path`'s source (after `INCLUDE` expansion) and
/// return the assembled program. Parse errors are accumulated so a caller
/// sees every problem from one run (bounded by `config.assembly.max_errors`);
/// pass 2 is fail-fast, per the fail-fast contract on forward-reference
/// resolution.
pub fn assemble(path: &Path, config: &Config) -> AssemblyResult<AssembledProgram> {
	let lines = parsing::read_source(path)?;

	let mut collector = match config.assembly.max_errors {
		Some(max) => ErrorCollector::with_max_errors(max),
		None => ErrorCollector::new(),
	};
	let mut statements = Vec::with_capacity(lines.len());
	for line in &lines {
		match parsing::parse_statement(line) {
			Ok(statement) => statements.push(statement),
			Err(err) if !collector.push(err) => break,
			Err(_) => {}
		}
	}
	collector.into_result()?;

	let pass1 = {
		let _timer = Timer::new("pass 1");
		run_pass_one(statements, config)?
	};

	let mut image = Image::new();
	image.execution_address = pass1.execution_address;
	let mut assembled = Vec::with_capacity(pass1.statements.len());

	{
		let _timer = Timer::new("pass 2");
		for sized in pass1.statements {
			let bytes = emit(&sized, &pass1.symbols, config)?;
			if !bytes.is_empty() {
				image.write(sized.address, &bytes);
			}
			assembled.push(AssembledStatement { address: sized.address, bytes, statement: sized.statement });
		}
	}

	Ok(AssembledProgram {
		statements: assembled,
		symbols: pass1.symbols,
		image,
		program_name: pass1.program_name.or_else(|| Some(config.output.default_name.clone())),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn assemble_source(source: &str) -> AssemblyResult<AssembledProgram> {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "{source}").unwrap();
		assemble(file.path(), &Config::default())
	}

	#[test]
	fn seed_scenario_forward_reference_round_trip() {
		let program =
			assemble_source("\tORG $0E00\nSTART\tLDX #$1234\n\tJMP START\n\tEND START\n").unwrap();
		assert_eq!(program.image.flatten(), vec![0x8E, 0x12, 0x34, 0x7E, 0x0E, 0x00]);
		assert_eq!(program.symbols.value("START"), Some(0x0E00));
		assert_eq!(program.image.execution_address, 0x0E00);
	}

	#[test]
	fn seed_scenario_fcc_string() {
		let program = assemble_source("\tORG $100\n\tFCC \"AB\"\n\tEND\n").unwrap();
		assert_eq!(program.image.flatten(), vec![0x41, 0x42]);
	}

	#[test]
	fn seed_scenario_fdb_words() {
		let program = assemble_source("\tFDB $1234,$5678\n\tEND\n").unwrap();
		assert_eq!(program.image.flatten(), vec![0x12, 0x34, 0x56, 0x78]);
	}

	#[test]
	fn seed_scenario_direct_vs_extended() {
		let program = assemble_source("\tLDA #65\n\tLDA 65\n\tLDA >65\n\tEND\n").unwrap();
		assert_eq!(program.image.flatten(), vec![0x86, 0x41, 0x96, 0x41, 0xB6, 0x00, 0x41]);
	}

	#[test]
	fn seed_scenario_short_branch_out_of_range_suggests_long_form() {
		let mut source = String::from("\tBEQ FAR\n");
		for _ in 0..200 {
			source.push_str("\tNOP\n");
		}
		source.push_str("FAR\tNOP\n\tEND\n");
		let err = assemble_source(&source).unwrap_err();
		assert!(err.to_string().contains("LBEQ"));
	}

	#[test]
	fn seed_scenario_leax_program_counter_relative() {
		// TARGET is resolved via EQU before it's referenced, so pass 1 sees a
		// resolved value and doesn't force the pessimistic 16-bit PCR form.
		let program =
			assemble_source("TARGET\tEQU $1007\n\tORG $1000\n\tLEAX TARGET,PCR\n\tEND\n").unwrap();
		assert_eq!(program.image.flatten(), vec![0x30, 0x8C, 0x05]);
	}

	#[test]
	fn org_labeled_line_defines_no_symbol() {
		let program = assemble_source("HERE\tORG $200\n\tEND\n").unwrap();
		assert_eq!(program.symbols.value("HERE"), None);
	}

	#[test]
	fn end_without_an_operand_uses_first_origin_as_execution_address() {
		let program = assemble_source("\tORG $0E00\n\tNOP\n\tEND\n").unwrap();
		assert_eq!(program.image.execution_address, 0x0E00);
	}

	#[test]
	fn rmb_reserves_zero_bytes_by_default() {
		let program = assemble_source("\tORG $0\n\tRMB 3\n\tFCB 9\n\tEND\n").unwrap();
		assert_eq!(program.image.flatten(), vec![0, 0, 0, 9]);
	}

	#[test]
	fn unresolved_symbol_in_pass_two_is_an_error() {
		let err = assemble_source("\tLDA NEVER\n\tEND\n").unwrap_err();
		assert!(matches!(err, AssemblyError::UnresolvedSymbol { .. }));
	}

	#[test]
	fn duplicate_label_is_an_error() {
		let err = assemble_source("A\tNOP\nA\tNOP\n\tEND\n").unwrap_err();
		assert!(matches!(err, AssemblyError::DuplicateSymbol { .. }));
	}
}
