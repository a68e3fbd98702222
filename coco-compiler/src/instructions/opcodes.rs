//! The 6809 mnemonic set and its opcode table.
//!
//! Mnemonic legality and encoding are driven entirely by [`OPCODE_TABLE`]:
//! a flat list of `(mnemonic, addressing-mode family, optional page prefix,
//! opcode byte)` rows. A mnemonic/family pair with no row is simply not a
//! legal combination -- [`opcode_for`] returning `None` is how
//! [`super::validation`] rejects e.g. `STA #5`.

use std::fmt;
use std::str::FromStr;

use super::addressing::AddressingModeFamily;

/// Every mnemonic the assembler recognizes. Register-qualified inherent
/// forms (`NEGA`/`NEGB`, `CLRA`/`CLRB`, ...) are distinct variants because
/// they are, on real hardware, distinct one-byte opcodes rather than a
/// shared mnemonic with a register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::enum_variant_names)]
pub enum Mnemonic {
	// Inherent only.
	Nop,
	Sync,
	Rti,
	Rts,
	Daa,
	Sex,
	Abx,
	Mul,
	Swi,
	Swi2,
	Swi3,

	// Register-qualified inherent read-modify-write.
	Nega,
	Negb,
	Coma,
	Comb,
	Lsra,
	Lsrb,
	Rora,
	Rorb,
	Asra,
	Asrb,
	Asla,
	Aslb,
	Rola,
	Rolb,
	Deca,
	Decb,
	Inca,
	Incb,
	Tsta,
	Tstb,
	Clra,
	Clrb,

	// Memory read-modify-write (Direct/Indexed/Extended).
	Neg,
	Com,
	Lsr,
	Ror,
	Asr,
	Asl,
	Rol,
	Dec,
	Inc,
	Tst,
	Jmp,
	Clr,

	// Load effective address (Indexed only).
	Leax,
	Leay,
	Leau,
	Leas,

	// Stack push/pull (RegisterList).
	Pshs,
	Puls,
	Pshu,
	Pulu,

	// Short branches.
	Bra,
	Brn,
	Bhi,
	Bls,
	Bcc,
	Bcs,
	Bne,
	Beq,
	Bvc,
	Bvs,
	Bpl,
	Bmi,
	Bge,
	Blt,
	Bgt,
	Ble,
	Bsr,

	// Long branches.
	Lbra,
	Lbrn,
	Lbhi,
	Lbls,
	Lbcc,
	Lbcs,
	Lbne,
	Lbeq,
	Lbvc,
	Lbvs,
	Lbpl,
	Lbmi,
	Lbge,
	Lblt,
	Lbgt,
	Lble,
	Lbsr,

	// Accumulator A (Immediate8/Direct/Indexed/Extended).
	Suba,
	Cmpa,
	Sbca,
	Anda,
	Bita,
	Lda,
	Eora,
	Adca,
	Ora,
	Adda,
	Sta,

	// Accumulator B (Immediate8/Direct/Indexed/Extended).
	Subb,
	Cmpb,
	Sbcb,
	Andb,
	Bitb,
	Ldb,
	Eorb,
	Adcb,
	Orb,
	Addb,
	Stb,

	// 16-bit registers (Immediate16/Direct/Indexed/Extended).
	Subd,
	Addd,
	Cmpx,
	Cmpy,
	Cmpd,
	Cmpu,
	Cmps,
	Ldx,
	Ldy,
	Ldd,
	Ldu,
	Lds,
	Stx,
	Sty,
	Std,
	Stu,
	Sts,

	Jsr,

	Tfr,
	Exg,

	Andcc,
	Orcc,
	Cwai,
}

impl Mnemonic {
	/// All recognized spellings, including the `BHS`/`BLO`/`LBHS`/`LBLO`
	/// aliases for `BCC`/`BCS`/`LBCC`/`LBCS`.
	#[must_use]
	pub fn from_name(name: &str) -> Option<Self> {
		let m = match name.to_ascii_uppercase().as_str() {
			"NOP" => Self::Nop,
			"SYNC" => Self::Sync,
			"RTI" => Self::Rti,
			"RTS" => Self::Rts,
			"DAA" => Self::Daa,
			"SEX" => Self::Sex,
			"ABX" => Self::Abx,
			"MUL" => Self::Mul,
			"SWI" => Self::Swi,
			"SWI2" => Self::Swi2,
			"SWI3" => Self::Swi3,

			"NEGA" => Self::Nega,
			"NEGB" => Self::Negb,
			"COMA" => Self::Coma,
			"COMB" => Self::Comb,
			"LSRA" => Self::Lsra,
			"LSRB" => Self::Lsrb,
			"RORA" => Self::Rora,
			"RORB" => Self::Rorb,
			"ASRA" => Self::Asra,
			"ASRB" => Self::Asrb,
			"ASLA" | "LSLA" => Self::Asla,
			"ASLB" | "LSLB" => Self::Aslb,
			"ROLA" => Self::Rola,
			"ROLB" => Self::Rolb,
			"DECA" => Self::Deca,
			"DECB" => Self::Decb,
			"INCA" => Self::Inca,
			"INCB" => Self::Incb,
			"TSTA" => Self::Tsta,
			"TSTB" => Self::Tstb,
			"CLRA" => Self::Clra,
			"CLRB" => Self::Clrb,

			"NEG" => Self::Neg,
			"COM" => Self::Com,
			"LSR" => Self::Lsr,
			"ROR" => Self::Ror,
			"ASR" => Self::Asr,
			"ASL" | "LSL" => Self::Asl,
			"ROL" => Self::Rol,
			"DEC" => Self::Dec,
			"INC" => Self::Inc,
			"TST" => Self::Tst,
			"JMP" => Self::Jmp,
			"CLR" => Self::Clr,

			"LEAX" => Self::Leax,
			"LEAY" => Self::Leay,
			"LEAU" => Self::Leau,
			"LEAS" => Self::Leas,

			"PSHS" => Self::Pshs,
			"PULS" => Self::Puls,
			"PSHU" => Self::Pshu,
			"PULU" => Self::Pulu,

			"BRA" => Self::Bra,
			"BRN" => Self::Brn,
			"BHI" => Self::Bhi,
			"BLS" => Self::Bls,
			"BCC" | "BHS" => Self::Bcc,
			"BCS" | "BLO" => Self::Bcs,
			"BNE" => Self::Bne,
			"BEQ" => Self::Beq,
			"BVC" => Self::Bvc,
			"BVS" => Self::Bvs,
			"BPL" => Self::Bpl,
			"BMI" => Self::Bmi,
			"BGE" => Self::Bge,
			"BLT" => Self::Blt,
			"BGT" => Self::Bgt,
			"BLE" => Self::Ble,
			"BSR" => Self::Bsr,

			"LBRA" => Self::Lbra,
			"LBRN" => Self::Lbrn,
			"LBHI" => Self::Lbhi,
			"LBLS" => Self::Lbls,
			"LBCC" | "LBHS" => Self::Lbcc,
			"LBCS" | "LBLO" => Self::Lbcs,
			"LBNE" => Self::Lbne,
			"LBEQ" => Self::Lbeq,
			"LBVC" => Self::Lbvc,
			"LBVS" => Self::Lbvs,
			"LBPL" => Self::Lbpl,
			"LBMI" => Self::Lbmi,
			"LBGE" => Self::Lbge,
			"LBLT" => Self::Lblt,
			"LBGT" => Self::Lbgt,
			"LBLE" => Self::Lble,
			"LBSR" => Self::Lbsr,

			"SUBA" => Self::Suba,
			"CMPA" => Self::Cmpa,
			"SBCA" => Self::Sbca,
			"ANDA" => Self::Anda,
			"BITA" => Self::Bita,
			"LDA" => Self::Lda,
			"EORA" => Self::Eora,
			"ADCA" => Self::Adca,
			"ORA" => Self::Ora,
			"ADDA" => Self::Adda,
			"STA" => Self::Sta,

			"SUBB" => Self::Subb,
			"CMPB" => Self::Cmpb,
			"SBCB" => Self::Sbcb,
			"ANDB" => Self::Andb,
			"BITB" => Self::Bitb,
			"LDB" => Self::Ldb,
			"EORB" => Self::Eorb,
			"ADCB" => Self::Adcb,
			"ORB" => Self::Orb,
			"ADDB" => Self::Addb,
			"STB" => Self::Stb,

			"SUBD" => Self::Subd,
			"ADDD" => Self::Addd,
			"CMPX" => Self::Cmpx,
			"CMPY" => Self::Cmpy,
			"CMPD" => Self::Cmpd,
			"CMPU" => Self::Cmpu,
			"CMPS" => Self::Cmps,
			"LDX" => Self::Ldx,
			"LDY" => Self::Ldy,
			"LDD" => Self::Ldd,
			"LDU" => Self::Ldu,
			"LDS" => Self::Lds,
			"STX" => Self::Stx,
			"STY" => Self::Sty,
			"STD" => Self::Std,
			"STU" => Self::Stu,
			"STS" => Self::Sts,

			"JSR" => Self::Jsr,

			"TFR" => Self::Tfr,
			"EXG" => Self::Exg,

			"ANDCC" => Self::Andcc,
			"ORCC" => Self::Orcc,
			"CWAI" => Self::Cwai,

			_ => return None,
		};
		Some(m)
	}

	/// Whether this mnemonic is a short (8-bit displacement) conditional or
	/// unconditional branch.
	#[must_use]
	pub fn is_short_branch(self) -> bool {
		matches!(
			self,
			Self::Bra
				| Self::Brn | Self::Bhi
				| Self::Bls | Self::Bcc
				| Self::Bcs | Self::Bne
				| Self::Beq | Self::Bvc
				| Self::Bvs | Self::Bpl
				| Self::Bmi | Self::Bge
				| Self::Blt | Self::Bgt
				| Self::Ble | Self::Bsr
		)
	}

	/// Whether this mnemonic is a long (16-bit displacement) conditional or
	/// unconditional branch.
	#[must_use]
	pub fn is_long_branch(self) -> bool {
		matches!(
			self,
			Self::Lbra
				| Self::Lbrn | Self::Lbhi
				| Self::Lbls | Self::Lbcc
				| Self::Lbcs | Self::Lbne
				| Self::Lbeq | Self::Lbvc
				| Self::Lbvs | Self::Lbpl
				| Self::Lbmi | Self::Lbge
				| Self::Lblt | Self::Lbgt
				| Self::Lble | Self::Lbsr
		)
	}

	/// The short-branch mnemonic corresponding to this long branch, for
	/// displacement-overflow diagnostics ("value out of range for BEQ, use LBEQ").
	#[must_use]
	pub fn short_form(self) -> Option<Self> {
		let m = match self {
			Self::Lbra => Self::Bra,
			Self::Lbrn => Self::Brn,
			Self::Lbhi => Self::Bhi,
			Self::Lbls => Self::Bls,
			Self::Lbcc => Self::Bcc,
			Self::Lbcs => Self::Bcs,
			Self::Lbne => Self::Bne,
			Self::Lbeq => Self::Beq,
			Self::Lbvc => Self::Bvc,
			Self::Lbvs => Self::Bvs,
			Self::Lbpl => Self::Bpl,
			Self::Lbmi => Self::Bmi,
			Self::Lbge => Self::Bge,
			Self::Lblt => Self::Blt,
			Self::Lbgt => Self::Bgt,
			Self::Lble => Self::Ble,
			Self::Lbsr => Self::Bsr,
			_ => return None,
		};
		Some(m)
	}

	/// The long-branch mnemonic corresponding to this short branch, used to
	/// word a "use LBxx" diagnostic when a short displacement overflows.
	#[must_use]
	pub fn long_form(self) -> Option<Self> {
		let m = match self {
			Self::Bra => Self::Lbra,
			Self::Brn => Self::Lbrn,
			Self::Bhi => Self::Lbhi,
			Self::Bls => Self::Lbls,
			Self::Bcc => Self::Lbcc,
			Self::Bcs => Self::Lbcs,
			Self::Bne => Self::Lbne,
			Self::Beq => Self::Lbeq,
			Self::Bvc => Self::Lbvc,
			Self::Bvs => Self::Lbvs,
			Self::Bpl => Self::Lbpl,
			Self::Bmi => Self::Lbmi,
			Self::Bge => Self::Lbge,
			Self::Blt => Self::Lblt,
			Self::Bgt => Self::Lbgt,
			Self::Ble => Self::Lble,
			Self::Bsr => Self::Lbsr,
			_ => return None,
		};
		Some(m)
	}

	/// The operand width for mnemonics that accept an immediate operand,
	/// `None` if this mnemonic has no immediate form at all.
	#[must_use]
	pub fn immediate_width(self) -> Option<super::addressing::OperandSize> {
		use super::addressing::OperandSize::{Bit8, Bit16};
		match self {
			Self::Suba
			| Self::Cmpa
			| Self::Sbca
			| Self::Anda
			| Self::Bita
			| Self::Lda
			| Self::Eora
			| Self::Adca
			| Self::Ora
			| Self::Adda
			| Self::Subb
			| Self::Cmpb
			| Self::Sbcb
			| Self::Andb
			| Self::Bitb
			| Self::Ldb
			| Self::Eorb
			| Self::Adcb
			| Self::Orb
			| Self::Addb
			| Self::Andcc
			| Self::Orcc
			| Self::Cwai => Some(Bit8),
			Self::Subd
			| Self::Addd
			| Self::Cmpx
			| Self::Cmpy
			| Self::Cmpd
			| Self::Cmpu
			| Self::Cmps
			| Self::Ldx
			| Self::Ldy
			| Self::Ldd
			| Self::Ldu
			| Self::Lds => Some(Bit16),
			_ => None,
		}
	}
}

impl fmt::Display for Mnemonic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", format!("{self:?}").to_ascii_uppercase())
	}
}

impl FromStr for Mnemonic {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_name(s).ok_or(())
	}
}

/// A mnemonic's opcode, as a 1- or 2-byte sequence (the second byte present
/// only for `$10`/`$11` page-prefixed instructions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEncoding {
	pub prefix: Option<u8>,
	pub opcode: u8,
}

impl OpcodeEncoding {
	#[must_use]
	pub fn bytes(self) -> Vec<u8> {
		match self.prefix {
			Some(p) => vec![p, self.opcode],
			None => vec![self.opcode],
		}
	}
}

const fn row(mnemonic: Mnemonic, family: AddressingModeFamily, prefix: Option<u8>, opcode: u8) -> (Mnemonic, AddressingModeFamily, Option<u8>, u8) {
	(mnemonic, family, prefix, opcode)
}

/// The full opcode table: every legal `(mnemonic, addressing-mode family)`
/// pair, with its opcode bytes. Table layout mirrors the Motorola 6809
/// programming reference's instruction groupings.
pub static OPCODE_TABLE: &[(Mnemonic, AddressingModeFamily, Option<u8>, u8)] = &[
	// Inherent only.
	row(Mnemonic::Nop, AddressingModeFamily::Inherent, None, 0x12),
	row(Mnemonic::Sync, AddressingModeFamily::Inherent, None, 0x13),
	row(Mnemonic::Rti, AddressingModeFamily::Inherent, None, 0x3B),
	row(Mnemonic::Rts, AddressingModeFamily::Inherent, None, 0x39),
	row(Mnemonic::Daa, AddressingModeFamily::Inherent, None, 0x19),
	row(Mnemonic::Sex, AddressingModeFamily::Inherent, None, 0x1D),
	row(Mnemonic::Abx, AddressingModeFamily::Inherent, None, 0x3A),
	row(Mnemonic::Mul, AddressingModeFamily::Inherent, None, 0x3D),
	row(Mnemonic::Swi, AddressingModeFamily::Inherent, None, 0x3F),
	row(Mnemonic::Swi2, AddressingModeFamily::Inherent, Some(0x10), 0x3F),
	row(Mnemonic::Swi3, AddressingModeFamily::Inherent, Some(0x11), 0x3F),

	// Register-qualified inherent read-modify-write.
	row(Mnemonic::Nega, AddressingModeFamily::Inherent, None, 0x40),
	row(Mnemonic::Negb, AddressingModeFamily::Inherent, None, 0x50),
	row(Mnemonic::Coma, AddressingModeFamily::Inherent, None, 0x43),
	row(Mnemonic::Comb, AddressingModeFamily::Inherent, None, 0x53),
	row(Mnemonic::Lsra, AddressingModeFamily::Inherent, None, 0x44),
	row(Mnemonic::Lsrb, AddressingModeFamily::Inherent, None, 0x54),
	row(Mnemonic::Rora, AddressingModeFamily::Inherent, None, 0x46),
	row(Mnemonic::Rorb, AddressingModeFamily::Inherent, None, 0x56),
	row(Mnemonic::Asra, AddressingModeFamily::Inherent, None, 0x47),
	row(Mnemonic::Asrb, AddressingModeFamily::Inherent, None, 0x57),
	row(Mnemonic::Asla, AddressingModeFamily::Inherent, None, 0x48),
	row(Mnemonic::Aslb, AddressingModeFamily::Inherent, None, 0x58),
	row(Mnemonic::Rola, AddressingModeFamily::Inherent, None, 0x49),
	row(Mnemonic::Rolb, AddressingModeFamily::Inherent, None, 0x59),
	row(Mnemonic::Deca, AddressingModeFamily::Inherent, None, 0x4A),
	row(Mnemonic::Decb, AddressingModeFamily::Inherent, None, 0x5A),
	row(Mnemonic::Inca, AddressingModeFamily::Inherent, None, 0x4C),
	row(Mnemonic::Incb, AddressingModeFamily::Inherent, None, 0x5C),
	row(Mnemonic::Tsta, AddressingModeFamily::Inherent, None, 0x4D),
	row(Mnemonic::Tstb, AddressingModeFamily::Inherent, None, 0x5D),
	row(Mnemonic::Clra, AddressingModeFamily::Inherent, None, 0x4F),
	row(Mnemonic::Clrb, AddressingModeFamily::Inherent, None, 0x5F),

	// Memory read-modify-write.
	row(Mnemonic::Neg, AddressingModeFamily::Direct, None, 0x00),
	row(Mnemonic::Neg, AddressingModeFamily::Indexed, None, 0x60),
	row(Mnemonic::Neg, AddressingModeFamily::Extended, None, 0x70),
	row(Mnemonic::Com, AddressingModeFamily::Direct, None, 0x03),
	row(Mnemonic::Com, AddressingModeFamily::Indexed, None, 0x63),
	row(Mnemonic::Com, AddressingModeFamily::Extended, None, 0x73),
	row(Mnemonic::Lsr, AddressingModeFamily::Direct, None, 0x04),
	row(Mnemonic::Lsr, AddressingModeFamily::Indexed, None, 0x64),
	row(Mnemonic::Lsr, AddressingModeFamily::Extended, None, 0x74),
	row(Mnemonic::Ror, AddressingModeFamily::Direct, None, 0x06),
	row(Mnemonic::Ror, AddressingModeFamily::Indexed, None, 0x66),
	row(Mnemonic::Ror, AddressingModeFamily::Extended, None, 0x76),
	row(Mnemonic::Asr, AddressingModeFamily::Direct, None, 0x07),
	row(Mnemonic::Asr, AddressingModeFamily::Indexed, None, 0x67),
	row(Mnemonic::Asr, AddressingModeFamily::Extended, None, 0x77),
	row(Mnemonic::Asl, AddressingModeFamily::Direct, None, 0x08),
	row(Mnemonic::Asl, AddressingModeFamily::Indexed, None, 0x68),
	row(Mnemonic::Asl, AddressingModeFamily::Extended, None, 0x78),
	row(Mnemonic::Rol, AddressingModeFamily::Direct, None, 0x09),
	row(Mnemonic::Rol, AddressingModeFamily::Indexed, None, 0x69),
	row(Mnemonic::Rol, AddressingModeFamily::Extended, None, 0x79),
	row(Mnemonic::Dec, AddressingModeFamily::Direct, None, 0x0A),
	row(Mnemonic::Dec, AddressingModeFamily::Indexed, None, 0x6A),
	row(Mnemonic::Dec, AddressingModeFamily::Extended, None, 0x7A),
	row(Mnemonic::Inc, AddressingModeFamily::Direct, None, 0x0C),
	row(Mnemonic::Inc, AddressingModeFamily::Indexed, None, 0x6C),
	row(Mnemonic::Inc, AddressingModeFamily::Extended, None, 0x7C),
	row(Mnemonic::Tst, AddressingModeFamily::Direct, None, 0x0D),
	row(Mnemonic::Tst, AddressingModeFamily::Indexed, None, 0x6D),
	row(Mnemonic::Tst, AddressingModeFamily::Extended, None, 0x7D),
	row(Mnemonic::Jmp, AddressingModeFamily::Direct, None, 0x0E),
	row(Mnemonic::Jmp, AddressingModeFamily::Indexed, None, 0x6E),
	row(Mnemonic::Jmp, AddressingModeFamily::Extended, None, 0x7E),
	row(Mnemonic::Clr, AddressingModeFamily::Direct, None, 0x0F),
	row(Mnemonic::Clr, AddressingModeFamily::Indexed, None, 0x6F),
	row(Mnemonic::Clr, AddressingModeFamily::Extended, None, 0x7F),

	// Load effective address.
	row(Mnemonic::Leax, AddressingModeFamily::Indexed, None, 0x30),
	row(Mnemonic::Leay, AddressingModeFamily::Indexed, None, 0x31),
	row(Mnemonic::Leas, AddressingModeFamily::Indexed, None, 0x32),
	row(Mnemonic::Leau, AddressingModeFamily::Indexed, None, 0x33),

	// Stack push/pull.
	row(Mnemonic::Pshs, AddressingModeFamily::RegisterList, None, 0x34),
	row(Mnemonic::Puls, AddressingModeFamily::RegisterList, None, 0x35),
	row(Mnemonic::Pshu, AddressingModeFamily::RegisterList, None, 0x36),
	row(Mnemonic::Pulu, AddressingModeFamily::RegisterList, None, 0x37),

	// Short branches.
	row(Mnemonic::Bra, AddressingModeFamily::Relative, None, 0x20),
	row(Mnemonic::Brn, AddressingModeFamily::Relative, None, 0x21),
	row(Mnemonic::Bhi, AddressingModeFamily::Relative, None, 0x22),
	row(Mnemonic::Bls, AddressingModeFamily::Relative, None, 0x23),
	row(Mnemonic::Bcc, AddressingModeFamily::Relative, None, 0x24),
	row(Mnemonic::Bcs, AddressingModeFamily::Relative, None, 0x25),
	row(Mnemonic::Bne, AddressingModeFamily::Relative, None, 0x26),
	row(Mnemonic::Beq, AddressingModeFamily::Relative, None, 0x27),
	row(Mnemonic::Bvc, AddressingModeFamily::Relative, None, 0x28),
	row(Mnemonic::Bvs, AddressingModeFamily::Relative, None, 0x29),
	row(Mnemonic::Bpl, AddressingModeFamily::Relative, None, 0x2A),
	row(Mnemonic::Bmi, AddressingModeFamily::Relative, None, 0x2B),
	row(Mnemonic::Bge, AddressingModeFamily::Relative, None, 0x2C),
	row(Mnemonic::Blt, AddressingModeFamily::Relative, None, 0x2D),
	row(Mnemonic::Bgt, AddressingModeFamily::Relative, None, 0x2E),
	row(Mnemonic::Ble, AddressingModeFamily::Relative, None, 0x2F),
	row(Mnemonic::Bsr, AddressingModeFamily::Relative, None, 0x8D),

	// Long branches (LBRA/LBSR are unprefixed; conditional forms use page $10).
	row(Mnemonic::Lbra, AddressingModeFamily::Relative, None, 0x16),
	row(Mnemonic::Lbsr, AddressingModeFamily::Relative, None, 0x17),
	row(Mnemonic::Lbrn, AddressingModeFamily::Relative, Some(0x10), 0x21),
	row(Mnemonic::Lbhi, AddressingModeFamily::Relative, Some(0x10), 0x22),
	row(Mnemonic::Lbls, AddressingModeFamily::Relative, Some(0x10), 0x23),
	row(Mnemonic::Lbcc, AddressingModeFamily::Relative, Some(0x10), 0x24),
	row(Mnemonic::Lbcs, AddressingModeFamily::Relative, Some(0x10), 0x25),
	row(Mnemonic::Lbne, AddressingModeFamily::Relative, Some(0x10), 0x26),
	row(Mnemonic::Lbeq, AddressingModeFamily::Relative, Some(0x10), 0x27),
	row(Mnemonic::Lbvc, AddressingModeFamily::Relative, Some(0x10), 0x28),
	row(Mnemonic::Lbvs, AddressingModeFamily::Relative, Some(0x10), 0x29),
	row(Mnemonic::Lbpl, AddressingModeFamily::Relative, Some(0x10), 0x2A),
	row(Mnemonic::Lbmi, AddressingModeFamily::Relative, Some(0x10), 0x2B),
	row(Mnemonic::Lbge, AddressingModeFamily::Relative, Some(0x10), 0x2C),
	row(Mnemonic::Lblt, AddressingModeFamily::Relative, Some(0x10), 0x2D),
	row(Mnemonic::Lbgt, AddressingModeFamily::Relative, Some(0x10), 0x2E),
	row(Mnemonic::Lble, AddressingModeFamily::Relative, Some(0x10), 0x2F),

	// Accumulator A.
	row(Mnemonic::Suba, AddressingModeFamily::Immediate, None, 0x80),
	row(Mnemonic::Suba, AddressingModeFamily::Direct, None, 0x90),
	row(Mnemonic::Suba, AddressingModeFamily::Indexed, None, 0xA0),
	row(Mnemonic::Suba, AddressingModeFamily::Extended, None, 0xB0),
	row(Mnemonic::Cmpa, AddressingModeFamily::Immediate, None, 0x81),
	row(Mnemonic::Cmpa, AddressingModeFamily::Direct, None, 0x91),
	row(Mnemonic::Cmpa, AddressingModeFamily::Indexed, None, 0xA1),
	row(Mnemonic::Cmpa, AddressingModeFamily::Extended, None, 0xB1),
	row(Mnemonic::Sbca, AddressingModeFamily::Immediate, None, 0x82),
	row(Mnemonic::Sbca, AddressingModeFamily::Direct, None, 0x92),
	row(Mnemonic::Sbca, AddressingModeFamily::Indexed, None, 0xA2),
	row(Mnemonic::Sbca, AddressingModeFamily::Extended, None, 0xB2),
	row(Mnemonic::Anda, AddressingModeFamily::Immediate, None, 0x84),
	row(Mnemonic::Anda, AddressingModeFamily::Direct, None, 0x94),
	row(Mnemonic::Anda, AddressingModeFamily::Indexed, None, 0xA4),
	row(Mnemonic::Anda, AddressingModeFamily::Extended, None, 0xB4),
	row(Mnemonic::Bita, AddressingModeFamily::Immediate, None, 0x85),
	row(Mnemonic::Bita, AddressingModeFamily::Direct, None, 0x95),
	row(Mnemonic::Bita, AddressingModeFamily::Indexed, None, 0xA5),
	row(Mnemonic::Bita, AddressingModeFamily::Extended, None, 0xB5),
	row(Mnemonic::Lda, AddressingModeFamily::Immediate, None, 0x86),
	row(Mnemonic::Lda, AddressingModeFamily::Direct, None, 0x96),
	row(Mnemonic::Lda, AddressingModeFamily::Indexed, None, 0xA6),
	row(Mnemonic::Lda, AddressingModeFamily::Extended, None, 0xB6),
	row(Mnemonic::Sta, AddressingModeFamily::Direct, None, 0x97),
	row(Mnemonic::Sta, AddressingModeFamily::Indexed, None, 0xA7),
	row(Mnemonic::Sta, AddressingModeFamily::Extended, None, 0xB7),
	row(Mnemonic::Eora, AddressingModeFamily::Immediate, None, 0x88),
	row(Mnemonic::Eora, AddressingModeFamily::Direct, None, 0x98),
	row(Mnemonic::Eora, AddressingModeFamily::Indexed, None, 0xA8),
	row(Mnemonic::Eora, AddressingModeFamily::Extended, None, 0xB8),
	row(Mnemonic::Adca, AddressingModeFamily::Immediate, None, 0x89),
	row(Mnemonic::Adca, AddressingModeFamily::Direct, None, 0x99),
	row(Mnemonic::Adca, AddressingModeFamily::Indexed, None, 0xA9),
	row(Mnemonic::Adca, AddressingModeFamily::Extended, None, 0xB9),
	row(Mnemonic::Ora, AddressingModeFamily::Immediate, None, 0x8A),
	row(Mnemonic::Ora, AddressingModeFamily::Direct, None, 0x9A),
	row(Mnemonic::Ora, AddressingModeFamily::Indexed, None, 0xAA),
	row(Mnemonic::Ora, AddressingModeFamily::Extended, None, 0xBA),
	row(Mnemonic::Adda, AddressingModeFamily::Immediate, None, 0x8B),
	row(Mnemonic::Adda, AddressingModeFamily::Direct, None, 0x9B),
	row(Mnemonic::Adda, AddressingModeFamily::Indexed, None, 0xAB),
	row(Mnemonic::Adda, AddressingModeFamily::Extended, None, 0xBB),

	// Accumulator B.
	row(Mnemonic::Subb, AddressingModeFamily::Immediate, None, 0xC0),
	row(Mnemonic::Subb, AddressingModeFamily::Direct, None, 0xD0),
	row(Mnemonic::Subb, AddressingModeFamily::Indexed, None, 0xE0),
	row(Mnemonic::Subb, AddressingModeFamily::Extended, None, 0xF0),
	row(Mnemonic::Cmpb, AddressingModeFamily::Immediate, None, 0xC1),
	row(Mnemonic::Cmpb, AddressingModeFamily::Direct, None, 0xD1),
	row(Mnemonic::Cmpb, AddressingModeFamily::Indexed, None, 0xE1),
	row(Mnemonic::Cmpb, AddressingModeFamily::Extended, None, 0xF1),
	row(Mnemonic::Sbcb, AddressingModeFamily::Immediate, None, 0xC2),
	row(Mnemonic::Sbcb, AddressingModeFamily::Direct, None, 0xD2),
	row(Mnemonic::Sbcb, AddressingModeFamily::Indexed, None, 0xE2),
	row(Mnemonic::Sbcb, AddressingModeFamily::Extended, None, 0xF2),
	row(Mnemonic::Andb, AddressingModeFamily::Immediate, None, 0xC4),
	row(Mnemonic::Andb, AddressingModeFamily::Direct, None, 0xD4),
	row(Mnemonic::Andb, AddressingModeFamily::Indexed, None, 0xE4),
	row(Mnemonic::Andb, AddressingModeFamily::Extended, None, 0xF4),
	row(Mnemonic::Bitb, AddressingModeFamily::Immediate, None, 0xC5),
	row(Mnemonic::Bitb, AddressingModeFamily::Direct, None, 0xD5),
	row(Mnemonic::Bitb, AddressingModeFamily::Indexed, None, 0xE5),
	row(Mnemonic::Bitb, AddressingModeFamily::Extended, None, 0xF5),
	row(Mnemonic::Ldb, AddressingModeFamily::Immediate, None, 0xC6),
	row(Mnemonic::Ldb, AddressingModeFamily::Direct, None, 0xD6),
	row(Mnemonic::Ldb, AddressingModeFamily::Indexed, None, 0xE6),
	row(Mnemonic::Ldb, AddressingModeFamily::Extended, None, 0xF6),
	row(Mnemonic::Stb, AddressingModeFamily::Direct, None, 0xD7),
	row(Mnemonic::Stb, AddressingModeFamily::Indexed, None, 0xE7),
	row(Mnemonic::Stb, AddressingModeFamily::Extended, None, 0xF7),
	row(Mnemonic::Eorb, AddressingModeFamily::Immediate, None, 0xC8),
	row(Mnemonic::Eorb, AddressingModeFamily::Direct, None, 0xD8),
	row(Mnemonic::Eorb, AddressingModeFamily::Indexed, None, 0xE8),
	row(Mnemonic::Eorb, AddressingModeFamily::Extended, None, 0xF8),
	row(Mnemonic::Adcb, AddressingModeFamily::Immediate, None, 0xC9),
	row(Mnemonic::Adcb, AddressingModeFamily::Direct, None, 0xD9),
	row(Mnemonic::Adcb, AddressingModeFamily::Indexed, None, 0xE9),
	row(Mnemonic::Adcb, AddressingModeFamily::Extended, None, 0xF9),
	row(Mnemonic::Orb, AddressingModeFamily::Immediate, None, 0xCA),
	row(Mnemonic::Orb, AddressingModeFamily::Direct, None, 0xDA),
	row(Mnemonic::Orb, AddressingModeFamily::Indexed, None, 0xEA),
	row(Mnemonic::Orb, AddressingModeFamily::Extended, None, 0xFA),
	row(Mnemonic::Addb, AddressingModeFamily::Immediate, None, 0xCB),
	row(Mnemonic::Addb, AddressingModeFamily::Direct, None, 0xDB),
	row(Mnemonic::Addb, AddressingModeFamily::Indexed, None, 0xEB),
	row(Mnemonic::Addb, AddressingModeFamily::Extended, None, 0xFB),

	// 16-bit registers, page 0.
	row(Mnemonic::Subd, AddressingModeFamily::Immediate, None, 0x83),
	row(Mnemonic::Subd, AddressingModeFamily::Direct, None, 0x93),
	row(Mnemonic::Subd, AddressingModeFamily::Indexed, None, 0xA3),
	row(Mnemonic::Subd, AddressingModeFamily::Extended, None, 0xB3),
	row(Mnemonic::Cmpx, AddressingModeFamily::Immediate, None, 0x8C),
	row(Mnemonic::Cmpx, AddressingModeFamily::Direct, None, 0x9C),
	row(Mnemonic::Cmpx, AddressingModeFamily::Indexed, None, 0xAC),
	row(Mnemonic::Cmpx, AddressingModeFamily::Extended, None, 0xBC),
	row(Mnemonic::Ldx, AddressingModeFamily::Immediate, None, 0x8E),
	row(Mnemonic::Ldx, AddressingModeFamily::Direct, None, 0x9E),
	row(Mnemonic::Ldx, AddressingModeFamily::Indexed, None, 0xAE),
	row(Mnemonic::Ldx, AddressingModeFamily::Extended, None, 0xBE),
	row(Mnemonic::Stx, AddressingModeFamily::Direct, None, 0x9F),
	row(Mnemonic::Stx, AddressingModeFamily::Indexed, None, 0xAF),
	row(Mnemonic::Stx, AddressingModeFamily::Extended, None, 0xBF),
	row(Mnemonic::Jsr, AddressingModeFamily::Direct, None, 0x9D),
	row(Mnemonic::Jsr, AddressingModeFamily::Indexed, None, 0xAD),
	row(Mnemonic::Jsr, AddressingModeFamily::Extended, None, 0xBD),

	row(Mnemonic::Addd, AddressingModeFamily::Immediate, None, 0xC3),
	row(Mnemonic::Addd, AddressingModeFamily::Direct, None, 0xD3),
	row(Mnemonic::Addd, AddressingModeFamily::Indexed, None, 0xE3),
	row(Mnemonic::Addd, AddressingModeFamily::Extended, None, 0xF3),
	row(Mnemonic::Ldd, AddressingModeFamily::Immediate, None, 0xCC),
	row(Mnemonic::Ldd, AddressingModeFamily::Direct, None, 0xDC),
	row(Mnemonic::Ldd, AddressingModeFamily::Indexed, None, 0xEC),
	row(Mnemonic::Ldd, AddressingModeFamily::Extended, None, 0xFC),
	row(Mnemonic::Std, AddressingModeFamily::Direct, None, 0xDD),
	row(Mnemonic::Std, AddressingModeFamily::Indexed, None, 0xED),
	row(Mnemonic::Std, AddressingModeFamily::Extended, None, 0xFD),
	row(Mnemonic::Ldu, AddressingModeFamily::Immediate, None, 0xCE),
	row(Mnemonic::Ldu, AddressingModeFamily::Direct, None, 0xDE),
	row(Mnemonic::Ldu, AddressingModeFamily::Indexed, None, 0xEE),
	row(Mnemonic::Ldu, AddressingModeFamily::Extended, None, 0xFE),
	row(Mnemonic::Stu, AddressingModeFamily::Direct, None, 0xDF),
	row(Mnemonic::Stu, AddressingModeFamily::Indexed, None, 0xEF),
	row(Mnemonic::Stu, AddressingModeFamily::Extended, None, 0xFF),

	// 16-bit registers, page $10.
	row(Mnemonic::Cmpd, AddressingModeFamily::Immediate, Some(0x10), 0x83),
	row(Mnemonic::Cmpd, AddressingModeFamily::Direct, Some(0x10), 0x93),
	row(Mnemonic::Cmpd, AddressingModeFamily::Indexed, Some(0x10), 0xA3),
	row(Mnemonic::Cmpd, AddressingModeFamily::Extended, Some(0x10), 0xB3),
	row(Mnemonic::Cmpy, AddressingModeFamily::Immediate, Some(0x10), 0x8C),
	row(Mnemonic::Cmpy, AddressingModeFamily::Direct, Some(0x10), 0x9C),
	row(Mnemonic::Cmpy, AddressingModeFamily::Indexed, Some(0x10), 0xAC),
	row(Mnemonic::Cmpy, AddressingModeFamily::Extended, Some(0x10), 0xBC),
	row(Mnemonic::Ldy, AddressingModeFamily::Immediate, Some(0x10), 0x8E),
	row(Mnemonic::Ldy, AddressingModeFamily::Direct, Some(0x10), 0x9E),
	row(Mnemonic::Ldy, AddressingModeFamily::Indexed, Some(0x10), 0xAE),
	row(Mnemonic::Ldy, AddressingModeFamily::Extended, Some(0x10), 0xBE),
	row(Mnemonic::Sty, AddressingModeFamily::Direct, Some(0x10), 0x9F),
	row(Mnemonic::Sty, AddressingModeFamily::Indexed, Some(0x10), 0xAF),
	row(Mnemonic::Sty, AddressingModeFamily::Extended, Some(0x10), 0xBF),
	row(Mnemonic::Lds, AddressingModeFamily::Immediate, Some(0x10), 0xCE),
	row(Mnemonic::Lds, AddressingModeFamily::Direct, Some(0x10), 0xDE),
	row(Mnemonic::Lds, AddressingModeFamily::Indexed, Some(0x10), 0xEE),
	row(Mnemonic::Lds, AddressingModeFamily::Extended, Some(0x10), 0xFE),
	row(Mnemonic::Sts, AddressingModeFamily::Direct, Some(0x10), 0xDF),
	row(Mnemonic::Sts, AddressingModeFamily::Indexed, Some(0x10), 0xEF),
	row(Mnemonic::Sts, AddressingModeFamily::Extended, Some(0x10), 0xFF),

	// 16-bit registers, page $11.
	row(Mnemonic::Cmpu, AddressingModeFamily::Immediate, Some(0x11), 0x83),
	row(Mnemonic::Cmpu, AddressingModeFamily::Direct, Some(0x11), 0x93),
	row(Mnemonic::Cmpu, AddressingModeFamily::Indexed, Some(0x11), 0xA3),
	row(Mnemonic::Cmpu, AddressingModeFamily::Extended, Some(0x11), 0xB3),
	row(Mnemonic::Cmps, AddressingModeFamily::Immediate, Some(0x11), 0x8C),
	row(Mnemonic::Cmps, AddressingModeFamily::Direct, Some(0x11), 0x9C),
	row(Mnemonic::Cmps, AddressingModeFamily::Indexed, Some(0x11), 0xAC),
	row(Mnemonic::Cmps, AddressingModeFamily::Extended, Some(0x11), 0xBC),

	// Register transfer/exchange and condition-code ops.
	row(Mnemonic::Tfr, AddressingModeFamily::RegisterPair, None, 0x1F),
	row(Mnemonic::Exg, AddressingModeFamily::RegisterPair, None, 0x1E),
	row(Mnemonic::Andcc, AddressingModeFamily::Immediate, None, 0x1C),
	row(Mnemonic::Orcc, AddressingModeFamily::Immediate, None, 0x1A),
	row(Mnemonic::Cwai, AddressingModeFamily::Immediate, None, 0x3C),
];

/// Look up the opcode bytes for a `(mnemonic, addressing-mode family)` pair.
/// `None` means the combination is illegal.
#[must_use]
pub fn opcode_for(mnemonic: Mnemonic, family: AddressingModeFamily) -> Option<OpcodeEncoding> {
	OPCODE_TABLE
		.iter()
		.find(|(m, f, _, _)| *m == mnemonic && *f == family)
		.map(|(_, _, prefix, opcode)| OpcodeEncoding { prefix: *prefix, opcode: *opcode })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lda_immediate_is_0x86() {
		let enc = opcode_for(Mnemonic::Lda, AddressingModeFamily::Immediate).unwrap();
		assert_eq!(enc.bytes(), vec![0x86]);
	}

	#[test]
	fn ldy_is_page_10_prefixed() {
		let enc = opcode_for(Mnemonic::Ldy, AddressingModeFamily::Immediate).unwrap();
		assert_eq!(enc.bytes(), vec![0x10, 0x8E]);
	}

	#[test]
	fn sta_has_no_immediate_form() {
		assert!(opcode_for(Mnemonic::Sta, AddressingModeFamily::Immediate).is_none());
	}

	#[test]
	fn bhs_and_blo_alias_bcc_and_bcs() {
		assert_eq!(Mnemonic::from_name("BHS"), Some(Mnemonic::Bcc));
		assert_eq!(Mnemonic::from_name("BLO"), Some(Mnemonic::Bcs));
	}

	#[test]
	fn beq_long_form_is_lbeq() {
		assert_eq!(Mnemonic::Beq.long_form(), Some(Mnemonic::Lbeq));
	}

	#[test]
	fn lbeq_short_form_is_beq() {
		assert_eq!(Mnemonic::Lbeq.short_form(), Some(Mnemonic::Beq));
	}

	#[test]
	fn immediate_width_distinguishes_8_and_16_bit() {
		use super::super::addressing::OperandSize;
		assert_eq!(Mnemonic::Lda.immediate_width(), Some(OperandSize::Bit8));
		assert_eq!(Mnemonic::Ldx.immediate_width(), Some(OperandSize::Bit16));
		assert_eq!(Mnemonic::Nop.immediate_width(), None);
	}
}
