//! Instruction word field extraction and the opcode/funct values the
//! classifier distinguishes.
//!
//! Only two fields are ever read: the primary opcode (bits 31..26) and the low
//! five bits of the function field (bits 4..0). Bit 5 of the function field is
//! masked off, so function codes that differ only in that bit alias each other.

/// Shift that brings the primary opcode down to bit 0.
pub const OPCODE_SHIFT: u32 = 26;

/// Mask applied to the function field.
pub const FUNCT_MASK: u32 = 0x1F;

/// Primary opcode values (bits 31..26).
#[allow(missing_docs)]
pub mod opcode {
    pub const SPECIAL: u8 = 0x00;
    pub const REGIMM: u8 = 0x01;
    pub const J: u8 = 0x02;
    pub const JAL: u8 = 0x03;
    pub const BEQ: u8 = 0x04;
    pub const BNE: u8 = 0x05;
    pub const BLEZ: u8 = 0x06;
    pub const BGTZ: u8 = 0x07;
    pub const ADDI: u8 = 0x08;
    pub const ADDIU: u8 = 0x09;
    pub const SLTI: u8 = 0x0A;
    pub const SLTIU: u8 = 0x0B;
    pub const ANDI: u8 = 0x0C;
    pub const ORI: u8 = 0x0D;
    pub const XORI: u8 = 0x0E;
    pub const LUI: u8 = 0x0F;
    pub const COP1: u8 = 0x11;
    pub const BEQL: u8 = 0x14;
    pub const BNEL: u8 = 0x15;
    pub const BLEZL: u8 = 0x16;
    pub const BGTZL: u8 = 0x17;
    pub const SPECIAL2: u8 = 0x1C;
    pub const LB: u8 = 0x20;
    pub const LH: u8 = 0x21;
    pub const LWL: u8 = 0x22;
    pub const LW: u8 = 0x23;
    pub const LBU: u8 = 0x24;
    pub const LHU: u8 = 0x25;
    pub const LWR: u8 = 0x26;
    pub const SB: u8 = 0x28;
    pub const SH: u8 = 0x29;
    pub const SWL: u8 = 0x2A;
    pub const SW: u8 = 0x2B;
    pub const SWR: u8 = 0x2E;
    pub const LL: u8 = 0x30;
    pub const SC: u8 = 0x38;
}

/// Function field values, already reduced to five bits.
#[allow(missing_docs)]
pub mod funct {
    // SPECIAL
    pub const SLL: u8 = 0x00;
    pub const SRL: u8 = 0x02;
    pub const SRAV: u8 = 0x07;
    pub const JR: u8 = 0x08;
    pub const JALR: u8 = 0x09;
    pub const MOVZ: u8 = 0x0A;
    pub const MOVN: u8 = 0x0B;
    pub const SYSCALL: u8 = 0x0C;
    pub const BREAK: u8 = 0x0D;
    pub const MULT: u8 = 0x18;
    pub const MULTU: u8 = 0x19;
    pub const DIV: u8 = 0x1A;
    pub const DIVU: u8 = 0x1B;

    // REGIMM, read from the low bits rather than the rt field.
    pub const BLTZ: u8 = 0x00;
    pub const BGEZL: u8 = 0x07;
    pub const BLTZAL: u8 = 0x10;
    pub const BGEZALL: u8 = 0x13;

    // COP1
    pub const FP_MUL: u8 = 0x02;
    pub const FP_DIV: u8 = 0x03;

    // SPECIAL2
    pub const MADD: u8 = 0x00;
    pub const MADDU: u8 = 0x01;
    pub const MUL: u8 = 0x02;
    pub const MSUB: u8 = 0x04;
    pub const MSUBU: u8 = 0x05;
}

/// Extracts the primary opcode (bits 31..26).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn opcode_of(word: u32) -> u8 {
    (word >> OPCODE_SHIFT) as u8
}

/// Extracts the low five bits of the function field.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn funct_of(word: u32) -> u8 {
    (word & FUNCT_MASK) as u8
}

/// Extracts the `(opcode, funct)` pair the classifier dispatches on.
#[must_use]
pub const fn decode_opcode_funct(word: u32) -> (u8, u8) {
    (opcode_of(word), funct_of(word))
}

/// Builds the smallest word carrying the given opcode and funct fields.
///
/// Bits outside the two fields are zero. Out-of-range inputs are masked.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn encode_opcode_funct(opcode: u8, funct: u8) -> u32 {
    (((opcode as u32) & 0x3F) << OPCODE_SHIFT) | ((funct as u32) & FUNCT_MASK)
}

#[cfg(test)]
mod tests {
    use super::{decode_opcode_funct, encode_opcode_funct, funct, funct_of, opcode, opcode_of};

    #[test]
    fn opcode_reads_top_six_bits() {
        assert_eq!(opcode_of(0xFC00_0000), 0x3F);
        assert_eq!(opcode_of(0x8C43_0004), opcode::LW);
        assert_eq!(opcode_of(0x03FF_FFFF), 0);
    }

    #[test]
    fn funct_masks_to_five_bits() {
        assert_eq!(funct_of(0x0000_001A), funct::DIV);
        assert_eq!(funct_of(0x0000_003A), funct::DIV);
        assert_eq!(funct_of(0xFFFF_FFE0), 0);
    }

    #[test]
    fn decode_extracts_both_fields() {
        // div $t0, $t1
        assert_eq!(decode_opcode_funct(0x0109_001A), (opcode::SPECIAL, funct::DIV));
        // addi $t0, $t0, 1
        assert_eq!(decode_opcode_funct(0x2108_0001), (opcode::ADDI, 0x01));
    }

    #[test]
    fn encode_places_fields_and_masks() {
        assert_eq!(encode_opcode_funct(opcode::LW, 0), 0x8C00_0000);
        assert_eq!(encode_opcode_funct(0xFF, 0xFF), 0xFC00_001F);
        for op in 0u8..64 {
            for fc in 0u8..32 {
                assert_eq!(decode_opcode_funct(encode_opcode_funct(op, fc)), (op, fc));
            }
        }
    }
}
