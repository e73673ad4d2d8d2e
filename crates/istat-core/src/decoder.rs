//! Instruction word classifier.
//!
//! Maps every 32-bit word to exactly one [`Category`]. The mapping is a total
//! function: encodings the table does not name fall through to
//! [`Category::Other`] and never fault.

use std::fmt;
use std::str::FromStr;

use crate::encoding::{decode_opcode_funct, funct, opcode};
use crate::{Category, ConfigError};

/// Opcode coverage used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DecodeTable {
    /// Integer divide/multiply, jumps and branches, loads and stores.
    Base,
    /// `Base` plus floating-point divide/multiply (`COP1`) and the
    /// multiply-accumulate family (`SPECIAL2`).
    #[default]
    Extended,
}

impl DecodeTable {
    /// Returns true when the `COP1` and `SPECIAL2` rows are active.
    #[must_use]
    pub const fn covers_extended_rows(self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Classifies one instruction word.
    #[must_use]
    pub const fn classify(self, word: u32) -> Category {
        let (op, fc) = decode_opcode_funct(word);

        match op {
            opcode::SPECIAL => classify_special(fc),
            opcode::REGIMM => classify_regimm(fc),
            opcode::J
            | opcode::JAL
            | opcode::BEQ..=opcode::BGTZ
            | opcode::BEQL..=opcode::BGTZL => Category::JumpOrBranch,
            opcode::COP1 if self.covers_extended_rows() => classify_cop1(fc),
            opcode::SPECIAL2 if self.covers_extended_rows() => classify_special2(fc),
            opcode::LB..=opcode::LWR | opcode::SB..=opcode::SWR | opcode::LL | opcode::SC => {
                Category::Memory
            }
            // Immediate arithmetic (ADDI..=LUI) and everything unnamed.
            _ => Category::Other,
        }
    }

    /// Stable lowercase name, accepted back by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Extended => "extended",
        }
    }
}

/// Shifts, conditional moves and syscall/break all land in `Other`.
const fn classify_special(fc: u8) -> Category {
    match fc {
        funct::JR | funct::JALR => Category::JumpOrBranch,
        funct::MULT | funct::MULTU => Category::Multiply,
        funct::DIV | funct::DIVU => Category::Division,
        _ => Category::Other,
    }
}

const fn classify_regimm(fc: u8) -> Category {
    match fc {
        funct::BLTZ..=funct::BGEZL | funct::BLTZAL..=funct::BGEZALL => Category::JumpOrBranch,
        _ => Category::Other,
    }
}

const fn classify_cop1(fc: u8) -> Category {
    match fc {
        funct::FP_DIV => Category::Division,
        funct::FP_MUL => Category::Multiply,
        _ => Category::Other,
    }
}

const fn classify_special2(fc: u8) -> Category {
    match fc {
        funct::MADD | funct::MADDU | funct::MUL | funct::MSUB | funct::MSUBU => Category::Multiply,
        _ => Category::Other,
    }
}

/// Classifies `word` with the default ([`DecodeTable::Extended`]) table.
#[must_use]
pub const fn classify(word: u32) -> Category {
    DecodeTable::Extended.classify(word)
}

impl fmt::Display for DecodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecodeTable {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "extended" => Ok(Self::Extended),
            _ => Err(ConfigError::UnknownDecodeTable(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_opcode_funct;

    #[test]
    fn special_divide_and_multiply() {
        // div $t0, $t1 / divu / mult / multu
        assert_eq!(classify(0x0109_001A), Category::Division);
        assert_eq!(classify(0x0109_001B), Category::Division);
        assert_eq!(classify(0x0109_0018), Category::Multiply);
        assert_eq!(classify(0x0109_0019), Category::Multiply);
    }

    #[test]
    fn special_register_jumps() {
        // jr $ra, jalr $t9
        assert_eq!(classify(0x03E0_0008), Category::JumpOrBranch);
        assert_eq!(classify(0x0320_F809), Category::JumpOrBranch);
    }

    #[test]
    fn special_shifts_moves_and_traps_are_other() {
        for fc in [0x00, 0x02, 0x03, 0x04, 0x06, 0x07, 0x0A, 0x0B, 0x0C, 0x0D] {
            assert_eq!(
                classify(encode_opcode_funct(opcode::SPECIAL, fc)),
                Category::Other,
                "funct {fc:#x}"
            );
        }
        // nop
        assert_eq!(classify(0), Category::Other);
    }

    #[test]
    fn special_funct_bit_five_is_ignored() {
        // funct 0x3A aliases DIV, 0x20 (add) aliases SLL.
        assert_eq!(classify(0x0000_003A), Category::Division);
        assert_eq!(classify(0x0109_4020), Category::Other);
        // 0x28/0x29 alias JR/JALR.
        assert_eq!(classify(0x0000_0028), Category::JumpOrBranch);
    }

    #[test]
    fn regimm_rows() {
        for fc in (0u8..=7).chain(16..=19) {
            assert_eq!(
                classify(encode_opcode_funct(opcode::REGIMM, fc)),
                Category::JumpOrBranch,
                "funct {fc:#x}"
            );
        }
        for fc in (8u8..=15).chain(20..=31) {
            assert_eq!(
                classify(encode_opcode_funct(opcode::REGIMM, fc)),
                Category::Other,
                "funct {fc:#x}"
            );
        }
    }

    #[test]
    fn primary_jumps_and_branches() {
        for op in [0x02u8, 0x03, 0x04, 0x05, 0x06, 0x07, 0x14, 0x15, 0x16, 0x17] {
            assert_eq!(
                classify(encode_opcode_funct(op, 0x1F)),
                Category::JumpOrBranch,
                "opcode {op:#x}"
            );
        }
    }

    #[test]
    fn immediate_arithmetic_is_other() {
        for op in opcode::ADDI..=opcode::LUI {
            assert_eq!(
                classify(encode_opcode_funct(op, funct::DIV)),
                Category::Other,
                "opcode {op:#x}"
            );
        }
    }

    #[test]
    fn loads_and_stores() {
        // lw $v1, 4($v0) / sw $v1, 8($sp)
        assert_eq!(classify(0x8C43_0004), Category::Memory);
        assert_eq!(classify(0xAFA3_0008), Category::Memory);
        for op in (0x20u8..=0x26).chain(0x28..=0x2E).chain([0x30, 0x38]) {
            assert_eq!(
                classify(encode_opcode_funct(op, 0)),
                Category::Memory,
                "opcode {op:#x}"
            );
        }
        for op in [0x27u8, 0x2F, 0x31, 0x39] {
            assert_eq!(
                classify(encode_opcode_funct(op, 0)),
                Category::Other,
                "opcode {op:#x}"
            );
        }
    }

    #[test]
    fn extended_rows_only_apply_to_extended_table() {
        let div_s = encode_opcode_funct(opcode::COP1, funct::FP_DIV);
        let mul_s = encode_opcode_funct(opcode::COP1, funct::FP_MUL);
        let madd = encode_opcode_funct(opcode::SPECIAL2, funct::MADD);
        let msubu = encode_opcode_funct(opcode::SPECIAL2, funct::MSUBU);

        assert_eq!(DecodeTable::Extended.classify(div_s), Category::Division);
        assert_eq!(DecodeTable::Extended.classify(mul_s), Category::Multiply);
        assert_eq!(DecodeTable::Extended.classify(madd), Category::Multiply);
        assert_eq!(DecodeTable::Extended.classify(msubu), Category::Multiply);

        for word in [div_s, mul_s, madd, msubu] {
            assert_eq!(DecodeTable::Base.classify(word), Category::Other);
        }

        // add.s and SPECIAL2 funct 3 stay Other in both tables.
        let add_s = encode_opcode_funct(opcode::COP1, 0x00);
        let special2_three = encode_opcode_funct(opcode::SPECIAL2, 0x03);
        assert_eq!(DecodeTable::Extended.classify(add_s), Category::Other);
        assert_eq!(DecodeTable::Extended.classify(special2_three), Category::Other);
    }

    #[test]
    fn tables_parse_from_names() {
        assert_eq!("base".parse::<DecodeTable>(), Ok(DecodeTable::Base));
        assert_eq!(" Extended ".parse::<DecodeTable>(), Ok(DecodeTable::Extended));
        assert_eq!(
            "full".parse::<DecodeTable>(),
            Err(ConfigError::UnknownDecodeTable("full".to_string()))
        );
        assert_eq!(DecodeTable::default().to_string(), "extended");
    }
}
