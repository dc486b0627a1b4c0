/// ALU operation selector, driven by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    And,
    Lui,
    Or,
    Slt,
    Beq,
}

impl AluOp {
    /// Apply the operation. Operand `a` is always the rs register value;
    /// `b` comes out of the operand mux.
    pub fn apply(self, a: u32, b: u32) -> u32 {
        match self {
            // Two's-complement add, wraps silently: the modeled subset has
            // no overflow trap.
            AluOp::Add => a.wrapping_add(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            // The operand mux already shifted the immediate left by 16.
            AluOp::Lui => b,
            // Branch resolution goes through the equality flag; this result
            // never reaches write-back.
            AluOp::Beq => b.wrapping_sub(a),
        }
    }
}

/// Equality flag for branch resolution: `b - a == 0`. Computed every cycle,
/// independently of the selected operation.
pub fn eq_flag(a: u32, b: u32) -> bool {
    b.wrapping_sub(a) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_wraps_and_commutes() {
        for (a, b) in [
            (0u32, 0u32),
            (1, 2),
            (0xFFFF_FFFF, 1),
            (0x7FFF_FFFF, 1),
            (0x8000_0000, 0x8000_0000),
            ((-5i32) as u32, 3),
        ] {
            assert_eq!(AluOp::Add.apply(a, b), AluOp::Add.apply(b, a));
        }
        assert_eq!(AluOp::Add.apply(0xFFFF_FFFF, 1), 0);
        assert_eq!(AluOp::Add.apply((-5i32) as u32, 3), (-2i32) as u32);
    }

    #[test]
    fn test_bitwise_boundary_patterns() {
        for (a, b) in [
            (0x0000_0000u32, 0xFFFF_FFFFu32),
            (0xFFFF_FFFF, 0xFFFF_FFFF),
            (0x8000_0000, 0x0F0F_0F0F),
            (0xA5A5_A5A5, 0x5A5A_5A5A),
        ] {
            assert_eq!(AluOp::And.apply(a, b), a & b);
            assert_eq!(AluOp::Or.apply(a, b), a | b);
        }
    }

    #[test]
    fn test_slt_is_signed() {
        let cases = [
            i32::MIN,
            -1,
            0,
            1,
            i32::MAX,
        ];
        for a in cases {
            for b in cases {
                assert_eq!(
                    AluOp::Slt.apply(a as u32, b as u32),
                    (a < b) as u32,
                    "SLT({a}, {b})"
                );
            }
        }
    }

    #[test]
    fn test_lui_passes_operand_b_through() {
        assert_eq!(AluOp::Lui.apply(0xDEAD_BEEF, 0x1234_0000), 0x1234_0000);
    }

    #[test]
    fn test_eq_flag() {
        assert!(eq_flag(7, 7));
        assert!(eq_flag(0x8000_0000, 0x8000_0000));
        assert!(!eq_flag(7, 8));
        assert!(!eq_flag(0, 0xFFFF_FFFF));
    }
}
