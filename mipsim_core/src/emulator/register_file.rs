use std::ops::Index;

/// 32-entry register file.
///
/// Register 0 is hardwired to zero: it always reads as 0 and writes
/// targeting it are silently discarded.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    x: [u32; 32],
}

impl RegisterFile {
    /// Commit a write-back value. Called only at the synchronous cycle
    /// boundary, and only when the register-write enable is set.
    pub fn write(&mut self, index: usize, value: u32) {
        if index != 0 {
            self.x[index] = value;
        }
    }
}

impl Index<usize> for RegisterFile {
    type Output = u32;

    fn index(&self, index: usize) -> &Self::Output {
        if index == 0 { &0 } else { &self.x[index] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_zero_is_discarded() {
        let mut rf = RegisterFile::default();
        rf.write(0, 0xDEADBEEF);
        assert_eq!(rf[0], 0);

        rf.write(31, 0xDEADBEEF);
        assert_eq!(rf[31], 0xDEADBEEF);
    }
}
