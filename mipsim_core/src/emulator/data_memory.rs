use super::error::EmulatorError;

/// Word-addressable data memory, separate from the instruction image
/// (Harvard model). Each address increment refers to one 32-bit word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<u32>,
}

impl DataMemory {
    pub const DEFAULT_WORDS: usize = 4096;

    pub fn new(len: usize) -> Self {
        DataMemory {
            words: vec![0; len],
        }
    }

    /// Memory with externally supplied initial contents, zero-filled up to
    /// `len` words.
    pub fn from_words(initial: &[u32], len: usize) -> Result<Self, EmulatorError> {
        if initial.len() > len {
            return Err(EmulatorError::ImageTooLarge {
                words: initial.len(),
                capacity: len,
            });
        }
        let mut words = initial.to_vec();
        words.resize(len, 0);
        Ok(DataMemory { words })
    }

    pub fn read(&self, address: u32) -> Result<u32, EmulatorError> {
        self.words
            .get(address as usize)
            .copied()
            .ok_or(EmulatorError::DataAddressOutOfRange {
                address,
                len: self.words.len(),
            })
    }

    pub fn write(&mut self, address: u32, value: u32) -> Result<(), EmulatorError> {
        let len = self.words.len();
        match self.words.get_mut(address as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EmulatorError::DataAddressOutOfRange { address, len }),
        }
    }

    /// Bounds check without touching contents, so a doomed store can abort
    /// the cycle before anything commits.
    pub fn check_address(&self, address: u32) -> Result<(), EmulatorError> {
        let _ = self.read(address)?;
        Ok(())
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_access_is_an_error() {
        let mut mem = DataMemory::new(16);
        assert!(mem.write(15, 42).is_ok());
        assert_eq!(mem.read(15), Ok(42));

        assert_eq!(
            mem.read(16),
            Err(EmulatorError::DataAddressOutOfRange {
                address: 16,
                len: 16
            })
        );
        assert!(mem.write(16, 1).is_err());
    }

    #[test]
    fn test_oversized_initial_contents_rejected() {
        assert_eq!(
            DataMemory::from_words(&[0; 8], 4),
            Err(EmulatorError::ImageTooLarge {
                words: 8,
                capacity: 4
            })
        );
        let mem = DataMemory::from_words(&[1, 2], 4).unwrap();
        assert_eq!(mem.words(), &[1, 2, 0, 0]);
    }
}
