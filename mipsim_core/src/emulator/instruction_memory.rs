use super::error::EmulatorError;

/// Read-only instruction image, populated once before the first cycle and
/// never written during execution. Word-addressed: `pc` indexes whole
/// instruction words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionMemory {
    words: Vec<u32>,
}

impl InstructionMemory {
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Populate the image from an ordered word sequence, program order
    /// starting at address 0. An image larger than `capacity` is rejected
    /// before any cycle executes.
    pub fn load(words: Vec<u32>, capacity: usize) -> Result<Self, EmulatorError> {
        if words.len() > capacity {
            return Err(EmulatorError::ImageTooLarge {
                words: words.len(),
                capacity,
            });
        }
        Ok(InstructionMemory { words })
    }

    pub fn fetch(&self, pc: u32) -> Result<u32, EmulatorError> {
        self.words
            .get(pc as usize)
            .copied()
            .ok_or(EmulatorError::FetchOutOfRange {
                pc,
                len: self.words.len(),
            })
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
    fn test_fetch_past_image_is_an_error() {
        let imem = InstructionMemory::load(vec![0x20080005], 16).unwrap();
        assert_eq!(imem.fetch(0), Ok(0x20080005));
        assert_eq!(
            imem.fetch(1),
            Err(EmulatorError::FetchOutOfRange { pc: 1, len: 1 })
        );
    }

    #[test]
    fn test_oversized_image_rejected_at_load() {
        assert_eq!(
            InstructionMemory::load(vec![0; 5], 4),
            Err(EmulatorError::ImageTooLarge {
                words: 5,
                capacity: 4
            })
        );
    }
}
