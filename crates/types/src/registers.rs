use bitvec::slice::BitSlice;

use crate::BitVector;

/// Input bits for one evaluation cycle, one bit vector per input channel.
///
/// Channel `0` is `In1` in the program, channel `1` is `In2`, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedInput {
    channels: Vec<BitVector>,
}

impl PackedInput {
    /// Creates a new instance from the channels in order.
    pub fn new(channels: Vec<BitVector>) -> Self {
        Self { channels }
    }

    /// Creates an input with a single active channel.
    pub fn single(bits: BitVector) -> Self {
        Self {
            channels: vec![bits],
        }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Gets a channel's bits, if the channel was packed.
    pub fn channel(&self, idx: usize) -> Option<&BitSlice> {
        self.channels.get(idx).map(|c| c.as_bitslice())
    }

    /// Gets an iterator over the channels in order.
    pub fn channels_iter(&self) -> impl Iterator<Item = &BitSlice> {
        self.channels.iter().map(|c| c.as_bitslice())
    }
}

/// Register-structured result of one evaluation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    registers: Vec<BitVector>,
}

impl Outputs {
    /// Creates a new instance from the output registers in order.
    pub fn new(registers: Vec<BitVector>) -> Self {
        Self { registers }
    }

    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Total number of bits across every register.
    pub fn total_bits(&self) -> usize {
        self.registers.iter().map(|r| r.len()).sum()
    }

    /// Gets an iterator over the registers in order.
    pub fn registers_iter(&self) -> impl Iterator<Item = &BitSlice> {
        self.registers.iter().map(|r| r.as_bitslice())
    }

    /// Flattens the registers into one vector.
    ///
    /// Registers are concatenated in order, so the first bit of register `n+1`
    /// lands right after the last bit of register `n`.
    pub fn flatten(&self) -> BitVector {
        let mut flat = BitVector::with_capacity(self.total_bits());
        for reg in &self.registers {
            flat.extend_from_bitslice(reg);
        }
        flat
    }
}

impl From<Vec<BitVector>> for Outputs {
    fn from(registers: Vec<BitVector>) -> Self {
        Self::new(registers)
    }
}
