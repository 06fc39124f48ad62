//! Growable, zero-initialised word memory.

use crate::error::AddressError;

/// Zero cells appended after the loaded program.
pub const HEADROOM: usize = 2000;

/// Highest writable address. Writes above it fail instead of growing
/// memory without bound.
pub const MAX_ADDRESS: i64 = (1 << 24) - 1;

/// Word-addressed memory.
///
/// Reads past the materialised extent return 0 without allocating; writes
/// past it grow the backing vector, zero-filling the gap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Empty memory. Every address reads as 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a program image followed by [`HEADROOM`] zero cells.
    pub fn load(words: &[i64]) -> Self {
        let mut cells = Vec::with_capacity(words.len() + HEADROOM);
        cells.extend_from_slice(words);
        cells.resize(words.len() + HEADROOM, 0);
        Self { cells }
    }

    fn index(addr: i64) -> Result<usize, AddressError> {
        usize::try_from(addr).map_err(|_| AddressError(addr))
    }

    /// Read the word at `addr`.
    pub fn read(&self, addr: i64) -> Result<i64, AddressError> {
        let idx = Self::index(addr)?;
        Ok(self.cells.get(idx).copied().unwrap_or(0))
    }

    /// Write `value` at `addr`, growing memory if needed.
    ///
    /// Fails for negative addresses, addresses above [`MAX_ADDRESS`], and
    /// when the allocator refuses to grow.
    pub fn write(&mut self, addr: i64, value: i64) -> Result<(), AddressError> {
        if addr > MAX_ADDRESS {
            return Err(AddressError(addr));
        }
        let idx = Self::index(addr)?;
        if idx >= self.cells.len() {
            self.cells
                .try_reserve(idx + 1 - self.cells.len())
                .map_err(|_| AddressError(addr))?;
            self.cells.resize(idx + 1, 0);
        }
        self.cells[idx] = value;
        Ok(())
    }

    /// Number of materialised cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell has been materialised.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The materialised cells.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }
}
