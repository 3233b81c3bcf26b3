//! Symbol identifiers and the symbol alphabet

use serde::{Deserialize, Serialize};

use crate::error::{SwError, SwResult};
use crate::random::RandomSource;

/// Opaque symbol identifier as shown on a reel (e.g. "🍒", "HP1")
pub type Symbol = String;

/// Non-empty ordered symbol alphabet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    symbols: Vec<Symbol>,
}

impl SymbolSet {
    /// Create a symbol set; rejects an empty alphabet
    pub fn new(symbols: Vec<Symbol>) -> SwResult<Self> {
        if symbols.is_empty() {
            return Err(SwError::EmptySymbolSet);
        }
        Ok(Self { symbols })
    }

    /// Symbol set from string literals
    pub fn of(symbols: &[&str]) -> SwResult<Self> {
        Self::new(symbols.iter().map(|s| s.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Uniform draw through the injected random source
    pub fn pick<'a>(&'a self, random: &mut dyn RandomSource) -> &'a Symbol {
        let index = (random.next_unit() * self.symbols.len() as f64) as usize;
        &self.symbols[index.min(self.symbols.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(
            SymbolSet::new(Vec::new()),
            Err(SwError::EmptySymbolSet)
        ));
    }

    #[test]
    fn test_pick_spans_alphabet() {
        let set = SymbolSet::of(&["A", "B", "C", "D", "E"]).unwrap();
        // Mid-bucket values map to each index without boundary rounding
        let mut random = ScriptedRandom::new(vec![0.1, 0.3, 0.5, 0.7, 0.9]);

        let picked: Vec<&Symbol> = (0..5).map(|_| set.pick(&mut random)).collect();
        assert_eq!(picked, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_pick_clamps_top_of_range() {
        let set = SymbolSet::of(&["A", "B"]).unwrap();
        let mut random = ScriptedRandom::new(vec![0.999_999_999]);

        assert_eq!(set.pick(&mut random), "B");
    }
}
