use crate::error::{Result, TreegpError};
use crate::tree::{Node, NodeType};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::BTreeMap;

/// Enabled symbols and their relative sampling frequencies
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    frequencies: BTreeMap<NodeType, f64>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves plus `+ - * /`
    pub fn arithmetic() -> Self {
        let mut grammar = Self::new();
        for t in NodeType::ALL.iter().filter(|t| t.is_arithmetic()) {
            grammar.enable(*t, 1.0);
        }
        grammar
    }

    /// Every known symbol with equal frequency
    pub fn full() -> Self {
        let mut grammar = Self::new();
        for t in NodeType::ALL {
            grammar.enable(t, 1.0);
        }
        grammar
    }

    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeType, f64)>,
    {
        let mut grammar = Self::new();
        for (symbol, frequency) in symbols {
            grammar.enable(symbol, frequency);
        }
        grammar.validate()?;
        Ok(grammar)
    }

    pub fn enable(&mut self, symbol: NodeType, frequency: f64) {
        self.frequencies.insert(symbol, frequency);
    }

    /// Changes the frequency of an already enabled symbol; returns whether
    /// the symbol was enabled.
    pub fn set_frequency(&mut self, symbol: NodeType, frequency: f64) -> bool {
        match self.frequencies.get_mut(&symbol) {
            Some(f) => {
                *f = frequency;
                true
            }
            None => false,
        }
    }

    pub fn disable(&mut self, symbol: NodeType) {
        self.frequencies.remove(&symbol);
    }

    pub fn is_enabled(&self, symbol: NodeType) -> bool {
        self.frequencies.contains_key(&symbol)
    }

    pub fn frequency(&self, symbol: NodeType) -> Option<f64> {
        self.frequencies.get(&symbol).copied()
    }

    pub fn enabled_symbols(&self) -> Vec<NodeType> {
        self.frequencies.keys().copied().collect()
    }

    /// Minimum and maximum arity over the enabled function symbols, `(0, 0)`
    /// when only leaves are enabled.
    pub fn function_arity_limits(&self) -> (usize, usize) {
        let arities = self
            .frequencies
            .keys()
            .filter(|t| !t.is_leaf())
            .map(|t| t.arity());
        let (min, max) = arities.fold((usize::MAX, 0), |(lo, hi), a| (lo.min(a), hi.max(a)));
        if max == 0 {
            (0, 0)
        } else {
            (min, max)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.frequencies.keys().any(|t| t.is_leaf()) {
            return Err(TreegpError::Grammar(
                "Grammar must enable at least one leaf symbol".to_string(),
            ));
        }
        if let Some((symbol, f)) = self
            .frequencies
            .iter()
            .find(|(_, f)| !(f.is_finite() && **f > 0.0))
        {
            return Err(TreegpError::Grammar(format!(
                "Frequency of {:?} must be positive, got {}",
                symbol, f
            )));
        }
        Ok(())
    }

    /// Draws a symbol whose arity lies in `[min_arity, max_arity]`, weighted
    /// by frequency. Values are left at their defaults.
    ///
    /// If nothing enabled fits the window it widens to `[0, max_arity]`, so a
    /// validated grammar always yields a node and never exceeds `max_arity`.
    pub fn sample_random_symbol<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_arity: usize,
        max_arity: usize,
    ) -> Node {
        let min_arity = min_arity.min(max_arity);
        let mut candidates = self.candidates(min_arity, max_arity);
        if candidates.is_empty() {
            candidates = self.candidates(0, max_arity);
        }
        debug_assert!(!candidates.is_empty(), "grammar has no leaf symbols");

        let symbol = match WeightedIndex::new(candidates.iter().map(|(_, f)| *f)) {
            Ok(dist) => candidates[dist.sample(rng)].0,
            Err(_) if !candidates.is_empty() => candidates[rng.gen_range(0..candidates.len())].0,
            Err(_) => NodeType::Constant,
        };
        Node::new(symbol)
    }

    fn candidates(&self, min_arity: usize, max_arity: usize) -> Vec<(NodeType, f64)> {
        self.frequencies
            .iter()
            .filter(|(t, _)| (min_arity..=max_arity).contains(&t.arity()))
            .map(|(t, f)| (*t, *f))
            .collect()
    }
}
