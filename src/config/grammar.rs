use super::traits::ConfigSection;
use crate::error::{Result, TreegpError};
use crate::functions::Grammar;
use crate::tree::NodeType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolFrequency {
    pub symbol: NodeType,
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub symbols: Vec<SymbolFrequency>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            symbols: NodeType::ALL
                .iter()
                .filter(|t| t.is_arithmetic())
                .map(|&symbol| SymbolFrequency {
                    symbol,
                    frequency: 1.0,
                })
                .collect(),
        }
    }
}

impl GrammarConfig {
    pub fn to_grammar(&self) -> Result<Grammar> {
        Grammar::from_symbols(self.symbols.iter().map(|s| (s.symbol, s.frequency)))
    }
}

impl ConfigSection for GrammarConfig {
    fn section_name() -> &'static str {
        "grammar"
    }

    fn validate(&self) -> Result<()> {
        for (i, s) in self.symbols.iter().enumerate() {
            if self.symbols[..i].iter().any(|p| p.symbol == s.symbol) {
                return Err(TreegpError::Configuration(format!(
                    "Symbol {:?} listed more than once",
                    s.symbol
                )));
            }
        }
        self.to_grammar()
            .map(|_| ())
            .map_err(|e| TreegpError::Configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_arithmetic_grammar() {
        let grammar = GrammarConfig::default().to_grammar().unwrap();
        assert_eq!(grammar.enabled_symbols(), Grammar::arithmetic().enabled_symbols());
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut config = GrammarConfig::default();
        config.symbols.push(SymbolFrequency {
            symbol: NodeType::Add,
            frequency: 2.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_leaves() {
        let config = GrammarConfig {
            symbols: vec![SymbolFrequency {
                symbol: NodeType::Mul,
                frequency: 1.0,
            }],
        };
        assert!(config.validate().is_err());
    }
}
