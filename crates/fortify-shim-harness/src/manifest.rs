//! Machine-readable description of the exported symbols.

use serde::{Deserialize, Serialize};

use fortify_shim_core::fortify::FortifiedSymbol;

/// One exported symbol as published by `harness symbols`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub symbol: String,
    pub forwards_to: String,
    pub header: String,
    pub parameters: Vec<String>,
    pub declared_size_param: String,
    pub declared_size_enforced: bool,
}

impl From<FortifiedSymbol> for SymbolRecord {
    fn from(sym: FortifiedSymbol) -> Self {
        Self {
            symbol: sym.name().to_string(),
            forwards_to: sym.unfortified().to_string(),
            header: sym.header().to_string(),
            parameters: sym.parameters().iter().map(|p| p.to_string()).collect(),
            declared_size_param: sym.parameters()[sym.declared_size_index()].to_string(),
            declared_size_enforced: sym.declared_size_enforced(),
        }
    }
}

/// Records for every exported symbol, in export order.
#[must_use]
pub fn symbol_manifest() -> Vec<SymbolRecord> {
    FortifiedSymbol::ALL.into_iter().map(SymbolRecord::from).collect()
}
