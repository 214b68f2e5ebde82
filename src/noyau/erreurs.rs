// src/noyau/erreurs.rs
//
// Erreurs du noyau.
// - ErreurEval     : tout ce qui peut faire échouer "="
// - ErreurStockage : lecture/écriture du stockage clé-valeur (jamais fatale)

use thiserror::Error;

/// Échec d’une évaluation.
///
/// Côté UI, les trois variantes donnent le même état “Erreur”.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurEval {
    #[error("expression vide")]
    ExpressionVide,

    #[error("erreur de syntaxe: {0}")]
    Syntaxe(String),

    #[error("résultat non fini")]
    ResultatNonFini,
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum ErreurStockage {
    #[error("erreur d’E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("erreur JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stockage indisponible: {0}")]
    Indisponible(String),
}
