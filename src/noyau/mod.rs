//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - tampon.rs       : expression en cours (ajout / opérateur / fonction / retour / effacer)
//! - angle.rs        : mode DEG / RAD
//! - jetons.rs       : tokenisation
//! - rpn.rs          : shunting-yard + évaluation RPN (f64)
//! - eval.rs         : pipeline complet (trig, réécritures, contrôle “fini”)
//! - format.rs       : arrondi 10 décimales + milliers
//! - historique.rs   : 50 derniers calculs, JSON
//! - stockage.rs     : clé-valeur externe (mémoire / fichier / localStorage)
//! - horloge.rs      : horodatage epoch ms
//! - calculatrice.rs : état + événements + retour à "0" après erreur
//! - erreurs.rs      : ErreurEval / ErreurStockage

pub mod angle;
pub mod calculatrice;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod historique;
pub mod horloge;
pub mod jetons;
pub mod rpn;
pub mod stockage;
pub mod tampon;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use angle::ModeAngle;
pub use calculatrice::{Calculatrice, Evenement};
pub use tampon::Fonction;
