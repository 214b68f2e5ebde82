//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder la `Calculatrice` du noyau (tampon, mode, historique, résultat)
//! et les quelques drapeaux propres à l’écran.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `Calculatrice::traiter`.
//! - Un seul point d’entrée pour les actions (boutons ET clavier) : `action`.

use log::debug;

use crate::noyau::stockage::Stockage;
use crate::noyau::{Calculatrice, Evenement};

pub struct AppCalc {
    // --- noyau ---
    pub calc: Calculatrice,

    // --- UX ---
    pub historique_ouvert: bool,
}

impl AppCalc {
    /// L’historique est chargé ici, une seule fois.
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        Self {
            calc: Calculatrice::new(stockage),
            historique_ouvert: false,
        }
    }

    /// Action utilisateur ; `maintenant` = horloge egui (secondes).
    pub fn action(&mut self, evt: Evenement, maintenant: f64) {
        self.calc.traiter(evt, maintenant);
    }

    /// Retour à "0" après une erreur, si l’échéance est passée.
    pub fn tic(&mut self, maintenant: f64) {
        if self.calc.tic(maintenant) {
            debug!("résultat remis à 0");
        }
    }

    /// Délai avant le prochain retour à "0" (pour programmer un rafraîchissement).
    pub fn delai_prochaine_echeance(&self, maintenant: f64) -> Option<f64> {
        self.calc
            .prochaine_echeance()
            .map(|t| (t - maintenant).max(0.0))
    }
}
