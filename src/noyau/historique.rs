//! Historique des calculs réussis.
//!
//! Contrats :
//! - ordre : plus récent en tête
//! - capacité : 50 entrées, la plus ancienne (en queue) sort en premier
//! - persistance : tout le journal est réécrit à chaque ajout (JSON, clé "calculator_history")
//! - aucune erreur de stockage ne remonte : journalisée puis ignorée

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::erreurs::ErreurStockage;
use super::stockage::Stockage;

pub const CAPACITE_HISTORIQUE: usize = 50;

pub const CLE_HISTORIQUE: &str = "calculator_history";

/// Une ligne d’historique (immuable une fois créée).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expression: String,
    #[serde(rename = "result")]
    pub resultat: String,
    /// Millisecondes depuis l’epoch.
    #[serde(rename = "timestamp")]
    pub horodatage: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
}

impl Historique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lecture unique au démarrage : absent / illisible / corrompu => historique vide.
    pub fn charger(stockage: &dyn Stockage) -> Self {
        let brut = match stockage.lire(CLE_HISTORIQUE) {
            Ok(Some(brut)) => brut,
            Ok(None) => return Self::new(),
            Err(e) => {
                warn!("lecture de l’historique impossible: {e}");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<EntreeHistorique>>(&brut) {
            Ok(mut entrees) => {
                entrees.truncate(CAPACITE_HISTORIQUE);
                info!("historique chargé: {} entrée(s)", entrees.len());
                Self { entrees }
            }
            Err(e) => {
                warn!("historique stocké invalide, ignoré: {e}");
                Self::new()
            }
        }
    }

    /// Ajoute en tête, borne à la capacité, puis persiste tout le journal.
    pub fn enregistrer(
        &mut self,
        expression: impl Into<String>,
        resultat: impl Into<String>,
        horodatage: i64,
        stockage: &mut dyn Stockage,
    ) {
        self.entrees.insert(
            0,
            EntreeHistorique {
                expression: expression.into(),
                resultat: resultat.into(),
                horodatage,
            },
        );
        self.entrees.truncate(CAPACITE_HISTORIQUE);

        if let Err(e) = self.persister(stockage) {
            warn!("sauvegarde de l’historique impossible: {e}");
        }
    }

    fn persister(&self, stockage: &mut dyn Stockage) -> Result<(), ErreurStockage> {
        let json = serde_json::to_string(&self.entrees)?;
        stockage.ecrire(CLE_HISTORIQUE, &json)
    }

    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}
