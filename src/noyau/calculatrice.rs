//! Cycle saisie / évaluation.
//!
//! État explicite de la calculatrice (tampon, mode d’angle, historique, résultat affiché),
//! piloté par des `Evenement` venus de l’UI.
//!
//! Cycle :
//! - VIDE -> SAISIE (tampon non vide)
//! - "=" réussi : résultat affiché, historique enregistré, tampon vidé -> VIDE
//! - "=" raté   : "Erreur" affiché, tampon CONSERVÉ, retour à "0" programmé (1,5 s)
//!
//! Le retour programmé ne touche QUE le résultat affiché ; il n’est jamais annulé
//! (un effacement ou une nouvelle saisie entre-temps ne le gêne pas).

use log::{debug, info};

use super::angle::ModeAngle;
use super::erreurs::ErreurEval;
use super::eval::evaluer;
use super::format::formater_nombre;
use super::historique::Historique;
use super::horloge::maintenant_ms;
use super::stockage::Stockage;
use super::tampon::{Fonction, Tampon};

/// Marqueur affiché à la place du résultat après un échec.
pub const MARQUEUR_ERREUR: &str = "Erreur";

/// Durée d’affichage du marqueur d’erreur (secondes).
pub const DUREE_ERREUR_S: f64 = 1.5;

const RESULTAT_ZERO: &str = "0";

/// Événements d’entrée (un par action utilisateur).
#[derive(Clone, Debug, PartialEq)]
pub enum Evenement {
    Chiffre(char),
    Operateur(char),
    /// Parenthèses, point décimal.
    Valeur(String),
    Fonction(Fonction),
    Effacer,
    RetourArriere,
    Egal,
    ModeAngle(ModeAngle),
}

impl Evenement {
    /// Touche texte du clavier -> événement (chiffres, opérateurs, . ( ) =).
    pub fn depuis_caractere(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Evenement::Chiffre(c)),
            '+' | '-' | '*' | '/' | '%' => Some(Evenement::Operateur(c)),
            '.' | '(' | ')' => Some(Evenement::Valeur(c.to_string())),
            '=' => Some(Evenement::Egal),
            _ => None,
        }
    }
}

pub struct Calculatrice {
    tampon: Tampon,
    mode: ModeAngle,
    historique: Historique,
    resultat: String,
    /// Échéances (secondes, horloge UI) des retours à "0" encore en attente.
    retours_a_zero: Vec<f64>,
    stockage: Box<dyn Stockage>,
}

impl Calculatrice {
    /// Charge l’historique une fois, depuis `stockage`.
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        let historique = Historique::charger(stockage.as_ref());
        info!("calculatrice prête ({} entrée(s) d’historique)", historique.len());
        Self {
            tampon: Tampon::new(),
            mode: ModeAngle::default(),
            historique,
            resultat: RESULTAT_ZERO.to_string(),
            retours_a_zero: Vec::new(),
            stockage,
        }
    }

    /* ------------------------ Événements ------------------------ */

    /// `maintenant` : horloge monotone de l’UI, en secondes.
    pub fn traiter(&mut self, evt: Evenement, maintenant: f64) {
        debug!("événement {evt:?}");
        match evt {
            Evenement::Chiffre(d) => {
                let mut buf = [0u8; 4];
                self.tampon.ajouter(d.encode_utf8(&mut buf));
            }
            Evenement::Operateur(glyphe) => {
                self.tampon.ajouter_operateur(glyphe);
            }
            Evenement::Valeur(v) => {
                self.tampon.ajouter(&v);
            }
            Evenement::Fonction(f) => self.tampon.ajouter_fonction(f),
            Evenement::Effacer => self.effacer(),
            Evenement::RetourArriere => {
                self.tampon.retour_arriere();
            }
            Evenement::Egal => {
                // l’issue est déjà reflétée dans l’état affiché
                let _ = self.egal(maintenant);
            }
            Evenement::ModeAngle(m) => self.set_mode_angle(m),
        }
    }

    /// Évalue le tampon.
    ///
    /// - vide : aucun effet, `Err(ExpressionVide)`
    /// - succès : résultat formaté + historique + tampon vidé
    /// - échec : marqueur d’erreur, tampon conservé, retour à "0" programmé
    pub fn egal(&mut self, maintenant: f64) -> Result<f64, ErreurEval> {
        match evaluer(self.tampon.as_str(), self.mode) {
            Ok(v) => {
                let texte = formater_nombre(v);
                self.historique.enregistrer(
                    self.tampon.as_str(),
                    texte.as_str(),
                    maintenant_ms(),
                    self.stockage.as_mut(),
                );
                self.resultat = texte;
                self.tampon.effacer();
                Ok(v)
            }
            Err(ErreurEval::ExpressionVide) => Err(ErreurEval::ExpressionVide),
            Err(e) => {
                debug!("échec de {:?}: {e}", self.tampon.as_str());
                self.resultat = MARQUEUR_ERREUR.to_string();
                self.retours_a_zero.push(maintenant + DUREE_ERREUR_S);
                Err(e)
            }
        }
    }

    /// Déclenche les retours à "0" arrivés à échéance. Retourne true si l’affichage a changé.
    pub fn tic(&mut self, maintenant: f64) -> bool {
        let avant = self.retours_a_zero.len();
        self.retours_a_zero.retain(|&t| t > maintenant);
        if self.retours_a_zero.len() == avant {
            return false;
        }
        self.resultat = RESULTAT_ZERO.to_string();
        true
    }

    /// Tampon vide + résultat "0" (mode d’angle et historique intacts).
    pub fn effacer(&mut self) {
        self.tampon.effacer();
        self.resultat = RESULTAT_ZERO.to_string();
    }

    pub fn set_mode_angle(&mut self, mode: ModeAngle) {
        self.mode = mode;
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn mode_angle(&self) -> ModeAngle {
        self.mode
    }

    /// Texte de l’expression ("0" si vide).
    pub fn texte_expression(&self) -> &str {
        if self.tampon.is_empty() {
            RESULTAT_ZERO
        } else {
            self.tampon.as_str()
        }
    }

    pub fn texte_resultat(&self) -> &str {
        &self.resultat
    }

    pub fn en_erreur(&self) -> bool {
        self.resultat == MARQUEUR_ERREUR
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    /// Prochain retour à "0" en attente (pour programmer un rafraîchissement).
    pub fn prochaine_echeance(&self) -> Option<f64> {
        self.retours_a_zero.iter().copied().reduce(f64::min)
    }
}
