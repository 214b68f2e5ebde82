// src/noyau/tampon.rs
//
// Tampon de saisie (expression en cours).
// Modifié seulement par : ajout, retour arrière, effacement.
//
// Gardes :
// - '.' refusé si le segment numérique courant (après le dernier + - * /) en contient déjà un
// - opérateur binaire refusé sur tampon vide ou juste après un autre + - * /
//   ("(+" reste possible ; un opérateur final échoue plus tard, à l’évaluation)

use std::f64::consts::{E, PI};

use log::debug;

const OPERATEURS: [char; 4] = ['+', '-', '*', '/'];

/// Suffixe “divisé par 100” inséré pour %.
const SUFFIXE_POURCENT: &str = "/100";

/// Touches “fonction” du clavier scientifique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Sqrt,
    Pi,
    E,
}

impl Fonction {
    pub const TOUTES: [Fonction; 8] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Ln,
        Fonction::Log,
        Fonction::Sqrt,
        Fonction::Pi,
        Fonction::E,
    ];

    /// Texte inséré : forme ouvrante, ou valeur décimale pour les constantes.
    pub fn jeton(self) -> String {
        match self {
            Fonction::Sin => "sin(".into(),
            Fonction::Cos => "cos(".into(),
            Fonction::Tan => "tan(".into(),
            Fonction::Ln => "ln(".into(),
            Fonction::Log => "log(".into(),
            Fonction::Sqrt => "sqrt(".into(),
            Fonction::Pi => PI.to_string(),
            Fonction::E => E.to_string(),
        }
    }

    /// Libellé du bouton.
    pub fn libelle(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Sqrt => "√",
            Fonction::Pi => "π",
            Fonction::E => "e",
        }
    }
}

/// Glyphe UI -> opérateur stocké (None si inconnu).
fn normaliser_operateur(glyphe: char) -> Option<char> {
    match glyphe {
        '+' => Some('+'),
        '-' | '−' => Some('-'),
        '*' | '×' => Some('*'),
        '/' | '÷' => Some('/'),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
}

impl Tampon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.texte
    }

    pub fn is_empty(&self) -> bool {
        self.texte.is_empty()
    }

    /// Segment numérique courant : tout ce qui suit le dernier + - * /.
    fn segment_courant(&self) -> &str {
        match self.texte.rfind(|c: char| OPERATEURS.contains(&c)) {
            Some(i) => &self.texte[i + 1..],
            None => &self.texte,
        }
    }

    /// Ajoute un jeton tel quel ; seul "." est filtré (un par segment).
    /// Retourne false si refusé.
    pub fn ajouter(&mut self, jeton: &str) -> bool {
        if jeton == "." && self.segment_courant().contains('.') {
            debug!("point refusé: segment {:?}", self.segment_courant());
            return false;
        }
        self.texte.push_str(jeton);
        true
    }

    /// Ajoute un opérateur saisi (+ - × ÷ − * / %).
    /// Retourne false si refusé.
    pub fn ajouter_operateur(&mut self, glyphe: char) -> bool {
        // % : suffixe autonome, sans garde
        if glyphe == '%' {
            self.texte.push_str(SUFFIXE_POURCENT);
            return true;
        }

        let Some(op) = normaliser_operateur(glyphe) else {
            debug!("glyphe opérateur inconnu: {glyphe:?}");
            return false;
        };

        match self.texte.chars().last() {
            Some(c) if !OPERATEURS.contains(&c) => {
                self.texte.push(op);
                true
            }
            _ => {
                debug!("opérateur {op:?} refusé après {:?}", self.texte);
                false
            }
        }
    }

    pub fn ajouter_fonction(&mut self, f: Fonction) {
        self.texte.push_str(&f.jeton());
    }

    /// Retire exactement le dernier caractère (sans effet si vide).
    pub fn retour_arriere(&mut self) -> bool {
        self.texte.pop().is_some()
    }

    pub fn effacer(&mut self) {
        self.texte.clear();
    }
}
