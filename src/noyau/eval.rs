//! Noyau : évaluation (texte -> f64)
//!
//! texte -> trig (sin/cos/tan, argument évalué + converti selon le mode)
//!       -> réécriture ln/log/sqrt -> jetons -> RPN -> f64 -> contrôle “fini”
//!
//! Aucun code dynamique : seul le jeu fixe d’opérateurs et d’appels natifs
//! reconnus par `rpn.rs` est exécutable.

use std::sync::OnceLock;

use log::debug;
use regex::{Captures, Regex};

use super::angle::ModeAngle;
use super::erreurs::ErreurEval;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, format_rpn, to_rpn, Native};

/// Fonctions trig, dans l’ordre de substitution.
const TRIG: [(&str, Native); 3] = [("sin", Native::Sin), ("cos", Native::Cos), ("tan", Native::Tan)];

/// Réécritures textuelles après la trig.
const REECRITURES: [(&str, &str); 3] = [
    ("ln(", "f64::ln("),
    ("log(", "f64::log10("),
    ("sqrt(", "f64::sqrt("),
];

/// `nom(` + argument sans ')' + `)` : la première ')' ferme (pas d’imbrication).
fn motifs_trig() -> &'static [(Regex, Native); 3] {
    static MOTIFS: OnceLock<[(Regex, Native); 3]> = OnceLock::new();
    MOTIFS.get_or_init(|| {
        TRIG.map(|(nom, f)| {
            let motif = format!(r"{nom}\(([^)]+)\)");
            // motif construit à partir de constantes : toujours valide
            (Regex::new(&motif).expect("motif trig invalide"), f)
        })
    })
}

/// API publique : évalue une expression saisie.
///
/// - vide => `ExpressionVide`
/// - jetons/RPN invalides => `Syntaxe`
/// - infini ou NaN => `ResultatNonFini`
pub fn evaluer(expression: &str, mode: ModeAngle) -> Result<f64, ErreurEval> {
    if expression.trim().is_empty() {
        return Err(ErreurEval::ExpressionVide);
    }

    let apres_trig = substituer_trig(expression, mode);
    let reecrit = reecrire_fonctions(&apres_trig);
    debug!("évaluation {expression:?} ({}) -> {reecrit:?}", mode.libelle());

    let v = evaluer_arithmetique(&reecrit)?;
    debug!("résultat {expression:?} = {v}");
    Ok(v)
}

/// Arithmétique seule : jetons -> RPN -> f64, résultat obligatoirement fini.
pub fn evaluer_arithmetique(s: &str) -> Result<f64, ErreurEval> {
    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    debug!("jetons [{}] rpn [{}]", format_tokens(&jetons), format_rpn(&rpn));

    let v = eval_rpn(&rpn)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::ResultatNonFini)
    }
}

/// Remplace chaque `sin(a)`, `cos(a)`, `tan(a)` par `f64::sin(<radians>)`, etc.
/// Si `a` ne s’évalue pas, l’occurrence reste telle quelle (l’évaluation finale échouera).
fn substituer_trig(expression: &str, mode: ModeAngle) -> String {
    let mut s = expression.to_string();

    for (motif, f) in motifs_trig() {
        s = motif
            .replace_all(&s, |c: &Captures| match evaluer_arithmetique(&c[1]) {
                Ok(v) => format!("{}({})", f.nom(), mode.vers_radians(v)),
                Err(_) => c[0].to_string(),
            })
            .into_owned();
    }

    s
}

fn reecrire_fonctions(s: &str) -> String {
    REECRITURES
        .iter()
        .fold(s.to_string(), |acc, (de, vers)| acc.replace(de, vers))
}
