//! Tests fuzz safe : robustesse + invariants, via proptest.
//!
//! - l’évaluateur ne panique jamais et ne rend que des valeurs finies
//! - arbres arithmétiques générés : même valeur que le calcul direct en Rust
//! - format idempotent (relecture puis re-format), égal à round(x·10^10)/10^10
//! - historique borné, plus récent en tête
//! - tampon : au plus un '.' dans le segment numérique courant

use proptest::prelude::*;

use super::calculatrice::{Calculatrice, Evenement};
use super::eval::evaluer;
use super::format::formater_nombre;
use super::historique::{Historique, CAPACITE_HISTORIQUE};
use super::stockage::StockageMemoire;
use super::ModeAngle;

/// Relit un nombre formaté ("1,234.5" -> 1234.5).
fn lire_nombre_formate(texte: &str) -> Option<f64> {
    texte.replace(',', "").parse::<f64>().ok()
}

/// Chiffres après le point.
fn decimales(texte: &str) -> usize {
    texte.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/* ------------------------ Arbres arithmétiques ------------------------ */

#[derive(Clone, Debug)]
enum Arbre {
    Nombre(u32),
    Add(Box<Arbre>, Box<Arbre>),
    Sub(Box<Arbre>, Box<Arbre>),
    Mul(Box<Arbre>, Box<Arbre>),
    // diviseur toujours non nul
    Div(Box<Arbre>, u32),
    Neg(Box<Arbre>),
}

impl Arbre {
    fn texte(&self) -> String {
        match self {
            Arbre::Nombre(n) => n.to_string(),
            Arbre::Add(a, b) => format!("({}+{})", a.texte(), b.texte()),
            Arbre::Sub(a, b) => format!("({}-{})", a.texte(), b.texte()),
            Arbre::Mul(a, b) => format!("({}*{})", a.texte(), b.texte()),
            Arbre::Div(a, d) => format!("({}/{d})", a.texte()),
            Arbre::Neg(a) => format!("(-{})", a.texte()),
        }
    }

    fn valeur(&self) -> f64 {
        match self {
            Arbre::Nombre(n) => *n as f64,
            Arbre::Add(a, b) => a.valeur() + b.valeur(),
            Arbre::Sub(a, b) => a.valeur() - b.valeur(),
            Arbre::Mul(a, b) => a.valeur() * b.valeur(),
            Arbre::Div(a, d) => a.valeur() / *d as f64,
            Arbre::Neg(a) => -a.valeur(),
        }
    }
}

fn arbre() -> impl Strategy<Value = Arbre> {
    let feuille = (0u32..1000).prop_map(Arbre::Nombre);
    feuille.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Arbre::Add(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Arbre::Sub(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Arbre::Mul(Box::new(a), Box::new(b))),
            (inner.clone(), 1u32..100).prop_map(|(a, d)| Arbre::Div(Box::new(a), d)),
            inner.prop_map(|a| Arbre::Neg(Box::new(a))),
        ]
    })
}

prop_compose! {
    fn evenement_saisie()(variant in 0..6u8, chiffre in 0..10u32, op in 0..5usize) -> Evenement {
        match variant {
            0 | 1 => Evenement::Chiffre(char::from_digit(chiffre, 10).unwrap_or('0')),
            2 => Evenement::Valeur(".".into()),
            3 => Evenement::Operateur(['+', '-', '×', '÷', '%'][op]),
            4 => Evenement::Valeur(if op % 2 == 0 { "(".into() } else { ")".into() }),
            _ => Evenement::RetourArriere,
        }
    }
}

proptest! {
    #[test]
    fn evaluateur_ne_panique_jamais(s in "[0-9+*/%.()a-z -]{0,30}", rad in any::<bool>()) {
        let mode = if rad { ModeAngle::Radians } else { ModeAngle::Degres };
        if let Ok(v) = evaluer(&s, mode) {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn arithmetique_exacte(a in arbre()) {
        let attendu = a.valeur();
        let obtenu = evaluer(&a.texte(), ModeAngle::Degres);
        prop_assert!(obtenu.is_ok(), "{} -> {:?}", a.texte(), obtenu);
        let v = obtenu.unwrap_or(f64::NAN);
        prop_assert!((v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0), "{} = {} != {}", a.texte(), v, attendu);
    }

    #[test]
    fn format_idempotent_petits(x in -1e12f64..1e12) {
        let f = formater_nombre(x);
        let relu = lire_nombre_formate(&f);
        prop_assert!(relu.is_some(), "{}", f);
        prop_assert_eq!(formater_nombre(relu.unwrap_or(f64::NAN)), f);
    }

    #[test]
    fn format_idempotent_tous(x in any::<f64>().prop_filter("fini", |x| x.is_finite())) {
        let f = formater_nombre(x);
        let relu = lire_nombre_formate(&f);
        prop_assert!(relu.is_some(), "{}", f);
        prop_assert_eq!(formater_nombre(relu.unwrap_or(f64::NAN)), f);
    }

    #[test]
    fn format_egal_arrondi_de_reference(x in -2e5f64..2e5) {
        let attendu = (x * 1e10).round() / 1e10;
        let f = formater_nombre(x);
        prop_assert_eq!(lire_nombre_formate(&f), Some(attendu), "{}", f);

        let court = attendu.to_string();
        prop_assert!(
            decimales(&f) <= decimales(&court),
            "{} a plus de décimales que {}", f, court
        );
    }

    #[test]
    fn format_au_plus_dix_decimales(x in any::<f64>().prop_filter("fini", |x| x.is_finite())) {
        let f = formater_nombre(x);
        prop_assert!(decimales(&f) <= 10, "{}", f);
        prop_assert!(!f.contains(['e', 'E']), "{}", f);
    }

    #[test]
    fn historique_borne(n in 0usize..120) {
        let mut st = StockageMemoire::new();
        let mut h = Historique::new();
        for i in 0..n {
            h.enregistrer(format!("{i}"), format!("{i}"), i as i64, &mut st);
        }
        prop_assert_eq!(h.len(), n.min(CAPACITE_HISTORIQUE));
        if n > 0 {
            let plus_recente = format!("{}", n - 1);
            prop_assert_eq!(h.entrees()[0].expression.as_str(), plus_recente.as_str());
        }
    }

    #[test]
    fn un_point_par_segment(evts in proptest::collection::vec(evenement_saisie(), 0..40)) {
        let mut c = Calculatrice::new(Box::new(StockageMemoire::new()));
        for e in evts {
            c.traiter(e, 0.0);
            let texte = c.texte_expression();
            let segment = texte
                .rsplit(|ch: char| matches!(ch, '+' | '-' | '*' | '/'))
                .next()
                .unwrap_or("");
            prop_assert!(segment.matches('.').count() <= 1, "{}", texte);
        }
    }
}
