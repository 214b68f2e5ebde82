//! Tests scientifiques (campagne) : propriétés du cycle complet.
//!
//! Tout passe par `Calculatrice` (événements -> affichage -> historique -> stockage),
//! sauf les valeurs numériques pures, vérifiées via `evaluer`.

use approx::assert_abs_diff_eq;

use super::calculatrice::{Calculatrice, Evenement, DUREE_ERREUR_S, MARQUEUR_ERREUR};
use super::erreurs::{ErreurEval, ErreurStockage};
use super::eval::evaluer;
use super::historique::{Historique, CAPACITE_HISTORIQUE, CLE_HISTORIQUE};
use super::stockage::{Stockage, StockageMemoire};
use super::{Fonction, ModeAngle};

fn val(expr: &str, mode: ModeAngle) -> f64 {
    evaluer(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn calc() -> Calculatrice {
    Calculatrice::new(Box::new(StockageMemoire::new()))
}

/// Tape une suite de touches texte (chiffres, opérateurs, . ( ) =).
fn taper(c: &mut Calculatrice, touches: &str, t: f64) {
    for ch in touches.chars() {
        let evt = Evenement::depuis_caractere(ch)
            .unwrap_or_else(|| panic!("touche non gérée: {ch:?}"));
        c.traiter(evt, t);
    }
}

/// Stockage partagé entre deux “sessions” (relecture au démarrage).
#[derive(Clone, Default)]
struct StockagePartage(std::rc::Rc<std::cell::RefCell<StockageMemoire>>);

impl Stockage for StockagePartage {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        self.0.borrow().lire(cle)
    }
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.0.borrow_mut().ecrire(cle, valeur)
    }
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_arithmetique_priorites() {
    let cas = [
        ("1+2*3", 7.0),
        ("(1+2)*3", 9.0),
        ("10-4-3", 3.0),
        ("2*(3+(4-1))/3", 4.0),
        ("-3+5", 2.0),
        ("2*-3", -6.0),
        ("1.5*4", 6.0),
        (".5+.25", 0.75),
        ("7/2", 3.5),
    ];
    for (expr, attendu) in cas {
        assert_abs_diff_eq!(val(expr, ModeAngle::Degres), attendu, epsilon = 1e-9);
    }
}

#[test]
fn sci_pourcent() {
    assert_abs_diff_eq!(val("50%", ModeAngle::Degres), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(val("200+50%", ModeAngle::Degres), 200.5, epsilon = 1e-12);

    // via le clavier : % devient "/100" dans le tampon
    let mut c = calc();
    taper(&mut c, "200+50%", 0.0);
    assert_eq!(c.texte_expression(), "200+50/100");
    c.traiter(Evenement::Egal, 0.0);
    assert_eq!(c.texte_resultat(), "200.5");
}

/* ------------------------ Trig + mode d’angle ------------------------ */

#[test]
fn sci_mode_angle() {
    assert_abs_diff_eq!(val("sin(90)", ModeAngle::Degres), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(val("sin(90)", ModeAngle::Radians), 0.8939966636, epsilon = 1e-9);
    assert_abs_diff_eq!(val("cos(60+0)", ModeAngle::Degres), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(val("tan(45)", ModeAngle::Degres), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(val("2*sin(30)+cos(0)", ModeAngle::Degres), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(val("sin(0-30)", ModeAngle::Degres), -0.5, epsilon = 1e-9);
}

#[test]
fn sci_mode_angle_global_a_la_calculatrice() {
    let mut c = calc();
    c.traiter(Evenement::Fonction(Fonction::Sin), 0.0);
    taper(&mut c, "90)=", 0.0);
    assert_eq!(c.texte_resultat(), "1");

    c.traiter(Evenement::ModeAngle(ModeAngle::Radians), 0.0);
    c.traiter(Evenement::Fonction(Fonction::Sin), 0.0);
    taper(&mut c, "90)=", 0.0);
    assert_eq!(c.texte_resultat(), "0.8939966636");

    // effacer ne touche pas au mode
    c.traiter(Evenement::Effacer, 0.0);
    assert_eq!(c.mode_angle(), ModeAngle::Radians);
}

#[test]
fn sci_fonctions_et_constantes() {
    let mut c = calc();
    c.traiter(Evenement::Fonction(Fonction::Sqrt), 0.0);
    taper(&mut c, "16)+", 0.0);
    c.traiter(Evenement::Fonction(Fonction::Log), 0.0);
    taper(&mut c, "100)=", 0.0);
    assert_eq!(c.texte_resultat(), "6");

    c.traiter(Evenement::Fonction(Fonction::Ln), 0.0);
    c.traiter(Evenement::Fonction(Fonction::E), 0.0);
    taper(&mut c, ")=", 0.0);
    assert_eq!(c.texte_resultat(), "1");

    c.traiter(Evenement::Fonction(Fonction::Pi), 0.0);
    taper(&mut c, "=", 0.0);
    assert_eq!(c.texte_resultat(), "3.1415926536");
}

/* ------------------------ Gardes de saisie ------------------------ */

#[test]
fn sci_gardes_de_saisie() {
    let mut c = calc();
    taper(&mut c, "12.5.", 0.0);
    assert_eq!(c.texte_expression(), "12.5");

    taper(&mut c, "++", 0.0);
    assert_eq!(c.texte_expression(), "12.5+");

    c.traiter(Evenement::Operateur('×'), 0.0);
    assert_eq!(c.texte_expression(), "12.5+");

    c.traiter(Evenement::RetourArriere, 0.0);
    c.traiter(Evenement::Operateur('÷'), 0.0);
    assert_eq!(c.texte_expression(), "12.5/");
}

#[test]
fn sci_affichage_expression_vide() {
    let mut c = calc();
    assert_eq!(c.texte_expression(), "0");
    assert_eq!(c.texte_resultat(), "0");
    c.traiter(Evenement::RetourArriere, 0.0);
    assert_eq!(c.texte_expression(), "0");
}

/* ------------------------ Cycle succès / échec ------------------------ */

#[test]
fn sci_succes_vide_le_tampon_et_enregistre() {
    let mut c = calc();
    taper(&mut c, "1000*1000=", 0.0);
    assert_eq!(c.texte_resultat(), "1,000,000");
    assert_eq!(c.texte_expression(), "0");

    let e = c.historique().entrees().first().expect("entrée attendue");
    assert_eq!(e.expression, "1000*1000");
    assert_eq!(e.resultat, "1,000,000");
    assert!(e.horodatage > 0);
}

#[test]
fn sci_egal_sur_vide_sans_effet() {
    let mut c = calc();
    assert_eq!(c.egal(0.0), Err(ErreurEval::ExpressionVide));
    assert_eq!(c.texte_resultat(), "0");
    assert!(c.prochaine_echeance().is_none());
    assert!(c.historique().is_empty());
}

#[test]
fn sci_non_fini_affiche_erreur_puis_zero() {
    let mut c = calc();
    taper(&mut c, "10/0", 0.0);
    assert_eq!(c.egal(10.0), Err(ErreurEval::ResultatNonFini));

    assert_eq!(c.texte_resultat(), MARQUEUR_ERREUR);
    assert!(c.en_erreur());
    // tampon conservé
    assert_eq!(c.texte_expression(), "10/0");
    assert!(c.historique().is_empty());
    assert_eq!(c.prochaine_echeance(), Some(10.0 + DUREE_ERREUR_S));

    // pas encore
    assert!(!c.tic(10.0 + DUREE_ERREUR_S / 2.0));
    assert_eq!(c.texte_resultat(), MARQUEUR_ERREUR);

    // échéance
    assert!(c.tic(10.0 + DUREE_ERREUR_S));
    assert_eq!(c.texte_resultat(), "0");
    assert_eq!(c.texte_expression(), "10/0");
    assert!(c.prochaine_echeance().is_none());

    // idempotent
    assert!(!c.tic(100.0));
    assert_eq!(c.texte_resultat(), "0");
}

#[test]
fn sci_erreur_de_syntaxe() {
    let mut c = calc();
    taper(&mut c, "(1+2", 0.0);
    assert!(matches!(c.egal(0.0), Err(ErreurEval::Syntaxe(_))));
    assert_eq!(c.texte_resultat(), MARQUEUR_ERREUR);

    // opérateur final
    let mut c = calc();
    taper(&mut c, "5+", 0.0);
    assert!(matches!(c.egal(0.0), Err(ErreurEval::Syntaxe(_))));
    assert_eq!(c.texte_expression(), "5+");
}

#[test]
fn sci_retour_differe_ne_touche_pas_au_tampon() {
    let mut c = calc();
    taper(&mut c, "1/0=", 0.0);
    assert!(c.en_erreur());

    // nouvelle saisie avant l’échéance
    c.traiter(Evenement::Effacer, 0.5);
    taper(&mut c, "7+8", 0.6);

    assert!(c.tic(2.0));
    assert_eq!(c.texte_expression(), "7+8");
    assert_eq!(c.texte_resultat(), "0");

    c.traiter(Evenement::Egal, 2.1);
    assert_eq!(c.texte_resultat(), "15");
}

/* ------------------------ Historique ------------------------ */

#[test]
fn sci_historique_cinquante_et_un() {
    let mut c = calc();
    for i in 0..=CAPACITE_HISTORIQUE {
        taper(&mut c, &format!("{i}+0="), 0.0);
    }
    let h = c.historique();
    assert_eq!(h.len(), CAPACITE_HISTORIQUE);
    assert_eq!(h.entrees()[0].expression, format!("{CAPACITE_HISTORIQUE}+0"));
    assert_eq!(
        h.entrees()[CAPACITE_HISTORIQUE - 1].expression,
        "1+0".to_string()
    );
    assert!(h.entrees().iter().all(|e| e.expression != "0+0"));
}

#[test]
fn sci_historique_persiste_puis_recharge() {
    let partage = StockagePartage::default();

    let mut c = Calculatrice::new(Box::new(partage.clone()));
    taper(&mut c, "2+2=", 0.0);
    taper(&mut c, "3*3=", 0.0);

    let relu = Calculatrice::new(Box::new(partage.clone()));
    assert_eq!(relu.historique(), c.historique());
    assert_eq!(relu.historique().entrees()[0].resultat, "9");
}

#[test]
fn sci_historique_corrompu_au_demarrage() {
    let mut st = StockageMemoire::new();
    st.ecrire(CLE_HISTORIQUE, "[{\"expression\": 12}]").unwrap();

    let c = Calculatrice::new(Box::new(st));
    assert!(c.historique().is_empty());
    assert_eq!(*c.historique(), Historique::new());
}
