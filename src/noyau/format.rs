// src/noyau/format.rs
//
// Affichage du résultat : arrondi à 10 décimales + séparateur de milliers.

/// Nombre de décimales conservées (bruit flottant au-delà).
pub const DECIMALES: usize = 10;

const SEPARATEUR_MILLIERS: char = ',';

/* ------------------------ Arrondi ------------------------ */

const ECHELLE: f64 = 1e10;

/// Au-delà, `valeur * 1e10` n’est plus exact à 0,5 près : `round` n’est plus un point fixe.
const LIMITE_PRODUIT: f64 = (1u64 << 51) as f64;

/// round(valeur × 10^10) / 10^10.
///
/// Pour les grandes valeurs (ou si le produit déborde), arrondi décimal exact
/// via `{:.10}` puis relecture : même résultat, sans dérive d’un ulp.
fn arrondir(valeur: f64) -> f64 {
    let produit = valeur * ECHELLE;
    if produit.abs() < LIMITE_PRODUIT {
        return produit.round() / ECHELLE;
    }
    format!("{valeur:.DECIMALES$}").parse().unwrap_or(valeur)
}

/// Forme la plus courte de la valeur arrondie (`{}` : jamais d’exposant) ; -0 devient 0.
fn texte_arrondi(valeur: f64) -> String {
    let texte = arrondir(valeur).to_string();
    if texte == "-0" {
        "0".to_string()
    } else {
        texte
    }
}

/* ------------------------ Milliers ------------------------ */

/// "1234567" -> "1,234,567" (chiffres seuls, sans signe).
fn grouper_milliers(chiffres: &str) -> String {
    let n = chiffres.len();
    let mut out = String::with_capacity(n + n / 3);
    for (i, c) in chiffres.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(SEPARATEUR_MILLIERS);
        }
        out.push(c);
    }
    out
}

/* ------------------------ API ------------------------ */

/// Formate un résultat fini pour l’écran et l’historique.
///
/// - 1234567.891 -> "1,234,567.891"
/// - -1234       -> "-1,234"
/// - 0.1 + 0.2   -> "0.3"
pub fn formater_nombre(valeur: f64) -> String {
    let texte = texte_arrondi(valeur);

    let (signe, corps) = match texte.strip_prefix('-') {
        Some(reste) => ("-", reste),
        None => ("", texte.as_str()),
    };

    let mut out = String::from(signe);
    match corps.split_once('.') {
        Some((entier, frac)) => {
            out.push_str(&grouper_milliers(entier));
            out.push('.');
            out.push_str(frac);
        }
        None => out.push_str(&grouper_milliers(corps)),
    }
    out
}
