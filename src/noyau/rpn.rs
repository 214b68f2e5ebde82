// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - Ident(name): seulement les appels natifs f64::{sin,cos,tan,ln,log10,sqrt},
//   toujours suivis de '(' ; tout autre identifiant est une erreur.
// - '-' / '+' quand on n’attend PAS une valeur => unaire (priorité max).
// - Deux valeurs juxtaposées ("2(3)", "(1)(2)") => erreur, pas de multiplication implicite.

use super::erreurs::ErreurEval;
use super::jetons::Tok;

/// Fonctions natives appelables après réécriture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Native {
    Sin,
    Cos,
    Tan,
    Ln,
    Log10,
    Sqrt,
}

impl Native {
    pub fn depuis_ident(name: &str) -> Option<Self> {
        match name {
            "f64::sin" => Some(Native::Sin),
            "f64::cos" => Some(Native::Cos),
            "f64::tan" => Some(Native::Tan),
            "f64::ln" => Some(Native::Ln),
            "f64::log10" => Some(Native::Log10),
            "f64::sqrt" => Some(Native::Sqrt),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Native::Sin => "f64::sin",
            Native::Cos => "f64::cos",
            Native::Tan => "f64::tan",
            Native::Ln => "f64::ln",
            Native::Log10 => "f64::log10",
            Native::Sqrt => "f64::sqrt",
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Native::Sin => x.sin(),
            Native::Cos => x.cos(),
            Native::Tan => x.tan(),
            Native::Ln => x.ln(),
            Native::Log10 => x.log10(),
            Native::Sqrt => x.sqrt(),
        }
    }
}

/// Élément de la RPN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Appel(Native),
}

/// Pile des opérateurs pendant le shunting-yard.
#[derive(Clone, Copy, Debug)]
enum Attente {
    LPar,
    Op(Rpn),
    Fonction(Native),
}

fn precedence(op: Rpn) -> i32 {
    match op {
        Rpn::Add | Rpn::Sub => 1,
        Rpn::Mul | Rpn::Div => 2,
        Rpn::Neg => 3,
        _ => 0,
    }
}

fn binaire(t: &Tok) -> Option<Rpn> {
    match t {
        Tok::Plus => Some(Rpn::Add),
        Tok::Minus => Some(Rpn::Sub),
        Tok::Star => Some(Rpn::Mul),
        Tok::Slash => Some(Rpn::Div),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, Minus, Ident("f64::sqrt"), LPar, Num(4), RPar]
///   rpn:    [Num(2), Num(4), Appel(Sqrt), Neg, Mul]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurEval> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Attente> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter les unaires et les juxtapositions.
    let mut prev_was_value = false;

    let mut it = tokens.iter().peekable();
    while let Some(tok) = it.next() {
        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant"));
                }
                out.push(Rpn::Num(*v));
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant"));
                }
                let f = Native::depuis_ident(name)
                    .ok_or_else(|| ErreurEval::syntaxe(format!("identifiant inconnu: {name}")))?;
                if it.peek() != Some(&&Tok::LPar) {
                    return Err(ErreurEval::syntaxe(format!("{name} sans parenthèse")));
                }
                // fonction : gardée sur la pile, sortie après sa parenthèse fermante
                ops.push(Attente::Fonction(f));
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant"));
                }
                ops.push(Attente::LPar);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("opérande manquant avant ')'"));
                }
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    match top {
                        Attente::LPar => {
                            ouverte = true;
                            break;
                        }
                        Attente::Op(op) => out.push(op),
                        Attente::Fonction(f) => out.push(Rpn::Appel(f)),
                    }
                }
                if !ouverte {
                    return Err(ErreurEval::syntaxe("')' sans '(' correspondante"));
                }

                // si une fonction attend son argument, on la sort aussi
                if let Some(Attente::Fonction(f)) = ops.last().copied() {
                    ops.pop();
                    out.push(Rpn::Appel(f));
                }
            }

            Tok::Minus if !prev_was_value => ops.push(Attente::Op(Rpn::Neg)),
            // + unaire : sans effet
            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("opérande manquant"));
                }
                let op = binaire(tok).ok_or_else(|| ErreurEval::syntaxe("opérateur inconnu"))?;

                // gauche-associatif : sort tout ce qui lie au moins aussi fort
                while let Some(Attente::Op(top)) = ops.last().copied() {
                    if precedence(top) >= precedence(op) {
                        ops.pop();
                        out.push(top);
                    } else {
                        break;
                    }
                }

                ops.push(Attente::Op(op));
                prev_was_value = false;
                continue;
            }
        }

        prev_was_value = matches!(tok, Tok::Num(_) | Tok::RPar);
    }

    if !prev_was_value {
        return Err(ErreurEval::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            Attente::LPar => return Err(ErreurEval::syntaxe("parenthèses non fermées")),
            Attente::Op(op) => out.push(op),
            Attente::Fonction(f) => out.push(Rpn::Appel(f)),
        }
    }

    Ok(out)
}

/// Évalue une RPN sur une pile de f64.
pub fn eval_rpn(rpn: &[Rpn]) -> Result<f64, ErreurEval> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for el in rpn {
        match *el {
            Rpn::Num(v) => st.push(v),

            Rpn::Neg => {
                let x = st.pop().ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                st.push(-x);
            }

            Rpn::Appel(f) => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("fonction sans argument"))?;
                st.push(f.appliquer(x));
            }

            Rpn::Add | Rpn::Sub | Rpn::Mul | Rpn::Div => {
                let b = st.pop().ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                let a = st.pop().ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                st.push(match *el {
                    Rpn::Add => a + b,
                    Rpn::Sub => a - b,
                    Rpn::Mul => a * b,
                    _ => a / b,
                });
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurEval::syntaxe("expression invalide")),
    }
}

/// Format utilitaire (journal) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|el| match el {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Add => "+".to_string(),
            Rpn::Sub => "-".to_string(),
            Rpn::Mul => "*".to_string(),
            Rpn::Div => "/".to_string(),
            Rpn::Neg => "neg".to_string(),
            Rpn::Appel(f) => f.nom().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
