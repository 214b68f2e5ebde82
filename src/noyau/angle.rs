// src/noyau/angle.rs

use std::f64::consts::PI;

/// Interprétation des arguments de sin/cos/tan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    /// Valeur saisie -> radians (identité en mode Radians).
    pub fn vers_radians(self, valeur: f64) -> f64 {
        match self {
            ModeAngle::Degres => valeur * PI / 180.0,
            ModeAngle::Radians => valeur,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}
