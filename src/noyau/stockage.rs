//! Stockage clé-valeur externe (chaînes -> chaînes).
//!
//! Le noyau ne connaît que le trait `Stockage` :
//! - `StockageMemoire`    : HashMap (tests, repli)
//! - `StockageFichier`    : natif, un fichier `<clé>.json` par clé
//! - `StockageNavigateur` : wasm, `window.localStorage`

use std::collections::HashMap;

use super::erreurs::ErreurStockage;

pub trait Stockage {
    /// `Ok(None)` si la clé est absente.
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage>;

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
}

/* ------------------------ Mémoire ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct StockageMemoire {
    valeurs: HashMap<String, String>,
}

impl StockageMemoire {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stockage for StockageMemoire {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        Ok(self.valeurs.get(cle).cloned())
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.valeurs.insert(cle.to_string(), valeur.to_string());
        Ok(())
    }
}

/* ------------------------ Fichier (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
pub use fichier::StockageFichier;

#[cfg(not(target_arch = "wasm32"))]
mod fichier {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use super::{ErreurStockage, Stockage};

    /// Sous-dossier de `dirs::data_dir()`.
    const DOSSIER_APP: &str = "calculatrice-scientifique";

    #[derive(Clone, Debug)]
    pub struct StockageFichier {
        dossier: PathBuf,
    }

    impl StockageFichier {
        pub fn new(dossier: impl Into<PathBuf>) -> Self {
            Self {
                dossier: dossier.into(),
            }
        }

        /// Dossier de données de l’utilisateur (ex: ~/.local/share/calculatrice-scientifique).
        pub fn par_defaut() -> Result<Self, ErreurStockage> {
            let base = dirs::data_dir().ok_or_else(|| {
                ErreurStockage::Indisponible("dossier de données introuvable".into())
            })?;
            Ok(Self::new(base.join(DOSSIER_APP)))
        }

        fn chemin(&self, cle: &str) -> PathBuf {
            self.dossier.join(format!("{cle}.json"))
        }
    }

    impl Stockage for StockageFichier {
        fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
            match fs::read_to_string(self.chemin(cle)) {
                Ok(s) => Ok(Some(s)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            fs::create_dir_all(&self.dossier)?;
            fs::write(self.chemin(cle), valeur)?;
            Ok(())
        }
    }
}

/* ------------------------ localStorage (wasm) ------------------------ */

#[cfg(target_arch = "wasm32")]
pub use navigateur::StockageNavigateur;

#[cfg(target_arch = "wasm32")]
mod navigateur {
    use super::{ErreurStockage, Stockage};

    /// `window.localStorage`, relu à chaque accès (il peut disparaître : mode privé, quota).
    #[derive(Clone, Copy, Debug, Default)]
    pub struct StockageNavigateur;

    fn local_storage() -> Result<web_sys::Storage, ErreurStockage> {
        let w = web_sys::window()
            .ok_or_else(|| ErreurStockage::Indisponible("window() indisponible".into()))?;
        w.local_storage()
            .map_err(|e| ErreurStockage::Indisponible(format!("{e:?}")))?
            .ok_or_else(|| ErreurStockage::Indisponible("localStorage absent".into()))
    }

    impl Stockage for StockageNavigateur {
        fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
            local_storage()?
                .get_item(cle)
                .map_err(|e| ErreurStockage::Indisponible(format!("{e:?}")))
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            local_storage()?
                .set_item(cle, valeur)
                .map_err(|e| ErreurStockage::Indisponible(format!("{e:?}")))
        }
    }
}
