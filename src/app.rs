// src/app.rs
//
// Calculatrice scientifique: module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, pas de champ texte) :
// - chiffres, + - * / %, . ( ) et "=" via les événements texte
// - Enter = évaluer, Escape = effacer, Backspace = dernier caractère

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

use crate::noyau::Evenement;

/// Événements clavier de la frame, dans l’ordre de frappe.
fn evenements_clavier(ctx: &egui::Context) -> Vec<Evenement> {
    ctx.input(|i| {
        let mut out = Vec::new();
        for e in &i.events {
            match e {
                egui::Event::Text(t) => out.extend(t.chars().filter_map(Evenement::depuis_caractere)),
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => out.push(Evenement::Egal),
                    egui::Key::Escape => out.push(Evenement::Effacer),
                    egui::Key::Backspace => out.push(Evenement::RetourArriere),
                    _ => {}
                },
                _ => {}
            }
        }
        out
    })
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let maintenant = ctx.input(|i| i.time);

        // Retour à "0" différé (après une erreur)
        self.tic(maintenant);

        for evt in evenements_clavier(ctx) {
            self.action(evt, maintenant);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });

        // Réveil à l’échéance, même sans entrée utilisateur
        if let Some(delai) = self.delai_prochaine_echeance(maintenant) {
            ctx.request_repaint_after(Duration::from_secs_f64(delai));
        }
    }
}
