// src/app/vue.rs
//
// Vue egui: écran, pavé, historique
// ---------------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : expression (ou "0") + résultat (ou "Erreur")
// - DEG / RAD, fonctions scientifiques, pavé numérique, historique repliable
//
// Note :
// - Le clavier physique est lu dans app.rs ; ici seulement les boutons.
// - Chaque bouton produit un Evenement, rien d’autre.

use chrono::{DateTime, Local};
use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::historique::EntreeHistorique;
use crate::noyau::{Evenement, Fonction, ModeAngle};

/// Pavé numérique, ligne par ligne ("" = case vide).
const PAVE: [[&str; 4]; 5] = [
    ["C", "DEL", "%", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "−"],
    ["1", "2", "3", "+"],
    ["0", ".", "=", ""],
];

/// Libellé de touche -> événement.
fn evenement_touche(libelle: &str) -> Option<Evenement> {
    match libelle {
        "C" => Some(Evenement::Effacer),
        "DEL" => Some(Evenement::RetourArriere),
        "=" => Some(Evenement::Egal),
        "." | "(" | ")" => Some(Evenement::Valeur(libelle.to_string())),
        _ => {
            let mut chars = libelle.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() => Some(Evenement::Chiffre(c)),
                (Some(c), None) if "%÷×−+".contains(c) => Some(Evenement::Operateur(c)),
                _ => None,
            }
        }
    }
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let maintenant = ui.input(|i| i.time);

        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_mode(ui, maintenant);
                ui.add_space(6.0);
                self.ui_fonctions(ui, maintenant);

                ui.add_space(8.0);
                self.ui_pave_numerique(ui, maintenant);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.monospace(self.calc.texte_expression());

                    let mut resultat = egui::RichText::new(self.calc.texte_resultat())
                        .size(32.0)
                        .monospace();
                    if self.calc.en_erreur() {
                        resultat = resultat.color(ui.visuals().error_fg_color);
                    }
                    ui.label(resultat);
                });
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.horizontal(|ui| {
            ui.label("Angles :");
            for mode in [ModeAngle::Degres, ModeAngle::Radians] {
                let actif = self.calc.mode_angle() == mode;
                if ui.selectable_label(actif, mode.libelle()).clicked() {
                    self.action(Evenement::ModeAngle(mode), maintenant);
                }
            }
        });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.horizontal_wrapped(|ui| {
            for f in Fonction::TOUTES {
                if ui.add_sized([46.0, 28.0], egui::Button::new(f.libelle())).clicked() {
                    self.action(Evenement::Fonction(f), maintenant);
                }
            }

            ui.separator();

            for p in ["(", ")"] {
                self.bouton(ui, p, maintenant);
            }
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for libelle in ligne {
                        if libelle.is_empty() {
                            ui.label("");
                        } else {
                            self.bouton(ui, libelle, maintenant);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, libelle: &str, maintenant: f64) {
        let resp = ui.add_sized([56.0, 36.0], egui::Button::new(libelle));
        if !resp.clicked() {
            return;
        }
        if let Some(evt) = evenement_touche(libelle) {
            self.action(evt, maintenant);
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let titre = format!("Historique ({})", self.calc.historique().len());
        let resp = egui::CollapsingHeader::new(titre)
            .id_salt("historique")
            .open(Some(self.historique_ouvert))
            .show(ui, |ui| {
                if self.calc.historique().is_empty() {
                    ui.weak("aucun calcul");
                    return;
                }
                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .show(ui, |ui| {
                        for e in self.calc.historique().entrees() {
                            Self::ligne_historique(ui, e);
                        }
                    });
            });

        if resp.header_response.clicked() {
            self.historique_ouvert = !self.historique_ouvert;
        }
    }

    fn ligne_historique(ui: &mut egui::Ui, e: &EntreeHistorique) {
        let heure = DateTime::from_timestamp_millis(e.horodatage)
            .map(|d| d.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_default();

        ui.horizontal(|ui| {
            ui.weak(heure);
            ui.monospace(format!("{} = {}", e.expression, e.resultat));
        });
    }
}
