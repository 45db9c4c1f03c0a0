// src/app/vue.rs
//
// Vue (UI egui) - natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ expression avait le focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Variables : édition multiligne, ou liste "nom=valeur" (clic = insertion)
// - Fonctions : menu déroulant, absent sans bibliothèque maths
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppCalc, Demarche};
use crate::noyau::descente::LONGUEUR_MAX;
use crate::noyau::lecture::format_decimal;
use crate::noyau::{
    evaluate_detaille, format_variables, list_function_names, lookup_constant, lookup_function,
};

/// Constantes proposées en boutons.
const CONSTANTES: [&str; 4] = ["e", "pi", "g", "c"];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("MemoCalc");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_variables(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.expression)
                .desired_width(ui.available_width())
                .hint_text("Ex: x*2, 2-3+4, sin(pi/6), 0xff&0x0f")
                .id_salt("expression_edit")
                .char_limit(LONGUEUR_MAX)
                .code_editor(),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        // un champ mono-ligne rend le focus sur Enter
        if resp.lost_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = expression seule ; CLR = résultats seuls ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’expression", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            let base = self.base.libelle();
            self.bouton_action(ui, base, "Bascule décimal / hexadécimal", Action::BasculeBase);
        });

        ui.add_space(8.0);

        // Opérateurs + constantes + fonctions + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            for op in ["+", "-", "*", "/", "^", "&", "|", "~"] {
                self.bouton_insert(ui, op, op, InsertKind::Op);
            }

            ui.separator();

            for nom in CONSTANTES {
                let valeur = lookup_constant(nom).map(format_decimal).unwrap_or_default();
                let resp = ui
                    .add_sized([46.0, 28.0], egui::Button::new(nom))
                    .on_hover_text(valeur);
                if resp.clicked() {
                    self.inserer(nom, InsertKind::Word);
                }
            }

            self.ui_fonctions(ui);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);
    }

    /// Menu des fonctions (absent sans bibliothèque maths).
    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        let noms = list_function_names(self.capacite);
        if noms.is_empty() {
            return;
        }

        let mut choisie: Option<&'static str> = None;
        egui::ComboBox::from_id_salt("fonctions_menu")
            .selected_text("f(x)")
            .show_ui(ui, |ui| {
                for nom in noms {
                    if ui.selectable_label(false, nom).clicked() {
                        choisie = Some(nom);
                    }
                }
            });

        if let Some(nom) = choisie {
            self.inserer(&format!("{nom}("), InsertKind::Func);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_memocalc")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "0x", "0x", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup une tête d’appel ("log10(")
    /// ou une constante ("pi").
    fn backspace_entree(&mut self) {
        let s = self.expression.trim_end();
        let mut fin = s.len();

        let sans_par = s.strip_suffix('(').unwrap_or(s);
        let nom_debut = sans_par
            .char_indices()
            .rev()
            .take_while(|&(_, c)| c.is_ascii_alphanumeric())
            .last()
            .map_or(sans_par.len(), |(i, _)| i);
        let nom = &sans_par[nom_debut..];

        let appel = sans_par.len() < s.len() && lookup_function(nom, self.capacite).is_some();
        let constante = sans_par.len() == s.len() && CONSTANTES.contains(&nom);

        if appel || constante {
            fin = nom_debut;
        } else if let Some((i, _)) = s.char_indices().last() {
            fin = i;
        }

        self.expression.truncate(fin);
        let garde = self.expression.trim_end().len();
        self.expression.truncate(garde);
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Résultat ({}) :", self.base.libelle()));
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_variables(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Variables :");
            ui.selectable_value(&mut self.vue_liste, false, "Édition");
            ui.selectable_value(&mut self.vue_liste, true, "Liste");
        });

        if !self.vue_liste {
            ui.add(
                egui::TextEdit::multiline(&mut self.variables)
                    .desired_width(ui.available_width())
                    .desired_rows(3)
                    .hint_text("Ex: x = 6.25  y = -2")
                    .id_salt("variables_edit")
                    .code_editor(),
            );
            return;
        }

        match format_variables(&self.variables) {
            Ok(lignes) if lignes.is_empty() => {
                ui.monospace("(aucune)");
            }
            Ok(lignes) => {
                let mut choisie: Option<String> = None;
                for ligne in &lignes {
                    if ui.selectable_label(false, egui::RichText::new(ligne).monospace()).clicked() {
                        choisie = ligne.split_once('=').map(|(nom, _)| nom.to_string());
                    }
                }
                if let Some(nom) = choisie {
                    self.inserer(&nom, InsertKind::Word);
                }
            }
            Err(e) => {
                ui.colored_label(ui.visuals().error_fg_color, super::etat::TEXTE_ERREUR)
                    .on_hover_text(e.to_string());
            }
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Avant", "demarche_avant", &self.demarche.avant);
                Self::champ_demarche(ui, "Après", "demarche_apres", &self.demarche.apres);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::BasculeBase => self.bascule_base(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert, kind);
        }
    }

    fn inserer(&mut self, to_insert: &str, kind: InsertKind) {
        if to_insert.is_empty() {
            return;
        }
        // les boutons respectent la même borne que la saisie clavier
        let mut essai = self.expression.clone();
        inserer_dans(&mut essai, to_insert, kind);
        if essai.chars().count() > LONGUEUR_MAX {
            return;
        }
        inserer_dans(&mut self.expression, to_insert, kind);
        self.focus_entree = true;
    }

    /// Évalue via le noyau, puis dépose résultat + démarche dans l’état UI.
    /// Expression vide : "0", sans appel au noyau.
    fn eval_via_noyau(&mut self) {
        let s = self.expression.trim();
        if s.is_empty() {
            self.set_valeur(0.0, Demarche::default());
            return;
        }

        let (r, demarche) = evaluate_detaille(s, &self.variables, self.capacite);
        match r {
            Ok(v) => self.set_valeur(v, demarche),
            Err(e) => self.set_erreur(e, demarche),
        }
    }
}

/// Insertion “propre” : espaces autour des opérateurs, aucun à l’intérieur
/// d’un nombre. Un espace ne coupe jamais un jeton pour le lexeur.
fn inserer_dans(entree: &mut String, to_insert: &str, kind: InsertKind) {
    let dernier = entree.chars().rev().find(|c| !c.is_whitespace());

    match kind {
        InsertKind::CloseParen => {
            let garde = entree.trim_end().len();
            entree.truncate(garde);
            entree.push_str(to_insert);
        }
        InsertKind::OpenParen | InsertKind::Func => {
            if let Some(c) = dernier {
                if c.is_ascii_digit() || c.is_ascii_alphabetic() || c == ')' {
                    entree.push(' ');
                }
            }
            entree.push_str(to_insert);
        }
        InsertKind::Op => {
            let garde = entree.trim_end().len();
            entree.truncate(garde);
            if !entree.is_empty() {
                entree.push(' ');
            }
            entree.push_str(to_insert);
            entree.push(' ');
        }
        InsertKind::Digit => {
            // chiffres: pas d’espaces auto
            entree.push_str(to_insert);
        }
        InsertKind::Word => {
            // mots: espace si juste avant c’est un chiffre ou ')'
            if !entree.ends_with(char::is_whitespace) {
                if let Some(c) = dernier {
                    if c.is_ascii_digit() || c == ')' {
                        entree.push(' ');
                    }
                }
            }
            entree.push_str(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    BasculeBase,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
