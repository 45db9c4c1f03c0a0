//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (expression, variables, résultat,
//! base d’affichage, démarche) et offrir des opérations simples (C/CLR/AC).
//!
//! Contrats :
//! - Aucune évaluation ici : la vue appelle le noyau et dépose le résultat.
//! - La capacité maths est fixée au démarrage (main.rs) et ne change plus.
//! - Tout échec s’affiche "Error" ; le détail des bits reste à part.

use crate::noyau::{Base, CapaciteMath, Erreurs};

/// Base d’affichage au démarrage.
pub const BASE_DEFAUT: Base = Base::Decimale;

/// Texte affiché pour tout masque d’erreurs non vide.
pub const TEXTE_ERREUR: &str = "Error";

/// Démarche affichée : celle du noyau, telle quelle.
pub use crate::noyau::DemarcheNoyau as Demarche;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrées utilisateur ---
    pub expression: String,
    pub variables: String,

    // --- sorties ---
    pub resultat: String,       // valeur formatée, ou "Error"
    pub erreur: String,         // détail (ex: "variable inconnue")
    pub derniere: Option<f64>, // dernière valeur, reformatée quand la base change

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub base: Base,
    pub vue_liste: bool, // variables : liste (true) ou édition (false)
    pub capacite: CapaciteMath,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(CapaciteMath::default())
    }
}

impl AppCalc {
    pub fn new(capacite: CapaciteMath) -> Self {
        Self {
            expression: String::new(),
            variables: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            derniere: None,
            demarche: Demarche::default(),
            base: BASE_DEFAUT,
            vue_liste: false,
            capacite,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + résultats + base par défaut).
    pub fn reset_total(&mut self) {
        self.expression.clear();
        self.variables.clear();
        self.clear_resultats();
        self.base = BASE_DEFAUT;
        self.vue_liste = false;
    }

    /// C : effacer seulement l’expression (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.expression.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher aux entrées).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.derniere = None;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Échec : "Error" + détail. La démarche partielle reste visible.
    pub fn set_erreur(&mut self, erreurs: Erreurs, demarche: Demarche) {
        self.resultat = TEXTE_ERREUR.to_string();
        self.erreur = erreurs.to_string();
        self.derniere = None;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Succès : valeur formatée dans la base courante.
    pub fn set_valeur(&mut self, v: f64, demarche: Demarche) {
        self.erreur.clear();
        self.derniere = Some(v);
        self.resultat = self.base.formate(v);
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// dec <-> hex ; la dernière valeur est reformatée (pas de réévaluation).
    pub fn bascule_base(&mut self) {
        self.base = self.base.suivante();
        if let Some(v) = self.derniere {
            self.resultat = self.base.formate(v);
        }
        self.focus_entree = true;
    }
}
