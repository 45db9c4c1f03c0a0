//! Noyau MemoCalc
//!
//! Organisation interne :
//! - jetons.rs     : lexeur à automate fini
//! - variables.rs  : affectations "nom = valeur"
//! - registre.rs   : fonctions unaires + constantes, capacité maths
//! - resolution.rs : valeurs attachées aux jetons
//! - descente.rs   : descente récursive -> arbre (expr.rs)
//! - canon.rs      : réassociation de - et /
//! - eval.rs       : évaluation + pipeline complet
//! - lecture.rs    : codec numérique (décimal, hexadécimal)
//! - format.rs     : affichage de l’arbre (démarche)
//! - erreurs.rs    : masque d’erreurs

pub mod canon;
pub mod descente;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod registre;
pub mod resolution;
pub mod variables;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::Erreurs;
pub use eval::{evaluate, evaluate_detaille, DemarcheNoyau};
pub use lecture::Base;
pub use registre::{list_function_names, lookup_constant, lookup_function, CapaciteMath};
pub use variables::format_variables;
