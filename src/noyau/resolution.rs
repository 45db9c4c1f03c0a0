// src/noyau/resolution.rs
//
// Résolution des jetons (un seul passage) :
// - Num  : littéral lu par le codec (lecture.rs)
// - Name suivi de '(' : tête d’appel -> fonction du registre
// - Name sinon : variable (première liaison au nom exact), puis constante
//
// Une variable masque une constante du même nom (e, pi, g, c).
// Les erreurs du passage se cumulent.

use super::erreurs::Erreurs;
use super::jetons::{Jeton, Tok, Valeur};
use super::lecture::parse_number;
use super::registre::{lookup_constant, lookup_function, CapaciteMath};
use super::variables::Liaisons;

pub fn resolve(
    jetons: &mut [Jeton],
    source: &str,
    liaisons: &Liaisons,
    cap: CapaciteMath,
) -> Result<(), Erreurs> {
    let mut err = Erreurs::AUCUNE;

    for i in 0..jetons.len() {
        let appel = jetons.get(i + 1).is_some_and(|s| s.tok == Tok::LPar);
        let jeton = &mut jetons[i];
        let texte = jeton.texte(source);

        match jeton.tok {
            Tok::Num => match parse_number(&texte) {
                Ok(v) => jeton.valeur = Valeur::Nombre(v),
                Err(e) => {
                    tracing::debug!(litteral = %texte, erreur = %e, "résolution: littéral refusé");
                    err |= Erreurs::SYNTAXE;
                }
            },

            Tok::Name if appel => match lookup_function(&texte, cap) {
                Some(f) => jeton.valeur = Valeur::Fonction(f),
                None => err |= Erreurs::FONCTION,
            },

            Tok::Name => {
                if let Some(v) = liaisons.get(&texte) {
                    jeton.valeur = Valeur::Variable(v);
                } else if let Some(v) = lookup_constant(&texte) {
                    jeton.valeur = Valeur::Constante(v);
                } else {
                    err |= Erreurs::VARIABLE;
                }
            }

            _ => {}
        }
    }

    err.into_result()
}
