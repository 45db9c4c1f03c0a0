// src/noyau/format.rs
//
// Affichage d’un arbre (démarche) :
// - binaire : [g op d]
// - groupe  : (x), sin(x), ?(x) si l’appel n’est pas résolu
// - feuille : valeur via format_decimal, ? si non résolue

use std::fmt;

use super::expr::{Appel, Expr, Feuille, NodeId, Noeud};
use super::lecture::format_decimal;

impl Expr {
    fn ecrit(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.noeud(id) {
            Noeud::Feuille(feuille) => match feuille {
                Feuille::Nombre(v) | Feuille::Constante(v) | Feuille::Variable(v) => {
                    f.write_str(&format_decimal(v))
                }
                Feuille::Inconnue => f.write_str("?"),
            },

            Noeud::Groupe { interieur, appel } => {
                match appel {
                    Appel::Aucun => {}
                    Appel::Fonction(fonction) => f.write_str(fonction.nom)?,
                    Appel::Inconnue => f.write_str("?")?,
                }
                f.write_str("(")?;
                self.ecrit(interieur, f)?;
                f.write_str(")")
            }

            Noeud::Binaire { op, gauche, droite } => {
                f.write_str("[")?;
                self.ecrit(gauche, f)?;
                write!(f, " {} ", op.symbole())?;
                self.ecrit(droite, f)?;
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        self.ecrit(self.racine(), f)
    }
}
