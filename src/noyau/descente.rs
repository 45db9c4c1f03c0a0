// src/noyau/descente.rs
//
// Descente récursive LL(1) : jetons résolus -> arbre.
//
//   E -> T [ ('+' | '-') E ]
//   T -> F [ ('*' | '/' | '&' | '|') T ]
//   F -> X [ '^' F ]
//   X -> ('-' | '~') N | N
//   N -> nombre | nom | nom '(' E ')' | '(' E ')'
//
// Récursif à droite : "2-3+4" donne [2 - [3 + 4]] ; canon.rs corrige.
// Entrée vide, ')' manquante, jeton inattendu ou jetons restants => SYNTAXE.

use super::erreurs::Erreurs;
use super::expr::{Appel, Constructeur, Expr, Feuille, NodeId, Op};
use super::jetons::{Jeton, Tok, Valeur};

/// Garde-fou : profondeur de récursion maximale (imbrication + chaînes).
const PROFONDEUR_MAX: usize = 512;

/// Longueur de saisie acceptée par l’interface. Au pire une parenthèse
/// coûte 3 niveaux pour 2 caractères : 320 caractères restent sous
/// `PROFONDEUR_MAX`.
pub const LONGUEUR_MAX: usize = 320;

struct Descente<'a> {
    jetons: &'a [Jeton],
    pos: usize,
    arbre: Constructeur,
    profondeur: usize,
}

impl<'a> Descente<'a> {
    fn tok(&self) -> Option<Tok> {
        self.jetons.get(self.pos).map(|j| j.tok)
    }

    fn tok_suivant(&self) -> Option<Tok> {
        self.jetons.get(self.pos + 1).map(|j| j.tok)
    }

    fn avance(&mut self) -> Option<&'a Jeton> {
        let j = self.jetons.get(self.pos)?;
        self.pos += 1;
        Some(j)
    }

    fn attend(&mut self, tok: Tok) -> Result<(), Erreurs> {
        if self.tok() == Some(tok) {
            self.pos += 1;
            Ok(())
        } else {
            Err(Erreurs::SYNTAXE)
        }
    }

    fn descend(
        &mut self,
        regle: fn(&mut Self) -> Result<NodeId, Erreurs>,
    ) -> Result<NodeId, Erreurs> {
        if self.profondeur >= PROFONDEUR_MAX {
            tracing::debug!(position = self.pos, "descente: profondeur maximale atteinte");
            return Err(Erreurs::SYNTAXE);
        }
        self.profondeur += 1;
        let r = regle(self);
        self.profondeur -= 1;
        r
    }

    /* ---- E ---- */

    fn expression(&mut self) -> Result<NodeId, Erreurs> {
        self.descend(|p| {
            let g = p.terme()?;
            let op = match p.tok() {
                Some(Tok::Plus) => Op::Plus,
                Some(Tok::Minus) => Op::Moins,
                _ => return Ok(g),
            };
            p.pos += 1;
            let d = p.expression()?;
            Ok(p.arbre.binaire(op, g, d))
        })
    }

    /* ---- T ---- */

    fn terme(&mut self) -> Result<NodeId, Erreurs> {
        self.descend(|p| {
            let g = p.facteur()?;
            let op = match p.tok() {
                Some(Tok::Star) => Op::Fois,
                Some(Tok::Slash) => Op::Divise,
                Some(Tok::Amp) => Op::Et,
                Some(Tok::Pipe) => Op::Ou,
                _ => return Ok(g),
            };
            p.pos += 1;
            let d = p.terme()?;
            Ok(p.arbre.binaire(op, g, d))
        })
    }

    /* ---- F ---- */

    fn facteur(&mut self) -> Result<NodeId, Erreurs> {
        self.descend(|p| {
            let g = p.unaire()?;
            if p.tok() != Some(Tok::Caret) {
                return Ok(g);
            }
            p.pos += 1;
            let d = p.facteur()?;
            Ok(p.arbre.binaire(Op::Puissance, g, d))
        })
    }

    /* ---- X ---- */

    fn unaire(&mut self) -> Result<NodeId, Erreurs> {
        let op = match self.tok() {
            Some(Tok::Minus) => Op::Moins,
            Some(Tok::Tilde) => Op::Non,
            _ => return self.primaire(),
        };
        self.pos += 1;
        let x = self.primaire()?;
        Ok(self.arbre.unaire(op, x))
    }

    /* ---- N ---- */

    fn primaire(&mut self) -> Result<NodeId, Erreurs> {
        match self.tok() {
            Some(Tok::Num) | Some(Tok::Name) if self.tok_suivant() != Some(Tok::LPar) => {
                let j = self.avance().ok_or(Erreurs::SYNTAXE)?;
                Ok(self.arbre.feuille(feuille(j)))
            }
            Some(Tok::Name) => {
                let j = self.avance().ok_or(Erreurs::SYNTAXE)?;
                let appel = match j.valeur {
                    Valeur::Fonction(f) => Appel::Fonction(f),
                    _ => Appel::Inconnue,
                };
                self.parentheses(appel)
            }
            Some(Tok::LPar) => self.parentheses(Appel::Aucun),
            _ => Err(Erreurs::SYNTAXE),
        }
    }

    fn parentheses(&mut self, appel: Appel) -> Result<NodeId, Erreurs> {
        self.attend(Tok::LPar)?;
        let e = self.expression()?;
        self.attend(Tok::RPar)?;
        Ok(self.arbre.groupe(e, appel))
    }
}

fn feuille(j: &Jeton) -> Feuille {
    match j.valeur {
        Valeur::Nombre(v) => Feuille::Nombre(v),
        Valeur::Constante(v) => Feuille::Constante(v),
        Valeur::Variable(v) => Feuille::Variable(v),
        Valeur::NonResolue | Valeur::Fonction(_) => Feuille::Inconnue,
    }
}

/// Construit l’arbre (non réassocié) d’une suite de jetons résolus.
pub fn from_tokens(jetons: &[Jeton]) -> Result<Expr, Erreurs> {
    if jetons.is_empty() {
        return Err(Erreurs::SYNTAXE);
    }

    let mut p = Descente {
        jetons,
        pos: 0,
        arbre: Constructeur::new(),
        profondeur: 0,
    };
    let racine = p.expression()?;

    if p.pos != jetons.len() {
        tracing::debug!(position = p.pos, total = jetons.len(), "descente: jetons restants");
        return Err(Erreurs::SYNTAXE);
    }

    Ok(p.arbre.termine(racine))
}
