// src/noyau/erreurs.rs
//
// Codes d’erreur du noyau.
// - Erreur  : un seul genre (message lisible, thiserror)
// - Erreurs : masque de bits cumulable (0 = succès)
//
// Les valeurs des bits sont figées : 0x01 syntaxe, 0x02 variable,
// 0x04 fonction, 0x08 domaine numérique.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Erreur {
    #[error("erreur de syntaxe")]
    Syntaxe,

    #[error("variable inconnue")]
    VariableInconnue,

    #[error("fonction inconnue")]
    FonctionInconnue,

    #[error("domaine numérique (NaN ou infini)")]
    Domaine,
}

impl Erreur {
    const TOUTES: [Erreur; 4] = [
        Erreur::Syntaxe,
        Erreur::VariableInconnue,
        Erreur::FonctionInconnue,
        Erreur::Domaine,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            Erreur::Syntaxe => 0x01,
            Erreur::VariableInconnue => 0x02,
            Erreur::FonctionInconnue => 0x04,
            Erreur::Domaine => 0x08,
        }
    }
}

/// Masque d’erreurs. Plusieurs bits peuvent être levés à la fois.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Erreurs(u8);

impl Erreurs {
    pub const AUCUNE: Erreurs = Erreurs(0);
    pub const SYNTAXE: Erreurs = Erreurs(Erreur::Syntaxe.bit());
    pub const VARIABLE: Erreurs = Erreurs(Erreur::VariableInconnue.bit());
    pub const FONCTION: Erreurs = Erreurs(Erreur::FonctionInconnue.bit());
    pub const DOMAINE: Erreurs = Erreurs(Erreur::Domaine.bit());

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, autre: Erreurs) -> bool {
        self.0 & autre.0 == autre.0
    }

    /// Genres présents, dans l’ordre des bits.
    pub fn kinds(self) -> Vec<Erreur> {
        Erreur::TOUTES
            .into_iter()
            .filter(|e| self.0 & e.bit() != 0)
            .collect()
    }

    /// `Ok(())` si aucun bit n’est levé.
    pub fn into_result(self) -> Result<(), Erreurs> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Erreur> for Erreurs {
    fn from(e: Erreur) -> Self {
        Erreurs(e.bit())
    }
}

impl BitOr for Erreurs {
    type Output = Erreurs;

    fn bitor(self, rhs: Erreurs) -> Erreurs {
        Erreurs(self.0 | rhs.0)
    }
}

impl BitOrAssign for Erreurs {
    fn bitor_assign(&mut self, rhs: Erreurs) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Erreurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("aucune erreur");
        }
        let noms: Vec<String> = self.kinds().iter().map(|e| e.to_string()).collect();
        f.write_str(&noms.join(" | "))
    }
}

impl fmt::Debug for Erreurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Erreurs({:#04x}: {self})", self.0)
    }
}

impl std::error::Error for Erreurs {}
