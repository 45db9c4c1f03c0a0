// src/noyau/registre.rs
//
// Registre statique : fonctions unaires + constantes nommées.
//
// Règles:
// - recherche exacte, sensible à la casse
// - les fonctions n’existent que si la capacité “maths” est présente
//   (sans elle, la grammaire se réduit à l’arithmétique + booléens)
// - les constantes ne dépendent jamais de la capacité

use std::fmt;

/// Capacité “bibliothèque maths” fournie par l’hôte (fixée au démarrage).
/// Passée explicitement au registre et à l’évaluateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapaciteMath {
    disponible: bool,
}

impl CapaciteMath {
    pub const fn presente() -> Self {
        Self { disponible: true }
    }

    pub const fn absente() -> Self {
        Self { disponible: false }
    }

    pub const fn disponible(self) -> bool {
        self.disponible
    }
}

impl Default for CapaciteMath {
    fn default() -> Self {
        Self::presente()
    }
}

/// Fonction unaire du registre.
#[derive(Clone, Copy)]
pub struct Fonction {
    pub nom: &'static str,
    f: fn(f64) -> f64,
}

impl Fonction {
    pub fn applique(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

// Deux fonctions du registre sont égales si elles portent le même nom
// (les noms sont uniques dans la table).
impl PartialEq for Fonction {
    fn eq(&self, other: &Self) -> bool {
        self.nom == other.nom
    }
}

impl fmt::Debug for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fonction({})", self.nom)
    }
}

const fn fonction(nom: &'static str, f: fn(f64) -> f64) -> Fonction {
    Fonction { nom, f }
}

static FONCTIONS: [Fonction; 16] = [
    // trigonométriques
    fonction("acos", f64::acos),
    fonction("asin", f64::asin),
    fonction("atan", f64::atan),
    fonction("cos", f64::cos),
    fonction("sin", f64::sin),
    fonction("tan", f64::tan),
    // hyperboliques
    fonction("cosh", f64::cosh),
    fonction("sinh", f64::sinh),
    fonction("tanh", f64::tanh),
    fonction("acosh", f64::acosh),
    fonction("asinh", f64::asinh),
    fonction("atanh", f64::atanh),
    // exponentielle + logarithmes
    fonction("exp", f64::exp),
    fonction("log", f64::ln),
    fonction("log10", f64::log10),
    fonction("log2", f64::log2),
];

static CONSTANTES: [(&str, f64); 4] = [
    ("e", std::f64::consts::E),
    ("pi", std::f64::consts::PI),
    ("g", 9.80665),      // pesanteur standard (m/s²)
    ("c", 299_792_458.0), // vitesse de la lumière (m/s)
];

/// Fonction unaire par nom (None si inconnue ou capacité absente).
pub fn lookup_function(nom: &str, cap: CapaciteMath) -> Option<&'static Fonction> {
    if !cap.disponible() {
        return None;
    }
    FONCTIONS.iter().find(|f| f.nom == nom)
}

/// Constante nommée (e, pi, g, c).
pub fn lookup_constant(nom: &str) -> Option<f64> {
    CONSTANTES
        .iter()
        .find(|(n, _)| *n == nom)
        .map(|&(_, v)| v)
}

/// Noms des fonctions, dans l’ordre de la table (vide sans capacité).
pub fn list_function_names(cap: CapaciteMath) -> Vec<&'static str> {
    if !cap.disponible() {
        return Vec::new();
    }
    FONCTIONS.iter().map(|f| f.nom).collect()
}
