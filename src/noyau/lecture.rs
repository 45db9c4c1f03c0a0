// src/noyau/lecture.rs
//
// Codec numérique : f64 <-> texte.
// - format_decimal : virgule fixe “fabriquée à la main” (9 chiffres significatifs)
//                    sinon repli scientifique
// - format_hex     : 0x + 8 chiffres (troncature 32 bits)
// - parse_number   : littéral décimal (approximation au-delà de 10 chiffres entiers)
//                    ou hexadécimal (préfixe 0x)

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::num::ParseFloatError;

/// Chiffres significatifs de la mantisse normalisée.
const CHIFFRES_SIGNIFICATIFS: usize = 9;

/// Au-delà (en valeur absolue), on passe directement en scientifique.
const BORNE_VIRGULE_FIXE: f64 = 2_000_000_000.0;

/// Fenêtre d’exposant (mantisse entière × 10^exposant) pour la virgule fixe.
const EXPOSANT_MIN: i32 = -12;
const EXPOSANT_MAX: i32 = 2;

/// Longueur de partie entière au-delà de laquelle on tronque le littéral.
const CHIFFRES_ENTIERS_MAX: usize = 10;

/// Base d’affichage du résultat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Base {
    #[default]
    Decimale,
    Hexadecimale,
}

impl Base {
    pub fn formate(self, v: f64) -> String {
        match self {
            Base::Decimale => format_decimal(v),
            Base::Hexadecimale => format_hex(v),
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            Base::Decimale => "dec",
            Base::Hexadecimale => "hex",
        }
    }

    pub fn suivante(self) -> Base {
        match self {
            Base::Decimale => Base::Hexadecimale,
            Base::Hexadecimale => Base::Decimale,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurNombre {
    #[error("littéral vide")]
    Vide,

    #[error("littéral hexadécimal sans chiffre")]
    HexVide,

    #[error("chiffre hexadécimal invalide: '{0}'")]
    ChiffreHex(char),

    #[error("littéral hexadécimal hors plage")]
    HexHorsPlage,

    #[error("littéral décimal invalide: {0}")]
    Decimal(#[from] ParseFloatError),
}

/* ------------------------ Affichage décimal ------------------------ */

/// Mantisse entière (9 chiffres) + exposant : |v| ≈ mantisse × 10^exposant.
fn mantisse_exposant(abs: f64) -> (String, i32) {
    // "{:.8e}" arrondit proprement (9.9999999995 -> "1.00000000e1")
    let sci = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, abs);
    let (m, e) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let chiffres: String = m.chars().filter(|c| c.is_ascii_digit()).collect();
    let e: i32 = e.parse().unwrap_or(0);
    (chiffres, e - (CHIFFRES_SIGNIFICATIFS as i32 - 1))
}

fn retire_zeros_fraction(s: &mut String) {
    if !s.contains('.') {
        return;
    }
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
}

fn format_scientifique(v: f64) -> String {
    let sci = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, v);
    match sci.split_once('e') {
        Some((m, e)) => {
            let mut m = m.to_string();
            retire_zeros_fraction(&mut m);
            format!("{m}e{e}")
        }
        None => sci,
    }
}

/// Affiche un double en décimal.
///
/// Dans la plage ±2×10⁹ et si l’exposant tombe dans la fenêtre, le point est
/// placé à la main dans la mantisse (zéros finaux retirés). Sinon : scientifique.
pub fn format_decimal(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    if v.abs() > BORNE_VIRGULE_FIXE {
        return format_scientifique(v);
    }

    let (chiffres, exposant) = mantisse_exposant(v.abs());
    if !(EXPOSANT_MIN..=EXPOSANT_MAX).contains(&exposant) {
        return format_scientifique(v);
    }

    let mut out = String::with_capacity(24);
    if v < 0.0 {
        out.push('-');
    }

    if exposant >= 0 {
        out.push_str(&chiffres);
        out.extend(std::iter::repeat('0').take(exposant as usize));
        return out;
    }

    // nombre de chiffres avant le point
    let entiers = chiffres.len() as i32 + exposant;
    let mut corps = if entiers > 0 {
        let (a, b) = chiffres.split_at(entiers as usize);
        format!("{a}.{b}")
    } else {
        let zeros = "0".repeat((-entiers) as usize);
        format!("0.{zeros}{chiffres}")
    };
    retire_zeros_fraction(&mut corps);
    out.push_str(&corps);
    out
}

/// Affiche la troncature 32 bits (complément à deux) : "0x%08x".
pub fn format_hex(v: f64) -> String {
    format!("0x{:08x}", tronque_u32(v))
}

fn tronque_u32(v: f64) -> u32 {
    // i64 sature, la réduction en u32 boucle (modulo 2^32)
    v.trunc() as i64 as u32
}

/* ------------------------ Lecture ------------------------ */

/// Lit un littéral numérique.
///
/// - `0x…` / `0X…` : entier base 16, chiffre par chiffre.
/// - partie entière > 10 chiffres (ou 10 chiffres commençant au-delà de `1`) :
///   on lit les 9 premiers chiffres et on multiplie par 10 pour chaque chiffre
///   abandonné (la partie fractionnaire est ignorée).
/// - sinon lecture directe.
pub fn parse_number(texte: &str) -> Result<f64, ErreurNombre> {
    let texte = texte.trim();
    let (negatif, corps) = match texte.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, texte),
    };
    if corps.is_empty() {
        return Err(ErreurNombre::Vide);
    }

    let v = if let Some(hex) = corps.strip_prefix("0x").or_else(|| corps.strip_prefix("0X")) {
        parse_hex(hex)?
    } else {
        parse_decimal(corps)?
    };

    Ok(if negatif { -v } else { v })
}

fn parse_hex(chiffres: &str) -> Result<f64, ErreurNombre> {
    if chiffres.is_empty() {
        return Err(ErreurNombre::HexVide);
    }
    let mut acc = BigUint::zero();
    for c in chiffres.chars() {
        let d = c.to_digit(16).ok_or(ErreurNombre::ChiffreHex(c))?;
        acc = acc * 16u32 + d;
    }
    match acc.to_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ErreurNombre::HexHorsPlage),
    }
}

fn parse_decimal(corps: &str) -> Result<f64, ErreurNombre> {
    let entier = corps.split_once('.').map_or(corps, |(e, _)| e);

    // Les zéros de tête ne comptent pas dans la longueur.
    let significatif = entier.trim_start_matches('0');
    let longueur = significatif.len();
    let tous_chiffres = significatif.bytes().all(|b| b.is_ascii_digit());

    let trop_long = longueur > CHIFFRES_ENTIERS_MAX
        || (longueur == CHIFFRES_ENTIERS_MAX && significatif.as_bytes()[0] > b'1');

    if tous_chiffres && trop_long {
        let abandonnes = longueur - (CHIFFRES_ENTIERS_MAX - 1);
        let prefixe = &significatif[..CHIFFRES_ENTIERS_MAX - 1];
        let mut v: f64 = prefixe.parse()?;
        for _ in 0..abandonnes {
            v *= 10.0;
        }
        return Ok(v);
    }

    Ok(corps.parse()?)
}
