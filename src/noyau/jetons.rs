// src/noyau/jetons.rs
//
// Lexeur à automate fini.
//
// États : Start, Integer, Float, Hex, Name, Open, Close, Operator, Stop, Invalid.
// - les séparateurs (espace, tab, CR, LF) sont mangés avant chaque transition
//   et ne font jamais partie d’un jeton
// - un jeton “donnée” (nombre, nom) est émis quand on quitte son état,
//   sauf Integer -> Float et Integer -> Hex (continuation)
// - un jeton “structurel” ( ( ) opérateur ) est émis dès qu’il est reconnu
// - toute paire (état, caractère) non prévue => Invalid => erreur de syntaxe

use std::borrow::Cow;
use std::ops::Range;

use super::erreurs::Erreurs;
use super::registre::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tok {
    Num,
    Name,

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Amp,   // &
    Pipe,  // |
    Tilde, // ~

    LPar,
    RPar,
}

impl Tok {
    fn operateur(c: char) -> Option<Tok> {
        match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '&' => Some(Tok::Amp),
            '|' => Some(Tok::Pipe),
            '~' => Some(Tok::Tilde),
            _ => None,
        }
    }
}

/// Donnée attachée à un jeton après résolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Valeur {
    #[default]
    NonResolue,
    Nombre(f64),
    Constante(f64),
    Variable(f64),
    Fonction(&'static Fonction),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    /// Octets `début..fin` dans l’expression source (séparateurs internes inclus).
    pub span: Range<usize>,
    pub valeur: Valeur,
}

impl Jeton {
    fn new(tok: Tok, span: Range<usize>) -> Self {
        Self {
            tok,
            span,
            valeur: Valeur::NonResolue,
        }
    }

    /// Texte du jeton, séparateurs retirés ("1 2" -> "12").
    pub fn texte<'s>(&self, source: &'s str) -> Cow<'s, str> {
        let brut = source.get(self.span.clone()).unwrap_or("");
        if brut.chars().any(est_separateur) {
            Cow::Owned(brut.chars().filter(|&c| !est_separateur(c)).collect())
        } else {
            Cow::Borrowed(brut)
        }
    }
}

/* ------------------------ Automate ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Etat {
    Stop,
    Start,
    Integer,
    Float,
    Hex,
    Name,
    Open,
    Close,
    Operator,
    Invalid,
}

impl Etat {
    fn porte_donnee(self) -> bool {
        matches!(self, Etat::Integer | Etat::Float | Etat::Hex | Etat::Name)
    }

    fn tok_donnee(self) -> Tok {
        if self == Etat::Name {
            Tok::Name
        } else {
            Tok::Num
        }
    }
}

pub fn est_separateur(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn est_operateur(c: char) -> bool {
    Tok::operateur(c).is_some()
}

/// Fonction de transition. `zero_seul` : le nombre en cours vaut exactement "0".
fn transition(q: Etat, c: char, zero_seul: bool) -> Etat {
    use Etat::*;

    let chiffre = c.is_ascii_digit();
    let lettre = c.is_ascii_alphabetic();

    match q {
        Start | Open | Operator => {
            if chiffre {
                Integer
            } else if lettre {
                Name
            } else if c == '(' {
                Open
            } else if est_operateur(c) {
                Operator
            } else {
                Invalid
            }
        }

        Integer => {
            if chiffre {
                Integer
            } else if c == '.' {
                Float
            } else if zero_seul && (c == 'x' || c == 'X') {
                Hex
            } else if est_operateur(c) {
                Operator
            } else if c == ')' {
                Close
            } else {
                Invalid
            }
        }

        Float => {
            if chiffre {
                Float
            } else if est_operateur(c) {
                Operator
            } else if c == ')' {
                Close
            } else {
                Invalid
            }
        }

        Hex => {
            if c.is_ascii_hexdigit() {
                Hex
            } else if est_operateur(c) {
                Operator
            } else if c == ')' {
                Close
            } else {
                Invalid
            }
        }

        Name => {
            if chiffre || lettre {
                Name
            } else if c == '(' {
                Open
            } else if est_operateur(c) {
                Operator
            } else if c == ')' {
                Close
            } else {
                Invalid
            }
        }

        Close => {
            if est_operateur(c) {
                Operator
            } else if c == ')' {
                Close
            } else {
                Invalid
            }
        }

        Stop | Invalid => Invalid,
    }
}

/// Découpe une expression en jetons.
/// Une entrée vide (ou seulement des séparateurs) donne une liste vide.
pub fn tokenize(source: &str) -> Result<Vec<Jeton>, Erreurs> {
    let mut out = Vec::new();
    let mut entree = source.char_indices().filter(|&(_, c)| !est_separateur(c));

    let mut etat = Etat::Start;
    let mut debut = 0usize; // début du run de donnée courant
    let mut fin = 0usize; // fin (exclusive) du dernier caractère non séparateur
    let mut zero_seul = false;

    loop {
        let lu = entree.next();
        let suivant = match lu {
            None => Etat::Stop,
            Some((_, c)) => transition(etat, c, zero_seul),
        };

        if let (Etat::Invalid, Some((i, c))) = (suivant, lu) {
            tracing::debug!(position = i, caractere = %c, "lexeur: transition invalide");
            return Err(Erreurs::SYNTAXE);
        }

        // un run de donnée commence
        if !etat.porte_donnee() && suivant.porte_donnee() {
            debut = lu.map_or(fin, |(i, _)| i);
        }

        // un run de donnée se termine
        let continuation = etat == Etat::Integer && matches!(suivant, Etat::Float | Etat::Hex);
        if etat.porte_donnee() && suivant != etat && !continuation {
            out.push(Jeton::new(etat.tok_donnee(), debut..fin));
        }

        let Some((i, c)) = lu else {
            break;
        };
        let apres = i + c.len_utf8();

        // jeton structurel
        let structurel = match suivant {
            Etat::Open => Some(Tok::LPar),
            Etat::Close => Some(Tok::RPar),
            Etat::Operator => Tok::operateur(c),
            _ => None,
        };
        if let Some(tok) = structurel {
            out.push(Jeton::new(tok, i..apres));
        }

        zero_seul = match (etat, suivant) {
            (Etat::Integer, Etat::Integer) => false,
            (_, Etat::Integer) => c == '0',
            _ => false,
        };
        etat = suivant;
        fin = apres;
    }

    Ok(out)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton], source: &str) -> String {
    jetons
        .iter()
        .map(|j| j.texte(source).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
