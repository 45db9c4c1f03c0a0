// src/noyau/variables.rs
//
// Affectations de variables : "x = 6.25  y=-2 vitesse = 3."
//
// Grammaire (par paire) :
//   lettres+  sép*  '='  sép*  '-'?  chiffres+  ('.' chiffres*)?
//
// Politique : succès partiel. À la première paire mal formée, on s’arrête
// et on renvoie SYNTAXE|VARIABLE, mais les liaisons déjà lues restent.
// Le texte de l’appelant n’est jamais modifié (noms possédés).

use super::erreurs::Erreurs;
use super::jetons::est_separateur;
use super::lecture::format_decimal;

#[derive(Clone, Debug, PartialEq)]
pub struct Liaison {
    pub nom: String,
    pub valeur: f64,
}

/// Liaisons dans l’ordre de déclaration (la première trouvée gagne).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Liaisons {
    liste: Vec<Liaison>,
}

impl Liaisons {
    pub fn get(&self, nom: &str) -> Option<f64> {
        self.liste.iter().find(|l| l.nom == nom).map(|l| l.valeur)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Liaison> {
        self.liste.iter()
    }

    pub fn len(&self) -> usize {
        self.liste.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liste.is_empty()
    }
}

/// Résultat d’un balayage : liaisons lues + erreurs (vide si tout est valide).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Affectations {
    pub liaisons: Liaisons,
    pub erreurs: Erreurs,
}

impl Affectations {
    pub fn into_result(self) -> Result<Liaisons, Erreurs> {
        self.erreurs.into_result().map(|()| self.liaisons)
    }
}

/// Curseur sur le texte des affectations.
struct Curseur<'a> {
    texte: &'a str,
    pos: usize,
}

impl<'a> Curseur<'a> {
    fn courant(&self) -> Option<char> {
        self.texte[self.pos..].chars().next()
    }

    fn avance_si(&mut self, pred: impl Fn(char) -> bool) -> bool {
        match self.courant() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    fn mange(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let debut = self.pos;
        while self.avance_si(&pred) {}
        &self.texte[debut..self.pos]
    }

    fn mange_separateurs(&mut self) {
        self.mange(est_separateur);
    }

    /// Lit une paire complète, ou None si elle est mal formée.
    fn paire(&mut self) -> Option<Liaison> {
        let nom = self.mange(|c| c.is_ascii_alphabetic());
        if nom.is_empty() {
            return None;
        }

        self.mange_separateurs();
        if !self.avance_si(|c| c == '=') {
            return None;
        }
        self.mange_separateurs();

        let debut = self.pos;
        self.avance_si(|c| c == '-');
        if self.mange(|c| c.is_ascii_digit()).is_empty() {
            return None;
        }
        if self.avance_si(|c| c == '.') {
            self.mange(|c| c.is_ascii_digit());
        }
        let valeur = self.texte[debut..self.pos].parse::<f64>().ok()?;

        Some(Liaison {
            nom: nom.to_string(),
            valeur,
        })
    }
}

/// Balaye le texte des affectations.
pub fn parse_variables(texte: &str) -> Affectations {
    let mut out = Affectations::default();
    let mut curseur = Curseur { texte, pos: 0 };

    loop {
        curseur.mange_separateurs();
        if curseur.courant().is_none() {
            break;
        }
        match curseur.paire() {
            Some(l) => out.liaisons.liste.push(l),
            None => {
                tracing::debug!(position = curseur.pos, "variables: paire mal formée");
                out.erreurs = Erreurs::SYNTAXE | Erreurs::VARIABLE;
                break;
            }
        }
    }

    out
}

/// "nom=valeur" pour chaque liaison (valeur passée par format_decimal).
/// La liste n’est proposée que si tout le texte est valide.
pub fn format_variables(texte: &str) -> Result<Vec<String>, Erreurs> {
    let liaisons = parse_variables(texte).into_result()?;
    Ok(liaisons
        .iter()
        .map(|l| format!("{}={}", l.nom, format_decimal(l.valeur)))
        .collect())
}
