// src/noyau/expr.rs
//
// Arbre d’expression en arène (Vec<Noeud> indexé par NodeId).
// - Feuille : nombre, constante, variable (valeurs résolues) ou Inconnue
// - Groupe  : une sous-expression parenthésée, éventuellement un appel f(...)
// - Binaire : opérateur + deux enfants
//
// Les unaires sont des groupes : -x => ([0 - x]), ~x => ([0 ~ x]).
//
// Invariant : un enfant est toujours poussé avant son parent, donc tout
// NodeId d’un Expr est < noeuds.len().

use super::registre::Fonction;

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    Et,
    Ou,
    Non,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Divise => '/',
            Op::Puissance => '^',
            Op::Et => '&',
            Op::Ou => '|',
            Op::Non => '~',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Feuille {
    Nombre(f64),
    Constante(f64),
    Variable(f64),
    Inconnue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Appel {
    Aucun,
    Fonction(&'static Fonction),
    Inconnue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Noeud {
    Feuille(Feuille),
    Groupe { interieur: NodeId, appel: Appel },
    Binaire { op: Op, gauche: NodeId, droite: NodeId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub(crate) noeuds: Vec<Noeud>,
    pub(crate) racine: NodeId,
}

impl Expr {
    pub fn racine(&self) -> NodeId {
        self.racine
    }

    pub fn noeud(&self, id: NodeId) -> &Noeud {
        &self.noeuds[id]
    }

    pub fn len(&self) -> usize {
        self.noeuds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.noeuds.is_empty()
    }

    /// Profondeur de l’arbre (itératif : pas de récursion sur la pile).
    pub fn profondeur(&self) -> usize {
        let mut max = 0;
        let mut pile = vec![(self.racine, 1usize)];
        while let Some((id, p)) = pile.pop() {
            max = max.max(p);
            match self.noeuds[id] {
                Noeud::Feuille(_) => {}
                Noeud::Groupe { interieur, .. } => pile.push((interieur, p + 1)),
                Noeud::Binaire { gauche, droite, .. } => {
                    pile.push((gauche, p + 1));
                    pile.push((droite, p + 1));
                }
            }
        }
        max
    }
}

/* ------------------------ Construction ------------------------ */

/// Arène en cours de remplissage (parseur, tests).
#[derive(Debug, Default)]
pub struct Constructeur {
    noeuds: Vec<Noeud>,
}

impl Constructeur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pousse(&mut self, n: Noeud) -> NodeId {
        self.noeuds.push(n);
        self.noeuds.len() - 1
    }

    pub fn feuille(&mut self, f: Feuille) -> NodeId {
        self.pousse(Noeud::Feuille(f))
    }

    pub fn nombre(&mut self, v: f64) -> NodeId {
        self.feuille(Feuille::Nombre(v))
    }

    pub fn binaire(&mut self, op: Op, gauche: NodeId, droite: NodeId) -> NodeId {
        self.pousse(Noeud::Binaire { op, gauche, droite })
    }

    pub fn groupe(&mut self, interieur: NodeId, appel: Appel) -> NodeId {
        self.pousse(Noeud::Groupe { interieur, appel })
    }

    /// Unaire `op x` stocké comme groupe(0 op x).
    pub fn unaire(&mut self, op: Op, x: NodeId) -> NodeId {
        let zero = self.nombre(0.0);
        let b = self.binaire(op, zero, x);
        self.groupe(b, Appel::Aucun)
    }

    pub fn termine(self, racine: NodeId) -> Expr {
        Expr {
            noeuds: self.noeuds,
            racine,
        }
    }
}
