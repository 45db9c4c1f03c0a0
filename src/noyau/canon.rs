// src/noyau/canon.rs
//
// Réassociation (correction de l’associativité à droite du parseur) :
//   a - (b ± c)  =>  (a - b) ∓ c      (tags échangés)
//   a / (b ×÷ c) =>  (a / b) ×÷ c
//
// Enfants d’abord, puis le noeud pivote tant qu’une règle s’applique ;
// le nouvel enfant gauche est lui-même stabilisé après chaque pivot.
// Aucune valeur n’est recalculée : on échange deux tags et on recâble.
// Les groupes ne pivotent jamais (les parenthèses explicites restent).

use super::expr::{Expr, NodeId, Noeud, Op};

impl Expr {
    /// Idempotent : un arbre déjà réassocié ne change plus.
    pub fn reassocie(mut self) -> Expr {
        let racine = self.racine;
        reassocie_noeud(&mut self.noeuds, racine);
        self
    }
}

fn doit_pivoter(op1: Op, op2: Op) -> bool {
    matches!(
        (op1, op2),
        (Op::Moins, Op::Moins | Op::Plus) | (Op::Divise, Op::Divise | Op::Fois)
    )
}

fn reassocie_noeud(noeuds: &mut [Noeud], id: NodeId) {
    match noeuds[id] {
        Noeud::Feuille(_) => {}
        Noeud::Groupe { interieur, .. } => reassocie_noeud(noeuds, interieur),
        Noeud::Binaire { gauche, droite, .. } => {
            reassocie_noeud(noeuds, gauche);
            reassocie_noeud(noeuds, droite);
            stabilise(noeuds, id);
        }
    }
}

/// Pivote `id` tant qu’une règle s’applique. Les enfants de `id` sont déjà
/// réassociés, donc seul le nouvel enfant gauche peut encore pivoter.
fn stabilise(noeuds: &mut [Noeud], id: NodeId) {
    while let Some(g) = pivote(noeuds, id) {
        stabilise(noeuds, g);
    }
}

/// N = (op1, a, R), R = (op2, b, c)  =>  R = (op1, a, b), N = (op2, R, c).
/// Renvoie R (nouvel enfant gauche de N) si le pivot a eu lieu.
fn pivote(noeuds: &mut [Noeud], id: NodeId) -> Option<NodeId> {
    let Noeud::Binaire {
        op: op1,
        gauche: a,
        droite: r,
    } = noeuds[id]
    else {
        return None;
    };
    let Noeud::Binaire {
        op: op2,
        gauche: b,
        droite: c,
    } = noeuds[r]
    else {
        return None;
    };
    if !doit_pivoter(op1, op2) {
        return None;
    }

    noeuds[r] = Noeud::Binaire {
        op: op1,
        gauche: a,
        droite: b,
    };
    noeuds[id] = Noeud::Binaire {
        op: op2,
        gauche: r,
        droite: c,
    };
    tracing::trace!(noeud = id, op1 = %op1.symbole(), op2 = %op2.symbole(), "canon: pivot");
    Some(r)
}

#[cfg(test)]
mod tests {
    use crate::noyau::descente::from_tokens;
    use crate::noyau::expr::Expr;
    use crate::noyau::jetons::tokenize;
    use crate::noyau::registre::CapaciteMath;
    use crate::noyau::resolution::resolve;
    use crate::noyau::variables::Liaisons;

    fn arbre(s: &str) -> Expr {
        let mut j = tokenize(s).unwrap();
        resolve(&mut j, s, &Liaisons::default(), CapaciteMath::presente()).unwrap();
        from_tokens(&j).unwrap()
    }

    fn reassocie(s: &str) -> String {
        arbre(s).reassocie().to_string()
    }

    #[test]
    fn moins_puis_plus() {
        assert_eq!(reassocie("2-3+4"), "[[2 - 3] + 4]");
        assert_eq!(reassocie("1-2-3-4"), "[[[1 - 2] - 3] - 4]");
        assert_eq!(reassocie("1-2+3-4"), "[[1 - 2] + [3 - 4]]");
    }

    #[test]
    fn divise_puis_fois() {
        assert_eq!(reassocie("8/4/2"), "[[8 / 4] / 2]");
        assert_eq!(reassocie("8/4*2"), "[[8 / 4] * 2]");
    }

    #[test]
    fn sans_regle() {
        // + et * restent à droite (associatifs), ^ aussi
        assert_eq!(reassocie("1+2-3"), "[1 + [2 - 3]]");
        assert_eq!(reassocie("2*8/4"), "[2 * [8 / 4]]");
        assert_eq!(reassocie("2^3^2"), "[2 ^ [3 ^ 2]]");
        assert_eq!(reassocie("1-2*3"), "[1 - [2 * 3]]");
    }

    #[test]
    fn groupes_preserves() {
        assert_eq!(reassocie("1-(2-3)"), "[1 - ([2 - 3])]");
        assert_eq!(reassocie("sin(5-2-1)"), "sin([[5 - 2] - 1])");
    }

    #[test]
    fn idempotent() {
        for s in ["2-3+4", "1-2-3-4", "8/4*2/1", "1-(2-3)-4", "6&3|1-2-3"] {
            let une = arbre(s).reassocie();
            let deux = une.clone().reassocie();
            assert_eq!(une, deux, "entrée {s:?}");
        }
    }
}
