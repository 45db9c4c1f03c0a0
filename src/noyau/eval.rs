//! Noyau - évaluation (pipeline réel)
//!
//! variables -> jetons -> résolution -> descente -> réassociation -> évaluation
//!
//! Chaque étage s’arrête au premier échec ; les bits d’erreur d’un étage
//! se cumulent, les sous-évaluations s’arrêtent au premier enfant en échec.

use super::descente::from_tokens;
use super::erreurs::Erreurs;
use super::expr::{Appel, Expr, Feuille, NodeId, Noeud, Op};
use super::jetons::{format_tokens, tokenize};
use super::registre::CapaciteMath;
use super::resolution::resolve;
use super::variables::parse_variables;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub avant: String,
    pub apres: String,
    pub note: String,
}

const NOTE: &str =
    "Pipeline: variables → jetons → résolution → descente → réassociation → évaluation.";

/* ------------------------ Arithmétique ------------------------ */

/// Troncature 32 bits (complément à deux, réduction modulo 2^32).
fn tronque_i32(v: f64) -> i32 {
    v as i64 as i32
}

fn applique(op: Op, a: f64, b: f64) -> f64 {
    match op {
        Op::Plus => a + b,
        Op::Moins => a - b,
        Op::Fois => a * b,
        Op::Divise => a / b,
        Op::Puissance => a.powf(b),
        Op::Et => f64::from(tronque_i32(a) & tronque_i32(b)),
        Op::Ou => f64::from(tronque_i32(a) | tronque_i32(b)),
        // l’opérande gauche d’un ~ est toujours le 0 du groupe unaire
        Op::Non => f64::from(!tronque_i32(b)),
    }
}

impl Expr {
    /// Évalue l’arbre (déjà réassocié).
    pub fn evaluate(&self, cap: CapaciteMath) -> Result<f64, Erreurs> {
        self.evalue_noeud(self.racine(), cap)
    }

    fn evalue_noeud(&self, id: NodeId, cap: CapaciteMath) -> Result<f64, Erreurs> {
        let v = match *self.noeud(id) {
            Noeud::Feuille(f) => match f {
                Feuille::Nombre(v) | Feuille::Constante(v) | Feuille::Variable(v) => v,
                Feuille::Inconnue => return Err(Erreurs::VARIABLE),
            },

            Noeud::Groupe { interieur, appel } => {
                let x = self.evalue_noeud(interieur, cap)?;
                match appel {
                    Appel::Aucun => x,
                    Appel::Fonction(f) => f.applique(x),
                    Appel::Inconnue => return Err(Erreurs::FONCTION),
                }
            }

            Noeud::Binaire { op, gauche, droite } => {
                // ^ passe par la bibliothèque maths
                if op == Op::Puissance && !cap.disponible() {
                    return Err(Erreurs::FONCTION);
                }
                let a = self.evalue_noeud(gauche, cap)?;
                let b = self.evalue_noeud(droite, cap)?;
                applique(op, a, b)
            }
        };

        if cap.disponible() && !v.is_finite() {
            return Err(Erreurs::DOMAINE);
        }
        Ok(v)
    }
}

/* ------------------------ API publique ------------------------ */

/// Évalue `expr` avec les affectations `vars`.
pub fn evaluate(expr: &str, vars: &str, cap: CapaciteMath) -> Result<f64, Erreurs> {
    evaluate_detaille(expr, vars, cap).0
}

/// Comme `evaluate`, plus la démarche (jetons, arbre avant/après réassociation).
/// Les champs de la démarche restent vides au-delà de l’étage en échec.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(expr_len = expr.len(), vars_len = vars.len())
)]
pub fn evaluate_detaille(
    expr: &str,
    vars: &str,
    cap: CapaciteMath,
) -> (Result<f64, Erreurs>, DemarcheNoyau) {
    let mut d = DemarcheNoyau {
        note: NOTE.to_string(),
        ..DemarcheNoyau::default()
    };

    let r = pipeline(expr, vars, cap, &mut d);
    match &r {
        Ok(v) => tracing::debug!(resultat = v, "évaluation terminée"),
        Err(e) => tracing::debug!(erreurs = %e, bits = e.bits(), "évaluation en échec"),
    }
    (r, d)
}

fn pipeline(
    expr: &str,
    vars: &str,
    cap: CapaciteMath,
    d: &mut DemarcheNoyau,
) -> Result<f64, Erreurs> {
    // 1) Variables
    let liaisons = parse_variables(vars).into_result()?;
    tracing::debug!(liaisons = liaisons.len(), "variables lues");

    // 2) Jetons
    let mut jetons = tokenize(expr)?;
    d.jetons = format_tokens(&jetons, expr);
    tracing::debug!(jetons = jetons.len(), "jetons lus");

    // 3) Résolution
    resolve(&mut jetons, expr, &liaisons, cap)?;

    // 4) Arbre
    let arbre = from_tokens(&jetons)?;
    d.avant = arbre.to_string();

    // 5) Réassociation
    let arbre = arbre.reassocie();
    d.apres = arbre.to_string();
    tracing::debug!(
        noeuds = arbre.len(),
        profondeur = arbre.profondeur(),
        "arbre réassocié"
    );

    // 6) Évaluation
    arbre.evaluate(cap)
}
