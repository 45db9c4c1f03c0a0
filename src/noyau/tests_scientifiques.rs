//! Tests scientifiques (campagne) : propriétés du noyau + limites contrôlées.
//!
//! - exemples de référence (arithmétique, variables, capacité maths, domaine)
//! - codec : aller-retour format_decimal -> parse_number
//! - lexeur : re-découper le texte des jetons redonne les mêmes jetons
//! - réassociation : idempotente, chaînes évaluées de gauche à droite

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::descente::from_tokens;
use super::jetons::{format_tokens, tokenize, Tok};
use super::lecture::{format_decimal, format_hex, parse_number};
use super::resolution::resolve;
use super::variables::Liaisons;
use super::{evaluate, format_variables, CapaciteMath, Erreurs};

const AVEC: CapaciteMath = CapaciteMath::presente();
const SANS: CapaciteMath = CapaciteMath::absente();

fn eval_ok(expr: &str, vars: &str) -> f64 {
    evaluate(expr, vars, AVEC).unwrap_or_else(|e| panic!("expr={expr:?} vars={vars:?} err={e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn kinds_et_textes(s: &str) -> Option<Vec<(Tok, String)>> {
    let j = tokenize(s).ok()?;
    Some(j.iter().map(|j| (j.tok, j.texte(s).into_owned())).collect())
}

/* ------------------------ Exemples de référence ------------------------ */

#[test]
fn sci_exemples_reference() {
    assert_eq!(eval_ok("2+3", ""), 5.0);
    assert_eq!(eval_ok("2-3+4", ""), 3.0);
    assert_eq!(eval_ok("x*2", "x = 6.25"), 12.5);
    assert_eq!(evaluate("1/0", "", AVEC), Err(Erreurs::DOMAINE));
    assert_eq!(evaluate("sin(0)", "", SANS), Err(Erreurs::FONCTION));
    assert_eq!(evaluate("sin(0)", "", AVEC), Ok(0.0));
    assert_eq!(evaluate("foo+1", "", AVEC), Err(Erreurs::VARIABLE));
    assert_eq!(evaluate("(1+2", "", AVEC), Err(Erreurs::SYNTAXE));
}

#[test]
fn sci_variable_masque_constante() {
    assert_eq!(eval_ok("pi", "pi = 3"), 3.0);
    assert_eq!(eval_ok("2*pi", "x=1"), 2.0 * std::f64::consts::PI);
    assert_eq!(eval_ok("e", "e=-1"), -1.0);
    // la première liaison gagne
    assert_eq!(eval_ok("a+a", "a=1 a=5"), 2.0);
}

#[test]
fn sci_booleens_et_hex() {
    assert_eq!(eval_ok("6&3", ""), 2.0);
    assert_eq!(eval_ok("6|3", ""), 7.0);
    assert_eq!(eval_ok("~0", ""), -1.0);
    assert_eq!(eval_ok("0xff", ""), 255.0);
    assert_eq!(format_hex(255.0), "0x000000ff");
    assert_eq!(format_hex(eval_ok("~0", "")), "0xffffffff");
}

#[test]
fn sci_constantes_physiques() {
    assert_eq!(eval_ok("c/1000", ""), 299_792.458);
    assert_eq!(format_decimal(eval_ok("g*2", "")), "19.6133");
}

#[test]
fn sci_liste_variables() {
    assert_eq!(
        format_variables("r = 2.5 h=10").unwrap(),
        vec!["r=2.5", "h=10"]
    );
    assert!(format_variables("").unwrap().is_empty());
    assert!(format_variables("r=").is_err());
}

#[test]
fn sci_grands_litteraux() {
    // au-delà de 10 chiffres entiers : 9 chiffres lus puis ×10 par chiffre abandonné
    assert_eq!(eval_ok("123456789123", ""), 123_456_789_000.0);
    assert_eq!(format_decimal(eval_ok("123456789123", "")), "1.23456789e11");
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_chaine_soustractions() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 1-1-1-... : 300 termes, arbre profond mais sous la borne du parseur
    let expr = vec!["1"; 300].join("-");
    budget(t0, max);

    assert_eq!(eval_ok(&expr, ""), 1.0 - 299.0);
    budget(t0, max);
}

#[test]
fn sci_stress_chaine_divisions() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 2^20 / 2 / 2 / ... (20 fois) = 1
    let mut expr = "1048576".to_string();
    for _ in 0..20 {
        expr.push_str("/2");
    }
    budget(t0, max);

    assert_eq!(eval_ok(&expr, ""), 1.0);
}

#[test]
fn sci_stress_imbrication_refusee_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(evaluate(&expr, "", AVEC), Err(Erreurs::SYNTAXE));
    budget(t0, max);
}

/* ------------------------ Propriétés ------------------------ */

fn virgule_fixe() -> impl Strategy<Value = f64> {
    prop_oneof![
        -2.0e9f64..2.0e9f64,
        -1.0f64..1.0f64,
        (-100_000i64..100_000i64).prop_map(|n| n as f64 / 64.0),
    ]
}

proptest! {
    #[test]
    fn prop_codec_aller_retour(d in virgule_fixe()) {
        let texte = format_decimal(d);
        let relu = parse_number(&texte).unwrap();
        let tolerance = 1e-8 * d.abs();
        prop_assert!(
            (relu - d).abs() <= tolerance,
            "d={} texte={} relu={}", d, texte, relu
        );
    }

    #[test]
    fn prop_hex_aller_retour(n in any::<u32>()) {
        let texte = format_hex(f64::from(n));
        prop_assert_eq!(parse_number(&texte).unwrap(), f64::from(n));
    }

    #[test]
    fn prop_lexeur_idempotent(s in "[0-9a-fx+*/()^&|~. \t-]{0,24}") {
        if let Ok(jetons) = tokenize(&s) {
            let texte = format_tokens(&jetons, &s);
            prop_assert_eq!(kinds_et_textes(&texte), kinds_et_textes(&s));
        }
    }

    #[test]
    fn prop_reassociation_idempotente(s in "[1-9]([-+*/&|^][1-9]){0,12}") {
        let mut jetons = tokenize(&s).unwrap();
        resolve(&mut jetons, &s, &Liaisons::default(), AVEC).unwrap();
        let une = from_tokens(&jetons).unwrap().reassocie();
        let deux = une.clone().reassocie();
        prop_assert_eq!(une, deux);
    }

    #[test]
    fn prop_chaines_additives_de_gauche_a_droite(
        tete in 1i32..100,
        reste in prop::collection::vec((any::<bool>(), 1i32..100), 0..40),
    ) {
        let mut expr = tete.to_string();
        let mut attendu = f64::from(tete);
        for (plus, n) in &reste {
            expr.push(if *plus { '+' } else { '-' });
            expr.push_str(&n.to_string());
            attendu = if *plus { attendu + f64::from(*n) } else { attendu - f64::from(*n) };
        }
        prop_assert_eq!(evaluate(&expr, "", AVEC), Ok(attendu));
    }
}
