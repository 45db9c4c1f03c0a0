//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : jamais de panique, et un échec porte au moins un bit connu

use std::time::{Duration, Instant};

use super::{evaluate, evaluate_detaille, list_function_names, CapaciteMath, Erreurs};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

const CONNUES: u8 = 0x0F;

fn check_erreurs(expr: &str, e: Erreurs) {
    assert!(!e.is_empty(), "échec sans bit: expr={expr:?}");
    assert_eq!(e.bits() & !CONNUES, 0, "bit inconnu: expr={expr:?} err={e:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const VARIABLES: &str = "x = 2.5 y=-4 n=0 pi=3";

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(10) {
        0 => "0".to_string(),
        1 | 2 => format!("{}", rng.pick(100)),
        3 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        4 => format!("0x{:x}", rng.pick(4096)),
        5 => ["x", "y", "n"][rng.pick(3) as usize].to_string(),
        6 => ["e", "pi", "g", "c"][rng.pick(4) as usize].to_string(),
        7 => "inconnue".to_string(),
        _ => format!("{}", 1 + rng.pick(9)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let fonctions = list_function_names(CapaciteMath::presente());

    match rng.pick(12) {
        0 | 1 => gen_atom(rng),
        2 => format!("{}+{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}-{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("{}/{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        7 => {
            let op = if rng.coin() { '&' } else { '|' };
            format!("{}{op}{}", gen_atom(rng), gen_atom(rng))
        }
        8 => {
            let op = if rng.coin() { '-' } else { '~' };
            format!("{op}{}", gen_atom(rng))
        }
        9 => {
            let f = fonctions[rng.pick(fonctions.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        10 => format!("bof({})", gen_expr(rng, depth - 1)),
        _ => format!("({})", gen_expr(rng, depth - 1)),
    }
}

/// Texte aléatoire sur l’alphabet du lexeur (plus quelques intrus).
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', 'x', 'a', 's', 'i', 'n', '.', '(', ')', '+', '-', '*', '/', '^', '&', '|',
        '~', ' ', '\t', '$', 'é',
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_bits() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let cap = if rng.coin() {
            CapaciteMath::presente()
        } else {
            CapaciteMath::absente()
        };

        let r = evaluate(&expr, VARIABLES, cap);
        // même entrée => même sortie (comparaison bit à bit, NaN compris)
        let r2 = evaluate(&expr, VARIABLES, cap);
        assert_eq!(
            r.map(f64::to_bits),
            r2.map(f64::to_bits),
            "non déterministe: expr={expr:?}"
        );

        match r {
            Ok(v) => {
                if cap.disponible() {
                    assert!(v.is_finite(), "domaine non signalé: expr={expr:?} v={v}");
                }
                seen_ok += 1;
            }
            Err(e) => {
                check_erreurs(&expr, e);
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = rng.pick(20) as usize;
        let expr = gen_bruit(&mut rng, n);
        let m = rng.pick(8) as usize;
        let vars = gen_bruit(&mut rng, m);

        let (r, _d) = evaluate_detaille(&expr, &vars, CapaciteMath::presente());
        if let Err(e) = r {
            check_erreurs(&expr, e);
        }
    }
}

#[test]
fn fuzz_safe_parenthese_ouvrante() {
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..60 {
        let expr = format!("({}", gen_expr(&mut rng, 3));
        let r = evaluate(&expr, VARIABLES, CapaciteMath::presente());
        let e = r.expect_err("une '(' non fermée ne peut pas réussir");
        check_erreurs(&expr, e);
        // la syntaxe n’est pas le seul bit possible (variables évaluées avant),
        // mais sans erreur de résolution, c’est toujours SYNTAXE
        if !e.contains(Erreurs::VARIABLE) && !e.contains(Erreurs::FONCTION) {
            assert!(e.contains(Erreurs::SYNTAXE), "expr={expr:?} err={e:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = evaluate(&expr, "", CapaciteMath::presente()).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_chaine_trop_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // au-delà de la borne de profondeur : refus propre, pas de débordement de pile
    let expr = vec!["1"; 5000].join("+");
    assert_eq!(
        evaluate(&expr, "", CapaciteMath::presente()),
        Err(Erreurs::SYNTAXE)
    );
    budget(t0, max);
}
