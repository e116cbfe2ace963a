//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée, longueur <= 255
//! - budget temps global
//! - invariant clé : toute expression générée “propre” est acceptée, et la valeur des piles
//!   coïncide avec un évaluateur récursif de référence (même sémantique, 1e-7 relatif)
//! - texte arbitraire : jamais de panique, jamais de blocage

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalcul;
use super::limites::LONGUEUR_MAX;
use super::operateur::Fonction;
use super::{eval_expression, init_test_logging};

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

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_litteral(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 => format!("{}", rng.pick(21)),
        1 => format!("{}.5", rng.pick(10)),
        2 => format!("{}.25", rng.pick(10)),
        // 0 de temps en temps : divisions par zéro
        3 if rng.pick(4) == 0 => "0".to_string(),
        _ => format!("{}", 1 + rng.pick(9)),
    }
}

fn gen_op(rng: &mut Rng) -> char {
    match rng.pick(9) {
        0 | 1 => '+',
        2 | 3 => '-',
        4 | 5 => '*',
        6 | 7 => '/',
        _ => '^',
    }
}

fn gen_fonction(rng: &mut Rng) -> Fonction {
    Fonction::TOUTES[rng.pick(Fonction::TOUTES.len() as u32) as usize]
}

/// Littéral éventuellement signé : seulement juste après "(".
fn gen_premier(rng: &mut Rng, profondeur: usize, signe_possible: bool) -> String {
    if signe_possible && rng.pick(3) == 0 {
        let signe = if rng.coin() { '-' } else { '+' };
        format!("{signe}{}", gen_litteral(rng))
    } else {
        gen_terme(rng, profondeur)
    }
}

/// Au moins un opérateur binaire : jamais de "(5)" nu.
fn gen_chaine(rng: &mut Rng, profondeur: usize, signe_possible: bool) -> String {
    let mut s = gen_premier(rng, profondeur, signe_possible);
    for _ in 0..1 + rng.pick(3) {
        s.push(gen_op(rng));
        s.push_str(&gen_terme(rng, profondeur));
    }
    s
}

fn gen_terme(rng: &mut Rng, profondeur: usize) -> String {
    if profondeur == 0 {
        return gen_litteral(rng);
    }

    match rng.pick(6) {
        0..=2 => gen_litteral(rng),
        3 => format!("({})", gen_chaine(rng, profondeur - 1, true)),
        _ => {
            let f = gen_fonction(rng);
            let arg = if rng.coin() {
                gen_premier(rng, 0, true)
            } else {
                gen_chaine(rng, profondeur - 1, true)
            };
            format!("{}({arg})", f.nom())
        }
    }
}

fn gen_expression(rng: &mut Rng) -> String {
    loop {
        let s = gen_chaine(rng, 3, false);
        if s.len() <= LONGUEUR_MAX {
            return s;
        }
    }
}

/* ------------------------ Évaluateur de référence (récursif) ------------------------ */

struct Reference<'a> {
    texte: &'a [u8],
    pos: usize,
}

fn priorite(c: u8) -> Option<u8> {
    match c {
        b'+' | b'-' => Some(2),
        b'*' | b'/' => Some(3),
        b'^' => Some(5),
        _ => None,
    }
}

fn binaire(op: u8, b: f64, a: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    match op {
        b'+' => b + a,
        b'-' => b - a,
        b'*' => b * a,
        b'/' if a == 0.0 => f64::NAN,
        b'/' => b / a,
        _ => b.powf(a),
    }
}

impl<'a> Reference<'a> {
    fn new(texte: &'a str) -> Self {
        Self {
            texte: texte.as_bytes(),
            pos: 0,
        }
    }

    fn courant(&self) -> Option<u8> {
        self.texte.get(self.pos).copied()
    }

    fn litteral(&mut self) -> f64 {
        let debut = self.pos;
        while self
            .courant()
            .is_some_and(|c| c.is_ascii_digit() || c == b'.')
        {
            self.pos += 1;
        }
        let s = std::str::from_utf8(&self.texte[debut..self.pos]).unwrap();
        s.parse().unwrap_or_else(|_| panic!("littéral illisible: {s:?}"))
    }

    /// Précédence croissante, tout associatif à gauche (y compris "^").
    fn suite(&mut self, mut gauche: f64, min: u8) -> f64 {
        while let Some(p) = self.courant().and_then(priorite) {
            if p < min {
                break;
            }
            let op = self.texte[self.pos];
            self.pos += 1;
            let droite = self.expression(p + 1);
            gauche = binaire(op, gauche, droite);
        }
        gauche
    }

    fn expression(&mut self, min: u8) -> f64 {
        let gauche = self.primaire();
        self.suite(gauche, min)
    }

    /// Contenu d'une parenthèse ; curseur juste après "(".
    fn groupe(&mut self) -> f64 {
        let v = match self.courant() {
            Some(s @ (b'-' | b'+')) => {
                self.pos += 1;
                let lit = self.litteral();
                let lit = if s == b'-' { -lit } else { lit };
                self.suite(lit, 0)
            }
            _ => self.expression(0),
        };
        assert_eq!(self.courant(), Some(b')'));
        self.pos += 1;
        v
    }

    fn primaire(&mut self) -> f64 {
        match self.courant() {
            Some(b'(') => {
                self.pos += 1;
                self.groupe()
            }
            Some(c) if c.is_ascii_lowercase() => {
                let debut = self.pos;
                while self.courant().is_some_and(|c| c.is_ascii_lowercase()) {
                    self.pos += 1;
                }
                let nom = std::str::from_utf8(&self.texte[debut..self.pos]).unwrap();
                let f = Fonction::depuis_nom(nom).unwrap();
                assert_eq!(self.courant(), Some(b'('));
                self.pos += 1;
                let x = self.groupe();
                if f == Fonction::Sqrt && x < 0.0 {
                    f64::NAN
                } else {
                    f.appliquer(x)
                }
            }
            _ => self.litteral(),
        }
    }
}

fn reference(texte: &str) -> f64 {
    let mut r = Reference::new(texte);
    let v = r.expression(0);
    assert_eq!(r.pos, texte.len(), "référence incomplète: {texte:?}");
    v
}

fn memes_valeurs(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a == b {
        return true;
    }
    (a - b).abs() <= 1e-7 * (1.0 + b.abs())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_reference_et_piles_coincident() {
    init_test_logging();
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_nan = 0usize;
    let mut seen_fini = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_expression(&mut rng);
        let attendu = reference(&expr);
        let obtenu = eval_expression(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        assert!(
            memes_valeurs(obtenu, attendu),
            "expr={expr:?} obtenu={obtenu} attendu={attendu}"
        );

        if obtenu.is_nan() {
            seen_nan += 1;
        } else {
            seen_fini += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_fini > 50, "trop peu de valeurs: {seen_fini}");
    assert!(seen_nan > 0, "aucun NaN vu: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let ea = gen_expression(&mut a);
        let eb = gen_expression(&mut b);
        assert_eq!(ea, eb);

        let va = eval_expression(&ea).unwrap_or_else(|e| panic!("expr={ea:?} err={e}"));
        let vb = eval_expression(&eb).unwrap_or_else(|e| panic!("expr={eb:?} err={e}"));
        assert!(va.to_bits() == vb.to_bits() || (va.is_nan() && vb.is_nan()));
    }
}

#[test]
fn fuzz_safe_texte_arbitraire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    // alphabet volontairement hostile : noms partiels, virgules, majuscules, espaces
    let alphabet = b"0123456789..++--**//^^(())  sincotaqrlgxS,";
    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..3000 {
        budget(t0, max);

        let n = 1 + rng.pick(40) as usize;
        let expr: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize] as char)
            .collect();

        match eval_expression(&expr) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    matches!(
                        e,
                        ErreurCalcul::ParenthesesDesequilibrees
                            | ErreurCalcul::ExpressionInvalide
                            | ErreurCalcul::FonctionInconnue
                    ),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    assert!(seen_err > 0);
    let _ = seen_ok;
}

#[test]
fn fuzz_safe_somme_longue_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // "0.5+0.5+..." : 64 termes, 255 caractères
    let expr = vec!["0.5"; 64].join("+");
    assert_eq!(expr.len(), LONGUEUR_MAX);
    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v, 32.0);
}
