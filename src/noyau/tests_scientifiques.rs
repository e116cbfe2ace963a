//! Tests scientifiques (campagne) : scénarios nommés + propriétés + limites contrôlées.
//!
//! But : couvrir le contrat public sans faire chauffer la machine.
//! - valeurs de référence calculées hors ligne (math f64 standard)
//! - erreurs : chaque code doit rester distinguable
//! - bornes : 255 caractères acceptés, 256 refusés
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - "^" est associatif à gauche : 2^3^2 = (2^3)^2 = 64.
//! - La validation est une heuristique de comptage : "5" seul ou "(-5)" seul sont refusés,
//!   "(1+2)(3+4)" passe. On le teste tel quel.

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalcul;
use super::limites::LONGUEUR_MAX;
use super::{eval_entree, eval_expression, init_test_logging};

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-7 * (1.0 + attendu.abs());
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} obtenu={v} attendu={attendu}"
    );
}

fn assert_erreur(expr: &str, attendue: ErreurCalcul) {
    assert_eq!(eval_expression(expr), Err(attendue), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios de référence ------------------------ */

#[test]
fn sci_priorites() {
    init_test_logging();
    assert_proche("2+2*3/4^5", 2.005859375);
    assert_proche("2+(2*3/4)*cos(5)", 2.4254932781948395);
}

#[test]
fn sci_fonctions_et_signes() {
    assert_proche("sin(-1)*(2+(2*3/4))*cos(5)/tan(0.5)", -1.5292393142481115);
    assert_proche(
        "sin(-1.5)*(2+(2*3/4))*(cos(1)+tan(0.5)+asin(1)+acos(0.5)+atan(0.5)+sqrt(144)+log(1)+ln(1))",
        -56.44710613211989,
    );
}

#[test]
fn sci_imbrication_profonde() {
    assert_proche(
        "3*(3*(4-2*5/3)+2*3/4)*(3*(3*(4-2*5/3)+2*3/4))*cos(5)/3",
        10.42458531577356,
    );
    assert_proche("((1+2))", 3.0);
    assert_proche("((1+2))*((3-1))", 6.0);
}

#[test]
fn sci_associativite() {
    assert_proche("10-4-3", 3.0);
    assert_proche("64/4/2", 8.0);
    assert_proche("2^3^2", 64.0);
    assert_proche("2*3^2", 18.0);
}

#[test]
fn sci_logarithmes() {
    assert_proche("log(1000)", 3.0);
    assert_proche("ln(1)+log(100)", 2.0);
}

#[test]
fn sci_decimaux_et_signes() {
    assert_proche("2*(-0.5)+3", 2.0);
    assert_proche("1.25+0.75", 2.0);
    assert_proche("sqrt(2)*sqrt(8)", 4.0);
    // signe devant une fonction sans parenthèse : lu comme 0 - sin(2)
    assert_proche("-sin(2)", -0.9092974268256817);
}

#[test]
fn sci_espaces() {
    assert_proche(" 2 + 3 ", 5.0);
    assert_proche("2 * ( - 3 )", -6.0);
    assert_proche("sqrt (9) * 2", 6.0);
}

/* ------------------------ Domaines : NaN, pas d'erreur ------------------------ */

#[test]
fn sci_nan_propage() {
    assert!(eval_ok("1/0").is_nan());
    assert!(eval_ok("sqrt(-4)").is_nan());
    assert!(eval_ok("1/0+5").is_nan());
    assert!(eval_ok("2*sqrt(-1)-3").is_nan());
    assert!(eval_ok("acos(2)*0").is_nan());
}

/* ------------------------ Codes d'erreur ------------------------ */

#[test]
fn sci_codes_erreur() {
    assert_erreur("(2+3))", ErreurCalcul::ParenthesesDesequilibrees);
    assert_erreur("33++++", ErreurCalcul::ExpressionInvalide);
    assert_erreur("privet(33)", ErreurCalcul::FonctionInconnue);
    assert_erreur("", ErreurCalcul::ExpressionInvalide);
    assert_erreur("2(", ErreurCalcul::ParenthesesDesequilibrees);
    assert_erreur("007", ErreurCalcul::ExpressionInvalide);
    assert_erreur("2*(5)", ErreurCalcul::ExpressionInvalide);
    assert_erreur("1,5+2", ErreurCalcul::ExpressionInvalide);
    assert_eq!(eval_entree(None), Err(ErreurCalcul::EntreeAbsente));
}

#[test]
fn sci_heuristique_telle_quelle() {
    assert_erreur("5", ErreurCalcul::ExpressionInvalide);
    assert_erreur("(-5)", ErreurCalcul::ExpressionInvalide);
    assert_erreur("sin(cos(1))", ErreurCalcul::ExpressionInvalide);
    // passe la validation ; la valeur n'a pas de sens particulier
    assert!(eval_expression("(1+2)(3+4)").is_ok());
    // point sans chiffres : littéral abandonné, pas d'erreur
    assert_proche("5.+1", 1.0);
}

#[test]
fn sci_point_isole_relu_comme_fraction() {
    // le second point réduit ce qui précède, puis ".3" est relu comme un littéral
    for expr in ["5..3+1", "1.5.3+1", "2*1.5.3+1"] {
        assert_proche(expr, 1.3);
    }
}

/* ------------------------ Bornes ------------------------ */

#[test]
fn sci_longueur_limite() {
    // 128 "1" et 127 "+" : exactement 255 caractères
    let mut s = "1+".repeat(127);
    s.push('1');
    assert_eq!(s.len(), LONGUEUR_MAX);
    assert_proche(&s, 128.0);

    let trop = format!("{s} ");
    assert_eq!(
        eval_expression(&trop),
        Err(ErreurCalcul::EntreeTropLongue {
            longueur: 256,
            max: 255
        })
    );

    // longueur en caractères, pas en octets
    let accents = "é".repeat(LONGUEUR_MAX);
    assert_eq!(accents.len(), 2 * LONGUEUR_MAX);
    assert_erreur(&accents, ErreurCalcul::ExpressionInvalide);
    assert_eq!(
        eval_expression(&format!("{accents}é")),
        Err(ErreurCalcul::EntreeTropLongue {
            longueur: 256,
            max: 255
        })
    );

    // invalide ET trop long : la longueur gagne
    let n = "x".repeat(300);
    assert_eq!(
        eval_expression(&n),
        Err(ErreurCalcul::EntreeTropLongue {
            longueur: 300,
            max: 255
        })
    );
}

#[test]
fn sci_imbrication_maximale() {
    // "(1+" * 63 + "1" + ")" * 63 : 253 caractères, 63 niveaux
    let k = 63;
    let s = format!("{}1{}", "(1+".repeat(k), ")".repeat(k));
    assert!(s.len() <= LONGUEUR_MAX);
    assert_proche(&s, 64.0);
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_idempotence() {
    let start = Instant::now();
    let exprs = [
        "2+2*3/4^5",
        "sin(-1)*(2+(2*3/4))*cos(5)/tan(0.5)",
        "1/0",
        "(2+3))",
    ];
    for _ in 0..200 {
        for e in exprs {
            let a = eval_expression(e);
            let b = eval_expression(e);
            match (a, b) {
                (Ok(x), Ok(y)) => assert!(x == y || (x.is_nan() && y.is_nan()), "expr={e:?}"),
                (x, y) => assert_eq!(x, y, "expr={e:?}"),
            }
        }
        budget(start, Duration::from_secs(5));
    }
}

#[test]
fn sci_parentheses_equilibrees_jamais_desequilibrees() {
    let exprs = [
        "((1+2))",
        "(1+2)*(3+4)",
        "sin((1+2))",
        "((((1+2)*3)-4)/5)",
        "(1+2)(3+4)",
        "(-(1+2))",
        "()",
    ];
    for e in exprs {
        assert_ne!(
            eval_expression(e),
            Err(ErreurCalcul::ParenthesesDesequilibrees),
            "expr={e:?}"
        );
    }
}
