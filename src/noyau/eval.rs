//! Noyau : évaluation (pipeline réel)
//!
//! longueur -> validation -> [lecture -> réduction]* -> vidange -> résultat
//!
//! Remarque : les erreurs de domaine (division par zéro, racine d'un négatif) ne
//! sont pas des erreurs : elles donnent NaN, qui se propage jusqu'au résultat.

use tracing::{debug, trace, warn};

use super::erreurs::ErreurCalcul;
use super::lecture::{empiler_nombre, lire_expression};
use super::limites::Limites;
use super::operateur::{Fonction, Genre};
use super::pile::{PileNombres, PileOperateurs};
use super::validation::valider;

/* ------------------------ réduction ------------------------ */

/// Pile vide => 0.0 (jamais atteint pour une entrée validée, sauf signe devant fonction).
fn depiler_ou_zero(nombres: &mut PileNombres) -> f64 {
    nombres.depiler().unwrap_or_else(|e| {
        warn!(%e, "opérande manquant, lu comme 0");
        0.0
    })
}

fn appliquer_fonction(f: Fonction, x: f64) -> f64 {
    if f == Fonction::Sqrt && x < 0.0 {
        return f64::NAN;
    }
    f.appliquer(x)
}

/// `b OP a` : `b` est l'opérande de gauche (dépilé en second).
fn appliquer_binaire(symbole: char, b: f64, a: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    match symbole {
        '+' => b + a,
        '-' => b - a,
        '*' => b * a,
        '/' if a == 0.0 => f64::NAN,
        '/' => b / a,
        '^' => b.powf(a),
        _ => f64::NAN,
    }
}

/// Dépile un opérateur (ou une fonction), calcule, rempile le résultat.
/// N'échoue jamais : tout défaut se dégrade (NaN, 0.0, ou enregistrement ignoré).
pub fn reduire(nombres: &mut PileNombres, operateurs: &mut PileOperateurs) {
    let op = match operateurs.depiler() {
        Ok(op) => op,
        Err(e) => {
            warn!(%e, "réduction sans opérateur");
            return;
        }
    };

    let resultat = match (op.genre, op.fonction, op.symbole) {
        (Genre::Fonction, Some(f), _) => {
            let x = depiler_ou_zero(nombres);
            appliquer_fonction(f, x)
        }
        (Genre::Binaire, _, Some(s)) => {
            let a = depiler_ou_zero(nombres);
            let b = depiler_ou_zero(nombres);
            appliquer_binaire(s, b, a)
        }
        _ => {
            warn!(%op, "enregistrement non calculable ignoré");
            return;
        }
    };

    trace!(%op, resultat, "réduction");
    empiler_nombre(nombres, resultat);
}

/// ")" au sommet : on le retire puis on réduit jusqu'à "(" (retirée aussi).
fn fermer_parenthese(nombres: &mut PileNombres, operateurs: &mut PileOperateurs) {
    let _ = operateurs.depiler();
    loop {
        match operateurs.sommet() {
            Ok(op) if op.genre == Genre::ParentheseOuvrante => break,
            Ok(_) => reduire(nombres, operateurs),
            Err(_) => {
                warn!("\")\" sans \"(\" correspondante");
                return;
            }
        }
    }
    let _ = operateurs.depiler();
}

/// Fin de texte : "(" restantes jetées, le reste réduit dans l'ordre LIFO.
fn vidanger(nombres: &mut PileNombres, operateurs: &mut PileOperateurs) {
    while let Ok(op) = operateurs.sommet() {
        if op.genre == Genre::ParentheseOuvrante {
            let _ = operateurs.depiler();
        } else {
            reduire(nombres, operateurs);
        }
    }
}

/* ------------------------ API publique ------------------------ */

/// Évalue `texte` avec les bornes par défaut (255 caractères).
pub fn eval_expression(texte: &str) -> Result<f64, ErreurCalcul> {
    eval_avec_limites(texte, &Limites::default())
}

/// Point d'entrée “nullable” : `None` => `EntreeAbsente`.
pub fn eval_entree(texte: Option<&str>) -> Result<f64, ErreurCalcul> {
    match texte {
        Some(t) => eval_expression(t),
        None => Err(ErreurCalcul::EntreeAbsente),
    }
}

pub fn eval_avec_limites(texte: &str, limites: &Limites) -> Result<f64, ErreurCalcul> {
    let longueur = texte.chars().count();
    if longueur > limites.longueur_max {
        return Err(ErreurCalcul::EntreeTropLongue {
            longueur,
            max: limites.longueur_max,
        });
    }

    let octets = texte.as_bytes();
    valider(octets).en_resultat()?;

    // piles propres à cet appel
    let mut nombres = PileNombres::new(limites.capacite_nombres());
    let mut operateurs = PileOperateurs::new(limites.capacite_operateurs());

    let mut pos = 0;
    while pos < octets.len() {
        let suivant = lire_expression(octets, &mut nombres, &mut operateurs, pos);

        // garde-fou : aucun progrès possible
        if suivant == pos && operateurs.est_vide() {
            warn!(pos, "lecture bloquée");
            break;
        }
        pos = suivant;

        if pos > 0 && !operateurs.est_vide() {
            match operateurs.sommet() {
                Ok(op) if op.genre == Genre::ParentheseFermante => {
                    fermer_parenthese(&mut nombres, &mut operateurs)
                }
                _ => reduire(&mut nombres, &mut operateurs),
            }
        }
    }

    vidanger(&mut nombres, &mut operateurs);

    let resultat = depiler_ou_zero(&mut nombres);
    if !nombres.est_vide() {
        debug!(restants = nombres.len(), "opérandes non consommés");
    }
    nombres.vider();
    operateurs.vider();

    debug!(texte, resultat, "évaluation");
    Ok(resultat)
}
