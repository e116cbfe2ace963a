// src/noyau/lecture.rs
//
// Lecture incrémentale : remplit les deux piles depuis une position donnée et
// rend la main dès qu'une réduction est nécessaire (ou en fin de texte).
//
// Un appel =
//   [nombre] [jeton] [nombre] [jeton] ... jusqu'au premier jeton qui impose de réduire.
//
// Réduction nécessaire si, avec `sommet` = opérateur au sommet (AUCUN si pile vide) :
// - priorité < sommet, jeton != "(", sommet présent
// - priorité == sommet, jeton != "("
// - jeton == ")"
//
// Si on réduit sur un opérateur binaire ou une fonction, le curseur revient sur le
// jeton : il sera relu après la réduction, face au nouveau sommet.
// ")" est empilé quand même : le pilote s'en sert pour vider jusqu'à "(".
// Un jeton inconnu (AUCUN) réduit toujours, n'est jamais empilé et ne fait pas reculer.
//
// Signe : "+" / "-" dont le caractère significatif précédent est "(" => signe du
// prochain littéral, rien n'est empilé. Le drapeau ne survit pas à l'appel.

use tracing::{trace, warn};

use super::jetons::{lire_entier, lire_fraction, lire_jeton, precedent_significatif, sauter_espaces};
use super::operateur::{Genre, Operateur};
use super::pile::{PileNombres, PileOperateurs};

/* ------------------------ empilage tolérant ------------------------ */

pub(crate) fn empiler_nombre(nombres: &mut PileNombres, valeur: f64) {
    if let Err(e) = nombres.empiler(valeur) {
        warn!(%e, valeur, "nombre abandonné");
    }
}

fn empiler_operateur(operateurs: &mut PileOperateurs, op: Operateur) {
    if let Err(e) = operateurs.empiler(op) {
        warn!(%e, %op, "opérateur abandonné");
    }
}

/* ------------------------ règles ------------------------ */

fn est_signe_unaire(texte: &[u8], debut_jeton: usize, op: &Operateur) -> bool {
    op.est_signe() && precedent_significatif(texte, debut_jeton) == Some(b'(')
}

pub fn doit_reduire(operateurs: &PileOperateurs, op: &Operateur) -> bool {
    let sommet = operateurs.sommet().unwrap_or(Operateur::AUCUN);

    if op.priorite < sommet.priorite
        && op.genre != Genre::ParentheseOuvrante
        && sommet.genre != Genre::Aucun
    {
        return true;
    }
    if op.priorite == sommet.priorite && op.genre != Genre::ParentheseOuvrante {
        return true;
    }
    op.genre == Genre::ParentheseFermante
}

fn revient_sur_jeton(op: &Operateur) -> bool {
    !matches!(op.genre, Genre::Aucun | Genre::ParentheseFermante)
}

/* ------------------------ lecture ------------------------ */

/// Lit à partir de `depart` et rend la position où reprendre.
pub fn lire_expression(
    texte: &[u8],
    nombres: &mut PileNombres,
    operateurs: &mut PileOperateurs,
    depart: usize,
) -> usize {
    let mut pos = depart;
    let mut negatif = false;

    while pos < texte.len() {
        pos = sauter_espaces(texte, pos);
        if pos >= texte.len() {
            break;
        }

        // 1) littéral éventuel
        let (entier, fin) = lire_entier(texte, pos);
        let a_un_entier = fin > pos;
        pos = fin;
        let entier = if negatif { -entier } else { entier };

        if texte.get(pos) == Some(&b'.') {
            // "5." sans chiffres derrière : le littéral est perdu
            if let Some((valeur, fin)) = lire_fraction(texte, pos + 1, entier, negatif) {
                empiler_nombre(nombres, valeur);
                pos = fin;
            } else {
                pos += 1;
            }
        } else if a_un_entier {
            empiler_nombre(nombres, entier);
        }

        // 2) jeton
        pos = sauter_espaces(texte, pos);
        let debut_jeton = pos;
        let (op, fin) = lire_jeton(texte, pos);
        pos = fin;

        if est_signe_unaire(texte, debut_jeton, &op) {
            negatif = op.symbole == Some('-');
            continue;
        }

        // jeton inconnu (point isolé) : priorité 0, réduit sans être empilé ; la
        // reprise se fait dessus et le relit comme une fraction
        if op.genre == Genre::Aucun && pos < texte.len() {
            trace!(pos = debut_jeton, "jeton inconnu au milieu du texte");
        }

        let reduire = doit_reduire(operateurs, &op);
        if reduire && revient_sur_jeton(&op) {
            pos = debut_jeton;
        }
        if op.genre != Genre::Aucun && (!reduire || op.genre == Genre::ParentheseFermante) {
            empiler_operateur(operateurs, op);
        }
        negatif = false;

        if reduire {
            trace!(pos, %op, "réduction demandée");
            break;
        }
    }

    pos
}
