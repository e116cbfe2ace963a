// src/noyau/jetons.rs
//
// Lecture bas niveau du texte (octets ASCII) :
// - suites de chiffres (partie entière, partie fractionnaire)
// - suites de lettres minuscules (noms de fonctions)
// - un jeton opérateur / parenthèse / fonction
//
// Toutes les fonctions prennent un curseur et rendent le curseur avancé.
// Rien ici ne décide de la validité de l'expression (voir validation.rs).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::operateur::{Fonction, Genre, Operateur};

pub fn sauter_espaces(texte: &[u8], mut pos: usize) -> usize {
    while pos < texte.len() && texte[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Dernier caractère non blanc strictement avant `pos`.
pub fn precedent_significatif(texte: &[u8], pos: usize) -> Option<u8> {
    texte[..pos.min(texte.len())]
        .iter()
        .rev()
        .copied()
        .find(|c| !c.is_ascii_whitespace())
}

fn fin_chiffres(texte: &[u8], pos: usize) -> usize {
    let mut fin = pos;
    while fin < texte.len() && texte[fin].is_ascii_digit() {
        fin += 1;
    }
    fin
}

fn chiffres_en_entier(chiffres: &[u8]) -> BigInt {
    BigInt::parse_bytes(chiffres, 10).unwrap_or_else(BigInt::zero)
}

/// Consomme les chiffres consécutifs à partir de `pos`.
/// Aucun chiffre => (0, pos).
pub fn lire_entier(texte: &[u8], pos: usize) -> (f64, usize) {
    let fin = fin_chiffres(texte, pos);
    if fin == pos {
        return (0.0, pos);
    }
    let n = chiffres_en_entier(&texte[pos..fin]);
    (n.to_f64().unwrap_or(f64::INFINITY), fin)
}

/// Partie fractionnaire, `pos` pointant juste après le point décimal.
///
/// `entier ± chiffres / 10^nb_chiffres`, le signe venant de `negatif`.
/// Pas de chiffre après le point => None (nombre mal formé, l'appelant l'abandonne).
pub fn lire_fraction(texte: &[u8], pos: usize, entier: f64, negatif: bool) -> Option<(f64, usize)> {
    let fin = fin_chiffres(texte, pos);
    if fin == pos {
        return None;
    }

    // chiffres / 10^n calculé exactement, arrondi une seule fois
    let num = chiffres_en_entier(&texte[pos..fin]);
    let den = BigInt::from(10).pow((fin - pos) as u32);
    let frac = BigRational::new(num, den).to_f64().unwrap_or(0.0);

    let valeur = if negatif { entier - frac } else { entier + frac };
    Some((valeur, fin))
}

/// Suite de lettres minuscules ASCII (éventuellement vide).
pub fn lire_identifiant(texte: &[u8], pos: usize) -> (&str, usize) {
    let mut fin = pos;
    while fin < texte.len() && texte[fin].is_ascii_lowercase() {
        fin += 1;
    }
    // que des a..z : toujours de l'UTF-8 valide
    let nom = std::str::from_utf8(&texte[pos..fin]).unwrap_or_default();
    (nom, fin)
}

/// Lit un jeton opérateur / parenthèse / fonction.
///
/// - nom de fonction : curseur après le nom (même si le nom est inconnu)
/// - symbole connu   : curseur après le symbole
/// - autre / fin     : `Operateur::AUCUN`, curseur inchangé
pub fn lire_jeton(texte: &[u8], pos: usize) -> (Operateur, usize) {
    let (nom, fin) = lire_identifiant(texte, pos);
    if !nom.is_empty() {
        let op = Fonction::depuis_nom(nom)
            .map(Operateur::fonction)
            .unwrap_or(Operateur::AUCUN);
        return (op, fin);
    }

    match texte.get(pos) {
        Some(&c) => {
            let op = Operateur::depuis_symbole(c as char);
            if op.genre == Genre::Aucun {
                (op, pos)
            } else {
                (op, pos + 1)
            }
        }
        None => (Operateur::AUCUN, pos),
    }
}
