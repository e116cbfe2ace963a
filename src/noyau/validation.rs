// src/noyau/validation.rs
//
// Validation : un seul balayage gauche -> droite, indépendant de l'évaluation.
// On classe chaque morceau (parenthèse, fonction, opérateur, nombre) et on compte.
// Le verdict tombe AVANT toute évaluation.
//
// Arrêts immédiats :
// - "(" + nombre nu + ")" sans nom de fonction devant      -> invalide
// - "(" + opérateur + "("                                   -> invalide
// - deux opérateurs collés (hors signe juste après "(")     -> invalide
// - nombre commençant par 0 suivi d'un chiffre ("007")      -> invalide
// - suite de lettres qui n'est pas une des 9 fonctions      -> fonction inconnue
// - caractère que personne ne reconnaît                     -> invalide
//
// Puis, sur les comptes (heuristique, pas une grammaire complète) :
// - parenthèses ouvrantes != fermantes                      -> parenthèses
// - opérateurs >= nombres sans aucune fonction              -> invalide
// - rien du tout                                            -> invalide
// - fonctions != nombres quand il n'y a aucun opérateur     -> invalide
//
// NOTE: l'heuristique laisse passer certaines formes (ex: "(1+2)(3+4)") et en refuse
// d'autres qui semblent correctes (ex: "5" seul, "(-5)" seul). C'est voulu : le
// comportement de référence est celui-là.

use tracing::debug;

use super::erreurs::ErreurCalcul;
use super::jetons::{lire_identifiant, precedent_significatif, sauter_espaces};
use super::operateur::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valide,
    ParenthesesDesequilibrees,
    ExpressionInvalide,
    FonctionInconnue,
}

impl Verdict {
    pub fn en_resultat(self) -> Result<(), ErreurCalcul> {
        match self {
            Verdict::Valide => Ok(()),
            Verdict::ParenthesesDesequilibrees => Err(ErreurCalcul::ParenthesesDesequilibrees),
            Verdict::ExpressionInvalide => Err(ErreurCalcul::ExpressionInvalide),
            Verdict::FonctionInconnue => Err(ErreurCalcul::FonctionInconnue),
        }
    }
}

/// Un compteur, ou l'erreur qui a arrêté le balayage à cet endroit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compte {
    Nombre(usize),
    Erreur(Verdict),
}

impl Default for Compte {
    fn default() -> Self {
        Compte::Nombre(0)
    }
}

impl Compte {
    fn incrementer(&mut self) {
        if let Compte::Nombre(n) = self {
            *n += 1;
        }
    }

    pub fn est_erreur(&self) -> bool {
        matches!(self, Compte::Erreur(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Comptes {
    pub ouvrantes: Compte,
    pub fermantes: usize,
    pub operateurs: Compte,
    pub nombres: Compte,
    pub fonctions: Compte,
    /// Position du premier caractère non reconnu.
    pub caractere_inconnu: Option<usize>,
}

/// Ce qu'un examen local a trouvé à la position courante.
enum Constat {
    Absent,
    Present,
    Rejet(Verdict),
}

fn chiffre_a(texte: &[u8], pos: usize) -> bool {
    texte.get(pos).is_some_and(u8::is_ascii_digit)
}

/// Opérateur binaire (ou point isolé) à la position courante.
/// Un point juste derrière est avalé et annule le constat.
fn est_operateur(texte: &[u8], pos: &mut usize) -> bool {
    let mut trouve = false;

    if matches!(
        texte.get(*pos),
        Some(b'+' | b'-' | b'*' | b'/' | b'^' | b'.')
    ) {
        trouve = true;
        *pos += 1;
    }
    if texte.get(*pos) == Some(&b'.') {
        trouve = false;
        *pos += 1;
    }

    trouve
}

/// Nombre (chiffres, avec points intercalés) à la position courante.
fn est_nombre(texte: &[u8], pos: &mut usize) -> Constat {
    if !chiffre_a(texte, *pos) {
        return Constat::Absent;
    }
    if texte[*pos] == b'0' && chiffre_a(texte, *pos + 1) {
        return Constat::Rejet(Verdict::ExpressionInvalide);
    }

    while chiffre_a(texte, *pos) {
        *pos += 1;
        if texte.get(*pos) == Some(&b'.') {
            *pos += 1;
        }
    }
    Constat::Present
}

fn est_fonction_correcte(texte: &[u8], pos: &mut usize) -> Constat {
    let (nom, fin) = lire_identifiant(texte, *pos);
    if nom.is_empty() {
        return Constat::Absent;
    }
    *pos = fin;

    if Fonction::depuis_nom(nom).is_some() {
        Constat::Present
    } else {
        Constat::Rejet(Verdict::FonctionInconnue)
    }
}

fn est_parenthese(texte: &[u8], pos: &mut usize, comptes: &mut Comptes) -> Constat {
    match texte.get(*pos) {
        Some(b')') => {
            comptes.fermantes += 1;
            *pos += 1;
            Constat::Present
        }
        Some(b'(') => {
            let ouvrante = *pos;
            *pos += 1;
            comptes.ouvrantes.incrementer();

            let suite = sauter_espaces(texte, *pos);
            if chiffre_a(texte, suite) {
                // "(5)" : littéral seul entre parenthèses, refusé sauf argument de fonction
                let mut fin = suite;
                let _ = est_nombre(texte, &mut fin);
                let ferme = texte.get(sauter_espaces(texte, fin)) == Some(&b')');
                let apres_fonction =
                    precedent_significatif(texte, ouvrante).is_some_and(|c| c.is_ascii_alphabetic());
                if ferme && !apres_fonction {
                    return Constat::Rejet(Verdict::ExpressionInvalide);
                }
            } else {
                // signe juste après "(" : avalé ici, jamais compté comme opérateur
                let mut fin = suite;
                let signe = est_operateur(texte, &mut fin);
                *pos = fin;
                if signe && texte.get(sauter_espaces(texte, fin)) == Some(&b'(') {
                    return Constat::Rejet(Verdict::ExpressionInvalide);
                }
            }
            Constat::Present
        }
        _ => Constat::Absent,
    }
}

/// Balayage complet : comptes, ou arrêt sur la première erreur rencontrée.
pub fn collecter(texte: &[u8]) -> Comptes {
    let mut c = Comptes::default();
    let mut pos = 0;

    while pos < texte.len() {
        pos = sauter_espaces(texte, pos);
        if pos >= texte.len() {
            break;
        }
        let depart = pos;

        if let Constat::Rejet(v) = est_parenthese(texte, &mut pos, &mut c) {
            c.ouvrantes = Compte::Erreur(v);
            break;
        }

        match est_fonction_correcte(texte, &mut pos) {
            Constat::Present => c.fonctions.incrementer(),
            Constat::Rejet(v) => {
                c.fonctions = Compte::Erreur(v);
                break;
            }
            Constat::Absent => {
                let mut arret = false;

                if est_operateur(texte, &mut pos) {
                    pos = sauter_espaces(texte, pos);
                    if est_operateur(texte, &mut pos) {
                        c.operateurs = Compte::Erreur(Verdict::ExpressionInvalide);
                        arret = true;
                    } else {
                        c.operateurs.incrementer();
                    }
                }

                match est_nombre(texte, &mut pos) {
                    Constat::Present => c.nombres.incrementer(),
                    Constat::Rejet(v) => {
                        c.nombres = Compte::Erreur(v);
                        arret = true;
                    }
                    Constat::Absent => {}
                }

                if arret {
                    break;
                }
            }
        }

        // garde-fou : personne n'a avancé => caractère étranger
        if pos == depart {
            c.caractere_inconnu = Some(pos);
            break;
        }
    }

    c
}

/// Verdict à partir des comptes. L'ordre des tests compte : il décide quel code
/// sort quand plusieurs défauts coexistent.
pub fn juger(c: &Comptes) -> Verdict {
    if c.caractere_inconnu.is_some() {
        return Verdict::ExpressionInvalide;
    }

    let operateurs = match c.operateurs {
        Compte::Nombre(n) => n,
        Compte::Erreur(_) => return Verdict::ExpressionInvalide,
    };
    if c.ouvrantes.est_erreur() {
        return Verdict::ExpressionInvalide;
    }
    if c.ouvrantes != Compte::Nombre(c.fermantes) {
        return Verdict::ParenthesesDesequilibrees;
    }

    let sans_fonction = c.fonctions == Compte::Nombre(0);
    if sans_fonction && matches!(c.nombres, Compte::Nombre(n) if operateurs >= n) {
        return Verdict::ExpressionInvalide;
    }
    if operateurs == 0 && c.nombres == Compte::Nombre(0) && sans_fonction {
        return Verdict::ExpressionInvalide;
    }
    if let Compte::Erreur(v) = c.fonctions {
        return v;
    }
    if operateurs == 0 && c.fonctions != c.nombres {
        return Verdict::ExpressionInvalide;
    }
    if c.nombres.est_erreur() {
        return Verdict::ExpressionInvalide;
    }

    Verdict::Valide
}

pub fn valider(texte: &[u8]) -> Verdict {
    let comptes = collecter(texte);
    let verdict = juger(&comptes);
    debug!(?comptes, ?verdict, "validation");
    verdict
}
