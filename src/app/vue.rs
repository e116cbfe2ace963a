// src/app/vue.rs
//
// Vue (texte) : terminal
// ----------------------
// Objectifs :
// - Même Session (etat.rs) pour le mode interactif et le mode ligne à ligne
// - Une ligne lue = une touche ou un morceau d’expression
// - "=" évalue puis vide le tampon
// - Chaque code d’erreur a son libellé, NaN s’affiche "indéfini"

use std::fmt::Write as _;

use crate::banque::{Credit, Depot, ErreurBanque};
use crate::noyau::{eval_expression, ErreurCalcul};

use super::etat::Session;

/* ------------------------ Formatage ------------------------ */

/// Virgule fixe à `digits` chiffres, zéros de queue retirés.
pub fn formater_nombre(v: f64, digits: usize) -> String {
    if v.is_nan() {
        return "indéfini".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let mut s = format!("{v:.digits$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn libelle_erreur(e: &ErreurCalcul) -> String {
    match e {
        ErreurCalcul::EntreeTropLongue { max, .. } => format!("Limite de {max} caractères atteinte"),
        autre => format!("Erreur : {autre}"),
    }
}

pub fn libelle_erreur_banque(e: &ErreurBanque) -> String {
    format!("Erreur : {e}")
}

/// Évaluation “one-shot” : résultat formaté ou libellé d’erreur.
pub fn rendre_evaluation(texte: &str, digits: usize) -> String {
    match eval_expression(texte) {
        Ok(v) => formater_nombre(v, digits),
        Err(e) => libelle_erreur(&e),
    }
}

pub fn rendre_credit(c: &Credit, digits: usize) -> String {
    let f = |v| formater_nombre(v, digits);
    let mut s = String::new();

    if c.mensualite != 0.0 {
        let _ = writeln!(s, "Mensualité : {}", f(c.mensualite));
    } else {
        for (i, m) in c.mensualites.iter().enumerate() {
            let _ = writeln!(s, "Mois {:>3} : {}", i + 1, f(*m));
        }
    }
    let _ = writeln!(s, "Total      : {}", f(c.total));
    let _ = write!(s, "Surcoût    : {}", f(c.trop_paye));
    s
}

pub fn rendre_depot(d: &Depot, digits: usize) -> String {
    let f = |v| formater_nombre(v, digits);
    format!(
        "Intérêts : {}\nImpôt    : {}\nSolde    : {}",
        f(d.interets),
        f(d.impots),
        f(d.total)
    )
}

/* ------------------------ Commandes de session ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
enum Action {
    Calculer,
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    Digits(usize),
    Ajouter(String),
}

fn action(ligne: &str) -> Action {
    let t = ligne.trim();
    match t {
        "=" => Action::Calculer,
        "C" => Action::ClearEntree,
        "CLR" => Action::ClearResultats,
        "AC" => Action::ResetTotal,
        "DEL" => Action::Backspace,
        _ => match t.strip_prefix(":digits").map(str::trim).map(str::parse::<usize>) {
            Some(Ok(d)) => Action::Digits(d),
            _ => Action::Ajouter(t.to_string()),
        },
    }
}

impl Session {
    /// "=" : évalue le tampon, dépose le résultat (ou l’erreur), vide le tampon.
    pub fn calculer(&mut self) {
        match eval_expression(&self.entree) {
            Ok(v) => {
                let r = formater_nombre(v, self.digits);
                self.set_resultat(r);
            }
            Err(e) => self.set_erreur(libelle_erreur(&e)),
        }
        self.clear_entree();
    }

    /// Une ligne de terminal. Un "=" final évalue dans la foulée ("2+3=").
    pub fn traiter(&mut self, ligne: &str) {
        match action(ligne) {
            Action::Calculer => self.calculer(),
            Action::ClearEntree => self.clear_entree(),
            Action::ClearResultats => self.clear_resultats(),
            Action::ResetTotal => self.reset_total(),
            Action::Backspace => self.backspace_entree(),
            Action::Digits(d) => self.set_digits(d),
            Action::Ajouter(texte) => match texte.strip_suffix('=') {
                Some(debut) => {
                    self.ajouter(debut);
                    self.calculer();
                }
                None => self.ajouter(&texte),
            },
        }
    }

    /// Écran : tampon, puis erreur (prioritaire) ou dernier résultat.
    pub fn ecran(&self) -> String {
        let mut s = format!("> {}", self.entree);
        if !self.erreur.is_empty() {
            let _ = write!(s, "\n! {}", self.erreur);
        } else if !self.resultat.is_empty() {
            let _ = write!(s, "\n= {}", self.resultat);
        }
        s
    }
}
