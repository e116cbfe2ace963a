//! src/app/etat.rs
//!
//! État de session (sans rendu, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (tampon d’expression, résultat, erreur, digits)
//! et offrir les opérations des touches (C/CLR/AC/DEL) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur les digits affichés.

use crate::noyau::operateur::Fonction;

/// Chiffres après la virgule par défaut.
pub const DIGITS_DEFAUT: usize = 7;

/// Garde-fou : au-delà, f64 n’a plus rien à dire.
pub const DIGITS_MAX: usize = 20;

#[derive(Clone, Debug)]
pub struct Session {
    // --- tampon d’expression ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,

    // --- paramètres ---
    pub digits: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            digits: DIGITS_DEFAUT,
        }
    }
}

impl Session {
    /* ------------------------ Actions “touches” (état seulement) ------------------------ */

    /// Ajoute au tampon (toujours en minuscules : "SIN(" et "sin(" sont la même touche).
    pub fn ajouter(&mut self, texte: &str) {
        self.entree.push_str(&texte.to_lowercase());
    }

    /// AC : remise à zéro totale (tampon + résultats + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
    }

    /// C : effacer seulement le tampon (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// CLR : effacer résultat + erreur (sans toucher au tampon).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
    }

    /// DEL : retire d’un coup un nom de fonction avec sa parenthèse ("sqrt("), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // noms longs d'abord : "asin(" avant "sin("
        let mut fonctions = Fonction::TOUTES;
        fonctions.sort_by_key(|f| std::cmp::Reverse(f.nom().len()));

        for f in fonctions {
            let motif = format!("{}(", f.nom());
            if self.entree.ends_with(&motif) {
                let reste = self.entree.len() - motif.len();
                self.entree.truncate(reste);
                return;
            }
        }

        self.entree.pop();
    }

    /// Choix UX : on CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>) {
        self.erreur.clear();
        self.resultat = resultat.into();
    }

    /// Garde-fou : limite digits.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.clamp(0, DIGITS_MAX);
    }
}
