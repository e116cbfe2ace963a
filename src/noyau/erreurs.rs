//! Erreurs du noyau.
//!
//! Deux familles :
//! - `ErreurCalcul` : ce que voit l'appelant (grammaire, longueur, entrée absente).
//!   Les erreurs de domaine (division par zéro, racine d'un négatif) n'en font PAS partie :
//!   elles donnent NaN.
//! - `ErreurPile` : contrat des piles bornées. Côté évaluation, une telle erreur signale
//!   un défaut interne (la validation doit garantir les bornes), jamais une faute de saisie.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("parenthèses non appariées")]
    ParenthesesDesequilibrees,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("fonction inconnue")]
    FonctionInconnue,

    #[error("entrée trop longue ({longueur} caractères, max {max})")]
    EntreeTropLongue { longueur: usize, max: usize },

    #[error("entrée absente")]
    EntreeAbsente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErreurPile {
    #[error("pile pleine (capacité {capacite})")]
    Pleine { capacite: usize },

    #[error("pile vide")]
    Vide,
}
