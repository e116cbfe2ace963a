//! Calculatrice à piles
//!
//! - noyau  : validation, lecture incrémentale et réduction à deux piles bornées
//! - banque : crédit et dépôt
//! - app    : session de calculatrice (état des touches + rendu texte)

pub mod app;
pub mod banque;
pub mod noyau;

pub use noyau::{eval_avec_limites, eval_entree, eval_expression, ErreurCalcul, Limites};
