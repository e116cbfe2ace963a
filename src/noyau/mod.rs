//! Noyau à piles (précédence d'opérateurs)
//!
//! Organisation interne :
//! - limites.rs    : bornes (longueur max, capacités des piles)
//! - erreurs.rs    : codes d'erreur publics + contrat des piles
//! - pile.rs       : piles bornées (nombres, opérateurs)
//! - operateur.rs  : enregistrement opérateur, priorités, 9 fonctions
//! - jetons.rs     : lecture bas niveau (entiers, fractions, noms, jetons)
//! - validation.rs : balayage unique + comptes -> verdict
//! - lecture.rs    : remplissage des piles jusqu'à la prochaine réduction
//! - eval.rs       : réduction + pilote complet

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod lecture;
pub mod limites;
pub mod operateur;
pub mod pile;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurCalcul;
pub use eval::{eval_avec_limites, eval_entree, eval_expression};
pub use limites::Limites;

/// Abonné `tracing` pour les tests (RUST_LOG, sortie capturée par le harnais).
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
