//! Calculs bancaires (indépendants du noyau d'expressions)
//!
//! - credit.rs : crédit à annuités constantes ou à amortissement constant (différencié)
//! - depot.rs  : dépôt avec ou sans capitalisation des intérêts
//!
//! Fonctions pures : paramètres numériques -> enregistrement résultat, ou `ErreurBanque`.

use thiserror::Error;

pub mod credit;
pub mod depot;

pub use credit::{calcul_credit, Credit, TypeCredit};
pub use depot::{calcul_depot, Depot, ParametresDepot};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ErreurBanque {
    #[error("paramètre invalide : {parametre} = {valeur}")]
    ParametreInvalide { parametre: &'static str, valeur: f64 },

    #[error("durée hors bornes : {duree} mois (max {max} exclu)")]
    DureeHorsBornes { duree: u32, max: u32 },
}

pub type ResultatBanque<T> = Result<T, ErreurBanque>;

/// Strictement positif et fini.
pub(crate) fn positif(parametre: &'static str, valeur: f64) -> ResultatBanque<f64> {
    if !valeur.is_finite() || valeur <= 0.0 {
        return Err(ErreurBanque::ParametreInvalide { parametre, valeur });
    }
    Ok(valeur)
}

/// Fini, zéro accepté (impôt, versements, retraits).
pub(crate) fn fini(parametre: &'static str, valeur: f64) -> ResultatBanque<f64> {
    if !valeur.is_finite() {
        return Err(ErreurBanque::ParametreInvalide { parametre, valeur });
    }
    Ok(valeur)
}
