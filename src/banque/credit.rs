// src/banque/credit.rs
//
// Crédit : mensualités, total remboursé, surcoût (intérêts).
//
// - taux annuel arrondi à l'entier inférieur avant usage
// - taux mensuel r = taux / 100 / 12
// - annuité     : M = montant * r(1+r)^n / ((1+r)^n - 1), constante
// - différencié : M_k = montant/n + (montant - (k-1) * montant/n) * r, décroissante

use tracing::debug;

use super::{positif, ErreurBanque, ResultatBanque};

/// Durée maximale (exclue), en mois.
pub const DUREE_MAX_MOIS: u32 = 120;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeCredit {
    #[default]
    Annuite,
    Differencie,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Credit {
    /// Mensualité constante ; 0 pour un crédit différencié (voir `mensualites`).
    pub mensualite: f64,
    pub total: f64,
    pub trop_paye: f64,
    /// Échéancier mois par mois.
    pub mensualites: Vec<f64>,
}

fn annuite(montant: f64, taux: f64, duree: u32) -> Credit {
    let r = taux / 100.0 / 12.0;
    let n = f64::from(duree);
    let facteur = (1.0 + r).powf(n);

    let mensualite = montant * (r * facteur) / (facteur - 1.0);
    let total = mensualite * n;

    Credit {
        mensualite,
        total,
        trop_paye: total - montant,
        mensualites: vec![mensualite; duree as usize],
    }
}

fn differencie(montant: f64, taux: f64, duree: u32) -> Credit {
    let r = taux / 12.0 / 100.0;
    let n = f64::from(duree);
    let principal = montant / n;

    let mut credit = Credit::default();
    for mois in 1..=duree {
        let m = principal + (montant - f64::from(mois - 1) * principal) * r;
        credit.mensualites.push(m);
        credit.total += m;
        credit.trop_paye += m - principal;
    }
    credit
}

pub fn calcul_credit(
    montant: f64,
    duree_mois: u32,
    taux_annuel: f64,
    genre: TypeCredit,
) -> ResultatBanque<Credit> {
    let montant = positif("montant", montant)?;
    let taux = positif("taux", taux_annuel)?.floor();
    if duree_mois == 0 || duree_mois >= DUREE_MAX_MOIS {
        return Err(ErreurBanque::DureeHorsBornes {
            duree: duree_mois,
            max: DUREE_MAX_MOIS,
        });
    }
    // taux < 1 : l'arrondi l'annule
    if taux <= 0.0 {
        return Err(ErreurBanque::ParametreInvalide {
            parametre: "taux",
            valeur: taux_annuel,
        });
    }

    let credit = match genre {
        TypeCredit::Annuite => annuite(montant, taux, duree_mois),
        TypeCredit::Differencie => differencie(montant, taux, duree_mois),
    };
    debug!(?genre, montant, duree_mois, taux, total = credit.total, "crédit");
    Ok(credit)
}
