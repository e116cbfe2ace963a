// src/banque/depot.rs
//
// Dépôt : intérêts, impôt, solde final.
//
// Sans capitalisation :
//   base = montant + versements - retraits
//   intérêts = base * taux * (durée * 31 / 365) / 100
//   impôt = base * impôt% / 100
// Avec capitalisation (fréquence = périodes par an) :
//   cap(x) = x * (1 + taux / fréquence / 1200)^(fréquence * durée) - x
//   intérêts = cap(montant) + cap(versements)
//   impôt = intérêts * impôt% / 100

use tracing::debug;

use super::{fini, positif, ResultatBanque};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParametresDepot {
    pub montant: f64,
    /// En mois.
    pub duree: f64,
    /// Taux annuel, en %.
    pub taux: f64,
    /// Impôt sur les intérêts, en %.
    pub impot: f64,
    pub frequence: f64,
    pub versements: f64,
    pub retraits: f64,
    pub capitalisation: bool,
}

impl Default for ParametresDepot {
    fn default() -> Self {
        Self {
            montant: 0.0,
            duree: 12.0,
            taux: 0.0,
            impot: 0.0,
            frequence: 12.0,
            versements: 0.0,
            retraits: 0.0,
            capitalisation: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Depot {
    pub interets: f64,
    pub impots: f64,
    pub total: f64,
}

fn capitaliser(x: f64, taux: f64, frequence: f64, duree: f64) -> f64 {
    x * (1.0 + taux / frequence / 1200.0).powf(frequence * duree) - x
}

pub fn calcul_depot(p: &ParametresDepot) -> ResultatBanque<Depot> {
    let montant = positif("montant", p.montant)?;
    let duree = positif("durée", p.duree)?;
    let taux = positif("taux", p.taux)?;
    let frequence = positif("fréquence", p.frequence)?;
    let impot = fini("impôt", p.impot)?;
    let versements = fini("versements", p.versements)?;
    let retraits = fini("retraits", p.retraits)?;

    let depot = if p.capitalisation {
        let interets = capitaliser(montant, taux, frequence, duree)
            + capitaliser(versements, taux, frequence, duree);
        let impots = interets * impot / 100.0;
        Depot {
            interets,
            impots,
            total: montant + versements + interets - impots - retraits,
        }
    } else {
        let base = montant + versements - retraits;
        let interets = base * taux * (duree * 31.0 / 365.0) / 100.0;
        let impots = base * impot / 100.0;
        Depot {
            interets,
            impots,
            total: base + interets - impots,
        }
    };

    debug!(capitalisation = p.capitalisation, total = depot.total, "dépôt");
    Ok(depot)
}
