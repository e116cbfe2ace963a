// src/noyau/pile.rs
//
// Piles LIFO à capacité fixe.
// - PileNombres     : opérandes et résultats intermédiaires
// - PileOperateurs  : opérateurs / parenthèses / fonctions en attente
//
// Contrat (identique pour les deux) :
// - empiler sur une pile pleine  => ErreurPile::Pleine
// - depiler / sommet sur vide    => ErreurPile::Vide
// - vider                        => libère le stockage
//
// Les piles sont créées par appel d'évaluation et meurent avec lui.

use super::erreurs::ErreurPile;
use super::operateur::Operateur;

#[derive(Clone, Debug)]
pub struct Pile<T> {
    elements: Vec<T>,
    capacite: usize,
}

pub type PileNombres = Pile<f64>;
pub type PileOperateurs = Pile<Operateur>;

impl<T: Copy> Pile<T> {
    /// Alloue une pile bornée (le stockage est réservé d'un coup).
    pub fn new(capacite: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacite),
            capacite,
        }
    }

    pub fn empiler(&mut self, valeur: T) -> Result<(), ErreurPile> {
        if self.est_pleine() {
            return Err(ErreurPile::Pleine {
                capacite: self.capacite,
            });
        }
        self.elements.push(valeur);
        Ok(())
    }

    pub fn depiler(&mut self) -> Result<T, ErreurPile> {
        self.elements.pop().ok_or(ErreurPile::Vide)
    }

    /// Lecture non destructive du sommet.
    pub fn sommet(&self) -> Result<T, ErreurPile> {
        self.elements.last().copied().ok_or(ErreurPile::Vide)
    }

    pub fn vider(&mut self) {
        self.elements.clear();
        self.elements.shrink_to_fit();
    }

    pub fn est_vide(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn est_pleine(&self) -> bool {
        self.elements.len() >= self.capacite
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn capacite(&self) -> usize {
        self.capacite
    }
}
