// src/noyau/limites.rs
//
// Bornes d'une évaluation.
// La longueur maximale de l'entrée borne tout le reste : profondeur des
// parenthèses, nombre d'opérandes, nombre d'itérations de la lecture.

/// Longueur maximale (en caractères) d'une expression.
pub const LONGUEUR_MAX: usize = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    pub longueur_max: usize,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX,
        }
    }
}

impl Limites {
    pub fn new(longueur_max: usize) -> Self {
        Self { longueur_max }
    }

    /// Pile des nombres : au pire un opérande tous les deux caractères ("1+1+1…").
    pub fn capacite_nombres(&self) -> usize {
        self.longueur_max / 2 + 1
    }

    /// Pile des opérateurs : chaque opérateur empilé consomme au moins un caractère.
    pub fn capacite_operateurs(&self) -> usize {
        self.longueur_max + 1
    }
}
