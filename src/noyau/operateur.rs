// src/noyau/operateur.rs
//
// Enregistrement “opérateur” tel qu'il vit dans la pile des opérateurs.
//
// Priorités (plus grand = lie plus fort) :
//   parenthèses = 1, + - = 2, * / = 3, ^ = 5, fonction = 10
// Une fonction lie donc toujours plus fort que n'importe quel opérateur binaire.

use std::fmt;

pub const PRIORITE_AUCUNE: u8 = 0;
pub const PRIORITE_PARENTHESE: u8 = 1;
pub const PRIORITE_ADDITIVE: u8 = 2;
pub const PRIORITE_MULTIPLICATIVE: u8 = 3;
pub const PRIORITE_PUISSANCE: u8 = 5;
pub const PRIORITE_FONCTION: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Aucun,
    ParentheseOuvrante,
    ParentheseFermante,
    Binaire,
    Fonction,
}

/// Les neuf fonctions unaires connues. Ensemble fermé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Cos,
    Sin,
    Tan,
    Acos,
    Asin,
    Atan,
    Sqrt,
    Ln,
    Log,
}

impl Fonction {
    pub const TOUTES: [Fonction; 9] = [
        Fonction::Cos,
        Fonction::Sin,
        Fonction::Tan,
        Fonction::Acos,
        Fonction::Asin,
        Fonction::Atan,
        Fonction::Sqrt,
        Fonction::Ln,
        Fonction::Log,
    ];

    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "cos" => Some(Fonction::Cos),
            "sin" => Some(Fonction::Sin),
            "tan" => Some(Fonction::Tan),
            "acos" => Some(Fonction::Acos),
            "asin" => Some(Fonction::Asin),
            "atan" => Some(Fonction::Atan),
            "sqrt" => Some(Fonction::Sqrt),
            "ln" => Some(Fonction::Ln),
            "log" => Some(Fonction::Log),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Cos => "cos",
            Fonction::Sin => "sin",
            Fonction::Tan => "tan",
            Fonction::Acos => "acos",
            Fonction::Asin => "asin",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
        }
    }

    /// Application brute (sémantique f64 standard).
    /// ln = logarithme naturel, log = logarithme décimal.
    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Fonction::Cos => x.cos(),
            Fonction::Sin => x.sin(),
            Fonction::Tan => x.tan(),
            Fonction::Acos => x.acos(),
            Fonction::Asin => x.asin(),
            Fonction::Atan => x.atan(),
            Fonction::Sqrt => x.sqrt(),
            Fonction::Ln => x.ln(),
            Fonction::Log => x.log10(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Operateur {
    /// `+ - * / ^ ( )` ; None pour une fonction ou un jeton non reconnu.
    pub symbole: Option<char>,
    pub genre: Genre,
    pub priorite: u8,
    /// Présent seulement si `genre == Genre::Fonction`.
    pub fonction: Option<Fonction>,
}

impl Operateur {
    pub const AUCUN: Operateur = Operateur {
        symbole: None,
        genre: Genre::Aucun,
        priorite: PRIORITE_AUCUNE,
        fonction: None,
    };

    /// Symbole inconnu => `Operateur::AUCUN`.
    pub fn depuis_symbole(c: char) -> Operateur {
        let (genre, priorite) = match c {
            '+' | '-' => (Genre::Binaire, PRIORITE_ADDITIVE),
            '*' | '/' => (Genre::Binaire, PRIORITE_MULTIPLICATIVE),
            '^' => (Genre::Binaire, PRIORITE_PUISSANCE),
            '(' => (Genre::ParentheseOuvrante, PRIORITE_PARENTHESE),
            ')' => (Genre::ParentheseFermante, PRIORITE_PARENTHESE),
            _ => return Operateur::AUCUN,
        };
        Operateur {
            symbole: Some(c),
            genre,
            priorite,
            fonction: None,
        }
    }

    pub fn fonction(f: Fonction) -> Operateur {
        Operateur {
            symbole: None,
            genre: Genre::Fonction,
            priorite: PRIORITE_FONCTION,
            fonction: Some(f),
        }
    }

    pub fn est_signe(&self) -> bool {
        matches!(self.symbole, Some('+') | Some('-'))
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.symbole, self.fonction) {
            (Some(c), _) => write!(f, "{c}"),
            (None, Some(fonc)) => write!(f, "{}", fonc.nom()),
            (None, None) => write!(f, "∅"),
        }
    }
}
