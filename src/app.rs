// src/app.rs
//
// Calculatrice à piles : module App (racine)
// ------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter Session (pour main.rs)
// - Boucle de session : une ligne lue -> une action -> un écran écrit
//
// Important:
// - Les touches (C/CLR/AC/DEL, "=") sont interprétées dans vue.rs.
// - Ici, seulement l'entrée/sortie.

pub mod etat;
pub mod vue;

pub use etat::Session;

use std::io::{self, BufRead, Write};

use tracing::debug;

/// Boucle interactive : chaque ligne passe par `Session::traiter`, puis l'écran est réécrit.
/// S'arrête en fin de flux ; une erreur de lecture/écriture remonte telle quelle.
pub fn executer_session<R: BufRead, W: Write>(
    session: &mut Session,
    lecteur: R,
    mut sortie: W,
) -> io::Result<()> {
    for ligne in lecteur.lines() {
        let ligne = ligne?;
        debug!(ligne = %ligne, "touche");
        session.traiter(&ligne);
        writeln!(sortie, "{}", session.ecran())?;
    }
    sortie.flush()
}

/// Mode ligne à ligne : une expression complète par ligne, un résultat par ligne.
pub fn evaluer_lignes<R: BufRead, W: Write>(
    lecteur: R,
    mut sortie: W,
    digits: usize,
) -> io::Result<()> {
    for ligne in lecteur.lines() {
        let ligne = ligne?;
        if ligne.trim().is_empty() {
            continue;
        }
        writeln!(sortie, "{}", vue::rendre_evaluation(&ligne, digits))?;
    }
    sortie.flush()
}
