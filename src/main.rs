// src/main.rs
//
// Calculatrice à piles : point d’entrée (terminal)
// ------------------------------------------------
// But:
// - sans sous-commande : session interactive (touches ligne à ligne, "=" évalue)
// - eval [EXPR]        : une expression, ou une par ligne sur stdin
// - credit / depot     : calculs bancaires
//
// Journal : RUST_LOG (défaut "warn"), sur stderr.

use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;

use calculatrice_pile::app::etat::{DIGITS_DEFAUT, DIGITS_MAX};
use calculatrice_pile::app::vue::{
    libelle_erreur_banque, rendre_credit, rendre_depot, rendre_evaluation,
};
use calculatrice_pile::app::{evaluer_lignes, executer_session, Session};
use calculatrice_pile::banque::{calcul_credit, calcul_depot, ParametresDepot, TypeCredit};

/// Calculatrice à piles : expressions, crédit, dépôt
#[derive(Parser, Debug)]
#[command(name = "calculatrice")]
#[command(about = "Évalue des expressions arithmétiques et des calculs bancaires", long_about = None)]
struct Args {
    /// Chiffres après la virgule (0..=20)
    #[arg(long, default_value_t = DIGITS_DEFAUT)]
    digits: usize,

    #[command(subcommand)]
    commande: Option<Commande>,
}

#[derive(Subcommand, Debug)]
enum Commande {
    /// Évalue EXPR (sinon chaque ligne de stdin)
    Eval { expression: Option<String> },

    /// Crédit : mensualités, total, surcoût
    Credit {
        montant: f64,
        /// Durée en mois (1..=119)
        duree: u32,
        /// Taux annuel en % (arrondi à l'entier inférieur)
        taux: f64,
        #[arg(long, value_enum, default_value_t = Genre::Annuite)]
        genre: Genre,
    },

    /// Dépôt : intérêts, impôt, solde
    Depot {
        montant: f64,
        /// Durée en mois
        duree: f64,
        /// Taux annuel en %
        taux: f64,
        /// Impôt sur les intérêts, en %
        #[arg(long, default_value_t = 0.0)]
        impot: f64,
        /// Périodes de capitalisation par an
        #[arg(long, default_value_t = 12.0)]
        frequence: f64,
        #[arg(long, default_value_t = 0.0)]
        versements: f64,
        #[arg(long, default_value_t = 0.0)]
        retraits: f64,
        #[arg(long)]
        capitalisation: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Genre {
    Annuite,
    Differencie,
}

impl From<Genre> for TypeCredit {
    fn from(g: Genre) -> Self {
        match g {
            Genre::Annuite => TypeCredit::Annuite,
            Genre::Differencie => TypeCredit::Differencie,
        }
    }
}

fn installer_journal() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn executer(commande: Option<Commande>, digits: usize) -> io::Result<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match commande {
        None => {
            let mut session = Session::default();
            session.set_digits(digits);
            executer_session(&mut session, BufReader::new(stdin.lock()), stdout.lock())?;
        }
        Some(Commande::Eval { expression: Some(expr) }) => {
            println!("{}", rendre_evaluation(&expr, digits));
        }
        Some(Commande::Eval { expression: None }) => {
            evaluer_lignes(BufReader::new(stdin.lock()), stdout.lock(), digits)?;
        }
        Some(Commande::Credit {
            montant,
            duree,
            taux,
            genre,
        }) => match calcul_credit(montant, duree, taux, genre.into()) {
            Ok(c) => println!("{}", rendre_credit(&c, digits)),
            Err(e) => {
                eprintln!("{}", libelle_erreur_banque(&e));
                return Ok(ExitCode::FAILURE);
            }
        },
        Some(Commande::Depot {
            montant,
            duree,
            taux,
            impot,
            frequence,
            versements,
            retraits,
            capitalisation,
        }) => {
            let p = ParametresDepot {
                montant,
                duree,
                taux,
                impot,
                frequence,
                versements,
                retraits,
                capitalisation,
            };
            match calcul_depot(&p) {
                Ok(d) => println!("{}", rendre_depot(&d, digits)),
                Err(e) => {
                    eprintln!("{}", libelle_erreur_banque(&e));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    installer_journal();

    let digits = args.digits.min(DIGITS_MAX);
    match executer(args.commande, digits) {
        Ok(code) => code,
        Err(e) => {
            error!("entrée/sortie : {e}");
            ExitCode::FAILURE
        }
    }
}
