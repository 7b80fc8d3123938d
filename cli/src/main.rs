//! `hill` — command-line front end for the `hill-crypto` engine.
//!
//! Everything here is I/O glue: key parsing, case folding, dropping
//! non-letters, display. The core only ever sees alphabet letters and
//! integer matrices.

use clap::{Parser, Subcommand};

use hill_crypto::alphabet::Alphabet;
use hill_crypto::cipher::HillKey;
use hill_crypto::ring::matrix_ops::determinant_mod;
use hill_crypto::ring::{Matrix, Ring, gcd};

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "hill",
    about = "Generalized Hill cipher over Z_m (classic alphabet: A=1 ... Y=25, Z=0)"
)]
struct Cli {
    /// Key matrix rows, semicolon-separated: "1,2;3,5".
    #[arg(long, conflicts_with = "key_file")]
    key: Option<String>,

    /// JSON file holding the key matrix as nested arrays: [[1,2],[3,5]].
    #[arg(long)]
    key_file: Option<PathBuf>,

    /// Cipher alphabet; its size is the modulus m. The last letter maps to
    /// symbol 0 and doubles as the padding letter.
    #[arg(long, default_value = "ABCDEFGHIJKLMNOPQRSTUVWXYZ")]
    alphabet: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a message. Case is folded and non-letters are dropped before
    /// encryption; short messages are padded with the wrap letter.
    Encrypt { message: String },
    /// Decrypt a ciphertext produced by `encrypt`. The output keeps any
    /// trailing padding: the cipher cannot tell a pad letter from a genuine
    /// trailing wrap letter.
    Decrypt { message: String },
    /// Show the key's determinant, invertibility, and inverse matrix.
    Inspect,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let alphabet = Alphabet::try_with(&cli.alphabet)?;
    let ring = Ring::try_with(alphabet.modulus())?;
    let matrix = load_matrix(&cli)?;

    match cli.command {
        Command::Encrypt { message } => {
            let key = HillKey::try_with(matrix, ring)?;
            let cleaned = sanitize(&message, &alphabet);
            log::debug!("cleaned message: {}", cleaned);

            let cipher = key.encrypt(&cleaned, &alphabet)?;
            println!("Message:    {}", cleaned);
            println!("Ciphertext: {}", cipher);

            // Decode the fresh ciphertext as a self-check; the result is the
            // cleaned message plus any padding.
            let check = key.decrypt(&cipher, &alphabet)?;
            println!("Round-trip: {}", check);
        }
        Command::Decrypt { message } => {
            let key = HillKey::try_with(matrix, ring)?;
            let cleaned = sanitize(&message, &alphabet);

            let decoded = key.decrypt(&cleaned, &alphabet)?;
            println!("{}", decoded);
        }
        Command::Inspect => {
            let det = determinant_mod(&matrix, &ring)?;
            let g = gcd(det, ring.modulus() as i64);
            println!("Key matrix:\n{}", format_matrix(&matrix));
            println!("Determinant (mod {}): {}", ring.modulus(), det);
            println!("gcd(det, m):          {}", g);

            if g == 1 {
                let key = HillKey::try_with(matrix, ring)?;
                println!("Inverse matrix:\n{}", format_matrix(key.inverse()));
            } else {
                println!("Matrix is NOT invertible mod {}; pick another key.", ring.modulus());
            }
        }
    }

    Ok(())
}

fn load_matrix(cli: &Cli) -> Result<Matrix, Box<dyn Error>> {
    if let Some(raw) = &cli.key {
        return parse_matrix(raw);
    }
    if let Some(path) = &cli.key_file {
        let contents = fs::read_to_string(path)?;
        let matrix: Matrix = serde_json::from_str(&contents)?;
        return Ok(matrix);
    }
    Err("provide a key with --key or --key-file".into())
}

/// Parses "1,2;3,5" into [[1,2],[3,5]]. Squareness is the core's check.
fn parse_matrix(raw: &str) -> Result<Matrix, Box<dyn Error>> {
    raw.split(';')
        .map(|row| {
            row.split(',')
                .map(|entry| {
                    entry
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| format!("invalid matrix entry '{}'", entry.trim()).into())
                })
                .collect()
        })
        .collect()
}

/// Uppercases and drops everything outside the alphabet. This filtering is a
/// front-end policy; the core rejects unfiltered input instead of guessing.
fn sanitize(message: &str, alphabet: &Alphabet) -> String {
    message
        .to_uppercase()
        .chars()
        .filter(|&c| alphabet.contains(c))
        .collect()
}

fn format_matrix(matrix: &Matrix) -> String {
    matrix
        .iter()
        .map(|row| {
            let entries: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            format!("[{}]", entries.join(", "))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matrix() {
        let matrix = parse_matrix("1,2;3,5").unwrap();
        assert_eq!(matrix, vec![vec![1, 2], vec![3, 5]]);

        let negative = parse_matrix("-1, 0; 2, 7").unwrap();
        assert_eq!(negative, vec![vec![-1, 0], vec![2, 7]]);

        assert!(parse_matrix("1,x;3,5").is_err());
    }

    #[test]
    fn test_sanitize_folds_and_filters() {
        let alphabet = Alphabet::classic();
        assert_eq!(sanitize("Hello, World!", &alphabet), "HELLOWORLD");
        assert_eq!(sanitize("already clean", &alphabet), "ALREADYCLEAN");
    }

    #[test]
    fn test_format_matrix() {
        let matrix = vec![vec![1, 2], vec![3, 5]];
        assert_eq!(format_matrix(&matrix), "[1, 2]\n[3, 5]");
    }
}
