//! Cipherkey CLI - Command line interface.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use cipherkey_client::{decrypt_message, encrypt_message, ClientConfig, HttpEncryptionService};
use cipherkey_core::{
    generate_key, key_size_bits, normalize, resolve_key, validation_message, Algorithm, KeySource,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "cipherkey")]
#[command(about = "Cipherkey - Generate, normalize and validate AES, ChaCha20 and DES keys")]
#[command(version)]
struct Cli {
    /// Encryption service address
    #[arg(long, default_value = "http://localhost:8080", env = "CIPHERKEY_ADDR")]
    addr: String,

    /// Bearer token for the encryption service
    #[arg(long, env = "CIPHERKEY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", env = "CIPHERKEY_TIMEOUT")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key
    Generate {
        /// Algorithm (AES, CHACHA20, DES)
        #[arg(short, long)]
        algorithm: Algorithm,
        /// AES key size in bits (128, 192, 256)
        #[arg(short, long)]
        bits: Option<u16>,
        /// Print JSON instead of the bare key
        #[arg(long)]
        json: bool,
    },
    /// Turn a password into a key
    Normalize {
        /// Algorithm (AES, CHACHA20, DES)
        #[arg(short, long)]
        algorithm: Algorithm,
        /// AES key size in bits (128, 192, 256)
        #[arg(short, long)]
        bits: Option<u16>,
        /// Password (or read from stdin if not provided)
        text: Option<String>,
    },
    /// Check a key against an algorithm
    Validate {
        /// Algorithm tag
        #[arg(short, long)]
        algorithm: String,
        /// Base64 key (or read from stdin if not provided)
        key: Option<String>,
        /// Print JSON instead of the message
        #[arg(long)]
        json: bool,
    },
    /// Print the decoded size of a key in bits
    Size {
        /// Base64 key (or read from stdin if not provided)
        key: Option<String>,
    },
    /// Use a key as-is if valid, otherwise normalize it
    Resolve {
        /// Algorithm (AES, CHACHA20, DES)
        #[arg(short, long)]
        algorithm: Algorithm,
        /// AES key size in bits (128, 192, 256)
        #[arg(short, long)]
        bits: Option<u16>,
        /// Key or password (or read from stdin if not provided)
        input: Option<String>,
    },
    /// Encrypt a message with the encryption service
    Encrypt {
        /// Algorithm (AES, CHACHA20, DES)
        #[arg(short, long)]
        algorithm: Algorithm,
        /// Key or password
        #[arg(short, long)]
        key: String,
        /// AES key size in bits (128, 192, 256)
        #[arg(short, long)]
        bits: Option<u16>,
        /// Message title
        #[arg(long)]
        title: Option<String>,
        /// Message to encrypt
        message: String,
    },
    /// Decrypt a stored message with the encryption service
    Decrypt {
        /// Algorithm the message was encrypted with
        #[arg(short, long)]
        algorithm: Algorithm,
        /// Key or password
        #[arg(short, long)]
        key: String,
        /// AES key size in bits (128, 192, 256)
        #[arg(short, long)]
        bits: Option<u16>,
        /// Message id
        id: i64,
    },
}

// ============================================================================
// Output Types
// ============================================================================

#[derive(Serialize)]
struct GenerateOutput<'a> {
    algorithm: Algorithm,
    bits: Option<usize>,
    key: &'a str,
    degraded: bool,
}

#[derive(Serialize)]
struct ValidateOutput {
    kind: cipherkey_core::VerdictKind,
    valid: bool,
    bits: Option<usize>,
    message: String,
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns `value`, or reads one line from stdin when it is absent.
fn arg_or_stdin(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    eprint!("{}: ", prompt);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn build_service(addr: &str, token: Option<String>, timeout: u64) -> Result<HttpEncryptionService> {
    let mut config = ClientConfig::new(addr).with_timeout(Duration::from_secs(timeout));
    if let Some(token) = token {
        config = config.with_token(token);
    }

    HttpEncryptionService::new(config).context("Failed to create HTTP client")
}

// ============================================================================
// Command Handlers
// ============================================================================

fn cmd_generate(algorithm: Algorithm, bits: Option<u16>, json: bool) -> Result<()> {
    let generated = generate_key(algorithm, bits)?;

    if generated.is_degraded() {
        eprintln!("WARNING: no secure random source available.");
        eprintln!("This key was generated from a predictable source. Do not use it for real data.");
    }

    if json {
        let output = GenerateOutput {
            algorithm,
            bits: key_size_bits(generated.key.as_str()),
            key: generated.key.as_str(),
            degraded: generated.is_degraded(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", generated.key.as_str());
    }

    Ok(())
}

fn cmd_normalize(algorithm: Algorithm, bits: Option<u16>, text: Option<String>) -> Result<()> {
    let text = arg_or_stdin(text, "Enter password")?;
    let key = normalize(algorithm, &text, bits)?;

    if text.is_empty() {
        eprintln!("WARNING: empty password produces an all-zero key.");
    }

    println!("{}", key.as_str());
    Ok(())
}

fn cmd_validate(algorithm: &str, key: Option<String>, json: bool) -> Result<bool> {
    let key = arg_or_stdin(key, "Enter key")?;
    let verdict = validation_message(algorithm, &key);

    if json {
        let output = ValidateOutput {
            kind: verdict.kind(),
            valid: verdict.is_valid(),
            bits: key_size_bits(&key),
            message: verdict.message(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", verdict);
    }

    Ok(verdict.is_valid())
}

fn cmd_size(key: Option<String>) -> Result<()> {
    let key = arg_or_stdin(key, "Enter key")?;

    match key_size_bits(&key) {
        Some(bits) => println!("{}", bits),
        None => bail!("Key is not valid Base64"),
    }

    Ok(())
}

fn cmd_resolve(algorithm: Algorithm, bits: Option<u16>, input: Option<String>) -> Result<()> {
    let input = arg_or_stdin(input, "Enter key or password")?;
    let resolved = resolve_key(algorithm, &input, bits)?;

    if resolved.source == KeySource::Normalized {
        eprintln!("Input is not a valid {} key; normalized it as a password.", algorithm);
    }

    println!("{}", resolved.key.as_str());
    Ok(())
}

async fn cmd_encrypt(
    service: &HttpEncryptionService,
    algorithm: Algorithm,
    key: &str,
    bits: Option<u16>,
    title: Option<&str>,
    message: &str,
) -> Result<()> {
    let result = encrypt_message(service, algorithm, key, bits, message, title)
        .await
        .context("Encryption failed")?;

    println!("Message encrypted successfully!");
    println!("  Id:        {}", result.id);
    if let Some(title) = &result.title {
        println!("  Title:     {}", title);
    }
    println!("  Algorithm: {}", result.algorithm);
    println!("  Content:   {}", result.encrypted_content);
    if let Some(created_at) = &result.created_at {
        println!("  Created:   {}", created_at);
    }

    Ok(())
}

async fn cmd_decrypt(
    service: &HttpEncryptionService,
    algorithm: Algorithm,
    key: &str,
    bits: Option<u16>,
    id: i64,
) -> Result<()> {
    let result = decrypt_message(service, algorithm, key, bits, id)
        .await
        .context("Decryption failed")?;

    println!("{}", result.decrypted_message);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            algorithm,
            bits,
            json,
        } => cmd_generate(algorithm, bits, json)?,
        Commands::Normalize {
            algorithm,
            bits,
            text,
        } => cmd_normalize(algorithm, bits, text)?,
        Commands::Validate {
            algorithm,
            key,
            json,
        } => {
            if !cmd_validate(&algorithm, key, json)? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Size { key } => cmd_size(key)?,
        Commands::Resolve {
            algorithm,
            bits,
            input,
        } => cmd_resolve(algorithm, bits, input)?,
        Commands::Encrypt {
            algorithm,
            key,
            bits,
            title,
            message,
        } => {
            let service = build_service(&cli.addr, cli.token, cli.timeout)?;
            cmd_encrypt(&service, algorithm, &key, bits, title.as_deref(), &message).await?
        },
        Commands::Decrypt {
            algorithm,
            key,
            bits,
            id,
        } => {
            let service = build_service(&cli.addr, cli.token, cli.timeout)?;
            cmd_decrypt(&service, algorithm, &key, bits, id).await?
        },
    }

    Ok(ExitCode::SUCCESS)
}
