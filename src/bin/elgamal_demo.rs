use clap::Parser;
use elgamal_signature::{Config, KeyPairGenerator, ParameterGenerator, SecureRng, Signer, Verifier};
use sha2::{Digest, Sha256};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "elgamal-demo")]
#[command(about = "Generate an ElGamal system, sign a message and verify it", long_about = None)]
#[command(version)]
struct Args {
    /// Bit length of the safe prime modulus
    #[arg(short, long, env = "ELGAMAL_DEMO_BITS", default_value = "100")]
    bits: u64,

    /// Message to sign
    #[arg(
        short,
        long,
        default_value = "Introduction to information security - Elgamal digital signature"
    )]
    message: String,

    /// Message checked against the same signature (expected to fail)
    #[arg(
        short,
        long,
        default_value = "Introduction to information security - Elgamal digital signature1"
    )]
    forged_message: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        info!("Using default configuration");
        Config::default()
    });

    let mut rng = SecureRng::new();

    println!();
    println!("Message: {}", args.message);
    println!();

    let params =
        ParameterGenerator::new(config.clone()).generate(args.bits, Sha256::new(), &mut rng)?;
    println!("Generated system:");
    println!("  N = {}", params.bit_length());
    println!("  p = {}", params.modulus());
    println!("  g = {}", params.generator());
    println!("  H = SHA-256");
    println!();

    let keys = KeyPairGenerator::new(&params).generate(&mut rng);
    println!("Generated key pair (x, y):");
    println!("  x = {}", keys.private_key().expose_secret());
    println!("  y = {}", keys.public_key().value());
    println!();

    let digest = Sha256::digest(args.message.as_bytes());
    println!("Message digest: {}", hex::encode(digest));

    let signature = Signer::with_config(&params, keys.private_key(), &config)?
        .sign(args.message.as_bytes(), &mut rng)?;
    println!("Generated signature pair (r, s):");
    println!("  r = {}", signature.r());
    println!("  s = {}", signature.s());
    println!();

    let verifier = Verifier::new(&params, keys.public_key());
    let genuine = verifier.verify(args.message.as_bytes(), &signature);
    let forged = verifier.verify(args.forged_message.as_bytes(), &signature);
    println!("=> Is signature valid for the message? {genuine}");
    println!("=> Is signature valid for {:?}? {forged}", args.forged_message);
    println!("----------------------------------------------------------------");

    if !genuine {
        return Err("genuine signature failed verification".into());
    }

    Ok(())
}
