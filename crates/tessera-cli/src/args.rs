use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "tessera", version, about = "TESSERA CLI")]
pub struct Cli {
    /// Emit JSON output on stdout and JSON logs on stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// Network byte: a letter (`T`) or its decimal value (`84`).
    #[arg(long, global = true, default_value = "M")]
    pub chain_id: String,

    /// Node base URL (default: http://127.0.0.1:6869)
    #[arg(long, global = true)]
    pub node_url: Option<String>,

    /// Matcher base URL (default: http://127.0.0.1:6886)
    #[arg(long, global = true)]
    pub matcher_url: Option<String>,

    /// HTTP timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log filter in `tracing` EnvFilter syntax. Falls back to RUST_LOG.
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SeedArgs {
    /// Seed phrase. Repeat for multi-proof signing.
    #[arg(long = "seed")]
    pub seeds: Vec<String>,

    /// Proof index of the first seed; later seeds take the following indices.
    /// Without it a single seed goes to the lowest free index.
    #[arg(long)]
    pub index: Option<usize>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build and sign an object from construction parameters.
    Build {
        /// issue|transfer|reissue|burn|data|order|cancel-order|auth|custom-data
        kind: String,

        /// Parameters JSON file.
        params: String,

        #[command(flatten)]
        seeds: SeedArgs,
    },

    /// Add proofs to an existing object.
    Sign {
        /// Object JSON file.
        input: String,

        /// transaction|order|cancel-order|auth|custom-data
        #[arg(long, default_value = "transaction")]
        kind: String,

        #[command(flatten)]
        seeds: SeedArgs,
    },

    /// Print the canonical bytes and id of an object.
    Serialize {
        input: String,
        #[arg(long, default_value = "transaction")]
        kind: String,
    },

    /// Check one proof of an object.
    Verify {
        input: String,
        #[arg(long, default_value = "transaction")]
        kind: String,
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Check against this key instead of the object's own.
        #[arg(long)]
        public_key: Option<String>,
    },

    /// Derive the public key and address of a seed.
    Keys { seed: String },

    /// Send a transaction to the node, or an order/cancellation to the matcher.
    Broadcast {
        input: String,
        #[arg(long, default_value = "transaction")]
        kind: String,
        /// Amount asset of the order being cancelled (default: native).
        #[arg(long)]
        amount_asset: Option<String>,
        /// Price asset of the order being cancelled (default: native).
        #[arg(long)]
        price_asset: Option<String>,
    },
}
