use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "parcels", version)]
#[command(about = "Manage parcels stored in a local key-value slot")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file (default: ./parcels.toml if present)")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Directory holding the storage slots")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Name of the slot holding the parcel list")]
    pub slot: Option<String>,

    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show every parcel
    List,
    /// Show one parcel
    Show { id: String },
    /// Create a parcel
    Add(AddArgs),
    /// Change an existing parcel; omitted fields keep their value
    Edit(EditArgs),
    /// Delete a parcel after confirmation
    Delete {
        id: String,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    #[arg(long, default_value_t = 0.1)]
    pub weight: f64,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub quantity: Option<u32>,

    #[arg(long)]
    pub weight: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_defaults() {
        let cli = CliConfig::try_parse_from(["parcels", "add", "--name", "Box A"]).unwrap();
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.name, "Box A");
                assert_eq!(args.description, "");
                assert_eq!(args.quantity, 1);
                assert_eq!(args.weight, 0.1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from([
            "parcels", "delete", "p-1", "--yes", "--data-dir", "/tmp/x", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }
}
