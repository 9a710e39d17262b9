use anyhow::Result;
use clap::Parser;
use mre_cli::{Cli, Commands, ModRoster};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { conf, mods_dir } => {
            let roster = ModRoster::from_paths(&conf, &mods_dir)?;
            let problems = roster.validate();

            if problems.is_empty() {
                println!(
                    "[+] {} mod(s) validated successfully: {}",
                    roster.load_order().len(),
                    roster.load_order().join(", ")
                );
                Ok(())
            } else {
                for problem in &problems {
                    println!("[-] {problem}");
                }
                anyhow::bail!("{} problem(s) found", problems.len());
            }
        }
    }
}
