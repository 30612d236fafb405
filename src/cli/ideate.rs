//! Concept brief generation command

use anyhow::Result;
use clap::Args;

use super::output::Output;
use crate::plugin::{Ideation, PluginLoader, GENERATOR_PREFIX};
use crate::storage::Config;

#[derive(Args)]
pub struct IdeateArgs {
    /// Idea to expand; a random project is generated when omitted
    pub prompt: Vec<String>,

    /// List discovered generators instead of generating
    #[arg(long)]
    pub list: bool,
}

pub fn run(args: IdeateArgs, output: &Output, config: &Config) -> Result<()> {
    let mut loader = PluginLoader::new();
    loader.discover();

    if args.list {
        return list_generators(&loader, output);
    }

    let idea = args.prompt.join(" ");
    output.verbose_ctx("ideate", &format!("Generating brief for: {:?}", idea));

    let ideation = Ideation::new(
        &loader,
        config.ideation.command.clone(),
        config.ideation.system_instruction.as_str(),
    );
    let text = ideation.generate(&idea)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "text": text }));
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn list_generators(loader: &PluginLoader, output: &Output) -> Result<()> {
    let generators = loader.list();

    if output.is_json() {
        let items: Vec<_> = generators
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "path": p.path.display().to_string(),
                })
            })
            .collect();
        output.data(&items);
    } else if generators.is_empty() {
        println!("No generators found.");
        println!();
        println!("Generators are executables on PATH starting with '{}',", GENERATOR_PREFIX);
        println!("or the command set in [ideation] of the config file.");
    } else {
        println!("{:<30} PATH", "NAME");
        println!("{}", "-".repeat(70));
        for generator in generators {
            println!("{:<30} {}", generator.name, generator.path.display());
        }
    }

    Ok(())
}
