//! Requirement classification command

use anyhow::Result;

use super::output::Output;
use crate::domain::classify;

pub fn run(description: &[String], output: &Output) -> Result<()> {
    let description = description.join(" ");
    if description.trim().is_empty() {
        anyhow::bail!("Description is empty");
    }

    let flags = classify(&description);

    if output.is_json() {
        output.data(&flags);
    } else {
        let mark = |on: bool| if on { "yes" } else { "no" };
        println!("realtime:    {}", mark(flags.realtime));
        println!("heavy data:  {}", mark(flags.heavy_data));
        println!("alerts:      {}", mark(flags.alerts));
    }

    Ok(())
}
