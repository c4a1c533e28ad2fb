use anyhow::Result;

use utility_bar::config::BarConfig;
use utility_bar::parser::{plain_text, resolve_with_source};

pub fn preview(config: &BarConfig, json: bool) -> Result<()> {
    config.validate()?;
    let (source, messages) = resolve_with_source(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    println!("Resolved {} message(s) from {source}", messages.len());
    println!("================================");
    for (i, message) in messages.iter().enumerate() {
        println!("{}. {}", i + 1, plain_text(message.markup()));
        println!("   markup: {}", message.markup());
        if message.has_timer() {
            println!("   (carries countdown placeholder)");
        }
    }

    match config.slide_interval() {
        Some(interval) if messages.len() > 1 => println!(
            "\nRotating every {}s ({}, {}ms transition)",
            interval.as_secs(),
            config.slide_direction,
            config.slide_speed
        ),
        _ => println!("\nStatic bar"),
    }
    Ok(())
}
