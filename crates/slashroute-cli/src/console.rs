//! Responder that prints to stdout

use async_trait::async_trait;
use slashroute_core::{Choice, InteractionResponder};

/// Prints every response instead of sending it
#[derive(Debug, Default)]
pub struct ConsoleResponder;

#[async_trait]
impl InteractionResponder for ConsoleResponder {
    async fn send_message(&self, content: &str, ephemeral: bool) -> anyhow::Result<()> {
        if ephemeral {
            println!("[ephemeral] {}", content);
        } else {
            println!("{}", content);
        }
        Ok(())
    }

    async fn send_autocomplete(&self, choices: Vec<Choice>) -> anyhow::Result<()> {
        println!("{} suggestion(s):", choices.len());
        for choice in choices {
            println!("  {} => {}", choice.name, choice.value);
        }
        Ok(())
    }
}
