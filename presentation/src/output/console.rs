//! Console output formatter for chat replies

use colored::Colorize;
use seismic_application::TurnReply;
use seismic_domain::{ConversationContext, DefaultValue, DispatchOutcome, ToolRegistry, Value};
use serde_json::json;

/// Formats replies, tool listings and session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything this formatter prints
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format one assistant reply
    pub fn format_reply(reply: &TurnReply) -> String {
        let mut output = String::new();

        if let Some(tool) = &reply.tool {
            output.push_str(&format!("{}\n", format!("── {} ──", tool).dimmed()));
        }

        let text = match &reply.outcome {
            DispatchOutcome::Ok(_) => reply.text.normal(),
            DispatchOutcome::MissingParams(_) | DispatchOutcome::ExecutionError(_) => {
                reply.text.red()
            }
            DispatchOutcome::UnrecognizedIntent(_) => reply.text.yellow(),
        };
        output.push_str(&text.to_string());
        output.push('\n');

        if let Some(artifact) = &reply.artifact {
            output.push_str(&format!(
                "\n{} {}\n",
                "Figure:".green().bold(),
                artifact.uri
            ));
        }

        output
    }

    /// Format a reply as a single JSON line
    pub fn format_json(reply: &TurnReply) -> String {
        let value = json!({
            "tool": reply.tool,
            "outcome": reply.outcome.label(),
            "text": reply.text,
            "artifact": reply.artifact,
        });
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the registered tools with their parameters
    pub fn format_tools(registry: &ToolRegistry) -> String {
        let mut output = Self::section_header("Available tools");

        for tool in registry.all() {
            output.push_str(&format!(
                "\n{}  {}\n",
                tool.name.yellow().bold(),
                tool.description
            ));
            output.push_str(&format!(
                "  {} {}\n",
                "keywords:".dimmed(),
                tool.keywords.join(", ")
            ));
            output.push_str(&format!(
                "  {} {}\n",
                "required:".dimmed(),
                tool.required.join(", ")
            ));
            if !tool.optional.is_empty() {
                let optional = tool
                    .optional
                    .iter()
                    .map(|p| match &p.default {
                        DefaultValue::Value(v) => format!("{}={}", p.name, v),
                        DefaultValue::NoDefault => p.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                output.push_str(&format!("  {} {}\n", "optional:".dimmed(), optional));
            }
        }

        output
    }

    /// Summarize what the conversation currently remembers
    pub fn format_context(context: &ConversationContext) -> String {
        let mut output = Self::section_header("Conversation context");

        if context.values().is_empty() {
            output.push_str(&format!("{}\n", "(empty)".dimmed()));
        }
        for (key, value) in context.values().iter() {
            let summary = match value {
                Value::Number(n) => format!("{:?}", n),
                Value::Sequence(values) => format!("{} samples", values.len()),
                Value::Artifact(artifact) => artifact.uri.clone(),
            };
            output.push_str(&format!(
                "  {} {:<9} {}\n",
                format!("{:<14}", key).cyan(),
                value.kind(),
                summary
            ));
        }

        output.push_str(&format!(
            "{} {}\n",
            "Turns:".dimmed(),
            context.turns().len()
        ));
        output
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
