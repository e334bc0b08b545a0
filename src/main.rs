use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cyberguard::config::{APP_NAME, DEFAULT_MODEL};
use cyberguard::models::{Message, RenderMode, Role};
use cyberguard::providers::gemini::GeminiClient;
use cyberguard::providers::{ModelConfig, ModelContext};
use cyberguard::services::capture::{self, VoiceRecorder};
use cyberguard::services::{credentials, ChatController};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = credentials::resolve_api_key()?;
    let client = GeminiClient::new(ModelConfig {
        api_key,
        model: DEFAULT_MODEL.to_string(),
        base_url: None,
    });
    let mut controller = ChatController::new(ModelContext::new(Arc::new(client)));
    let mut recorder = VoiceRecorder::new();

    println!("{} - Your Security Sidekick 🛡️", APP_NAME);
    println!("Commands: :attach <path>, :record, :reset, :quit");
    if let Some(greeting) = controller.conversation.last() {
        print_message(greeting);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":reset" => {
                controller.reset();
                if let Some(greeting) = controller.conversation.last() {
                    print_message(greeting);
                }
            }
            ":record" => {
                if recorder.is_recording() {
                    match recorder.stop() {
                        Ok(Some(clip)) => {
                            println!("(recording stopped)");
                            send(&mut controller, "Voice message", Some(clip)).await;
                        }
                        Ok(None) => {}
                        Err(e) => eprintln!("error: {}", e),
                    }
                } else {
                    match recorder.start() {
                        Ok(()) => println!("(recording... type :record again to stop)"),
                        Err(e) => eprintln!("error: {}", e),
                    }
                }
            }
            _ if input.starts_with(":attach ") => {
                let path = input.trim_start_matches(":attach ").trim();
                match capture::read_attachment(Path::new(path)) {
                    Ok(attachment) => {
                        let text = format!("Attached file: {}", attachment.name);
                        send(&mut controller, &text, Some(attachment)).await;
                    }
                    Err(e) => eprintln!("error: {}", e),
                }
            }
            _ => send(&mut controller, input, None).await,
        }
    }

    Ok(())
}

async fn send(
    controller: &mut ChatController,
    text: &str,
    attachment: Option<cyberguard::models::Attachment>,
) {
    let before = controller.conversation.messages.len();
    match controller.submit(text, attachment).await {
        Ok(()) => {
            for message in &controller.conversation.messages[before..] {
                print_message(message);
            }
        }
        Err(e) => eprintln!("error: {}", e),
    }
}

fn print_message(message: &Message) {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "cyberguard",
    };
    println!("[{}] {}", who, message.content);
    if let Some(attachment) = &message.attachment {
        let tag = match attachment.render_mode() {
            RenderMode::Image => "image",
            RenderMode::Audio => "audio",
            RenderMode::Download => "file",
        };
        println!(
            "      ({}: {}, {} bytes)",
            tag,
            attachment.name,
            attachment.data.len()
        );
    }
}
