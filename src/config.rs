pub const APP_NAME: &str = "CyberGuard";

/// Environment variable holding the Gemini API key. The key is never
/// embedded in source or written to disk.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const INITIAL_GREETING: &str = "Hey there! 👋 I'm CyberGuard, your cybersecurity buddy! \
Ready to explore ethical hacking, encryption, or security? 🛡️";

pub const RESET_GREETING: &str =
    "Hey! 👋 CyberGuard ready for more security chat! What's on your mind? 🛡️";

/// Maximum length (in characters) of the conversation title derived from
/// the first user message.
pub const TITLE_MAX_CHARS: usize = 30;
