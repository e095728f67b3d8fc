//! Prompt rendering.

use colored::Colorize;
use copyshell_core::Session;

/// The `user@host:path$ ` prompt for one iteration of the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    user_host: String,
    path: String,
}

impl Prompt {
    pub fn for_session(session: &Session) -> Self {
        Self {
            user_host: format!("{}@{}", session.username(), session.hostname()),
            path: session.display_cwd(),
        }
    }

    /// Uncolored text. rustyline measures this one for cursor placement.
    pub fn plain(&self) -> String {
        format!("{}:{}$ ", self.user_host, self.path)
    }

    pub fn colored(&self) -> String {
        format!(
            "{}:{}$ ",
            self.user_host.green().bold(),
            self.path.blue().bold()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyshell_core::Identity;

    fn session_in(cwd: &str) -> Session {
        Session::new(Identity::new("alice", "box", "/home/alice"), cwd)
    }

    #[test]
    fn test_plain_prompt_abbreviates_home() {
        let prompt = Prompt::for_session(&session_in("/home/alice/src"));
        assert_eq!(prompt.plain(), "alice@box:~/src$ ");
    }

    #[test]
    fn test_plain_prompt_outside_home() {
        let prompt = Prompt::for_session(&session_in("/tmp"));
        assert_eq!(prompt.plain(), "alice@box:/tmp$ ");
    }

    #[test]
    fn test_colored_prompt_keeps_text() {
        colored::control::set_override(true);
        let prompt = Prompt::for_session(&session_in("/home/alice"));
        let colored = prompt.colored();
        colored::control::unset_override();

        assert!(colored.contains("alice@box"));
        assert!(colored.contains('~'));
        assert!(colored.ends_with("$ "));
        assert_ne!(colored, prompt.plain());
    }
}
