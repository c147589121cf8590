pub mod human;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Trait for command outputs that can be rendered in both human and JSON formats.
pub trait CommandOutput: Serialize {
    fn human_display(&self) -> String;
}

/// Standard wrapper for `--json` output.
#[derive(Serialize)]
pub struct JsonEnvelope<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> JsonEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// A result that carries data but still counts as a failed run.
    pub fn failure(data: T, message: String) -> Self {
        Self {
            ok: false,
            data: Some(data),
            error: Some(message),
        }
    }
}

impl JsonEnvelope<()> {
    pub fn error(message: String) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message),
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => human::error(&format!("failed to serialize output: {e}")),
    }
}

/// Print a command output in the requested format.
pub fn print_output<T: CommandOutput>(output: &T, format: OutputFormat) {
    match format {
        OutputFormat::Human => human::success(&output.human_display()),
        OutputFormat::Json => print_json(&JsonEnvelope::success(output)),
    }
}

/// Print a command output that still fails the run, such as a report
/// listing broken links.
pub fn print_failure<T: CommandOutput>(output: &T, message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Human => human::error(message),
        OutputFormat::Json => print_json(&JsonEnvelope::failure(output, message.to_string())),
    }
}

/// Report a failed command. JSON mode writes the envelope to stdout so
/// callers always get a parseable document.
pub fn print_error(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Human => human::error(message),
        OutputFormat::Json => print_json(&JsonEnvelope::error(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Count {
        posts: usize,
    }

    impl CommandOutput for Count {
        fn human_display(&self) -> String {
            format!("{} posts", self.posts)
        }
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Human);
    }

    #[test]
    fn test_success_envelope_wraps_output() {
        let out = Count { posts: 3 };
        let json = serde_json::to_value(JsonEnvelope::success(&out)).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["data"]["posts"], 3);
        assert!(json.get("error").is_none());
        assert_eq!(out.human_display(), "3 posts");
    }

    #[test]
    fn test_failure_envelope_keeps_data() {
        let json =
            serde_json::to_value(JsonEnvelope::failure(Count { posts: 1 }, "broken".into()))
                .unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["data"]["posts"], 1);
        assert_eq!(json["error"], "broken");
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let json = serde_json::to_value(JsonEnvelope::<()>::error("no posts".into())).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "no posts");
    }
}
