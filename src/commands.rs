//! The `SET_SMOOTH_AXIS` command and its KEY=VALUE line parser.
//!
//! The command surface is a single text line in the classic machine-control
//! style:
//!
//! ```text
//! SET_SMOOTH_AXIS [SMOOTHER=<name>] [TARGET_FREQ_X=<f>] [TARGET_FREQ_Y=<f>]
//!                 [TARGET_FREQ_XY=<f>] [DAMPING_RATIO_X=<f>]
//!                 [DAMPING_RATIO_Y=<f>] [DAMPING_RATIO_XY=<f>]
//! ```
//!
//! Any omitted parameter keeps its current value. The `_XY` pair keys set
//! both axes at once and take precedence over the per-axis keys in the same
//! command. Parsing is purely syntactic; range validation happens in
//! [`SmoothingController::apply_command`](crate::SmoothingController::apply_command)
//! before any state changes.
//!
//! # Example
//!
//! ```rust
//! use smooth_axis::SmoothAxisCommand;
//!
//! let cmd = SmoothAxisCommand::parse(
//!     "SET_SMOOTH_AXIS SMOOTHER=di TARGET_FREQ_X=40 DAMPING_RATIO_X=0.1",
//! ).unwrap();
//! assert_eq!(cmd.smoother.as_deref(), Some("di"));
//! assert_eq!(cmd.target_freq_x, Some(40.0));
//! assert_eq!(cmd.target_freq_y, None);
//! ```

/// The command word this parser accepts.
pub const COMMAND_NAME: &str = "SET_SMOOTH_AXIS";

/// A parsed `SET_SMOOTH_AXIS` command. Every field is optional; `None`
/// means "keep the current value".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothAxisCommand {
    /// Requested smoother name (resolved against the catalog later).
    pub smoother: Option<String>,
    /// Target resonant frequency for X, Hz.
    pub target_freq_x: Option<f64>,
    /// Target resonant frequency for Y, Hz.
    pub target_freq_y: Option<f64>,
    /// Target resonant frequency for both axes; wins over the per-axis keys.
    pub target_freq_xy: Option<f64>,
    /// Damping ratio for X.
    pub damping_ratio_x: Option<f64>,
    /// Damping ratio for Y.
    pub damping_ratio_y: Option<f64>,
    /// Damping ratio for both axes; wins over the per-axis keys.
    pub damping_ratio_xy: Option<f64>,
}

impl SmoothAxisCommand {
    /// An empty command (keeps every current value).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoother name.
    pub fn with_smoother(mut self, name: &str) -> Self {
        self.smoother = Some(name.to_string());
        self
    }

    /// Set the X target frequency.
    pub fn with_target_freq_x(mut self, freq: f64) -> Self {
        self.target_freq_x = Some(freq);
        self
    }

    /// Set the Y target frequency.
    pub fn with_target_freq_y(mut self, freq: f64) -> Self {
        self.target_freq_y = Some(freq);
        self
    }

    /// Set both target frequencies at once.
    pub fn with_target_freq_xy(mut self, freq: f64) -> Self {
        self.target_freq_xy = Some(freq);
        self
    }

    /// Set the X damping ratio.
    pub fn with_damping_ratio_x(mut self, ratio: f64) -> Self {
        self.damping_ratio_x = Some(ratio);
        self
    }

    /// Set the Y damping ratio.
    pub fn with_damping_ratio_y(mut self, ratio: f64) -> Self {
        self.damping_ratio_y = Some(ratio);
        self
    }

    /// Set both damping ratios at once.
    pub fn with_damping_ratio_xy(mut self, ratio: f64) -> Self {
        self.damping_ratio_xy = Some(ratio);
        self
    }

    /// Parse a command line.
    ///
    /// The command word is matched case-insensitively; keys are
    /// case-insensitive; values keep their original text (the smoother
    /// name is resolved later, numeric values are parsed here).
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let mut tokens = line.split_whitespace();
        let word = tokens.next().ok_or(CommandParseError::Empty)?;
        if !word.eq_ignore_ascii_case(COMMAND_NAME) {
            return Err(CommandParseError::UnknownCommand(word.to_string()));
        }

        let mut cmd = Self::default();
        for token in tokens {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| CommandParseError::MalformedToken(token.to_string()))?;
            let upper = key.to_ascii_uppercase();
            match upper.as_str() {
                "SMOOTHER" => cmd.smoother = Some(value.to_string()),
                "TARGET_FREQ_X" => cmd.target_freq_x = Some(parse_float(key, value)?),
                "TARGET_FREQ_Y" => cmd.target_freq_y = Some(parse_float(key, value)?),
                "TARGET_FREQ_XY" => cmd.target_freq_xy = Some(parse_float(key, value)?),
                "DAMPING_RATIO_X" => cmd.damping_ratio_x = Some(parse_float(key, value)?),
                "DAMPING_RATIO_Y" => cmd.damping_ratio_y = Some(parse_float(key, value)?),
                "DAMPING_RATIO_XY" => cmd.damping_ratio_xy = Some(parse_float(key, value)?),
                _ => return Err(CommandParseError::UnknownKey(key.to_string())),
            }
        }
        Ok(cmd)
    }

    /// True when no parameter was given (the command would echo current
    /// values unchanged).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_float(key: &str, value: &str) -> Result<f64, CommandParseError> {
    value.parse().map_err(|_| CommandParseError::BadValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Syntactic command-line errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// The line was empty.
    Empty,
    /// The first word was not `SET_SMOOTH_AXIS`.
    UnknownCommand(String),
    /// A parameter token had no `=`.
    MalformedToken(String),
    /// A parameter key is not part of the command.
    UnknownKey(String),
    /// A numeric value failed to parse.
    BadValue {
        /// The offending key.
        key: String,
        /// The unparseable value text.
        value: String,
    },
}

impl core::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandParseError::Empty => write!(f, "empty command line"),
            CommandParseError::UnknownCommand(word) => write!(f, "unknown command '{word}'"),
            CommandParseError::MalformedToken(token) => {
                write!(f, "malformed parameter '{token}' (expected KEY=VALUE)")
            }
            CommandParseError::UnknownKey(key) => write!(f, "unknown parameter '{key}'"),
            CommandParseError::BadValue { key, value } => {
                write!(f, "unable to parse '{value}' for parameter '{key}'")
            }
        }
    }
}

impl std::error::Error for CommandParseError {}
