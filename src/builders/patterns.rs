use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a rule. The first rule of a run receives `1`.
pub type RuleId = u64;

/// The first identifier handed out in every conversion run.
pub const FIRST_RULE_ID: RuleId = 1;

/// Prefix that anchors a domain block rule to a host name boundary.
const DOMAIN_ANCHOR: &str = "||";
/// Separator marker that terminates a domain block rule.
const SEPARATOR: char = '^';

/// The kinds of network request a rule can apply to.
///
/// The variants mirror the labels the declarative request-filtering host
/// understands; serde renders them as the host's snake_case strings
/// (`MainFrame` becomes `"main_frame"`, `CspReport` becomes `"csp_report"`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Stylesheet,
    Script,
    Image,
    Font,
    Object,
    Xmlhttprequest,
    Ping,
    CspReport,
    Media,
    Websocket,
    Webtransport,
    Webbundle,
    Other,
}

impl ResourceType {
    /// The label used on the wire and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::MainFrame => "main_frame",
            ResourceType::SubFrame => "sub_frame",
            ResourceType::Stylesheet => "stylesheet",
            ResourceType::Script => "script",
            ResourceType::Image => "image",
            ResourceType::Font => "font",
            ResourceType::Object => "object",
            ResourceType::Xmlhttprequest => "xmlhttprequest",
            ResourceType::Ping => "ping",
            ResourceType::CspReport => "csp_report",
            ResourceType::Media => "media",
            ResourceType::Websocket => "websocket",
            ResourceType::Webtransport => "webtransport",
            ResourceType::Webbundle => "webbundle",
            ResourceType::Other => "other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource types applied to every rule unless a policy says otherwise.
pub const DEFAULT_RESOURCE_TYPES: [ResourceType; 4] = [
    ResourceType::MainFrame,
    ResourceType::SubFrame,
    ResourceType::Script,
    ResourceType::Xmlhttprequest,
];

/// Priority given to every rule kind currently supported.
pub const DEFAULT_PRIORITY: u32 = 1;

/// What the host should do with a request matched by a rule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Block,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Block => write!(f, "block"),
        }
    }
}

/// The rule shapes the builder knows how to recognize.
///
/// Each variant carries exactly the data extracted from the source line.
/// Supporting a new shape means adding a variant here, a recognizer for it,
/// and the matching arms in `url_filter` / `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// `||<domain>^`: block requests to the domain and all of its subdomains.
    DomainBlock { domain: String },
}

impl RuleKind {
    /// Renders the URL filter condition for this rule kind.
    pub fn url_filter(&self) -> String {
        match self {
            RuleKind::DomainBlock { domain } => format!("{DOMAIN_ANCHOR}{domain}/"),
        }
    }

    pub fn action(&self) -> ActionKind {
        match self {
            RuleKind::DomainBlock { .. } => ActionKind::Block,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::DomainBlock { .. } => write!(f, "domain-block"),
        }
    }
}

/// The per-rule defaults a builder stamps onto every rule it produces.
///
/// This is also the `[rules]` table of the converter config file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RulePolicy {
    pub priority: u32,
    pub resource_types: Vec<ResourceType>,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            resource_types: DEFAULT_RESOURCE_TYPES.to_vec(),
        }
    }
}

/// A single structured rule produced from one line of a filter list.
///
/// Instances only come out of [`RuleBuilder::build`], which guarantees a
/// non-empty `url_filter` and an identifier taken from the run's counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub id: RuleId,
    pub priority: u32,
    pub kind: RuleKind,
    pub url_filter: String,
    pub resource_types: Vec<ResourceType>,
    pub action: ActionKind,
}

/// Why a recognizer declined a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The line is not in a shape this recognizer handles.
    Unrecognized,
    /// The line has the right shape but nothing between its delimiters.
    EmptyDomain,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unrecognized => write!(f, "unrecognized rule syntax"),
            Rejection::EmptyDomain => write!(f, "empty domain"),
        }
    }
}

/// The `RuleRecognizer` trait is the extension point for rule syntaxes.
///
/// A recognizer looks at one trimmed, non-comment line and either extracts a
/// [`RuleKind`] from it or explains why it could not. Recognizers never assign
/// identifiers; that is the builder's job.
pub trait RuleRecognizer {
    /// Attempts to recognize `line`.
    ///
    /// # Arguments
    /// * `line`: A trimmed line that is neither blank nor a comment.
    ///
    /// # Returns
    /// The extracted `RuleKind`, or the `Rejection` describing the mismatch.
    fn recognize(&self, line: &str) -> Result<RuleKind, Rejection>;
}

/// Recognizes `||<domain>^` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomainBlockRecognizer;

impl RuleRecognizer for DomainBlockRecognizer {
    fn recognize(&self, line: &str) -> Result<RuleKind, Rejection> {
        // `||^` has both delimiters but nothing between them; `|^` would
        // overlap the delimiters and never reaches the empty check.
        let domain = line
            .strip_prefix(DOMAIN_ANCHOR)
            .and_then(|rest| rest.strip_suffix(SEPARATOR))
            .ok_or(Rejection::Unrecognized)?;

        if domain.is_empty() {
            return Err(Rejection::EmptyDomain);
        }

        Ok(RuleKind::DomainBlock {
            domain: domain.to_string(),
        })
    }
}

/// Turns candidate lines into [`FilterRule`]s.
///
/// The builder holds no counter of its own: the caller passes in the next
/// free identifier and receives the following one back, so a builder can be
/// shared freely between independent conversion runs.
pub struct RuleBuilder {
    recognizers: Vec<Box<dyn RuleRecognizer + Send + Sync>>,
    policy: RulePolicy,
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new(RulePolicy::default())
    }
}

impl RuleBuilder {
    /// Creates a builder with every built-in recognizer and the given policy.
    pub fn new(policy: RulePolicy) -> Self {
        Self {
            recognizers: vec![Box::new(DomainBlockRecognizer)],
            policy,
        }
    }

    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    /// Runs the recognizers in order and returns the first match.
    ///
    /// When every recognizer rejects the line, the most specific rejection
    /// (anything other than `Unrecognized`) wins so diagnostics can say why.
    pub fn recognize(&self, line: &str) -> Result<RuleKind, Rejection> {
        let mut rejection = Rejection::Unrecognized;
        for recognizer in &self.recognizers {
            match recognizer.recognize(line) {
                Ok(kind) => return Ok(kind),
                Err(Rejection::Unrecognized) => {}
                Err(other) => rejection = other,
            }
        }
        Err(rejection)
    }

    /// Attempts to build a rule from one candidate line.
    ///
    /// # Arguments
    /// * `line`: A trimmed line that is neither blank nor a comment.
    /// * `next_id`: The identifier the rule receives if the line is recognized.
    ///
    /// # Returns
    /// `Some((rule, next_id + 1))` when the line is recognized, `None` otherwise.
    /// A rejected line leaves the identifier sequence untouched.
    pub fn build(&self, line: &str, next_id: RuleId) -> Option<(FilterRule, RuleId)> {
        let kind = self.recognize(line).ok()?;
        let rule = FilterRule {
            id: next_id,
            priority: self.policy.priority,
            url_filter: kind.url_filter(),
            resource_types: self.policy.resource_types.clone(),
            action: kind.action(),
            kind,
        };
        Some((rule, next_id + 1))
    }
}
