// This file is the module declaration file for the `builders` module.
// It declares the pipeline stages and the helpers around them.

// `classifier` module:
// Splits raw filter-list text into trimmed lines and classifies each as
// blank, comment or rule candidate. Only candidates reach the rule builder.
pub mod classifier;

// `importer` module:
// Reads filter-list text from files or stdin for the CLI. Invalid UTF-8 is
// replaced, never rejected.
pub mod importer;

// `patterns` module:
// The rule data model (`FilterRule`, `RuleKind`, `ResourceType`,
// `RulePolicy`), the `RuleRecognizer` trait and the `RuleBuilder` that
// assigns identifiers to recognized lines.
pub mod patterns;

// `reporter` module:
// Prints conversion statistics and line diagnostics for the `check` command.
pub mod reporter;

// `serializer` module:
// Renders an ordered rule list as the JSON array the host's declarative
// request-filtering API accepts.
pub mod serializer;

// `validator` module:
// Config validation (`ConfigValidator`) and per-line list diagnostics
// (`ListChecker`).
pub mod validator;
