//! The frozen catalogue: every known setting, its default, and its validator.
//!
//! Dispatch is a `match` over [`Setting`]; adding a setting means adding a
//! variant, a name, a doc line, and a validator here.

use std::collections::BTreeMap;

use tracing::debug;

use crate::coerce;
use crate::registry::TypeRegistry;
use crate::value::{RawInput, RawValue, Value};

/// A known configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Setting {
    Gitignore,
    EnvExample,
    EnvFile,
    MoveContent,
    ContentDevOp,
    ContentDevDir,
    RegisterThemeFolder,
    PreventOverwrite,
    Verbosity,
    Dropins,
    UnknownDropins,
    GitignoreRules,
    CustomSteps,
    Scripts,
}

/// What a validator decided about one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Store this canonical value.
    Accept(Value),
    /// The input explicitly asks for the default.
    UseDefault,
    /// The input is invalid; fall back to the default or omit the key.
    Reject,
}

/// Validator signature: raw value plus the full input it came from.
pub(crate) type Validator = fn(&RawValue, &Context<'_>) -> Outcome;

/// Everything a validator may look at besides its own raw value.
pub(crate) struct Context<'a> {
    input: &'a RawInput,
    registry: &'a dyn TypeRegistry,
}

impl<'a> Context<'a> {
    pub(crate) fn new(input: &'a RawInput, registry: &'a dyn TypeRegistry) -> Self {
        Self { input, registry }
    }

    /// The raw value a sibling setting was given in the same input.
    fn sibling(&self, setting: Setting) -> Option<&RawValue> {
        self.input.get(setting.name())
    }
}

const DEV_OPS: [&str; 3] = ["symlink", "copy", "none"];
const DEV_OP_ALIASES: [(&str, &str); 4] = [
    ("link", "symlink"),
    ("ln", "symlink"),
    ("cp", "copy"),
    ("skip", "none"),
];

const VERBOSITY_MAX: i64 = 2;

const GITIGNORE_FLAGS: [&str; 4] = ["wp", "wp-content", "vendor", "common"];
const GITIGNORE_CUSTOM: &str = "custom";

const HOOK_PREFIXES: [&str; 2] = ["pre-", "post-"];

impl Setting {
    pub const ALL: [Setting; 14] = [
        Setting::Gitignore,
        Setting::EnvExample,
        Setting::EnvFile,
        Setting::MoveContent,
        Setting::ContentDevOp,
        Setting::ContentDevDir,
        Setting::RegisterThemeFolder,
        Setting::PreventOverwrite,
        Setting::Verbosity,
        Setting::Dropins,
        Setting::UnknownDropins,
        Setting::GitignoreRules,
        Setting::CustomSteps,
        Setting::Scripts,
    ];

    /// The key this setting is stored under.
    pub fn name(self) -> &'static str {
        match self {
            Setting::Gitignore => "gitignore",
            Setting::EnvExample => "env-example",
            Setting::EnvFile => "env-file",
            Setting::MoveContent => "move-content",
            Setting::ContentDevOp => "content-dev-op",
            Setting::ContentDevDir => "content-dev-dir",
            Setting::RegisterThemeFolder => "register-theme-folder",
            Setting::PreventOverwrite => "prevent-overwrite",
            Setting::Verbosity => "verbosity",
            Setting::Dropins => "dropins",
            Setting::UnknownDropins => "unknown-dropins",
            Setting::GitignoreRules => "gitignore-rules",
            Setting::CustomSteps => "custom-steps",
            Setting::Scripts => "scripts",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// One-line description, used in generated templates and `get` output.
    pub fn doc(self) -> &'static str {
        match self {
            Setting::Gitignore => "Create a .gitignore: true, false, \"ask\", or a URL to copy it from.",
            Setting::EnvExample => "Create a .env.example: true, false, \"ask\", or a URL to copy it from.",
            Setting::EnvFile => "Name of the env file to load.",
            Setting::MoveContent => "Move the content folder out of the core folder. Forced off when register-theme-folder is on.",
            Setting::ContentDevOp => "How to bring the dev content folder in place: symlink, copy, none, or \"ask\".",
            Setting::ContentDevDir => "Dev content folder, relative to the project root.",
            Setting::RegisterThemeFolder => "Register the core themes folder as a theme directory.",
            Setting::PreventOverwrite => "Paths that must never be overwritten.",
            Setting::Verbosity => "Output verbosity: 0, 1, or 2.",
            Setting::Dropins => "Drop-in files to install.",
            Setting::UnknownDropins => "What to do with unrecognized drop-ins: true, false, or \"ask\".",
            Setting::GitignoreRules => "Which entries to put in the generated .gitignore.",
            Setting::CustomSteps => "Extra installer steps, by type identifier.",
            Setting::Scripts => "Callbacks to run around steps, keyed by pre-* / post-* hook name.",
        }
    }

    /// The value used when the input omits this setting or fails validation.
    pub fn default_value(self) -> Option<Value> {
        match self {
            Setting::Gitignore | Setting::EnvExample => Some(Value::Bool(true)),
            Setting::EnvFile => Some(Value::from(".env")),
            Setting::MoveContent => Some(Value::Bool(false)),
            Setting::ContentDevOp => Some(Value::from("symlink")),
            Setting::ContentDevDir => Some(Value::from("content-dev")),
            Setting::RegisterThemeFolder => Some(Value::Bool(true)),
            Setting::PreventOverwrite => Some(Value::List(vec![".gitignore".to_string()])),
            Setting::Dropins => Some(Value::List(Vec::new())),
            Setting::UnknownDropins => Some(Value::ask()),
            Setting::Verbosity
            | Setting::GitignoreRules
            | Setting::CustomSteps
            | Setting::Scripts => None,
        }
    }

    pub(crate) fn validator(self) -> Validator {
        match self {
            Setting::Gitignore | Setting::EnvExample => bool_or_ask_or_url,
            Setting::EnvFile | Setting::ContentDevDir => path,
            Setting::MoveContent => move_content,
            Setting::ContentDevOp => content_dev_op,
            Setting::RegisterThemeFolder => boolean,
            Setting::PreventOverwrite | Setting::Dropins => path_list,
            Setting::Verbosity => verbosity,
            Setting::UnknownDropins => bool_or_ask,
            Setting::GitignoreRules => gitignore_rules,
            Setting::CustomSteps => custom_steps,
            Setting::Scripts => scripts,
        }
    }

    pub(crate) fn validate(self, raw: &RawValue, ctx: &Context<'_>) -> Outcome {
        (self.validator())(raw, ctx)
    }
}

impl Outcome {
    fn from_option(value: Option<Value>) -> Self {
        value.map_or(Outcome::Reject, Outcome::Accept)
    }
}

// --- validators ---

fn boolean(raw: &RawValue, _ctx: &Context<'_>) -> Outcome {
    Outcome::from_option(coerce::bool_alike(raw).map(Value::Bool))
}

fn bool_or_ask(raw: &RawValue, ctx: &Context<'_>) -> Outcome {
    if coerce::is_ask_alias(raw) {
        return Outcome::Accept(Value::ask());
    }
    boolean(raw, ctx)
}

fn bool_or_ask_or_url(raw: &RawValue, ctx: &Context<'_>) -> Outcome {
    match bool_or_ask(raw, ctx) {
        Outcome::Reject => {}
        decided => return decided,
    }
    let RawValue::String(s) = raw else {
        return Outcome::Reject;
    };
    let Some(url) = coerce::sanitize_url(s) else {
        return Outcome::Reject;
    };
    // Sanitizing can leave a bare alias behind ("y es" -> "yes").
    if let decided @ Outcome::Accept(_) = bool_or_ask(&RawValue::String(url.clone()), ctx) {
        return decided;
    }
    Outcome::Accept(Value::String(url))
}

fn move_content(raw: &RawValue, ctx: &Context<'_>) -> Outcome {
    let Some(requested) = coerce::bool_alike(raw) else {
        return Outcome::Reject;
    };
    if requested && theme_folder_registered(ctx) {
        debug!(
            key = Setting::MoveContent.name(),
            "register-theme-folder is on, not moving content"
        );
        return Outcome::Accept(Value::Bool(false));
    }
    Outcome::Accept(Value::Bool(requested))
}

/// The value `register-theme-folder` resolves to for this input, default included.
fn theme_folder_registered(ctx: &Context<'_>) -> bool {
    let setting = Setting::RegisterThemeFolder;
    let resolved = match ctx.sibling(setting).map(|raw| setting.validate(raw, ctx)) {
        Some(Outcome::Accept(value)) => Some(value),
        _ => setting.default_value(),
    };
    resolved.and_then(|v| v.as_bool()).unwrap_or(false)
}

fn content_dev_op(raw: &RawValue, _ctx: &Context<'_>) -> Outcome {
    if coerce::is_ask_alias(raw) {
        return Outcome::Accept(Value::ask());
    }
    if let RawValue::String(s) = raw {
        let wanted = s.trim().to_ascii_lowercase();
        if let Some(op) = DEV_OPS.iter().find(|op| **op == wanted) {
            return Outcome::Accept(Value::from(*op));
        }
        if let Some((_, op)) = DEV_OP_ALIASES.iter().find(|(alias, _)| *alias == wanted) {
            return Outcome::Accept(Value::from(*op));
        }
    }
    match coerce::bool_alike(raw) {
        Some(true) => Outcome::UseDefault,
        Some(false) => Outcome::Accept(Value::from("none")),
        None => Outcome::Reject,
    }
}

fn verbosity(raw: &RawValue, _ctx: &Context<'_>) -> Outcome {
    match coerce::integer_alike(raw) {
        Some(level) if (0..=VERBOSITY_MAX).contains(&level) => {
            Outcome::Accept(Value::Integer(level))
        }
        _ => Outcome::Reject,
    }
}

fn path(raw: &RawValue, _ctx: &Context<'_>) -> Outcome {
    match raw {
        RawValue::String(s) => Outcome::from_option(coerce::normalize_path(s).map(Value::String)),
        _ => Outcome::Reject,
    }
}

fn path_list(raw: &RawValue, _ctx: &Context<'_>) -> Outcome {
    let RawValue::Array(items) = raw else {
        return Outcome::Accept(Value::List(Vec::new()));
    };
    let mut paths: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let Some(p) = item.as_str().and_then(coerce::normalize_path) else {
            debug!(entry = %item, "dropping non-path list entry");
            continue;
        };
        if !paths.contains(&p) {
            paths.push(p);
        }
    }
    Outcome::Accept(Value::List(paths))
}

fn gitignore_rules(raw: &RawValue, _ctx: &Context<'_>) -> Outcome {
    let RawValue::Object(map) = raw else {
        return Outcome::Reject;
    };
    let mut rules = BTreeMap::new();
    for (key, value) in map {
        if GITIGNORE_FLAGS.contains(&key.as_str()) {
            if let RawValue::Bool(b) = value {
                rules.insert(key.clone(), Value::Bool(*b));
            }
        } else if key == GITIGNORE_CUSTOM {
            if let RawValue::Object(custom) = value {
                let entries: BTreeMap<String, Value> = custom
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), Value::from(s))))
                    .collect();
                if !entries.is_empty() {
                    rules.insert(key.clone(), Value::Table(entries));
                }
            }
        } else {
            debug!(sub_key = %key, "dropping unknown gitignore rule");
        }
    }
    if rules.is_empty() {
        return Outcome::Reject;
    }
    Outcome::Accept(Value::Table(rules))
}

fn custom_steps(raw: &RawValue, ctx: &Context<'_>) -> Outcome {
    let RawValue::Array(items) = raw else {
        return Outcome::Reject;
    };
    let steps: Vec<String> = items
        .iter()
        .filter_map(RawValue::as_str)
        .filter(|id| {
            let ok = ctx.registry.is_step(id);
            if !ok {
                debug!(step = %id, "dropping identifier that is not a concrete step");
            }
            ok
        })
        .map(str::to_string)
        .collect();
    if steps.is_empty() {
        return Outcome::Reject;
    }
    Outcome::Accept(Value::List(steps))
}

fn is_hook_name(name: &str) -> bool {
    HOOK_PREFIXES
        .iter()
        .any(|prefix| name.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty()))
}

fn scripts(raw: &RawValue, ctx: &Context<'_>) -> Outcome {
    let RawValue::Object(map) = raw else {
        return Outcome::Reject;
    };
    let mut hooks = BTreeMap::new();
    for (hook, callbacks) in map {
        if !is_hook_name(hook) {
            debug!(hook = %hook, "dropping script with unrecognized hook name");
            continue;
        }
        let candidates: Vec<&str> = match callbacks {
            RawValue::String(s) => vec![s.as_str()],
            RawValue::Array(items) => items.iter().filter_map(RawValue::as_str).collect(),
            _ => Vec::new(),
        };
        let callable: Vec<String> = candidates
            .into_iter()
            .filter(|id| ctx.registry.is_callable(id))
            .map(str::to_string)
            .collect();
        if !callable.is_empty() {
            hooks.insert(hook.clone(), Value::List(callable));
        }
    }
    if hooks.is_empty() {
        return Outcome::Reject;
    }
    Outcome::Accept(Value::Table(hooks))
}
